use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WordType {
    Number,
    Emotion,
    Agreement,
    Request,
    Need,
    Condition,
    Greeting,
    Farewell,
    Politeness,
    Pronoun,
    Action,
    Adjective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Neutral,
    Positive,
    VeryPositive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    High,
}

/// Descriptor estático de una palabra conocida
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticTag {
    #[serde(rename = "type")]
    pub kind: WordType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u32>,
}

impl SemanticTag {
    pub fn new(kind: WordType) -> Self {
        Self {
            kind,
            sentiment: None,
            urgency: None,
            category: None,
            value: None,
        }
    }

    pub fn sentiment(mut self, sentiment: Sentiment) -> Self {
        self.sentiment = Some(sentiment);
        self
    }

    pub fn urgency(mut self, urgency: Urgency) -> Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}

/// Palabra -> etiqueta semántica. Las palabras sin etiqueta son opacas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSemantics {
    tags: HashMap<String, SemanticTag>,
}

impl Default for WordSemantics {
    fn default() -> Self {
        use Sentiment::*;
        use WordType::*;

        let tags = [
            // Números
            ("zero", SemanticTag::new(Number).value(0)),
            ("one", SemanticTag::new(Number).value(1)),
            ("two", SemanticTag::new(Number).value(2)),
            ("three", SemanticTag::new(Number).value(3)),
            ("four", SemanticTag::new(Number).value(4)),
            ("five", SemanticTag::new(Number).value(5)),
            ("peace", SemanticTag::new(Emotion).sentiment(Positive)),
            ("okay", SemanticTag::new(Agreement).sentiment(Neutral)),
            // Emociones
            ("good", SemanticTag::new(Emotion).sentiment(Positive)),
            ("bad", SemanticTag::new(Emotion).sentiment(Negative)),
            ("love", SemanticTag::new(Emotion).sentiment(VeryPositive)),
            ("happy", SemanticTag::new(Emotion).sentiment(Positive)),
            ("sad", SemanticTag::new(Emotion).sentiment(Negative)),
            ("worried", SemanticTag::new(Emotion).sentiment(Negative)),
            ("tired", SemanticTag::new(Emotion).sentiment(Negative)),
            ("grateful", SemanticTag::new(Emotion).sentiment(Positive)),
            // Necesidades básicas
            ("help", SemanticTag::new(Request).urgency(Urgency::High)),
            ("stop", SemanticTag::new(Request).urgency(Urgency::High)),
            ("eat", SemanticTag::new(Need).category("food")),
            ("drink", SemanticTag::new(Need).category("water")),
            ("sleep", SemanticTag::new(Need).category("rest")),
            ("bathroom", SemanticTag::new(Need).urgency(Urgency::High)),
            ("hot", SemanticTag::new(Condition).category("temperature_high")),
            ("cold", SemanticTag::new(Condition).category("temperature_low")),
            // Social
            ("hello", SemanticTag::new(Greeting).sentiment(Positive)),
            ("bye", SemanticTag::new(Farewell).sentiment(Neutral)),
            ("yes", SemanticTag::new(Agreement).category("positive_response")),
            ("no", SemanticTag::new(Agreement).category("negative_response")),
            ("please", SemanticTag::new(Politeness).category("polite")),
            ("thanks", SemanticTag::new(Politeness).category("polite")),
            ("you", SemanticTag::new(Pronoun).category("second_person")),
            ("me", SemanticTag::new(Pronoun).category("first_person")),
            ("call", SemanticTag::new(Action).category("communication")),
        ];

        Self::from_tags(tags)
    }
}

impl WordSemantics {
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = (S, SemanticTag)>,
        S: Into<String>,
    {
        Self {
            tags: tags
                .into_iter()
                .map(|(word, tag)| (word.into().to_lowercase(), tag))
                .collect(),
        }
    }

    /// Espera la palabra ya en minúsculas
    pub fn get(&self, word: &str) -> Option<&SemanticTag> {
        self.tags.get(word)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.tags.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let semantics = WordSemantics::default();
        assert_eq!(semantics.len(), 33);

        let help = semantics.get("help").unwrap();
        assert_eq!(help.kind, WordType::Request);
        assert_eq!(help.urgency, Some(Urgency::High));

        assert_eq!(semantics.get("three").unwrap().value, Some(3));
        assert_eq!(
            semantics.get("love").unwrap().sentiment,
            Some(Sentiment::VeryPositive)
        );
        assert!(semantics.get("banana").is_none());
    }

    #[test]
    fn test_tag_json_shape() {
        let tag: SemanticTag =
            serde_json::from_str(r#"{ "type": "need", "urgency": "high" }"#).unwrap();
        assert_eq!(tag, SemanticTag::new(WordType::Need).urgency(Urgency::High));

        let json = serde_json::to_string(&SemanticTag::new(WordType::Number).value(2)).unwrap();
        assert_eq!(json, r#"{"type":"number","value":2}"#);
    }

    #[test]
    fn test_custom_table_lowercases_keys() {
        let semantics = WordSemantics::from_tags([("Wave", SemanticTag::new(WordType::Greeting))]);
        assert_eq!(semantics.get("wave").map(|t| t.kind), Some(WordType::Greeting));
    }
}
