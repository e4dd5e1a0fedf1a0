//! Intención agregada de una lista de palabras.

use crate::word_semantics::{Sentiment, Urgency, WordSemantics, WordType};
use serde::Serialize;

/// Se recalcula en cada predicción
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Context {
    pub is_greeting: bool,
    pub is_request: bool,
    pub is_emotional: bool,
    pub has_numbers: bool,
    pub is_action: bool,
    /// Sentimiento de la última palabra etiquetada, no un promedio
    pub sentiment: Sentiment,
    pub urgency: Urgency,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            is_greeting: false,
            is_request: false,
            is_emotional: false,
            has_numbers: false,
            is_action: false,
            sentiment: Sentiment::Neutral,
            urgency: Urgency::Normal,
        }
    }
}

impl Context {
    /// `words` debe venir en minúsculas
    pub fn analyze<S: AsRef<str>>(words: &[S], semantics: &WordSemantics) -> Self {
        let mut context = Self::default();

        for word in words {
            let Some(tag) = semantics.get(word.as_ref()) else {
                continue;
            };

            match tag.kind {
                WordType::Greeting => context.is_greeting = true,
                WordType::Emotion => context.is_emotional = true,
                WordType::Action => context.is_action = true,
                WordType::Number => context.has_numbers = true,
                _ => {}
            }

            if tag.urgency == Some(Urgency::High) {
                context.urgency = Urgency::High;
                context.is_request = true;
            }

            if let Some(sentiment) = tag.sentiment {
                context.sentiment = sentiment;
            }
        }

        let contains = |w: &str| words.iter().any(|x| x.as_ref() == w);

        if contains("help") || contains("stop") {
            context.is_request = true;
            context.urgency = Urgency::High;
        }

        if contains("you") {
            context.is_request = true;
        }

        context
    }
}

/// Palabras conocidas agrupadas por tipo semántico, en orden de entrada
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordTypes {
    pub greetings: Vec<String>,
    pub emotions: Vec<String>,
    pub actions: Vec<String>,
    pub numbers: Vec<String>,
    pub pronouns: Vec<String>,
    pub adjectives: Vec<String>,
    /// Palabras de acuerdo y despedida
    pub requests: Vec<String>,
}

impl WordTypes {
    /// `words` debe venir en minúsculas
    pub fn analyze<S: AsRef<str>>(words: &[S], semantics: &WordSemantics) -> Self {
        let mut types = Self::default();

        for word in words {
            let word = word.as_ref();
            let Some(tag) = semantics.get(word) else {
                continue;
            };

            let bucket = match tag.kind {
                WordType::Greeting => &mut types.greetings,
                WordType::Emotion => &mut types.emotions,
                WordType::Action => &mut types.actions,
                WordType::Number => &mut types.numbers,
                WordType::Pronoun => &mut types.pronouns,
                WordType::Adjective => &mut types.adjectives,
                WordType::Agreement | WordType::Farewell => &mut types.requests,
                _ => continue,
            };
            bucket.push(word.to_string());
        }

        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze(words: &[&str]) -> Context {
        Context::analyze(words, &WordSemantics::default())
    }

    #[test]
    fn test_empty_context() {
        assert_eq!(analyze(&[]), Context::default());
        assert_eq!(analyze(&["banana"]), Context::default());
    }

    #[test]
    fn test_greeting_flags() {
        let ctx = analyze(&["hello"]);
        assert!(ctx.is_greeting);
        assert!(!ctx.is_request);
        assert_eq!(ctx.sentiment, Sentiment::Positive);
        assert_eq!(ctx.urgency, Urgency::Normal);
    }

    #[test]
    fn test_urgency_from_tag_and_literal() {
        let bathroom = analyze(&["bathroom"]);
        assert!(bathroom.is_request);
        assert_eq!(bathroom.urgency, Urgency::High);

        let stop = analyze(&["stop"]);
        assert!(stop.is_request);
        assert_eq!(stop.urgency, Urgency::High);
    }

    #[test]
    fn test_you_is_request_without_urgency() {
        let ctx = analyze(&["you"]);
        assert!(ctx.is_request);
        assert_eq!(ctx.urgency, Urgency::Normal);
    }

    #[test]
    fn test_sentiment_last_write_wins() {
        assert_eq!(analyze(&["love", "sad"]).sentiment, Sentiment::Negative);
        assert_eq!(analyze(&["sad", "love"]).sentiment, Sentiment::VeryPositive);
        // una palabra sin sentimiento conserva el valor anterior
        assert_eq!(analyze(&["love", "three"]).sentiment, Sentiment::VeryPositive);
        assert_eq!(analyze(&["love", "bye"]).sentiment, Sentiment::Neutral);
    }

    #[test]
    fn test_number_and_action_flags() {
        let ctx = analyze(&["two", "call"]);
        assert!(ctx.has_numbers);
        assert!(ctx.is_action);
        assert!(!ctx.is_emotional);
    }

    #[test]
    fn test_word_types() {
        let types = WordTypes::analyze(
            &["hello", "two", "you", "okay", "bye", "three", "eat"],
            &WordSemantics::default(),
        );
        assert_eq!(types.greetings, ["hello"]);
        assert_eq!(types.numbers, ["two", "three"]);
        assert_eq!(types.pronouns, ["you"]);
        assert_eq!(types.requests, ["okay", "bye"]);
        assert!(types.emotions.is_empty());
    }
}
