use crate::config::ConfigError;
use crate::types::{GestureCategory, GestureLabel};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

const DEFAULT_WORDS: [(GestureLabel, &str); 33] = [
    (GestureLabel::Zero, "zero"),
    (GestureLabel::One, "one"),
    (GestureLabel::Two, "two"),
    (GestureLabel::Three, "three"),
    (GestureLabel::Four, "four"),
    (GestureLabel::Five, "five"),
    (GestureLabel::Peace, "peace"),
    (GestureLabel::OkSign, "okay"),
    (GestureLabel::ThumbsUp, "good"),
    (GestureLabel::ThumbsDown, "bad"),
    (GestureLabel::LoveSign, "love"),
    (GestureLabel::HappyPalm, "happy"),
    (GestureLabel::SadFist, "sad"),
    (GestureLabel::WorriedForehead, "worried"),
    (GestureLabel::TiredRub, "tired"),
    (GestureLabel::GratefulBow, "grateful"),
    (GestureLabel::HelpWave, "help"),
    (GestureLabel::StopPalm, "stop"),
    (GestureLabel::EatMouth, "eat"),
    (GestureLabel::DrinkCup, "drink"),
    (GestureLabel::SleepHead, "sleep"),
    (GestureLabel::BathroomUrgent, "bathroom"),
    (GestureLabel::HotFan, "hot"),
    (GestureLabel::ColdShiver, "cold"),
    (GestureLabel::HelloWave, "hello"),
    (GestureLabel::ByeWave, "bye"),
    (GestureLabel::YesNod, "yes"),
    (GestureLabel::NoShake, "no"),
    (GestureLabel::PleasePray, "please"),
    (GestureLabel::ThanksBow, "thanks"),
    (GestureLabel::YouPoint, "you"),
    (GestureLabel::MePoint, "me"),
    (GestureLabel::CallPhone, "call"),
];

/// Etiqueta de gesto -> palabra visible, una palabra por etiqueta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<(GestureLabel, String)>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            entries: DEFAULT_WORDS
                .iter()
                .map(|&(label, word)| (label, word.to_string()))
                .collect(),
        }
    }
}

impl Vocabulary {
    /// Reemplaza las palabras de las etiquetas dadas y conserva el resto
    pub fn with_overrides<I, K, V>(mut self, overrides: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, word) in overrides {
            let label: GestureLabel = key
                .as_ref()
                .parse()
                .map_err(|_| ConfigError::UnknownLabel(key.as_ref().to_string()))?;
            let word = word.into().to_lowercase();
            if let Some(entry) = self.entries.iter_mut().find(|(l, _)| *l == label) {
                entry.1 = word;
            }
        }

        let mut seen = HashSet::new();
        for (_, word) in &self.entries {
            if !seen.insert(word.as_str()) {
                return Err(ConfigError::DuplicateWord(word.clone()));
            }
        }

        Ok(self)
    }

    /// Carga `{ "<label>": "<word>", ... }` sobre la tabla por defecto
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let overrides: HashMap<String, String> = serde_json::from_str(content)?;
        Self::default().with_overrides(overrides)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn word(&self, label: GestureLabel) -> &str {
        self.entries
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, w)| w.as_str())
            .unwrap_or_else(|| label.as_str())
    }

    pub fn label_for(&self, word: &str) -> Option<GestureLabel> {
        let word = word.to_lowercase();
        self.entries
            .iter()
            .find(|(_, w)| *w == word)
            .map(|(l, _)| *l)
    }

    pub fn entries(&self) -> impl Iterator<Item = (GestureLabel, &str)> + '_ {
        self.entries.iter().map(|(l, w)| (*l, w.as_str()))
    }

    /// Listado de tutorial de una categoría, en orden de declaración
    pub fn by_category(&self, category: GestureCategory) -> Vec<(GestureLabel, &str)> {
        self.entries()
            .filter(|(label, _)| label.category() == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_has_one_word() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.len(), GestureLabel::ALL.len());
        for label in GestureLabel::ALL {
            let word = vocab.word(label);
            assert_eq!(vocab.label_for(word), Some(label));
            assert_eq!(vocab.entries().filter(|(l, _)| *l == label).count(), 1);
        }
    }

    #[test]
    fn test_known_words() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.word(GestureLabel::OkSign), "okay");
        assert_eq!(vocab.word(GestureLabel::ThumbsUp), "good");
        assert_eq!(vocab.word(GestureLabel::HelloWave), "hello");
        assert_eq!(vocab.label_for("Call"), Some(GestureLabel::CallPhone));
        assert_eq!(vocab.label_for("banana"), None);
    }

    #[test]
    fn test_tutorial_listing() {
        let vocab = Vocabulary::default();
        let social = vocab.by_category(GestureCategory::Social);
        assert_eq!(social.len(), 9);
        assert_eq!(social[0], (GestureLabel::HelloWave, "hello"));
        assert_eq!(social[8], (GestureLabel::CallPhone, "call"));
    }

    #[test]
    fn test_json_override() {
        let vocab = Vocabulary::from_json_str(r#"{ "hello_wave": "Hi", "ok": "fine" }"#).unwrap();
        assert_eq!(vocab.word(GestureLabel::HelloWave), "hi");
        assert_eq!(vocab.word(GestureLabel::OkSign), "fine");
        assert_eq!(vocab.word(GestureLabel::ByeWave), "bye");
    }

    #[test]
    fn test_override_rejects_unknown_label() {
        let err = Vocabulary::from_json_str(r#"{ "wave": "hi" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownLabel(ref l) if l == "wave"));
    }

    #[test]
    fn test_override_rejects_shared_word() {
        let err = Vocabulary::default()
            .with_overrides([("bye_wave", "hello")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateWord(ref w) if w == "hello"));
    }
}
