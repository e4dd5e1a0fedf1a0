//! Listas de frases por categoría, usadas como respaldo y por defecto.

use std::collections::HashMap;

const DEFAULT_CATEGORIES: [&str; 3] = ["greetings", "basic_needs", "requests"];

/// Tabla ordenada categoría -> frases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateTable {
    categories: Vec<(String, Vec<String>)>,
}

impl Default for TemplateTable {
    fn default() -> Self {
        Self::from_categories([
            (
                "greetings",
                &[
                    "Hello! How are you?",
                    "Good morning!",
                    "Good afternoon!",
                    "Good evening!",
                    "Nice to meet you!",
                    "How are you doing?",
                    "Hello there!",
                    "Hi! Great to see you!",
                    "Welcome!",
                    "Good to see you again!",
                    "Hello! Hope you're well!",
                    "Hi! How's your day?",
                    "Greetings!",
                    "Hello! What's new?",
                    "Hi there!",
                ][..],
            ),
            (
                "emotions",
                &[
                    "I am happy!",
                    "I feel good!",
                    "I love this!",
                    "I am excited!",
                    "I feel sad",
                    "I am worried",
                    "I feel scared",
                    "I am angry",
                    "I feel calm",
                    "I am grateful",
                    "I feel proud",
                    "I am confused",
                    "I feel tired",
                    "I am hurt",
                    "I feel comfortable",
                    "I am surprised",
                ][..],
            ),
            (
                "basic_needs",
                &[
                    "I need help!",
                    "I am hungry",
                    "I am thirsty",
                    "I need to rest",
                    "I need to go to the bathroom",
                    "I am tired",
                    "I feel sick",
                    "I am cold",
                    "I am hot",
                    "I need water",
                    "I want to eat",
                    "I need to sleep",
                    "I need medicine",
                    "I want to sit down",
                    "I need fresh air",
                ][..],
            ),
            (
                "requests",
                &[
                    "Can you help me?",
                    "Please wait",
                    "Please stop",
                    "Come here please",
                    "Please listen",
                    "Look at this",
                    "Please be quiet",
                    "Can you speak louder?",
                    "Please repeat that",
                    "I don't understand",
                    "Can you explain?",
                    "Help me please",
                    "Please give me that",
                    "Can you show me?",
                    "Please wait for me",
                ][..],
            ),
            (
                "daily_activities",
                &[
                    "I want to work",
                    "Let's play together",
                    "I need to study",
                    "Time to exercise",
                    "I want to cook",
                    "Let's clean up",
                    "I need to drive",
                    "Let's go for a walk",
                    "I want to read",
                    "Time to write",
                    "Let's watch something",
                    "I love music",
                    "Let's go shopping",
                    "I want to travel",
                    "Time to rest",
                    "Let's celebrate",
                ][..],
            ),
            (
                "social",
                &[
                    "Nice to meet you!",
                    "You are my friend",
                    "I love my family",
                    "Let's talk",
                    "Thank you so much",
                    "I am sorry",
                    "Excuse me please",
                    "You're welcome",
                    "Let's call someone",
                    "I'll text you",
                    "See you later",
                    "Take care",
                    "Have a great day",
                    "Good luck",
                    "Congratulations!",
                ][..],
            ),
            (
                "objects",
                &[
                    "I need my phone",
                    "Where is my computer?",
                    "I want to read a book",
                    "I need a pen",
                    "Can I have a cup?",
                    "I want some food",
                    "I need my car",
                    "I'm going home",
                    "I need money",
                    "Where are my keys?",
                    "Open the door",
                    "Close the window",
                    "I need a chair",
                    "Clean the table",
                    "I want to go to bed",
                    "I need new clothes",
                    "Where are my shoes?",
                ][..],
            ),
            (
                "numbers",
                &[
                    "I need one thing",
                    "Give me two please",
                    "I want three items",
                    "There are four people",
                    "I have five dollars",
                    "Count to ten",
                    "I need more help",
                    "That's too many",
                    "Give me all of them",
                    "I don't want any",
                    "Just half please",
                    "Make it double",
                ][..],
            ),
            (
                "yes_no",
                &[
                    "Yes, I agree",
                    "No, I don't want that",
                    "Maybe later",
                    "I don't know",
                    "That's correct",
                    "That's wrong",
                    "Absolutely yes",
                    "Definitely no",
                    "I'm not sure",
                    "Yes please",
                    "No thank you",
                    "Perhaps",
                ][..],
            ),
        ])
    }
}

impl TemplateTable {
    pub fn from_categories<I, C, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (C, S)>,
        C: Into<String>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, sentences)| {
                    (
                        name.into(),
                        sentences
                            .into_iter()
                            .map(|s| s.as_ref().to_string())
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|(name, _)| name == category)
    }

    /// Vacío si la categoría no existe
    pub fn sentences(&self, category: &str) -> &[String] {
        self.categories
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, sentences)| sentences.as_slice())
            .unwrap_or(&[])
    }

    /// Primeras `per_category` frases de cada categoría, en el orden dado
    pub fn select<'a, I>(&self, categories: I, per_category: usize) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        categories
            .into_iter()
            .flat_map(|category| self.sentences(category).iter().take(per_category).cloned())
            .collect()
    }

    /// Sugerencias cuando aún no se ha señado ninguna palabra
    pub fn default_sentences(&self, per_category: usize, limit: usize) -> Vec<String> {
        let mut sentences = self.select(DEFAULT_CATEGORIES, per_category);
        sentences.truncate(limit);
        sentences
    }
}

/// Palabra -> categorías de plantilla que sugiere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordAssociations {
    associations: HashMap<String, Vec<String>>,
}

impl Default for WordAssociations {
    fn default() -> Self {
        Self::from_pairs([
            // Números
            ("zero", &["numbers"][..]),
            ("one", &["numbers"]),
            ("two", &["numbers"]),
            ("three", &["numbers"]),
            ("four", &["numbers"]),
            ("five", &["numbers"]),
            ("peace", &["emotions", "greetings"]),
            ("okay", &["yes_no", "agreement"]),
            // Emociones
            ("good", &["emotions", "positive"]),
            ("bad", &["emotions", "negative"]),
            ("love", &["emotions", "positive"]),
            ("happy", &["emotions", "positive"]),
            ("sad", &["emotions", "negative"]),
            ("worried", &["emotions", "negative"]),
            ("tired", &["emotions", "negative"]),
            ("grateful", &["emotions", "positive"]),
            // Necesidades básicas
            ("help", &["requests", "urgent"]),
            ("stop", &["requests", "urgent"]),
            ("eat", &["basic_needs"]),
            ("drink", &["basic_needs"]),
            ("sleep", &["basic_needs"]),
            ("hot", &["basic_needs"]),
            ("cold", &["basic_needs"]),
            ("bathroom", &["basic_needs", "urgent"]),
            // Social
            ("hello", &["greetings"]),
            ("bye", &["greetings"]),
            ("yes", &["yes_no"]),
            ("no", &["yes_no"]),
            ("please", &["requests", "polite"]),
            ("thanks", &["greetings", "polite"]),
            ("you", &["social"]),
            ("me", &["social"]),
            ("call", &["daily_activities"]),
        ])
    }
}

impl WordAssociations {
    pub fn from_pairs<I, W, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (W, C)>,
        W: Into<String>,
        C: IntoIterator,
        C::Item: AsRef<str>,
    {
        Self {
            associations: pairs
                .into_iter()
                .map(|(word, categories)| {
                    (
                        word.into().to_lowercase(),
                        categories
                            .into_iter()
                            .map(|c| c.as_ref().to_string())
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    /// Espera la palabra ya en minúsculas
    pub fn categories(&self, word: &str) -> &[String] {
        self.associations
            .get(word)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.associations.keys().map(String::as_str)
    }
}

/// Frases de plantilla para las categorías que sugieren las palabras.
///
/// Las categorías se toman en orden de primera aparición; las que no
/// están en la tabla se ignoran. Si ninguna sirve se usan todas.
pub fn template_sentences<S: AsRef<str>>(
    words: &[S],
    associations: &WordAssociations,
    table: &TemplateTable,
    per_category: usize,
) -> Vec<String> {
    let mut selected: Vec<&str> = Vec::new();
    for word in words {
        for category in associations.categories(word.as_ref()) {
            if table.contains(category) && !selected.contains(&category.as_str()) {
                selected.push(category);
            }
        }
    }

    if selected.is_empty() {
        selected = table.categories().collect();
    }

    table.select(selected, per_category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_shape() {
        let table = TemplateTable::default();
        let names: Vec<&str> = table.categories().collect();
        assert_eq!(
            names,
            [
                "greetings",
                "emotions",
                "basic_needs",
                "requests",
                "daily_activities",
                "social",
                "objects",
                "numbers",
                "yes_no"
            ]
        );
        assert_eq!(table.sentences("greetings")[0], "Hello! How are you?");
        assert!(table.sentences("agreement").is_empty());
    }

    #[test]
    fn test_default_sentences() {
        let defaults = TemplateTable::default().default_sentences(3, 10);
        assert_eq!(defaults.len(), 9);
        assert_eq!(defaults[0], "Hello! How are you?");
        assert_eq!(defaults[3], "I need help!");
        assert_eq!(defaults[8], "Please stop");
        assert_eq!(TemplateTable::default().default_sentences(3, 4).len(), 4);
    }

    #[test]
    fn test_unknown_association_categories_are_skipped() {
        let out = template_sentences(
            &["okay"],
            &WordAssociations::default(),
            &TemplateTable::default(),
            3,
        );
        assert_eq!(out, ["Yes, I agree", "No, I don't want that", "Maybe later"]);
    }

    #[test]
    fn test_first_appearance_order() {
        let out = template_sentences(
            &["you", "hello", "you"],
            &WordAssociations::default(),
            &TemplateTable::default(),
            1,
        );
        assert_eq!(out, ["Nice to meet you!", "Hello! How are you?"]);
    }

    #[test]
    fn test_no_hint_uses_every_category() {
        let table = TemplateTable::default();
        let out = template_sentences(&["banana"], &WordAssociations::default(), &table, 3);
        assert_eq!(out.len(), 27);
        assert_eq!(out[3], "I am happy!");
    }

    #[test]
    fn test_tables_from_borrowed_slices() {
        let sentences: &[&str] = &["Hi!", "Hey!"];
        let table = TemplateTable::from_categories([("greetings", sentences)]);
        assert_eq!(table.sentences("greetings"), ["Hi!", "Hey!"]);

        let associations = WordAssociations::from_pairs([("Hello", &["greetings"][..])]);
        assert_eq!(associations.categories("hello"), ["greetings"]);

        assert_eq!(TemplateTable::default().categories().count(), 9);
        assert_eq!(WordAssociations::default().words().count(), 33);
        assert_eq!(WordAssociations::default().categories("peace"), ["emotions", "greetings"]);
    }

    #[test]
    fn test_custom_tables() {
        let table = TemplateTable::from_categories([("weather", vec!["It is sunny", "It rains"])]);
        let associations = WordAssociations::from_pairs([("Hot", vec!["weather", "missing"])]);
        assert_eq!(
            template_sentences(&["hot"], &associations, &table, 5),
            ["It is sunny", "It rains"]
        );
    }
}
