//! Generadores de frases basados en reglas.
//!
//! Cada generador convierte la lista de palabras (en minúsculas) en frases
//! candidatas. El predictor los ejecuta en orden de registro y conserva ese
//! orden en la salida: los primeros generadores tienen más prioridad.

use crate::context::{Context, WordTypes};
use crate::word_semantics::{Sentiment, Urgency};
use tracing::trace;

/// Lo que recibe cada generador
#[derive(Debug, Clone, Copy)]
pub struct GeneratorInput<'a> {
    pub words: &'a [String],
    pub word_types: &'a WordTypes,
    pub context: &'a Context,
}

impl GeneratorInput<'_> {
    pub fn has(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }
}

pub trait SentenceGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Filtro por contexto; un generador que no aplica se salta
    fn applies(&self, _context: &Context) -> bool {
        true
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String>;
}

pub type GeneratorList = Vec<Box<dyn SentenceGenerator>>;

/// El orden de registro es la prioridad de salida
pub fn default_generators() -> GeneratorList {
    vec![
        Box::new(GreetingGenerator),
        Box::new(RequestGenerator),
        Box::new(EmotionalGenerator),
        Box::new(QuantityGenerator),
        Box::new(ActionGenerator),
        Box::new(CombinationGenerator),
        Box::new(ContextualVariationGenerator),
    ]
}

/// Concatena la salida de cada generador aplicable
pub fn run_generators(generators: &[Box<dyn SentenceGenerator>], input: &GeneratorInput<'_>) -> Vec<String> {
    let mut sentences = Vec::new();
    for generator in generators {
        if !generator.applies(input.context) {
            continue;
        }
        let produced = generator.generate(input);
        trace!(generator = generator.name(), count = produced.len(), "generador ejecutado");
        sentences.extend(produced);
    }
    sentences
}

fn push(out: &mut Vec<String>, sentences: &[&str]) {
    out.extend(sentences.iter().map(|s| s.to_string()));
}

pub struct GreetingGenerator;

impl SentenceGenerator for GreetingGenerator {
    fn name(&self) -> &'static str {
        "greeting"
    }

    fn applies(&self, context: &Context) -> bool {
        context.is_greeting
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();

        if input.has("hello") {
            push(
                &mut out,
                &[
                    "Hello! How are you?",
                    "Hello there!",
                    "Hi! Nice to see you!",
                    "Hello! How can I help you?",
                ],
            );
            if input.has("good") {
                push(
                    &mut out,
                    &[
                        "Hello! I hope you're having a good day!",
                        "Good to see you! Hello!",
                        "Hello! Everything is good!",
                    ],
                );
            }
        }

        if input.has("good") && input.has("you") {
            push(
                &mut out,
                &["Good for you!", "That's good! How are you?", "You're doing good!"],
            );
        }

        if input.has("bye") {
            push(
                &mut out,
                &[
                    "Goodbye! Take care!",
                    "Bye! See you later!",
                    "Goodbye! Have a good day!",
                ],
            );
            if input.has("good") {
                push(&mut out, &["Goodbye! Have a good time!"]);
            }
        }

        out
    }
}

pub struct RequestGenerator;

impl SentenceGenerator for RequestGenerator {
    fn name(&self) -> &'static str {
        "request"
    }

    fn applies(&self, context: &Context) -> bool {
        context.is_request
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();

        if input.has("help") {
            push(
                &mut out,
                &[
                    "Can you help me please?",
                    "I need your help!",
                    "Help me with this!",
                    "Could you help me out?",
                ],
            );
            if input.has("you") {
                push(
                    &mut out,
                    &["Can you help me?", "I need you to help me!", "You can help me!"],
                );
            }
        }

        if input.has("stop") {
            push(
                &mut out,
                &[
                    "Please stop!",
                    "Stop right there!",
                    "I need you to stop!",
                    "Stop what you're doing!",
                ],
            );
            if input.has("you") {
                push(&mut out, &["You need to stop!"]);
            }
        }

        if input.has("call") {
            push(
                &mut out,
                &[
                    "Please call me!",
                    "I need to make a call!",
                    "Can you call someone?",
                    "Let's make a phone call!",
                ],
            );
            if input.has("you") {
                push(
                    &mut out,
                    &["I will call you!", "You should call me!", "Can you call me?"],
                );
            }
        }

        out
    }
}

pub struct EmotionalGenerator;

impl SentenceGenerator for EmotionalGenerator {
    fn name(&self) -> &'static str {
        "emotional"
    }

    fn applies(&self, context: &Context) -> bool {
        context.is_emotional
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();

        if input.has("love") {
            push(
                &mut out,
                &[
                    "I love this!",
                    "Love is wonderful!",
                    "I feel so much love!",
                    "This is lovely!",
                ],
            );
            if input.has("you") {
                push(
                    &mut out,
                    &["I love you!", "You are loved!", "I love being with you!"],
                );
            }
        }

        if input.has("peace") {
            push(
                &mut out,
                &[
                    "Peace and love!",
                    "I feel peaceful!",
                    "Let's have peace!",
                    "Peace to everyone!",
                ],
            );
            if input.has("good") {
                push(&mut out, &["Good vibes and peace!"]);
            }
        }

        if input.has("good") {
            push(
                &mut out,
                &[
                    "I feel good!",
                    "This is really good!",
                    "Everything is good!",
                    "Good feelings all around!",
                ],
            );
        }

        out
    }
}

pub struct QuantityGenerator;

impl SentenceGenerator for QuantityGenerator {
    fn name(&self) -> &'static str {
        "quantity"
    }

    fn applies(&self, context: &Context) -> bool {
        context.has_numbers
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();

        for number in &input.word_types.numbers {
            out.extend([
                format!("I need {number} things!"),
                format!("Give me {number} please!"),
                format!("There are {number} of them!"),
                format!("I want {number} items!"),
                format!("Count to {number}!"),
            ]);

            if input.has("you") {
                out.extend([
                    format!("You have {number}!"),
                    format!("Can you give me {number}?"),
                    format!("You need {number} things!"),
                ]);
            }

            if input.has("help") {
                out.push(format!("Help me with {number} things!"));
            }

            if input.has("good") {
                out.push(format!("{} is a good number!", title_case(number)));
            }
        }

        out
    }
}

pub struct ActionGenerator;

impl SentenceGenerator for ActionGenerator {
    fn name(&self) -> &'static str {
        "action"
    }

    fn applies(&self, context: &Context) -> bool {
        context.is_action
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();

        if input.has("call") {
            push(
                &mut out,
                &[
                    "Let's make a call!",
                    "Time to call someone!",
                    "I want to call now!",
                    "Calling is important!",
                ],
            );
        }

        if input.has("help") {
            push(
                &mut out,
                &[
                    "Let's help each other!",
                    "Helping is caring!",
                    "I want to help!",
                    "Help is on the way!",
                ],
            );
        }

        if input.has("stop") {
            push(
                &mut out,
                &["Time to stop!", "Let's stop here!", "Stop and think!", "Stop everything!"],
            );
        }

        out
    }
}

/// Patrones de varias palabras más frases genéricas sobre la frase completa
pub struct CombinationGenerator;

const COUNTING_WORDS: [&str; 5] = ["one", "two", "three", "four", "five"];

impl SentenceGenerator for CombinationGenerator {
    fn name(&self) -> &'static str {
        "combination"
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();
        if input.words.len() < 2 {
            return out;
        }

        if input.has("hello") && input.has("you") {
            push(
                &mut out,
                &[
                    "Hello! How are you doing?",
                    "Hello you! Nice to see you!",
                    "Hello there! You look great!",
                ],
            );
        }

        if input.has("good") && input.has("help") {
            push(
                &mut out,
                &[
                    "Good! I need help!",
                    "Help me do something good!",
                    "Good help is appreciated!",
                ],
            );
        }

        if input.has("love") && input.has("peace") {
            push(
                &mut out,
                &[
                    "Love and peace to all!",
                    "I love peace and harmony!",
                    "Peace, love, and happiness!",
                ],
            );
        }

        if input.has("good") {
            if let Some(number) = input.words.iter().find(|w| COUNTING_WORDS.contains(&w.as_str())) {
                out.push(format!("I have {number} good things!"));
            }
        }

        let phrase = input.words.join(" ");
        out.extend([
            format!("I want to talk about {phrase}!"),
            format!("Let's discuss {phrase}!"),
            format!("These words are important: {phrase}!"),
            format!("I'm thinking about {phrase}!"),
        ]);

        out
    }
}

/// Frases de ánimo y urgencia, independientes de palabras concretas
pub struct ContextualVariationGenerator;

impl SentenceGenerator for ContextualVariationGenerator {
    fn name(&self) -> &'static str {
        "contextual_variation"
    }

    fn generate(&self, input: &GeneratorInput<'_>) -> Vec<String> {
        let mut out = Vec::new();
        let context = input.context;

        if context.urgency == Urgency::High {
            push(
                &mut out,
                &[
                    "This is urgent!",
                    "I need immediate attention!",
                    "Please respond quickly!",
                    "This is important!",
                ],
            );
        }

        match context.sentiment {
            Sentiment::Positive => push(
                &mut out,
                &[
                    "I'm feeling positive about this!",
                    "This makes me happy!",
                    "Everything is wonderful!",
                    "I'm in a great mood!",
                ],
            ),
            Sentiment::VeryPositive => push(
                &mut out,
                &[
                    "I'm absolutely thrilled!",
                    "This is amazing!",
                    "I couldn't be happier!",
                    "This is the best!",
                ],
            ),
            Sentiment::Neutral | Sentiment::Negative => {}
        }

        if context.is_emotional && context.is_request {
            push(
                &mut out,
                &[
                    "I really need your help with this!",
                    "This is emotionally important to me!",
                    "Please understand how I feel!",
                ],
            );
        }

        out
    }
}

/// Mayúscula en la primera letra de cada tramo alfabético, minúsculas en el resto
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word_semantics::WordSemantics;

    fn run(generator: &dyn SentenceGenerator, words: &[&str]) -> Vec<String> {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let semantics = WordSemantics::default();
        let word_types = WordTypes::analyze(&words, &semantics);
        let context = Context::analyze(&words, &semantics);
        let input = GeneratorInput {
            words: &words,
            word_types: &word_types,
            context: &context,
        };
        generator.generate(&input)
    }

    #[test]
    fn test_greeting_unlocks() {
        assert_eq!(run(&GreetingGenerator, &["hello"]).len(), 4);
        let with_good = run(&GreetingGenerator, &["hello", "good"]);
        assert_eq!(with_good.len(), 7);
        assert_eq!(with_good[4], "Hello! I hope you're having a good day!");
    }

    #[test]
    fn test_gates() {
        let ctx = Context::default();
        assert!(!GreetingGenerator.applies(&ctx));
        assert!(!RequestGenerator.applies(&ctx));
        assert!(!QuantityGenerator.applies(&ctx));
        assert!(CombinationGenerator.applies(&ctx));
        assert!(ContextualVariationGenerator.applies(&ctx));
    }

    #[test]
    fn test_quantity_per_number() {
        let out = run(&QuantityGenerator, &["two", "good", "three"]);
        assert_eq!(out.len(), 12);
        assert_eq!(out[0], "I need two things!");
        assert_eq!(out[5], "Two is a good number!");
        assert_eq!(out[6], "I need three things!");
    }

    #[test]
    fn test_combination_needs_two_words() {
        assert!(run(&CombinationGenerator, &["hello"]).is_empty());

        let out = run(&CombinationGenerator, &["hello", "you"]);
        assert_eq!(out[0], "Hello! How are you doing?");
        assert_eq!(out.last().unwrap(), "I'm thinking about hello you!");
        assert_eq!(out.len(), 7);
    }

    #[test]
    fn test_combination_generic_for_unknown_words() {
        let out = run(&CombinationGenerator, &["banana", "apple"]);
        assert_eq!(
            out,
            [
                "I want to talk about banana apple!",
                "Let's discuss banana apple!",
                "These words are important: banana apple!",
                "I'm thinking about banana apple!",
            ]
        );
    }

    #[test]
    fn test_first_number_with_good() {
        let out = run(&CombinationGenerator, &["five", "good", "two"]);
        assert!(out.contains(&"I have five good things!".to_string()));
    }

    #[test]
    fn test_contextual_variation() {
        let out = run(&ContextualVariationGenerator, &["love", "help"]);
        assert_eq!(out[0], "This is urgent!");
        assert_eq!(out[4], "I'm absolutely thrilled!");
        assert_eq!(out[8], "I really need your help with this!");
        assert_eq!(out.len(), 11);

        assert!(run(&ContextualVariationGenerator, &["sad"]).is_empty());
    }

    #[test]
    fn test_run_respects_order_and_gates() {
        let words = vec!["hello".to_string()];
        let semantics = WordSemantics::default();
        let word_types = WordTypes::analyze(&words, &semantics);
        let context = Context::analyze(&words, &semantics);
        let input = GeneratorInput {
            words: &words,
            word_types: &word_types,
            context: &context,
        };
        let out = run_generators(&default_generators(), &input);
        assert_eq!(out[0], "Hello! How are you?");
        assert_eq!(out[4], "I'm feeling positive about this!");
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hello you"), "Hello You");
        assert_eq!(title_case("HELP me"), "Help Me");
        assert_eq!(title_case("you're"), "You'Re");
    }
}
