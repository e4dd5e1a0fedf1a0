//! Clasificación de gestos de mano y sugerencia de frases.
//!
//! Un frame de 21 landmarks pasa por [`GestureClassifier`] y produce una
//! etiqueta y su palabra del vocabulario; las palabras acumuladas en una
//! sesión pasan por [`SentencePredictor`] y producen frases ordenadas.

pub mod config;
pub mod context;
pub mod csv_loader;
pub mod custom_rules;
pub mod feature_extractor;
pub mod gesture_classifier;
pub mod sentence_generators;
pub mod sentence_predictor;
pub mod templates;
pub mod types;
pub mod vocabulary;
pub mod word_semantics;

#[cfg(test)]
mod test_support;

pub use config::{Config, ConfigError, PredictorLimits, Thresholds};
pub use gesture_classifier::{CoverageReport, GestureClassifier};
pub use sentence_predictor::SentencePredictor;
pub use types::{Classification, GestureCategory, GestureLabel, Landmark, LandmarkError};
pub use vocabulary::Vocabulary;
