//! Convierte la lista de palabras acumulada en sugerencias ordenadas.

use crate::config::PredictorLimits;
use crate::context::{Context, WordTypes};
use crate::custom_rules::custom_sentences;
use crate::sentence_generators::{default_generators, run_generators, GeneratorInput, GeneratorList};
use crate::templates::{template_sentences, TemplateTable, WordAssociations};
use crate::word_semantics::WordSemantics;
use std::collections::HashSet;
use tracing::debug;

/// Sin estado entre llamadas; las tablas son de solo lectura tras construirse.
pub struct SentencePredictor {
    semantics: WordSemantics,
    templates: TemplateTable,
    associations: WordAssociations,
    generators: GeneratorList,
    limits: PredictorLimits,
}

impl Default for SentencePredictor {
    fn default() -> Self {
        Self {
            semantics: WordSemantics::default(),
            templates: TemplateTable::default(),
            associations: WordAssociations::default(),
            generators: default_generators(),
            limits: PredictorLimits::default(),
        }
    }
}

impl SentencePredictor {
    pub fn new(limits: PredictorLimits) -> Self {
        Self {
            limits,
            ..Self::default()
        }
    }

    pub fn with_semantics(mut self, semantics: WordSemantics) -> Self {
        self.semantics = semantics;
        self
    }

    pub fn with_templates(mut self, templates: TemplateTable, associations: WordAssociations) -> Self {
        self.templates = templates;
        self.associations = associations;
        self
    }

    pub fn with_generators(mut self, generators: GeneratorList) -> Self {
        self.generators = generators;
        self
    }

    pub fn limits(&self) -> PredictorLimits {
        self.limits
    }

    pub fn templates(&self) -> &TemplateTable {
        &self.templates
    }

    pub fn semantics(&self) -> &WordSemantics {
        &self.semantics
    }

    /// Sugerencias para las palabras señadas hasta ahora, la mejor primero.
    ///
    /// Primero la salida de los generadores, luego las respuestas por
    /// palabra y al final las plantillas. Un duplicado conserva su primera
    /// posición.
    pub fn predict<S: AsRef<str>>(&self, words: &[S]) -> Vec<String> {
        if words.is_empty() {
            return self.default_sentences();
        }

        let lowered: Vec<String> = words.iter().map(|w| w.as_ref().to_lowercase()).collect();

        let generated = self.generated_sentences(&lowered);
        let custom = custom_sentences(words, &lowered);
        let templates = template_sentences(
            &lowered,
            &self.associations,
            &self.templates,
            self.limits.per_category,
        );

        debug!(
            words = ?lowered,
            generated = generated.len(),
            custom = custom.len(),
            templates = templates.len(),
            "etapas de predicción"
        );

        let mut seen = HashSet::new();
        generated
            .into_iter()
            .chain(custom)
            .chain(templates)
            .filter(|sentence| seen.insert(sentence.clone()))
            .take(self.limits.result_limit)
            .collect()
    }

    pub fn default_sentences(&self) -> Vec<String> {
        self.templates
            .default_sentences(self.limits.per_category, self.limits.default_limit)
    }

    pub fn context(&self, lowered: &[String]) -> Context {
        Context::analyze(lowered, &self.semantics)
    }

    fn generated_sentences(&self, lowered: &[String]) -> Vec<String> {
        let word_types = WordTypes::analyze(lowered, &self.semantics);
        let context = self.context(lowered);
        let input = GeneratorInput {
            words: lowered,
            word_types: &word_types,
            context: &context,
        };

        let mut sentences = run_generators(&self.generators, &input);
        sentences.truncate(self.limits.ai_limit);
        sentences
    }
}
