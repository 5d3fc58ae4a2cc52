// Request entry point: validates the request, loads the language model on
// first use and dispatches to declension or conjugation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::InflectConfig;
use crate::conjugation::conjugate_paradigm;
use crate::consolidate::{MergePolicy, PronounMerge};
use crate::declension::decline;
use crate::error::InflectError;
use crate::features::enumerate_for;
use crate::model::{EmbeddedModels, LanguageModel, ModelProvider};
use crate::types::{Language, Lemma, Paradigm, PartOfSpeech};

/// Produces paradigms for every supported language.
///
/// Models are fetched from the provider the first time a language is used
/// and shared by all later requests. An `Inflector` may be used from several
/// threads at once.
pub struct Inflector {
    provider: Box<dyn ModelProvider>,
    config: InflectConfig,
    policy: Box<dyn MergePolicy + Send + Sync>,
    loaded: Mutex<HashMap<Language, Arc<LanguageModel>>>,
}

impl Inflector {
    pub fn new(
        provider: impl ModelProvider + 'static,
        config: InflectConfig,
    ) -> Result<Self, InflectError> {
        config.validate()?;
        Ok(Self {
            provider: Box::new(provider),
            config,
            policy: Box::new(PronounMerge),
            loaded: Mutex::new(HashMap::new()),
        })
    }

    /// An inflector over the models compiled into the library.
    pub fn embedded(config: InflectConfig) -> Result<Self, InflectError> {
        Self::new(EmbeddedModels::new(), config)
    }

    /// Replace the policy used to consolidate conjugation results.
    pub fn with_merge_policy(mut self, policy: impl MergePolicy + Send + Sync + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Build the paradigm of `lemma` as `pos` in `language`.
    pub fn produce_paradigm(
        &self,
        lemma: &str,
        pos: PartOfSpeech,
        language: Language,
    ) -> Result<Paradigm, InflectError> {
        let lemma = Lemma::new(lemma)?;
        enumerate_for(language.family(), pos)?;

        let model = self.model(language)?;
        match model.as_ref() {
            LanguageModel::Morphology(dictionary) => decline(
                dictionary,
                lemma.as_str(),
                pos,
                self.config.confidence_threshold,
            ),
            LanguageModel::Conjugation(engine) => conjugate_paradigm(
                engine,
                lemma.as_str(),
                pos,
                &self.config.mood,
                &self.config.tense,
                self.policy.as_ref(),
            ),
        }
    }

    /// Parse string inputs, then [`Self::produce_paradigm`].
    pub fn produce(&self, lemma: &str, pos: &str, language: &str) -> Result<Paradigm, InflectError> {
        let lemma = Lemma::new(lemma)?;
        let language: Language = language.parse()?;
        let pos: PartOfSpeech = pos.parse()?;
        self.produce_paradigm(lemma.as_str(), pos, language)
    }

    fn model(&self, language: Language) -> Result<Arc<LanguageModel>, InflectError> {
        let mut loaded = self.loaded.lock().map_err(|_| InflectError::Model {
            language,
            reason: "model cache lock poisoned".to_string(),
        })?;
        if let Some(model) = loaded.get(&language) {
            return Ok(Arc::clone(model));
        }

        if !self.provider.is_present(language) {
            tracing::info!(language = %language, "model not present locally, fetching");
        }
        let model = Arc::new(LanguageModel::load(language, self.provider.fetch(language)?)?);
        tracing::debug!(language = %language, "loaded language model");
        loaded.insert(language, Arc::clone(&model));
        Ok(model)
    }
}
