// Language model data and the providers that supply it.
//
// The data types here mirror what build.rs emits from data/*.xml; the same
// JSON shape is accepted from model directories on disk.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analyzer::MorphDictionary;
use crate::conjugator::TemplateConjugator;
use crate::error::InflectError;
use crate::types::{Language, LanguageFamily};

const EMBEDDED_JSON: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/models.json"));

/// Paradigm tables for a declining language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MorphData {
    pub language: Language,
    pub paradigms: Vec<ParadigmEntry>,
}

/// One lexeme: its dictionary form, analyzer POS tag and every surface form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParadigmEntry {
    pub lemma: String,
    /// Analyzer-native POS tag (e.g. "NOUN", "ADJF", "VERB").
    pub pos: String,
    /// Relative frequency of this lexeme among homonyms.
    pub weight: f64,
    pub forms: Vec<FormEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormEntry {
    pub text: String,
    /// Overrides the paradigm POS for this form (e.g. "INFN", "ADJS").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<String>,
    #[serde(default)]
    pub grammemes: Vec<String>,
}

/// Conjugation templates for a conjugating language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConjugationData {
    pub language: Language,
    /// English mood key -> localized mood name.
    pub moods: Vec<NameEntry>,
    /// English tense key -> localized tense name.
    pub tenses: Vec<NameEntry>,
    pub pronouns: Vec<PronounEntry>,
    pub templates: Vec<TemplateEntry>,
    pub verbs: Vec<VerbEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameEntry {
    pub key: String,
    pub name: String,
}

/// Subject pronoun for one person/number(/gender) slot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronounEntry {
    /// "1", "2" or "3".
    pub person: String,
    /// "s" or "p".
    pub number: String,
    /// "m" or "f" when the language genders this slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub text: String,
    /// Spelling used before a vowel or h (French "j'").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elided: Option<String>,
}

/// A conjugation pattern named `stem:ending` (e.g. `parl:are`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateEntry {
    pub name: String,
    /// May be applied to verbs missing from the verb list by ending match.
    #[serde(default)]
    pub predict: bool,
    pub moods: Vec<TemplateMood>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMood {
    /// Localized mood name.
    pub name: String,
    pub tenses: Vec<TemplateTense>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateTense {
    /// Localized tense name.
    pub name: String,
    /// Six endings (1s 2s 3s 1p 2p 3p) or a single impersonal ending.
    /// "-" marks a missing form, "|" separates alternatives.
    pub endings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerbEntry {
    pub infinitive: String,
    pub template: String,
}

/// Serialized model for one language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelData {
    Morphology(MorphData),
    Conjugation(ConjugationData),
}

impl ModelData {
    pub fn language(&self) -> Language {
        match self {
            ModelData::Morphology(m) => m.language,
            ModelData::Conjugation(c) => c.language,
        }
    }
}

/// Everything build.rs compiles into the library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedData {
    pub models: Vec<ModelData>,
}

/// A loaded, ready-to-query engine for one language.
pub enum LanguageModel {
    Morphology(MorphDictionary),
    Conjugation(TemplateConjugator),
}

impl LanguageModel {
    /// Check `data` against `language` and build its engine.
    ///
    /// The model must be for `language`, of the kind its family uses, and
    /// every paradigm weight must be positive and finite.
    pub fn load(language: Language, data: ModelData) -> Result<Self, InflectError> {
        let fail = |reason: String| InflectError::Model { language, reason };
        if data.language() != language {
            return Err(fail(format!("model is for '{}'", data.language())));
        }

        match (language.family(), data) {
            (LanguageFamily::Declension, ModelData::Morphology(m)) => {
                if let Some(p) = m
                    .paradigms
                    .iter()
                    .find(|p| !(p.weight.is_finite() && p.weight > 0.0))
                {
                    return Err(fail(format!(
                        "paradigm '{}' has weight {}; weights must be positive",
                        p.lemma, p.weight
                    )));
                }
                Ok(LanguageModel::Morphology(MorphDictionary::new(m)))
            }
            (LanguageFamily::Conjugation, ModelData::Conjugation(c)) => {
                Ok(LanguageModel::Conjugation(TemplateConjugator::new(c)))
            }
            (LanguageFamily::Declension, ModelData::Conjugation(_)) => Err(fail(
                "expected a morphology model, found a conjugation model".to_string(),
            )),
            (LanguageFamily::Conjugation, ModelData::Morphology(_)) => Err(fail(
                "expected a conjugation model, found a morphology model".to_string(),
            )),
        }
    }
}

/// Source of language models, consulted before a language is first used.
pub trait ModelProvider: Send + Sync {
    fn is_present(&self, language: Language) -> bool;

    fn fetch(&self, language: Language) -> Result<ModelData, InflectError>;
}

/// Models compiled into the binary from data/*.xml.
pub struct EmbeddedModels {
    models: HashMap<Language, ModelData>,
}

impl EmbeddedModels {
    pub fn new() -> Self {
        let data: EmbeddedData =
            serde_json::from_slice(EMBEDDED_JSON).expect("embedded model JSON is invalid");
        let models = data
            .models
            .into_iter()
            .map(|m| (m.language(), m))
            .collect();
        Self { models }
    }

    pub fn languages(&self) -> Vec<Language> {
        let mut langs: Vec<_> = self.models.keys().copied().collect();
        langs.sort();
        langs
    }
}

impl Default for EmbeddedModels {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelProvider for EmbeddedModels {
    fn is_present(&self, language: Language) -> bool {
        self.models.contains_key(&language)
    }

    fn fetch(&self, language: Language) -> Result<ModelData, InflectError> {
        self.models
            .get(&language)
            .cloned()
            .ok_or_else(|| InflectError::Model {
                language,
                reason: "no embedded model".to_string(),
            })
    }
}

/// Models stored as `<root>/<code>.json`.
pub struct DirectoryModels {
    root: PathBuf,
}

impl DirectoryModels {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, language: Language) -> PathBuf {
        self.root.join(format!("{}.json", language.code()))
    }
}

impl ModelProvider for DirectoryModels {
    fn is_present(&self, language: Language) -> bool {
        self.path_for(language).is_file()
    }

    fn fetch(&self, language: Language) -> Result<ModelData, InflectError> {
        let path = self.path_for(language);
        let content = fs::read_to_string(&path).map_err(|e| InflectError::Model {
            language,
            reason: format!("cannot read {}: {e}", path.display()),
        })?;
        let data: ModelData = serde_json::from_str(&content).map_err(|e| InflectError::Model {
            language,
            reason: format!("invalid model {}: {e}", path.display()),
        })?;
        if data.language() != language {
            return Err(InflectError::Model {
                language,
                reason: format!(
                    "{} holds a model for '{}'",
                    path.display(),
                    data.language()
                ),
            });
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_models_cover_all_languages() {
        let models = EmbeddedModels::new();
        assert_eq!(models.languages(), Language::ALL.to_vec());
        for lang in Language::ALL {
            assert!(models.is_present(lang));
            let data = models.fetch(lang).unwrap();
            assert_eq!(data.language(), lang);
        }
    }

    #[test]
    fn test_embedded_model_kinds_match_family() {
        let models = EmbeddedModels::new();
        assert!(matches!(
            models.fetch(Language::Russian).unwrap(),
            ModelData::Morphology(_)
        ));
        assert!(matches!(
            models.fetch(Language::Italian).unwrap(),
            ModelData::Conjugation(_)
        ));
    }

    #[test]
    fn test_directory_models_round_trip() {
        let dir = std::env::temp_dir().join(format!("inflect-models-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let provider = DirectoryModels::new(&dir);
        assert!(!provider.is_present(Language::Italian));
        assert!(matches!(
            provider.fetch(Language::Italian),
            Err(InflectError::Model { language: Language::Italian, .. })
        ));

        let italian = EmbeddedModels::new().fetch(Language::Italian).unwrap();
        fs::write(dir.join("it.json"), serde_json::to_string(&italian).unwrap()).unwrap();
        assert!(provider.is_present(Language::Italian));
        assert_eq!(provider.fetch(Language::Italian).unwrap().language(), Language::Italian);

        // A file under the wrong code is rejected.
        fs::write(dir.join("fr.json"), serde_json::to_string(&italian).unwrap()).unwrap();
        assert!(provider.fetch(Language::French).is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    fn russian() -> MorphData {
        match EmbeddedModels::new().fetch(Language::Russian).unwrap() {
            ModelData::Morphology(data) => data,
            ModelData::Conjugation(_) => panic!("Russian should be a morphology model"),
        }
    }

    #[test]
    fn test_load_embedded_models() {
        let models = EmbeddedModels::new();
        for lang in Language::ALL {
            let model = LanguageModel::load(lang, models.fetch(lang).unwrap()).unwrap();
            match (lang.family(), model) {
                (LanguageFamily::Declension, LanguageModel::Morphology(_))
                | (LanguageFamily::Conjugation, LanguageModel::Conjugation(_)) => {}
                _ => panic!("{lang} loaded as the wrong kind of model"),
            }
        }
    }

    #[test]
    fn test_load_rejects_bad_weights() {
        for weight in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let mut data = russian();
            data.paradigms[0].weight = weight;
            let result = LanguageModel::load(Language::Russian, ModelData::Morphology(data));
            assert!(
                matches!(result, Err(InflectError::Model { language: Language::Russian, .. })),
                "weight {weight} accepted"
            );
        }
    }

    #[test]
    fn test_load_rejects_kind_mismatch() {
        let italian = EmbeddedModels::new().fetch(Language::Italian).unwrap();
        let mut relabeled = match italian {
            ModelData::Conjugation(data) => data,
            ModelData::Morphology(_) => panic!("Italian should be a conjugation model"),
        };
        relabeled.language = Language::Russian;
        let err = match LanguageModel::load(Language::Russian, ModelData::Conjugation(relabeled)) {
            Err(err) => err,
            Ok(_) => panic!("conjugation model accepted for Russian"),
        };
        assert!(err.to_string().contains("expected a morphology model"));

        let mut data = russian();
        data.language = Language::Italian;
        assert!(LanguageModel::load(Language::Italian, ModelData::Morphology(data)).is_err());
    }

    #[test]
    fn test_load_rejects_other_language() {
        let result = LanguageModel::load(Language::French, ModelData::Morphology(russian()));
        assert!(matches!(result, Err(InflectError::Model { language: Language::French, .. })));
    }
}
