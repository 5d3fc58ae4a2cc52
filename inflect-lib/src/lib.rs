pub mod types;
pub mod error;
pub mod features;
pub mod analyzer;
pub mod conjugator;
pub mod model;
pub mod resolver;
pub mod declension;
pub mod conjugation;
pub mod consolidate;
pub mod config;
pub mod paradigm;
pub mod output;

pub use config::InflectConfig;
pub use error::{ErrorKind, InflectError};
pub use model::{DirectoryModels, EmbeddedModels, ModelProvider};
pub use paradigm::Inflector;
pub use types::{Feature, FeatureSet, Inflection, Language, Paradigm, PartOfSpeech};
