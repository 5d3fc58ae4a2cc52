use crate::types::{Language, PartOfSpeech};

/// Abstract error kinds reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Empty lemma, unsupported part of speech or language, bad configuration.
    InvalidInput,
    /// The analyzer's best guess is below the confidence threshold.
    LowConfidence,
    /// The analyzer disagrees with the declared part of speech.
    PosMismatch,
    /// Mood or tense the conjugation engine does not provide.
    UnsupportedLanguageOrMood,
    /// Anything else raised by an analyzer, conjugator or model provider.
    EngineFailure,
}

impl ErrorKind {
    /// True when the request itself is at fault rather than the engine.
    pub fn is_caller_error(self) -> bool {
        !matches!(self, ErrorKind::EngineFailure)
    }
}

/// Why a conjugation request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConjugationCause {
    EmptyLemma,
    UnsupportedMood,
    UnsupportedTense,
    /// The engine itself raised.
    Engine,
    /// The engine returned a person/number/gender code we do not know.
    Mapping,
}

/// Error type for paradigm generation.
#[derive(Debug, thiserror::Error)]
pub enum InflectError {
    #[error("lemma cannot be empty")]
    EmptyLemma,
    #[error("unsupported part of speech: {0}")]
    UnsupportedPartOfSpeech(String),
    #[error("language '{0}' is not supported; supported languages: es, fr, it, pt, ro, ru")]
    UnsupportedLanguage(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(
        "best parse for '{word}' has score {score:.2}, below threshold {threshold:.2} (POS: {detected})"
    )]
    LowConfidence {
        word: String,
        score: f64,
        threshold: f64,
        detected: String,
    },
    #[error("POS mismatch for '{word}': expected {expected}, got {detected}")]
    PosMismatch {
        word: String,
        expected: PartOfSpeech,
        detected: String,
    },
    #[error("failed to conjugate '{lemma}' in language '{language}': {reason}")]
    Conjugation {
        lemma: String,
        language: Language,
        reason: String,
        cause: ConjugationCause,
    },
    #[error("analyzer failed on '{word}' ({language}): {reason}")]
    Analyzer {
        word: String,
        language: Language,
        reason: String,
    },
    #[error("model for '{language}' unavailable: {reason}")]
    Model { language: Language, reason: String },
}

impl InflectError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            InflectError::EmptyLemma
            | InflectError::UnsupportedPartOfSpeech(_)
            | InflectError::UnsupportedLanguage(_)
            | InflectError::InvalidConfig(_) => ErrorKind::InvalidInput,
            InflectError::LowConfidence { .. } => ErrorKind::LowConfidence,
            InflectError::PosMismatch { .. } => ErrorKind::PosMismatch,
            InflectError::Conjugation { cause, .. } => match cause {
                ConjugationCause::EmptyLemma => ErrorKind::InvalidInput,
                ConjugationCause::UnsupportedMood | ConjugationCause::UnsupportedTense => {
                    ErrorKind::UnsupportedLanguageOrMood
                }
                ConjugationCause::Engine | ConjugationCause::Mapping => ErrorKind::EngineFailure,
            },
            InflectError::Analyzer { .. } | InflectError::Model { .. } => ErrorKind::EngineFailure,
        }
    }
}

/// Failure raised by an analyzer or conjugation engine implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EngineError(pub String);

impl EngineError {
    pub fn new(msg: impl Into<String>) -> Self {
        EngineError(msg.into())
    }
}
