// Paradigm generation for conjugating languages: run the engine, pick the
// requested mood and tense, map engine codes to standardized features and
// consolidate gendered results.

use crate::conjugator::{ConjugationEngine, RawConjugation};
use crate::consolidate::MergePolicy;
use crate::error::{ConjugationCause, InflectError};
use crate::features::enumerate_for;
use crate::types::{
    FeatureSet, Gender, Inflection, Language, LanguageFamily, Number, Paradigm, PartOfSpeech,
    Person,
};

/// Raw engine results for one mood and tense of `lemma`.
///
/// `mood` and `tense` are English keys ("indicative", "present"); the engine
/// localizes them before lookup.
pub fn conjugate<E: ConjugationEngine + ?Sized>(
    engine: &E,
    lemma: &str,
    mood: &str,
    tense: &str,
) -> Result<Vec<RawConjugation>, InflectError> {
    let language = engine.language();
    let fail = |reason: String, cause: ConjugationCause| InflectError::Conjugation {
        lemma: lemma.to_string(),
        language,
        reason,
        cause,
    };

    let verb = lemma.trim();
    if verb.is_empty() {
        return Err(fail("lemma cannot be empty".to_string(), ConjugationCause::EmptyLemma));
    }

    let mut moods = engine
        .conjugate(verb)
        .map_err(|e| fail(e.to_string(), ConjugationCause::Engine))?;

    let mood_name = engine.localize_mood(mood);
    let mut tenses = moods.remove(&mood_name).ok_or_else(|| {
        fail(
            format!("mood '{mood}' ({mood_name}) is not available"),
            ConjugationCause::UnsupportedMood,
        )
    })?;

    let tense_name = engine.localize_tense(tense);
    tenses.remove(&tense_name).ok_or_else(|| {
        fail(
            format!("tense '{tense}' ({tense_name}) is not available for mood '{mood}'"),
            ConjugationCause::UnsupportedTense,
        )
    })
}

/// Convert one engine result into an inflection, keeping its preferred form.
pub fn to_inflection(
    raw: &RawConjugation,
    lemma: &str,
    language: Language,
) -> Result<Inflection, InflectError> {
    let fail = |reason: String| InflectError::Conjugation {
        lemma: lemma.to_string(),
        language,
        reason,
        cause: ConjugationCause::Mapping,
    };

    let inflected = raw
        .forms
        .first()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| fail("engine returned no forms".to_string()))?;

    let mut features = FeatureSet::new();
    if let Some(code) = raw.person.as_deref() {
        let person = match code {
            "1" => Person::First,
            "2" => Person::Second,
            "3" => Person::Third,
            other => return Err(fail(format!("unknown person code '{other}'"))),
        };
        features.insert(person.into());
    }
    if let Some(code) = raw.number.as_deref() {
        let number = match code {
            "s" => Number::Sing,
            "p" => Number::Plur,
            other => return Err(fail(format!("unknown number code '{other}'"))),
        };
        features.insert(number.into());
    }
    if let Some(code) = raw.gender.as_deref() {
        let gender = match code {
            "m" => Gender::Masc,
            "f" => Gender::Fem,
            "n" => Gender::Neut,
            other => return Err(fail(format!("unknown gender code '{other}'"))),
        };
        features.insert(gender.into());
    }

    Ok(Inflection {
        lemma: lemma.to_string(),
        inflected: inflected.clone(),
        features,
    })
}

/// Conjugate `lemma` in one mood and tense and consolidate the result with
/// `policy`.
///
/// A consolidated paradigm whose size differs from the person × number grid
/// is returned as is, with a warning.
pub fn conjugate_paradigm<E: ConjugationEngine + ?Sized>(
    engine: &E,
    lemma: &str,
    pos: PartOfSpeech,
    mood: &str,
    tense: &str,
    policy: &dyn MergePolicy,
) -> Result<Paradigm, InflectError> {
    let expected = enumerate_for(LanguageFamily::Conjugation, pos)?.len();
    let raw = conjugate(engine, lemma, mood, tense)?;

    let lemma = lemma.trim();
    let language = engine.language();
    let inflections = raw
        .iter()
        .map(|r| to_inflection(r, lemma, language))
        .collect::<Result<Vec<_>, _>>()?;
    let inflections = policy.consolidate(inflections);

    if inflections.len() != expected {
        tracing::warn!(
            lemma,
            language = %language,
            expected,
            actual = inflections.len(),
            "consolidated paradigm does not match the person/number grid"
        );
    }
    tracing::debug!(lemma, mood, tense, count = inflections.len(), "conjugated");

    Ok(Paradigm {
        part_of_speech: pos,
        lemma: lemma.to_string(),
        inflections,
    })
}
