// Paradigm generation for declining languages.

use crate::analyzer::{Candidate, MorphAnalyzer};
use crate::error::InflectError;
use crate::features::{enumerate_for, map_to_standard};
use crate::resolver::{resolve, Analysis};
use crate::types::{FeatureSet, Inflection, Lemma, LanguageFamily, Paradigm, PartOfSpeech};

/// Produce the form of an analyzed word carrying `features`.
///
/// When the analyzer has no such form the surface word itself is used, so the
/// result is never empty. The returned features are the standardized view of
/// the requested tags.
pub fn generate<A: MorphAnalyzer>(
    analyzer: &A,
    analysis: &Analysis<A::Candidate>,
    features: &FeatureSet,
) -> Inflection {
    let tags = features.tags();
    let inflected = match analyzer.inflect(&analysis.candidate, &tags) {
        Some(form) if !form.is_empty() => form,
        _ => {
            let fallback = match analysis.candidate.word() {
                "" => analysis.normal_form(),
                word => word,
            };
            tracing::warn!(
                word = fallback,
                tags = %tags.join(","),
                "no inflected form, falling back to the surface word"
            );
            fallback.to_string()
        }
    };
    Inflection {
        lemma: analysis.normal_form().to_string(),
        inflected,
        features: map_to_standard(tags.iter().copied()).into_iter().collect(),
    }
}

/// Decline `lemma` through every feature combination of `pos`.
pub fn decline<A: MorphAnalyzer>(
    analyzer: &A,
    lemma: &str,
    pos: PartOfSpeech,
    threshold: f64,
) -> Result<Paradigm, InflectError> {
    let lemma = Lemma::new(lemma)?;
    let feature_sets = enumerate_for(LanguageFamily::Declension, pos)?;
    let analysis = resolve(analyzer, lemma.as_str(), pos, threshold)?;

    let inflections: Vec<Inflection> = feature_sets
        .iter()
        .map(|features| generate(analyzer, &analysis, features))
        .collect();
    tracing::debug!(lemma = %lemma, count = inflections.len(), "declined");

    Ok(Paradigm {
        part_of_speech: pos,
        lemma: lemma.to_string(),
        inflections,
    })
}
