// Picks the analyzer reading a declension is built from and checks it
// against the caller's declared part of speech and confidence threshold.

use crate::analyzer::{Candidate, MorphAnalyzer};
use crate::error::InflectError;
use crate::types::PartOfSpeech;

// Analyzer POS tags with a standardized equivalent. Participles, gerunds and
// infinitives are verb forms.
const POS_MAP: [(&str, PartOfSpeech); 8] = [
    ("NOUN", PartOfSpeech::Noun),
    ("ADJF", PartOfSpeech::Adj),
    ("ADJS", PartOfSpeech::Adj),
    ("VERB", PartOfSpeech::Verb),
    ("INFN", PartOfSpeech::Verb),
    ("GRND", PartOfSpeech::Verb),
    ("PRTF", PartOfSpeech::Verb),
    ("PRTS", PartOfSpeech::Verb),
];

/// Standardized part of speech for an analyzer tag, if it has one.
pub fn map_pos_tag(tag: &str) -> Option<PartOfSpeech> {
    POS_MAP
        .iter()
        .find(|(t, _)| *t == tag)
        .map(|&(_, pos)| pos)
}

/// A reading that passed confidence and part-of-speech validation.
#[derive(Debug, Clone)]
pub struct Analysis<C> {
    pub candidate: C,
    pub part_of_speech: PartOfSpeech,
}

impl<C: Candidate> Analysis<C> {
    pub fn normal_form(&self) -> &str {
        self.candidate.normal_form()
    }

    pub fn score(&self) -> f64 {
        self.candidate.score()
    }
}

/// The highest-scoring candidate; the first one seen wins ties.
fn best_candidate<C: Candidate>(candidates: Vec<C>) -> Option<C> {
    let mut best: Option<C> = None;
    for candidate in candidates {
        if best.as_ref().map_or(true, |b| candidate.score() > b.score()) {
            best = Some(candidate);
        }
    }
    best
}

/// Analyze `word` and validate its best reading.
///
/// Fails with `LowConfidence` when the best score is below `threshold` and
/// with `PosMismatch` when the reading's part of speech is not `expected`.
/// A word the analyzer has no reading for is an analyzer failure.
pub fn resolve<A: MorphAnalyzer>(
    analyzer: &A,
    word: &str,
    expected: PartOfSpeech,
    threshold: f64,
) -> Result<Analysis<A::Candidate>, InflectError> {
    let word = word.trim();
    if word.is_empty() {
        return Err(InflectError::EmptyLemma);
    }

    let language = analyzer.language();
    let candidates = analyzer.analyze(word).map_err(|e| InflectError::Analyzer {
        word: word.to_string(),
        language,
        reason: e.to_string(),
    })?;
    let best = best_candidate(candidates).ok_or_else(|| InflectError::Analyzer {
        word: word.to_string(),
        language,
        reason: "no analyses returned".to_string(),
    })?;

    if best.score() < threshold {
        return Err(InflectError::LowConfidence {
            word: word.to_string(),
            score: best.score(),
            threshold,
            detected: best.pos_tag().to_string(),
        });
    }

    if map_pos_tag(best.pos_tag()) != Some(expected) {
        return Err(InflectError::PosMismatch {
            word: word.to_string(),
            expected,
            detected: best.pos_tag().to_string(),
        });
    }

    tracing::info!(
        word,
        normal_form = best.normal_form(),
        pos = best.pos_tag(),
        score = best.score(),
        "resolved analysis"
    );
    Ok(Analysis {
        candidate: best,
        part_of_speech: expected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EngineError, ErrorKind};
    use crate::types::Language;

    #[derive(Debug, Clone)]
    struct Parse {
        word: &'static str,
        normal_form: &'static str,
        pos: &'static str,
        score: f64,
    }

    impl Candidate for Parse {
        fn word(&self) -> &str {
            self.word
        }
        fn normal_form(&self) -> &str {
            self.normal_form
        }
        fn pos_tag(&self) -> &str {
            self.pos
        }
        fn score(&self) -> f64 {
            self.score
        }
    }

    struct Fixed(Vec<Parse>);

    impl MorphAnalyzer for Fixed {
        type Candidate = Parse;

        fn language(&self) -> Language {
            Language::Russian
        }

        fn analyze(&self, _word: &str) -> Result<Vec<Parse>, EngineError> {
            Ok(self.0.clone())
        }

        fn inflect(&self, _candidate: &Parse, _tags: &[&str]) -> Option<String> {
            None
        }
    }

    struct Broken;

    impl MorphAnalyzer for Broken {
        type Candidate = Parse;

        fn language(&self) -> Language {
            Language::Russian
        }

        fn analyze(&self, _word: &str) -> Result<Vec<Parse>, EngineError> {
            Err(EngineError::new("dictionary unavailable"))
        }

        fn inflect(&self, _candidate: &Parse, _tags: &[&str]) -> Option<String> {
            None
        }
    }

    fn parse(normal_form: &'static str, pos: &'static str, score: f64) -> Parse {
        Parse {
            word: "стали",
            normal_form,
            pos,
            score,
        }
    }

    fn mixed() -> Fixed {
        Fixed(vec![parse("стать", "VERB", 0.4), parse("сталь", "NOUN", 0.9)])
    }

    #[test]
    fn test_best_candidate_wins() {
        let analysis = resolve(&mixed(), "стали", PartOfSpeech::Noun, 0.5).unwrap();
        assert_eq!(analysis.normal_form(), "сталь");
        assert_eq!(analysis.score(), 0.9);
        assert_eq!(analysis.part_of_speech, PartOfSpeech::Noun);
    }

    #[test]
    fn test_low_confidence_carries_best_score() {
        match resolve(&mixed(), "стали", PartOfSpeech::Noun, 0.95) {
            Err(InflectError::LowConfidence {
                score,
                threshold,
                detected,
                ..
            }) => {
                assert_eq!(score, 0.9);
                assert_eq!(threshold, 0.95);
                assert_eq!(detected, "NOUN");
            }
            other => panic!("expected LowConfidence, got {other:?}"),
        }
    }

    #[test]
    fn test_score_equal_to_threshold_passes() {
        assert!(resolve(&mixed(), "стали", PartOfSpeech::Noun, 0.9).is_ok());
    }

    #[test]
    fn test_pos_mismatch() {
        let err = resolve(&mixed(), "стали", PartOfSpeech::Verb, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PosMismatch);
        assert_eq!(
            err.to_string(),
            "POS mismatch for 'стали': expected VERB, got NOUN"
        );
    }

    #[test]
    fn test_low_confidence_checked_before_pos() {
        let err = resolve(&mixed(), "стали", PartOfSpeech::Verb, 0.95).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LowConfidence);
    }

    #[test]
    fn test_ties_go_to_first_candidate() {
        let analyzer = Fixed(vec![parse("сталь", "NOUN", 0.5), parse("стать", "VERB", 0.5)]);
        let analysis = resolve(&analyzer, "стали", PartOfSpeech::Noun, 0.5).unwrap();
        assert_eq!(analysis.normal_form(), "сталь");
    }

    #[test]
    fn test_candidate_order_does_not_matter_without_ties() {
        let analyzer = Fixed(vec![parse("сталь", "NOUN", 0.9), parse("стать", "VERB", 0.4)]);
        let analysis = resolve(&analyzer, "стали", PartOfSpeech::Noun, 0.5).unwrap();
        assert_eq!(analysis.normal_form(), "сталь");
    }

    #[test]
    fn test_verb_forms_map_to_verb() {
        for tag in ["VERB", "INFN", "GRND", "PRTF", "PRTS"] {
            assert_eq!(map_pos_tag(tag), Some(PartOfSpeech::Verb));
        }
        assert_eq!(map_pos_tag("ADJS"), Some(PartOfSpeech::Adj));
        assert_eq!(map_pos_tag("CONJ"), None);
    }

    #[test]
    fn test_auxiliary_is_never_detected() {
        let analyzer = Fixed(vec![parse("быть", "VERB", 1.0)]);
        let err = resolve(&analyzer, "быть", PartOfSpeech::Aux, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PosMismatch);
    }

    #[test]
    fn test_no_candidates_is_engine_failure() {
        let err = resolve(&Fixed(vec![]), "zzz", PartOfSpeech::Noun, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineFailure);
    }

    #[test]
    fn test_analyzer_error_is_wrapped() {
        let err = resolve(&Broken, "слово", PartOfSpeech::Noun, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EngineFailure);
        assert!(err.to_string().contains("dictionary unavailable"));
    }

    #[test]
    fn test_blank_word_rejected() {
        let err = resolve(&mixed(), "  ", PartOfSpeech::Noun, 0.5).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
