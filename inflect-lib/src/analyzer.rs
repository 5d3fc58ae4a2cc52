// Morphological analyzer interface and the paradigm-table analyzer built on
// the compiled-in dictionaries.

use std::collections::{HashMap, HashSet};

use crate::error::EngineError;
use crate::model::{FormEntry, MorphData};
use crate::types::Language;

/// One reading of a word as reported by an analyzer.
pub trait Candidate {
    /// Surface form the analyzer matched.
    fn word(&self) -> &str;
    /// Dictionary form of the reading.
    fn normal_form(&self) -> &str;
    /// Analyzer-native part-of-speech tag (e.g. `NOUN`, `INFN`, `ADJF`).
    fn pos_tag(&self) -> &str;
    /// Confidence in [0, 1].
    fn score(&self) -> f64;
}

/// A morphological analyzer for a declining language.
///
/// Implementations must not mutate shared state in `analyze` or `inflect`;
/// one instance serves every request for its language.
pub trait MorphAnalyzer {
    type Candidate: Candidate;

    fn language(&self) -> Language;

    /// All readings of `word`, in the analyzer's own order.
    fn analyze(&self, word: &str) -> Result<Vec<Self::Candidate>, EngineError>;

    /// Surface form of `candidate` carrying `tags`, if the paradigm has one.
    fn inflect(&self, candidate: &Self::Candidate, tags: &[&str]) -> Option<String>;
}

/// Analyzer over explicit paradigm tables.
pub struct MorphDictionary {
    data: MorphData,
    /// Lowercased surface form -> (paradigm index, form index).
    index: HashMap<String, Vec<(usize, usize)>>,
}

/// A reading produced by [`MorphDictionary`].
#[derive(Debug, Clone, PartialEq)]
pub struct DictParse {
    word: String,
    normal_form: String,
    pos_tag: String,
    grammemes: Vec<String>,
    score: f64,
    paradigm: usize,
}

impl Candidate for DictParse {
    fn word(&self) -> &str {
        &self.word
    }

    fn normal_form(&self) -> &str {
        &self.normal_form
    }

    fn pos_tag(&self) -> &str {
        &self.pos_tag
    }

    fn score(&self) -> f64 {
        self.score
    }
}

impl MorphDictionary {
    pub fn new(data: MorphData) -> Self {
        let mut index: HashMap<String, Vec<(usize, usize)>> = HashMap::new();
        for (pi, paradigm) in data.paradigms.iter().enumerate() {
            for (fi, form) in paradigm.forms.iter().enumerate() {
                index
                    .entry(form.text.to_lowercase())
                    .or_default()
                    .push((pi, fi));
            }
        }
        Self { data, index }
    }

    /// Check whether any paradigm contains this surface form.
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(&word.trim().to_lowercase())
    }
}

impl MorphAnalyzer for MorphDictionary {
    type Candidate = DictParse;

    fn language(&self) -> Language {
        self.data.language
    }

    /// One candidate per matching form, in dictionary order. A candidate's
    /// score is its paradigm's weight over the total weight of all distinct
    /// paradigms containing the word, so homonymous forms of one paradigm
    /// share the same score.
    fn analyze(&self, word: &str) -> Result<Vec<DictParse>, EngineError> {
        let key = word.trim().to_lowercase();
        let hits = match self.index.get(&key) {
            Some(hits) => hits,
            None => return Ok(vec![]),
        };

        let mut seen = HashSet::new();
        let total: f64 = hits
            .iter()
            .filter(|(pi, _)| seen.insert(*pi))
            .map(|&(pi, _)| self.data.paradigms[pi].weight)
            .sum();
        if total <= 0.0 {
            return Err(EngineError::new(format!(
                "paradigms for '{key}' have no positive weight"
            )));
        }

        Ok(hits
            .iter()
            .map(|&(pi, fi)| {
                let paradigm = &self.data.paradigms[pi];
                let form = &paradigm.forms[fi];
                DictParse {
                    word: form.text.clone(),
                    normal_form: paradigm.lemma.clone(),
                    pos_tag: form.pos.clone().unwrap_or_else(|| paradigm.pos.clone()),
                    grammemes: form.grammemes.clone(),
                    score: paradigm.weight / total,
                    paradigm: pi,
                }
            })
            .collect())
    }

    /// Pick the form carrying every requested tag. Among several, prefer the
    /// one sharing the most grammemes with the candidate (an adjective keeps
    /// its gender); ties go to the first in the table.
    fn inflect(&self, candidate: &DictParse, tags: &[&str]) -> Option<String> {
        let paradigm = self.data.paradigms.get(candidate.paradigm)?;
        let mut best: Option<(usize, &FormEntry)> = None;
        for form in &paradigm.forms {
            let has_all = tags
                .iter()
                .all(|t| form.grammemes.iter().any(|g| g == t));
            if !has_all {
                continue;
            }
            let shared = form
                .grammemes
                .iter()
                .filter(|g| candidate.grammemes.contains(g))
                .count();
            if best.map_or(true, |(s, _)| shared > s) {
                best = Some((shared, form));
            }
        }
        best.map(|(_, form)| form.text.clone())
    }
}
