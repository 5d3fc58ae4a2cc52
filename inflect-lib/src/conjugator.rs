// Conjugation engine interface and the template-driven engine for Romance
// languages.
//
// A template is named `stem:ending`; a verb's stem is its infinitive with the
// template ending removed, and every tense lists the endings appended to it.
// Personal forms are prefixed with the subject pronouns of the language, so a
// gendered third person yields one raw result per pronoun.

use std::collections::{BTreeMap, HashMap};

use crate::error::EngineError;
use crate::model::{ConjugationData, NameEntry, PronounEntry, TemplateEntry};
use crate::types::Language;

/// Person/number slot order of a six-ending tense.
const SLOTS: [(&str, &str); 6] = [
    ("1", "s"),
    ("2", "s"),
    ("3", "s"),
    ("1", "p"),
    ("2", "p"),
    ("3", "p"),
];

const MISSING_FORM: &str = "-";
const ALTERNATIVE_SEP: char = '|';

/// One engine result for a person/number/gender slot, in engine-native codes.
#[derive(Debug, Clone, PartialEq)]
pub struct RawConjugation {
    /// Alternative surface forms, preferred first. Never empty.
    pub forms: Vec<String>,
    /// "1", "2" or "3"; absent for impersonal forms.
    pub person: Option<String>,
    /// "s" or "p".
    pub number: Option<String>,
    /// "m" or "f".
    pub gender: Option<String>,
}

/// Localized tense name -> raw results.
pub type TenseTable = BTreeMap<String, Vec<RawConjugation>>;
/// Localized mood name -> tenses.
pub type MoodTable = BTreeMap<String, TenseTable>;

/// A complete-conjugation engine for one language.
pub trait ConjugationEngine {
    fn language(&self) -> Language;

    /// Every mood and tense the engine knows for `lemma`.
    fn conjugate(&self, lemma: &str) -> Result<MoodTable, EngineError>;

    /// Localized name of an English mood key ("indicative" -> "indicativo").
    /// Unknown keys come back unchanged.
    fn localize_mood(&self, mood: &str) -> String;

    /// Localized name of an English tense key.
    fn localize_tense(&self, tense: &str) -> String;
}

/// Engine over the compiled-in conjugation templates.
pub struct TemplateConjugator {
    data: ConjugationData,
    /// Lowercased infinitive -> template index.
    verbs: HashMap<String, usize>,
}

impl TemplateConjugator {
    pub fn new(data: ConjugationData) -> Self {
        let templates: HashMap<String, usize> = data
            .templates
            .iter()
            .enumerate()
            .map(|(i, t)| (t.name.clone(), i))
            .collect();

        let mut verbs = HashMap::new();
        for verb in &data.verbs {
            match templates.get(&verb.template) {
                Some(&ti) => {
                    verbs.insert(verb.infinitive.to_lowercase(), ti);
                }
                None => tracing::warn!(
                    verb = %verb.infinitive,
                    template = %verb.template,
                    "verb refers to an unknown template, skipping"
                ),
            }
        }

        Self { data, verbs }
    }

    pub fn verb_count(&self) -> usize {
        self.verbs.len()
    }

    /// Find the template for `lemma`: the verb list first, then the predictable
    /// template with the longest matching ending.
    fn template_for(&self, lemma: &str) -> Result<&TemplateEntry, EngineError> {
        if let Some(&ti) = self.verbs.get(lemma) {
            return Ok(&self.data.templates[ti]);
        }

        let mut best: Option<(usize, &TemplateEntry)> = None;
        for template in self.data.templates.iter().filter(|t| t.predict) {
            let ending = template_ending(&template.name);
            if ending.is_empty() || lemma.len() <= ending.len() || !lemma.ends_with(ending) {
                continue;
            }
            if best.map_or(true, |(len, _)| ending.len() > len) {
                best = Some((ending.len(), template));
            }
        }

        best.map(|(_, t)| t).ok_or_else(|| {
            EngineError::new(format!(
                "'{lemma}' is not a known verb and matches no conjugation template"
            ))
        })
    }

    fn pronouns_for(&self, person: &str, number: &str) -> Vec<&PronounEntry> {
        self.data
            .pronouns
            .iter()
            .filter(|p| p.person == person && p.number == number)
            .collect()
    }

    fn expand_tense(
        &self,
        stem: &str,
        tense: &str,
        endings: &[String],
    ) -> Result<Vec<RawConjugation>, EngineError> {
        match endings.len() {
            1 => Ok(verb_forms(stem, &endings[0])
                .map(|forms| RawConjugation {
                    forms,
                    person: None,
                    number: None,
                    gender: None,
                })
                .into_iter()
                .collect()),
            6 => {
                let mut out = Vec::new();
                for (&(person, number), ending) in SLOTS.iter().zip(endings) {
                    let Some(forms) = verb_forms(stem, ending) else {
                        continue;
                    };
                    let pronouns = self.pronouns_for(person, number);
                    if pronouns.is_empty() {
                        out.push(RawConjugation {
                            forms,
                            person: Some(person.to_string()),
                            number: Some(number.to_string()),
                            gender: None,
                        });
                        continue;
                    }
                    for pronoun in pronouns {
                        out.push(RawConjugation {
                            forms: forms.iter().map(|f| with_pronoun(pronoun, f)).collect(),
                            person: Some(person.to_string()),
                            number: Some(number.to_string()),
                            gender: pronoun.gender.clone(),
                        });
                    }
                }
                Ok(out)
            }
            n => Err(EngineError::new(format!(
                "tense '{tense}' lists {n} endings; expected 1 or 6"
            ))),
        }
    }
}

impl ConjugationEngine for TemplateConjugator {
    fn language(&self) -> Language {
        self.data.language
    }

    fn conjugate(&self, lemma: &str) -> Result<MoodTable, EngineError> {
        let lemma = lemma.trim().to_lowercase();
        if lemma.is_empty() {
            return Err(EngineError::new("empty verb"));
        }

        let template = self.template_for(&lemma)?;
        let ending = template_ending(&template.name);
        let stem = lemma.strip_suffix(ending).ok_or_else(|| {
            EngineError::new(format!(
                "'{lemma}' does not end in '{ending}' as template '{}' requires",
                template.name
            ))
        })?;

        let mut moods = MoodTable::new();
        for mood in &template.moods {
            let mut tenses = TenseTable::new();
            for tense in &mood.tenses {
                let results = self.expand_tense(stem, &tense.name, &tense.endings)?;
                tenses.insert(tense.name.clone(), results);
            }
            moods.insert(mood.name.clone(), tenses);
        }
        tracing::debug!(lemma = %lemma, template = %template.name, moods = moods.len(), "conjugated");
        Ok(moods)
    }

    fn localize_mood(&self, mood: &str) -> String {
        localize(&self.data.moods, mood)
    }

    fn localize_tense(&self, tense: &str) -> String {
        localize(&self.data.tenses, tense)
    }
}

fn localize(names: &[NameEntry], key: &str) -> String {
    names
        .iter()
        .find(|n| n.key.eq_ignore_ascii_case(key))
        .map(|n| n.name.clone())
        .unwrap_or_else(|| key.to_string())
}

/// The part of a template name after the colon (`parl:are` -> `are`).
fn template_ending(name: &str) -> &str {
    name.split_once(':').map_or("", |(_, ending)| ending)
}

/// Stem + each alternative ending; `None` when the slot has no form.
fn verb_forms(stem: &str, ending: &str) -> Option<Vec<String>> {
    if ending == MISSING_FORM {
        return None;
    }
    Some(
        ending
            .split(ALTERNATIVE_SEP)
            .map(|e| format!("{stem}{e}"))
            .collect(),
    )
}

fn with_pronoun(pronoun: &PronounEntry, verb: &str) -> String {
    match &pronoun.elided {
        Some(elided) if starts_with_vowel_or_h(verb) => format!("{elided}{verb}"),
        _ => format!("{} {verb}", pronoun.text),
    }
}

fn starts_with_vowel_or_h(word: &str) -> bool {
    word.chars().next().map_or(false, |c| {
        "aeiouhàâäáéèêëíìîïóòôöúùûüœæ".contains(c.to_lowercase().next().unwrap_or(c))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EmbeddedModels, ModelData, ModelProvider};

    fn engine(language: Language) -> TemplateConjugator {
        match EmbeddedModels::new().fetch(language).unwrap() {
            ModelData::Conjugation(data) => TemplateConjugator::new(data),
            ModelData::Morphology(_) => panic!("expected a conjugation model for {language}"),
        }
    }

    fn first_forms(results: &[RawConjugation]) -> Vec<&str> {
        results.iter().map(|r| r.forms[0].as_str()).collect()
    }

    #[test]
    fn test_essere_present() {
        let it = engine(Language::Italian);
        let moods = it.conjugate("essere").unwrap();
        let present = &moods[&it.localize_mood("indicative")][&it.localize_tense("present")];
        assert_eq!(
            first_forms(present),
            vec!["io sono", "tu sei", "lui è", "lei è", "noi siamo", "voi siete", "loro sono"]
        );
        assert_eq!(present[2].gender.as_deref(), Some("m"));
        assert_eq!(present[3].gender.as_deref(), Some("f"));
        assert_eq!(present[0].person.as_deref(), Some("1"));
        assert_eq!(present[0].number.as_deref(), Some("s"));
    }

    #[test]
    fn test_localization() {
        let it = engine(Language::Italian);
        assert_eq!(it.localize_mood("indicative"), "indicativo");
        assert_eq!(it.localize_tense("Imperfect"), "imperfetto");
        assert_eq!(it.localize_mood("optative"), "optative");
    }

    #[test]
    fn test_unknown_verb_predicted_from_ending() {
        let it = engine(Language::Italian);
        let moods = it.conjugate("cantare").unwrap();
        let present = &moods["indicativo"]["presente"];
        assert_eq!(present[0].forms, vec!["io canto".to_string()]);
        assert_eq!(present.last().unwrap().forms, vec!["loro cantano".to_string()]);
    }

    #[test]
    fn test_unmatched_verb_fails() {
        let it = engine(Language::Italian);
        let err = it.conjugate("xyzabc123").unwrap_err();
        assert!(err.to_string().contains("xyzabc123"));
        assert!(it.conjugate("   ").is_err());
    }

    #[test]
    fn test_alternative_forms() {
        let it = engine(Language::Italian);
        let moods = it.conjugate("dovere").unwrap();
        let present = &moods["indicativo"]["presente"];
        assert_eq!(
            present[0].forms,
            vec!["io devo".to_string(), "io debbo".to_string()]
        );
    }

    #[test]
    fn test_impersonal_form_has_no_person() {
        let it = engine(Language::Italian);
        let moods = it.conjugate("parlare").unwrap();
        let infinitive = &moods[&it.localize_mood("infinitive")][&it.localize_tense("present")];
        assert_eq!(infinitive.len(), 1);
        assert_eq!(infinitive[0].forms, vec!["parlare".to_string()]);
        assert_eq!(infinitive[0].person, None);
        assert_eq!(infinitive[0].number, None);
    }

    #[test]
    fn test_french_elision() {
        let fr = engine(Language::French);
        let moods = fr.conjugate("avoir").unwrap();
        let present = &moods["indicatif"]["présent"];
        assert_eq!(present[0].forms[0], "j'ai");
        assert_eq!(present[1].forms[0], "tu as");
        let etre = fr.conjugate("être").unwrap();
        assert_eq!(etre["indicatif"]["présent"][0].forms[0], "je suis");
    }

    #[test]
    fn test_every_language_conjugates_its_verbs() {
        for lang in Language::ALL.into_iter().filter(|l| *l != Language::Russian) {
            let engine = engine(lang);
            assert!(engine.verb_count() > 0, "{lang} has no verbs");
            let mood = engine.localize_mood("indicative");
            let tense = engine.localize_tense("present");
            for verb in &engine.data.verbs {
                let moods = engine.conjugate(&verb.infinitive).unwrap();
                let present = &moods[&mood][&tense];
                assert!(present.len() >= 6, "{lang} {} present too short", verb.infinitive);
            }
        }
    }
}
