// Folds gender-split conjugation results into one entry per person/number.
//
// Engines for languages with gendered third-person pronouns return one result
// per pronoun ("il est", "elle est"). A paradigm has one entry per person and
// number, so those are merged into "il/elle est".

use crate::types::{Category, FeatureSet, Inflection, Number, Person};

/// Strategy for collapsing raw conjugation inflections into a paradigm.
pub trait MergePolicy {
    fn consolidate(&self, raw: Vec<Inflection>) -> Vec<Inflection>;
}

/// Groups by (person, number) in order of first appearance and joins the
/// pronouns of forms sharing a verb phrase with `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PronounMerge;

impl MergePolicy for PronounMerge {
    fn consolidate(&self, raw: Vec<Inflection>) -> Vec<Inflection> {
        let mut groups: Vec<(Inflection, Vec<Inflection>)> = Vec::new();
        for inflection in raw {
            let key = slot(&inflection);
            match groups.iter_mut().find(|(first, _)| slot(first) == key) {
                Some((_, rest)) => rest.push(inflection),
                None => groups.push((inflection, Vec::new())),
            }
        }

        groups
            .into_iter()
            .map(|(first, rest)| merge_group(first, rest))
            .collect()
    }
}

/// Consolidate with the default [`PronounMerge`] policy.
pub fn consolidate(raw: Vec<Inflection>) -> Vec<Inflection> {
    PronounMerge.consolidate(raw)
}

fn slot(inflection: &Inflection) -> (Option<Person>, Option<Number>) {
    (inflection.features.person(), inflection.features.number())
}

fn merge_group(mut first: Inflection, rest: Vec<Inflection>) -> Inflection {
    let (person, number) = slot(&first);
    first.features.remove(Category::Gender);
    if rest.is_empty() {
        return first;
    }

    let mut forms = vec![first.inflected.clone()];
    for member in &rest {
        merge_form(&mut forms, &member.inflected);
    }
    if forms.len() > 1 {
        tracing::debug!(
            kept = %forms[0],
            dropped = %forms[1..].join(", "),
            "discarding alternative forms for one person/number"
        );
    }

    let mut features = FeatureSet::new();
    if let Some(person) = person {
        features.insert(person.into());
    }
    if let Some(number) = number {
        features.insert(number.into());
    }

    Inflection {
        lemma: first.lemma,
        inflected: forms.swap_remove(0),
        features,
    }
}

/// Fold `surface` into the distinct forms seen so far. A form whose verb
/// phrase matches an earlier one only contributes its pronoun.
fn merge_form(forms: &mut Vec<String>, surface: &str) {
    let Some((pronoun, verb)) = split_pronoun(surface) else {
        if !forms.iter().any(|f| f == surface) {
            forms.push(surface.to_string());
        }
        return;
    };

    for form in forms.iter_mut() {
        if let Some((pronouns, existing)) = split_pronoun(form) {
            if existing == verb {
                if !pronouns.split('/').any(|p| p == pronoun) {
                    *form = format!("{pronouns}/{pronoun} {verb}");
                }
                return;
            }
        }
    }
    forms.push(surface.to_string());
}

/// Split "pronoun verb-phrase" on the first space.
fn split_pronoun(surface: &str) -> Option<(&str, &str)> {
    surface
        .split_once(' ')
        .filter(|(pronoun, verb)| !pronoun.is_empty() && !verb.is_empty())
}
