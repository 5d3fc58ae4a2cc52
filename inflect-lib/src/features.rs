// Feature enumeration per part of speech, and analyzer tag <-> feature mapping.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use crate::error::InflectError;
use crate::types::*;

// Every analyzer tag with a standardized equivalent.
const TAG_TABLE: [(&str, Feature); 17] = [
    ("nomn", Feature::Case(Case::Nom)),
    ("gent", Feature::Case(Case::Gen)),
    ("datv", Feature::Case(Case::Dat)),
    ("accs", Feature::Case(Case::Acc)),
    ("ablt", Feature::Case(Case::Abl)),
    ("loct", Feature::Case(Case::Loc)),
    ("sing", Feature::Number(Number::Sing)),
    ("plur", Feature::Number(Number::Plur)),
    ("masc", Feature::Gender(Gender::Masc)),
    ("femn", Feature::Gender(Gender::Fem)),
    ("neut", Feature::Gender(Gender::Neut)),
    ("1per", Feature::Person(Person::First)),
    ("2per", Feature::Person(Person::Second)),
    ("3per", Feature::Person(Person::Third)),
    ("past", Feature::Tense(Tense::Past)),
    ("pres", Feature::Tense(Tense::Pres)),
    ("futr", Feature::Tense(Tense::Fut)),
];

fn tag_index() -> &'static HashMap<&'static str, Feature> {
    static INDEX: OnceLock<HashMap<&'static str, Feature>> = OnceLock::new();
    INDEX.get_or_init(|| TAG_TABLE.iter().copied().collect())
}

/// All feature combinations a part of speech inflects for.
///
/// Nouns and adjectives get number × case (12 sets), verbs and auxiliaries
/// get person × number (6 sets). Anything else is rejected.
pub fn enumerate(pos: PartOfSpeech) -> Result<Vec<FeatureSet>, InflectError> {
    match pos {
        PartOfSpeech::Noun | PartOfSpeech::Adj => Ok(Number::ALL
            .iter()
            .flat_map(|&number| {
                Case::ALL
                    .iter()
                    .map(move |&case| FeatureSet::new().with(number).with(case))
            })
            .collect()),
        PartOfSpeech::Verb | PartOfSpeech::Aux => Ok(Person::ALL
            .iter()
            .flat_map(|&person| {
                Number::ALL
                    .iter()
                    .map(move |&number| FeatureSet::new().with(person).with(number))
            })
            .collect()),
        other => Err(InflectError::UnsupportedPartOfSpeech(other.to_string())),
    }
}

/// Like [`enumerate`], restricted to what a language family can produce:
/// conjugating languages only accept verbs and auxiliaries.
pub fn enumerate_for(
    family: LanguageFamily,
    pos: PartOfSpeech,
) -> Result<Vec<FeatureSet>, InflectError> {
    if family == LanguageFamily::Conjugation && !pos.is_conjugable() {
        return Err(InflectError::UnsupportedPartOfSpeech(pos.to_string()));
    }
    enumerate(pos)
}

/// Look up the feature an analyzer tag stands for.
pub fn feature_for_tag(tag: &str) -> Option<Feature> {
    tag_index().get(tag).copied()
}

/// Map analyzer tags to standardized features. Unknown tags are dropped;
/// every known tag is kept, even several of one category.
pub fn map_to_standard<'a, I>(tags: I) -> BTreeSet<Feature>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter().filter_map(feature_for_tag).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_nominal_enumeration_covers_case_and_number() {
        for pos in [PartOfSpeech::Noun, PartOfSpeech::Adj] {
            let sets = enumerate(pos).unwrap();
            assert_eq!(sets.len(), 12);
            assert!(sets.iter().all(|s| s.len() == 2));
            let cases: HashSet<_> = sets.iter().filter_map(|s| s.case()).collect();
            let numbers: HashSet<_> = sets.iter().filter_map(|s| s.number()).collect();
            assert_eq!(cases.len(), 6);
            assert_eq!(numbers.len(), 2);
            let distinct: HashSet<_> = sets.iter().collect();
            assert_eq!(distinct.len(), 12, "no duplicate combinations");
        }
    }

    #[test]
    fn test_verbal_enumeration_covers_person_and_number() {
        for pos in [PartOfSpeech::Verb, PartOfSpeech::Aux] {
            let sets = enumerate(pos).unwrap();
            assert_eq!(sets.len(), 6);
            assert!(sets.iter().all(|s| s.len() == 2));
            let persons: HashSet<_> = sets.iter().filter_map(|s| s.person()).collect();
            let numbers: HashSet<_> = sets.iter().filter_map(|s| s.number()).collect();
            assert_eq!(persons.len(), 3);
            assert_eq!(numbers.len(), 2);
        }
    }

    #[test]
    fn test_other_parts_of_speech_rejected() {
        for pos in PartOfSpeech::ALL.into_iter().filter(|p| !p.is_declinable()) {
            match enumerate(pos) {
                Err(InflectError::UnsupportedPartOfSpeech(name)) => assert_eq!(name, pos.as_str()),
                other => panic!("expected rejection for {pos}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_conjugation_family_rejects_nominals() {
        assert!(enumerate_for(LanguageFamily::Conjugation, PartOfSpeech::Noun).is_err());
        assert_eq!(
            enumerate_for(LanguageFamily::Conjugation, PartOfSpeech::Aux).unwrap().len(),
            6
        );
        assert_eq!(
            enumerate_for(LanguageFamily::Declension, PartOfSpeech::Noun).unwrap().len(),
            12
        );
    }

    #[test]
    fn test_every_tag_round_trips() {
        for (tag, feature) in TAG_TABLE {
            assert_eq!(feature.tag(), tag);
            assert_eq!(map_to_standard([tag]), BTreeSet::from([feature]));
        }
    }

    #[test]
    fn test_unknown_tags_dropped() {
        assert!(map_to_standard(["bogus"]).is_empty());
        let mapped = map_to_standard(["NOUN", "inan", "sing", "gent"]);
        assert_eq!(
            mapped,
            BTreeSet::from([Feature::Number(Number::Sing), Feature::Case(Case::Gen)])
        );
    }

    #[test]
    fn test_same_category_tags_all_kept() {
        let mapped = map_to_standard(["sing", "plur"]);
        assert_eq!(mapped.len(), 2);
        assert!(mapped.contains(&Feature::Number(Number::Sing)));
        assert!(mapped.contains(&Feature::Number(Number::Plur)));

        let mapped = map_to_standard(["nomn", "accs", "masc", "femn", "bogus"]);
        assert_eq!(mapped.len(), 4);
    }

    #[test]
    fn test_mapping_is_idempotent() {
        let tags = ["3per", "plur", "femn", "Qual"];
        assert_eq!(map_to_standard(tags), map_to_standard(tags));
    }
}
