use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::InflectError;

/// Grammatical case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Case {
    Nom,
    Gen,
    Dat,
    Acc,
    /// Instrumental (the analyzer calls it "ablt").
    Abl,
    /// Prepositional.
    Loc,
}

impl Case {
    pub const ALL: [Case; 6] = [Case::Nom, Case::Gen, Case::Dat, Case::Acc, Case::Abl, Case::Loc];

    /// Analyzer tag for this case (e.g. `nomn`).
    pub fn tag(self) -> &'static str {
        match self {
            Case::Nom => "nomn",
            Case::Gen => "gent",
            Case::Dat => "datv",
            Case::Acc => "accs",
            Case::Abl => "ablt",
            Case::Loc => "loct",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Case::Nom => "Nominative",
            Case::Gen => "Genitive",
            Case::Dat => "Dative",
            Case::Acc => "Accusative",
            Case::Abl => "Instrumental",
            Case::Loc => "Prepositional",
        }
    }
}

/// Grammatical number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Number {
    Sing,
    Plur,
}

impl Number {
    pub const ALL: [Number; 2] = [Number::Sing, Number::Plur];

    pub fn tag(self) -> &'static str {
        match self {
            Number::Sing => "sing",
            Number::Plur => "plur",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Number::Sing => "Singular",
            Number::Plur => "Plural",
        }
    }
}

/// Grammatical gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Gender {
    Masc,
    Fem,
    Neut,
}

impl Gender {
    pub fn tag(self) -> &'static str {
        match self {
            Gender::Masc => "masc",
            Gender::Fem => "femn",
            Gender::Neut => "neut",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Masc => "Masculine",
            Gender::Fem => "Feminine",
            Gender::Neut => "Neuter",
        }
    }
}

/// Grammatical person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Person {
    First,
    Second,
    Third,
}

impl Person {
    pub const ALL: [Person; 3] = [Person::First, Person::Second, Person::Third];

    pub fn tag(self) -> &'static str {
        match self {
            Person::First => "1per",
            Person::Second => "2per",
            Person::Third => "3per",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Person::First => "1st person",
            Person::Second => "2nd person",
            Person::Third => "3rd person",
        }
    }
}

/// Verb tense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tense {
    Past,
    Pres,
    Fut,
}

impl Tense {
    pub fn tag(self) -> &'static str {
        match self {
            Tense::Past => "past",
            Tense::Pres => "pres",
            Tense::Fut => "futr",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tense::Past => "Past",
            Tense::Pres => "Present",
            Tense::Fut => "Future",
        }
    }
}

/// The five closed feature categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Case,
    Number,
    Gender,
    Person,
    Tense,
}

/// A single grammatical feature, tagged by its category.
///
/// Serializes as `{"type": "CASE", "value": "NOM"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "UPPERCASE")]
pub enum Feature {
    Case(Case),
    Number(Number),
    Gender(Gender),
    Person(Person),
    Tense(Tense),
}

impl Feature {
    pub fn category(self) -> Category {
        match self {
            Feature::Case(_) => Category::Case,
            Feature::Number(_) => Category::Number,
            Feature::Gender(_) => Category::Gender,
            Feature::Person(_) => Category::Person,
            Feature::Tense(_) => Category::Tense,
        }
    }

    /// Analyzer tag that defines this feature.
    pub fn tag(self) -> &'static str {
        match self {
            Feature::Case(c) => c.tag(),
            Feature::Number(n) => n.tag(),
            Feature::Gender(g) => g.tag(),
            Feature::Person(p) => p.tag(),
            Feature::Tense(t) => t.tag(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Feature::Case(c) => c.label(),
            Feature::Number(n) => n.label(),
            Feature::Gender(g) => g.label(),
            Feature::Person(p) => p.label(),
            Feature::Tense(t) => t.label(),
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Case> for Feature {
    fn from(v: Case) -> Self {
        Feature::Case(v)
    }
}

impl From<Number> for Feature {
    fn from(v: Number) -> Self {
        Feature::Number(v)
    }
}

impl From<Gender> for Feature {
    fn from(v: Gender) -> Self {
        Feature::Gender(v)
    }
}

impl From<Person> for Feature {
    fn from(v: Person) -> Self {
        Feature::Person(v)
    }
}

impl From<Tense> for Feature {
    fn from(v: Tense) -> Self {
        Feature::Tense(v)
    }
}

/// A set of features holding at most one value per category.
///
/// Inserting a feature whose category is already present replaces the old
/// value. Iteration follows category order (case, number, gender, person,
/// tense).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FeatureSet {
    case: Option<Case>,
    number: Option<Number>,
    gender: Option<Gender>,
    person: Option<Person>,
    tense: Option<Tense>,
}

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, feature: impl Into<Feature>) -> Self {
        self.insert(feature.into());
        self
    }

    /// Insert a feature, returning the value it replaced in the same category.
    pub fn insert(&mut self, feature: Feature) -> Option<Feature> {
        match feature {
            Feature::Case(v) => self.case.replace(v).map(Feature::Case),
            Feature::Number(v) => self.number.replace(v).map(Feature::Number),
            Feature::Gender(v) => self.gender.replace(v).map(Feature::Gender),
            Feature::Person(v) => self.person.replace(v).map(Feature::Person),
            Feature::Tense(v) => self.tense.replace(v).map(Feature::Tense),
        }
    }

    pub fn remove(&mut self, category: Category) -> Option<Feature> {
        match category {
            Category::Case => self.case.take().map(Feature::Case),
            Category::Number => self.number.take().map(Feature::Number),
            Category::Gender => self.gender.take().map(Feature::Gender),
            Category::Person => self.person.take().map(Feature::Person),
            Category::Tense => self.tense.take().map(Feature::Tense),
        }
    }

    pub fn get(&self, category: Category) -> Option<Feature> {
        match category {
            Category::Case => self.case.map(Feature::Case),
            Category::Number => self.number.map(Feature::Number),
            Category::Gender => self.gender.map(Feature::Gender),
            Category::Person => self.person.map(Feature::Person),
            Category::Tense => self.tense.map(Feature::Tense),
        }
    }

    pub fn contains(&self, feature: Feature) -> bool {
        self.get(feature.category()) == Some(feature)
    }

    pub fn case(&self) -> Option<Case> {
        self.case
    }

    pub fn number(&self) -> Option<Number> {
        self.number
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn person(&self) -> Option<Person> {
        self.person
    }

    pub fn iter(&self) -> impl Iterator<Item = Feature> {
        [
            self.case.map(Feature::Case),
            self.number.map(Feature::Number),
            self.gender.map(Feature::Gender),
            self.person.map(Feature::Person),
            self.tense.map(Feature::Tense),
        ]
        .into_iter()
        .flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Analyzer tags for every feature in the set.
    pub fn tags(&self) -> Vec<&'static str> {
        self.iter().map(Feature::tag).collect()
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut set = FeatureSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<Feature> for FeatureSet {
    fn extend<I: IntoIterator<Item = Feature>>(&mut self, iter: I) {
        for feature in iter {
            self.insert(feature);
        }
    }
}

impl Serialize for FeatureSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for feature in self.iter() {
            seq.serialize_element(&feature)?;
        }
        seq.end()
    }
}

/// Universal Dependencies part-of-speech tag.
/// See <https://universaldependencies.org/u/pos/>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 17] = [
        PartOfSpeech::Adj,
        PartOfSpeech::Adp,
        PartOfSpeech::Adv,
        PartOfSpeech::Aux,
        PartOfSpeech::Cconj,
        PartOfSpeech::Det,
        PartOfSpeech::Intj,
        PartOfSpeech::Noun,
        PartOfSpeech::Num,
        PartOfSpeech::Part,
        PartOfSpeech::Pron,
        PartOfSpeech::Propn,
        PartOfSpeech::Punct,
        PartOfSpeech::Sconj,
        PartOfSpeech::Sym,
        PartOfSpeech::Verb,
        PartOfSpeech::X,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Aux => "AUX",
            PartOfSpeech::Cconj => "CCONJ",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Intj => "INTJ",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Propn => "PROPN",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Sconj => "SCONJ",
            PartOfSpeech::Sym => "SYM",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::X => "X",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PartOfSpeech::Adj => "Adjective",
            PartOfSpeech::Adp => "Adposition",
            PartOfSpeech::Adv => "Adverb",
            PartOfSpeech::Aux => "Auxiliary",
            PartOfSpeech::Cconj => "Coordinating Conjunction",
            PartOfSpeech::Det => "Determiner",
            PartOfSpeech::Intj => "Interjection",
            PartOfSpeech::Noun => "Noun",
            PartOfSpeech::Num => "Numeral",
            PartOfSpeech::Part => "Particle",
            PartOfSpeech::Pron => "Pronoun",
            PartOfSpeech::Propn => "Proper Noun",
            PartOfSpeech::Punct => "Punctuation",
            PartOfSpeech::Sconj => "Subordinating Conjunction",
            PartOfSpeech::Sym => "Symbol",
            PartOfSpeech::Verb => "Verb",
            PartOfSpeech::X => "Other",
        }
    }

    /// Nouns, adjectives, verbs and auxiliaries have a paradigm at all.
    pub fn is_declinable(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::Adj | PartOfSpeech::Verb | PartOfSpeech::Aux
        )
    }

    pub fn is_conjugable(self) -> bool {
        matches!(self, PartOfSpeech::Verb | PartOfSpeech::Aux)
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartOfSpeech {
    type Err = InflectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PartOfSpeech::ALL
            .into_iter()
            .find(|pos| pos.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| InflectError::UnsupportedPartOfSpeech(s.to_string()))
    }
}

/// How a language builds its paradigms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanguageFamily {
    /// Case/number lookup against a morphological analyzer.
    Declension,
    /// Rule-based conjugation driven by mood and tense.
    Conjugation,
}

/// Supported languages, identified by ISO 639-1 code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "it")]
    Italian,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "ro")]
    Romanian,
}

impl Language {
    pub const ALL: [Language; 6] = [
        Language::Russian,
        Language::Italian,
        Language::French,
        Language::Spanish,
        Language::Portuguese,
        Language::Romanian,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::Russian => "ru",
            Language::Italian => "it",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::Romanian => "ro",
        }
    }

    pub fn family(self) -> LanguageFamily {
        match self {
            Language::Russian => LanguageFamily::Declension,
            _ => LanguageFamily::Conjugation,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = InflectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| InflectError::UnsupportedLanguage(s.to_string()))
    }
}

/// Dictionary form of a word: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lemma(String);

impl Lemma {
    pub fn new(raw: &str) -> Result<Self, InflectError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(InflectError::EmptyLemma);
        }
        Ok(Lemma(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One concrete paradigm entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inflection {
    pub lemma: String,
    /// Never empty.
    pub inflected: String,
    pub features: FeatureSet,
}

/// All inflections of a lemma for one part of speech.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paradigm {
    pub part_of_speech: PartOfSpeech,
    pub lemma: String,
    pub inflections: Vec<Inflection>,
}
