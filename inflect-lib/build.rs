// Compiles the language data in data/*.xml into JSON embedded at compile time.
//
// morph-<lang>.xml files hold paradigm tables for declining languages and
// conj-<lang>.xml files hold conjugation templates. Malformed data fails the
// build rather than surfacing as a runtime error.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

const LANGUAGES: &[&str] = &["es", "fr", "it", "pt", "ro", "ru"];

#[derive(Serialize)]
struct EmbeddedData {
    models: Vec<ModelRaw>,
}

#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum ModelRaw {
    Morphology(MorphRaw),
    Conjugation(ConjugationRaw),
}

#[derive(Serialize)]
struct MorphRaw {
    language: String,
    paradigms: Vec<ParadigmRaw>,
}

#[derive(Serialize)]
struct ParadigmRaw {
    lemma: String,
    pos: String,
    weight: f64,
    forms: Vec<FormRaw>,
}

#[derive(Serialize)]
struct FormRaw {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pos: Option<String>,
    grammemes: Vec<String>,
}

#[derive(Serialize)]
struct ConjugationRaw {
    language: String,
    moods: Vec<NameRaw>,
    tenses: Vec<NameRaw>,
    pronouns: Vec<PronounRaw>,
    templates: Vec<TemplateRaw>,
    verbs: Vec<VerbRaw>,
}

#[derive(Serialize)]
struct NameRaw {
    key: String,
    name: String,
}

#[derive(Serialize)]
struct PronounRaw {
    person: String,
    number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    gender: Option<String>,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    elided: Option<String>,
}

#[derive(Serialize)]
struct TemplateRaw {
    name: String,
    predict: bool,
    moods: Vec<MoodRaw>,
}

#[derive(Serialize)]
struct MoodRaw {
    name: String,
    tenses: Vec<TenseRaw>,
}

#[derive(Serialize)]
struct TenseRaw {
    name: String,
    endings: Vec<String>,
}

#[derive(Serialize)]
struct VerbRaw {
    infinitive: String,
    template: String,
}

/// An XML element with its attributes, concatenated text and child elements.
struct Node {
    name: String,
    attrs: HashMap<String, String>,
    text: String,
    children: Vec<Node>,
}

impl Node {
    fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    fn required(&self, key: &str) -> &str {
        self.attr(key)
            .unwrap_or_else(|| panic!("<{}> is missing attribute '{key}'", self.name))
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Children of the first `<wrapper>` element, filtered by name.
    fn nested<'a>(&'a self, wrapper: &'a str, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children_named(wrapper)
            .flat_map(move |w| w.children_named(name))
    }

    fn text(&self) -> &str {
        self.text.trim()
    }
}

fn main() {
    let data_dir = Path::new("../data");
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir).join("models.json");

    let mut xml_files: Vec<_> = fs::read_dir(data_dir)
        .expect("cannot read data/ directory")
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = p.file_name().unwrap().to_str().unwrap();
            (name.starts_with("morph-") || name.starts_with("conj-")) && name.ends_with(".xml")
        })
        .collect();
    xml_files.sort();

    let mut models = Vec::new();
    let mut seen = HashSet::new();
    for path in &xml_files {
        println!("cargo:rerun-if-changed={}", path.display());
        let content = fs::read_to_string(path).expect("cannot read XML file");
        let root = parse_tree(&content);
        let model = match root.name.as_str() {
            "morphology" => ModelRaw::Morphology(morphology(&root)),
            "conjugation" => ModelRaw::Conjugation(conjugation(&root)),
            other => panic!("{}: unexpected root element <{other}>", path.display()),
        };
        let language = match &model {
            ModelRaw::Morphology(m) => m.language.clone(),
            ModelRaw::Conjugation(c) => c.language.clone(),
        };
        if !seen.insert(language.clone()) {
            panic!("{}: duplicate model for '{language}'", path.display());
        }
        models.push(model);
    }

    let data = EmbeddedData { models };
    let json = serde_json::to_string(&data).expect("JSON serialization failed");
    fs::write(&out_path, json).expect("cannot write models.json");

    println!("cargo:rerun-if-changed=../data");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse a document into its root element.
fn parse_tree(xml: &str) -> Node {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![Node {
        name: String::new(),
        attrs: HashMap::new(),
        text: String::new(),
        children: Vec::new(),
    }];

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => stack.push(element(e)),
            Ok(Event::Empty(ref e)) => {
                let node = element(e);
                stack.last_mut().unwrap().children.push(node);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().expect("invalid escape in text");
                stack.last_mut().unwrap().text.push_str(&text);
            }
            Ok(Event::End(_)) => {
                let node = stack.pop().unwrap();
                stack
                    .last_mut()
                    .expect("unbalanced XML")
                    .children
                    .push(node);
            }
            Ok(Event::Eof) => break,
            Err(e) => panic!("XML parse error at {}: {e}", reader.buffer_position()),
            _ => {}
        }
    }

    assert_eq!(stack.len(), 1, "unclosed element at end of document");
    stack
        .pop()
        .unwrap()
        .children
        .pop()
        .expect("document has no root element")
}

fn element(e: &BytesStart) -> Node {
    let attrs = e
        .attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).to_string();
            let value = a.unescape_value().expect("invalid attribute value").to_string();
            (key, value)
        })
        .collect();
    Node {
        name: String::from_utf8_lossy(e.name().as_ref()).to_string(),
        attrs,
        text: String::new(),
        children: Vec::new(),
    }
}

fn language_of(root: &Node) -> String {
    let lang = root.required("lang");
    if !LANGUAGES.contains(&lang) {
        panic!("unsupported language code '{lang}'");
    }
    lang.to_string()
}

fn morphology(root: &Node) -> MorphRaw {
    let language = language_of(root);
    let paradigms = root
        .children_named("paradigm")
        .map(|p| {
            let lemma = p.required("lemma").to_string();
            let weight: f64 = p
                .attr("weight")
                .unwrap_or("1")
                .parse()
                .unwrap_or_else(|_| panic!("paradigm '{lemma}' has a non-numeric weight"));
            if weight <= 0.0 {
                panic!("paradigm '{lemma}' must have a positive weight");
            }
            let forms: Vec<FormRaw> = p
                .children_named("form")
                .map(|f| {
                    if f.text().is_empty() {
                        panic!("paradigm '{lemma}' has an empty form");
                    }
                    FormRaw {
                        text: f.text().to_string(),
                        pos: f.attr("pos").map(str::to_string),
                        grammemes: f
                            .attr("grammemes")
                            .unwrap_or_default()
                            .split_whitespace()
                            .map(str::to_string)
                            .collect(),
                    }
                })
                .collect();
            if forms.is_empty() {
                panic!("paradigm '{lemma}' has no forms");
            }
            ParadigmRaw {
                pos: p.required("pos").to_string(),
                lemma,
                weight,
                forms,
            }
        })
        .collect();
    MorphRaw { language, paradigms }
}

fn conjugation(root: &Node) -> ConjugationRaw {
    let language = language_of(root);
    let names = |wrapper: &str, name: &str| -> Vec<NameRaw> {
        root.nested(wrapper, name)
            .map(|n| NameRaw {
                key: n.required("key").to_string(),
                name: n.required("name").to_string(),
            })
            .collect()
    };
    let moods = names("moods", "mood");
    let tenses = names("tenses", "tense");

    let pronouns = root
        .nested("pronouns", "pronoun")
        .map(|p| PronounRaw {
            person: p.required("person").to_string(),
            number: p.required("number").to_string(),
            gender: p.attr("gender").map(str::to_string),
            text: p.text().to_string(),
            elided: p.attr("elided").map(str::to_string),
        })
        .collect();

    let templates: Vec<TemplateRaw> = root
        .nested("templates", "template")
        .map(|t| {
            let name = t.required("name").to_string();
            if !name.contains(':') {
                panic!("template '{name}' is not of the form stem:ending");
            }
            let moods = t
                .children_named("mood")
                .map(|m| MoodRaw {
                    name: m.required("name").to_string(),
                    tenses: m
                        .children_named("tense")
                        .map(|tense| {
                            let tense_name = tense.required("name").to_string();
                            let endings = parse_endings(tense.text())
                                .unwrap_or_else(|e| panic!("template '{name}', {tense_name}: {e}"));
                            TenseRaw {
                                name: tense_name,
                                endings,
                            }
                        })
                        .collect(),
                })
                .collect();
            TemplateRaw {
                predict: t.attr("predict") == Some("true"),
                name,
                moods,
            }
        })
        .collect();

    let known: HashSet<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    let verbs = root
        .nested("verbs", "verb")
        .map(|v| {
            let template = v.required("template").to_string();
            if !known.contains(template.as_str()) {
                panic!("verb '{}' uses unknown template '{template}'", v.required("infinitive"));
            }
            VerbRaw {
                infinitive: v.required("infinitive").to_string(),
                template,
            }
        })
        .collect();

    ConjugationRaw {
        language,
        moods,
        tenses,
        pronouns,
        templates,
        verbs,
    }
}

/// Split a tense body into its endings: six personal endings or a single
/// impersonal one.
fn parse_endings(text: &str) -> Result<Vec<String>, String> {
    let endings: Vec<String> = text.split_whitespace().map(str::to_string).collect();
    match endings.len() {
        1 | 6 => Ok(endings),
        n => Err(format!("expected 1 or 6 endings, found {n}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endings() {
        assert_eq!(parse_endings(" o i a iamo ate ano ").unwrap().len(), 6);
        assert_eq!(parse_endings("are").unwrap(), vec!["are".to_string()]);
        assert!(parse_endings("o i a").is_err());
        assert!(parse_endings("").is_err());
    }

    #[test]
    fn test_parse_tree() {
        let root = parse_tree(
            r#"<?xml version="1.0"?>
            <conjugation lang="it">
              <pronouns><pronoun person="1" number="s">io</pronoun></pronouns>
              <verbs><verb infinitive="essere" template=":essere"/></verbs>
            </conjugation>"#,
        );
        assert_eq!(root.name, "conjugation");
        assert_eq!(root.attr("lang"), Some("it"));
        let pronoun = root.nested("pronouns", "pronoun").next().unwrap();
        assert_eq!(pronoun.text(), "io");
        assert_eq!(root.nested("verbs", "verb").count(), 1);
    }
}
