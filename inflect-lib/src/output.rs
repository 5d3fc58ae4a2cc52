// Output formatting for paradigms.

use crate::types::Paradigm;

/// Serialize a paradigm to its JSON wire shape.
pub fn to_json(paradigm: &Paradigm, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(paradigm)
    } else {
        serde_json::to_string(paradigm)
    }
}

/// Render a paradigm as a plain-text table: a heading line, then one row per
/// inflection with its feature labels and surface form.
///
/// ```text
/// essere (Verb)
///   1st person Singular   io sono
///   2nd person Singular   tu sei
/// ```
pub fn to_table(paradigm: &Paradigm) -> String {
    let rows: Vec<(String, &str)> = paradigm
        .inflections
        .iter()
        .map(|i| {
            let mut labels: Vec<&str> = i.features.iter().map(|f| f.label()).collect();
            labels.reverse();
            let labels = if labels.is_empty() {
                "-".to_string()
            } else {
                labels.join(" ")
            };
            (labels, i.inflected.as_str())
        })
        .collect();
    let width = rows.iter().map(|(labels, _)| labels.chars().count()).max().unwrap_or(0);

    let mut out = format!("{} ({})\n", paradigm.lemma, paradigm.part_of_speech.label());
    for (labels, inflected) in rows {
        out.push_str(&format!("  {labels:<width$}   {inflected}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::*;

    fn paradigm() -> Paradigm {
        Paradigm {
            part_of_speech: PartOfSpeech::Verb,
            lemma: "essere".to_string(),
            inflections: vec![
                Inflection {
                    lemma: "essere".to_string(),
                    inflected: "io sono".to_string(),
                    features: FeatureSet::new().with(Person::First).with(Number::Sing),
                },
                Inflection {
                    lemma: "essere".to_string(),
                    inflected: "essere".to_string(),
                    features: FeatureSet::new(),
                },
            ],
        }
    }

    #[test]
    fn test_json_compact_and_pretty() {
        let compact = to_json(&paradigm(), false).unwrap();
        assert!(compact.starts_with(r#"{"partOfSpeech":"VERB","lemma":"essere""#));
        assert!(!compact.contains('\n'));
        let pretty = to_json(&paradigm(), true).unwrap();
        assert!(pretty.contains("\n  \"lemma\": \"essere\""));
        let a: serde_json::Value = serde_json::from_str(&compact).unwrap();
        let b: serde_json::Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_table() {
        let table = to_table(&paradigm());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "essere (Verb)");
        assert_eq!(lines[1], "  1st person Singular   io sono");
        assert_eq!(lines[2], "  -                     essere");
    }
}
