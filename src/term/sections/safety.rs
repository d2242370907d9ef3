use super::{Row, SectionKind, TermDocument, group_rows};

const RISK_FIELDS: [(&str, &str); 2] = [
    ("biosafety level", "Biosafety Level"),
    ("biosafety level comment", "Biosafety Level Comment"),
];

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    match doc.section(SectionKind::Safety.source_key()) {
        Some(section) => group_rows(section, "risk assessment", "Risk Assessment", &RISK_FIELDS),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::view::RowValue;
    use serde_json::json;

    #[test]
    fn each_assessment_is_a_group() {
        let doc = TermDocument::from_value(json!({
            "Safety information": {"risk assessment": [
                {"@ref": 20215, "biosafety level": "1", "biosafety level comment": "German classification"},
                {"@ref": 1, "biosafety level": 1}
            ]}
        }))
        .unwrap();
        let rows = extract(&doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].provenance, Some(json!(1)));
        match &rows[0].value {
            RowValue::Group(children) => {
                assert_eq!(children[0], Row::text("Biosafety Level", "1"));
                assert_eq!(children[1], Row::text("Biosafety Level Comment", "German classification"));
            }
            other => panic!("expected a group, got {:?}", other),
        }
    }

    #[test]
    fn absent_key_gives_no_rows() {
        let doc = TermDocument::from_value(json!({"Morphology": {}})).unwrap();
        assert!(extract(&doc).is_empty());
    }
}
