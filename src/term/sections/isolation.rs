use super::{Row, SectionKind, TermDocument, group_rows, table_row};

const EVENT_FIELDS: [(&str, &str); 6] = [
    ("sample type", "Sample Type"),
    ("sampling date", "Sampling Date"),
    ("isolation date", "Isolation Date"),
    ("country", "Country"),
    ("origin.country", "Country ISO 3 Code"),
    ("continent", "Continent"),
];

const CATEGORY_COLUMNS: [(&str, &str); 3] = [
    ("Cat1", "Category 1"),
    ("Cat2", "Category 2"),
    ("Cat3", "Category 3"),
];

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    let Some(section) = doc.section(SectionKind::Isolation.source_key()) else {
        return Vec::new();
    };
    let mut rows = group_rows(section, "isolation", "Isolation", &EVENT_FIELDS);
    rows.extend(table_row(
        section,
        "isolation source categories",
        "Isolation Source Categories",
        &CATEGORY_COLUMNS,
    ));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::view::RowValue;
    use serde_json::json;

    #[test]
    fn singleton_category_fills_missing_levels() {
        let doc = TermDocument::from_value(json!({
            "Isolation, sampling and environmental information": {"isolation source categories": {"Cat1": "soil"}}
        }))
        .unwrap();
        let rows = extract(&doc);
        assert_eq!(rows.len(), 1);
        match &rows[0].value {
            RowValue::Table(table) => {
                assert_eq!(table.columns, vec!["Category 1", "Category 2", "Category 3"]);
                assert_eq!(table.rows.len(), 1);
                assert_eq!(table.rows[0].cells, vec!["soil", "-", "-"]);
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn category_list_keeps_every_level() {
        let doc = TermDocument::from_value(json!({
            "Isolation, sampling and environmental information": {"isolation source categories": [
                {"Cat1": "#Environmental", "Cat2": "#Terrestrial", "Cat3": "#Soil"},
                {"Cat2": "#Aquatic"}
            ]}
        }))
        .unwrap();
        match &extract(&doc)[0].value {
            RowValue::Table(table) => {
                assert_eq!(table.rows[0].cells, vec!["#Environmental", "#Terrestrial", "#Soil"]);
                assert_eq!(table.rows[1].cells, vec!["-", "#Aquatic", "-"]);
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn isolation_events_become_groups() {
        let doc = TermDocument::from_value(json!({
            "Isolation, sampling and environmental information": {"isolation": [
                {"@ref": 20215, "sample type": "soil", "country": "Germany", "origin.country": "DEU", "continent": "Europe"},
                {"@ref": 67770, "sample type": "hay infusion", "isolation date": "1872"}
            ]}
        }))
        .unwrap();
        let rows = extract(&doc);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].label, "Isolation");
        assert_eq!(rows[0].provenance, Some(json!(20215)));
        match &rows[0].value {
            RowValue::Group(children) => {
                let labels: Vec<&str> = children.iter().map(|c| c.label.as_str()).collect();
                assert_eq!(labels, vec!["Sample Type", "Country", "Country ISO 3 Code", "Continent"]);
            }
            other => panic!("expected a group, got {:?}", other),
        }
        match &rows[1].value {
            RowValue::Group(children) => assert_eq!(children[1], Row::text("Isolation Date", "1872")),
            other => panic!("expected a group, got {:?}", other),
        }
    }
}
