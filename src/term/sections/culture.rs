use super::{Row, SectionKind, TermDocument, group_rows, table_row};

const MEDIUM_FIELDS: [(&str, &str); 4] = [
    ("name", "Name"),
    ("growth", "Growth"),
    ("link", "Link"),
    ("composition", "Composition"),
];

const TEMPERATURE_COLUMNS: [(&str, &str); 3] = [
    ("growth", "Growth"),
    ("type", "Type"),
    ("temperature", "Temperature"),
];

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    let Some(section) = doc.section(SectionKind::Culture.source_key()) else {
        return Vec::new();
    };
    let mut rows = group_rows(section, "culture medium", "Culture Medium", &MEDIUM_FIELDS);
    rows.extend(table_row(section, "culture temp", "Culture Temperature", &TEMPERATURE_COLUMNS));
    rows
}
