//! One extractor per fact-sheet section. Each turns the raw section of a term
//! document into ordered rows, returning nothing when the section is absent.
pub mod culture;
pub mod isolation;
pub mod morphology;
pub mod physiology;
pub mod safety;
pub mod sequence;
pub mod taxonomy;

use crate::term::accessor::{field, text_field};
use crate::term::coerce::records;
use crate::term::document::TermDocument;
use crate::term::view::{Row, SectionKind, Table};
use serde_json::Value;

pub type Extractor = fn(&TermDocument) -> Vec<Row>;

/// Key carrying the source reference of an entry.
pub const REF_KEY: &str = "@ref";

pub fn extractor(kind: SectionKind) -> Extractor {
    match kind {
        SectionKind::Taxonomy => taxonomy::extract,
        SectionKind::Morphology => morphology::extract,
        SectionKind::Culture => culture::extract,
        SectionKind::Physiology => physiology::extract,
        SectionKind::Isolation => isolation::extract,
        SectionKind::Safety => safety::extract,
        SectionKind::Sequence => sequence::extract,
    }
}

/// The entry's `@ref` marker, unchanged.
pub fn provenance(entry: &Value) -> Option<Value> {
    field(entry, REF_KEY).cloned()
}

/// Text rows for the `(key, label)` pairs present in `entry`, in pair order.
pub fn text_rows(entry: &Value, fields: &[(&str, &str)]) -> Vec<Row> {
    fields
        .iter()
        .filter_map(|(key, label)| text_field(entry, key).map(|value| Row::text(*label, value)))
        .collect()
}

/// One group row per entry of a singleton-or-list field. Entries without any
/// of the listed fields are skipped.
pub fn group_rows(section: &Value, key: &str, label: &str, fields: &[(&str, &str)]) -> Vec<Row> {
    records(field(section, key), key)
        .into_iter()
        .filter_map(|entry| {
            let children = text_rows(entry, fields);
            if children.is_empty() {
                None
            } else {
                Some(Row::group(label, children).with_provenance(provenance(entry)))
            }
        })
        .collect()
}

/// A nested table built from a singleton-or-list field, one table row per
/// entry carrying that entry's `@ref`. `None` when no entry has any column.
pub fn table_row(section: &Value, key: &str, label: &str, columns: &[(&str, &str)]) -> Option<Row> {
    let headers: Vec<&str> = columns.iter().map(|(_, header)| *header).collect();
    let mut table = Table::new(&headers);
    for entry in records(field(section, key), key) {
        let cells = columns
            .iter()
            .map(|(column_key, _)| text_field(entry, column_key))
            .collect();
        table.push(cells, provenance(entry));
    }
    table.into_row(label)
}
