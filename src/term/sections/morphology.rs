use super::{Row, SectionKind, TermDocument, provenance};
use crate::term::accessor::{field, text_field};
use crate::term::coerce::records;

const CELL_FIELDS: [(&str, &str); 3] = [
    ("gram stain", "Gram Stain"),
    ("cell shape", "Cell Shape"),
    ("motility", "Motility"),
];

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    let Some(section) = doc.section(SectionKind::Morphology.source_key()) else {
        return Vec::new();
    };
    let mut rows = Vec::new();

    for cell in records(field(section, "cell morphology"), "cell morphology") {
        let reference = provenance(cell);
        for (key, label) in CELL_FIELDS {
            if let Some(value) = text_field(cell, key) {
                rows.push(Row::text(label, value).with_provenance(reference.clone()));
            }
        }
    }

    for colony in records(field(section, "colony morphology"), "colony morphology") {
        if let Some(period) = text_field(colony, "incubation period") {
            rows.push(Row::text("Incubation Period", period).with_provenance(provenance(colony)));
        }
    }

    rows
}
