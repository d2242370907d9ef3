use super::{Row, SectionKind, TermDocument, provenance, table_row};
use crate::term::accessor::{field, text_field};
use crate::term::coerce::records;

const UTILIZATION_COLUMNS: [(&str, &str); 4] = [
    ("metabolite", "Metabolite"),
    ("Chebi-ID", "ChEBI ID"),
    ("utilization activity", "Utilization Activity"),
    ("kind of utilization tested", "Kind Of Utilization Tested"),
];

const PRODUCTION_COLUMNS: [(&str, &str); 3] = [
    ("metabolite", "Metabolite"),
    ("Chebi-ID", "ChEBI ID"),
    ("production", "Production"),
];

const TEST_COLUMNS: [(&str, &str); 3] = [
    ("metabolite", "Metabolite"),
    ("Chebi-ID", "ChEBI ID"),
    ("indole test", "Indole Test"),
];

const ENZYME_COLUMNS: [(&str, &str); 3] = [
    ("value", "Enzyme"),
    ("activity", "Activity"),
    ("ec", "EC Number"),
];

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    let Some(section) = doc.section(SectionKind::Physiology.source_key()) else {
        return Vec::new();
    };
    let mut rows = Vec::new();

    for tolerance in records(field(section, "oxygen tolerance"), "oxygen tolerance") {
        if let Some(value) = text_field(tolerance, "oxygen tolerance") {
            rows.push(Row::text("Oxygen Tolerance", value).with_provenance(provenance(tolerance)));
        }
    }

    rows.extend(table_row(
        section,
        "metabolite utilization",
        "Metabolite Utilization",
        &UTILIZATION_COLUMNS,
    ));
    rows.extend(table_row(
        section,
        "metabolite production",
        "Metabolite Production",
        &PRODUCTION_COLUMNS,
    ));
    rows.extend(table_row(section, "metabolite tests", "Metabolite Tests", &TEST_COLUMNS));
    rows.extend(table_row(section, "enzymes", "Enzymes", &ENZYME_COLUMNS));

    rows
}
