use super::{Row, SectionKind, TermDocument, table_row};

const RRNA_COLUMNS: [(&str, &str); 5] = [
    ("description", "Description"),
    ("accession", "Accession"),
    ("length", "Length (bp)"),
    ("database", "Database"),
    ("NCBI tax ID", "NCBI Tax ID"),
];

const GENOME_COLUMNS: [(&str, &str); 5] = [
    ("description", "Description"),
    ("accession", "Accession"),
    ("assembly level", "Assembly Level"),
    ("database", "Database"),
    ("NCBI tax ID", "NCBI Tax ID"),
];

pub fn extract(doc: &TermDocument) -> Vec<Row> {
    let Some(section) = doc.section(SectionKind::Sequence.source_key()) else {
        return Vec::new();
    };
    table_row(section, "16S sequences", "16S Sequences", &RRNA_COLUMNS)
        .into_iter()
        .chain(table_row(section, "Genome sequences", "Genome Sequences", &GENOME_COLUMNS))
        .collect()
}
