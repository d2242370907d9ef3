//! Builds the ordered view-model for one species.
use crate::error::Result;
use crate::term::document::{TermDocument, TermRecord};
use crate::term::sections::extractor;
use crate::term::view::{Section, SectionKind, ViewModel};
use log::debug;
use serde_json::Value;

/// Runs every section extractor in canonical order, dropping sections that
/// produced no rows.
pub fn assemble(doc: &TermDocument) -> ViewModel {
    let sections: Vec<Section> = SectionKind::CANONICAL
        .iter()
        .filter_map(|&kind| {
            let rows = extractor(kind)(doc);
            if rows.is_empty() {
                debug!("Section '{}' has no extractable data", kind.source_key());
                None
            } else {
                Some(Section {
                    kind,
                    title: kind.title(),
                    rows,
                })
            }
        })
        .collect();

    ViewModel {
        species: doc.species().map(str::to_string),
        sections,
    }
}

/// Assembles a raw JSON value; fails only when it is not an object.
pub fn assemble_value(value: Value) -> Result<ViewModel> {
    Ok(assemble(&TermDocument::from_value(value)?))
}

pub fn assemble_record(record: TermRecord) -> Result<ViewModel> {
    Ok(assemble(&TermDocument::from_record(record)?))
}
