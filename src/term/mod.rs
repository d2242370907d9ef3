//! Term documents and their normalization into flat, ordered fact sheets.
pub mod accessor;
pub mod assembler;
pub mod coerce;
pub mod document;
pub mod sections;
pub mod view;

pub use assembler::{assemble, assemble_record, assemble_value};
pub use document::{TermDocument, TermRecord};
pub use view::{Row, RowValue, Section, SectionKind, Table, ViewModel};
