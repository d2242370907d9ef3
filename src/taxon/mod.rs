pub mod normalizer;
pub mod record;

pub use record::TaxonRecord;
