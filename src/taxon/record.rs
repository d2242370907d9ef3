use crate::api::envelope::{id_string, null_default};
use crate::error::{CrateError, Result};
use serde::{Deserialize, Serialize};

const MAX_FIELD_LEN: usize = 100;

/// A species entry of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonRecord {
    #[serde(default, deserialize_with = "null_default")]
    pub taxon_id: u64,
    #[serde(default, deserialize_with = "id_string")]
    pub ncbi_taxon_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub species: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl TaxonRecord {
    pub fn new(taxon_id: u64, ncbi_taxon_id: &str, species: &str) -> Self {
        TaxonRecord {
            taxon_id,
            ncbi_taxon_id: ncbi_taxon_id.trim().to_string(),
            species: crate::taxon::normalizer::normalize_species_name(species),
            status: None,
            info: None,
        }
    }

    /// Client-side checks mirroring the backend's create model.
    pub fn validate(&self) -> Result<()> {
        if self.taxon_id < 1 {
            return Err(CrateError::ValidationError {
                field: "taxon_id".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        check_length("ncbi_taxon_id", &self.ncbi_taxon_id)?;
        check_length("species", &self.species)?;
        Ok(())
    }
}

fn check_length(field: &str, value: &str) -> Result<()> {
    let len = value.trim().chars().count();
    if len == 0 || len > MAX_FIELD_LEN {
        return Err(CrateError::ValidationError {
            field: field.to_string(),
            reason: format!("must be between 1 and {} characters", MAX_FIELD_LEN),
        });
    }
    Ok(())
}

/// Sorts a listing alphabetically by species, ignoring case.
pub fn sort_by_species(records: &mut [TaxonRecord]) {
    records.sort_by(|a, b| {
        a.species
            .to_lowercase()
            .cmp(&b.species.to_lowercase())
            .then_with(|| a.species.cmp(&b.species))
    });
}

/// Case-insensitive substring match on species; a blank query keeps everything.
pub fn search(records: &[TaxonRecord], query: &str) -> Vec<TaxonRecord> {
    let needle = query.trim().to_lowercase();
    records
        .iter()
        .filter(|record| needle.is_empty() || record.species.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
