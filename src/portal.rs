//! Portal records: which external sources back a taxon.
use crate::api::envelope::null_default;
use crate::error::{CrateError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// External data source a portal can pull from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Wikidata,
    Ncbi,
    Bacdive,
    Gbif,
}

impl Source {
    pub const ALL: [Source; 4] = [Source::Wikidata, Source::Ncbi, Source::Bacdive, Source::Gbif];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Wikidata => "wikidata",
            Source::Ncbi => "ncbi",
            Source::Bacdive => "bacdive",
            Source::Gbif => "gbif",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalRecord {
    #[serde(default, deserialize_with = "null_default")]
    pub portal_id: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub taxon_id: u64,
    #[serde(default, deserialize_with = "null_default")]
    pub web: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl PortalRecord {
    /// Builds a create request. Sources are deduplicated and kept in a stable
    /// order; at least one is required.
    pub fn new(portal_id: u64, taxon_id: u64, sources: &[Source]) -> Result<Self> {
        if portal_id < 1 {
            return Err(CrateError::ValidationError {
                field: "portal_id".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if taxon_id < 1 {
            return Err(CrateError::ValidationError {
                field: "taxon_id".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        let mut sources = sources.to_vec();
        sources.sort();
        sources.dedup();
        if sources.is_empty() {
            return Err(CrateError::ValidationError {
                field: "web".to_string(),
                reason: format!(
                    "select at least one source ({})",
                    Source::ALL.map(Source::as_str).join(", ")
                ),
            });
        }
        Ok(PortalRecord {
            portal_id,
            taxon_id,
            web: sources.iter().map(|s| s.as_str().to_string()).collect(),
            status: None,
            info: None,
        })
    }

    /// Whether a detail lookup returned an existing portal.
    pub fn exists(&self) -> bool {
        self.taxon_id > 0
    }
}
