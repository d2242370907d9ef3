use crate::api::envelope::{id_string, is_not_found, null_default};
use crate::error::{CrateError, Result};
use crate::term::coerce::kind_of;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Term record as returned by the backend: the aggregated fact sheet plus the
/// species it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    /// NCBI taxon id the terms were built for.
    #[serde(default, deserialize_with = "id_string")]
    pub taxon_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub species: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<String>,
}

impl TermRecord {
    /// The backend answers unknown taxa with a placeholder record.
    pub fn is_missing(&self) -> bool {
        is_not_found(self.status.as_deref())
    }
}

/// A section-keyed fact sheet. Construction guarantees the root is an object.
#[derive(Debug, Clone, PartialEq)]
pub struct TermDocument {
    species: Option<String>,
    root: Value,
}

impl TermDocument {
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(CrateError::NotAMapping {
                found: kind_of(&value),
            });
        }
        Ok(TermDocument {
            species: None,
            root: value,
        })
    }

    pub fn from_record(record: TermRecord) -> Result<Self> {
        let TermRecord { species, data, .. } = record;
        // Records for taxa without stored terms come back with no data at all.
        let data = if data.is_null() {
            Value::Object(Map::new())
        } else {
            data
        };
        Ok(Self::from_value(data)?.with_species(&species))
    }

    /// Parses either a bare term document or a backend term record wrapping one.
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        if is_term_record(&value) {
            let record: TermRecord = serde_json::from_value(value)?;
            Self::from_record(record)
        } else {
            Self::from_value(value)
        }
    }

    /// Attaches the species name; blank names are ignored.
    pub fn with_species(mut self, species: &str) -> Self {
        let trimmed = species.trim();
        if !trimmed.is_empty() {
            self.species = Some(trimmed.to_string());
        }
        self
    }

    pub fn species(&self) -> Option<&str> {
        self.species.as_deref()
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Top-level section by its document key, `None` when absent or null.
    pub fn section(&self, key: &str) -> Option<&Value> {
        crate::term::accessor::field(&self.root, key)
    }
}

fn is_term_record(value: &Value) -> bool {
    match value {
        Value::Object(map) => {
            map.get("data").is_some_and(Value::is_object)
                && (map.contains_key("species") || map.contains_key("taxon_id"))
        }
        _ => false,
    }
}
