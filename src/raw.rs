//! Raw payloads fetched from one external source for one taxon.
use crate::api::envelope::{id_string, is_not_found, null_default};
use crate::portal::Source;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    #[serde(default, deserialize_with = "id_string")]
    pub taxon_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub species: String,
    #[serde(default, deserialize_with = "null_default")]
    pub web: String,
    /// `None` until the source has been fetched.
    #[serde(default)]
    pub data: Option<Value>,
}

impl RawDocument {
    pub fn is_fetched(&self) -> bool {
        self.data.as_ref().is_some_and(|data| !data.is_null())
    }
}

/// Selection of raw documents by NCBI taxon id and source. Empty lists select
/// everything on the backend side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawQuery {
    pub taxon_id: Vec<String>,
    pub web: Vec<String>,
}

impl RawQuery {
    pub fn new(taxon_ids: &[String], sources: &[Source]) -> Self {
        RawQuery {
            taxon_id: taxon_ids.iter().map(|id| id.trim().to_string()).collect(),
            web: sources.iter().map(|s| s.as_str().to_string()).collect(),
        }
    }
}

/// Per-source result inside a store/delete outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WebOutcome {
    #[serde(default, deserialize_with = "null_default")]
    pub web: String,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_default")]
    pub info: String,
}

/// Store reports fetched and empty sources separately; delete reports one flat
/// list of deleted sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FoundWebs {
    Flat(Vec<WebOutcome>),
    Split {
        #[serde(default, deserialize_with = "null_default")]
        exist: Vec<WebOutcome>,
        #[serde(default, deserialize_with = "null_default")]
        not_exist: Vec<WebOutcome>,
    },
}

impl Default for FoundWebs {
    fn default() -> Self {
        FoundWebs::Flat(Vec::new())
    }
}

impl FoundWebs {
    /// Sources that were stored or deleted.
    pub fn succeeded(&self) -> &[WebOutcome] {
        match self {
            FoundWebs::Flat(webs) => webs,
            FoundWebs::Split { exist, .. } => exist,
        }
    }

    /// Sources that were queried but returned nothing.
    pub fn empty(&self) -> &[WebOutcome] {
        match self {
            FoundWebs::Flat(_) => &[],
            FoundWebs::Split { not_exist, .. } => not_exist,
        }
    }
}

/// Store/delete outcome for one taxon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawOutcome {
    #[serde(default, deserialize_with = "id_string")]
    pub taxon_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub species: String,
    #[serde(default, deserialize_with = "null_default")]
    pub found_webs: FoundWebs,
    #[serde(default, deserialize_with = "null_default")]
    pub missing_webs: Vec<String>,
    #[serde(default, deserialize_with = "null_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_default")]
    pub info: String,
}

impl RawOutcome {
    pub fn is_missing(&self) -> bool {
        is_not_found(Some(self.status.as_str()))
    }

    /// Names of the sources that succeeded.
    pub fn succeeded_webs(&self) -> Vec<&str> {
        self.found_webs
            .succeeded()
            .iter()
            .map(|web| web.web.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unfetched_documents_have_no_data() {
        let raw: RawDocument = serde_json::from_value(json!({
            "taxon_id": 1423, "species": "Bacillus subtilis", "web": "gbif", "data": null
        }))
        .unwrap();
        assert_eq!(raw.taxon_id, "1423");
        assert!(!raw.is_fetched());
    }

    #[test]
    fn query_serializes_source_names() {
        let query = RawQuery::new(&[" 1423 ".to_string()], &[Source::Bacdive, Source::Ncbi]);
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"taxon_id": ["1423"], "web": ["bacdive", "ncbi"]})
        );
    }

    #[test]
    fn store_outcomes_split_found_sources() {
        let outcomes: Vec<RawOutcome> = serde_json::from_value(json!([
            {
                "taxon_id": "1423",
                "species": "Bacillus subtilis",
                "found_webs": {
                    "exist": [{"web": "bacdive", "status": "success",
                               "info": "Data retrieved from source and stored successfully."}],
                    "not_exist": [{"web": "gbif", "status": "not_found",
                                   "info": "No data retrieved from source and no data stored."}]
                },
                "missing_webs": [],
                "status": "partially_found",
                "info": "Data retrieved from source and stored for some webs"
            },
            {
                "taxon_id": "999",
                "species": "Unknown species",
                "found_webs": {"exist": [], "not_exist": []},
                "missing_webs": ["bacdive", "gbif"],
                "status": "not_found",
                "info": "No portal found for this taxon_id."
            }
        ]))
        .unwrap();

        assert_eq!(outcomes[0].succeeded_webs(), vec!["bacdive"]);
        assert_eq!(outcomes[0].found_webs.empty()[0].web, "gbif");
        assert!(!outcomes[0].is_missing());
        assert!(outcomes[1].is_missing());
        assert_eq!(outcomes[1].missing_webs, vec!["bacdive", "gbif"]);
    }

    #[test]
    fn delete_outcomes_list_deleted_sources() {
        let outcomes: Vec<RawOutcome> = serde_json::from_value(json!([
            {
                "taxon_id": "1423",
                "species": "Bacillus subtilis",
                "found_webs": [{"web": "ncbi", "status": "deleted", "info": "Data deleted successfully."}],
                "missing_webs": ["gbif"],
                "status": "partially_found",
                "info": "Data deleted for some web sources."
            },
            {
                "taxon_id": "999",
                "species": "Unknown species",
                "found_webs": [],
                "missing_webs": ["ncbi", "gbif"],
                "status": "not_found",
                "info": "No data found for any provided web sources."
            }
        ]))
        .unwrap();

        assert_eq!(outcomes[0].succeeded_webs(), vec!["ncbi"]);
        assert!(outcomes[0].found_webs.empty().is_empty());
        assert!(outcomes[1].succeeded_webs().is_empty());
        assert!(outcomes[1].is_missing());
    }

    #[test]
    fn store_envelope_decodes_outcome_list() {
        let envelope: crate::api::envelope::Envelope<Vec<RawOutcome>> = serde_json::from_value(json!({
            "status": 200,
            "success": true,
            "message": "OK",
            "total_data": 1,
            "data": [{
                "taxon_id": "1423",
                "species": "Bacillus subtilis",
                "found_webs": {"exist": [{"web": "ncbi", "status": "success", "info": ""}], "not_exist": []},
                "missing_webs": [],
                "status": "found",
                "info": "Data retrieved from source and stored for all provided web sources."
            }]
        }))
        .unwrap();
        assert_eq!(envelope.total_data, Some(1));
        let outcomes = envelope.into_data("/raws/store").unwrap();
        assert_eq!(outcomes[0].status, "found");
    }
}
