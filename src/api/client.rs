//! Typed async client for the catalog backend.
use crate::api::envelope::{Envelope, error_message};
use crate::config::ClientConfig;
use crate::error::{CrateError, Result};
use crate::portal::{PortalRecord, Source};
use crate::raw::{RawDocument, RawOutcome, RawQuery};
use crate::taxon::TaxonRecord;
use crate::term::TermRecord;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

pub struct ApiClient {
    http: Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(CrateError::ApiRequestError)?;
        Ok(ApiClient { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // --- taxa ---

    /// Lists taxa; an empty id list returns the whole catalog.
    pub async fn list_taxa(&self, taxon_ids: &[u64]) -> Result<Vec<TaxonRecord>> {
        self.post("/taxa/get", &json!({ "taxon_id": taxon_ids })).await
    }

    pub async fn taxon_detail(&self, taxon_id: u64) -> Result<Option<TaxonRecord>> {
        let found: Option<TaxonRecord> = self
            .get_optional("/taxa/detail", &[("taxon_id", taxon_id.to_string())])
            .await?;
        Ok(found.filter(|taxon| !taxon.ncbi_taxon_id.is_empty()))
    }

    /// Create-or-update: the backend upserts on `taxon_id`.
    pub async fn upsert_taxa(&self, records: &[TaxonRecord]) -> Result<Vec<TaxonRecord>> {
        self.post("/taxa/create", records).await
    }

    pub async fn delete_taxa(&self, taxon_ids: &[u64]) -> Result<Value> {
        self.delete("/taxa/delete", &json!({ "taxon_id": taxon_ids })).await
    }

    // --- portals ---

    pub async fn list_portals(&self, portal_ids: &[u64]) -> Result<Vec<PortalRecord>> {
        self.post("/portals/get", &json!({ "portal_id": portal_ids })).await
    }

    pub async fn portal_detail(&self, portal_id: u64) -> Result<Option<PortalRecord>> {
        let found: Option<PortalRecord> = self
            .get_optional("/portals/detail", &[("portal_id", portal_id.to_string())])
            .await?;
        Ok(found.filter(PortalRecord::exists))
    }

    pub async fn create_portals(&self, portals: &[PortalRecord]) -> Result<Vec<PortalRecord>> {
        self.post("/portals/create", portals).await
    }

    pub async fn delete_portals(&self, portal_ids: &[u64]) -> Result<Value> {
        self.delete("/portals/delete", &json!({ "portal_id": portal_ids })).await
    }

    /// Asks the backend to pull one source's payload for a taxon.
    pub async fn retrieve_source_data(&self, ncbi_taxon_id: &str, source: Source) -> Result<Value> {
        self.get(
            "/portals/retrieve-data",
            &[
                ("ncbi_taxon_id", ncbi_taxon_id.to_string()),
                ("web", source.as_str().to_string()),
            ],
        )
        .await
    }

    // --- raws ---

    pub async fn get_raws(&self, query: &RawQuery) -> Result<Vec<RawDocument>> {
        self.post("/raws/get", query).await
    }

    /// Fetches each selected source and stores its payload; one outcome per taxon.
    pub async fn store_raws(&self, query: &RawQuery) -> Result<Vec<RawOutcome>> {
        self.post("/raws/store", query).await
    }

    pub async fn delete_raws(&self, query: &RawQuery) -> Result<Vec<RawOutcome>> {
        self.delete("/raws/delete", query).await
    }

    // --- terms ---

    pub async fn get_terms(&self, ncbi_taxon_ids: &[String]) -> Result<Vec<TermRecord>> {
        self.post("/terms/get", &json!({ "taxon_id": ncbi_taxon_ids })).await
    }

    /// Term record of one taxon, or `RecordNotFound` when the backend has none.
    pub async fn term_for(&self, ncbi_taxon_id: &str) -> Result<TermRecord> {
        let records = self.get_terms(&[ncbi_taxon_id.to_string()]).await?;
        select_term(records, ncbi_taxon_id)
    }

    /// Rebuilds term documents from stored raws.
    pub async fn store_terms(&self, ncbi_taxon_ids: &[String]) -> Result<Vec<TermRecord>> {
        self.post("/terms/store", &json!({ "taxon_id": ncbi_taxon_ids })).await
    }

    pub async fn delete_terms(&self, ncbi_taxon_ids: &[String]) -> Result<Value> {
        self.delete("/terms/delete", &json!({ "taxon_id": ncbi_taxon_ids })).await
    }

    pub async fn search_terms(&self, keyword: &str) -> Result<Vec<TermRecord>> {
        let keyword = keyword.trim();
        if keyword.is_empty() || keyword.chars().count() > 500 {
            return Err(CrateError::ValidationError {
                field: "search".to_string(),
                reason: "must be between 1 and 500 characters".to_string(),
            });
        }
        self.post("/terms/search", &json!({ "search": keyword })).await
    }

    // --- transport ---

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.config.endpoint(path)).json(body);
        self.send(request, path).await
    }

    async fn delete<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.delete(self.config.endpoint(path)).json(body);
        self.send(request, path).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.http.get(self.config.endpoint(path)).query(query);
        self.send(request, path).await
    }

    /// GET where "not found" (404 or an unsuccessful envelope) is an answer,
    /// not a failure.
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        found_or_none(self.get(path, query).await)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        debug!("Calling backend endpoint {}", path);
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(CrateError::ApiRequestError)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Backend returned {} for {}", status, path);
            return Err(CrateError::ApiStatusError {
                status,
                endpoint: path.to_string(),
                message: error_message(&body),
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|source| CrateError::ApiJsonDecodeError {
                endpoint: path.to_string(),
                source,
            })?;
        envelope.into_data(path)
    }
}

fn found_or_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(found) => Ok(Some(found)),
        Err(CrateError::ApiStatusError { status, .. }) if status == StatusCode::NOT_FOUND => Ok(None),
        Err(CrateError::ApiUnsuccessful { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Picks the record for `ncbi_taxon_id`, skipping the placeholder the backend
/// returns for taxa without stored terms.
fn select_term(records: Vec<TermRecord>, ncbi_taxon_id: &str) -> Result<TermRecord> {
    records
        .into_iter()
        .find(|record| record.taxon_id == ncbi_taxon_id || record.taxon_id.is_empty())
        .filter(|record| !record.is_missing())
        .ok_or_else(|| CrateError::RecordNotFound(format!("terms for NCBI taxon {}", ncbi_taxon_id)))
}
