use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use medgrid_core::page::{CollectionModel, PatientResource};
use medgrid_core::{ListParams, Patient, PatientPage, PatientRecord};

use crate::error::ClientError;

type Result<T> = std::result::Result<T, ClientError>;

/// Async client for the patient-records API.
///
/// No retries, no request timeouts beyond reqwest defaults, no cancellation;
/// every call is a single request whose outcome is returned as-is.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn patient_url(&self, suffix: &str) -> String {
        format!("{}/api/patient{}", self.base_url, suffix)
    }

    /// Fetch one page of patients. The `filters` parameter is sent as
    /// URI-encoded JSON; a populated global constraint travels as `query`.
    pub async fn list(&self, params: &ListParams) -> Result<PatientPage> {
        let url = self.patient_url("");
        let pairs = params.to_query_pairs()?;
        debug!(%url, page = params.page, "fetching patient page");
        let resp = self.http.get(&url).query(&pairs).send().await?;
        let body = handle_response(resp).await?;
        let model: CollectionModel =
            serde_json::from_str(&body).map_err(ClientError::Decode)?;
        Ok(model.into_page()?)
    }

    /// Fetch a single patient; the identifier comes back via its self link.
    pub async fn get(&self, id: Uuid) -> Result<Patient> {
        let url = self.patient_url(&format!("/{id}"));
        debug!(%url, "fetching patient");
        let resp = self.http.get(&url).send().await?;
        decode_patient(&handle_response(resp).await?)
    }

    pub async fn create(&self, record: &PatientRecord) -> Result<Patient> {
        let url = self.patient_url("");
        debug!(%url, "creating patient");
        let resp = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(record)
            .send()
            .await?;
        decode_patient(&handle_response(resp).await?)
    }

    pub async fn update(&self, id: Uuid, record: &PatientRecord) -> Result<Patient> {
        let url = self.patient_url(&format!("/{id}"));
        debug!(%url, "updating patient");
        let resp = self
            .http
            .put(&url)
            .header("Content-Type", "application/json")
            .json(record)
            .send()
            .await?;
        decode_patient(&handle_response(resp).await?)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let url = self.patient_url(&format!("/{id}"));
        debug!(%url, "deleting patient");
        let resp = self.http.delete(&url).send().await?;
        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            warn!(status, "delete failed");
            return Err(ClientError::http(status, body));
        }
        Ok(())
    }

    /// Full-text search over patient records, with the usual paging and
    /// filter parameters layered on top of the mandatory query string.
    pub async fn search(&self, query: &str, params: &ListParams) -> Result<PatientPage> {
        let url = self.patient_url("/search");
        let mut pairs = params.to_query_pairs()?;
        pairs.retain(|(k, _)| k != "query");
        pairs.push(("query".to_string(), query.to_string()));
        debug!(%url, query, "searching patients");
        let resp = self.http.get(&url).query(&pairs).send().await?;
        let body = handle_response(resp).await?;
        let model: CollectionModel =
            serde_json::from_str(&body).map_err(ClientError::Decode)?;
        Ok(model.into_page()?)
    }

    /// Reachability probe: a minimal list request. The service has no
    /// dedicated health endpoint.
    pub async fn ping(&self) -> Result<u16> {
        let url = self.patient_url("");
        let resp = self
            .http
            .get(&url)
            .query(&[("page", "0"), ("size", "1")])
            .send()
            .await?;
        Ok(resp.status().as_u16())
    }
}

fn decode_patient(body: &str) -> Result<Patient> {
    let resource: PatientResource =
        serde_json::from_str(body).map_err(ClientError::Decode)?;
    Ok(resource.into_patient()?)
}

async fn handle_response(resp: reqwest::Response) -> Result<String> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if !status.is_success() {
        // Surface a server-side message when the error body carries one.
        if let Ok(json) = serde_json::from_str::<Value>(&body)
            && let Some(message) = json.get("message").and_then(|m| m.as_str())
            && !message.is_empty()
        {
            warn!(status = status.as_u16(), message, "request failed");
            return Err(ClientError::http(status.as_u16(), message));
        }
        warn!(status = status.as_u16(), "request failed");
        return Err(ClientError::http(status.as_u16(), body));
    }

    Ok(body)
}
