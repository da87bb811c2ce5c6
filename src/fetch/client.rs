use std::time::Duration;

use log::info;
use reqwest::{blocking::Client, StatusCode};

use crate::error::{MapError, MapResult};
use crate::fetch::{OverpassQuery, OverpassResponse};

/// Blocking client for an Overpass interpreter endpoint. No retries.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    endpoint: String,
    client: Client,
}

impl OverpassClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> MapResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("poimap/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| MapError::fetch(format!("building HTTP client: {e}")))?;
        Ok(Self { endpoint: endpoint.into(), client })
    }

    #[inline] pub fn endpoint(&self) -> &str { &self.endpoint }

    /// Raw response document.
    pub fn fetch_raw(&self, query: &OverpassQuery) -> MapResult<serde_json::Value> {
        let ql = query.to_ql();
        info!("[fetch] GET {} ({} bytes of QL)", self.endpoint, ql.len());

        let resp = self.client.get(&self.endpoint)
            .query(&[("data", ql.as_str())])
            .send()
            .map_err(|e| MapError::fetch(format!("GET {}: {e}", self.endpoint)))?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(MapError::fetch(format!("GET {} returned {status}", self.endpoint)));
        }

        let body = resp.bytes()
            .map_err(|e| MapError::fetch(format!("reading response from {}: {e}", self.endpoint)))?;
        serde_json::from_slice(&body)
            .map_err(|e| MapError::fetch(format!("decoding response from {}: {e}", self.endpoint)))
    }

    /// Typed response document.
    pub fn fetch(&self, query: &OverpassQuery) -> MapResult<OverpassResponse> {
        let raw = self.fetch_raw(query)?;
        let response: OverpassResponse = serde_json::from_value(raw)
            .map_err(|e| MapError::fetch(format!("unexpected response shape: {e}")))?;
        info!("[fetch] {} elements", response.elements.len());
        Ok(response)
    }
}
