//! Pro Finder HTTP API: `POST /search` and the three `POST /api/export-*` sinks.
//!
//! Implements `SearchBackendPort` and `ExportSinkPort`. Non-2xx bodies are
//! plain-text error messages and are surfaced as-is.

use crate::domain::{BusinessRecord, DomainError, ExportPayload, ExportSink, SearchRequest};
use crate::ports::{ExportSinkPort, SearchBackendPort};
use std::time::Duration;
use tracing::{debug, warn};

pub struct ProFinderApi {
    client: reqwest::Client,
    base_url: String,
    search_url: String,
}

impl ProFinderApi {
    /// `base_url` hosts the export sinks; `search_url` is the full search endpoint.
    pub fn new(base_url: &str, search_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Backend(format!("build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            search_url: search_url.to_string(),
        })
    }

    /// Both endpoints under one base URL (wiremock in tests).
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let base = base_url.trim_end_matches('/');
        Self::new(base, &format!("{}/search", base), timeout)
    }

    fn sink_url(&self, sink: ExportSink) -> String {
        format!("{}{}", self.base_url, sink.endpoint_path())
    }
}

/// Error text for a non-2xx response: the body when there is one, else the status.
async fn error_text(response: reqwest::Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(body) if !body.trim().is_empty() => body.trim().to_string(),
        _ => status.to_string(),
    }
}

#[async_trait::async_trait]
impl SearchBackendPort for ProFinderApi {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<BusinessRecord>, DomainError> {
        debug!(url = %self.search_url, "POST search");
        let response = self
            .client
            .post(&self.search_url)
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::Backend(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = error_text(response).await;
            warn!(status = %status, body = %text, "search backend returned error");
            return Err(DomainError::Backend(text));
        }

        response
            .json::<Vec<BusinessRecord>>()
            .await
            .map_err(|e| DomainError::Backend(format!("Failed to parse search results: {}", e)))
    }
}

#[async_trait::async_trait]
impl ExportSinkPort for ProFinderApi {
    async fn export(
        &self,
        sink: ExportSink,
        payload: &ExportPayload,
    ) -> Result<Vec<u8>, DomainError> {
        let url = self.sink_url(sink);
        debug!(url = %url, records = payload.results.len(), "POST export");
        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DomainError::Export {
                sink,
                reason: format!("HTTP request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = error_text(response).await;
            warn!(%sink, status = %status, body = %text, "export sink returned error");
            return Err(DomainError::Export { sink, reason: text });
        }

        let body = response.bytes().await.map_err(|e| DomainError::Export {
            sink,
            reason: format!("read response body: {}", e),
        })?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LooseNumber;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer) -> ProFinderApi {
        ProFinderApi::with_base_url(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn request() -> SearchRequest {
        SearchRequest {
            keyword: "boulangerie".into(),
            city: "Lyon".into(),
            radius: "5".into(),
        }
    }

    #[tokio::test]
    async fn test_search_posts_request_and_keeps_unknown_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/search"))
            .and(body_json(serde_json::json!({
                "keyword": "boulangerie",
                "city": "Lyon",
                "radius": "5"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": "p1",
                    "name": "Maison Pralus",
                    "address": "Lyon",
                    "rating": "N/A",
                    "total_ratings": 12,
                    "opening_hours": ["Lun: 7h-19h"],
                    "alreadyExported": true
                }
            ])))
            .mount(&server)
            .await;

        let records = api(&server).search(&request()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, Some(LooseNumber::Text("N/A".into())));
        assert!(records[0].is_already_exported());
        assert!(records[0].extra.contains_key("opening_hours"));
    }

    #[tokio::test]
    async fn test_search_error_body_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Google Places quota exceeded"))
            .mount(&server)
            .await;

        let err = api(&server).search(&request()).await.unwrap_err();
        assert_eq!(err, DomainError::Backend("Google Places quota exceeded".into()));
        assert_eq!(err.user_message(), "Search failed: Google Places quota exceeded");
    }

    #[tokio::test]
    async fn test_export_hits_sink_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/export-csv"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Nom,Adresse\n"))
            .mount(&server)
            .await;
        Mock::given(path("/api/export-notion"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Aucun résultat sélectionné"))
            .mount(&server)
            .await;

        let payload = ExportPayload {
            keyword: "spa".into(),
            city: "Nice".into(),
            radius: "5".into(),
            results: vec![BusinessRecord::new("1", "Spa", "Nice")],
        };
        let api = api(&server);
        let body = api.export(ExportSink::Csv, &payload).await.unwrap();
        assert_eq!(body, b"Nom,Adresse\n");

        let err = api.export(ExportSink::Notion, &payload).await.unwrap_err();
        assert_eq!(
            err,
            DomainError::Export {
                sink: ExportSink::Notion,
                reason: "Aucun résultat sélectionné".into()
            }
        );
    }
}
