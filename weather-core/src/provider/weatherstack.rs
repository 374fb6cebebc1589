use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::ProviderError, model::WeatherPayload};

use super::WeatherProvider;

/// Client for the Weatherstack `current` endpoint.
#[derive(Debug, Clone)]
pub struct WeatherstackProvider {
    base_url: String,
    access_key: String,
    units: String,
    http: Client,
}

impl WeatherstackProvider {
    pub fn new(base_url: String, access_key: String, units: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { base_url, access_key, units, http: Client::new() }
    }

    fn current_url(&self) -> String {
        format!("{}/current", self.base_url)
    }
}

/// Error object Weatherstack embeds in an otherwise successful response.
#[derive(Debug, Deserialize)]
struct WsError {
    info: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

#[async_trait]
impl WeatherProvider for WeatherstackProvider {
    async fn fetch(&self, location: &str) -> Result<WeatherPayload, ProviderError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("access_key", self.access_key.as_str()),
                ("query", location),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| transport(location, e.without_url()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| transport(location, e.without_url()))?;

        if !status.is_success() {
            warn!(
                %location,
                %status,
                body = %truncate_body(&body),
                "weatherstack returned non-success status"
            );
            return Err(ProviderError::Transport(format!(
                "provider responded with status {status}"
            )));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| transport(location, format!("malformed provider response: {e}")))?;

        if let Some(err) = data.get("error") {
            let message = rejection_message(err);
            debug!(%location, %message, "weatherstack rejected the query");
            return Err(ProviderError::Rejected(message));
        }

        debug!(%location, "weatherstack lookup succeeded");
        Ok(data)
    }
}

fn transport(location: &str, err: impl std::fmt::Display) -> ProviderError {
    warn!(%location, error = %err, "weatherstack request failed");
    ProviderError::Transport(err.to_string())
}

fn rejection_message(err: &Value) -> String {
    match WsError::deserialize(err) {
        Ok(WsError { info: Some(info), .. }) => info,
        Ok(WsError { kind: Some(kind), .. }) => kind,
        _ => "unknown provider error".to_string(),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(uri: &str) -> WeatherstackProvider {
        WeatherstackProvider::new(uri.to_string(), "test_key".into(), "m".into())
    }

    #[tokio::test]
    async fn fetch_returns_payload_verbatim() {
        let mock_server = MockServer::start().await;
        let payload = json!({
            "location": {"name": "Paris", "country": "France"},
            "current": {"temperature": 10, "weather_descriptions": ["Sunny"]}
        });

        Mock::given(method("GET"))
            .and(path("/current"))
            .and(query_param("access_key", "test_key"))
            .and(query_param("query", "Paris"))
            .and(query_param("units", "m"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let data = provider(&mock_server.uri()).fetch("Paris").await.unwrap();

        assert_eq!(data, payload);
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"current": {}})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let uri = format!("{}/", mock_server.uri());
        assert!(provider(&uri).fetch("Oslo").await.is_ok());
    }

    #[tokio::test]
    async fn embedded_error_is_rejected_with_info() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "error": {
                    "code": 615,
                    "type": "request_failed",
                    "info": "Your API request failed. Please try again or contact support."
                }
            })))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri()).fetch("Nowhere").await.unwrap_err();

        assert_eq!(
            err,
            ProviderError::Rejected(
                "Your API request failed. Please try again or contact support.".into()
            )
        );
    }

    #[tokio::test]
    async fn embedded_error_without_info_falls_back_to_type() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": {"code": 101, "type": "invalid_access_key"}
            })))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri()).fetch("Paris").await.unwrap_err();

        assert_eq!(err, ProviderError::Rejected("invalid_access_key".into()));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri()).fetch("Paris").await.unwrap_err();

        assert!(matches!(err, ProviderError::Transport(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn malformed_body_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let err = provider(&mock_server.uri()).fetch("Paris").await.unwrap_err();

        assert!(matches!(err, ProviderError::Transport(ref msg) if msg.contains("malformed")));
    }

    #[tokio::test]
    async fn unreachable_provider_is_transport_error() {
        let err = provider("http://127.0.0.1:1").fetch("Paris").await.unwrap_err();

        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[test]
    fn truncate_body_limits_length() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));

        assert_eq!(truncate_body("short"), "short");
    }
}
