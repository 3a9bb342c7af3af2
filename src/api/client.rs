use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info};

use super::error::AnalysisError;
use super::models::{AnalysisRequest, AnalysisResponse};
use crate::constants::{ANALYZE_PATH, NO_CONTENT_PLACEHOLDER};

/// Async client for the analysis endpoint.
///
/// One call to [`submit`](Self::submit) is exactly one POST: no retries and
/// no cancellation. Keeping a single submission in flight is the caller's job.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    analyze_url: String,
}

impl AnalysisClient {
    /// Create a client for `base_url`. A `timeout` of `None` waits forever.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            client: builder.build().unwrap_or_default(),
            analyze_url: format!("{}{}", base_url, ANALYZE_PATH),
        }
    }

    /// Submit one analysis job and decode the report.
    pub async fn submit(&self, request: &AnalysisRequest) -> Result<AnalysisResponse, AnalysisError> {
        info!(ticker = %request.ticker, url = %self.analyze_url, "submitting analysis");

        let response = self
            .client
            .post(&self.analyze_url)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "analysis response received");

        decode_response(status, body)
    }
}

/// Turn a status and raw body into a report or an error.
///
/// A failure status is always an error. On success the body may be a JSON
/// envelope with `content_markdown` or plain text; anything that isn't a
/// usable envelope falls back to the raw text, and an empty result becomes
/// [`NO_CONTENT_PLACEHOLDER`].
pub fn decode_response(status: StatusCode, body: String) -> Result<AnalysisResponse, AnalysisError> {
    if !status.is_success() {
        return Err(AnalysisError::http(status.as_u16(), body));
    }

    let (content, session_id) = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => {
            let content = map
                .get("content_markdown")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            let session_id = map
                .get("session_id")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            (content, session_id)
        }
        Ok(_) => (None, None),
        Err(e) => {
            debug!(error = %e, "analysis body is not JSON, using raw text");
            (None, None)
        }
    };

    let content_markdown = match content {
        Some(c) => c,
        None if !body.is_empty() => body,
        None => NO_CONTENT_PLACEHOLDER.to_string(),
    };

    Ok(AnalysisResponse {
        content_markdown,
        session_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::{refused_base, serve_delayed, serve_once};

    fn ok(body: &str) -> AnalysisResponse {
        decode_response(StatusCode::OK, body.to_string()).unwrap()
    }

    // ── decode_response ───────────────────────────────────────────

    #[test]
    fn decode_json_envelope() {
        let resp = ok(r##"{"content_markdown": "# Report"}"##);
        assert_eq!(resp.content_markdown, "# Report");
        assert_eq!(resp.session_id, None);
    }

    #[test]
    fn decode_json_envelope_with_session() {
        let resp = ok(r#"{"session_id": "abc-1", "content_markdown": "body"}"#);
        assert_eq!(resp.content_markdown, "body");
        assert_eq!(resp.session_id.as_deref(), Some("abc-1"));
    }

    #[test]
    fn decode_plain_text_body() {
        assert_eq!(ok("Report text").content_markdown, "Report text");
    }

    #[test]
    fn decode_json_without_field_uses_raw_text() {
        let body = r#"{"detail": "something"}"#;
        assert_eq!(ok(body).content_markdown, body);
    }

    #[test]
    fn decode_non_object_json_uses_raw_text() {
        assert_eq!(ok("42").content_markdown, "42");
        assert_eq!(ok(r#""quoted""#).content_markdown, r#""quoted""#);
    }

    #[test]
    fn decode_non_string_field_uses_raw_text() {
        let body = r#"{"content_markdown": 7}"#;
        assert_eq!(ok(body).content_markdown, body);
    }

    #[test]
    fn decode_empty_body_yields_placeholder() {
        let resp = ok("");
        assert_eq!(resp.content_markdown, NO_CONTENT_PLACEHOLDER);
        assert!(!resp.content_markdown.is_empty());
    }

    #[test]
    fn decode_empty_field_falls_back_to_raw_text() {
        let body = r#"{"content_markdown": ""}"#;
        assert_eq!(ok(body).content_markdown, body);
    }

    #[test]
    fn decode_failure_status_uses_body() {
        let err = decode_response(StatusCode::INTERNAL_SERVER_ERROR, "server error".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "server error");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn decode_failure_status_empty_body() {
        let err = decode_response(StatusCode::NOT_FOUND, String::new()).unwrap_err();
        assert_eq!(err.to_string(), "HTTP 404");
    }

    #[test]
    fn decode_failure_status_ignores_json_envelope() {
        let body = r#"{"content_markdown": "should not be shown as a report"}"#;
        let err = decode_response(StatusCode::BAD_REQUEST, body.to_string()).unwrap_err();
        assert_eq!(err.to_string(), body);
    }

    // ── submit against a stub service ─────────────────────────────

    #[tokio::test]
    async fn submit_posts_json_and_decodes() {
        let stub = serve_once(200, r##"{"content_markdown": "# BBAS3"}"##);
        let client = AnalysisClient::new(&stub.base, Some(Duration::from_secs(5)));
        let req = AnalysisRequest::new("BBAS3.SA", "risks").unwrap();

        let resp = client.submit(&req).await.unwrap();
        assert_eq!(resp.content_markdown, "# BBAS3");

        let seen = stub.recorded();
        assert_eq!(seen.method, "POST");
        assert_eq!(seen.url, ANALYZE_PATH);
        assert_eq!(seen.content_type.as_deref(), Some("application/json"));
        let sent: Value = serde_json::from_str(&seen.body).unwrap();
        assert_eq!(sent, serde_json::json!({"ticker": "BBAS3.SA", "prompt": "risks"}));
    }

    #[tokio::test]
    async fn submit_surfaces_server_error_body() {
        let stub = serve_once(500, "server error");
        let client = AnalysisClient::new(&stub.base, Some(Duration::from_secs(5)));
        let req = AnalysisRequest::new("AAPL", "risks").unwrap();

        let err = client.submit(&req).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Http { status: 500, .. }));
        assert_eq!(err.to_string(), "server error");
    }

    #[tokio::test]
    async fn submit_plain_text_report() {
        let stub = serve_once(200, "Report text");
        let client = AnalysisClient::new(&stub.base, None);
        let req = AnalysisRequest::new("AAPL", "risks").unwrap();

        let resp = client.submit(&req).await.unwrap();
        assert_eq!(resp.content_markdown, "Report text");
    }

    #[tokio::test]
    async fn submit_network_failure() {
        let client = AnalysisClient::new(&refused_base(), Some(Duration::from_secs(5)));
        let req = AnalysisRequest::new("AAPL", "risks").unwrap();

        let err = client.submit(&req).await.unwrap_err();
        assert!(matches!(err, AnalysisError::Network(_)));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn submit_timeout_is_a_network_failure() {
        let stub = serve_delayed(200, "late report", Duration::from_secs(3));
        let client = AnalysisClient::new(&stub.base, Some(Duration::from_secs(1)));
        let req = AnalysisRequest::new("AAPL", "risks").unwrap();

        let err = client.submit(&req).await.unwrap_err();
        match &err {
            AnalysisError::Network(e) => assert!(e.is_timeout()),
            other => panic!("expected a network failure, got {other:?}"),
        }
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn submit_without_timeout_waits_for_slow_service() {
        let stub = serve_delayed(200, "slow report", Duration::from_millis(1500));
        let client = AnalysisClient::new(&stub.base, None);
        let req = AnalysisRequest::new("AAPL", "risks").unwrap();

        let resp = client.submit(&req).await.unwrap();
        assert_eq!(resp.content_markdown, "slow report");
    }
}
