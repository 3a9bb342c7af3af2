use serde::Serialize;

/// Body of `POST /v1/analyze`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub prompt: String,
}

impl AnalysisRequest {
    /// Build a request from form input. Returns `None` if either field is
    /// blank; anything else is left for the service to judge.
    pub fn new(ticker: &str, prompt: &str) -> Option<Self> {
        let ticker = ticker.trim();
        let prompt = prompt.trim();
        if ticker.is_empty() || prompt.is_empty() {
            return None;
        }
        Some(Self {
            ticker: ticker.to_string(),
            prompt: prompt.to_string(),
        })
    }
}

/// A decoded analysis report. `content_markdown` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub content_markdown: String,
    /// Server-side session id, when the JSON envelope carried one.
    pub session_id: Option<String>,
}

/// Outcome of the startup health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// `{"ok": <truthy>}` came back.
    Reachable,
    /// The service answered, but not with a truthy `ok`.
    Degraded,
    /// No successful answer at all.
    Unreachable,
}

impl HealthStatus {
    pub fn message(&self) -> String {
        match self {
            HealthStatus::Reachable => t!("health.reachable").to_string(),
            HealthStatus::Degraded => t!("health.degraded").to_string(),
            HealthStatus::Unreachable => t!("health.unreachable").to_string(),
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, HealthStatus::Reachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_trims_fields() {
        let req = AnalysisRequest::new("  AAPL ", "\nvaluation\n").unwrap();
        assert_eq!(req.ticker, "AAPL");
        assert_eq!(req.prompt, "valuation");
    }

    #[test]
    fn request_rejects_blank_fields() {
        assert!(AnalysisRequest::new("", "prompt").is_none());
        assert!(AnalysisRequest::new("AAPL", "   ").is_none());
    }

    #[test]
    fn request_serializes_wire_shape() {
        let req = AnalysisRequest::new("BBAS3.SA", "risks").unwrap();
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json, serde_json::json!({"ticker": "BBAS3.SA", "prompt": "risks"}));
    }

    #[test]
    fn health_messages() {
        rust_i18n::set_locale("en");
        assert_eq!(HealthStatus::Reachable.message(), "✅ API reachable");
        assert_eq!(HealthStatus::Degraded.message(), "⚠️ Health check failed");
        assert_eq!(
            HealthStatus::Unreachable.message(),
            "⚠️ Cannot reach API. Check port/CORS/firewall."
        );
    }
}
