//! One-shot reachability probe against `GET /v1/health`.
//!
//! Every failure path resolves to a [`HealthStatus`]; nothing here returns
//! an error or panics, so the caller can fire it and forget it.

use std::time::Duration;

use reqwest::header::{CACHE_CONTROL, PRAGMA};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

use super::models::HealthStatus;
use crate::constants::HEALTH_PATH;

/// Client for the health endpoint.
#[derive(Debug, Clone)]
pub struct HealthProber {
    client: Client,
    health_url: String,
}

impl HealthProber {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            health_url: format!("{}{}", base_url, HEALTH_PATH),
        }
    }

    /// Probe once, bypassing any intermediate cache.
    pub async fn probe(&self) -> HealthStatus {
        let response = match self
            .client
            .get(&self.health_url)
            .header(CACHE_CONTROL, "no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                debug!(url = %self.health_url, error = %e, "health probe could not connect");
                return HealthStatus::Unreachable;
            }
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => classify(status, &body),
            Err(e) => {
                debug!(error = %e, "health probe body could not be read");
                HealthStatus::Unreachable
            }
        }
    }
}

/// Spawn the probe as a detached task; its status arrives on `tx`.
pub fn spawn_probe(prober: HealthProber, tx: mpsc::UnboundedSender<HealthStatus>) {
    tokio::spawn(async move {
        let status = prober.probe().await;
        debug!(?status, "health probe settled");
        let _ = tx.send(status);
    });
}

/// Map a health response to a status.
pub fn classify(status: StatusCode, body: &str) -> HealthStatus {
    if !status.is_success() {
        return HealthStatus::Unreachable;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) if map.get("ok").is_some_and(is_truthy) => HealthStatus::Reachable,
        Ok(_) => HealthStatus::Degraded,
        Err(e) => {
            debug!(error = %e, "health body is not JSON");
            HealthStatus::Degraded
        }
    }
}

/// JSON truthiness: `false`, `null`, `0` and `""` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
