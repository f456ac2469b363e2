//! `/health` endpoint.

use serde::Serialize;
use std::time::Instant;

/// Health check response body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the store answers, `"degraded"` otherwise.
    pub status: String,
    /// Seconds since the server started.
    pub uptime_secs: u64,
    /// Number of stored lists, when the store answers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lists: Option<u64>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == "ok"
    }
}

pub fn health_check(start_time: Instant, lists: Option<u64>) -> HealthResponse {
    HealthResponse {
        status: if lists.is_some() { "ok" } else { "degraded" }.into(),
        uptime_secs: start_time.elapsed().as_secs(),
        lists,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_when_store_answers() {
        let resp = health_check(Instant::now(), Some(2));
        assert!(resp.is_healthy());
        assert_eq!(resp.lists, Some(2));
        assert!(resp.uptime_secs < 2);
    }

    #[test]
    fn degraded_without_store() {
        let resp = health_check(Instant::now(), None);
        assert_eq!(resp.status, "degraded");
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("lists").is_none());
    }
}
