use serde::Serialize;
use std::future::Future;
use std::time::Instant;

use super::DatabaseError;

/// Outcome of a single dependency probe, as reported by readiness endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub response_time_ms: u64,
}

impl HealthStatus {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            healthy: true,
            message: None,
            response_time_ms,
        }
    }

    pub fn unhealthy(message: impl Into<String>, response_time_ms: u64) -> Self {
        Self {
            healthy: false,
            message: Some(message.into()),
            response_time_ms,
        }
    }

    /// Run `probe` and record how long it took.
    pub async fn measure<F>(probe: F) -> Self
    where
        F: Future<Output = Result<(), DatabaseError>>,
    {
        let start = Instant::now();
        let outcome = probe.await;
        let elapsed = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(()) => Self::healthy(elapsed),
            Err(e) => Self::unhealthy(e.to_string(), elapsed),
        }
    }
}
