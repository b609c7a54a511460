//! Response DTOs for the API.
//!
//! Entity endpoints return the model types directly; only the operational
//! endpoints have their own shapes.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Database connectivity check response.
#[derive(Debug, Clone, Serialize)]
pub struct DbStatusResponse {
    /// `ok` or `error`.
    pub status: String,
    /// Human-readable detail.
    pub message: String,
}

impl DbStatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
        }
    }
}
