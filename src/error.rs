//! Error types for the lead wizard.
//!
//! The wizard core itself never fails: refused transitions are no-ops.
//! These types cover the surrounding shell (configuration, webhook
//! delivery, session lookup).

use std::time::Duration;

use uuid::Uuid;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Webhook delivery errors. These never leave the gateway; they exist so
/// the gateway can log a precise reason.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Webhook request failed: {0}")]
    RequestFailed(String),

    #[error("Webhook timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    #[error("Webhook rejected payload with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

/// Wizard session lookup errors (HTTP shell).
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Wizard session {id} not found")]
    NotFound { id: Uuid },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
