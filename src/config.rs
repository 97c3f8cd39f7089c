//! Configuration types.
//!
//! The webhook URL, completion delay and source tag are passed in at
//! construction time, usually read from the environment.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::wizard::validator::ValidationMode;

/// Source tag attached to every submitted payload unless overridden.
pub const DEFAULT_SOURCE: &str = "Creative CRM Pro";

/// Delay between starting a submission and showing the success step.
pub const DEFAULT_COMPLETION_DELAY: Duration = Duration::from_millis(2000);

/// Wizard behaviour configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Fixed string identifying the originating form/brand.
    pub source: String,
    /// How long `submit` waits before flipping to the success step.
    pub completion_delay: Duration,
    /// Strictness of the contact/business-info checks.
    pub validation: ValidationMode,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            completion_delay: DEFAULT_COMPLETION_DELAY,
            validation: ValidationMode::default(),
        }
    }
}

impl WizardConfig {
    /// Load from `LEAD_WIZARD_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let source = std::env::var("LEAD_WIZARD_SOURCE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.source);

        let completion_delay = match std::env::var("LEAD_WIZARD_COMPLETION_DELAY_MS") {
            Ok(raw) => Duration::from_millis(parse_value("LEAD_WIZARD_COMPLETION_DELAY_MS", &raw)?),
            Err(_) => defaults.completion_delay,
        };

        let validation = match std::env::var("LEAD_WIZARD_VALIDATION") {
            Ok(raw) => raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: "LEAD_WIZARD_VALIDATION".to_string(),
                message,
            })?,
            Err(_) => defaults.validation,
        };

        Ok(Self {
            source,
            completion_delay,
            validation,
        })
    }
}

/// Outbound webhook configuration.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Target URL. Treated as a secret: webhook URLs usually embed an
    /// unguessable token.
    pub url: SecretString,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl WebhookConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: SecretString::from(url.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let url = std::env::var("LEAD_WIZARD_WEBHOOK_URL")
            .map_err(|_| ConfigError::MissingEnvVar("LEAD_WIZARD_WEBHOOK_URL".to_string()))?;

        let timeout = match std::env::var("LEAD_WIZARD_WEBHOOK_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(parse_value("LEAD_WIZARD_WEBHOOK_TIMEOUT_SECS", &raw)?),
            Err(_) => Duration::from_secs(10),
        };

        Ok(Self {
            url: SecretString::from(url),
            timeout,
        })
    }
}

/// Idle sessions older than this are dropped by the expiry sweep.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60);

/// HTTP shell configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// How long a session may go untouched before it is expired.
    pub session_ttl: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            session_ttl: DEFAULT_SESSION_TTL,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match std::env::var("LEAD_WIZARD_PORT") {
            Ok(raw) => parse_value("LEAD_WIZARD_PORT", &raw)?,
            Err(_) => defaults.port,
        };

        let session_ttl = match std::env::var("LEAD_WIZARD_SESSION_TTL_SECS") {
            Ok(raw) => {
                let secs: u64 = parse_value("LEAD_WIZARD_SESSION_TTL_SECS", &raw)?;
                if secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        key: "LEAD_WIZARD_SESSION_TTL_SECS".to_string(),
                        message: "must be at least 1 second".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            Err(_) => defaults.session_ttl,
        };

        Ok(Self { port, session_ttl })
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("{raw:?}: {e}"),
        })
}
