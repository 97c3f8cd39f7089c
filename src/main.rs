use std::sync::Arc;

use lead_wizard::config::{ServerConfig, WebhookConfig, WizardConfig};
use lead_wizard::error::{ConfigError, Result};
use lead_wizard::gateway::{LogGateway, SubmissionGateway, WebhookGateway};
use lead_wizard::wizard::{WizardRouteState, WizardSessions, spawn_expiry_task, wizard_routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let wizard_config = WizardConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    eprintln!("📋 Lead Wizard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Source tag: {}", wizard_config.source);
    eprintln!(
        "   Completion delay: {}ms",
        wizard_config.completion_delay.as_millis()
    );
    eprintln!("   Validation: {:?}", wizard_config.validation);
    eprintln!("   Session TTL: {}s", server_config.session_ttl.as_secs());

    let gateway = build_gateway()?;

    // ── HTTP API ────────────────────────────────────────────────────────
    let sessions = WizardSessions::new(wizard_config, gateway);
    let _expiry_handle = spawn_expiry_task(Arc::clone(&sessions), server_config.session_ttl);
    let app = wizard_routes(WizardRouteState { sessions });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", server_config.port)).await?;
    eprintln!("   API: http://0.0.0.0:{}/api/wizard\n", server_config.port);
    tracing::info!(port = server_config.port, "Lead wizard server started");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Webhook gateway when a URL is configured, log-only otherwise.
fn build_gateway() -> Result<Arc<dyn SubmissionGateway>> {
    match WebhookConfig::from_env() {
        Ok(webhook) => {
            eprintln!("   Webhook: enabled (timeout {}s)", webhook.timeout.as_secs());
            Ok(Arc::new(WebhookGateway::new(&webhook)?))
        }
        Err(ConfigError::MissingEnvVar(var)) => {
            eprintln!("   Webhook: disabled ({var} not set, leads are only logged)");
            Ok(Arc::new(LogGateway))
        }
        Err(e) => Err(e.into()),
    }
}
