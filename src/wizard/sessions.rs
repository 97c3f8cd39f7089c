//! In-memory registry of live wizard sessions, one per visitor.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use super::controller::WizardController;
use crate::config::WizardConfig;
use crate::error::SessionError;
use crate::gateway::SubmissionGateway;

/// How often the background task sweeps for idle sessions.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

struct SessionEntry {
    controller: Arc<WizardController>,
    last_touched: Instant,
}

/// Creates, finds and discards wizard controllers. Nothing is persisted:
/// a restart forgets every session.
pub struct WizardSessions {
    config: WizardConfig,
    gateway: Arc<dyn SubmissionGateway>,
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
}

impl WizardSessions {
    pub fn new(config: WizardConfig, gateway: Arc<dyn SubmissionGateway>) -> Arc<Self> {
        Arc::new(Self {
            config,
            gateway,
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Start a fresh wizard.
    pub async fn start(&self) -> (Uuid, Arc<WizardController>) {
        let id = Uuid::new_v4();
        let controller = Arc::new(WizardController::new(
            self.config.clone(),
            Arc::clone(&self.gateway),
        ));
        self.sessions.write().await.insert(
            id,
            SessionEntry {
                controller: Arc::clone(&controller),
                last_touched: Instant::now(),
            },
        );
        info!(session_id = %id, "Wizard session started");
        (id, controller)
    }

    /// Look up a session and mark it as recently used.
    pub async fn get(&self, id: Uuid) -> Result<Arc<WizardController>, SessionError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        entry.last_touched = Instant::now();
        Ok(Arc::clone(&entry.controller))
    }

    /// Drop a session. An in-flight submission still completes delivery.
    pub async fn discard(&self, id: Uuid) -> Result<(), SessionError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!(session_id = %id, "Wizard session discarded");
                Ok(())
            }
            None => Err(SessionError::NotFound { id }),
        }
    }

    /// Remove every session untouched for at least `ttl`.
    /// Returns the number of sessions removed.
    pub async fn expire_idle(&self, ttl: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, entry| {
            let keep = now.duration_since(entry.last_touched) < ttl;
            if !keep {
                debug!(session_id = %id, "Wizard session expired");
            }
            keep
        });

        let expired = before - sessions.len();
        if expired > 0 {
            info!(count = expired, remaining = sessions.len(), "Expired idle wizard sessions");
        }
        expired
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a background task that periodically expires idle sessions.
pub fn spawn_expiry_task(
    sessions: Arc<WizardSessions>,
    ttl: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            sessions.expire_idle(ttl).await;
        }
    })
}
