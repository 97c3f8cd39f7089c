//! WizardController: owns navigation state and form data, gates forward
//! transitions on step validity, and runs the submit protocol.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::model::{FormData, FormDataPatch};
use super::presentation::WizardSnapshot;
use super::step::Step;
use super::validator::StepValidator;
use crate::config::WizardConfig;
use crate::gateway::{SubmissionGateway, SubmissionPayload};

/// Observable wizard state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub step: Step,
    pub form_data: FormData,
    /// True between a successful `submit` and the switch to the success
    /// step. Lets the UI disable the submit button.
    pub submitting: bool,
}

impl WizardState {
    /// Whether the primary button should be enabled. Shared by the
    /// controller and its snapshots.
    pub fn can_advance(&self, validator: &StepValidator) -> bool {
        !self.submitting
            && !self.step.is_terminal()
            && validator.is_valid(self.step, &self.form_data)
    }
}

/// Single source of truth for one visitor's pass through the wizard.
///
/// Every operation holds the state's write lock for its whole duration,
/// so operations are atomic with respect to each other. None of them fail:
/// a transition whose precondition does not hold is a silent no-op.
pub struct WizardController {
    config: WizardConfig,
    validator: StepValidator,
    gateway: Arc<dyn SubmissionGateway>,
    state: Arc<RwLock<WizardState>>,
}

impl WizardController {
    pub fn new(config: WizardConfig, gateway: Arc<dyn SubmissionGateway>) -> Self {
        let validator = StepValidator::new(config.validation);
        Self {
            config,
            validator,
            gateway,
            state: Arc::new(RwLock::new(WizardState::default())),
        }
    }

    pub async fn step(&self) -> Step {
        self.state.read().await.step
    }

    pub async fn form_data(&self) -> FormData {
        self.state.read().await.form_data.clone()
    }

    pub async fn is_submitting(&self) -> bool {
        self.state.read().await.submitting
    }

    pub async fn state(&self) -> WizardState {
        self.state.read().await.clone()
    }

    /// Whether the current step's data satisfies its predicate.
    pub async fn is_current_step_valid(&self) -> bool {
        let state = self.state.read().await;
        self.validator.is_valid(state.step, &state.form_data)
    }

    /// Whether the primary button should be enabled.
    pub async fn can_advance(&self) -> bool {
        self.state.read().await.can_advance(&self.validator)
    }

    /// Read-only view for the presentation layer.
    pub async fn snapshot(&self) -> WizardSnapshot {
        let state = self.state.read().await;
        WizardSnapshot::new(&state, &self.validator)
    }

    /// Move forward one step if the current step is valid. Never moves
    /// past the consent step; that is `submit`'s job.
    ///
    /// Returns whether the step changed.
    pub async fn go_next(&self) -> bool {
        let mut state = self.state.write().await;
        let from = state.step;

        if from >= Step::Consent {
            debug!(step = %from, "go_next refused: no forward step without submit");
            return false;
        }
        if !self.validator.is_valid(from, &state.form_data) {
            debug!(step = %from, "go_next refused: step invalid");
            return false;
        }
        let Some(to) = from.next() else {
            return false;
        };

        state.step = to;
        debug!(from = %from, to = %to, "Wizard advanced");
        true
    }

    /// Move back one step. Never gated by validity.
    ///
    /// Returns whether the step changed.
    pub async fn go_back(&self) -> bool {
        let mut state = self.state.write().await;
        let from = state.step;
        let Some(to) = from.prev() else {
            debug!(step = %from, "go_back refused: already at first step");
            return false;
        };

        state.step = to;
        debug!(from = %from, to = %to, "Wizard went back");
        true
    }

    /// Merge a partial update into the form data. Allowed on any step.
    pub async fn update_field(&self, patch: FormDataPatch) {
        let mut state = self.state.write().await;
        state.form_data.apply(patch);
    }

    /// Add `tool` to the tech stack, or remove it if already selected.
    pub async fn toggle_tech_stack_entry(&self, tool: &str) {
        let mut state = self.state.write().await;
        state.form_data.toggle_tech_stack(tool);
    }

    /// Start the submission if on the consent step with consent given.
    ///
    /// Hands the payload to the gateway without waiting for it, then
    /// switches to the success step after the configured delay whatever
    /// the delivery outcome. Returns the handle of the completion task, or
    /// `None` if the submission was refused.
    pub async fn submit(&self) -> Option<JoinHandle<()>> {
        let payload = {
            let mut state = self.state.write().await;
            if state.step != Step::Consent {
                debug!(step = %state.step, "submit refused: not on consent step");
                return None;
            }
            if state.submitting {
                debug!("submit refused: already submitting");
                return None;
            }
            if !self.validator.is_valid(Step::Consent, &state.form_data) {
                debug!("submit refused: transactional consent missing");
                return None;
            }

            state.submitting = true;
            SubmissionPayload::new(state.form_data.clone(), &self.config.source)
        };

        info!(
            source = %payload.source,
            submitted_at = %payload.submitted_at,
            "Submitting lead"
        );

        let gateway = Arc::clone(&self.gateway);
        tokio::spawn(async move {
            if AssertUnwindSafe(gateway.deliver(payload))
                .catch_unwind()
                .await
                .is_err()
            {
                warn!("Submission gateway panicked during delivery");
            }
        });

        let state = Arc::clone(&self.state);
        let delay = self.config.completion_delay;
        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.write().await;
            state.submitting = false;
            state.step = Step::Success;
            info!("Lead submission complete");
        }))
    }

    /// The forward button: `go_next` before the consent step, `submit` on
    /// it. Returns whether anything happened.
    pub async fn primary_action(&self) -> bool {
        if self.step().await == Step::Consent {
            self.submit().await.is_some()
        } else {
            self.go_next().await
        }
    }
}
