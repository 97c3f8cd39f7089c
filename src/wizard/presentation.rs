//! Read-only view of a wizard for whatever renders it.

use serde::Serialize;

use super::controller::WizardState;
use super::model::FormData;
use super::step::{Step, View};
use super::validator::StepValidator;

/// Everything a front end needs to draw the current screen.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub step: Step,
    pub view: View,
    /// Progress bar fill, 0–100.
    pub progress: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub title: &'static str,
    pub subtitle: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_label: Option<&'static str>,
    /// The progress bar only shows on data-collection steps.
    pub show_progress: bool,
    pub can_advance: bool,
    pub can_go_back: bool,
    pub submitting: bool,
    pub greeting_name: String,
    pub form_data: FormData,
}

impl WizardSnapshot {
    pub fn new(state: &WizardState, validator: &StepValidator) -> Self {
        let step = state.step;
        Self {
            step,
            view: step.view(),
            progress: step.progress(),
            section: step.section(),
            title: step.title(),
            subtitle: step.subtitle(),
            primary_label: step.primary_label(),
            show_progress: step.is_data_step(),
            can_advance: state.can_advance(validator),
            can_go_back: step.prev().is_some(),
            submitting: state.submitting,
            greeting_name: state.form_data.greeting_name().to_string(),
            form_data: state.form_data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::validator::ValidationMode;

    fn snapshot(state: &WizardState) -> WizardSnapshot {
        WizardSnapshot::new(state, &StepValidator::new(ValidationMode::Strict))
    }

    #[test]
    fn welcome_snapshot() {
        let snap = snapshot(&WizardState::default());
        assert_eq!(snap.view, View::Welcome);
        assert_eq!(snap.progress, 0.0);
        assert!(!snap.show_progress);
        assert!(snap.can_advance);
        assert!(!snap.can_go_back);
        assert_eq!(snap.greeting_name, "Executive");
    }

    #[test]
    fn blank_data_step_cannot_advance() {
        let state = WizardState {
            step: Step::BusinessInfo,
            ..Default::default()
        };
        let snap = snapshot(&state);
        assert_eq!(snap.view, View::Form);
        assert!(snap.show_progress);
        assert!(!snap.can_advance);
        assert!(snap.can_go_back);
        assert_eq!(snap.section.as_deref(), Some("Section 1"));
    }

    #[test]
    fn submitting_disables_advance() {
        let mut state = WizardState {
            step: Step::Consent,
            submitting: true,
            ..Default::default()
        };
        state.form_data.consent_transactional = true;
        assert!(!snapshot(&state).can_advance);
        state.submitting = false;
        assert!(snapshot(&state).can_advance);
    }

    #[test]
    fn success_snapshot_serializes() {
        let mut state = WizardState {
            step: Step::Success,
            ..Default::default()
        };
        state.form_data.user_name = "Jo Lee".to_string();

        let json = serde_json::to_value(snapshot(&state)).unwrap();
        assert_eq!(json["step"], 9);
        assert_eq!(json["view"], "success");
        assert_eq!(json["progress"], 100.0);
        assert_eq!(json["canAdvance"], false);
        assert_eq!(json["greetingName"], "Jo");
        assert!(json.get("primaryLabel").is_none());
        assert_eq!(json["formData"]["userName"], "Jo Lee");
    }
}
