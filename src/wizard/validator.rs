//! Per-step validity predicates.
//!
//! Validation gates forward navigation only. An invalid step is a normal
//! state (the forward button is disabled), never an error.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::FormData;
use super::step::Step;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("email pattern compiles")
});

static PHONE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s().\-]+$").expect("phone pattern compiles"));

const MIN_EMAIL_LEN: usize = 6;
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;
const LOOSE_MIN_PHONE_LEN: usize = 6;

/// How strictly free-text and contact fields are checked.
///
/// One mode applies to every free-text field so no two steps disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Trimmed text, email shape + minimum length, 7–15 phone digits.
    #[default]
    Strict,
    /// Non-empty text, email contains `@`, phone longer than five chars.
    Loose,
}

impl std::str::FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "loose" => Ok(Self::Loose),
            other => Err(format!("expected \"strict\" or \"loose\", got {other:?}")),
        }
    }
}

/// Stateless validator bound to a strictness mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepValidator {
    mode: ValidationMode,
}

impl StepValidator {
    pub fn new(mode: ValidationMode) -> Self {
        Self { mode }
    }

    /// Whether `data` satisfies the predicate of `step`. Welcome and
    /// Success have no predicate.
    pub fn is_valid(&self, step: Step, data: &FormData) -> bool {
        match step {
            Step::Welcome | Step::Success => true,
            Step::BusinessInfo => {
                self.filled(&data.company_name)
                    && self.filled(&data.user_name)
                    && data.job_title.is_some()
            }
            Step::ContactDetails => self.email_ok(&data.email) && self.phone_ok(&data.phone),
            Step::BusinessDetails => data.company_size.is_some() && data.revenue.is_some(),
            Step::CurrentStack => !data.tech_stack.is_empty(),
            Step::AutomationNeeds => {
                self.filled(&data.primary_pain_point)
                    && self.filled(&data.first_automation_target)
            }
            Step::TimelineBudget => data.timeline.is_some() && data.budget.is_some(),
            Step::Consent => data.consent_transactional,
        }
    }

    fn filled(&self, value: &str) -> bool {
        match self.mode {
            ValidationMode::Strict => !value.trim().is_empty(),
            ValidationMode::Loose => !value.is_empty(),
        }
    }

    fn email_ok(&self, email: &str) -> bool {
        match self.mode {
            ValidationMode::Strict => {
                let email = email.trim();
                email.chars().count() >= MIN_EMAIL_LEN && EMAIL_SHAPE.is_match(email)
            }
            ValidationMode::Loose => email.contains('@'),
        }
    }

    fn phone_ok(&self, phone: &str) -> bool {
        match self.mode {
            ValidationMode::Strict => {
                let phone = phone.trim();
                let digits = phone.chars().filter(char::is_ascii_digit).count();
                PHONE_DIGITS.contains(&digits) && PHONE_SHAPE.is_match(phone)
            }
            ValidationMode::Loose => phone.chars().count() >= LOOSE_MIN_PHONE_LEN,
        }
    }
}

/// Validate a raw step number with the given mode. Numbers outside 1–9
/// have no predicate.
pub fn is_valid(step: u8, data: &FormData, mode: ValidationMode) -> bool {
    match Step::from_number(step) {
        Some(step) => StepValidator::new(mode).is_valid(step, data),
        None => true,
    }
}
