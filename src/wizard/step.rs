//! Wizard steps: a linear sequence of nine screens.

use serde::{Deserialize, Serialize};

/// Number of steps up to and including the last data-collection step.
pub const TOTAL_DATA_STEPS: u8 = 8;

/// The screens of the wizard, in order.
///
/// Welcome (1) → seven data-collection screens (2–8) → Success (9).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Step {
    #[default]
    Welcome,
    BusinessInfo,
    ContactDetails,
    BusinessDetails,
    CurrentStack,
    AutomationNeeds,
    TimelineBudget,
    Consent,
    Success,
}

/// Which top-level view renders a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Welcome,
    Form,
    Success,
}

impl Step {
    pub const ALL: [Step; 9] = [
        Step::Welcome,
        Step::BusinessInfo,
        Step::ContactDetails,
        Step::BusinessDetails,
        Step::CurrentStack,
        Step::AutomationNeeds,
        Step::TimelineBudget,
        Step::Consent,
        Step::Success,
    ];

    /// 1-based step number.
    pub fn number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_number(number: u8) -> Option<Step> {
        number
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(usize::from(i)).copied())
    }

    /// The following step, if any. Does not consult validity.
    pub fn next(self) -> Option<Step> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, if any.
    pub fn prev(self) -> Option<Step> {
        Self::from_number(self.number() - 1)
    }

    pub fn view(self) -> View {
        match self {
            Step::Welcome => View::Welcome,
            Step::Success => View::Success,
            _ => View::Form,
        }
    }

    pub fn is_data_step(self) -> bool {
        self.view() == View::Form
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Step::Success)
    }

    /// Completion percentage shown in the progress bar, in `[0, 100]`.
    pub fn progress(self) -> f64 {
        progress_fraction(self.number())
    }

    /// "Section N" label for data steps.
    pub fn section(self) -> Option<String> {
        self.is_data_step()
            .then(|| format!("Section {}", self.number() - 1))
    }

    pub fn title(self) -> &'static str {
        match self {
            Step::Welcome => "AI Strategy Assessment",
            Step::BusinessInfo => "Business Info",
            Step::ContactDetails => "Contact Details",
            Step::BusinessDetails => "Business Details",
            Step::CurrentStack => "Current Stack",
            Step::AutomationNeeds => "Automation Needs",
            Step::TimelineBudget => "Timeline & Budget",
            Step::Consent => "Consent Protocol",
            Step::Success => "Thank You.",
        }
    }

    pub fn subtitle(self) -> &'static str {
        match self {
            Step::Welcome => "Evaluate architectural potential and alignment with our professional diagnostic.",
            Step::BusinessInfo => "Defining your organization's core profile.",
            Step::ContactDetails => "Establishing secure communication channels.",
            Step::BusinessDetails => "Quantifying the scale of your operations.",
            Step::CurrentStack => "Tools currently powering your workflow.",
            Step::AutomationNeeds => "Isolating the most critical bottlenecks.",
            Step::TimelineBudget => "Defining your strategic execution window.",
            Step::Consent => "Finalizing your diagnostic report.",
            Step::Success => "Strategic profile secured.",
        }
    }

    /// Label of the forward button on this step.
    pub fn primary_label(self) -> Option<&'static str> {
        match self {
            Step::Welcome => Some("Start Assessment"),
            Step::Consent => Some("Build Report"),
            Step::Success => None,
            _ => Some("Next Step"),
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl Serialize for Step {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let number = u8::deserialize(deserializer)?;
        Step::from_number(number)
            .ok_or_else(|| serde::de::Error::custom(format!("step {number} out of range 1..=9")))
    }
}

/// Progress bar fill for a raw step number: 0 on the welcome screen, 100
/// past the last data step, linear in between.
pub fn progress_fraction(step: u8) -> f64 {
    if step <= 1 {
        0.0
    } else if step > TOTAL_DATA_STEPS {
        100.0
    } else {
        f64::from(step - 1) / f64::from(TOTAL_DATA_STEPS - 1) * 100.0
    }
}
