//! Closed option sets offered by the wizard's dropdowns and toggles.
//!
//! The closed sets are real enums. Their display label doubles as the wire
//! value so submitted payloads read the same as what the visitor picked.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A closed set of labelled options.
pub trait Choice: Sized + Copy + PartialEq + 'static {
    /// Every option, in presentation order.
    fn all() -> &'static [Self];

    /// Display label (also the serialized value).
    fn label(&self) -> &'static str;

    /// Look up an option by label. Surrounding whitespace is ignored.
    fn from_label(label: &str) -> Option<Self>;

    /// All labels, in presentation order.
    fn labels() -> Vec<&'static str> {
        Self::all().iter().map(Choice::label).collect()
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $variant:ident => $label:literal $(| $alias:literal)* ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant ),+
        }

        impl Choice for $name {
            fn all() -> &'static [Self] {
                &[$( Self::$variant ),+]
            }

            fn label(&self) -> &'static str {
                match self {
                    $( Self::$variant => $label ),+
                }
            }

            fn from_label(label: &str) -> Option<Self> {
                let label = label.trim();
                $(
                    if label == $label $( || label == $alias )* {
                        return Some(Self::$variant);
                    }
                )+
                None
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::from_label(&raw).ok_or_else(|| {
                    serde::de::Error::custom(format!(
                        "unknown {} option {:?}",
                        stringify!($name),
                        raw
                    ))
                })
            }
        }
    };
}

choice_enum! {
    /// Role of the person filling in the form.
    JobTitle {
        FounderOwner => "Founder / Owner",
        Director => "Director",
        OperationsManager => "Operations Manager",
        SalesManager => "Sales Manager",
        MarketingManager => "Marketing Manager",
        Other => "Other",
    }
}

choice_enum! {
    /// Headcount bracket.
    CompanySize {
        Solo => "Solo / Freelancer",
        SmallTeam => "Small Team (2–10)",
        GrowingBusiness => "Growing Business (11–50)",
        MidSize => "Mid-size (51–200)",
        Enterprise => "Enterprise (200+)",
    }
}

choice_enum! {
    /// Monthly revenue bracket (AUD).
    MonthlyRevenue {
        JustStarting => "Just Starting (< $10k)",
        EarlyStage => "Early Stage ($10k–$50k)",
        Growing => "Growing ($50k–$200k)",
        Established => "Established ($200k–$1M)",
        Scaled => "Scaled ($1M+)",
    }
}

choice_enum! {
    /// When the lead wants something running. The short labels are older
    /// wording still accepted on input.
    ImplementationTimeline {
        Urgent => "Urgent – Need solution this month" | "Urgent – This month",
        Soon => "Soon – Within 1–2 months" | "Soon – 1–2 months",
        Planning => "Planning – 3–6 months",
        Exploring => "Exploring – Just researching",
    }
}

choice_enum! {
    /// Budget bracket (AUD).
    BudgetRange {
        Testing => "Testing Phase ($500 – $2,000)",
        Starter => "Starter Investment ($2,000 – $5,000)",
        Serious => "Serious Implementation ($5,000 – $15,000)",
        Enterprise => "Enterprise Solution ($15,000+)",
        NotSure => "Not sure – depends on ROI",
    }
}

/// Tools presented on the current-stack step.
pub const TECH_STACK_OPTIONS: &[&str] = &[
    "CRM (HubSpot, Salesforce, etc)",
    "Email Marketing (Mailchimp, ActiveCampaign, etc)",
    "WhatsApp Business",
    "Google Sheets / Excel",
    "Zapier / Make",
    "None – Manual Process",
    "Other",
];

/// Pain points presented on the automation-needs step.
pub const PAIN_POINT_OPTIONS: &[&str] = &[
    "Lead follow-up takes too long",
    "Manual data entry killing productivity",
    "Losing leads due to slow response",
    "Customer support overwhelming team",
    "Repetitive admin work",
    "Scaling without hiring more staff",
];

/// First-automation targets presented on the automation-needs step.
pub const AUTOMATION_TARGET_OPTIONS: &[&str] = &[
    "Lead capture & follow-up",
    "Sales pipeline & CRM",
    "Customer onboarding",
    "Customer support",
    "Invoicing & payments",
    "Internal workflows",
];

/// Every option list the front end needs to render the form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionCatalog {
    pub job_titles: Vec<&'static str>,
    pub company_sizes: Vec<&'static str>,
    pub revenues: Vec<&'static str>,
    pub tech_stack: Vec<&'static str>,
    pub pain_points: Vec<&'static str>,
    pub automation_targets: Vec<&'static str>,
    pub timelines: Vec<&'static str>,
    pub budgets: Vec<&'static str>,
}

impl OptionCatalog {
    pub fn new() -> Self {
        Self {
            job_titles: JobTitle::labels(),
            company_sizes: CompanySize::labels(),
            revenues: MonthlyRevenue::labels(),
            tech_stack: TECH_STACK_OPTIONS.to_vec(),
            pain_points: PAIN_POINT_OPTIONS.to_vec(),
            automation_targets: AUTOMATION_TARGET_OPTIONS.to_vec(),
            timelines: ImplementationTimeline::labels(),
            budgets: BudgetRange::labels(),
        }
    }
}

impl Default for OptionCatalog {
    fn default() -> Self {
        Self::new()
    }
}

/// Serde adapter for `Option<impl Choice>` fields: unset travels as `""`,
/// matching the payload shape downstream automations already parse.
pub mod unset_as_empty {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Choice;

    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Choice,
    {
        serializer.serialize_str(value.as_ref().map(Choice::label).unwrap_or(""))
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Choice,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(label) => T::from_label(label)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown option {label:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_sets_have_expected_sizes() {
        assert_eq!(JobTitle::all().len(), 6);
        assert_eq!(CompanySize::all().len(), 5);
        assert_eq!(MonthlyRevenue::all().len(), 5);
        assert_eq!(ImplementationTimeline::all().len(), 4);
        assert_eq!(BudgetRange::all().len(), 5);
    }

    #[test]
    fn from_label_is_exact_apart_from_whitespace() {
        assert_eq!(JobTitle::from_label(" Director "), Some(JobTitle::Director));
        assert_eq!(JobTitle::from_label("director"), None);
        assert_eq!(JobTitle::from_label(""), None);
    }

    #[test]
    fn every_label_maps_back_to_its_variant() {
        for size in CompanySize::all() {
            assert_eq!(CompanySize::from_label(size.label()), Some(*size));
        }
        for budget in BudgetRange::all() {
            assert_eq!(BudgetRange::from_label(budget.label()), Some(*budget));
        }
    }

    #[test]
    fn timeline_accepts_short_aliases() {
        assert_eq!(
            ImplementationTimeline::from_label("Urgent – This month"),
            Some(ImplementationTimeline::Urgent)
        );
        assert_eq!(
            ImplementationTimeline::from_label("Soon – 1–2 months"),
            Some(ImplementationTimeline::Soon)
        );
        // Serialization always uses the canonical label.
        assert_eq!(
            ImplementationTimeline::Urgent.label(),
            "Urgent – Need solution this month"
        );
    }

    #[test]
    fn serde_uses_labels() {
        let json = serde_json::to_string(&MonthlyRevenue::Growing).unwrap();
        assert_eq!(json, "\"Growing ($50k–$200k)\"");

        let parsed: CompanySize = serde_json::from_str("\"Small Team (2–10)\"").unwrap();
        assert_eq!(parsed, CompanySize::SmallTeam);

        let err = serde_json::from_str::<CompanySize>("\"Huge\"").unwrap_err();
        assert!(err.to_string().contains("CompanySize"));
    }

    #[test]
    fn catalog_lists_every_presented_option() {
        let catalog = OptionCatalog::new();
        assert_eq!(catalog.job_titles[0], "Founder / Owner");
        assert_eq!(catalog.tech_stack.len(), 7);
        assert_eq!(catalog.pain_points.len(), 6);
        assert_eq!(catalog.automation_targets.len(), 6);

        let json = serde_json::to_value(&catalog).unwrap();
        assert!(json.get("companySizes").is_some());
        assert!(json.get("automationTargets").is_some());
    }
}
