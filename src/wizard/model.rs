//! Lead form data and the partial patches that update it.

use serde::{Deserialize, Deserializer, Serialize};

use super::choices::{
    BudgetRange, Choice, CompanySize, ImplementationTimeline, JobTitle, MonthlyRevenue,
    unset_as_empty,
};

/// Everything the wizard collects.
///
/// Created with defaults when a wizard starts and only ever changed
/// through [`FormData::apply`]. Field names serialize in camelCase because
/// this struct is also the body of the outbound payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormData {
    pub company_name: String,
    pub user_name: String,
    #[serde(with = "unset_as_empty")]
    pub job_title: Option<JobTitle>,
    pub email: String,
    pub phone: String,
    pub website: String,
    #[serde(with = "unset_as_empty")]
    pub company_size: Option<CompanySize>,
    #[serde(with = "unset_as_empty")]
    pub revenue: Option<MonthlyRevenue>,
    /// Selected tools, in the order they were toggled on. Never contains
    /// duplicates.
    pub tech_stack: Vec<String>,
    pub primary_pain_point: String,
    pub first_automation_target: String,
    #[serde(with = "unset_as_empty")]
    pub timeline: Option<ImplementationTimeline>,
    #[serde(with = "unset_as_empty")]
    pub budget: Option<BudgetRange>,
    pub consent_transactional: bool,
    pub consent_marketing: bool,
}

impl FormData {
    /// Shallow-merge a patch: fields present in the patch overwrite, absent
    /// fields are left alone.
    pub fn apply(&mut self, patch: FormDataPatch) {
        let FormDataPatch {
            company_name,
            user_name,
            job_title,
            email,
            phone,
            website,
            company_size,
            revenue,
            tech_stack,
            primary_pain_point,
            first_automation_target,
            timeline,
            budget,
            consent_transactional,
            consent_marketing,
        } = patch;

        overwrite(&mut self.company_name, company_name);
        overwrite(&mut self.user_name, user_name);
        overwrite(&mut self.job_title, job_title);
        overwrite(&mut self.email, email);
        overwrite(&mut self.phone, phone);
        overwrite(&mut self.website, website);
        overwrite(&mut self.company_size, company_size);
        overwrite(&mut self.revenue, revenue);
        if let Some(tools) = tech_stack {
            self.tech_stack = dedup_preserving_order(tools);
        }
        overwrite(&mut self.primary_pain_point, primary_pain_point);
        overwrite(&mut self.first_automation_target, first_automation_target);
        overwrite(&mut self.timeline, timeline);
        overwrite(&mut self.budget, budget);
        overwrite(&mut self.consent_transactional, consent_transactional);
        overwrite(&mut self.consent_marketing, consent_marketing);
    }

    /// Add `tool` to the tech stack if absent, remove it if present.
    pub fn toggle_tech_stack(&mut self, tool: &str) {
        if self.tech_stack.iter().any(|t| t == tool) {
            self.tech_stack.retain(|t| t != tool);
        } else {
            self.tech_stack.push(tool.to_string());
        }
    }

    /// Name used to greet the lead on the success screen: the first word
    /// of their name, or a neutral fallback.
    pub fn greeting_name(&self) -> &str {
        self.user_name.split_whitespace().next().unwrap_or("Executive")
    }
}

fn overwrite<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn dedup_preserving_order(tools: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tools.len());
    for tool in tools {
        if !out.contains(&tool) {
            out.push(tool);
        }
    }
    out
}

/// A partial update to [`FormData`]. `None` means "leave as is".
///
/// For the enumerated fields the inner `Option` is the value itself, so
/// `Some(None)` clears a selection (sent as `""` over JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FormDataPatch {
    pub company_name: Option<String>,
    pub user_name: Option<String>,
    #[serde(deserialize_with = "patch_choice")]
    pub job_title: Option<Option<JobTitle>>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    #[serde(deserialize_with = "patch_choice")]
    pub company_size: Option<Option<CompanySize>>,
    #[serde(deserialize_with = "patch_choice")]
    pub revenue: Option<Option<MonthlyRevenue>>,
    pub tech_stack: Option<Vec<String>>,
    pub primary_pain_point: Option<String>,
    pub first_automation_target: Option<String>,
    #[serde(deserialize_with = "patch_choice")]
    pub timeline: Option<Option<ImplementationTimeline>>,
    #[serde(deserialize_with = "patch_choice")]
    pub budget: Option<Option<BudgetRange>>,
    pub consent_transactional: Option<bool>,
    pub consent_marketing: Option<bool>,
}

fn patch_choice<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    unset_as_empty::deserialize(deserializer).map(Some)
}

impl FormDataPatch {
    pub fn company_name(mut self, value: impl Into<String>) -> Self {
        self.company_name = Some(value.into());
        self
    }

    pub fn user_name(mut self, value: impl Into<String>) -> Self {
        self.user_name = Some(value.into());
        self
    }

    pub fn job_title(mut self, value: JobTitle) -> Self {
        self.job_title = Some(Some(value));
        self
    }

    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    pub fn website(mut self, value: impl Into<String>) -> Self {
        self.website = Some(value.into());
        self
    }

    pub fn company_size(mut self, value: CompanySize) -> Self {
        self.company_size = Some(Some(value));
        self
    }

    pub fn revenue(mut self, value: MonthlyRevenue) -> Self {
        self.revenue = Some(Some(value));
        self
    }

    pub fn tech_stack<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tech_stack = Some(tools.into_iter().map(Into::into).collect());
        self
    }

    pub fn primary_pain_point(mut self, value: impl Into<String>) -> Self {
        self.primary_pain_point = Some(value.into());
        self
    }

    pub fn first_automation_target(mut self, value: impl Into<String>) -> Self {
        self.first_automation_target = Some(value.into());
        self
    }

    pub fn timeline(mut self, value: ImplementationTimeline) -> Self {
        self.timeline = Some(Some(value));
        self
    }

    pub fn budget(mut self, value: BudgetRange) -> Self {
        self.budget = Some(Some(value));
        self
    }

    pub fn consent_transactional(mut self, value: bool) -> Self {
        self.consent_transactional = Some(value);
        self
    }

    pub fn consent_marketing(mut self, value: bool) -> Self {
        self.consent_marketing = Some(value);
        self
    }
}
