//! Lead-qualification wizard: a linear nine-screen flow.
//!
//! The controller owns the step and the collected form data, consults the
//! validator before every forward move, and on the consent step hands the
//! finished lead to a submission gateway before showing the success
//! screen. Rendering is left to whoever reads the snapshots.

pub mod choices;
pub mod controller;
pub mod model;
pub mod presentation;
pub mod routes;
pub mod sessions;
pub mod step;
pub mod validator;

pub use choices::{
    BudgetRange, Choice, CompanySize, ImplementationTimeline, JobTitle, MonthlyRevenue,
    OptionCatalog,
};
pub use controller::{WizardController, WizardState};
pub use model::{FormData, FormDataPatch};
pub use presentation::WizardSnapshot;
pub use routes::{WizardRouteState, wizard_routes};
pub use sessions::{WizardSessions, spawn_expiry_task};
pub use step::{Step, View, progress_fraction};
pub use validator::{StepValidator, ValidationMode, is_valid};
