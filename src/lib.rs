//! Lead Wizard: multi-step lead qualification with webhook hand-off.

pub mod config;
pub mod error;
pub mod gateway;
pub mod wizard;
