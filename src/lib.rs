//! Incident Readiness & Response Evaluator.
//!
//! Scores an organization's ability to investigate and respond to security
//! incidents from structured questionnaire answers, then reports prioritized
//! gaps and recommendations.

pub mod assessment;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod interview;
pub mod inventory;
pub mod render;
pub mod telemetry;

pub use cli::run;
