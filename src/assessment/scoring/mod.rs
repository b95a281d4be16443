//! Domain scorers. Each one is a pure function of its answers and a fixed
//! rule table; none of them share state, so they can run in any order.

mod evidence;
mod playbook;
mod policy;
pub(crate) mod rules;
mod scenario;

pub use evidence::EvidenceScorer;
pub use playbook::PlaybookScorer;
pub use policy::PolicyScorer;
pub use scenario::{CapabilityInventory, ScenarioScorer};

/// Answer validation failures. Both are recoverable by re-asking the question.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error("missing required answer '{field}'")]
    MissingInput { field: String },
    #[error("invalid answer for '{field}': {reason}")]
    InvalidAnswer { field: String, reason: String },
}

impl ScoringError {
    pub(crate) fn missing(scope: &str, field: &str) -> Self {
        Self::MissingInput {
            field: scoped(scope, field),
        }
    }

    pub(crate) fn invalid(scope: &str, field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidAnswer {
            field: scoped(scope, field),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::MissingInput { field } | Self::InvalidAnswer { field, .. } => field,
        }
    }
}

fn scoped(scope: &str, field: &str) -> String {
    if scope.is_empty() {
        field.to_string()
    } else {
        format!("{scope}.{field}")
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Case-insensitive containment used to match inventoried names against
/// catalog requirements ("EDR" matches "CrowdStrike EDR").
pub(crate) fn name_covers(inventoried: &str, required: &str) -> bool {
    inventoried
        .to_lowercase()
        .contains(&required.trim().to_lowercase())
}
