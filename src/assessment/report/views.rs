use serde::{Deserialize, Serialize};

use super::super::domain::ReadinessLevel;

/// The exported assessment. Field names are the stable keys written to both
/// JSON and YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub overall_score: f64,
    pub readiness_level: ReadinessLevel,
    pub evidence_availability: f64,
    pub timeline_reconstruction: f64,
    pub playbook_effectiveness: f64,
    pub policy_alignment: f64,
    pub critical_gaps: Vec<String>,
    pub high_priority_gaps: Vec<String>,
    pub medium_priority_gaps: Vec<String>,
    pub recommendations: Vec<String>,
    /// ISO-8601 (RFC 3339) generation time.
    pub timestamp: String,
}

impl AssessmentReport {
    pub fn overall_percent(&self) -> u8 {
        percent(self.overall_score)
    }
}

pub fn percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}
