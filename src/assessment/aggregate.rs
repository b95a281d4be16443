use serde::Serialize;

use super::domain::{Domain, DomainResult, ReadinessLevel};

/// Fixed contribution of each domain to the overall score. The weights sum
/// to 1.0 so the overall score stays a convex combination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DomainWeights {
    pub evidence: f64,
    pub playbook: f64,
    pub policy: f64,
    pub scenario: f64,
}

impl DomainWeights {
    pub const STANDARD: Self = Self {
        evidence: 0.30,
        playbook: 0.25,
        policy: 0.25,
        scenario: 0.20,
    };

    pub const fn weight(&self, domain: Domain) -> f64 {
        match domain {
            Domain::Evidence => self.evidence,
            Domain::Playbook => self.playbook,
            Domain::Policy => self.policy,
            Domain::Scenario => self.scenario,
        }
    }

    pub fn total(&self) -> f64 {
        self.evidence + self.playbook + self.policy + self.scenario
    }
}

/// Combines the four domain results into the overall score and its
/// readiness level.
pub fn aggregate(
    evidence: &DomainResult,
    playbook: &DomainResult,
    policy: &DomainResult,
    scenario: &DomainResult,
) -> (f64, ReadinessLevel) {
    let overall = weighted_score(evidence.score, playbook.score, policy.score, scenario.score);
    (overall, ReadinessLevel::from_score(overall))
}

pub fn weighted_score(evidence: f64, playbook: f64, policy: f64, scenario: f64) -> f64 {
    let weights = DomainWeights::STANDARD;
    weights.evidence * evidence
        + weights.playbook * playbook
        + weights.policy * policy
        + weights.scenario * scenario
}
