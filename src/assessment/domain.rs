use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment areas, declared in their reporting priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Evidence,
    Playbook,
    Policy,
    Scenario,
}

impl Domain {
    pub const fn ordered() -> [Self; 4] {
        [Self::Evidence, Self::Playbook, Self::Policy, Self::Scenario]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Evidence => "Evidence Availability",
            Self::Playbook => "Playbook Effectiveness",
            Self::Policy => "Policy Alignment",
            Self::Scenario => "Timeline Reconstruction",
        }
    }

    pub(crate) const fn rank(self) -> u8 {
        match self {
            Self::Evidence => 0,
            Self::Playbook => 1,
            Self::Policy => 2,
            Self::Scenario => 3,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
}

impl Severity {
    pub const fn ordered() -> [Self; 3] {
        [Self::Critical, Self::High, Self::Medium]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Medium => "Medium",
        }
    }
}

/// Response-delay categories attached to policy and tooling bottlenecks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bottleneck {
    AutomationGap,
    ApprovalDelay,
    ToolFragmentation,
    ExpertiseGap,
    CoordinationOverhead,
}

impl Bottleneck {
    pub const fn label(self) -> &'static str {
        match self {
            Self::AutomationGap => "automation-gap",
            Self::ApprovalDelay => "approval-delay",
            Self::ToolFragmentation => "tool-fragmentation",
            Self::ExpertiseGap => "expertise-gap",
            Self::CoordinationOverhead => "coordination-overhead",
        }
    }
}

/// The rule that produced an issue. Recommendations are keyed on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    MissingCriticalSource,
    SourceUnavailable,
    InsufficientRetention,
    TimestampDrift,
    LowVolume,
    LowEvidenceCoverage,
    MissingPlaybook,
    AmbiguousSteps,
    InfeasibleProcedure,
    IncompletePlaybook,
    UnrealisticAssumptions,
    WeakPlaybooks,
    PolicyImmaturity,
    UnclearEscalation,
    UndefinedCommunication,
    WeakPolicies,
    Bottleneck(Bottleneck),
    MissingScenarioLogs,
    MissingScenarioPlaybook,
    LimitedScenarioReadiness,
    NoScenarios,
}

/// A deficiency detected by a domain scorer. Severity is fixed by the rule
/// that emitted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub text: String,
    pub severity: Severity,
    pub domain: Domain,
    pub category: IssueCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainResult {
    pub domain: Domain,
    pub score: f64,
    pub issues: Vec<Issue>,
}

impl DomainResult {
    pub(crate) fn new(domain: Domain, score: f64, issues: Vec<Issue>) -> Self {
        Self {
            domain,
            score: score.clamp(0.0, 1.0),
            issues,
        }
    }

    pub fn issues_with(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(move |issue| issue.severity == severity)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadinessLevel {
    Excellent,
    High,
    Moderate,
    Low,
    Critical,
}

impl ReadinessLevel {
    /// Lower bounds, highest first. A score equal to a bound takes that level.
    const LADDER: [(f64, Self); 4] = [
        (0.85, Self::Excellent),
        (0.75, Self::High),
        (0.60, Self::Moderate),
        (0.40, Self::Low),
    ];

    pub fn from_score(score: f64) -> Self {
        Self::LADDER
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, level)| *level)
            .unwrap_or(Self::Critical)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::High => "High",
            Self::Moderate => "Moderate",
            Self::Low => "Low",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for ReadinessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
