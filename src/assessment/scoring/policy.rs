use tracing::debug;

use super::super::answers::AnswerSet;
use super::super::domain::{Bottleneck, Domain, DomainResult, IssueCategory, Severity};
use super::rules::{self, Criterion, IssueRule, Presence, Scale};
use super::ScoringError;

pub(crate) const MATURITY_OPTIONS: &[(&str, f64)] = &[
    ("none", 0.0),
    ("ad_hoc", 0.35),
    ("documented", 0.7),
    ("tested", 1.0),
];
pub(crate) const DEFINITION_OPTIONS: &[(&str, f64)] =
    &[("undefined", 0.0), ("informal", 0.5), ("defined", 1.0)];
pub(crate) const INTEGRATION_OPTIONS: &[(&str, f64)] = &[
    ("none", 0.0),
    ("partial", 0.4),
    ("integrated", 0.8),
    ("automated", 1.0),
];

pub(crate) const APPROVAL_DELAY_LIMIT_HOURS: f64 = 4.0;

const GOVERNANCE_FLOOR: f64 = 0.60;

pub(crate) const GOVERNANCE: [Criterion; 3] = [
    Criterion {
        field: "policy_maturity",
        scale: Scale::Choice(MATURITY_OPTIONS),
        presence: Presence::Required,
        weight: 1.0,
        threshold: 0.7,
        issue: IssueRule {
            category: IssueCategory::PolicyImmaturity,
            severity: Severity::High,
            template: "Incident response policy is not formally documented (maturity: {value})",
        },
    },
    Criterion {
        field: "escalation_clarity",
        scale: Scale::Choice(DEFINITION_OPTIONS),
        presence: Presence::Required,
        weight: 1.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::UnclearEscalation,
            severity: Severity::High,
            template: "Escalation paths and approval thresholds are {value}",
        },
    },
    Criterion {
        field: "communication_protocol",
        scale: Scale::Choice(DEFINITION_OPTIONS),
        presence: Presence::Required,
        weight: 1.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::UndefinedCommunication,
            severity: Severity::Medium,
            template: "Internal and external communication protocols are {value}",
        },
    },
];

pub(crate) const TOOLING: [Criterion; 1] = [Criterion {
    field: "tool_integration",
    scale: Scale::Choice(INTEGRATION_OPTIONS),
    presence: Presence::Required,
    weight: 1.0,
    threshold: 0.8,
    issue: IssueRule {
        category: IssueCategory::Bottleneck(Bottleneck::AutomationGap),
        severity: Severity::High,
        template: "Security tools not fully integrated into response workflow (integration: {value})",
    },
}];

pub(crate) const BOTTLENECKS: [Criterion; 5] = [
    Criterion {
        field: "approval_delay_hours",
        scale: Scale::Ceiling(APPROVAL_DELAY_LIMIT_HOURS),
        presence: Presence::Optional { neutral: 1.0 },
        weight: 0.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::Bottleneck(Bottleneck::ApprovalDelay),
            severity: Severity::Medium,
            template: "Approval delays: critical actions wait {value} hours for management approval",
        },
    },
    bottleneck(
        "manual_log_correlation",
        Bottleneck::AutomationGap,
        "Manual log correlation: requires manual analysis across multiple systems",
    ),
    bottleneck(
        "tool_fragmentation",
        Bottleneck::ToolFragmentation,
        "Tool fragmentation: no unified incident management platform",
    ),
    bottleneck(
        "expertise_gap",
        Bottleneck::ExpertiseGap,
        "Expertise gaps: limited 24/7 coverage or specialized skills",
    ),
    bottleneck(
        "coordination_overhead",
        Bottleneck::CoordinationOverhead,
        "Communication delays: stakeholder notification requires manual coordination",
    ),
];

const fn bottleneck(field: &'static str, kind: Bottleneck, template: &'static str) -> Criterion {
    Criterion {
        field,
        scale: Scale::Hazard,
        presence: Presence::Optional { neutral: 1.0 },
        weight: 0.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::Bottleneck(kind),
            severity: Severity::Medium,
            template,
        },
    }
}

const WEAK_POLICIES: IssueRule = IssueRule {
    category: IssueCategory::WeakPolicies,
    severity: Severity::Critical,
    template: "Security policies inadequate for effective incident response",
};

/// Scores policy governance and tool integration, and reports response
/// bottlenecks tagged by category.
#[derive(Debug, Clone, Default)]
pub struct PolicyScorer;

impl PolicyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, answers: &AnswerSet) -> Result<DomainResult, ScoringError> {
        const SCOPE: &str = "policy";

        let governance = rules::evaluate(&GOVERNANCE, answers, SCOPE, "", Domain::Policy)?;
        let tooling = rules::evaluate(&TOOLING, answers, SCOPE, "", Domain::Policy)?;
        let bottlenecks = rules::evaluate(&BOTTLENECKS, answers, SCOPE, "", Domain::Policy)?;

        debug!(
            governance = governance.score,
            tooling = tooling.score,
            bottlenecks = bottlenecks.issues.len(),
            "scored policy and tooling"
        );

        let score = (governance.score + tooling.score) / 2.0;

        let mut issues = Vec::new();
        if governance.score < GOVERNANCE_FLOOR {
            issues.push(WEAK_POLICIES.render(Domain::Policy, "", ""));
        }
        issues.extend(governance.issues);
        issues.extend(tooling.issues);
        issues.extend(bottlenecks.issues);

        Ok(DomainResult::new(Domain::Policy, score, issues))
    }
}
