use super::super::domain::{Bottleneck, Domain, DomainResult, IssueCategory};
use super::gaps::PrioritizedGaps;

pub const RECOMMENDATION_CAP: usize = 15;

/// Canned recommendation for each (domain, issue category) pattern.
const GAP_RECOMMENDATIONS: &[(Domain, IssueCategory, &str)] = &[
    (
        Domain::Evidence,
        IssueCategory::MissingCriticalSource,
        "Onboard missing critical log sources into centralized collection",
    ),
    (
        Domain::Evidence,
        IssueCategory::SourceUnavailable,
        "Restore collection for unavailable log sources and alert on ingestion gaps",
    ),
    (
        Domain::Evidence,
        IssueCategory::InsufficientRetention,
        "Extend log retention to minimum 90 days (180 days recommended)",
    ),
    (
        Domain::Evidence,
        IssueCategory::TimestampDrift,
        "Implement NTP synchronization across all log sources",
    ),
    (
        Domain::Evidence,
        IssueCategory::LowVolume,
        "Enhance logging to include authentication and authorization events",
    ),
    (
        Domain::Evidence,
        IssueCategory::LowEvidenceCoverage,
        "Implement comprehensive logging across all critical systems",
    ),
    (
        Domain::Playbook,
        IssueCategory::MissingPlaybook,
        "Develop and document playbooks for every standard incident type",
    ),
    (
        Domain::Playbook,
        IssueCategory::AmbiguousSteps,
        "Add detailed, command-level procedures to ambiguous playbook steps",
    ),
    (
        Domain::Playbook,
        IssueCategory::InfeasibleProcedure,
        "Align playbook procedures with available staffing and tooling",
    ),
    (
        Domain::Playbook,
        IssueCategory::IncompletePlaybook,
        "Add legal notification, communication templates, and documentation requirements to playbooks",
    ),
    (
        Domain::Playbook,
        IssueCategory::UnrealisticAssumptions,
        "Conduct tabletop exercises to validate playbook assumptions",
    ),
    (
        Domain::Playbook,
        IssueCategory::WeakPlaybooks,
        "Conduct comprehensive playbook review and update cycle",
    ),
    (
        Domain::Policy,
        IssueCategory::WeakPolicies,
        "Establish an incident response governance program with executive sponsorship",
    ),
    (
        Domain::Policy,
        IssueCategory::PolicyImmaturity,
        "Formalize incident response policies and procedures",
    ),
    (
        Domain::Policy,
        IssueCategory::UnclearEscalation,
        "Establish clear escalation paths and approval thresholds",
    ),
    (
        Domain::Policy,
        IssueCategory::UndefinedCommunication,
        "Define internal and external communication protocols with approved templates",
    ),
    (
        Domain::Policy,
        IssueCategory::Bottleneck(Bottleneck::AutomationGap),
        "Implement SOAR platform for automated log correlation",
    ),
    (
        Domain::Policy,
        IssueCategory::Bottleneck(Bottleneck::ApprovalDelay),
        "Pre-authorize common response actions for on-call personnel",
    ),
    (
        Domain::Policy,
        IssueCategory::Bottleneck(Bottleneck::ToolFragmentation),
        "Deploy unified SIEM/SOAR platform",
    ),
    (
        Domain::Policy,
        IssueCategory::Bottleneck(Bottleneck::ExpertiseGap),
        "Establish 24/7 SOC coverage or engage MDR provider",
    ),
    (
        Domain::Policy,
        IssueCategory::Bottleneck(Bottleneck::CoordinationOverhead),
        "Implement automated stakeholder notification system",
    ),
    (
        Domain::Scenario,
        IssueCategory::MissingScenarioLogs,
        "Close log collection gaps required by priority incident scenarios",
    ),
    (
        Domain::Scenario,
        IssueCategory::MissingScenarioPlaybook,
        "Create playbooks for high-priority incident scenarios",
    ),
    (
        Domain::Scenario,
        IssueCategory::LimitedScenarioReadiness,
        "Run scenario-based tabletop exercises for low-readiness scenarios",
    ),
    (
        Domain::Scenario,
        IssueCategory::NoScenarios,
        "Schedule quarterly tabletop exercises to validate procedures",
    ),
];

/// Recommendations added when a domain scores below its floor, even if no
/// single gap maps to them.
const SCORE_RECOMMENDATIONS: &[(Domain, f64, &[&str])] = &[
    (
        Domain::Evidence,
        0.75,
        &[
            "Implement comprehensive logging across all critical systems",
            "Deploy centralized log management (SIEM) platform",
        ],
    ),
    (
        Domain::Playbook,
        0.70,
        &[
            "Conduct comprehensive playbook review and update cycle",
            "Schedule quarterly tabletop exercises to validate procedures",
        ],
    ),
    (
        Domain::Policy,
        0.70,
        &[
            "Formalize incident response policies and procedures",
            "Integrate security tools into unified incident response platform",
        ],
    ),
    (
        Domain::Scenario,
        0.70,
        &[
            "Improve log correlation and timestamp synchronization",
            "Deploy network traffic analysis (NTA) for comprehensive visibility",
        ],
    ),
];

const GENERAL_RECOMMENDATIONS: &[&str] = &[
    "Schedule quarterly tabletop exercises to validate procedures",
    "Establish 24/7 SOC coverage or engage MDR provider",
    "Conduct annual incident response capability assessment",
    "Develop incident response metrics and KPIs",
    "Define clear roles and escalation criteria for every playbook",
    "Maintain an up-to-date contact roster for responders and stakeholders",
    "Review lessons learned after every significant incident",
];

pub fn recommendation_for(domain: Domain, category: IssueCategory) -> Option<&'static str> {
    GAP_RECOMMENDATIONS
        .iter()
        .find(|(rule_domain, rule_category, _)| *rule_domain == domain && *rule_category == category)
        .map(|(_, _, text)| *text)
}

/// Walks gaps from critical to medium, then low-scoring domains, then the
/// general best practices, keeping the first occurrence of each text.
pub fn recommend(gaps: &PrioritizedGaps, results: &[DomainResult]) -> Vec<String> {
    let mut recommendations = Recommendations::default();

    for gap in gaps.by_priority() {
        if let Some(text) = recommendation_for(gap.domain, gap.category) {
            recommendations.push(text);
        }
    }

    for domain in Domain::ordered() {
        let Some(result) = results.iter().find(|result| result.domain == domain) else {
            continue;
        };
        for (rule_domain, floor, texts) in SCORE_RECOMMENDATIONS {
            if *rule_domain == domain && result.score < *floor {
                texts.iter().for_each(|text| recommendations.push(text));
            }
        }
    }

    GENERAL_RECOMMENDATIONS
        .iter()
        .for_each(|text| recommendations.push(text));

    recommendations.items
}

#[derive(Default)]
struct Recommendations {
    items: Vec<String>,
}

impl Recommendations {
    fn push(&mut self, text: &str) {
        if self.items.len() < RECOMMENDATION_CAP && !self.items.iter().any(|item| item == text) {
            self.items.push(text.to_string());
        }
    }
}
