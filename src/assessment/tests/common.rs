use crate::assessment::answers::{
    AnswerSet, AnswerValue, AssessmentAnswers, EnvironmentProfile, NamedAnswers,
};
use crate::assessment::catalog::AssessmentCatalog;

pub(super) fn catalog() -> AssessmentCatalog {
    AssessmentCatalog::standard()
}

pub(super) fn text(value: &str) -> AnswerValue {
    AnswerValue::Text(value.to_string())
}

pub(super) fn list(values: &[&str]) -> AnswerValue {
    AnswerValue::List(values.iter().map(|value| value.to_string()).collect())
}

pub(super) fn log_source(
    name: &str,
    retention_days: Option<f64>,
    timestamp_sync: &str,
    volume: &str,
) -> NamedAnswers {
    let mut answers = AnswerSet::new()
        .with("available", AnswerValue::Boolean(true))
        .with("timestamp_sync", text(timestamp_sync))
        .with("volume", text(volume));
    if let Some(days) = retention_days {
        answers.insert("retention_days", AnswerValue::Number(days));
    }
    NamedAnswers::new(name, answers)
}

pub(super) fn healthy_source(name: &str) -> NamedAnswers {
    log_source(name, Some(180.0), "synchronized", "adequate")
}

pub(super) fn unavailable_source(name: &str) -> NamedAnswers {
    NamedAnswers::new(
        name,
        AnswerSet::new().with("available", AnswerValue::Boolean(false)),
    )
}

/// Every log source the standard scenarios require, all healthy.
pub(super) fn full_log_inventory() -> Vec<NamedAnswers> {
    [
        "Windows Event Logs",
        "Authentication Logs",
        "Firewall Logs",
        "EDR",
        "Network Traffic",
        "VPN Logs",
        "DLP",
    ]
    .into_iter()
    .map(healthy_source)
    .collect()
}

/// Ratings in order: clarity, feasibility, completeness, assumption realism.
pub(super) fn playbook(name: &str, ratings: [f64; 4]) -> NamedAnswers {
    let [clarity, feasibility, completeness, assumption_realism] = ratings;
    NamedAnswers::new(
        name,
        AnswerSet::new()
            .with("exists", AnswerValue::Boolean(true))
            .with("clarity", AnswerValue::Number(clarity))
            .with("feasibility", AnswerValue::Number(feasibility))
            .with("completeness", AnswerValue::Number(completeness))
            .with("assumption_realism", AnswerValue::Number(assumption_realism)),
    )
}

pub(super) fn absent_playbook(name: &str) -> NamedAnswers {
    NamedAnswers::new(
        name,
        AnswerSet::new().with("exists", AnswerValue::Boolean(false)),
    )
}

pub(super) fn strong_playbooks() -> Vec<NamedAnswers> {
    catalog()
        .playbooks()
        .iter()
        .map(|name| playbook(name, [5.0; 4]))
        .collect()
}

pub(super) fn policy_answers(
    maturity: &str,
    escalation: &str,
    communication: &str,
    integration: &str,
) -> AnswerSet {
    AnswerSet::new()
        .with("policy_maturity", text(maturity))
        .with("escalation_clarity", text(escalation))
        .with("communication_protocol", text(communication))
        .with("tool_integration", text(integration))
}

pub(super) fn mature_policy() -> AnswerSet {
    policy_answers("tested", "defined", "defined", "automated")
}

pub(super) fn scenario_selection(keys: &[&str]) -> AnswerSet {
    AnswerSet::new().with("selected", list(keys))
}

pub(super) fn mature_answers() -> AssessmentAnswers {
    AssessmentAnswers {
        profile: Some(EnvironmentProfile {
            org_name: "Northwind Health".to_string(),
            platforms: vec!["Windows".to_string(), "Linux".to_string()],
            endpoint_count: 850,
            network_segments: vec!["DMZ".to_string(), "Internal".to_string()],
            security_tools: vec!["EDR".to_string(), "SIEM".to_string()],
        }),
        evidence: full_log_inventory(),
        playbooks: strong_playbooks(),
        policy: mature_policy(),
        scenarios: scenario_selection(&["all"]),
    }
}

/// A mid-maturity organization with gaps in every domain.
pub(super) fn struggling_answers() -> AssessmentAnswers {
    AssessmentAnswers {
        profile: None,
        evidence: vec![
            log_source("Windows Event Logs", Some(30.0), "drifting", "adequate"),
            log_source("Syslog", None, "unknown", "partial"),
            unavailable_source("Firewall Logs"),
        ],
        playbooks: vec![
            playbook("Malware Infection Response", [4.0, 4.0, 3.0, 4.0]),
            playbook("Data Breach Response", [3.0, 2.0, 2.0, 1.0]),
            absent_playbook("Ransomware Response"),
        ],
        policy: policy_answers("ad_hoc", "informal", "undefined", "partial")
            .with("approval_delay_hours", AnswerValue::Number(24.0))
            .with("expertise_gap", AnswerValue::Boolean(true)),
        scenarios: scenario_selection(&["ransomware", "data_exfiltration"]),
    }
}
