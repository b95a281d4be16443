use super::common::*;
use crate::assessment::answers::{AnswerSet, AnswerValue, NamedAnswers};
use crate::assessment::domain::{IssueCategory, Severity};
use crate::assessment::scoring::{PlaybookScorer, ScoringError};

fn scorer() -> PlaybookScorer {
    PlaybookScorer::new(&catalog())
}

#[test]
fn strong_catalog_scores_full_marks() {
    let result = scorer().score(&strong_playbooks()).expect("scores");

    assert_eq!(result.score, 1.0);
    assert!(result.issues.is_empty());
}

#[test]
fn missing_catalog_playbook_is_critical() {
    let playbooks: Vec<NamedAnswers> = strong_playbooks()
        .into_iter()
        .filter(|playbook| playbook.name != "Ransomware Response")
        .collect();

    let result = scorer().score(&playbooks).expect("scores");

    assert!((result.score - 5.0 / 6.0).abs() < 1e-9);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].severity, Severity::Critical);
    assert_eq!(
        result.issues[0].text,
        "No documented playbook for Ransomware Response"
    );
}

#[test]
fn playbook_marked_absent_is_treated_as_missing() {
    let mut playbooks = strong_playbooks();
    playbooks[1] = absent_playbook("Phishing Incident Response");

    let result = scorer().score(&playbooks).expect("absent playbooks need no ratings");

    assert!(result.issues.iter().any(|issue| {
        issue.category == IssueCategory::MissingPlaybook
            && issue.text.ends_with("Phishing Incident Response")
    }));
}

#[test]
fn names_match_catalog_case_insensitively() {
    let mut playbooks = strong_playbooks();
    playbooks[0].name = "  malware infection response ".to_string();

    let result = scorer().score(&playbooks).expect("scores");

    assert!(result.issues.is_empty());
}

#[test]
fn low_ratings_raise_named_issues_with_fixed_severity() {
    let mut playbooks = strong_playbooks();
    playbooks[2] = playbook("Data Breach Response", [2.0, 2.0, 2.0, 2.0]);

    let result = scorer().score(&playbooks).expect("scores");

    let found: Vec<(IssueCategory, Severity, &str)> = result
        .issues
        .iter()
        .map(|issue| (issue.category, issue.severity, issue.text.as_str()))
        .collect();
    assert_eq!(
        found,
        vec![
            (
                IssueCategory::AmbiguousSteps,
                Severity::Medium,
                "Data Breach Response: steps are ambiguous or lack specific procedures",
            ),
            (
                IssueCategory::InfeasibleProcedure,
                Severity::High,
                "Data Breach Response: procedures are not feasible with current staffing and tooling",
            ),
            (
                IssueCategory::IncompletePlaybook,
                Severity::Medium,
                "Data Breach Response: missing required response elements",
            ),
            (
                IssueCategory::UnrealisticAssumptions,
                Severity::High,
                "Data Breach Response: contains unrealistic assumptions",
            ),
        ]
    );

    let expected = (0.25 + 5.0) / 6.0;
    assert!((result.score - expected).abs() < 1e-9);
}

#[test]
fn rating_of_three_is_not_flagged() {
    let mut playbooks = strong_playbooks();
    playbooks[3] = playbook("Ransomware Response", [3.0, 3.0, 3.0, 3.0]);

    let result = scorer().score(&playbooks).expect("scores");

    assert!(result.issues.is_empty());
}

#[test]
fn weak_playbook_set_raises_domain_gap() {
    let playbooks: Vec<NamedAnswers> = catalog()
        .playbooks()
        .iter()
        .map(|name| playbook(name, [2.0, 3.0, 2.0, 3.0]))
        .collect();

    let result = scorer().score(&playbooks).expect("scores");

    assert!(result.score < 0.60);
    let last = result.issues.last().expect("issues raised");
    assert_eq!(last.category, IssueCategory::WeakPlaybooks);
    assert_eq!(last.severity, Severity::Critical);
}

#[test]
fn custom_playbooks_join_the_average() {
    let mut playbooks = strong_playbooks();
    playbooks.push(playbook("Cloud Account Takeover", [1.0, 1.0, 1.0, 1.0]));
    playbooks.push(absent_playbook("Supply Chain Compromise"));

    let result = scorer().score(&playbooks).expect("scores");

    assert!((result.score - 6.0 / 7.0).abs() < 1e-9);
    assert!(result
        .issues
        .iter()
        .all(|issue| issue.text.starts_with("Cloud Account Takeover")));
    assert_eq!(result.issues.len(), 4);
}

#[test]
fn missing_rating_is_reported_not_defaulted() {
    let mut playbooks = strong_playbooks();
    playbooks[1] = NamedAnswers::new(
        "Phishing Incident Response",
        AnswerSet::new()
            .with("exists", AnswerValue::Boolean(true))
            .with("feasibility", AnswerValue::Number(4.0))
            .with("completeness", AnswerValue::Number(4.0))
            .with("assumption_realism", AnswerValue::Number(4.0)),
    );

    let err = scorer().score(&playbooks).expect_err("clarity is required");

    assert_eq!(
        err,
        ScoringError::MissingInput {
            field: "playbooks[Phishing Incident Response].clarity".to_string()
        }
    );
}

#[test]
fn ratings_outside_scale_are_invalid() {
    let mut playbooks = strong_playbooks();
    playbooks[0] = playbook("Malware Infection Response", [0.0, 4.0, 4.0, 4.0]);

    let err = scorer().score(&playbooks).expect_err("rating 0 rejected");

    assert!(matches!(err, ScoringError::InvalidAnswer { .. }));
    assert_eq!(err.field(), "playbooks[Malware Infection Response].clarity");
}

#[test]
fn extended_catalog_requires_new_playbook() {
    let catalog = catalog().with_playbook("Cloud Account Takeover Response");
    let scorer = PlaybookScorer::new(&catalog);

    let result = scorer.score(&strong_playbooks()).expect("scores");

    assert!(result.issues.iter().any(|issue| {
        issue.category == IssueCategory::MissingPlaybook
            && issue.text.contains("Cloud Account Takeover Response")
    }));
}
