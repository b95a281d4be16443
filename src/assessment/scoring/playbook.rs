use tracing::{debug, warn};

use super::super::answers::NamedAnswers;
use super::super::catalog::AssessmentCatalog;
use super::super::domain::{Domain, DomainResult, IssueCategory, Severity};
use super::rules::{self, Criterion, IssueRule, Presence, Scale};
use super::{mean, ScoringError};

pub(crate) const RATING_MAX: f64 = 5.0;

const EFFECTIVENESS_FLOOR: f64 = 0.60;

/// Ratings below 3 of 5 flag the dimension.
const RATING_THRESHOLD: f64 = 0.5;

pub(crate) const DIMENSIONS: [Criterion; 4] = [
    dimension(
        "clarity",
        IssueCategory::AmbiguousSteps,
        Severity::Medium,
        "{subject}: steps are ambiguous or lack specific procedures",
    ),
    dimension(
        "feasibility",
        IssueCategory::InfeasibleProcedure,
        Severity::High,
        "{subject}: procedures are not feasible with current staffing and tooling",
    ),
    dimension(
        "completeness",
        IssueCategory::IncompletePlaybook,
        Severity::Medium,
        "{subject}: missing required response elements",
    ),
    dimension(
        "assumption_realism",
        IssueCategory::UnrealisticAssumptions,
        Severity::High,
        "{subject}: contains unrealistic assumptions",
    ),
];

const fn dimension(
    field: &'static str,
    category: IssueCategory,
    severity: Severity,
    template: &'static str,
) -> Criterion {
    Criterion {
        field,
        scale: Scale::Rating { max: RATING_MAX },
        presence: Presence::Required,
        weight: 1.0,
        threshold: RATING_THRESHOLD,
        issue: IssueRule {
            category,
            severity,
            template,
        },
    }
}

const MISSING_PLAYBOOK: IssueRule = IssueRule {
    category: IssueCategory::MissingPlaybook,
    severity: Severity::Critical,
    template: "No documented playbook for {subject}",
};

const WEAK_PLAYBOOKS: IssueRule = IssueRule {
    category: IssueCategory::WeakPlaybooks,
    severity: Severity::Critical,
    template: "Incident response playbooks lack clarity or completeness",
};

/// Scores each catalog playbook (plus any custom ones) on clarity,
/// feasibility, completeness, and assumption realism.
#[derive(Debug, Clone)]
pub struct PlaybookScorer {
    catalog: Vec<&'static str>,
}

impl PlaybookScorer {
    pub fn new(catalog: &AssessmentCatalog) -> Self {
        Self {
            catalog: catalog.playbooks().to_vec(),
        }
    }

    pub fn score(&self, playbooks: &[NamedAnswers]) -> Result<DomainResult, ScoringError> {
        let mut scores = Vec::new();
        let mut issues = Vec::new();

        for name in &self.catalog {
            let entry = playbooks
                .iter()
                .find(|playbook| playbook.name.trim().eq_ignore_ascii_case(name));

            let scope = format!("playbooks[{name}]");
            let documented = match entry {
                Some(entry) if entry.answers.require_bool(&scope, "exists")? => Some(entry),
                _ => None,
            };

            let Some(entry) = documented else {
                scores.push(0.0);
                issues.push(MISSING_PLAYBOOK.render(Domain::Playbook, name, ""));
                continue;
            };

            let evaluation =
                rules::evaluate(&DIMENSIONS, &entry.answers, &scope, name, Domain::Playbook)?;
            debug!(playbook = *name, score = evaluation.score, "scored playbook");
            scores.push(evaluation.score);
            issues.extend(evaluation.issues);
        }

        for custom in playbooks.iter().filter(|playbook| !self.is_catalog(&playbook.name)) {
            let name = custom.name.trim();
            if name.is_empty() {
                return Err(ScoringError::invalid(
                    "playbooks",
                    "name",
                    "playbook name must not be empty",
                ));
            }

            let scope = format!("playbooks[{name}]");
            if !custom.answers.require_bool(&scope, "exists")? {
                warn!(playbook = name, "ignoring custom playbook that does not exist");
                continue;
            }

            let evaluation =
                rules::evaluate(&DIMENSIONS, &custom.answers, &scope, name, Domain::Playbook)?;
            debug!(playbook = name, score = evaluation.score, "scored custom playbook");
            scores.push(evaluation.score);
            issues.extend(evaluation.issues);
        }

        let score = mean(&scores);
        if score < EFFECTIVENESS_FLOOR {
            issues.push(WEAK_PLAYBOOKS.render(Domain::Playbook, "", ""));
        }

        Ok(DomainResult::new(Domain::Playbook, score, issues))
    }

    fn is_catalog(&self, name: &str) -> bool {
        self.catalog
            .iter()
            .any(|entry| entry.eq_ignore_ascii_case(name.trim()))
    }
}
