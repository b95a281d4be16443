use tracing::debug;

use super::super::answers::{AnswerSet, NamedAnswers};
use super::super::catalog::{AssessmentCatalog, ScenarioTemplate};
use super::super::domain::{Domain, DomainResult, Issue, IssueCategory, Severity};
use super::rules::IssueRule;
use super::{mean, name_covers, ScoringError};

const SCOPE: &str = "scenarios";
pub(crate) const SELECT_ALL: &str = "all";

const MISSING_LOGS: IssueRule = IssueRule {
    category: IssueCategory::MissingScenarioLogs,
    severity: Severity::Medium,
    template: "{subject}: missing required log sources ({value})",
};

const MISSING_PLAYBOOK: IssueRule = IssueRule {
    category: IssueCategory::MissingScenarioPlaybook,
    severity: Severity::Medium,
    template: "{subject}: no playbook for {value}",
};

const LIMITED_READINESS: IssueRule = IssueRule {
    category: IssueCategory::LimitedScenarioReadiness,
    severity: Severity::High,
    template: "Limited readiness for {subject}",
};

const NO_SCENARIOS: IssueRule = IssueRule {
    category: IssueCategory::NoScenarios,
    severity: Severity::High,
    template: "No incident scenarios evaluated",
};

/// Capabilities the organization reported as present: available log
/// sources and documented playbooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilityInventory {
    log_sources: Vec<String>,
    playbooks: Vec<String>,
}

impl CapabilityInventory {
    pub fn new(log_sources: Vec<String>, playbooks: Vec<String>) -> Self {
        Self {
            log_sources,
            playbooks,
        }
    }

    pub fn from_answers(
        evidence: &[NamedAnswers],
        playbooks: &[NamedAnswers],
    ) -> Result<Self, ScoringError> {
        let mut inventory = Self::default();

        for source in evidence {
            let scope = format!("evidence[{}]", source.name.trim());
            if source.answers.require_bool(&scope, "available")? {
                inventory.log_sources.push(source.name.trim().to_string());
            }
        }

        for playbook in playbooks {
            let scope = format!("playbooks[{}]", playbook.name.trim());
            if playbook.answers.require_bool(&scope, "exists")? {
                inventory.playbooks.push(playbook.name.trim().to_string());
            }
        }

        Ok(inventory)
    }

    pub fn has_log_source(&self, required: &str) -> bool {
        self.log_sources
            .iter()
            .any(|source| name_covers(source, required))
    }

    pub fn has_playbook(&self, required: &str) -> bool {
        self.playbooks
            .iter()
            .any(|playbook| name_covers(playbook, required))
    }
}

struct ScenarioCheck<'a> {
    name: &'a str,
    required_logs: Vec<&'a str>,
    required_playbooks: Vec<&'a str>,
}

impl<'a> From<&'a ScenarioTemplate> for ScenarioCheck<'a> {
    fn from(template: &'a ScenarioTemplate) -> Self {
        Self {
            name: template.name,
            required_logs: template.required_logs.clone(),
            required_playbooks: template.required_playbooks.clone(),
        }
    }
}

/// Cross-checks each selected scenario against the reported capabilities.
/// Feasibility is the fraction of required log sources and playbooks present.
#[derive(Debug, Clone)]
pub struct ScenarioScorer {
    catalog: AssessmentCatalog,
}

impl ScenarioScorer {
    pub fn new(catalog: &AssessmentCatalog) -> Self {
        Self {
            catalog: catalog.clone(),
        }
    }

    pub fn score(
        &self,
        answers: &AnswerSet,
        inventory: &CapabilityInventory,
    ) -> Result<DomainResult, ScoringError> {
        let checks = self.selected_checks(answers)?;

        let mut feasibilities = Vec::with_capacity(checks.len());
        let mut issues = Vec::new();

        for check in &checks {
            let missing_logs: Vec<&str> = check
                .required_logs
                .iter()
                .copied()
                .filter(|log| !inventory.has_log_source(log))
                .collect();
            let missing_playbooks: Vec<&str> = check
                .required_playbooks
                .iter()
                .copied()
                .filter(|playbook| !inventory.has_playbook(playbook))
                .collect();

            let required = check.required_logs.len() + check.required_playbooks.len();
            let missing = missing_logs.len() + missing_playbooks.len();
            let feasibility = if required == 0 {
                1.0
            } else {
                (required - missing) as f64 / required as f64
            };
            debug!(
                scenario = check.name,
                feasibility, missing, required, "evaluated scenario"
            );
            feasibilities.push(feasibility);

            if !missing_logs.is_empty() {
                issues.push(render(MISSING_LOGS, check.name, &missing_logs.join(", ")));
            }
            for playbook in &missing_playbooks {
                issues.push(render(MISSING_PLAYBOOK, check.name, playbook));
            }
            if missing * 2 > required {
                issues.push(render(LIMITED_READINESS, check.name, ""));
            }
        }

        if checks.is_empty() {
            issues.push(render(NO_SCENARIOS, "", ""));
        }

        Ok(DomainResult::new(
            Domain::Scenario,
            mean(&feasibilities),
            issues,
        ))
    }

    fn selected_checks<'a>(
        &'a self,
        answers: &'a AnswerSet,
    ) -> Result<Vec<ScenarioCheck<'a>>, ScoringError> {
        let selected = answers.require_list(SCOPE, "selected")?;
        let mut checks: Vec<ScenarioCheck<'a>> = Vec::new();
        let mut select_all = false;

        for key in selected {
            if key.trim().eq_ignore_ascii_case(SELECT_ALL) {
                select_all = true;
                continue;
            }
            let template = self.catalog.scenario(key).ok_or_else(|| {
                ScoringError::invalid(
                    SCOPE,
                    "selected",
                    format!("unknown scenario '{}'", key.trim()),
                )
            })?;
            if !checks.iter().any(|check| check.name == template.name) {
                checks.push(ScenarioCheck::from(template));
            }
        }

        if select_all {
            checks = self
                .catalog
                .scenarios()
                .iter()
                .map(ScenarioCheck::from)
                .collect();
        }

        if let Some(name) = answers
            .optional_text(SCOPE, "custom_name")?
            .map(str::trim)
            .filter(|name| !name.is_empty())
        {
            let required_logs = trimmed(answers.require_list(SCOPE, "custom_required_logs")?);
            let required_playbooks =
                trimmed(answers.require_list(SCOPE, "custom_required_playbooks")?);
            if required_logs.is_empty() && required_playbooks.is_empty() {
                return Err(ScoringError::invalid(
                    SCOPE,
                    "custom_required_logs",
                    "a custom scenario must require at least one capability",
                ));
            }
            checks.push(ScenarioCheck {
                name,
                required_logs,
                required_playbooks,
            });
        }

        Ok(checks)
    }
}

fn trimmed(values: &[String]) -> Vec<&str> {
    values
        .iter()
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect()
}

fn render(rule: IssueRule, subject: &str, value: &str) -> Issue {
    rule.render(Domain::Scenario, subject, value)
}
