//! Interactive questionnaire that collects `AssessmentAnswers`.
//!
//! The questionnaire only gathers answers. Validation and scoring stay with
//! the assessment engine, so answers collected here and answers loaded from a
//! file go through the same checks.

mod prompt;

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::assessment::{
    AnswerSet, AnswerValue, AssessmentAnswers, AssessmentCatalog, EnvironmentProfile,
    NamedAnswers,
};
use crate::export::ExportFormat;
use prompt::{split_list, Choice, Prompter};

#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    #[error("terminal io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("input ended before the interview finished")]
    Aborted,
}

const RATING_MAX: u8 = 5;

const OVERVIEW: &str = "\
IRR (Incident Readiness & Response Evaluator) assesses how well your
organization could investigate and respond to a security incident.

It evaluates:
  - log availability and evidence quality
  - incident response playbook effectiveness
  - security policy and tool readiness
  - scenario-based response readiness

IRR is strictly analytical. It does not simulate attacks, modify systems,
access anything beyond the answers you type, or send data anywhere.
Results stay local unless you export them.";

const TIMESTAMP_SYNC: [Choice; 3] = [
    Choice {
        key: "synchronized",
        label: "Synchronized (NTP or equivalent)",
    },
    Choice {
        key: "drifting",
        label: "Known drift between sources",
    },
    Choice {
        key: "unknown",
        label: "Unknown",
    },
];

const VOLUME: [Choice; 3] = [
    Choice {
        key: "adequate",
        label: "Adequate for investigations",
    },
    Choice {
        key: "partial",
        label: "Partial (sampled or filtered)",
    },
    Choice {
        key: "insufficient",
        label: "Insufficient",
    },
];

const MATURITY: [Choice; 4] = [
    Choice {
        key: "none",
        label: "No incident response policy",
    },
    Choice {
        key: "ad_hoc",
        label: "Ad hoc, mostly tribal knowledge",
    },
    Choice {
        key: "documented",
        label: "Documented",
    },
    Choice {
        key: "tested",
        label: "Documented and tested in the last 12 months",
    },
];

const DEFINITION: [Choice; 3] = [
    Choice {
        key: "undefined",
        label: "Undefined",
    },
    Choice {
        key: "informal",
        label: "Informal",
    },
    Choice {
        key: "defined",
        label: "Formally defined",
    },
];

const INTEGRATION: [Choice; 4] = [
    Choice {
        key: "none",
        label: "Not integrated",
    },
    Choice {
        key: "partial",
        label: "Partially integrated",
    },
    Choice {
        key: "integrated",
        label: "Integrated into the response workflow",
    },
    Choice {
        key: "automated",
        label: "Integrated with automated response (SOAR)",
    },
];

const EXPORT_FORMATS: [Choice; 2] = [
    Choice {
        key: "json",
        label: "JSON",
    },
    Choice {
        key: "yaml",
        label: "YAML",
    },
];

const BOTTLENECK_QUESTIONS: [(&str, &str); 4] = [
    (
        "manual_log_correlation",
        "Does log correlation require manual analysis across systems?",
    ),
    (
        "tool_fragmentation",
        "Is there no unified incident management platform?",
    ),
    (
        "expertise_gap",
        "Is 24/7 coverage or specialized expertise lacking?",
    ),
    (
        "coordination_overhead",
        "Does stakeholder notification require manual coordination?",
    ),
];

/// Walks an analyst through every assessment module in order: environment,
/// log sources, playbooks, policy and tooling, then scenarios.
pub struct Questionnaire<R, W> {
    prompt: Prompter<R, W>,
    catalog: AssessmentCatalog,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    pub fn new(input: R, output: W, catalog: AssessmentCatalog) -> Self {
        Self {
            prompt: Prompter::new(input, output),
            catalog,
        }
    }

    pub fn into_output(self) -> W {
        self.prompt.into_output()
    }

    /// Writer the questionnaire prompts on, for output between questions.
    pub fn output(&mut self) -> &mut W {
        self.prompt.output_mut()
    }

    /// Shows the scope statement and asks to proceed.
    pub fn consent(&mut self) -> Result<bool, PromptError> {
        self.prompt.say(OVERVIEW)?;
        self.prompt.say("")?;
        self.prompt
            .yes_no("Do you consent to proceed with the assessment", true)
    }

    pub fn run(&mut self) -> Result<AssessmentAnswers, PromptError> {
        let (profile, log_sources) = self.environment()?;
        let evidence = self.evidence(&log_sources)?;
        let playbooks = self.playbooks()?;
        let policy = self.policy()?;
        let scenarios = self.scenarios()?;

        debug!(
            log_sources = evidence.len(),
            playbooks = playbooks.len(),
            "interview complete"
        );

        Ok(AssessmentAnswers {
            profile: Some(profile),
            evidence,
            playbooks,
            policy,
            scenarios,
        })
    }

    /// Offers to export the rendered report. `None` when declined.
    pub fn export_format(
        &mut self,
        default: ExportFormat,
    ) -> Result<Option<ExportFormat>, PromptError> {
        self.prompt.say("")?;
        if !self.prompt.yes_no("Export results", false)? {
            return Ok(None);
        }

        let key = self
            .prompt
            .choice_or("Export format", &EXPORT_FORMATS, Some(default.extension()))?;
        let format = match key {
            "yaml" => ExportFormat::Yaml,
            _ => ExportFormat::Json,
        };
        debug!(%format, "export requested");
        Ok(Some(format))
    }

    fn section(&mut self, title: &str) -> Result<(), PromptError> {
        self.prompt.say("")?;
        self.prompt.say(&format!("== {title} =="))
    }

    fn environment(&mut self) -> Result<(EnvironmentProfile, Vec<String>), PromptError> {
        self.section("Environment Profile")?;
        let org_name = self.prompt.text("Organization name", "My Organization")?;
        let platforms = self
            .prompt
            .list("Platforms (comma-separated)", "Windows,Linux")?;
        let endpoint_count = self.prompt.count("Approximate endpoint count", 100)?;
        let network_segments = self
            .prompt
            .list("Network segments (comma-separated)", "DMZ,Internal")?;
        let security_tools = self
            .prompt
            .list("Security tools (comma-separated)", "EDR,SIEM,Firewall")?;
        let log_sources = self.prompt.list(
            "Log sources (comma-separated)",
            "Windows Event Logs,Authentication Logs,Firewall Logs",
        )?;

        let profile = EnvironmentProfile {
            org_name,
            platforms,
            endpoint_count,
            network_segments,
            security_tools,
        };
        Ok((profile, dedupe(log_sources)))
    }

    fn evidence(&mut self, sources: &[String]) -> Result<Vec<NamedAnswers>, PromptError> {
        self.section("Log Sources & Evidence")?;
        let mut answers = Vec::with_capacity(sources.len());

        for source in sources {
            self.prompt.say(&format!("\n{source}"))?;
            let available = self
                .prompt
                .yes_no("  Collected and searchable today?", true)?;
            let mut set = AnswerSet::new().with("available", AnswerValue::Boolean(available));

            if available {
                if let Some(days) = self
                    .prompt
                    .number("  Retention period in days (blank if unknown)", None)?
                {
                    set.insert("retention_days", AnswerValue::Number(days));
                }
                let sync = self.prompt.choice("  Timestamp synchronization", &TIMESTAMP_SYNC)?;
                set.insert("timestamp_sync", text(sync));
                let volume = self.prompt.choice("  Log volume", &VOLUME)?;
                set.insert("volume", text(volume));
            }

            answers.push(NamedAnswers::new(source.clone(), set));
        }

        Ok(answers)
    }

    fn playbooks(&mut self) -> Result<Vec<NamedAnswers>, PromptError> {
        self.section("Incident Response Playbooks")?;
        let mut answers = Vec::new();

        let catalog: Vec<&'static str> = self.catalog.playbooks().to_vec();
        for name in catalog {
            let exists = self
                .prompt
                .yes_no(&format!("Is there a documented {name} playbook?"), false)?;
            let set = if exists {
                self.playbook_ratings()?
            } else {
                AnswerSet::new().with("exists", AnswerValue::Boolean(false))
            };
            answers.push(NamedAnswers::new(name, set));
        }

        if self.prompt.yes_no("Evaluate custom playbooks?", false)? {
            loop {
                let name = self
                    .prompt
                    .text("Custom playbook name (blank to finish)", "")?;
                if name.is_empty() {
                    break;
                }
                if self.catalog.is_catalog_playbook(&name)
                    || answers.iter().any(|entry| entry.name.eq_ignore_ascii_case(&name))
                {
                    warn!(playbook = %name, "skipping playbook that was already evaluated");
                    self.prompt.say("  Already evaluated.")?;
                    continue;
                }
                let set = self.playbook_ratings()?;
                answers.push(NamedAnswers::new(name, set));
            }
        }

        Ok(answers)
    }

    fn playbook_ratings(&mut self) -> Result<AnswerSet, PromptError> {
        let clarity = self.prompt.rating("  Clarity of steps", RATING_MAX)?;
        let feasibility = self
            .prompt
            .rating("  Feasibility with current staffing and tooling", RATING_MAX)?;
        let completeness = self
            .prompt
            .rating("  Completeness of required elements", RATING_MAX)?;
        let realism = self.prompt.rating("  Realism of assumptions", RATING_MAX)?;

        Ok(AnswerSet::new()
            .with("exists", AnswerValue::Boolean(true))
            .with("clarity", rating(clarity))
            .with("feasibility", rating(feasibility))
            .with("completeness", rating(completeness))
            .with("assumption_realism", rating(realism)))
    }

    fn policy(&mut self) -> Result<AnswerSet, PromptError> {
        self.section("Policy & Tool Readiness")?;

        let maturity = self.prompt.choice("Incident response policy", &MATURITY)?;
        let escalation = self
            .prompt
            .choice("Escalation paths and approval thresholds", &DEFINITION)?;
        let communication = self
            .prompt
            .choice("Internal and external communication protocols", &DEFINITION)?;
        let integration = self
            .prompt
            .choice("Security tool integration with response workflow", &INTEGRATION)?;

        let mut set = AnswerSet::new()
            .with("policy_maturity", text(maturity))
            .with("escalation_clarity", text(escalation))
            .with("communication_protocol", text(communication))
            .with("tool_integration", text(integration));

        if let Some(hours) = self.prompt.number(
            "Hours critical actions typically wait for management approval",
            Some(0.0),
        )? {
            set.insert("approval_delay_hours", AnswerValue::Number(hours));
        }
        for (field, question) in BOTTLENECK_QUESTIONS {
            let present = self.prompt.yes_no(question, false)?;
            set.insert(field, AnswerValue::Boolean(present));
        }

        Ok(set)
    }

    fn scenarios(&mut self) -> Result<AnswerSet, PromptError> {
        self.section("Scenario Readiness")?;
        for (index, scenario) in self.catalog.scenarios().iter().enumerate() {
            let line = format!(
                "  {}. {} ({} complexity): {}",
                index + 1,
                scenario.name,
                scenario.complexity.label(),
                scenario.description
            );
            self.prompt.say(&line)?;
        }

        let selected = loop {
            let raw = self.prompt.text(
                "Select scenarios (comma-separated numbers or keys, or 'all')",
                "all",
            )?;
            match self.resolve_selection(&raw) {
                Ok(keys) => break keys,
                Err(token) => self
                    .prompt
                    .say(&format!("  Unknown scenario '{token}'."))?,
            }
        };

        let mut set = AnswerSet::new().with("selected", AnswerValue::List(selected));

        if self.prompt.yes_no("Add a custom scenario?", false)? {
            let name = loop {
                let name = self.prompt.text("  Scenario name", "")?;
                if !name.is_empty() {
                    break name;
                }
                self.prompt.say("  Please enter a name.")?;
            };
            let (logs, playbooks) = loop {
                let logs = self
                    .prompt
                    .list("  Required log sources (comma-separated)", "")?;
                let playbooks = self
                    .prompt
                    .list("  Required playbooks (comma-separated)", "")?;
                if !logs.is_empty() || !playbooks.is_empty() {
                    break (logs, playbooks);
                }
                self.prompt
                    .say("  A scenario needs at least one log source or playbook.")?;
            };
            set.insert("custom_name", AnswerValue::Text(name));
            set.insert("custom_required_logs", AnswerValue::List(logs));
            set.insert("custom_required_playbooks", AnswerValue::List(playbooks));
        }

        Ok(set)
    }

    /// Maps numbers and keys to catalog keys; returns the first unknown token.
    fn resolve_selection(&self, raw: &str) -> Result<Vec<String>, String> {
        let tokens = split_list(raw);
        if tokens.iter().any(|token| token.eq_ignore_ascii_case("all")) {
            return Ok(vec!["all".to_string()]);
        }

        let scenarios = self.catalog.scenarios();
        let mut keys: Vec<String> = Vec::new();
        for token in tokens {
            let key = match token.parse::<usize>() {
                Ok(number) => number
                    .checked_sub(1)
                    .and_then(|index| scenarios.get(index))
                    .map(|scenario| scenario.key),
                Err(_) => self.catalog.scenario(&token).map(|scenario| scenario.key),
            };
            let Some(key) = key else {
                return Err(token);
            };
            if !keys.iter().any(|existing| existing == key) {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }
}

fn text(value: &str) -> AnswerValue {
    AnswerValue::Text(value.to_string())
}

fn rating(value: u8) -> AnswerValue {
    AnswerValue::Number(f64::from(value))
}

fn dedupe(names: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if !unique.iter().any(|existing| existing.eq_ignore_ascii_case(&name)) {
            unique.push(name);
        }
    }
    unique
}
