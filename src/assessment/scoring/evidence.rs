use tracing::debug;

use super::super::answers::NamedAnswers;
use super::super::catalog::AssessmentCatalog;
use super::super::domain::{Domain, DomainResult, IssueCategory, Severity};
use super::rules::{self, Criterion, IssueRule, Presence, Scale};
use super::{mean, name_covers, ScoringError};

pub(crate) const RETENTION_TARGET_DAYS: f64 = 90.0;
pub(crate) const TIMESTAMP_OPTIONS: &[(&str, f64)] =
    &[("synchronized", 1.0), ("drifting", 0.5), ("unknown", 0.0)];
pub(crate) const VOLUME_OPTIONS: &[(&str, f64)] =
    &[("adequate", 1.0), ("partial", 0.5), ("insufficient", 0.0)];

const COVERAGE_FLOOR: f64 = 0.60;

const SOURCE_CRITERIA: [Criterion; 3] = [
    Criterion {
        field: "retention_days",
        scale: Scale::Target(RETENTION_TARGET_DAYS),
        presence: Presence::Optional { neutral: 0.0 },
        weight: 1.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::InsufficientRetention,
            severity: Severity::High,
            template: "{subject}: insufficient retention ({value} days, 90 required)",
        },
    },
    Criterion {
        field: "timestamp_sync",
        scale: Scale::Choice(TIMESTAMP_OPTIONS),
        presence: Presence::Required,
        weight: 1.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::TimestampDrift,
            severity: Severity::Medium,
            template: "{subject}: timestamps not synchronized ({value})",
        },
    },
    Criterion {
        field: "volume",
        scale: Scale::Choice(VOLUME_OPTIONS),
        presence: Presence::Required,
        weight: 1.0,
        threshold: 1.0,
        issue: IssueRule {
            category: IssueCategory::LowVolume,
            severity: Severity::Medium,
            template: "{subject}: log volume {value} for investigations",
        },
    },
];

const UNAVAILABLE: IssueRule = IssueRule {
    category: IssueCategory::SourceUnavailable,
    severity: Severity::High,
    template: "{subject}: log source unavailable",
};

const MISSING_CRITICAL: IssueRule = IssueRule {
    category: IssueCategory::MissingCriticalSource,
    severity: Severity::Critical,
    template: "Critical log source missing: {subject}",
};

const LOW_COVERAGE: IssueRule = IssueRule {
    category: IssueCategory::LowEvidenceCoverage,
    severity: Severity::Critical,
    template: "Insufficient log coverage for effective incident investigation",
};

/// Scores log-source availability, retention, timestamp consistency, and
/// volume. Sources are averaged without weighting; critical sources that are
/// absent raise a gap no matter how well the rest score.
#[derive(Debug, Clone)]
pub struct EvidenceScorer {
    critical_sources: Vec<&'static str>,
}

impl EvidenceScorer {
    pub fn new(catalog: &AssessmentCatalog) -> Self {
        Self {
            critical_sources: catalog.critical_log_sources().to_vec(),
        }
    }

    pub fn score(&self, sources: &[NamedAnswers]) -> Result<DomainResult, ScoringError> {
        let mut source_scores = Vec::with_capacity(sources.len());
        let mut available = Vec::new();
        let mut issues = Vec::new();

        for source in sources {
            let name = source.name.trim();
            if name.is_empty() {
                return Err(ScoringError::invalid(
                    "evidence",
                    "name",
                    "log source name must not be empty",
                ));
            }

            let scope = format!("evidence[{name}]");
            if !source.answers.require_bool(&scope, "available")? {
                source_scores.push(0.0);
                issues.push(UNAVAILABLE.render(Domain::Evidence, name, "no"));
                continue;
            }

            let evaluation =
                rules::evaluate(&SOURCE_CRITERIA, &source.answers, &scope, name, Domain::Evidence)?;
            debug!(source = name, score = evaluation.score, "scored log source");

            available.push(name);
            source_scores.push(evaluation.score);
            issues.extend(evaluation.issues);
        }

        for required in &self.critical_sources {
            if !available.iter().any(|name| name_covers(name, required)) {
                issues.push(MISSING_CRITICAL.render(Domain::Evidence, required, ""));
            }
        }

        let score = mean(&source_scores);
        if score < COVERAGE_FLOOR {
            issues.push(LOW_COVERAGE.render(Domain::Evidence, "", ""));
        }

        Ok(DomainResult::new(Domain::Evidence, score, issues))
    }
}
