use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;

use super::aggregate::aggregate;
use super::answers::AssessmentAnswers;
use super::catalog::AssessmentCatalog;
use super::domain::{Domain, DomainResult, ReadinessLevel, Severity};
use super::report::{prioritize, recommend, AssessmentReport, PrioritizedGaps};
use super::scoring::{
    CapabilityInventory, EvidenceScorer, PlaybookScorer, PolicyScorer, ScenarioScorer,
    ScoringError,
};

/// A scoring failure, tagged with the domain whose answers were rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{domain} answers rejected: {source}")]
pub struct AssessmentError {
    pub domain: Domain,
    pub source: ScoringError,
}

impl AssessmentError {
    fn tagged(domain: Domain) -> impl FnOnce(ScoringError) -> Self {
        move |source| Self { domain, source }
    }
}

/// Full output of one run: the exported report plus the per-domain detail
/// used for console rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub report: AssessmentReport,
    pub results: Vec<DomainResult>,
    pub gaps: PrioritizedGaps,
}

impl Assessment {
    pub fn result(&self, domain: Domain) -> Option<&DomainResult> {
        self.results.iter().find(|result| result.domain == domain)
    }
}

/// Runs the four domain scorers and joins their results into a report.
#[derive(Debug, Clone)]
pub struct ReadinessAssessor {
    evidence: EvidenceScorer,
    playbook: PlaybookScorer,
    policy: PolicyScorer,
    scenario: ScenarioScorer,
}

impl ReadinessAssessor {
    pub fn new(catalog: &AssessmentCatalog) -> Self {
        Self {
            evidence: EvidenceScorer::new(catalog),
            playbook: PlaybookScorer::new(catalog),
            policy: PolicyScorer::new(),
            scenario: ScenarioScorer::new(catalog),
        }
    }

    pub fn standard() -> Self {
        Self::new(&AssessmentCatalog::standard())
    }

    pub fn assess(&self, answers: &AssessmentAnswers) -> Result<Assessment, AssessmentError> {
        self.assess_at(answers, Utc::now())
    }

    pub fn assess_at(
        &self,
        answers: &AssessmentAnswers,
        generated_at: DateTime<Utc>,
    ) -> Result<Assessment, AssessmentError> {
        let evidence = self
            .evidence
            .score(&answers.evidence)
            .map_err(AssessmentError::tagged(Domain::Evidence))?;
        let playbook = self
            .playbook
            .score(&answers.playbooks)
            .map_err(AssessmentError::tagged(Domain::Playbook))?;
        let policy = self
            .policy
            .score(&answers.policy)
            .map_err(AssessmentError::tagged(Domain::Policy))?;
        let inventory = CapabilityInventory::from_answers(&answers.evidence, &answers.playbooks)
            .map_err(AssessmentError::tagged(Domain::Scenario))?;
        let scenario = self
            .scenario
            .score(&answers.scenarios, &inventory)
            .map_err(AssessmentError::tagged(Domain::Scenario))?;

        let (overall_score, readiness_level) = aggregate(&evidence, &playbook, &policy, &scenario);
        let report_scores = (evidence.score, scenario.score, playbook.score, policy.score);

        let results = vec![evidence, playbook, policy, scenario];
        let gaps = prioritize(&results);
        let recommendations = recommend(&gaps, &results);

        info!(
            overall_score,
            readiness = readiness_level.label(),
            critical = gaps.critical.len(),
            high = gaps.high.len(),
            medium = gaps.medium.len(),
            "assessment complete"
        );

        let report = build_report(
            overall_score,
            readiness_level,
            report_scores,
            &gaps,
            recommendations,
            generated_at,
        );

        Ok(Assessment {
            report,
            results,
            gaps,
        })
    }
}

impl Default for ReadinessAssessor {
    fn default() -> Self {
        Self::standard()
    }
}

fn build_report(
    overall_score: f64,
    readiness_level: ReadinessLevel,
    (evidence, timeline, playbook, policy): (f64, f64, f64, f64),
    gaps: &PrioritizedGaps,
    recommendations: Vec<String>,
    generated_at: DateTime<Utc>,
) -> AssessmentReport {
    AssessmentReport {
        overall_score,
        readiness_level,
        evidence_availability: evidence,
        timeline_reconstruction: timeline,
        playbook_effectiveness: playbook,
        policy_alignment: policy,
        critical_gaps: gaps.descriptions(Severity::Critical),
        high_priority_gaps: gaps.descriptions(Severity::High),
        medium_priority_gaps: gaps.descriptions(Severity::Medium),
        recommendations,
        timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
