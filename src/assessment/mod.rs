//! Incident-response readiness scoring.
//!
//! Answers flow one way: domain scorers turn each module's answers into a
//! `DomainResult`, then the aggregator, gap prioritizer, and recommendation
//! engine join the four results into an `AssessmentReport`.

pub mod aggregate;
pub mod answers;
pub mod catalog;
pub mod domain;
mod pipeline;
pub mod report;
pub mod scoring;

#[cfg(test)]
mod tests;

pub use aggregate::{aggregate, DomainWeights};
pub use answers::{AnswerSet, AnswerValue, AssessmentAnswers, EnvironmentProfile, NamedAnswers};
pub use catalog::{AssessmentCatalog, ScenarioComplexity, ScenarioTemplate};
pub use domain::{Bottleneck, Domain, DomainResult, Issue, IssueCategory, ReadinessLevel, Severity};
pub use pipeline::{Assessment, AssessmentError, ReadinessAssessor};
pub use report::{prioritize, recommend, AssessmentReport, GapEntry, PrioritizedGaps};
pub use scoring::{
    CapabilityInventory, EvidenceScorer, PlaybookScorer, PolicyScorer, ScenarioScorer,
    ScoringError,
};
