use serde::Serialize;

use super::super::domain::{Domain, DomainResult, IssueCategory, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GapEntry {
    pub description: String,
    pub severity: Severity,
    pub domain: Domain,
    pub category: IssueCategory,
}

/// Gaps partitioned by severity. Within each bucket gaps follow domain order
/// (evidence, playbook, policy, scenario), then the order the scorer emitted
/// them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PrioritizedGaps {
    pub critical: Vec<GapEntry>,
    pub high: Vec<GapEntry>,
    pub medium: Vec<GapEntry>,
}

impl PrioritizedGaps {
    pub fn bucket(&self, severity: Severity) -> &[GapEntry] {
        match severity {
            Severity::Critical => &self.critical,
            Severity::High => &self.high,
            Severity::Medium => &self.medium,
        }
    }

    /// Critical gaps first, then high, then medium.
    pub fn by_priority(&self) -> impl Iterator<Item = &GapEntry> {
        self.critical
            .iter()
            .chain(self.high.iter())
            .chain(self.medium.iter())
    }

    pub fn descriptions(&self, severity: Severity) -> Vec<String> {
        self.bucket(severity)
            .iter()
            .map(|gap| gap.description.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.critical.len() + self.high.len() + self.medium.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Partitions every issue by its scorer-assigned severity. Severities are
/// never recomputed here.
pub fn prioritize(results: &[DomainResult]) -> PrioritizedGaps {
    let mut issues: Vec<_> = results.iter().flat_map(|result| &result.issues).collect();
    issues.sort_by_key(|issue| issue.domain.rank());

    let mut gaps = PrioritizedGaps::default();
    for issue in issues {
        let entry = GapEntry {
            description: issue.text.clone(),
            severity: issue.severity,
            domain: issue.domain,
            category: issue.category,
        };
        match issue.severity {
            Severity::Critical => gaps.critical.push(entry),
            Severity::High => gaps.high.push(entry),
            Severity::Medium => gaps.medium.push(entry),
        }
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::Issue;

    fn issue(domain: Domain, severity: Severity, text: &str) -> Issue {
        Issue {
            text: text.to_string(),
            severity,
            domain,
            category: IssueCategory::NoScenarios,
        }
    }

    #[test]
    fn buckets_follow_domain_order_regardless_of_input_order() {
        let results = vec![
            DomainResult::new(
                Domain::Scenario,
                0.4,
                vec![issue(Domain::Scenario, Severity::High, "scenario-high")],
            ),
            DomainResult::new(
                Domain::Policy,
                0.5,
                vec![
                    issue(Domain::Policy, Severity::Medium, "policy-medium"),
                    issue(Domain::Policy, Severity::High, "policy-high"),
                ],
            ),
            DomainResult::new(
                Domain::Evidence,
                0.5,
                vec![
                    issue(Domain::Evidence, Severity::High, "evidence-high-1"),
                    issue(Domain::Evidence, Severity::Critical, "evidence-critical"),
                    issue(Domain::Evidence, Severity::High, "evidence-high-2"),
                ],
            ),
        ];

        let gaps = prioritize(&results);

        assert_eq!(gaps.descriptions(Severity::Critical), vec!["evidence-critical"]);
        assert_eq!(
            gaps.descriptions(Severity::High),
            vec!["evidence-high-1", "evidence-high-2", "policy-high", "scenario-high"]
        );
        assert_eq!(gaps.descriptions(Severity::Medium), vec!["policy-medium"]);
        assert_eq!(gaps.len(), 6);
    }

    #[test]
    fn no_issues_yield_empty_buckets() {
        let gaps = prioritize(&[DomainResult::new(Domain::Playbook, 1.0, Vec::new())]);
        assert!(gaps.is_empty());
        assert_eq!(gaps.by_priority().count(), 0);
    }
}
