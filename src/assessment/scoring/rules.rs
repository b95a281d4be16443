use super::super::answers::AnswerSet;
use super::super::domain::{Domain, Issue, IssueCategory, Severity};
use super::ScoringError;

/// How an answer maps onto a partial score in `[0, 1]`.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scale {
    /// Yes scores 1.
    Flag,
    /// Yes scores 0; the question asks about a known problem.
    Hazard,
    /// Each option carries its own contribution.
    Choice(&'static [(&'static str, f64)]),
    /// Rating from 1 to `max`, mapped linearly.
    Rating { max: f64 },
    /// Number divided by `target`, capped at 1.
    Target(f64),
    /// Scores 1 while the number stays at or below the limit.
    Ceiling(f64),
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Presence {
    Required,
    /// Unanswered optional fields contribute `neutral` and read as "unknown".
    Optional { neutral: f64 },
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct IssueRule {
    pub category: IssueCategory,
    pub severity: Severity,
    /// Supports `{subject}` and `{value}` placeholders.
    pub template: &'static str,
}

impl IssueRule {
    pub(crate) fn render(&self, domain: Domain, subject: &str, value: &str) -> Issue {
        Issue {
            text: self
                .template
                .replace("{subject}", subject)
                .replace("{value}", value),
            severity: self.severity,
            domain,
            category: self.category,
        }
    }
}

/// One row of a scorer's rule table.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Criterion {
    pub field: &'static str,
    pub scale: Scale,
    pub presence: Presence,
    /// Zero-weight criteria only report issues.
    pub weight: f64,
    /// Contributions strictly below the threshold emit the issue.
    pub threshold: f64,
    pub issue: IssueRule,
}

#[derive(Debug)]
pub(crate) struct Evaluation {
    pub score: f64,
    pub issues: Vec<Issue>,
}

pub(crate) fn evaluate(
    criteria: &[Criterion],
    answers: &AnswerSet,
    scope: &str,
    subject: &str,
    domain: Domain,
) -> Result<Evaluation, ScoringError> {
    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    let mut issues = Vec::new();

    for criterion in criteria {
        let (contribution, value) = match measure(criterion, answers, scope)? {
            Some(measured) => measured,
            None => match criterion.presence {
                Presence::Required => return Err(ScoringError::missing(scope, criterion.field)),
                Presence::Optional { neutral } => (neutral, "unknown".to_string()),
            },
        };

        weighted += contribution * criterion.weight;
        total_weight += criterion.weight;

        if contribution < criterion.threshold {
            issues.push(criterion.issue.render(domain, subject, &value));
        }
    }

    let score = if total_weight > 0.0 {
        (weighted / total_weight).clamp(0.0, 1.0)
    } else {
        1.0
    };

    Ok(Evaluation { score, issues })
}

fn measure(
    criterion: &Criterion,
    answers: &AnswerSet,
    scope: &str,
) -> Result<Option<(f64, String)>, ScoringError> {
    let field = criterion.field;
    let measured = match criterion.scale {
        Scale::Flag => answers
            .optional_bool(scope, field)?
            .map(|yes| (if yes { 1.0 } else { 0.0 }, yes_no(yes))),
        Scale::Hazard => answers
            .optional_bool(scope, field)?
            .map(|yes| (if yes { 0.0 } else { 1.0 }, yes_no(yes))),
        Scale::Choice(options) => {
            let names: Vec<&'static str> = options.iter().map(|(name, _)| *name).collect();
            answers
                .optional_choice(scope, field, &names)?
                .and_then(|chosen| {
                    options
                        .iter()
                        .find(|(name, _)| *name == chosen)
                        .map(|(name, contribution)| (*contribution, name.to_string()))
                })
        }
        Scale::Rating { max } => match answers.optional_number(scope, field)? {
            Some(rating) if !(1.0..=max).contains(&rating) => {
                return Err(ScoringError::invalid(
                    scope,
                    field,
                    format!("rating {rating} must be between 1 and {max}"),
                ));
            }
            Some(rating) => Some(((rating - 1.0) / (max - 1.0), rating.to_string())),
            None => None,
        },
        Scale::Target(target) => answers
            .optional_number(scope, field)?
            .map(|value| ((value / target).min(1.0), value.to_string())),
        Scale::Ceiling(limit) => answers
            .optional_number(scope, field)?
            .map(|value| (if value <= limit { 1.0 } else { 0.0 }, value.to_string())),
    };

    Ok(measured)
}

fn yes_no(value: bool) -> String {
    let label = if value { "yes" } else { "no" };
    label.to_string()
}
