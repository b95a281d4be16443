use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::scoring::ScoringError;

/// A single questionnaire response.
///
/// `Text` carries both enumerated choices and free-text notes; choice fields
/// are validated against their declared options when read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    const fn kind(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "a yes/no answer",
            Self::Number(_) => "a number",
            Self::Text(_) => "text",
            Self::List(_) => "a list",
        }
    }
}

/// Field identifier to response mapping collected for one assessment module.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    fields: BTreeMap<String, AnswerValue>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: impl Into<String>, value: AnswerValue) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: AnswerValue) {
        self.fields.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&AnswerValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn require_bool(&self, scope: &str, field: &str) -> Result<bool, ScoringError> {
        self.optional_bool(scope, field)?
            .ok_or_else(|| ScoringError::missing(scope, field))
    }

    pub fn optional_bool(&self, scope: &str, field: &str) -> Result<Option<bool>, ScoringError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(AnswerValue::Boolean(value)) => Ok(Some(*value)),
            Some(other) => Err(mismatch(scope, field, "a yes/no answer", other)),
        }
    }

    pub fn require_number(&self, scope: &str, field: &str) -> Result<f64, ScoringError> {
        self.optional_number(scope, field)?
            .ok_or_else(|| ScoringError::missing(scope, field))
    }

    /// Numbers must be finite and non-negative; every numeric question in the
    /// questionnaire is a count, a duration, or a rating.
    pub fn optional_number(&self, scope: &str, field: &str) -> Result<Option<f64>, ScoringError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(AnswerValue::Number(value)) if !value.is_finite() => Err(ScoringError::invalid(
                scope,
                field,
                "value must be a finite number",
            )),
            Some(AnswerValue::Number(value)) if *value < 0.0 => Err(ScoringError::invalid(
                scope,
                field,
                format!("value {value} must not be negative"),
            )),
            Some(AnswerValue::Number(value)) => Ok(Some(*value)),
            Some(other) => Err(mismatch(scope, field, "a number", other)),
        }
    }

    /// Returns the canonical option matching the answer, compared without
    /// regard to case or surrounding whitespace.
    pub fn require_choice(
        &self,
        scope: &str,
        field: &str,
        options: &[&'static str],
    ) -> Result<&'static str, ScoringError> {
        self.optional_choice(scope, field, options)?
            .ok_or_else(|| ScoringError::missing(scope, field))
    }

    pub fn optional_choice(
        &self,
        scope: &str,
        field: &str,
        options: &[&'static str],
    ) -> Result<Option<&'static str>, ScoringError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(AnswerValue::Text(raw)) => {
                let wanted = raw.trim();
                options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(wanted))
                    .copied()
                    .map(Some)
                    .ok_or_else(|| {
                        ScoringError::invalid(
                            scope,
                            field,
                            format!("'{wanted}' is not one of: {}", options.join(", ")),
                        )
                    })
            }
            Some(other) => Err(mismatch(scope, field, "one of the listed options", other)),
        }
    }

    pub fn optional_text(&self, scope: &str, field: &str) -> Result<Option<&str>, ScoringError> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(AnswerValue::Text(value)) => Ok(Some(value.as_str())),
            Some(other) => Err(mismatch(scope, field, "text", other)),
        }
    }

    pub fn require_list(&self, scope: &str, field: &str) -> Result<&[String], ScoringError> {
        match self.fields.get(field) {
            None => Err(ScoringError::missing(scope, field)),
            Some(AnswerValue::List(values)) => Ok(values.as_slice()),
            Some(other) => Err(mismatch(scope, field, "a list", other)),
        }
    }
}

fn mismatch(scope: &str, field: &str, expected: &str, found: &AnswerValue) -> ScoringError {
    ScoringError::invalid(
        scope,
        field,
        format!("expected {expected}, found {}", found.kind()),
    )
}

/// Answers about one named subject (a log source or a playbook).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedAnswers {
    pub name: String,
    #[serde(default)]
    pub answers: AnswerSet,
}

impl NamedAnswers {
    pub fn new(name: impl Into<String>, answers: AnswerSet) -> Self {
        Self {
            name: name.into(),
            answers,
        }
    }
}

/// Organization metadata gathered before the scored modules. Displayed with
/// the report but never scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProfile {
    pub org_name: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default)]
    pub endpoint_count: u32,
    #[serde(default)]
    pub network_segments: Vec<String>,
    #[serde(default)]
    pub security_tools: Vec<String>,
}

/// Every answer collected during one assessment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentAnswers {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<EnvironmentProfile>,
    #[serde(default)]
    pub evidence: Vec<NamedAnswers>,
    #[serde(default)]
    pub playbooks: Vec<NamedAnswers>,
    #[serde(default)]
    pub policy: AnswerSet,
    #[serde(default)]
    pub scenarios: AnswerSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choices_match_case_insensitively() {
        let answers = AnswerSet::new().with("volume", AnswerValue::Text(" Partial ".to_string()));
        let choice = answers
            .require_choice("evidence[Syslog]", "volume", &["adequate", "partial"])
            .expect("choice resolves");
        assert_eq!(choice, "partial");
    }

    #[test]
    fn missing_required_field_names_scope_and_field() {
        let err = AnswerSet::new()
            .require_bool("evidence[Syslog]", "available")
            .expect_err("field is missing");
        assert_eq!(
            err,
            ScoringError::MissingInput {
                field: "evidence[Syslog].available".to_string()
            }
        );
    }

    #[test]
    fn negative_numbers_are_rejected() {
        let answers = AnswerSet::new().with("retention_days", AnswerValue::Number(-3.0));
        let err = answers
            .optional_number("evidence[Syslog]", "retention_days")
            .expect_err("negative retention rejected");
        assert!(matches!(err, ScoringError::InvalidAnswer { .. }));
    }

    #[test]
    fn answer_sets_deserialize_from_plain_json_maps() {
        let json = r#"{"available": true, "retention_days": 120, "timestamp_sync": "synchronized", "tags": ["a"]}"#;
        let answers: AnswerSet = serde_json::from_str(json).expect("answers parse");
        assert_eq!(answers.get("available"), Some(&AnswerValue::Boolean(true)));
        assert_eq!(
            answers.get("retention_days"),
            Some(&AnswerValue::Number(120.0))
        );
        assert_eq!(
            answers.get("tags"),
            Some(&AnswerValue::List(vec!["a".to_string()]))
        );
    }
}
