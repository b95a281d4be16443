//! Log-source inventory import from CSV exports.
//!
//! Expected headers: `Source, Available, Retention Days, Timestamp Sync,
//! Volume`. Only `Source` and `Available` are required; a blank retention
//! cell means the retention period is unknown.

mod parser;

use crate::assessment::{AnswerSet, AnswerValue, NamedAnswers};
use std::io::Read;
use std::path::Path;
use tracing::info;

use parser::InventoryRecord;

#[derive(Debug)]
pub enum InventoryImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: usize, reason: String },
}

impl std::fmt::Display for InventoryImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InventoryImportError::Io(err) => write!(f, "failed to read log inventory: {}", err),
            InventoryImportError::Csv(err) => write!(f, "invalid log inventory CSV data: {}", err),
            InventoryImportError::InvalidRow { line, reason } => {
                write!(f, "log inventory line {}: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for InventoryImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InventoryImportError::Io(err) => Some(err),
            InventoryImportError::Csv(err) => Some(err),
            InventoryImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for InventoryImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for InventoryImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Turns a CSV log-source inventory into evidence answers.
pub struct LogInventoryImporter;

impl LogInventoryImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<NamedAnswers>, InventoryImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<NamedAnswers>, InventoryImportError> {
        let records = parser::parse_records(reader)?;
        let mut sources: Vec<NamedAnswers> = Vec::with_capacity(records.len());

        for record in records {
            let line = record.line;
            let source = to_answers(record)?;
            if sources
                .iter()
                .any(|existing| existing.name.eq_ignore_ascii_case(&source.name))
            {
                return Err(InventoryImportError::InvalidRow {
                    line,
                    reason: format!("duplicate source '{}'", source.name),
                });
            }
            sources.push(source);
        }

        info!(sources = sources.len(), "imported log inventory");
        Ok(sources)
    }
}

fn to_answers(record: InventoryRecord) -> Result<NamedAnswers, InventoryImportError> {
    let line = record.line;
    let invalid = |reason: String| InventoryImportError::InvalidRow { line, reason };

    if record.source.is_empty() {
        return Err(invalid("source name is empty".to_string()));
    }

    let available = parse_flag(&record.available).ok_or_else(|| {
        invalid(format!(
            "Available must be yes or no (got '{}')",
            record.available
        ))
    })?;

    let mut answers = AnswerSet::new().with("available", AnswerValue::Boolean(available));

    if let Some(raw) = record.retention_days {
        let days = raw
            .parse::<f64>()
            .ok()
            .filter(|days| days.is_finite() && *days >= 0.0)
            .ok_or_else(|| {
                invalid(format!(
                    "Retention Days must be a non-negative number (got '{raw}')"
                ))
            })?;
        answers.insert("retention_days", AnswerValue::Number(days));
    }
    if let Some(sync) = record.timestamp_sync {
        answers.insert("timestamp_sync", AnswerValue::Text(normalize_choice(&sync)));
    }
    if let Some(volume) = record.volume {
        answers.insert("volume", AnswerValue::Text(normalize_choice(&volume)));
    }

    Ok(NamedAnswers::new(record.source, answers))
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn normalize_choice(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace([' ', '-'], "_")
}
