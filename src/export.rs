use crate::assessment::AssessmentReport;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Yaml,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            other => Err(format!("unsupported export format '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write report to {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encode report as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Serializes the report in the requested format.
pub fn encode(report: &AssessmentReport, format: ExportFormat) -> Result<String, ExportError> {
    let body = match format {
        ExportFormat::Json => serde_json::to_string_pretty(report)?,
        ExportFormat::Yaml => serde_yaml::to_string(report)?,
    };
    Ok(body)
}

/// `irr_assessment_<YYYYmmdd_HHMMSS>.<ext>`, stamped with the report's own
/// generation time so re-exporting a report yields the same name.
pub fn file_name(report: &AssessmentReport, format: ExportFormat) -> String {
    let generated_at = DateTime::parse_from_rfc3339(&report.timestamp)
        .map(|stamp| stamp.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());
    format!(
        "irr_assessment_{}.{}",
        generated_at.format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Writes the report into `directory`, creating it if needed, and returns
/// the path written.
pub fn export_report(
    report: &AssessmentReport,
    format: ExportFormat,
    directory: &Path,
) -> Result<PathBuf, ExportError> {
    let body = encode(report, format)?;
    let path = directory.join(file_name(report, format));

    fs::create_dir_all(directory).map_err(|source| ExportError::Io {
        path: directory.to_path_buf(),
        source,
    })?;
    fs::write(&path, body).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), %format, "exported assessment report");
    Ok(path)
}
