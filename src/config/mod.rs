use crate::export::ExportFormat;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub export: ExportConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("IRR_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("IRR_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let directory = env::var("IRR_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        let format = match env::var("IRR_EXPORT_FORMAT") {
            Ok(raw) => raw
                .parse::<ExportFormat>()
                .map_err(|_| ConfigError::InvalidExportFormat { value: raw })?,
            Err(_) => ExportFormat::Json,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            export: ExportConfig { directory, format },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where and how reports are written when export is requested without
/// explicit flags.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub format: ExportFormat,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidExportFormat { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidExportFormat { value } => {
                write!(f, "IRR_EXPORT_FORMAT must be json or yaml (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
