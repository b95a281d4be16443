use crate::assessment::{
    AssessmentAnswers, AssessmentCatalog, AssessmentReport, ReadinessAssessor,
};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::export::{export_report, ExportFormat};
use crate::interview::Questionnaire;
use crate::inventory::LogInventoryImporter;
use crate::render::{render_assessment, render_catalog};
use crate::telemetry;
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "irr",
    about = "Incident Readiness & Response Evaluator: score how ready your organization is to investigate and respond to security incidents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive assessment (default command)
    Interview(ExportArgs),
    /// Score a saved answers file without prompting
    Assess(AssessArgs),
    /// Show the playbooks, critical log sources, and scenarios assessed
    Catalog,
}

#[derive(Args, Debug, Default)]
struct ExportArgs {
    /// Write the report in this format after rendering it
    #[arg(long, value_enum)]
    export: Option<ExportFormat>,
    /// Directory for exported reports (defaults to IRR_EXPORT_DIR or the current directory)
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    /// JSON file holding assessment answers
    #[arg(long)]
    answers: PathBuf,
    /// CSV log-source inventory; replaces any evidence answers in the answers file
    #[arg(long)]
    log_inventory: Option<PathBuf>,
    #[command(flatten)]
    export: ExportArgs,
}

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    info!(environment = ?config.environment, "starting irr");

    let command = cli
        .command
        .unwrap_or_else(|| Command::Interview(ExportArgs::default()));

    match command {
        Command::Interview(args) => run_interview(&config, args),
        Command::Assess(args) => run_assess(&config, args),
        Command::Catalog => {
            let stdout = io::stdout();
            render_catalog(&mut stdout.lock(), &AssessmentCatalog::standard())?;
            Ok(())
        }
    }
}

fn run_interview(config: &AppConfig, args: ExportArgs) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut questionnaire =
        Questionnaire::new(stdin.lock(), stdout.lock(), AssessmentCatalog::standard());

    if !questionnaire.consent()? {
        writeln!(questionnaire.output(), "Assessment cancelled.")?;
        return Ok(());
    }

    let answers = questionnaire.run()?;
    let assessment = ReadinessAssessor::standard().assess(&answers)?;
    render_assessment(questionnaire.output(), &assessment, answers.profile.as_ref())?;

    let target = match export_target(config, &args) {
        Some(target) => Some(target),
        None => questionnaire
            .export_format(config.export.format)?
            .map(|format| (format, config.export.directory.clone())),
    };
    export(questionnaire.output(), &assessment.report, target)
}

fn run_assess(config: &AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let mut answers = load_answers(&args.answers)?;

    if let Some(path) = &args.log_inventory {
        let evidence = LogInventoryImporter::from_path(path)?;
        if !answers.evidence.is_empty() {
            warn!(
                replaced = answers.evidence.len(),
                "log inventory replaces evidence answers from the answers file"
            );
        }
        answers.evidence = evidence;
    }

    let assessment = ReadinessAssessor::standard().assess(&answers)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_assessment(&mut out, &assessment, answers.profile.as_ref())?;
    export(&mut out, &assessment.report, export_target(config, &args.export))
}

fn load_answers(path: &Path) -> Result<AssessmentAnswers, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let answers = serde_json::from_str(&raw)?;
    info!(path = %path.display(), "loaded answers file");
    Ok(answers)
}

/// Export requested on the command line. Either flag enables export; the
/// other falls back to the configured default.
fn export_target(config: &AppConfig, args: &ExportArgs) -> Option<(ExportFormat, PathBuf)> {
    if args.export.is_none() && args.output_dir.is_none() {
        return None;
    }
    let format = args.export.unwrap_or(config.export.format);
    let directory = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.export.directory.clone());
    Some((format, directory))
}

fn export<W: Write>(
    out: &mut W,
    report: &AssessmentReport,
    target: Option<(ExportFormat, PathBuf)>,
) -> Result<(), AppError> {
    if let Some((format, directory)) = target {
        let path = export_report(report, format, &directory)?;
        writeln!(out, "\nReport exported to {}", path.display())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppEnvironment, ExportConfig, TelemetryConfig};

    #[test]
    fn interview_is_the_default_command() {
        let cli = Cli::try_parse_from(["irr"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn assess_accepts_inventory_and_export_flags() {
        let cli = Cli::try_parse_from([
            "irr",
            "assess",
            "--answers",
            "answers.json",
            "--log-inventory",
            "logs.csv",
            "--export",
            "yaml",
            "--output-dir",
            "reports",
        ])
        .expect("parses");

        let Some(Command::Assess(args)) = cli.command else {
            panic!("expected assess command");
        };
        assert_eq!(args.answers, PathBuf::from("answers.json"));
        assert_eq!(args.log_inventory, Some(PathBuf::from("logs.csv")));
        assert_eq!(args.export.export, Some(ExportFormat::Yaml));
        assert_eq!(args.export.output_dir, Some(PathBuf::from("reports")));
    }

    #[test]
    fn either_export_flag_enables_export_with_config_fallback() {
        let config = AppConfig {
            environment: AppEnvironment::Test,
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
            export: ExportConfig {
                directory: PathBuf::from("exports"),
                format: ExportFormat::Json,
            },
        };

        assert_eq!(export_target(&config, &ExportArgs::default()), None);

        let format_only = ExportArgs {
            export: Some(ExportFormat::Yaml),
            output_dir: None,
        };
        assert_eq!(
            export_target(&config, &format_only),
            Some((ExportFormat::Yaml, config.export.directory.clone()))
        );

        let directory_only = ExportArgs {
            export: None,
            output_dir: Some(PathBuf::from("reports")),
        };
        assert_eq!(
            export_target(&config, &directory_only),
            Some((config.export.format, PathBuf::from("reports")))
        );
    }

    #[test]
    fn rejects_unknown_export_format() {
        let result = Cli::try_parse_from(["irr", "interview", "--export", "xml"]);
        assert!(result.is_err());
    }
}
