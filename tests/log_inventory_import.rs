use irr::assessment::{AnswerValue, AssessmentCatalog, EvidenceScorer, IssueCategory};
use irr::inventory::{InventoryImportError, LogInventoryImporter};

#[test]
fn importer_reads_inventory_export() {
    let data = include_bytes!("fixtures/log_inventory.csv");

    let sources = LogInventoryImporter::from_reader(&data[..]).expect("inventory imports");

    assert_eq!(sources.len(), 6);
    let windows = &sources[0];
    assert_eq!(windows.name, "Windows Event Logs");
    assert_eq!(windows.answers.get("retention_days"), Some(&AnswerValue::Number(180.0)));
    assert_eq!(
        windows.answers.get("timestamp_sync"),
        Some(&AnswerValue::Text("synchronized".to_string()))
    );

    let firewall = &sources[2];
    assert!(!firewall.answers.contains("retention_days"));

    let network = &sources[4];
    assert_eq!(network.answers.get("available"), Some(&AnswerValue::Boolean(false)));
    assert!(!network.answers.contains("volume"));
}

#[test]
fn imported_inventory_scores_like_typed_answers() {
    let data = include_bytes!("fixtures/log_inventory.csv");
    let sources = LogInventoryImporter::from_reader(&data[..]).expect("inventory imports");

    let result = EvidenceScorer::new(&AssessmentCatalog::standard())
        .score(&sources)
        .expect("imported answers score");

    assert!((0.0..=1.0).contains(&result.score));
    let categories: Vec<IssueCategory> = result.issues.iter().map(|issue| issue.category).collect();
    assert!(categories.contains(&IssueCategory::SourceUnavailable));
    assert!(categories.contains(&IssueCategory::InsufficientRetention));
    assert!(categories.contains(&IssueCategory::TimestampDrift));
    assert!(!categories.contains(&IssueCategory::MissingCriticalSource));
}

#[test]
fn invalid_rows_report_their_line() {
    let csv = "Source,Available,Retention Days\nSyslog,yes,90\nEDR,sometimes,30\n";

    let err = LogInventoryImporter::from_reader(csv.as_bytes()).expect_err("bad flag rejected");

    match err {
        InventoryImportError::InvalidRow { line, reason } => {
            assert_eq!(line, 3);
            assert!(reason.contains("sometimes"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn invalid_row_after_multiline_cell_reports_its_own_line() {
    let csv = "Source,Available\n\"Firewall Logs\n(perimeter)\",yes\nEDR,sometimes\n";

    let err = LogInventoryImporter::from_reader(csv.as_bytes()).expect_err("bad flag rejected");

    assert!(matches!(err, InventoryImportError::InvalidRow { line: 4, .. }));
}

#[test]
fn rejects_bad_retention_and_duplicates() {
    let negative = "Source,Available,Retention Days\nSyslog,yes,-5\n";
    assert!(matches!(
        LogInventoryImporter::from_reader(negative.as_bytes()),
        Err(InventoryImportError::InvalidRow { line: 2, .. })
    ));

    let duplicate = "Source,Available\nSyslog,yes\nsyslog,no\n";
    let err = LogInventoryImporter::from_reader(duplicate.as_bytes()).expect_err("duplicate");
    assert!(err.to_string().contains("duplicate source 'syslog'"));
}

#[test]
fn missing_required_column_is_a_csv_error() {
    let csv = "Source,Retention Days\nSyslog,90\n";

    let err = LogInventoryImporter::from_reader(csv.as_bytes()).expect_err("Available missing");

    assert!(matches!(err, InventoryImportError::Csv(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = LogInventoryImporter::from_path("does/not/exist.csv").expect_err("no such file");

    assert!(matches!(err, InventoryImportError::Io(_)));
}
