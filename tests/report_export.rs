use std::fs;
use std::path::PathBuf;

use irr::assessment::{AssessmentReport, ReadinessLevel};
use irr::export::{encode, export_report, file_name, ExportFormat};

fn sample_report() -> AssessmentReport {
    AssessmentReport {
        overall_score: 0.7785,
        readiness_level: ReadinessLevel::High,
        evidence_availability: 0.82,
        timeline_reconstruction: 0.75,
        playbook_effectiveness: 0.73,
        policy_alignment: 0.80,
        critical_gaps: Vec::new(),
        high_priority_gaps: vec!["Escalation paths and approval thresholds are informal".to_string()],
        medium_priority_gaps: vec!["Syslog: log volume partial for investigations".to_string()],
        recommendations: vec!["Establish clear escalation paths and approval thresholds".to_string()],
        timestamp: "2026-10-15T14:03:09Z".to_string(),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("irr-export-{name}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn json_export_writes_timestamped_file() {
    let dir = scratch_dir("json");
    let report = sample_report();

    let path = export_report(&report, ExportFormat::Json, &dir).expect("export succeeds");

    assert_eq!(
        path.file_name().and_then(|name| name.to_str()),
        Some("irr_assessment_20261015_140309.json")
    );
    let written = fs::read_to_string(&path).expect("report readable");
    let decoded: AssessmentReport = serde_json::from_str(&written).expect("valid json");
    assert_eq!(decoded, report);

    let value: serde_json::Value = serde_json::from_str(&written).expect("valid json");
    assert_eq!(value["readiness_level"], "High");

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn yaml_export_uses_same_keys() {
    let dir = scratch_dir("yaml");
    let report = sample_report();

    let path = export_report(&report, ExportFormat::Yaml, &dir).expect("export succeeds");

    assert_eq!(path.extension().and_then(|ext| ext.to_str()), Some("yaml"));
    let written = fs::read_to_string(&path).expect("report readable");
    let decoded: AssessmentReport = serde_yaml::from_str(&written).expect("valid yaml");
    assert_eq!(decoded, report);
    for key in [
        "overall_score:",
        "readiness_level: High",
        "timeline_reconstruction:",
        "medium_priority_gaps:",
        "timestamp:",
    ] {
        assert!(written.contains(key), "missing {key} in:\n{written}");
    }

    fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn json_and_yaml_carry_identical_content() {
    let report = sample_report();

    let json = encode(&report, ExportFormat::Json).expect("json encodes");
    let yaml = encode(&report, ExportFormat::Yaml).expect("yaml encodes");

    let from_json: serde_json::Value = serde_json::from_str(&json).expect("json parses");
    let from_yaml: serde_json::Value = serde_yaml::from_str(&yaml).expect("yaml parses");
    assert_eq!(from_json, from_yaml);
}

#[test]
fn file_name_follows_report_timestamp() {
    let report = sample_report();

    assert_eq!(
        file_name(&report, ExportFormat::Yaml),
        "irr_assessment_20261015_140309.yaml"
    );
}

#[test]
fn export_into_a_file_path_fails() {
    let dir = scratch_dir("blocked");
    fs::create_dir_all(&dir).expect("scratch dir");
    let blocker = dir.join("not-a-directory");
    fs::write(&blocker, "occupied").expect("blocker written");

    let err = export_report(&sample_report(), ExportFormat::Json, &blocker)
        .expect_err("cannot write under a file");

    assert!(err.to_string().contains("not-a-directory"));
    fs::remove_dir_all(&dir).expect("cleanup");
}
