use std::io::{self, Write};

use crate::assessment::report::views::percent;
use crate::assessment::{Assessment, AssessmentCatalog, EnvironmentProfile};

const HIGH_GAPS_SHOWN: usize = 5;
const RECOMMENDATIONS_SHOWN: usize = 10;

pub fn render_assessment<W: Write>(
    out: &mut W,
    assessment: &Assessment,
    profile: Option<&EnvironmentProfile>,
) -> io::Result<()> {
    let report = &assessment.report;

    writeln!(out, "Incident readiness assessment")?;
    if let Some(profile) = profile {
        writeln!(
            out,
            "Organization: {} ({} endpoints)",
            profile.org_name, profile.endpoint_count
        )?;
        if !profile.platforms.is_empty() {
            writeln!(out, "Platforms: {}", profile.platforms.join(", "))?;
        }
        if !profile.security_tools.is_empty() {
            writeln!(out, "Security tools: {}", profile.security_tools.join(", "))?;
        }
    }
    writeln!(out, "Generated: {}", report.timestamp)?;

    writeln!(
        out,
        "\nReadiness level: {} ({}%)",
        report.readiness_level,
        report.overall_percent()
    )?;

    writeln!(out, "\nComponent scores")?;
    for (label, score) in [
        ("Evidence Availability", report.evidence_availability),
        ("Timeline Reconstruction", report.timeline_reconstruction),
        ("Playbook Effectiveness", report.playbook_effectiveness),
        ("Policy Alignment", report.policy_alignment),
    ] {
        writeln!(out, "- {label}: {}%", percent(score))?;
    }

    if report.critical_gaps.is_empty() {
        writeln!(out, "\nCritical gaps: none")?;
    } else {
        writeln!(out, "\nCritical gaps")?;
        for gap in &report.critical_gaps {
            writeln!(out, "- {gap}")?;
        }
    }

    if report.high_priority_gaps.is_empty() {
        writeln!(out, "\nHigh priority gaps: none")?;
    } else {
        writeln!(out, "\nHigh priority gaps")?;
        for gap in report.high_priority_gaps.iter().take(HIGH_GAPS_SHOWN) {
            writeln!(out, "- {gap}")?;
        }
        let hidden = report.high_priority_gaps.len().saturating_sub(HIGH_GAPS_SHOWN);
        if hidden > 0 {
            writeln!(out, "- ... and {hidden} more in the exported report")?;
        }
    }

    writeln!(
        out,
        "\nMedium priority gaps: {}",
        report.medium_priority_gaps.len()
    )?;

    writeln!(out, "\nTop recommendations")?;
    for (index, recommendation) in report
        .recommendations
        .iter()
        .take(RECOMMENDATIONS_SHOWN)
        .enumerate()
    {
        writeln!(out, "{}. {recommendation}", index + 1)?;
    }

    Ok(())
}

pub fn render_catalog<W: Write>(out: &mut W, catalog: &AssessmentCatalog) -> io::Result<()> {
    writeln!(out, "Standard playbooks")?;
    for playbook in catalog.playbooks() {
        writeln!(out, "- {playbook}")?;
    }

    writeln!(out, "\nCritical log sources")?;
    for source in catalog.critical_log_sources() {
        writeln!(out, "- {source}")?;
    }

    writeln!(out, "\nScenarios")?;
    for scenario in catalog.scenarios() {
        writeln!(
            out,
            "- {} [{}] ({} complexity): {}",
            scenario.name,
            scenario.key,
            scenario.complexity.label(),
            scenario.description
        )?;
        writeln!(out, "    logs: {}", scenario.required_logs.join(", "))?;
        writeln!(
            out,
            "    playbooks: {}",
            scenario.required_playbooks.join(", ")
        )?;
    }

    Ok(())
}
