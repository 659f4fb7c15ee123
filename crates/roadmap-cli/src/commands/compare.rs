//! The `roadmap compare` command.

use std::path::PathBuf;

use anyhow::Result;

use roadmap_core::report::RecommendationRecord;

pub fn execute(
    baseline_path: PathBuf,
    current_path: PathBuf,
    fail_on_regression: bool,
    format: String,
) -> Result<()> {
    let baseline = RecommendationRecord::load_json(&baseline_path)?;
    let current = RecommendationRecord::load_json(&current_path)?;

    if baseline.assessment.id != current.assessment.id {
        eprintln!(
            "Warning: comparing different assessments ({} vs {})",
            baseline.assessment.id, current.assessment.id
        );
    }

    let report = current.compare(&baseline);

    match format.as_str() {
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            // text format
            println!(
                "Stage: {} -> {} ({:+}), confidence: {}% -> {}% ({:+})",
                report.baseline_stage,
                report.current_stage,
                report.stage_delta(),
                report.baseline_confidence,
                report.current_confidence,
                report.confidence_delta()
            );
            println!(
                "Domains: {} improved, {} regressed, {} unchanged",
                report.improved.len(),
                report.regressed.len(),
                report.unchanged
            );

            if !report.improved.is_empty() {
                println!("\nImproved:");
                for c in &report.improved {
                    println!(
                        "  {} {} -> {} (stage {} -> {})",
                        c.domain.label(),
                        c.baseline_level,
                        c.current_level,
                        c.baseline_stage,
                        c.current_stage
                    );
                }
            }

            if !report.regressed.is_empty() {
                println!("\nRegressed:");
                for c in &report.regressed {
                    println!(
                        "  {} {} -> {} (stage {} -> {})",
                        c.domain.label(),
                        c.baseline_level,
                        c.current_level,
                        c.baseline_stage,
                        c.current_stage
                    );
                }
            }

            if report.new_domains > 0 {
                println!("\n{} new domain(s)", report.new_domains);
            }
            if report.removed_domains > 0 {
                println!("{} removed domain(s)", report.removed_domains);
            }
        }
    }

    if fail_on_regression && report.has_regressions() {
        std::process::exit(1);
    }

    Ok(())
}
