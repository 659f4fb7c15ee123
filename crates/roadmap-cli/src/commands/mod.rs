pub mod compare;
pub mod init;
pub mod questions;
pub mod score;
pub mod show;
pub mod validate;

use anyhow::Result;
use comfy_table::{Cell, Table};

use roadmap_core::report::RecommendationRecord;

/// Print a record in the requested format (`text` or `json`).
pub fn print_record(record: &RecommendationRecord, format: &str) -> Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
        "text" => {
            let mut table = Table::new();
            table.set_header(vec!["Domain", "Score", "Level", "Suggested stage"]);

            for (domain, rec) in &record.recommendation.per_domain {
                let raw = record
                    .aggregate
                    .domain_scores
                    .get(domain)
                    .map(|s| format!("{:.0}%", s.raw * 100.0))
                    .unwrap_or_else(|| "-".to_string());
                table.add_row(vec![
                    Cell::new(domain.label()),
                    Cell::new(raw),
                    Cell::new(rec.level),
                    Cell::new(rec.suggested_stage),
                ]);
            }

            println!(
                "{}: {}/{} questions answered ({} strategy)",
                record.assessment.name,
                record.answered,
                record.assessment.question_count,
                record.strategy
            );
            println!("{table}");
            println!(
                "Overall competency: {:.0}%  Spread: {:.2}",
                record.aggregate.meta * 100.0,
                record.aggregate.dispersion
            );
            println!(
                "Recommended stage: {}",
                record.recommendation.recommended_stage
            );
            println!("Confidence: {}%", record.recommendation.confidence);
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    Ok(())
}
