//! The `roadmap show` command.

use std::path::PathBuf;

use anyhow::Result;

use roadmap_core::report::RecommendationRecord;

use super::print_record;

pub fn execute(record_path: PathBuf, format: String) -> Result<()> {
    let record = RecommendationRecord::load_json(&record_path)?;
    if format == "text" {
        println!(
            "Recorded {} (id {})",
            record.created_at.format("%Y-%m-%d %H:%M UTC"),
            record.id
        );
    }
    print_record(&record, &format)
}
