//! The `roadmap questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use roadmap_core::config::load_config_from;

pub fn execute(assessment_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let assessment = config.load_assessment(assessment_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec!["#", "Domain", "Weight", "Question", "Options (0 / 1 / 2)"]);

    for (index, q) in assessment.bank.iter().enumerate() {
        let options = q
            .options
            .iter()
            .enumerate()
            .map(|(i, label)| format!("{i}) {label}"))
            .collect::<Vec<_>>()
            .join("\n");
        table.add_row(vec![
            Cell::new(index),
            Cell::new(q.domain.label()),
            Cell::new(q.weight),
            Cell::new(&q.prompt),
            Cell::new(options),
        ]);
    }

    println!("{} ({} questions)", assessment.name, assessment.bank.len());
    println!("{table}");
    println!("\nAnswer with: roadmap score --answer <#>=<option> ... or --answers answers.json");

    Ok(())
}
