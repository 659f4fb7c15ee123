//! The `roadmap validate` command.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use roadmap_core::model::{Assessment, Domain};
use roadmap_core::parser::{load_assessment_directory, parse_assessment, validate_assessment};

pub fn execute(assessment_path: PathBuf) -> Result<()> {
    let assessments = if assessment_path.is_dir() {
        load_assessment_directory(&assessment_path)?
    } else {
        vec![parse_assessment(&assessment_path)?]
    };

    let mut total_warnings = 0;

    for assessment in &assessments {
        println!(
            "Assessment: {} ({} questions, {} domains, stages {}..={})",
            assessment.name,
            assessment.bank.len(),
            assessment.bank.domains().len(),
            assessment.stages.range.min,
            assessment.stages.range.max
        );
        println!("{}", domain_summary(assessment));

        let warnings = validate_assessment(assessment);
        for w in &warnings {
            let prefix = w
                .question
                .map(|index| format!("  [q{index}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All assessments valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

/// Questions, total weight and stage triple for every domain the bank uses.
fn domain_summary(assessment: &Assessment) -> Table {
    let mut per_domain: BTreeMap<Domain, (usize, f64)> = BTreeMap::new();
    for q in assessment.bank.iter() {
        let entry = per_domain.entry(q.domain).or_default();
        entry.0 += 1;
        entry.1 += q.weight;
    }

    let mut table = Table::new();
    table.set_header(vec!["Domain", "Questions", "Total weight", "Stages (0 / 1 / 2)"]);
    for (domain, (count, weight)) in per_domain {
        let [low, mid, high] = assessment.stages.stages_for(domain);
        let source = if assessment.stages.domains.contains_key(&domain) {
            ""
        } else {
            " (default)"
        };
        table.add_row(vec![
            Cell::new(domain.label()),
            Cell::new(count),
            Cell::new(weight),
            Cell::new(format!("{low} / {mid} / {high}{source}")),
        ]);
    }
    table
}
