//! The `roadmap score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use roadmap_core::answers::{parse_answer_pair, AnswerSet, MAX_OPTION};
use roadmap_core::config::load_config_from;
use roadmap_core::model::Strategy;
use roadmap_core::report::RecommendationRecord;

use super::print_record;

pub struct ScoreArgs {
    pub assessment: Option<PathBuf>,
    pub answers: Option<PathBuf>,
    pub answer: Vec<String>,
    pub strategy: Option<String>,
    pub output: Option<PathBuf>,
    pub format: String,
    pub no_save: bool,
    pub config: Option<PathBuf>,
}

pub fn execute(args: ScoreArgs) -> Result<()> {
    anyhow::ensure!(
        matches!(args.format.as_str(), "text" | "json"),
        "unknown format: {} (expected text or json)",
        args.format
    );

    let config = load_config_from(args.config.as_deref())?;
    let assessment = config.load_assessment(args.assessment.as_deref())?;

    let strategy: Strategy = match &args.strategy {
        Some(s) => s.parse()?,
        None => config.default_strategy,
    };

    let mut answers = match &args.answers {
        Some(path) => AnswerSet::load_json(path)?,
        None => AnswerSet::new(),
    };
    for pair in &args.answer {
        let (question, option) = parse_answer_pair(pair)?;
        if question >= assessment.bank.len() {
            eprintln!(
                "Warning: question {question} does not exist ({} questions), ignoring",
                assessment.bank.len()
            );
        } else if option > MAX_OPTION {
            eprintln!(
                "Warning: option {option} for question {question} is out of range, counted as 0"
            );
        }
        answers.select(question, option);
    }

    tracing::debug!(
        assessment = %assessment.id,
        %strategy,
        answers = answers.len(),
        "scoring answers"
    );
    let record = RecommendationRecord::score(&assessment, &answers, strategy);

    let unanswered = assessment.bank.len().saturating_sub(record.answered);
    if unanswered > 0 {
        eprintln!(
            "Note: {unanswered} of {} question(s) unanswered, counted as the lowest option.",
            assessment.bank.len()
        );
    }

    print_record(&record, &args.format)?;

    if !args.no_save {
        let output = args.output.unwrap_or(config.output_dir);
        let timestamp = record.created_at.format("%Y-%m-%dT%H%M%S");
        let short_id = record.id.simple().to_string();
        let path = output.join(format!("recommendation-{timestamp}-{}.json", &short_id[..8]));
        record
            .save_json(&path)
            .with_context(|| format!("could not save record under {}", output.display()))?;
        eprintln!("Record saved to: {}", path.display());
    }

    Ok(())
}
