//! roadmap CLI: take the placement self-assessment and manage results.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(
    name = "roadmap",
    version,
    about = "Self-assessment placement for the CS Expert Roadmap"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a set of answers and recommend a starting stage
    Score {
        /// Assessment TOML file (default: configured or built-in assessment)
        #[arg(long)]
        assessment: Option<PathBuf>,

        /// JSON answers file: {"0": 2, "3": 1} or [2, 1, 0, ...]
        #[arg(long)]
        answers: Option<PathBuf>,

        /// Inline answer as question=option (repeatable, overrides --answers)
        #[arg(long = "answer", value_name = "QUESTION=OPTION")]
        answer: Vec<String>,

        /// Selection strategy: weighted, conservative
        #[arg(long)]
        strategy: Option<String>,

        /// Output directory for the saved record
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Print only, do not save a record
        #[arg(long)]
        no_save: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Redisplay a saved recommendation record
    Show {
        /// Record JSON file
        #[arg(long)]
        record: PathBuf,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Compare two saved records
    Compare {
        /// Earlier record JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Later record JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if any domain dropped a level
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the questions of an assessment
    Questions {
        /// Assessment TOML file (default: configured or built-in assessment)
        #[arg(long)]
        assessment: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate assessment TOML files
    Validate {
        /// Path to assessment file or directory
        #[arg(long)]
        assessment: PathBuf,
    },

    /// Create starter config and the reference assessment file
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("roadmap=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            assessment,
            answers,
            answer,
            strategy,
            output,
            format,
            no_save,
            config,
        } => commands::score::execute(commands::score::ScoreArgs {
            assessment,
            answers,
            answer,
            strategy,
            output,
            format,
            no_save,
            config,
        }),
        Commands::Show { record, format } => commands::show::execute(record, format),
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::Questions { assessment, config } => {
            commands::questions::execute(assessment, config)
        }
        Commands::Validate { assessment } => commands::validate::execute(assessment),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
