//! The `roadmap init` command.

use std::path::Path;

use anyhow::Result;

use roadmap_core::reference::REFERENCE_ASSESSMENT_TOML;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("roadmap.toml"), SAMPLE_CONFIG)?;

    std::fs::create_dir_all("assessments")?;
    write_if_missing(
        Path::new("assessments/cs-roadmap.toml"),
        REFERENCE_ASSESSMENT_TOML,
    )?;
    write_if_missing(Path::new("answers.example.json"), EXAMPLE_ANSWERS)?;

    println!("\nNext steps:");
    println!("  1. Run: roadmap validate --assessment assessments/cs-roadmap.toml");
    println!("  2. Run: roadmap questions");
    println!("  3. Run: roadmap score --answers answers.example.json");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# roadmap configuration

# Assessment to score against. Relative paths resolve against this file;
# ${VAR} references are expanded from the environment.
assessment = "assessments/cs-roadmap.toml"

# weighted: weight-averaged suggested stage
# conservative: highest suggested stage across domains
default_strategy = "weighted"

output_dir = "./roadmap-results"
"#;

const EXAMPLE_ANSWERS: &str = r#"{
  "0": 2,
  "1": 1,
  "2": 1,
  "3": 1,
  "4": 1,
  "5": 0,
  "6": 1,
  "7": 0,
  "8": 2,
  "9": 1,
  "10": 0,
  "11": 0,
  "12": 1,
  "13": 0,
  "14": 0,
  "15": 0
}
"#;
