//! TOML assessment parser.
//!
//! Loads assessments (question bank plus stage table) from TOML files and
//! directories, and validates them.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::{Assessment, Domain, Question, QuestionBank, StageRange, StageTable};

/// Intermediate TOML structure for parsing assessment files.
#[derive(Debug, Deserialize)]
struct TomlAssessmentFile {
    assessment: TomlAssessmentHeader,
    #[serde(default)]
    stages: TomlStages,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlAssessmentHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlStages {
    #[serde(default = "default_min_stage")]
    min: u8,
    #[serde(default = "default_max_stage")]
    max: u8,
    #[serde(default = "default_triple")]
    default: [u8; 3],
    #[serde(default)]
    domains: BTreeMap<String, [u8; 3]>,
}

impl Default for TomlStages {
    fn default() -> Self {
        Self {
            min: default_min_stage(),
            max: default_max_stage(),
            default: default_triple(),
            domains: BTreeMap::new(),
        }
    }
}

fn default_min_stage() -> u8 {
    1
}

fn default_max_stage() -> u8 {
    8
}

fn default_triple() -> [u8; 3] {
    [1, 2, 3]
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    domain: String,
    #[serde(default = "default_weight")]
    weight: f64,
    #[serde(default)]
    prompt: String,
    options: Vec<String>,
}

fn default_weight() -> f64 {
    1.0
}

/// Parse a single TOML file into an `Assessment`.
pub fn parse_assessment(path: &Path) -> Result<Assessment> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read assessment file: {}", path.display()))?;

    parse_assessment_str(&content, path)
}

/// Parse a TOML string into an `Assessment` (useful for testing).
pub fn parse_assessment_str(content: &str, source_path: &Path) -> Result<Assessment> {
    let parsed: TomlAssessmentFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(index, q)| {
            let domain: Domain = q
                .domain
                .parse()
                .with_context(|| format!("question {index}"))?;

            let found = q.options.len();
            let options: [String; 3] = q
                .options
                .try_into()
                .map_err(|_| ConfigError::OptionCount { index, found })?;

            anyhow::ensure!(
                q.weight.is_finite() && q.weight > 0.0,
                "question {index}: weight must be a positive number, got {}",
                q.weight
            );

            Ok(Question {
                domain,
                weight: q.weight,
                prompt: q.prompt,
                options,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let domains = parsed
        .stages
        .domains
        .into_iter()
        .map(|(name, triple)| {
            let domain: Domain = name
                .parse()
                .with_context(|| format!("stage table entry `{name}`"))?;
            Ok((domain, triple))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(Assessment {
        id: parsed.assessment.id,
        name: parsed.assessment.name,
        description: parsed.assessment.description,
        bank: QuestionBank::new(questions),
        stages: StageTable {
            range: StageRange {
                min: parsed.stages.min,
                max: parsed.stages.max,
            },
            default_stages: parsed.stages.default,
            domains,
        },
    })
}

/// Recursively load all `.toml` assessment files from a directory.
pub fn load_assessment_directory(dir: &Path) -> Result<Vec<Assessment>> {
    let mut assessments = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            assessments.extend(load_assessment_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_assessment(&path) {
                Ok(assessment) => assessments.push(assessment),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(assessments)
}

/// A warning from assessment validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question index (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn question(index: usize, message: impl Into<String>) -> Self {
        Self {
            question: Some(index),
            message: message.into(),
        }
    }

    fn general(message: impl Into<String>) -> Self {
        Self {
            question: None,
            message: message.into(),
        }
    }
}

/// Validate an assessment for common configuration mistakes.
///
/// None of these stop the engine from producing a result; they flag inputs
/// that would be silently defaulted or clamped.
pub fn validate_assessment(assessment: &Assessment) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let bank = &assessment.bank;
    let stages = &assessment.stages;

    if bank.is_empty() {
        warnings.push(ValidationWarning::general("question bank is empty"));
    }

    for (index, q) in bank.iter().enumerate() {
        if !(q.weight.is_finite() && q.weight > 0.0) {
            warnings.push(ValidationWarning::question(
                index,
                format!("weight {} is not positive; the question carries no signal", q.weight),
            ));
        }
        if q.prompt.trim().is_empty() {
            warnings.push(ValidationWarning::question(index, "prompt is empty"));
        }
        if q.options.iter().any(|o| o.trim().is_empty()) {
            warnings.push(ValidationWarning::question(index, "an option label is empty"));
        }
    }

    // Duplicate prompts
    let mut seen_prompts = HashSet::new();
    for (index, q) in bank.iter().enumerate() {
        let prompt = q.prompt.trim();
        if !prompt.is_empty() && !seen_prompts.insert(prompt) {
            warnings.push(ValidationWarning::question(
                index,
                format!("duplicate prompt: {prompt}"),
            ));
        }
    }

    if stages.range.min > stages.range.max {
        warnings.push(ValidationWarning::general(format!(
            "stage range is inverted: min {} > max {}",
            stages.range.min, stages.range.max
        )));
    }

    for domain in bank.domains() {
        if !stages.domains.contains_key(&domain) {
            warnings.push(ValidationWarning::general(format!(
                "domain `{domain}` has no stage table entry; default stages {:?} will be used",
                stages.default_stages
            )));
        }
    }

    let out_of_range = |triple: &[u8; 3]| triple.iter().any(|s| !stages.range.contains(*s));
    if out_of_range(&stages.default_stages) {
        warnings.push(ValidationWarning::general(format!(
            "default stages {:?} fall outside {}..={}",
            stages.default_stages, stages.range.min, stages.range.max
        )));
    }
    for (domain, triple) in &stages.domains {
        if out_of_range(triple) {
            warnings.push(ValidationWarning::general(format!(
                "stages {triple:?} for `{domain}` fall outside {}..={}",
                stages.range.min, stages.range.max
            )));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[assessment]
id = "test-assessment"
name = "Test Assessment"
description = "Two domains"

[stages]
min = 1
max = 8
default = [1, 2, 3]

[stages.domains]
algorithms = [1, 4, 7]
databases = [1, 3, 5]

[[questions]]
domain = "algorithms"
weight = 1.0
prompt = "How comfortable are you analysing time complexity?"
options = ["Never heard of it", "Can do simple loops", "Amortized and recursive analysis"]

[[questions]]
domain = "databases"
weight = 2.0
prompt = "Can you design a normalized schema?"
options = ["No", "With help", "Yes"]
"#;

    #[test]
    fn parse_valid_toml() {
        let a = parse_assessment_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(a.id, "test-assessment");
        assert_eq!(a.bank.len(), 2);
        assert_eq!(a.bank.questions[0].domain, Domain::Algorithms);
        assert_eq!(a.bank.questions[1].weight, 2.0);
        assert_eq!(a.bank.questions[1].options[2], "Yes");
        assert_eq!(a.stages.stages_for(Domain::Algorithms), [1, 4, 7]);
        assert_eq!(a.stages.range, StageRange { min: 1, max: 8 });
        assert!(validate_assessment(&a).is_empty());
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[assessment]
id = "minimal"
name = "Minimal"

[[questions]]
domain = "web"
options = ["a", "b", "c"]
"#;
        let a = parse_assessment_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(a.bank.questions[0].weight, 1.0);
        assert_eq!(a.stages.range, StageRange::default());
        assert_eq!(a.stages.default_stages, [1, 2, 3]);
        assert!(a.stages.domains.is_empty());
    }

    #[test]
    fn parse_rejects_unknown_domain() {
        let toml = r#"
[assessment]
id = "bad"
name = "Bad"

[[questions]]
domain = "astrology"
options = ["a", "b", "c"]
"#;
        let err = parse_assessment_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("unknown domain: astrology"));
    }

    #[test]
    fn parse_rejects_wrong_option_count() {
        let toml = r#"
[assessment]
id = "bad"
name = "Bad"

[[questions]]
domain = "math"
options = ["yes", "no"]
"#;
        let err = parse_assessment_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(err.to_string().contains("has 2 options, expected 3"));
    }

    #[test]
    fn parse_rejects_non_positive_weight() {
        let toml = r#"
[assessment]
id = "bad"
name = "Bad"

[[questions]]
domain = "math"
weight = 0.0
options = ["a", "b", "c"]
"#;
        assert!(parse_assessment_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_assessment_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn validate_flags_missing_stage_entries_and_duplicates() {
        let toml = r#"
[assessment]
id = "warn"
name = "Warn"

[stages]
default = [1, 2, 9]

[[questions]]
domain = "systems"
prompt = "Same"
options = ["a", "b", "c"]

[[questions]]
domain = "systems"
prompt = "Same"
options = ["a", " ", "c"]
"#;
        let a = parse_assessment_str(toml, &PathBuf::from("warn.toml")).unwrap();
        let warnings = validate_assessment(&a);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate prompt")));
        assert!(warnings.iter().any(|w| w.message.contains("no stage table entry")));
        assert!(warnings.iter().any(|w| w.message.contains("option label is empty")));
        assert!(warnings.iter().any(|w| w.message.contains("default stages")));
    }

    #[test]
    fn validate_flags_empty_bank_and_inverted_range() {
        let toml = r#"
[assessment]
id = "empty"
name = "Empty"

[stages]
min = 6
max = 2
default = [2, 3, 4]
"#;
        let a = parse_assessment_str(toml, &PathBuf::from("empty.toml")).unwrap();
        let warnings = validate_assessment(&a);
        assert!(warnings.iter().any(|w| w.message.contains("empty")));
        assert!(warnings.iter().any(|w| w.message.contains("inverted")));
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "not = [valid").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let assessments = load_assessment_directory(dir.path()).unwrap();
        assert_eq!(assessments.len(), 1);
        assert_eq!(assessments[0].id, "test-assessment");
    }
}
