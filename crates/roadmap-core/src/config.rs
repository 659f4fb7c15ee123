//! Configuration loading.
//!
//! `roadmap.toml` chooses which assessment to use, the default selection
//! strategy, and where recommendation records are written.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::model::{Assessment, Strategy};
use crate::parser::parse_assessment;
use crate::reference::reference_assessment;

/// Environment variable overriding `default_strategy`.
pub const STRATEGY_ENV: &str = "ROADMAP_STRATEGY";

/// Top-level roadmap configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Assessment file to use. `None` selects the built-in reference assessment.
    #[serde(default)]
    pub assessment: Option<PathBuf>,
    /// Strategy used when none is given on the command line.
    #[serde(default)]
    pub default_strategy: Strategy,
    /// Directory for saved recommendation records.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./roadmap-results")
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            assessment: None,
            default_strategy: Strategy::default(),
            output_dir: default_output_dir(),
        }
    }
}

impl RoadmapConfig {
    /// Load the configured assessment, or the reference one.
    ///
    /// An explicit `override_path` takes precedence over the config.
    pub fn load_assessment(&self, override_path: Option<&Path>) -> Result<Assessment> {
        match override_path.or(self.assessment.as_deref()) {
            Some(path) => parse_assessment(path),
            None => reference_assessment(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `roadmap.toml` in the current directory
/// 2. `~/.config/roadmap/config.toml`
///
/// Environment variable override: `ROADMAP_STRATEGY`.
pub fn load_config() -> Result<RoadmapConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<RoadmapConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("roadmap.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => RoadmapConfig::default(),
    };

    if let Ok(value) = std::env::var(STRATEGY_ENV) {
        config.default_strategy = value
            .parse()
            .with_context(|| format!("invalid {STRATEGY_ENV}"))?;
    }

    // Relative assessment paths are relative to the config file.
    if let (Some(assessment), Some(config_path)) = (&config.assessment, &config_path) {
        if assessment.is_relative() {
            if let Some(parent) = config_path.parent() {
                config.assessment = Some(parent.join(assessment));
            }
        }
    }

    tracing::debug!(?config_path, ?config, "loaded configuration");
    Ok(config)
}

/// Parse a config TOML string, resolving `${VAR}` references in the assessment path.
pub fn parse_config_str(content: &str) -> Result<RoadmapConfig> {
    let mut config: RoadmapConfig = toml::from_str(content)?;
    config.assessment = config
        .assessment
        .map(|p| PathBuf::from(resolve_env_vars(&p.to_string_lossy())));
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("roadmap"))
}
