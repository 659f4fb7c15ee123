//! Core data model types for roadmap.
//!
//! These types describe the assessment configuration (question bank and
//! stage table) and the selection strategy. They are plain immutable values:
//! construct them once and pass them into [`crate::scoring::aggregate`] and
//! [`crate::recommend::recommend`].

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A competency category that questions are tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Programming,
    Algorithms,
    DataStructures,
    Databases,
    Web,
    Math,
    Systems,
    MachineLearning,
}

impl Domain {
    /// Every known domain, in declaration order.
    pub const ALL: [Domain; 8] = [
        Domain::Programming,
        Domain::Algorithms,
        Domain::DataStructures,
        Domain::Databases,
        Domain::Web,
        Domain::Math,
        Domain::Systems,
        Domain::MachineLearning,
    ];

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Programming => "Programming",
            Domain::Algorithms => "Algorithms",
            Domain::DataStructures => "Data Structures",
            Domain::Databases => "Databases",
            Domain::Web => "Web",
            Domain::Math => "Math",
            Domain::Systems => "Systems",
            Domain::MachineLearning => "Machine Learning",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Domain::Programming => "programming",
            Domain::Algorithms => "algorithms",
            Domain::DataStructures => "data_structures",
            Domain::Databases => "databases",
            Domain::Web => "web",
            Domain::Math => "math",
            Domain::Systems => "systems",
            Domain::MachineLearning => "machine_learning",
        };
        f.write_str(name)
    }
}

impl FromStr for Domain {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "programming" => Ok(Domain::Programming),
            "algorithms" | "algo" => Ok(Domain::Algorithms),
            "data_structures" | "ds" => Ok(Domain::DataStructures),
            "databases" | "db" => Ok(Domain::Databases),
            "web" => Ok(Domain::Web),
            "math" | "mathematics" => Ok(Domain::Math),
            "systems" => Ok(Domain::Systems),
            "machine_learning" | "ml" => Ok(Domain::MachineLearning),
            _ => Err(ConfigError::UnknownDomain(s.to_string())),
        }
    }
}

/// Discretized competency estimate for one domain.
///
/// The numeric level is [`Level::index`]: `Beginner` = 0, `Intermediate` = 1,
/// `Advanced` = 2. Records serialize the lowercase name instead of the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// Level for a raw score: `round(raw * 2)`.
    ///
    /// Any value below 0.25 (including NaN) maps to `Beginner`, anything at or
    /// above 0.75 to `Advanced`.
    pub fn from_raw(raw: f64) -> Self {
        match (raw * 2.0).round() as i64 {
            i64::MIN..=0 => Level::Beginner,
            1 => Level::Intermediate,
            _ => Level::Advanced,
        }
    }

    /// Position of this level in a stage triple (0, 1, or 2).
    pub fn index(&self) -> usize {
        match self {
            Level::Beginner => 0,
            Level::Intermediate => 1,
            Level::Advanced => 2,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Beginner => write!(f, "beginner"),
            Level::Intermediate => write!(f, "intermediate"),
            Level::Advanced => write!(f, "advanced"),
        }
    }
}

/// A single assessment item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Competency domain this question measures.
    pub domain: Domain,
    /// Importance weight. Must be positive.
    pub weight: f64,
    /// The question text shown to the learner.
    #[serde(default)]
    pub prompt: String,
    /// Response labels in ascending skill order (options 0, 1, 2).
    pub options: [String; 3],
}

/// Ordered list of questions. A question's identity is its index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    pub questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// Distinct domains referenced by at least one question.
    pub fn domains(&self) -> BTreeSet<Domain> {
        self.questions.iter().map(|q| q.domain).collect()
    }
}

/// Inclusive bounds for stage identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageRange {
    pub min: u8,
    pub max: u8,
}

impl StageRange {
    /// Clamp a stage into `[min, max]`. Never panics, even for an inverted range.
    pub fn clamp(&self, stage: i64) -> u8 {
        let clamped = stage.min(i64::from(self.max)).max(i64::from(self.min));
        clamped.clamp(0, i64::from(u8::MAX)) as u8
    }

    pub fn contains(&self, stage: u8) -> bool {
        (self.min..=self.max).contains(&stage)
    }
}

impl Default for StageRange {
    fn default() -> Self {
        Self { min: 1, max: 8 }
    }
}

/// Maps each domain to the stages suggested for levels 0, 1 and 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTable {
    /// Valid stage range; computed stages are clamped into it.
    #[serde(default)]
    pub range: StageRange,
    /// Triple used for domains absent from `domains`.
    #[serde(default = "default_stage_triple")]
    pub default_stages: [u8; 3],
    /// Per-domain triples.
    #[serde(default)]
    pub domains: BTreeMap<Domain, [u8; 3]>,
}

fn default_stage_triple() -> [u8; 3] {
    [1, 2, 3]
}

impl Default for StageTable {
    fn default() -> Self {
        Self {
            range: StageRange::default(),
            default_stages: default_stage_triple(),
            domains: BTreeMap::new(),
        }
    }
}

impl StageTable {
    /// The stage triple for a domain, falling back to the default triple.
    pub fn stages_for(&self, domain: Domain) -> [u8; 3] {
        self.domains
            .get(&domain)
            .copied()
            .unwrap_or(self.default_stages)
    }

    /// The stage suggested for a domain at a given level.
    pub fn stage_for(&self, domain: Domain, level: Level) -> u8 {
        self.stages_for(domain)[level.index().min(2)]
    }

    /// Builder-style helper for setting one domain's triple.
    pub fn with_domain(mut self, domain: Domain, stages: [u8; 3]) -> Self {
        self.domains.insert(domain, stages);
        self
    }
}

/// How per-domain suggested stages collapse into one recommended stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Weight-averaged suggested stage, rounded.
    #[default]
    Weighted,
    /// The highest suggested stage across domains.
    Conservative,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Weighted => write!(f, "weighted"),
            Strategy::Conservative => write!(f, "conservative"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weighted" | "average" => Ok(Strategy::Weighted),
            "conservative" | "max" => Ok(Strategy::Conservative),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

/// A complete assessment: the question bank plus the stage table it maps onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    /// Unique identifier for this assessment.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this assessment.
    #[serde(default)]
    pub description: String,
    /// The questions, in presentation order.
    pub bank: QuestionBank,
    /// Stage lookup for the recommendation engine.
    pub stages: StageTable,
}
