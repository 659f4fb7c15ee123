//! Recommendation records with JSON persistence and progress comparison.
//!
//! A record stores a recommendation verbatim, together with the aggregate it
//! came from, so it can be redisplayed later without recomputation.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::answers::AnswerSet;
use crate::model::{Assessment, Domain, Level, Strategy};
use crate::recommend::{recommend, Recommendation};
use crate::scoring::{aggregate, AggregateResult};

/// A saved assessment outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationRecord {
    /// Unique record identifier.
    pub id: Uuid,
    /// When the answers were scored.
    pub created_at: DateTime<Utc>,
    /// Which assessment was taken.
    pub assessment: AssessmentSummary,
    /// Strategy used to pick the recommended stage.
    pub strategy: Strategy,
    /// Number of questions with a valid answer.
    pub answered: usize,
    /// Scores behind the recommendation.
    pub aggregate: AggregateResult,
    /// The recommendation as produced.
    pub recommendation: Recommendation,
}

/// Summary of an assessment (without the questions themselves).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub id: String,
    pub name: String,
    pub question_count: usize,
}

impl RecommendationRecord {
    /// Score `answers` against `assessment` and capture the outcome.
    pub fn score(assessment: &Assessment, answers: &AnswerSet, strategy: Strategy) -> Self {
        let aggregate = aggregate(answers, &assessment.bank);
        let recommendation = recommend(&aggregate, &assessment.stages, strategy);

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            assessment: AssessmentSummary {
                id: assessment.id.clone(),
                name: assessment.name.clone(),
                question_count: assessment.bank.len(),
            },
            strategy,
            answered: answers.answered_in(&assessment.bank),
            aggregate,
            recommendation,
        }
    }

    /// Save the record as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize record")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write record to {}", path.display()))?;
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read record from {}", path.display()))?;
        let record: RecommendationRecord =
            serde_json::from_str(&content).context("failed to parse record JSON")?;
        Ok(record)
    }

    /// Compare this record against an earlier one to show progress.
    pub fn compare(&self, baseline: &RecommendationRecord) -> ProgressReport {
        let current = &self.recommendation.per_domain;
        let previous = &baseline.recommendation.per_domain;

        let mut improved = Vec::new();
        let mut regressed = Vec::new();
        let mut unchanged = 0usize;

        for (domain, now) in current {
            let Some(before) = previous.get(domain) else {
                continue;
            };
            let change = LevelChange {
                domain: *domain,
                baseline_level: before.level,
                current_level: now.level,
                baseline_stage: before.suggested_stage,
                current_stage: now.suggested_stage,
            };
            match now.level.cmp(&before.level) {
                std::cmp::Ordering::Greater => improved.push(change),
                std::cmp::Ordering::Less => regressed.push(change),
                std::cmp::Ordering::Equal => unchanged += 1,
            }
        }

        let current_domains: BTreeSet<_> = current.keys().collect();
        let previous_domains: BTreeSet<_> = previous.keys().collect();

        ProgressReport {
            baseline_stage: baseline.recommendation.recommended_stage,
            current_stage: self.recommendation.recommended_stage,
            baseline_confidence: baseline.recommendation.confidence,
            current_confidence: self.recommendation.confidence,
            improved,
            regressed,
            unchanged,
            new_domains: current_domains.difference(&previous_domains).count(),
            removed_domains: previous_domains.difference(&current_domains).count(),
        }
    }
}

/// Result of comparing two records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressReport {
    pub baseline_stage: u8,
    pub current_stage: u8,
    pub baseline_confidence: u8,
    pub current_confidence: u8,
    /// Domains whose level went up.
    pub improved: Vec<LevelChange>,
    /// Domains whose level went down.
    pub regressed: Vec<LevelChange>,
    /// Domains at the same level.
    pub unchanged: usize,
    /// Domains in current but not baseline.
    pub new_domains: usize,
    /// Domains in baseline but not current.
    pub removed_domains: usize,
}

/// A change in one domain's level between two records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelChange {
    pub domain: Domain,
    pub baseline_level: Level,
    pub current_level: Level,
    pub baseline_stage: u8,
    pub current_stage: u8,
}

impl ProgressReport {
    pub fn stage_delta(&self) -> i16 {
        i16::from(self.current_stage) - i16::from(self.baseline_stage)
    }

    pub fn confidence_delta(&self) -> i16 {
        i16::from(self.current_confidence) - i16::from(self.baseline_confidence)
    }

    /// Returns true if any domain dropped a level.
    pub fn has_regressions(&self) -> bool {
        !self.regressed.is_empty()
    }

    /// Format the progress report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Stage:** {} -> {} ({:+})  \n**Confidence:** {}% -> {}% ({:+})\n\n",
            self.baseline_stage,
            self.current_stage,
            self.stage_delta(),
            self.baseline_confidence,
            self.current_confidence,
            self.confidence_delta()
        ));

        md.push_str(&format!(
            "**Summary:** {} improved, {} regressed, {} unchanged\n\n",
            self.improved.len(),
            self.regressed.len(),
            self.unchanged
        ));

        for (title, changes) in [("Improved", &self.improved), ("Regressed", &self.regressed)] {
            if changes.is_empty() {
                continue;
            }
            md.push_str(&format!("### {title}\n\n"));
            md.push_str("| Domain | Baseline | Current | Suggested stage |\n");
            md.push_str("|--------|----------|---------|-----------------|\n");
            for c in changes {
                md.push_str(&format!(
                    "| {} | {} | {} | {} -> {} |\n",
                    c.domain.label(),
                    c.baseline_level,
                    c.current_level,
                    c.baseline_stage,
                    c.current_stage
                ));
            }
            md.push('\n');
        }

        md
    }
}
