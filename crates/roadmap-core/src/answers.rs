//! Learner answer sets.
//!
//! An [`AnswerSet`] maps question indices to the selected option. Lookups
//! never fail: an unanswered question, or a selection outside `0..=2`, reads
//! as option 0 (the lowest level).

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ConfigError;
use crate::model::QuestionBank;

/// Highest valid option index.
pub const MAX_OPTION: u8 = 2;

/// Selected option per question index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet {
    selections: BTreeMap<usize, u8>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers for questions `0..n` taken in order from `options`.
    pub fn from_sequence<I: IntoIterator<Item = u8>>(options: I) -> Self {
        options.into_iter().enumerate().collect()
    }

    /// Record a selection, replacing any earlier one for the same question.
    pub fn select(&mut self, question: usize, option: u8) {
        self.selections.insert(question, option);
    }

    /// Builder-style variant of [`AnswerSet::select`].
    pub fn with(mut self, question: usize, option: u8) -> Self {
        self.select(question, option);
        self
    }

    /// The effective option for a question: the recorded selection when it is
    /// a valid option, otherwise 0.
    pub fn selection(&self, question: usize) -> u8 {
        self.selections
            .get(&question)
            .copied()
            .filter(|&option| option <= MAX_OPTION)
            .unwrap_or(0)
    }

    /// Number of recorded selections (valid or not).
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Number of bank questions that carry a valid recorded selection.
    pub fn answered_in(&self, bank: &QuestionBank) -> usize {
        self.selections
            .iter()
            .filter(|(&index, &option)| index < bank.len() && option <= MAX_OPTION)
            .count()
    }

    /// Merge another answer set into this one; `other` wins on conflicts.
    pub fn extend(&mut self, other: AnswerSet) {
        self.selections.extend(other.selections);
    }

    /// Parse answers from JSON.
    ///
    /// Accepts either an object keyed by question index (`{"0": 2, "4": 1}`)
    /// or a dense array (`[2, 1, null, 0]`, where `null` leaves a question
    /// unanswered). Entries that are not an integer option under a numeric
    /// index are skipped with a warning, so they fall back to option 0.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).context("failed to parse answers JSON")?;

        let mut answers = AnswerSet::new();
        match value {
            Value::Object(map) => {
                for (key, option) in map {
                    let Ok(index) = key.trim().parse::<usize>() else {
                        tracing::warn!("ignoring answer with non-numeric question index `{key}`");
                        continue;
                    };
                    if let Some(option) = coerce_option(index, &option) {
                        answers.select(index, option);
                    }
                }
            }
            Value::Array(items) => {
                for (index, option) in items.iter().enumerate() {
                    if let Some(option) = coerce_option(index, option) {
                        answers.select(index, option);
                    }
                }
            }
            other => anyhow::bail!(
                "answers must be a JSON object or array, found {}",
                json_kind(&other)
            ),
        }

        Ok(answers)
    }

    /// Read and parse a JSON answers file.
    pub fn load_json(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read answers from {}", path.display()))?;
        Self::from_json_str(&content)
            .with_context(|| format!("invalid answers file: {}", path.display()))
    }
}

impl FromIterator<(usize, u8)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (usize, u8)>>(iter: I) -> Self {
        Self {
            selections: iter.into_iter().collect(),
        }
    }
}

/// Parse an inline `question=option` pair such as `3=2`.
pub fn parse_answer_pair(s: &str) -> Result<(usize, u8), ConfigError> {
    let invalid = || ConfigError::InvalidAnswer(s.to_string());
    let (question, option) = s.split_once('=').ok_or_else(invalid)?;
    let question = question.trim().parse::<usize>().map_err(|_| invalid())?;
    let option = option.trim().parse::<u8>().map_err(|_| invalid())?;
    Ok((question, option))
}

fn coerce_option(index: usize, value: &Value) -> Option<u8> {
    match value {
        Value::Null => None,
        Value::Number(n) => match n.as_u64().and_then(|v| u8::try_from(v).ok()) {
            Some(option) => Some(option),
            None => {
                tracing::warn!("question {index}: option {n} is not a valid selection, using 0");
                None
            }
        },
        other => {
            tracing::warn!(
                "question {index}: expected an option number, found {}, using 0",
                json_kind(other)
            );
            None
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
