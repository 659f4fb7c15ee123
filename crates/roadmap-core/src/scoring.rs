//! Score aggregation.
//!
//! Turns an answer set into per-domain competency estimates, a global meta
//! score, and the dispersion of the per-domain estimates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answers::AnswerSet;
use crate::model::{Domain, Level, QuestionBank};
use crate::statistics::population_std_dev;

/// Competency estimate for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainScore {
    /// Weight-normalized fraction of the maximum signal, in `[0, 1]`.
    pub raw: f64,
    /// `round(raw * 2)`.
    pub level: Level,
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    /// One entry per domain referenced by the question bank.
    pub domain_scores: BTreeMap<Domain, DomainScore>,
    /// Total question weight per domain (`weighted_max / 2`).
    pub domain_weights: BTreeMap<Domain, f64>,
    /// Global weighted competency estimate, in `[0, 1]`.
    pub meta: f64,
    /// Population standard deviation of the per-domain raw scores.
    pub dispersion: f64,
}

impl AggregateResult {
    /// Weight of a domain for the weighted strategy; 1.0 when none is recorded.
    pub fn weight_for(&self, domain: Domain) -> f64 {
        self.domain_weights
            .get(&domain)
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(1.0)
    }
}

#[derive(Debug, Default)]
struct Tally {
    weighted_sum: f64,
    weighted_max: f64,
}

/// Aggregate an answer set against a question bank.
///
/// Total and deterministic: unanswered or out-of-range selections count as
/// option 0, and a domain with no weight scores 0 rather than dividing by
/// zero. Dispersion is taken over the unweighted per-domain raw scores, one
/// sample per domain.
pub fn aggregate(answers: &AnswerSet, bank: &QuestionBank) -> AggregateResult {
    let mut tallies: BTreeMap<Domain, Tally> = BTreeMap::new();
    for (index, question) in bank.iter().enumerate() {
        let selected = f64::from(answers.selection(index));
        let tally = tallies.entry(question.domain).or_default();
        tally.weighted_sum += selected * question.weight;
        tally.weighted_max += 2.0 * question.weight;
    }

    let mut domain_scores = BTreeMap::new();
    let mut domain_weights = BTreeMap::new();
    let mut total_sum = 0.0f64;
    let mut total_max = 0.0f64;

    for (domain, tally) in &tallies {
        let raw = if tally.weighted_max > 0.0 {
            tally.weighted_sum / tally.weighted_max
        } else {
            0.0
        };
        domain_scores.insert(
            *domain,
            DomainScore {
                raw,
                level: Level::from_raw(raw),
            },
        );
        domain_weights.insert(*domain, tally.weighted_max / 2.0);
        total_sum += tally.weighted_sum;
        total_max += tally.weighted_max;
    }

    let meta = total_sum / total_max.max(1.0);
    let raws: Vec<f64> = domain_scores.values().map(|s| s.raw).collect();
    let dispersion = population_std_dev(&raws);

    tracing::debug!(
        domains = domain_scores.len(),
        answered = answers.answered_in(bank),
        meta,
        dispersion,
        "aggregated answer set"
    );

    AggregateResult {
        domain_scores,
        domain_weights,
        meta,
        dispersion,
    }
}
