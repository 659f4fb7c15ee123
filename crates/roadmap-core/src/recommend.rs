//! Recommendation engine.
//!
//! Collapses an [`AggregateResult`] into one recommended curriculum stage,
//! a per-domain breakdown, and a confidence percentage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Domain, Level, StageTable, Strategy};
use crate::scoring::AggregateResult;
use crate::statistics::weighted_mean;

/// Lowest confidence ever reported.
pub const MIN_CONFIDENCE: u8 = 20;
/// Highest confidence ever reported.
pub const MAX_CONFIDENCE: u8 = 98;
/// Confidence points deducted per unit of dispersion.
pub const DISPERSION_PENALTY: f64 = 30.0;

/// Per-domain part of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecommendation {
    pub level: Level,
    pub suggested_stage: u8,
}

/// The placement produced for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Entry point into the curriculum.
    pub recommended_stage: u8,
    /// Level and suggested stage for every scored domain.
    pub per_domain: BTreeMap<Domain, DomainRecommendation>,
    /// Confidence percentage, always within `[20, 98]`.
    pub confidence: u8,
}

/// Produce a recommendation from aggregated scores.
///
/// Never fails: levels index the stage triple directly, domains missing from
/// the table use its default triple, and the resulting stage is clamped into
/// the table's range. With no scored domains at all the lower bound of the
/// range is recommended.
pub fn recommend(
    aggregate: &AggregateResult,
    stages: &StageTable,
    strategy: Strategy,
) -> Recommendation {
    let per_domain: BTreeMap<Domain, DomainRecommendation> = aggregate
        .domain_scores
        .iter()
        .map(|(domain, score)| {
            (
                *domain,
                DomainRecommendation {
                    level: score.level,
                    suggested_stage: stages.stage_for(*domain, score.level),
                },
            )
        })
        .collect();

    let recommended_stage = match strategy {
        Strategy::Weighted => weighted_mean(per_domain.iter().map(|(domain, rec)| {
            (f64::from(rec.suggested_stage), aggregate.weight_for(*domain))
        }))
        .map(|avg| stages.range.clamp(avg.round() as i64)),
        Strategy::Conservative => per_domain
            .values()
            .map(|rec| rec.suggested_stage)
            .max()
            .map(|stage| stages.range.clamp(i64::from(stage))),
    }
    .unwrap_or_else(|| stages.range.clamp(i64::from(stages.range.min)));

    let confidence = confidence(aggregate.meta, aggregate.dispersion);

    tracing::debug!(
        %strategy,
        recommended_stage,
        confidence,
        "computed recommendation"
    );

    Recommendation {
        recommended_stage,
        per_domain,
        confidence,
    }
}

/// `clamp(round(meta * 100) - round(dispersion * 30), 20, 98)`.
///
/// Uneven profiles are penalized: a single stage number represents them
/// poorly.
pub fn confidence(meta: f64, dispersion: f64) -> u8 {
    let base = (meta * 100.0).round() as i64;
    let penalty = (dispersion * DISPERSION_PENALTY).round() as i64;
    (base - penalty).clamp(i64::from(MIN_CONFIDENCE), i64::from(MAX_CONFIDENCE)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::DomainScore;

    fn aggregate_of(scores: &[(Domain, f64, f64)], meta: f64, dispersion: f64) -> AggregateResult {
        AggregateResult {
            domain_scores: scores
                .iter()
                .map(|(d, raw, _)| {
                    (
                        *d,
                        DomainScore {
                            raw: *raw,
                            level: Level::from_raw(*raw),
                        },
                    )
                })
                .collect(),
            domain_weights: scores.iter().map(|(d, _, w)| (*d, *w)).collect(),
            meta,
            dispersion,
        }
    }

    fn two_domain_table() -> StageTable {
        StageTable::default()
            .with_domain(Domain::Algorithms, [1, 4, 7])
            .with_domain(Domain::Databases, [1, 3, 5])
    }

    #[test]
    fn weighted_and_conservative_scenario() {
        let agg = aggregate_of(
            &[(Domain::Algorithms, 1.0, 1.0), (Domain::Databases, 0.0, 1.0)],
            0.5,
            0.5,
        );
        let weighted = recommend(&agg, &two_domain_table(), Strategy::Weighted);
        assert_eq!(weighted.recommended_stage, 4);
        assert_eq!(weighted.confidence, 35);
        assert_eq!(
            weighted.per_domain[&Domain::Algorithms],
            DomainRecommendation {
                level: Level::Advanced,
                suggested_stage: 7
            }
        );
        assert_eq!(weighted.per_domain[&Domain::Databases].suggested_stage, 1);

        let conservative = recommend(&agg, &two_domain_table(), Strategy::Conservative);
        assert_eq!(conservative.recommended_stage, 7);
        assert_eq!(conservative.confidence, 35);
    }

    #[test]
    fn weighted_strategy_respects_domain_weight() {
        // (7*3 + 1*1) / 4 = 5.5, rounds to 6.
        let agg = aggregate_of(
            &[(Domain::Algorithms, 1.0, 3.0), (Domain::Databases, 0.0, 1.0)],
            0.75,
            0.5,
        );
        let rec = recommend(&agg, &two_domain_table(), Strategy::Weighted);
        assert_eq!(rec.recommended_stage, 6);
    }

    #[test]
    fn missing_weight_falls_back_to_one() {
        let mut agg = aggregate_of(
            &[(Domain::Algorithms, 1.0, 1.0), (Domain::Databases, 0.0, 1.0)],
            0.5,
            0.5,
        );
        agg.domain_weights.clear();
        let rec = recommend(&agg, &two_domain_table(), Strategy::Weighted);
        assert_eq!(rec.recommended_stage, 4);
    }

    #[test]
    fn stages_are_clamped_into_range() {
        let table = StageTable::default().with_domain(Domain::Web, [0, 12, 40]);
        let low = aggregate_of(&[(Domain::Web, 0.0, 1.0)], 0.0, 0.0);
        let high = aggregate_of(&[(Domain::Web, 1.0, 1.0)], 1.0, 0.0);
        for strategy in [Strategy::Weighted, Strategy::Conservative] {
            assert_eq!(recommend(&low, &table, strategy).recommended_stage, 1);
            assert_eq!(recommend(&high, &table, strategy).recommended_stage, 8);
        }
    }

    #[test]
    fn unknown_domain_uses_default_triple() {
        let agg = aggregate_of(&[(Domain::Systems, 0.5, 1.0)], 0.5, 0.0);
        let rec = recommend(&agg, &StageTable::default(), Strategy::Weighted);
        assert_eq!(rec.per_domain[&Domain::Systems].suggested_stage, 2);
        assert_eq!(rec.recommended_stage, 2);
    }

    #[test]
    fn no_domains_recommends_lowest_stage() {
        let agg = aggregate_of(&[], 0.0, 0.0);
        for strategy in [Strategy::Weighted, Strategy::Conservative] {
            let rec = recommend(&agg, &StageTable::default(), strategy);
            assert_eq!(rec.recommended_stage, 1);
            assert!(rec.per_domain.is_empty());
            assert_eq!(rec.confidence, MIN_CONFIDENCE);
        }
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(confidence(0.0, 0.0), 20);
        assert_eq!(confidence(1.0, 0.0), 98);
        assert_eq!(confidence(0.5, 0.5), 35);
        assert_eq!(confidence(0.9, 0.1), 87);
        assert_eq!(confidence(0.3, 0.5), 20);
    }
}
