//! Behavioural properties of the scoring engine.
//!
//! Small banks are checked against every possible answer set (including
//! out-of-range selections), so these hold exhaustively rather than by sampling.

use roadmap_core::model::{Domain, Level, Question, QuestionBank, StageTable, Strategy};
use roadmap_core::recommend::{MAX_CONFIDENCE, MIN_CONFIDENCE};
use roadmap_core::reference::reference_assessment;
use roadmap_core::{aggregate, recommend, AnswerSet};

fn question(domain: Domain, weight: f64) -> Question {
    Question {
        domain,
        weight,
        prompt: format!("{domain} x{weight}"),
        options: ["beginner".into(), "intermediate".into(), "advanced".into()],
    }
}

fn mixed_bank() -> QuestionBank {
    QuestionBank::new(vec![
        question(Domain::Programming, 1.5),
        question(Domain::Programming, 1.0),
        question(Domain::Algorithms, 2.0),
        question(Domain::Databases, 0.5),
        question(Domain::Databases, 1.0),
        question(Domain::MachineLearning, 1.0),
    ])
}

fn mixed_table() -> StageTable {
    StageTable::default()
        .with_domain(Domain::Programming, [1, 2, 4])
        .with_domain(Domain::Algorithms, [2, 3, 5])
        .with_domain(Domain::Databases, [3, 5, 6])
    // MachineLearning deliberately absent: falls back to the default triple.
}

/// Every answer set over `questions` questions with options `0..options`.
fn all_answer_sets(questions: usize, options: u8) -> impl Iterator<Item = AnswerSet> {
    let total = (options as usize).pow(questions as u32);
    (0..total).map(move |mut code| {
        let mut answers = AnswerSet::new();
        for index in 0..questions {
            answers.select(index, (code % options as usize) as u8);
            code /= options as usize;
        }
        answers
    })
}

#[test]
fn raw_scores_and_levels_stay_in_range() {
    let bank = mixed_bank();
    for answers in all_answer_sets(bank.len(), 4) {
        let result = aggregate(&answers, &bank);
        assert_eq!(result.domain_scores.len(), bank.domains().len());
        for (domain, score) in &result.domain_scores {
            assert!(
                (0.0..=1.0).contains(&score.raw),
                "{domain}: raw {} out of range for {answers:?}",
                score.raw
            );
            assert_eq!(score.level, Level::from_raw(score.raw));
            assert!(score.level.index() <= 2);
        }
        assert!((0.0..=1.0).contains(&result.meta));
        assert!(result.dispersion >= 0.0);
    }
}

#[test]
fn confidence_is_always_bounded() {
    let bank = mixed_bank();
    let table = mixed_table();
    for answers in all_answer_sets(bank.len(), 4) {
        let result = aggregate(&answers, &bank);
        for strategy in [Strategy::Weighted, Strategy::Conservative] {
            let rec = recommend(&result, &table, strategy);
            assert!(
                (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&rec.confidence),
                "confidence {} for {answers:?}",
                rec.confidence
            );
            assert!(table.range.contains(rec.recommended_stage));
        }
    }
}

#[test]
fn conservative_never_below_weighted() {
    let bank = mixed_bank();
    let table = mixed_table();
    for answers in all_answer_sets(bank.len(), 3) {
        let result = aggregate(&answers, &bank);
        let weighted = recommend(&result, &table, Strategy::Weighted);
        let conservative = recommend(&result, &table, Strategy::Conservative);
        assert_eq!(weighted.per_domain, conservative.per_domain);
        assert!(
            conservative.recommended_stage >= weighted.recommended_stage,
            "conservative {} < weighted {} for {answers:?}",
            conservative.recommended_stage,
            weighted.recommended_stage
        );
    }
}

#[test]
fn all_maximum_answers() {
    let bank = mixed_bank();
    let answers = AnswerSet::from_sequence(vec![2; bank.len()]);
    let result = aggregate(&answers, &bank);

    assert_eq!(result.meta, 1.0);
    assert!(result
        .domain_scores
        .values()
        .all(|s| s.level == Level::Advanced));

    // Every level-2 entry is the same stage S.
    let table = StageTable::default()
        .with_domain(Domain::Programming, [1, 2, 6])
        .with_domain(Domain::Algorithms, [3, 4, 6])
        .with_domain(Domain::Databases, [2, 5, 6])
        .with_domain(Domain::MachineLearning, [4, 5, 6]);
    let rec = recommend(&result, &table, Strategy::Weighted);
    assert_eq!(rec.recommended_stage, 6);
    assert_eq!(rec.confidence, MAX_CONFIDENCE);
}

#[test]
fn all_minimum_answers() {
    let bank = mixed_bank();
    for answers in [AnswerSet::from_sequence(vec![0; bank.len()]), AnswerSet::new()] {
        let result = aggregate(&answers, &bank);
        assert_eq!(result.meta, 0.0);
        assert_eq!(result.dispersion, 0.0);
        assert!(result
            .domain_scores
            .values()
            .all(|s| s.level == Level::Beginner));

        let rec = recommend(&result, &mixed_table(), Strategy::Weighted);
        assert_eq!(rec.confidence, 20);
    }
}

#[test]
fn scoring_is_idempotent() {
    let assessment = reference_assessment().unwrap();
    let answers = AnswerSet::from_sequence((0..assessment.bank.len()).map(|i| (i * 7 % 3) as u8));

    let first = aggregate(&answers, &assessment.bank);
    let second = aggregate(&answers, &assessment.bank);
    assert_eq!(first, second);
    for ((_, a), (_, b)) in first.domain_scores.iter().zip(&second.domain_scores) {
        assert_eq!(a.raw.to_bits(), b.raw.to_bits());
    }
    assert_eq!(first.meta.to_bits(), second.meta.to_bits());
    assert_eq!(first.dispersion.to_bits(), second.dispersion.to_bits());

    for strategy in [Strategy::Weighted, Strategy::Conservative] {
        assert_eq!(
            recommend(&first, &assessment.stages, strategy),
            recommend(&second, &assessment.stages, strategy)
        );
    }
}

#[test]
fn two_domain_reference_scenario() {
    let bank = QuestionBank::new(vec![
        question(Domain::Algorithms, 1.0),
        question(Domain::Databases, 1.0),
    ]);
    let table = StageTable::default()
        .with_domain(Domain::Algorithms, [1, 4, 7])
        .with_domain(Domain::Databases, [1, 3, 5]);
    let answers = AnswerSet::new().with(0, 2).with(1, 0);

    let result = aggregate(&answers, &bank);
    assert_eq!(result.domain_scores[&Domain::Algorithms].raw, 1.0);
    assert_eq!(result.domain_scores[&Domain::Algorithms].level, Level::Advanced);
    assert_eq!(result.domain_scores[&Domain::Databases].raw, 0.0);
    assert_eq!(result.domain_scores[&Domain::Databases].level, Level::Beginner);
    assert_eq!(result.meta, 0.5);
    assert_eq!(result.dispersion, 0.5);

    let weighted = recommend(&result, &table, Strategy::Weighted);
    assert_eq!(weighted.per_domain[&Domain::Algorithms].suggested_stage, 7);
    assert_eq!(weighted.per_domain[&Domain::Databases].suggested_stage, 1);
    assert_eq!(weighted.recommended_stage, 4);
    assert_eq!(weighted.confidence, 35);

    let conservative = recommend(&result, &table, Strategy::Conservative);
    assert_eq!(conservative.recommended_stage, 7);
    assert_eq!(conservative.confidence, 35);
}

#[test]
fn reference_assessment_extremes() {
    let assessment = reference_assessment().unwrap();
    let n = assessment.bank.len();

    let novice = aggregate(&AnswerSet::new(), &assessment.bank);
    let novice_rec = recommend(&novice, &assessment.stages, Strategy::Weighted);
    assert_eq!(novice_rec.confidence, 20);
    assert_eq!(novice_rec.per_domain.len(), Domain::ALL.len());

    let expert = aggregate(&AnswerSet::from_sequence(vec![2; n]), &assessment.bank);
    let expert_rec = recommend(&expert, &assessment.stages, Strategy::Conservative);
    assert_eq!(expert_rec.recommended_stage, 8);
    assert_eq!(expert_rec.confidence, 98);
    assert!(expert_rec.recommended_stage > novice_rec.recommended_stage);
}
