//! Golden tests for risk scoring.
//!
//! Each case fixes the rank chosen for every question, in questionnaire order.

use std::collections::BTreeMap;

use farm_ledger_core::insights::{score_answers, RiskLevel, QUESTIONS};
use farm_ledger_core::repository::Repository;
use farm_ledger_core::MemoryStore;

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    ranks: [usize; 5],
    expected_score: u8,
    expected_level: RiskLevel,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "all-best",
            ranks: [0, 0, 0, 0, 0],
            expected_score: 100,
            expected_level: RiskLevel::Low,
        },
        GoldenCase {
            id: "all-worst",
            ranks: [4, 4, 4, 4, 4],
            expected_score: 0,
            expected_level: RiskLevel::High,
        },
        GoldenCase {
            id: "one-slip",
            ranks: [0, 0, 0, 0, 1],
            expected_score: 95,
            expected_level: RiskLevel::Low,
        },
        GoldenCase {
            id: "mostly-second",
            ranks: [1, 1, 1, 1, 0],
            expected_score: 80,
            expected_level: RiskLevel::Low,
        },
        GoldenCase {
            id: "middling",
            ranks: [1, 2, 1, 2, 1],
            expected_score: 65,
            expected_level: RiskLevel::Medium,
        },
        GoldenCase {
            id: "all-middle",
            ranks: [2, 2, 2, 2, 2],
            expected_score: 50,
            expected_level: RiskLevel::High,
        },
        GoldenCase {
            id: "one-of-each",
            // 100 + 75 + 50 + 25 + 0 = 250 / 5 = 50
            ranks: [0, 1, 2, 3, 4],
            expected_score: 50,
            expected_level: RiskLevel::High,
        },
    ]
}

fn answers_for(ranks: [usize; 5]) -> BTreeMap<String, String> {
    QUESTIONS
        .iter()
        .zip(ranks)
        .map(|(q, rank)| (q.id.to_string(), q.options[rank].to_string()))
        .collect()
}

#[test]
fn test_golden_scores() {
    for case in get_golden_cases() {
        let score = score_answers(&answers_for(case.ranks)).unwrap();
        assert_eq!(score, case.expected_score, "case {}", case.id);
        assert_eq!(
            RiskLevel::from_score(Some(score)),
            case.expected_level,
            "case {}",
            case.id
        );
    }
}

/// The example assessment stores 85, but every one of its answers is the best
/// option, which scores 100. The stored value is kept as-is; only newly
/// submitted questionnaires are scored.
#[test]
fn test_example_assessment_score_differs_from_recomputed() {
    let repo = Repository::open(MemoryStore::new(), true).unwrap();
    let example = repo.assessments().unwrap().remove(0);

    assert_eq!(example.score, 85);
    assert_eq!(example.answers, answers_for([0, 0, 0, 0, 0]));
    assert_eq!(score_answers(&example.answers).unwrap(), 100);
}

/// Score under the older five-points-per-rank table, where the worst answer
/// still earned 20.
fn legacy_score(ranks: [usize; 5]) -> u8 {
    let points: usize = ranks.iter().map(|rank| (5 - rank) * 20).sum();
    (points / ranks.len()) as u8
}

#[test]
fn test_worst_answers_no_longer_floor_at_twenty() {
    let cases = [
        ([0, 0, 0, 0, 0], 100, 100),
        ([2, 2, 2, 2, 2], 60, 50),
        ([4, 4, 4, 4, 4], 20, 0),
    ];

    for (ranks, legacy, current) in cases {
        assert_eq!(legacy_score(ranks), legacy, "ranks {ranks:?}");
        assert_eq!(score_answers(&answers_for(ranks)).unwrap(), current, "ranks {ranks:?}");
    }

    // Under the old table an all-middle questionnaire read as Medium.
    assert_eq!(RiskLevel::from_score(Some(60)), RiskLevel::Medium);
    assert_eq!(
        RiskLevel::from_score(Some(score_answers(&answers_for([2; 5])).unwrap())),
        RiskLevel::High
    );
}
