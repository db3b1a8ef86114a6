use chrono::Duration;

use super::common::*;
use crate::workflows::matching::domain::CandidateId;
use crate::workflows::matching::MatchError;

fn graded_pool(size: usize) -> Vec<crate::workflows::matching::CandidateProfile> {
    (0..size)
        .map(|index| {
            let mut candidate = strong_candidate(&format!("cm-{index:03}"));
            candidate.availability_date = joining_date() + Duration::days(index as i64 * 3);
            candidate.experience_years = 2.0 + index as f64 % 4.0;
            candidate
        })
        .collect()
}

#[test]
fn ranking_is_bounded_filtered_and_sorted() {
    let mut pool = graded_pool(15);
    pool.push(weak_candidate("cm-weak"));

    let ranked = pipeline().rank(&pool, &requirement()).expect("pool ranks");

    assert!(ranked.len() <= 10);
    assert!(!ranked.is_empty());
    assert!(ranked
        .iter()
        .all(|entry| entry.result.overall_score >= 50));
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].result.overall_score >= pair[1].result.overall_score));
    assert!(ranked
        .iter()
        .all(|entry| entry.candidate_id != CandidateId("cm-weak".to_string())));
    for (index, entry) in ranked.iter().enumerate() {
        assert_eq!(entry.position, index + 1);
    }
}

#[test]
fn ties_keep_pool_order() {
    let pool = vec![
        strong_candidate("cm-b"),
        strong_candidate("cm-a"),
        strong_candidate("cm-c"),
    ];

    let ranked = pipeline().rank(&pool, &requirement()).expect("pool ranks");

    let ids: Vec<&str> = ranked
        .iter()
        .map(|entry| entry.candidate_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["cm-b", "cm-a", "cm-c"]);
}

#[test]
fn truncates_to_top_ten() {
    let pool: Vec<_> = (0..25)
        .map(|index| strong_candidate(&format!("cm-{index:02}")))
        .collect();

    let ranked = pipeline().rank(&pool, &requirement()).expect("pool ranks");

    assert_eq!(ranked.len(), 10);
    assert_eq!(ranked[0].candidate_id.0, "cm-00");
    assert_eq!(ranked[9].candidate_id.0, "cm-09");
}

#[test]
fn limit_and_threshold_are_adjustable() {
    let pool = graded_pool(12);

    let ranked = pipeline()
        .with_limit(3)
        .with_minimum_score(95)
        .rank(&pool, &requirement())
        .expect("pool ranks");

    assert!(ranked.len() <= 3);
    assert!(ranked
        .iter()
        .all(|entry| entry.result.overall_score >= 95));
}

#[test]
fn empty_pool_yields_empty_ranking() {
    let ranked = pipeline().rank(&[], &requirement()).expect("empty pool ranks");
    assert!(ranked.is_empty());

    let report = pipeline().report(&[], &requirement()).expect("empty pool reports");
    assert!(report.results.is_empty());
    assert_eq!(report.insights.success_probability, 0);
}

#[test]
fn malformed_candidate_aborts_ranking() {
    let mut broken = strong_candidate("cm-broken");
    broken.response_history.acceptance_rate = 140.0;
    let pool = vec![strong_candidate("cm-001"), broken];

    let err = pipeline()
        .rank(&pool, &requirement())
        .expect_err("acceptance rate rejected");

    match err {
        MatchError::InvalidCandidate { candidate_id, .. } => {
            assert_eq!(candidate_id.0, "cm-broken");
        }
        other => panic!("expected invalid candidate, got {other:?}"),
    }
}

#[test]
fn malformed_requirement_is_rejected_before_scoring() {
    let mut requirement = requirement();
    requirement.vessel_type = "  ".to_string();

    let err = pipeline()
        .rank(&[strong_candidate("cm-001")], &requirement)
        .expect_err("blank vessel type rejected");

    assert!(matches!(err, MatchError::InvalidRequirement { .. }));
}
