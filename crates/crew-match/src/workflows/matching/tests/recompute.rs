use std::time::Duration;

use tokio::time::{sleep, timeout, Instant};

use super::common::*;
use crate::workflows::matching::recompute::publish_for_tests;
use crate::workflows::matching::{
    CandidateProfile, MatchError, MatchSnapshot, RecomputeController, RecomputePhase,
    RecomputeTiming,
};

fn controller_over(pool: Vec<CandidateProfile>, timing: RecomputeTiming) -> RecomputeController {
    RecomputeController::new(pipeline(), pool, timing)
}

#[tokio::test(start_paused = true)]
async fn burst_of_edits_publishes_only_the_last() {
    let controller = controller_over(standard_pool(), RecomputeTiming::default());
    let mut updates = controller.subscribe();
    let started = Instant::now();

    for vessel in ["MT Alpha", "MT Bravo", "MT Charlie"] {
        controller
            .submit(requirement_for(vessel))
            .expect("requirement accepted");
        sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(controller.phase(), RecomputePhase::Debouncing);

    updates.changed().await.expect("snapshot published");
    let snapshot = updates
        .borrow_and_update()
        .clone()
        .expect("snapshot present");

    assert_eq!(snapshot.generation, 3);
    assert_eq!(snapshot.requirement.vessel_name, "MT Charlie");
    assert!(started.elapsed() >= Duration::from_millis(1900));
    assert_eq!(controller.phase(), RecomputePhase::Idle);

    let further = timeout(Duration::from_secs(10), updates.changed()).await;
    assert!(further.is_err(), "superseded edits must never publish");
}

#[tokio::test(start_paused = true)]
async fn edit_during_evaluation_discards_in_flight_results() {
    let controller = controller_over(standard_pool(), RecomputeTiming::default());
    let mut updates = controller.subscribe();

    controller
        .submit(requirement_for("MT Alpha"))
        .expect("requirement accepted");
    sleep(Duration::from_millis(700)).await;
    assert_eq!(controller.phase(), RecomputePhase::Evaluating);

    let generation = controller
        .submit(requirement_for("MT Bravo"))
        .expect("requirement accepted");
    assert_eq!(generation, 2);
    assert_eq!(controller.phase(), RecomputePhase::Debouncing);

    updates.changed().await.expect("snapshot published");
    let snapshot = controller.latest().expect("latest snapshot");
    assert_eq!(snapshot.generation, 2);
    assert_eq!(snapshot.requirement.vessel_name, "MT Bravo");

    let further = timeout(Duration::from_secs(10), updates.changed()).await;
    assert!(further.is_err(), "stale evaluation must not publish");
    assert_eq!(
        controller.latest().expect("latest snapshot").requirement.vessel_name,
        "MT Bravo"
    );
}

#[tokio::test(start_paused = true)]
async fn published_snapshot_carries_ranked_report() {
    let timing = RecomputeTiming {
        debounce: Duration::from_millis(50),
        processing_delay: Duration::ZERO,
    };
    let controller = controller_over(standard_pool(), timing);
    let mut updates = controller.subscribe();

    controller.submit(requirement()).expect("requirement accepted");
    updates.changed().await.expect("snapshot published");

    let snapshot = controller.latest().expect("latest snapshot");
    let ids: Vec<&str> = snapshot
        .report
        .results
        .iter()
        .map(|entry| entry.candidate_id.0.as_str())
        .collect();
    assert_eq!(ids, vec!["cm-001", "cm-003"]);
    assert_eq!(snapshot.report.insights.top_candidates, 2);
}

#[tokio::test(start_paused = true)]
async fn failing_pool_returns_to_idle_without_publishing() {
    let mut broken = strong_candidate("cm-broken");
    broken.performance_rating = 0.0;
    let controller = controller_over(vec![broken], RecomputeTiming::default());

    controller.submit(requirement()).expect("requirement accepted");
    sleep(Duration::from_secs(5)).await;

    assert!(controller.latest().is_none());
    assert_eq!(controller.phase(), RecomputePhase::Idle);
}

#[test]
fn invalid_requirement_is_rejected_without_starting_a_cycle() {
    let controller = controller_over(standard_pool(), RecomputeTiming::default());
    let mut requirement = requirement();
    requirement.contract_duration_months = 0;

    let err = controller
        .submit(requirement)
        .expect_err("zero duration rejected");

    assert!(matches!(err, MatchError::InvalidRequirement { .. }));
    assert_eq!(controller.generation(), 0);
    assert_eq!(controller.phase(), RecomputePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn stale_generation_cannot_overwrite_latest() {
    let timing = RecomputeTiming {
        debounce: Duration::from_secs(3600),
        processing_delay: Duration::ZERO,
    };
    let controller = controller_over(standard_pool(), timing);
    controller
        .submit(requirement_for("MT Alpha"))
        .expect("requirement accepted");
    controller
        .submit(requirement_for("MT Bravo"))
        .expect("requirement accepted");

    let report = pipeline()
        .report(&standard_pool(), &requirement())
        .expect("report builds");
    let stale = MatchSnapshot {
        generation: 1,
        requirement: requirement_for("MT Alpha"),
        report: report.clone(),
    };
    assert!(!publish_for_tests(&controller, stale));
    assert!(controller.latest().is_none());

    let current = MatchSnapshot {
        generation: 2,
        requirement: requirement_for("MT Bravo"),
        report,
    };
    assert!(publish_for_tests(&controller, current));
    assert_eq!(controller.latest().expect("published").generation, 2);
    assert_eq!(controller.phase(), RecomputePhase::Idle);
}
