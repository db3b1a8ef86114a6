//! Debounced, last-edit-wins recomputation of the shortlist while a requirement is being edited.
//!
//! Every submitted requirement bumps a generation counter. A cycle only moves to
//! `Evaluating` and only publishes while its generation is still the latest, and the
//! publish check happens under the same lock that bumps the counter, so a superseded
//! cycle can never overwrite results for a newer requirement.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::domain::{AssignmentRequirement, CandidateProfile};
use super::ranking::{MatchReport, RankingPipeline};
use super::MatchError;

const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);
const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(1200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecomputeTiming {
    pub debounce: Duration,
    pub processing_delay: Duration,
}

impl Default for RecomputeTiming {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecomputePhase {
    Idle,
    Debouncing,
    Evaluating,
}

/// Results published for one requirement generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSnapshot {
    pub generation: u64,
    pub requirement: AssignmentRequirement,
    pub report: MatchReport,
}

struct CycleState {
    generation: u64,
    phase: RecomputePhase,
    pending: Option<JoinHandle<()>>,
}

struct Shared {
    pipeline: RankingPipeline,
    pool: Arc<[CandidateProfile]>,
    timing: RecomputeTiming,
    state: Mutex<CycleState>,
    published: watch::Sender<Option<Arc<MatchSnapshot>>>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, CycleState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_evaluation(&self, generation: u64) -> bool {
        let mut state = self.lock();
        if state.generation != generation {
            return false;
        }
        state.phase = RecomputePhase::Evaluating;
        true
    }

    fn is_current(&self, generation: u64) -> bool {
        self.lock().generation == generation
    }

    fn publish(&self, snapshot: MatchSnapshot) -> bool {
        let mut state = self.lock();
        if state.generation != snapshot.generation {
            debug!(
                stale = snapshot.generation,
                latest = state.generation,
                "discarding superseded match results"
            );
            return false;
        }

        state.phase = RecomputePhase::Idle;
        state.pending = None;
        info!(
            generation = snapshot.generation,
            results = snapshot.report.results.len(),
            "match results published"
        );
        self.published.send_replace(Some(Arc::new(snapshot)));
        true
    }

    fn abandon(&self, generation: u64) {
        let mut state = self.lock();
        if state.generation == generation {
            state.phase = RecomputePhase::Idle;
            state.pending = None;
        }
    }
}

/// Stateful shell that collapses bursts of requirement edits into one ranking run.
pub struct RecomputeController {
    shared: Arc<Shared>,
}

impl RecomputeController {
    pub fn new(
        pipeline: RankingPipeline,
        pool: impl Into<Arc<[CandidateProfile]>>,
        timing: RecomputeTiming,
    ) -> Self {
        let (published, _) = watch::channel(None);
        let shared = Shared {
            pipeline,
            pool: pool.into(),
            timing,
            state: Mutex::new(CycleState {
                generation: 0,
                phase: RecomputePhase::Idle,
                pending: None,
            }),
            published,
        };

        Self {
            shared: Arc::new(shared),
        }
    }

    /// Record a requirement-changed event and restart the debounce window.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, requirement: AssignmentRequirement) -> Result<u64, MatchError> {
        requirement.validate()?;

        let mut state = self.shared.lock();
        state.generation += 1;
        let generation = state.generation;
        if let Some(previous) = state.pending.take() {
            previous.abort();
        }
        state.phase = RecomputePhase::Debouncing;
        state.pending = Some(tokio::spawn(run_cycle(
            Arc::clone(&self.shared),
            generation,
            requirement,
        )));

        debug!(generation, "requirement change queued");
        Ok(generation)
    }

    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    pub fn phase(&self) -> RecomputePhase {
        self.shared.lock().phase
    }

    pub fn latest(&self) -> Option<Arc<MatchSnapshot>> {
        self.shared.published.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<MatchSnapshot>>> {
        self.shared.published.subscribe()
    }
}

impl Drop for RecomputeController {
    fn drop(&mut self) {
        if let Some(pending) = self.shared.lock().pending.take() {
            pending.abort();
        }
    }
}

async fn run_cycle(shared: Arc<Shared>, generation: u64, requirement: AssignmentRequirement) {
    tokio::time::sleep(shared.timing.debounce).await;
    if !shared.begin_evaluation(generation) {
        return;
    }

    if !shared.timing.processing_delay.is_zero() {
        tokio::time::sleep(shared.timing.processing_delay).await;
        if !shared.is_current(generation) {
            return;
        }
    }

    match shared.pipeline.report(&shared.pool, &requirement) {
        Ok(report) => {
            shared.publish(MatchSnapshot {
                generation,
                requirement,
                report,
            });
        }
        Err(err) => {
            warn!(generation, error = %err, "match recompute failed");
            shared.abandon(generation);
        }
    }
}

#[cfg(test)]
pub(crate) fn publish_for_tests(controller: &RecomputeController, snapshot: MatchSnapshot) -> bool {
    controller.shared.publish(snapshot)
}
