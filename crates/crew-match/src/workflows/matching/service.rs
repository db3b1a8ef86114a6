use std::sync::Arc;

use tracing::info;

use super::domain::{AssignmentRequirement, CandidateId};
use super::ranking::{MatchReport, RankingPipeline};
use super::recompute::{RecomputeController, RecomputeTiming};
use super::repository::{CandidateSource, OfferError, OfferIntent, OfferPublisher, SourceError};
use super::scoring::{MatchResult, RecommendedAction};
use super::MatchError;

/// Service composing the candidate source, ranking pipeline, and offer hand-off.
pub struct CrewMatchingService<S, O> {
    source: Arc<S>,
    offers: Arc<O>,
    pipeline: Arc<RankingPipeline>,
}

impl<S, O> CrewMatchingService<S, O>
where
    S: CandidateSource + 'static,
    O: OfferPublisher + 'static,
{
    pub fn new(source: Arc<S>, offers: Arc<O>, pipeline: RankingPipeline) -> Self {
        Self {
            source,
            offers,
            pipeline: Arc::new(pipeline),
        }
    }

    /// Rank the current pool against a requirement.
    pub fn evaluate(
        &self,
        requirement: &AssignmentRequirement,
    ) -> Result<MatchReport, MatchingServiceError> {
        let pool = self.source.candidates()?;
        let report = self.pipeline.report(&pool, requirement)?;
        info!(
            vessel = %requirement.vessel_name,
            top_candidates = report.insights.top_candidates,
            success_probability = report.insights.success_probability,
            "match report generated"
        );
        Ok(report)
    }

    pub fn evaluate_candidate(
        &self,
        candidate_id: &CandidateId,
        requirement: &AssignmentRequirement,
    ) -> Result<MatchResult, MatchingServiceError> {
        let candidate = self
            .source
            .candidate(candidate_id)?
            .ok_or_else(|| MatchingServiceError::UnknownCandidate(candidate_id.clone()))?;
        let result = self.pipeline.evaluator().try_evaluate(&candidate, requirement)?;
        Ok(result)
    }

    /// Hand an offer for the candidate to outreach unless the match is not recommended.
    pub fn request_offer(
        &self,
        candidate_id: &CandidateId,
        requirement: &AssignmentRequirement,
    ) -> Result<OfferIntent, MatchingServiceError> {
        let result = self.evaluate_candidate(candidate_id, requirement)?;
        if !result.recommended_action.permits_offer() {
            return Err(MatchingServiceError::OfferRefused {
                candidate_id: candidate_id.clone(),
                action: result.recommended_action,
                score: result.overall_score,
            });
        }

        let offer = OfferIntent {
            candidate_id: candidate_id.clone(),
            vessel_name: requirement.vessel_name.clone(),
            position: requirement.position.clone(),
            joining_date: requirement.joining_date,
            overall_score: result.overall_score,
            recommended_action: result.recommended_action,
        };
        self.offers.publish(offer.clone())?;

        info!(
            candidate = %candidate_id,
            vessel = %requirement.vessel_name,
            score = result.overall_score,
            "assignment offer handed to outreach"
        );
        Ok(offer)
    }

    /// Build a recompute controller over a snapshot of the current pool.
    pub fn recompute_controller(
        &self,
        timing: RecomputeTiming,
    ) -> Result<RecomputeController, MatchingServiceError> {
        let pool = self.source.candidates()?;
        Ok(RecomputeController::new(
            RankingPipeline::clone(&self.pipeline),
            pool,
            timing,
        ))
    }
}

/// Error raised by the matching service.
#[derive(Debug, thiserror::Error)]
pub enum MatchingServiceError {
    #[error(transparent)]
    Invalid(#[from] MatchError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Offer(#[from] OfferError),
    #[error("candidate {0} not found")]
    UnknownCandidate(CandidateId),
    #[error("offer to {candidate_id} refused: {} (score {score})", .action.label())]
    OfferRefused {
        candidate_id: CandidateId,
        action: RecommendedAction,
        score: u8,
    },
}
