//! Candidate-assignment matching: per-candidate scoring, top-N ranking, portfolio insights,
//! and the debounced recompute shell that feeds the assignment authoring surface.
//!
//! Everything except [`recompute`] is a pure function of its inputs. Collaborators supply
//! validated profiles and requirements through [`repository::CandidateSource`] and receive
//! offer intents through [`repository::OfferPublisher`]; the engine never sends anything itself.

pub mod domain;
pub mod insights;
pub mod ranking;
pub mod recompute;
pub mod repository;
pub mod roster;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssignmentPriority, AssignmentRequirement, CandidateId, CandidateProfile, ResponseHistory,
    SalaryBand,
};
pub use insights::{
    aggregate_insights, InsightRecommendation, MarketAvailability, PortfolioInsights,
    RecommendationPriority,
};
pub use ranking::{MatchReport, RankedCandidate, RankingPipeline};
pub use recompute::{MatchSnapshot, RecomputeController, RecomputePhase, RecomputeTiming};
pub use repository::{CandidateSource, OfferError, OfferIntent, OfferPublisher, SourceError};
pub use roster::{RosterImportError, RosterImporter};
pub use router::matching_router;
pub use scoring::{
    MatchEvaluator, MatchQuality, MatchResult, RecommendedAction, ScoringFactor, ScoringRubric,
};
pub use service::{CrewMatchingService, MatchingServiceError};

/// Input-shape failures surfaced synchronously to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    #[error("candidate {candidate_id} rejected: {reason}")]
    InvalidCandidate {
        candidate_id: CandidateId,
        reason: String,
    },
    #[error("assignment requirement rejected: {reason}")]
    InvalidRequirement { reason: String },
}
