use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{CandidateId, CandidateProfile};
use super::scoring::RecommendedAction;

/// Read access to the personnel records owned by profile management.
pub trait CandidateSource: Send + Sync {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError>;
    fn candidate(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, SourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("candidate source unavailable: {0}")]
    Unavailable(String),
}

/// Outbound hook for the outreach side (offer letters, crewing agents).
pub trait OfferPublisher: Send + Sync {
    fn publish(&self, offer: OfferIntent) -> Result<(), OfferError>;
}

/// Everything outreach needs to send an assignment offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferIntent {
    pub candidate_id: CandidateId,
    pub vessel_name: String,
    pub position: String,
    pub joining_date: NaiveDate,
    pub overall_score: u8,
    pub recommended_action: RecommendedAction,
}

#[derive(Debug, thiserror::Error)]
pub enum OfferError {
    #[error("offer transport unavailable: {0}")]
    Transport(String),
}
