use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::workflows::matching::domain::{
    AssignmentPriority, AssignmentRequirement, CandidateId, CandidateProfile, ResponseHistory,
};
use crate::workflows::matching::ranking::{RankedCandidate, RankingPipeline};
use crate::workflows::matching::repository::{
    CandidateSource, OfferError, OfferIntent, OfferPublisher, SourceError,
};
use crate::workflows::matching::scoring::{
    MatchEvaluator, MatchQuality, MatchResult, RecommendedAction,
};
use crate::workflows::matching::service::CrewMatchingService;

pub(super) fn joining_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date")
}

pub(super) fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

/// Requirement from the perfect-match scenario: certs A and B, five years, tanker.
pub(super) fn requirement() -> AssignmentRequirement {
    AssignmentRequirement {
        vessel_name: "MT Nordic Star".to_string(),
        vessel_type: "Tanker".to_string(),
        position: "Chief Officer".to_string(),
        required_certifications: set(&["A", "B"]),
        min_experience: 5.0,
        route: "Rotterdam-Houston".to_string(),
        joining_date: joining_date(),
        contract_duration_months: 6,
        required_languages: BTreeSet::new(),
        priority: AssignmentPriority::High,
        salary_band: None,
        special_requirements: Vec::new(),
    }
}

pub(super) fn requirement_for(vessel_name: &str) -> AssignmentRequirement {
    AssignmentRequirement {
        vessel_name: vessel_name.to_string(),
        ..requirement()
    }
}

/// Candidate that satisfies every factor of [`requirement`] in full.
pub(super) fn strong_candidate(id: &str) -> CandidateProfile {
    CandidateProfile {
        id: CandidateId(id.to_string()),
        name: format!("Officer {id}"),
        rank: "Chief Officer".to_string(),
        certifications: set(&["A", "B"]),
        experience_years: 10.0,
        performance_rating: 5.0,
        availability_date: joining_date(),
        last_assignment_end: Some(joining_date() - Duration::days(45)),
        vessel_types_experience: set(&["Tanker"]),
        preferred_routes: set(&["Rotterdam-Houston"]),
        languages: set(&["English"]),
        response_history: ResponseHistory {
            average_response_hours: 2.5,
            acceptance_rate: 100.0,
            reliability_score: 4.9,
        },
    }
}

/// Candidate from the weak-match scenario.
pub(super) fn weak_candidate(id: &str) -> CandidateProfile {
    CandidateProfile {
        id: CandidateId(id.to_string()),
        name: format!("Rating {id}"),
        rank: "Ordinary Seaman".to_string(),
        certifications: set(&["C"]),
        experience_years: 1.0,
        performance_rating: 2.0,
        availability_date: joining_date() + Duration::days(60),
        last_assignment_end: None,
        vessel_types_experience: set(&["Bulk Carrier"]),
        preferred_routes: BTreeSet::new(),
        languages: BTreeSet::new(),
        response_history: ResponseHistory {
            average_response_hours: 30.0,
            acceptance_rate: 0.0,
            reliability_score: 2.0,
        },
    }
}

/// Strong candidate with a different amount of sea time.
pub(super) fn candidate_with_experience(id: &str, years: f64) -> CandidateProfile {
    CandidateProfile {
        experience_years: years,
        ..strong_candidate(id)
    }
}

pub(super) fn factor_score(result: &MatchResult, name: &str) -> f64 {
    result
        .scoring_factors
        .iter()
        .find(|factor| factor.name == name)
        .map(|factor| factor.score)
        .unwrap_or_else(|| panic!("factor {name} missing from {result:?}"))
}

pub(super) fn ranked_with_score(position: usize, score: u8) -> RankedCandidate {
    RankedCandidate {
        position,
        candidate_id: CandidateId(format!("cm-{position}")),
        candidate_name: format!("Crew {position}"),
        candidate_rank: "Able Seaman".to_string(),
        result: MatchResult {
            overall_score: score,
            match_quality: MatchQuality::classify(score),
            scoring_factors: Vec::new(),
            ai_confidence: 90,
            recommended_action: RecommendedAction::recommend(score, 0),
            compatibility_notes: Vec::new(),
            risk_factors: Vec::new(),
        },
    }
}

pub(super) fn evaluator() -> MatchEvaluator {
    MatchEvaluator::default()
}

pub(super) fn pipeline() -> RankingPipeline {
    RankingPipeline::default()
}

#[derive(Default)]
pub(super) struct MemorySource {
    candidates: Vec<CandidateProfile>,
}

impl MemorySource {
    pub(super) fn with(candidates: Vec<CandidateProfile>) -> Self {
        Self { candidates }
    }
}

impl CandidateSource for MemorySource {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError> {
        Ok(self.candidates.clone())
    }

    fn candidate(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, SourceError> {
        Ok(self
            .candidates
            .iter()
            .find(|candidate| &candidate.id == id)
            .cloned())
    }
}

pub(super) struct UnavailableSource;

impl CandidateSource for UnavailableSource {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError> {
        Err(SourceError::Unavailable("crew database offline".to_string()))
    }

    fn candidate(&self, _id: &CandidateId) -> Result<Option<CandidateProfile>, SourceError> {
        Err(SourceError::Unavailable("crew database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryOffers {
    sent: Arc<Mutex<HashMap<CandidateId, OfferIntent>>>,
}

impl OfferPublisher for MemoryOffers {
    fn publish(&self, offer: OfferIntent) -> Result<(), OfferError> {
        let mut guard = self.sent.lock().expect("offer mutex poisoned");
        guard.insert(offer.candidate_id.clone(), offer);
        Ok(())
    }
}

impl MemoryOffers {
    pub(super) fn sent(&self) -> Vec<OfferIntent> {
        self.sent
            .lock()
            .expect("offer mutex poisoned")
            .values()
            .cloned()
            .collect()
    }
}

pub(super) fn standard_pool() -> Vec<CandidateProfile> {
    vec![
        strong_candidate("cm-001"),
        weak_candidate("cm-002"),
        candidate_with_experience("cm-003", 4.0),
    ]
}

pub(super) fn service_with(
    candidates: Vec<CandidateProfile>,
) -> (
    CrewMatchingService<MemorySource, MemoryOffers>,
    Arc<MemoryOffers>,
) {
    let offers = Arc::new(MemoryOffers::default());
    let service = CrewMatchingService::new(
        Arc::new(MemorySource::with(candidates)),
        offers.clone(),
        pipeline(),
    );
    (service, offers)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
