use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{AssignmentRequirement, CandidateId};
use super::recompute::RecomputeController;
use super::repository::{CandidateSource, OfferPublisher};
use super::service::{CrewMatchingService, MatchingServiceError};

/// Shared handler state: the one-shot service and the draft recompute controller.
pub struct MatchingState<S, O> {
    pub service: Arc<CrewMatchingService<S, O>>,
    pub recompute: Arc<RecomputeController>,
}

impl<S, O> Clone for MatchingState<S, O> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            recompute: Arc::clone(&self.recompute),
        }
    }
}

/// Router builder exposing evaluation, offers, and draft recomputation.
pub fn matching_router<S, O>(
    service: Arc<CrewMatchingService<S, O>>,
    recompute: Arc<RecomputeController>,
) -> Router
where
    S: CandidateSource + 'static,
    O: OfferPublisher + 'static,
{
    Router::new()
        .route("/api/v1/matching/evaluate", post(evaluate_handler::<S, O>))
        .route(
            "/api/v1/matching/candidates/:candidate_id/offer",
            post(offer_handler::<S, O>),
        )
        .route("/api/v1/matching/drafts", post(draft_handler::<S, O>))
        .route(
            "/api/v1/matching/drafts/latest",
            get(latest_draft_handler::<S, O>),
        )
        .with_state(MatchingState { service, recompute })
}

pub(crate) async fn evaluate_handler<S, O>(
    State(state): State<MatchingState<S, O>>,
    Json(requirement): Json<AssignmentRequirement>,
) -> Response
where
    S: CandidateSource + 'static,
    O: OfferPublisher + 'static,
{
    match state.service.evaluate(&requirement) {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn offer_handler<S, O>(
    State(state): State<MatchingState<S, O>>,
    Path(candidate_id): Path<String>,
    Json(requirement): Json<AssignmentRequirement>,
) -> Response
where
    S: CandidateSource + 'static,
    O: OfferPublisher + 'static,
{
    let candidate_id = CandidateId(candidate_id);
    match state.service.request_offer(&candidate_id, &requirement) {
        Ok(offer) => (StatusCode::ACCEPTED, Json(offer)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn draft_handler<S, O>(
    State(state): State<MatchingState<S, O>>,
    Json(requirement): Json<AssignmentRequirement>,
) -> Response
where
    S: CandidateSource + 'static,
    O: OfferPublisher + 'static,
{
    match state.recompute.submit(requirement) {
        Ok(generation) => {
            let payload = json!({
                "generation": generation,
                "phase": state.recompute.phase(),
            });
            (StatusCode::ACCEPTED, Json(payload)).into_response()
        }
        Err(err) => error_response(MatchingServiceError::Invalid(err)),
    }
}

pub(crate) async fn latest_draft_handler<S, O>(
    State(state): State<MatchingState<S, O>>,
) -> Response
where
    S: CandidateSource + 'static,
    O: OfferPublisher + 'static,
{
    let recompute = &state.recompute;
    match recompute.latest() {
        Some(snapshot) if snapshot.generation == recompute.generation() => {
            (StatusCode::OK, Json(snapshot.as_ref().clone())).into_response()
        }
        _ => {
            let payload = json!({
                "status": "pending",
                "generation": recompute.generation(),
                "phase": recompute.phase(),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
    }
}

impl MatchingServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MatchingServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            MatchingServiceError::Source(_) => StatusCode::SERVICE_UNAVAILABLE,
            MatchingServiceError::Offer(_) => StatusCode::BAD_GATEWAY,
            MatchingServiceError::UnknownCandidate(_) => StatusCode::NOT_FOUND,
            MatchingServiceError::OfferRefused { .. } => StatusCode::CONFLICT,
        }
    }
}

fn error_response(err: MatchingServiceError) -> Response {
    let payload = json!({
        "error": err.to_string(),
    });
    (err.status_code(), Json(payload)).into_response()
}
