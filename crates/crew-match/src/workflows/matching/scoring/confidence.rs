use super::super::domain::CandidateProfile;

const BASE_CONFIDENCE: f64 = 80.0;
const COMPLETENESS_WEIGHT: f64 = 15.0;
const RELIABILITY_BONUS: f64 = 5.0;
const RELIABLE_ACCEPTANCE_RATE: f64 = 80.0;

/// Confidence in a candidate's score from profile completeness and acceptance history.
pub(crate) fn estimate_confidence(candidate: &CandidateProfile) -> u8 {
    let acceptance_rate = candidate.response_history.acceptance_rate;
    let populated = [
        !candidate.certifications.is_empty(),
        candidate.experience_years > 0.0,
        candidate.performance_rating > 0.0,
        acceptance_rate > 0.0,
    ]
    .into_iter()
    .filter(|present| *present)
    .count();

    let completeness = populated as f64 / 4.0 * COMPLETENESS_WEIGHT;
    let reliability = if acceptance_rate > RELIABLE_ACCEPTANCE_RATE {
        RELIABILITY_BONUS
    } else {
        0.0
    };

    (BASE_CONFIDENCE + completeness + reliability)
        .min(100.0)
        .round() as u8
}
