use super::super::domain::{AssignmentRequirement, CandidateProfile};
use super::rubric::ScoringRubric;
use super::ScoringFactor;

pub(crate) const CERTIFICATIONS: &str = "Certifications";
pub(crate) const EXPERIENCE: &str = "Experience";
pub(crate) const AVAILABILITY: &str = "Availability";
pub(crate) const PERFORMANCE: &str = "Performance";
pub(crate) const VESSEL_TYPE: &str = "Vessel Type Experience";
pub(crate) const RESPONSE_HISTORY: &str = "Response History";
pub(crate) const LANGUAGES: &str = "Language Match";

/// Intermediate measurements the evaluator turns into notes and risks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FactorSignals {
    pub certification_ratio: f64,
    pub experience_ratio: f64,
    pub days_until_available: i64,
    pub performance_rating: f64,
    pub vessel_type_match: bool,
}

pub(crate) fn score_factors(
    candidate: &CandidateProfile,
    requirement: &AssignmentRequirement,
    rubric: &ScoringRubric,
) -> (Vec<ScoringFactor>, FactorSignals) {
    let mut factors = Vec::with_capacity(7);

    let required = &requirement.required_certifications;
    let (certification_ratio, certification_detail) = if required.is_empty() {
        (1.0, "no certification requirement specified".to_string())
    } else {
        let held = required
            .iter()
            .filter(|cert| candidate.certifications.contains(*cert))
            .count();
        let ratio = held as f64 / required.len() as f64;
        (
            ratio,
            format!(
                "{held}/{} certifications matched ({:.0}%)",
                required.len(),
                ratio * 100.0
            ),
        )
    };
    factors.push(ScoringFactor::weighted(
        CERTIFICATIONS,
        certification_ratio * rubric.certification_weight,
        rubric.certification_weight,
        certification_detail,
    ));

    let (experience_ratio, experience_detail) = if requirement.min_experience > 0.0 {
        let ratio = candidate.experience_years / requirement.min_experience;
        (
            ratio,
            format!(
                "{} years vs {} required",
                trim_years(candidate.experience_years),
                trim_years(requirement.min_experience)
            ),
        )
    } else {
        (
            1.0,
            format!(
                "{} years, no minimum experience specified",
                trim_years(candidate.experience_years)
            ),
        )
    };
    factors.push(ScoringFactor::weighted(
        EXPERIENCE,
        experience_ratio.min(rubric.experience_cap) * rubric.experience_weight,
        rubric.experience_weight,
        experience_detail,
    ));

    let days_until_available = (candidate.availability_date - requirement.joining_date)
        .num_days()
        .max(0);
    let window = rubric.availability_window_days.max(1) as f64;
    let availability_share = ((window - days_until_available as f64) / window).max(0.0);
    let availability_detail = if days_until_available == 0 {
        "available by joining date".to_string()
    } else {
        format!("available {days_until_available} day(s) after joining date")
    };
    factors.push(ScoringFactor::weighted(
        AVAILABILITY,
        availability_share * rubric.availability_weight,
        rubric.availability_weight,
        availability_detail,
    ));

    factors.push(ScoringFactor::weighted(
        PERFORMANCE,
        candidate.performance_rating / 5.0 * rubric.performance_weight,
        rubric.performance_weight,
        format!("{:.1}/5.0 rating", candidate.performance_rating),
    ));

    let vessel_type_match = candidate
        .vessel_types_experience
        .contains(&requirement.vessel_type);
    factors.push(ScoringFactor::weighted(
        VESSEL_TYPE,
        if vessel_type_match {
            rubric.vessel_type_weight
        } else {
            0.0
        },
        rubric.vessel_type_weight,
        if vessel_type_match {
            format!("has served on {} vessels", requirement.vessel_type)
        } else {
            format!("no {} experience", requirement.vessel_type)
        },
    ));

    let acceptance_rate = candidate.response_history.acceptance_rate;
    let response_bonus =
        (acceptance_rate / rubric.response_bonus_divisor).min(rubric.response_bonus_cap);
    if response_bonus > 0.0 {
        factors.push(ScoringFactor::bonus(
            RESPONSE_HISTORY,
            response_bonus,
            format!(
                "{:.0}% acceptance rate, {:.1}h average response",
                acceptance_rate, candidate.response_history.average_response_hours
            ),
        ));
    }

    let languages = &requirement.required_languages;
    if !languages.is_empty() {
        let spoken = languages
            .iter()
            .filter(|language| candidate.languages.contains(*language))
            .count();
        let ratio = spoken as f64 / languages.len() as f64;
        factors.push(ScoringFactor::bonus(
            LANGUAGES,
            ratio * rubric.language_bonus_weight,
            format!("{spoken}/{} required languages spoken", languages.len()),
        ));
    }

    let signals = FactorSignals {
        certification_ratio,
        experience_ratio,
        days_until_available,
        performance_rating: candidate.performance_rating,
        vessel_type_match,
    };

    (factors, signals)
}

fn trim_years(years: f64) -> String {
    if years.fract() == 0.0 {
        format!("{years:.0}")
    } else {
        format!("{years:.1}")
    }
}
