mod confidence;
pub(crate) mod factors;
mod policy;
mod rubric;

pub use policy::{MatchQuality, RecommendedAction};
pub use rubric::ScoringRubric;

use super::domain::{AssignmentRequirement, CandidateProfile};
use super::MatchError;
use confidence::estimate_confidence;
use factors::{score_factors, FactorSignals};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless evaluator that applies the rubric to one candidate/requirement pair.
#[derive(Debug, Clone, Default)]
pub struct MatchEvaluator {
    rubric: ScoringRubric,
}

impl MatchEvaluator {
    pub fn new(rubric: ScoringRubric) -> Self {
        Self { rubric }
    }

    pub fn rubric(&self) -> &ScoringRubric {
        &self.rubric
    }

    /// Score a pair that has already been validated.
    pub fn evaluate(
        &self,
        candidate: &CandidateProfile,
        requirement: &AssignmentRequirement,
    ) -> MatchResult {
        let (scoring_factors, signals) = score_factors(candidate, requirement, &self.rubric);

        let raw_score: f64 = scoring_factors.iter().map(|factor| factor.score).sum();
        let overall_score = raw_score.clamp(0.0, 100.0).round() as u8;
        let (compatibility_notes, risk_factors) = annotate(&signals);

        debug!(
            candidate = %candidate.id,
            raw_score,
            overall_score,
            risks = risk_factors.len(),
            "candidate evaluated"
        );

        MatchResult {
            overall_score,
            match_quality: MatchQuality::classify(overall_score),
            scoring_factors,
            ai_confidence: estimate_confidence(candidate),
            recommended_action: RecommendedAction::recommend(overall_score, risk_factors.len()),
            compatibility_notes,
            risk_factors,
        }
    }

    /// Validate both inputs before scoring.
    pub fn try_evaluate(
        &self,
        candidate: &CandidateProfile,
        requirement: &AssignmentRequirement,
    ) -> Result<MatchResult, MatchError> {
        requirement.validate()?;
        candidate.validate()?;
        Ok(self.evaluate(candidate, requirement))
    }
}

fn annotate(signals: &FactorSignals) -> (Vec<String>, Vec<String>) {
    let mut notes = Vec::new();
    let mut risks = Vec::new();

    if signals.certification_ratio >= 1.0 {
        notes.push("All required certifications present".to_string());
    } else if signals.certification_ratio < 0.8 {
        risks.push("Missing key certifications".to_string());
    }

    if signals.experience_ratio > 1.2 {
        notes.push("Highly experienced for this role".to_string());
    }

    if signals.days_until_available <= 7 {
        notes.push("Available for immediate assignment".to_string());
    } else if signals.days_until_available > 14 {
        risks.push("Not available for immediate assignment".to_string());
    }

    if signals.performance_rating >= 4.5 {
        notes.push("Excellent performance history".to_string());
    } else if signals.performance_rating < 3.5 {
        risks.push("Below average performance rating".to_string());
    }

    if !signals.vessel_type_match {
        risks.push("No experience with this vessel type".to_string());
    }

    (notes, risks)
}

/// One line of the scoring audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringFactor {
    pub name: String,
    pub score: f64,
    /// Percentage label such as `"30%"`, or `"Bonus"`.
    pub weight: String,
    pub detail: String,
}

impl ScoringFactor {
    fn weighted(name: &str, score: f64, weight: f64, detail: String) -> Self {
        Self {
            name: name.to_string(),
            score,
            weight: format!("{weight:.0}%"),
            detail,
        }
    }

    fn bonus(name: &str, score: f64, detail: String) -> Self {
        Self {
            name: name.to_string(),
            score,
            weight: "Bonus".to_string(),
            detail,
        }
    }
}

/// Per-candidate evaluation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub overall_score: u8,
    pub match_quality: MatchQuality,
    pub scoring_factors: Vec<ScoringFactor>,
    pub ai_confidence: u8,
    pub recommended_action: RecommendedAction,
    pub compatibility_notes: Vec<String>,
    pub risk_factors: Vec<String>,
}

impl MatchResult {
    pub fn summary(&self) -> String {
        format!(
            "{} match ({}), {}",
            self.match_quality.label(),
            self.overall_score,
            self.recommended_action.label()
        )
    }
}
