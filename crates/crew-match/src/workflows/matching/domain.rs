use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::MatchError;

/// Identifier wrapper for crew members in the candidate pool.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offer responsiveness tracked by the profile-management side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseHistory {
    pub average_response_hours: f64,
    /// Percentage of offers accepted, 0-100.
    pub acceptance_rate: f64,
    /// 1.0-5.0.
    pub reliability_score: f64,
}

/// Read-only snapshot of a seafarer eligible for assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: CandidateId,
    pub name: String,
    pub rank: String,
    #[serde(default)]
    pub certifications: BTreeSet<String>,
    pub experience_years: f64,
    pub performance_rating: f64,
    pub availability_date: NaiveDate,
    #[serde(default)]
    pub last_assignment_end: Option<NaiveDate>,
    #[serde(default)]
    pub vessel_types_experience: BTreeSet<String>,
    #[serde(default)]
    pub preferred_routes: BTreeSet<String>,
    #[serde(default)]
    pub languages: BTreeSet<String>,
    pub response_history: ResponseHistory,
}

impl CandidateProfile {
    /// Reject profiles whose numbers would poison the arithmetic downstream.
    pub fn validate(&self) -> Result<(), MatchError> {
        let invalid = |reason: String| MatchError::InvalidCandidate {
            candidate_id: self.id.clone(),
            reason,
        };

        if self.id.0.trim().is_empty() {
            return Err(invalid("candidate id is empty".to_string()));
        }
        if !self.experience_years.is_finite() || self.experience_years < 0.0 {
            return Err(invalid(format!(
                "experience_years must be a non-negative number, found {}",
                self.experience_years
            )));
        }
        if !(1.0..=5.0).contains(&self.performance_rating) {
            return Err(invalid(format!(
                "performance_rating must be within 1.0-5.0, found {}",
                self.performance_rating
            )));
        }

        let history = &self.response_history;
        if !(0.0..=100.0).contains(&history.acceptance_rate) {
            return Err(invalid(format!(
                "acceptance_rate must be within 0-100, found {}",
                history.acceptance_rate
            )));
        }
        if !(1.0..=5.0).contains(&history.reliability_score) {
            return Err(invalid(format!(
                "reliability_score must be within 1.0-5.0, found {}",
                history.reliability_score
            )));
        }
        if !history.average_response_hours.is_finite() || history.average_response_hours < 0.0 {
            return Err(invalid(format!(
                "average_response_hours must be a non-negative number, found {}",
                history.average_response_hours
            )));
        }

        Ok(())
    }
}

/// Urgency attached to an opening by the assignment desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl AssignmentPriority {
    pub const fn label(self) -> &'static str {
        match self {
            AssignmentPriority::Low => "low",
            AssignmentPriority::Medium => "medium",
            AssignmentPriority::High => "high",
            AssignmentPriority::Urgent => "urgent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub minimum: u32,
    pub maximum: u32,
    pub currency: String,
}

/// Immutable snapshot of a job opening, taken once per evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentRequirement {
    pub vessel_name: String,
    pub vessel_type: String,
    pub position: String,
    #[serde(default)]
    pub required_certifications: BTreeSet<String>,
    pub min_experience: f64,
    #[serde(default)]
    pub route: String,
    pub joining_date: NaiveDate,
    pub contract_duration_months: u16,
    #[serde(default)]
    pub required_languages: BTreeSet<String>,
    #[serde(default)]
    pub priority: AssignmentPriority,
    #[serde(default)]
    pub salary_band: Option<SalaryBand>,
    #[serde(default)]
    pub special_requirements: Vec<String>,
}

impl AssignmentRequirement {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.vessel_type.trim().is_empty() {
            return Err(MatchError::InvalidRequirement {
                reason: "vessel_type is empty".to_string(),
            });
        }
        if self.position.trim().is_empty() {
            return Err(MatchError::InvalidRequirement {
                reason: "position is empty".to_string(),
            });
        }
        if !self.min_experience.is_finite() || self.min_experience < 0.0 {
            return Err(MatchError::InvalidRequirement {
                reason: format!(
                    "min_experience must be a non-negative number, found {}",
                    self.min_experience
                ),
            });
        }
        if self.contract_duration_months == 0 {
            return Err(MatchError::InvalidRequirement {
                reason: "contract_duration_months must be at least one month".to_string(),
            });
        }
        if let Some(band) = &self.salary_band {
            if band.minimum > band.maximum {
                return Err(MatchError::InvalidRequirement {
                    reason: format!(
                        "salary band minimum {} exceeds maximum {}",
                        band.minimum, band.maximum
                    ),
                });
            }
        }

        Ok(())
    }
}
