use serde::{Deserialize, Serialize};

/// Weights applied by the factor scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRubric {
    pub certification_weight: f64,
    pub experience_weight: f64,
    /// Experience ratio beyond which extra years earn nothing.
    pub experience_cap: f64,
    pub availability_weight: f64,
    pub availability_window_days: i64,
    pub performance_weight: f64,
    pub vessel_type_weight: f64,
    /// Acceptance rate is divided by this before capping.
    pub response_bonus_divisor: f64,
    pub response_bonus_cap: f64,
    pub language_bonus_weight: f64,
}

impl Default for ScoringRubric {
    fn default() -> Self {
        Self {
            certification_weight: 30.0,
            experience_weight: 25.0,
            experience_cap: 1.5,
            availability_weight: 20.0,
            availability_window_days: 30,
            performance_weight: 15.0,
            vessel_type_weight: 10.0,
            response_bonus_divisor: 20.0,
            response_bonus_cap: 5.0,
            language_bonus_weight: 3.0,
        }
    }
}
