use serde::{Deserialize, Serialize};

use super::ranking::RankedCandidate;

const TOP_CANDIDATE_SCORE: u8 = 70;
const SUCCESS_PER_TOP_CANDIDATE: usize = 15;
const SUCCESS_CEILING: usize = 95;

/// Depth of the qualified pool for an opening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketAvailability {
    High,
    Medium,
    Low,
}

impl MarketAvailability {
    fn from_top_candidates(top_candidates: usize) -> Self {
        if top_candidates > 5 {
            MarketAvailability::High
        } else if top_candidates > 2 {
            MarketAvailability::Medium
        } else {
            MarketAvailability::Low
        }
    }

    pub const fn competitive_landscape(self) -> &'static str {
        match self {
            MarketAvailability::High => {
                "Strong candidate pool with multiple qualified crew available for this assignment"
            }
            MarketAvailability::Medium => {
                "Moderate competition; qualified crew exist but may receive competing offers"
            }
            MarketAvailability::Low => {
                "Limited qualified crew available; consider widening criteria or starting outreach early"
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecommendation {
    pub icon: String,
    pub title: String,
    pub description: String,
    pub priority: RecommendationPriority,
}

/// Aggregate view over a ranked shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioInsights {
    pub top_candidates: usize,
    /// Expected hours until a reply, averaged over the shortlist.
    pub average_response_time: f64,
    pub success_probability: u8,
    pub market_availability: MarketAvailability,
    pub competitive_landscape: String,
    pub recommendations: Vec<InsightRecommendation>,
}

pub fn aggregate_insights(results: &[RankedCandidate]) -> PortfolioInsights {
    let top_candidates = results
        .iter()
        .filter(|ranked| ranked.result.overall_score >= TOP_CANDIDATE_SCORE)
        .count();

    let average_response_time = if results.is_empty() {
        0.0
    } else {
        let total: f64 = results
            .iter()
            .map(|ranked| expected_response_hours(ranked.result.overall_score))
            .sum();
        total / results.len() as f64
    };

    let success_probability =
        (top_candidates * SUCCESS_PER_TOP_CANDIDATE).min(SUCCESS_CEILING) as u8;
    let market_availability = MarketAvailability::from_top_candidates(top_candidates);
    let competitive_landscape = market_availability.competitive_landscape().to_string();

    let recommendations = vec![
        InsightRecommendation {
            icon: "target".to_string(),
            title: "Prioritize Top Candidates".to_string(),
            description: format!(
                "Contact the {top_candidates} top-rated candidate{} first; estimated success probability {success_probability}%",
                if top_candidates == 1 { "" } else { "s" }
            ),
            priority: RecommendationPriority::High,
        },
        InsightRecommendation {
            icon: "clock".to_string(),
            title: "Plan Around Response Times".to_string(),
            description: format!(
                "Expect replies within {average_response_time:.1} hours on average; schedule follow-ups accordingly"
            ),
            priority: RecommendationPriority::Medium,
        },
        InsightRecommendation {
            icon: "trending-up".to_string(),
            title: "Market Strategy".to_string(),
            description: competitive_landscape.clone(),
            priority: RecommendationPriority::Low,
        },
    ];

    PortfolioInsights {
        top_candidates,
        average_response_time,
        success_probability,
        market_availability,
        competitive_landscape,
        recommendations,
    }
}

fn expected_response_hours(score: u8) -> f64 {
    if score > 80 {
        2.0
    } else if score > 60 {
        6.0
    } else {
        12.0
    }
}
