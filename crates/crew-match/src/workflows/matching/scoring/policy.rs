use serde::{Deserialize, Serialize};

/// Four-tier classification of an overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl MatchQuality {
    pub fn classify(score: u8) -> Self {
        match score {
            85.. => MatchQuality::Excellent,
            70..=84 => MatchQuality::Good,
            55..=69 => MatchQuality::Fair,
            _ => MatchQuality::Poor,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            MatchQuality::Excellent => "Excellent",
            MatchQuality::Good => "Good",
            MatchQuality::Fair => "Fair",
            MatchQuality::Poor => "Poor",
        }
    }
}

/// Suggested next step for the assignment desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendedAction {
    #[serde(rename = "Immediate Assignment")]
    ImmediateAssignment,
    #[serde(rename = "Send Offer")]
    SendOffer,
    #[serde(rename = "Consider Alternative")]
    ConsiderAlternative,
    #[serde(rename = "Not Recommended")]
    NotRecommended,
}

impl RecommendedAction {
    pub fn recommend(score: u8, risk_count: usize) -> Self {
        if score >= 85 && risk_count == 0 {
            RecommendedAction::ImmediateAssignment
        } else if score >= 70 && risk_count <= 1 {
            RecommendedAction::SendOffer
        } else if score >= 55 {
            RecommendedAction::ConsiderAlternative
        } else {
            RecommendedAction::NotRecommended
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RecommendedAction::ImmediateAssignment => "Immediate Assignment",
            RecommendedAction::SendOffer => "Send Offer",
            RecommendedAction::ConsiderAlternative => "Consider Alternative",
            RecommendedAction::NotRecommended => "Not Recommended",
        }
    }

    /// Whether the outreach side may act on this recommendation.
    pub const fn permits_offer(self) -> bool {
        !matches!(self, RecommendedAction::NotRecommended)
    }
}
