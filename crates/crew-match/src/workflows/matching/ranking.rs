use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{AssignmentRequirement, CandidateId, CandidateProfile};
use super::insights::{aggregate_insights, PortfolioInsights};
use super::scoring::{MatchEvaluator, MatchResult};
use super::MatchError;

const DEFAULT_LIMIT: usize = 10;
const DEFAULT_MINIMUM_SCORE: u8 = 50;

/// A scored candidate paired with its identity and 1-based position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub position: usize,
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub candidate_rank: String,
    pub result: MatchResult,
}

/// Ranked shortlist plus the insights derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub results: Vec<RankedCandidate>,
    pub insights: PortfolioInsights,
}

impl MatchReport {
    pub fn from_results(results: Vec<RankedCandidate>) -> Self {
        let insights = aggregate_insights(&results);
        Self { results, insights }
    }
}

/// Evaluates a pool, drops weak matches, and keeps a bounded top-N window.
#[derive(Debug, Clone)]
pub struct RankingPipeline {
    evaluator: MatchEvaluator,
    limit: usize,
    minimum_score: u8,
}

impl Default for RankingPipeline {
    fn default() -> Self {
        Self::new(MatchEvaluator::default())
    }
}

impl RankingPipeline {
    pub fn new(evaluator: MatchEvaluator) -> Self {
        Self {
            evaluator,
            limit: DEFAULT_LIMIT,
            minimum_score: DEFAULT_MINIMUM_SCORE,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_minimum_score(mut self, minimum_score: u8) -> Self {
        self.minimum_score = minimum_score;
        self
    }

    pub fn evaluator(&self) -> &MatchEvaluator {
        &self.evaluator
    }

    pub fn rank(
        &self,
        pool: &[CandidateProfile],
        requirement: &AssignmentRequirement,
    ) -> Result<Vec<RankedCandidate>, MatchError> {
        requirement.validate()?;

        let mut scored = Vec::with_capacity(pool.len());
        for candidate in pool {
            candidate.validate()?;
            let result = self.evaluator.evaluate(candidate, requirement);
            if result.overall_score >= self.minimum_score {
                scored.push((candidate, result));
            }
        }

        let qualified = scored.len();
        // stable: equal scores keep pool order
        scored.sort_by(|(_, left), (_, right)| right.overall_score.cmp(&left.overall_score));
        scored.truncate(self.limit);

        let ranked: Vec<RankedCandidate> = scored
            .into_iter()
            .enumerate()
            .map(|(index, (candidate, result))| RankedCandidate {
                position: index + 1,
                candidate_id: candidate.id.clone(),
                candidate_name: candidate.name.clone(),
                candidate_rank: candidate.rank.clone(),
                result,
            })
            .collect();

        info!(
            vessel = %requirement.vessel_name,
            position = %requirement.position,
            pool = pool.len(),
            qualified,
            returned = ranked.len(),
            "candidate pool ranked"
        );

        Ok(ranked)
    }

    /// Rank the pool and aggregate insights in one pass.
    pub fn report(
        &self,
        pool: &[CandidateProfile],
        requirement: &AssignmentRequirement,
    ) -> Result<MatchReport, MatchError> {
        self.rank(pool, requirement).map(MatchReport::from_results)
    }
}
