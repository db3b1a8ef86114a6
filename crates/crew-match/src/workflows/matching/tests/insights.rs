use super::common::*;
use crate::workflows::matching::{
    aggregate_insights, MarketAvailability, RecommendationPriority,
};

#[test]
fn empty_results_produce_low_availability_without_dividing() {
    let insights = aggregate_insights(&[]);

    assert_eq!(insights.top_candidates, 0);
    assert_eq!(insights.average_response_time, 0.0);
    assert_eq!(insights.success_probability, 0);
    assert_eq!(insights.market_availability, MarketAvailability::Low);
    assert_eq!(
        insights.competitive_landscape,
        MarketAvailability::Low.competitive_landscape()
    );
    assert_eq!(insights.recommendations.len(), 3);
}

#[test]
fn aggregates_mixed_shortlist() {
    let results: Vec<_> = [90, 85, 75, 72, 65, 55]
        .into_iter()
        .enumerate()
        .map(|(index, score)| ranked_with_score(index + 1, score))
        .collect();

    let insights = aggregate_insights(&results);

    assert_eq!(insights.top_candidates, 4);
    assert_eq!(insights.success_probability, 60);
    assert_eq!(insights.market_availability, MarketAvailability::Medium);
    assert!((insights.average_response_time - 34.0 / 6.0).abs() < 1e-9);

    let priorities: Vec<_> = insights
        .recommendations
        .iter()
        .map(|item| item.priority)
        .collect();
    assert_eq!(
        priorities,
        vec![
            RecommendationPriority::High,
            RecommendationPriority::Medium,
            RecommendationPriority::Low,
        ]
    );
    assert!(insights.recommendations[0]
        .description
        .contains("4 top-rated candidates"));
    assert!(insights.recommendations[0].description.contains("60%"));
    assert!(insights.recommendations[1].description.contains("5.7 hours"));
    assert_eq!(
        insights.recommendations[2].description,
        insights.competitive_landscape
    );
}

#[test]
fn success_probability_is_capped() {
    let results: Vec<_> = (1..=8).map(|position| ranked_with_score(position, 92)).collect();

    let insights = aggregate_insights(&results);

    assert_eq!(insights.top_candidates, 8);
    assert_eq!(insights.success_probability, 95);
    assert_eq!(insights.market_availability, MarketAvailability::High);
    assert_eq!(insights.average_response_time, 2.0);
}

#[test]
fn response_buckets_use_strict_thresholds() {
    let results = vec![ranked_with_score(1, 80), ranked_with_score(2, 60)];

    let insights = aggregate_insights(&results);

    assert_eq!(insights.top_candidates, 1);
    assert_eq!(insights.average_response_time, 9.0);
    assert_eq!(insights.market_availability, MarketAvailability::Low);
    assert!(insights.recommendations[0]
        .description
        .contains("1 top-rated candidate first"));
}
