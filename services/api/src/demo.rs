use crate::infra::{parse_date, InMemoryCandidateSource, InMemoryOfferPublisher};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use crew_match::error::AppError;
use crew_match::workflows::matching::{
    AssignmentPriority, AssignmentRequirement, CandidateId, CandidateProfile, CrewMatchingService,
    MatchReport, RankingPipeline, ResponseHistory, RosterImporter, SalaryBand,
};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchReportArgs {
    /// Roster CSV export with one candidate per row
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Assignment requirement as a JSON document
    #[arg(long)]
    pub(crate) requirement: PathBuf,
    /// Print the scoring breakdown for every ranked candidate
    #[arg(long)]
    pub(crate) show_factors: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Joining date for the demo vessel (YYYY-MM-DD). Defaults to today + 14 days.
    #[arg(long, value_parser = parse_date)]
    pub(crate) joining_date: Option<NaiveDate>,
    /// Skip the offer hand-off portion of the demo.
    #[arg(long)]
    pub(crate) skip_offer: bool,
}

pub(crate) fn run_match_report(args: MatchReportArgs) -> Result<(), AppError> {
    let MatchReportArgs {
        roster,
        requirement,
        show_factors,
    } = args;

    let pool = RosterImporter::from_path(&roster)?;
    let reader = BufReader::new(File::open(&requirement)?);
    let requirement: AssignmentRequirement = serde_json::from_reader(reader)?;

    let report = RankingPipeline::default().report(&pool, &requirement)?;
    println!(
        "Ranked {} of {} candidates from {}",
        report.results.len(),
        pool.len(),
        roster.display()
    );
    render_match_report(&requirement, &report, show_factors);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let joining_date = args
        .joining_date
        .unwrap_or_else(|| Local::now().date_naive() + Duration::days(14));
    let requirement = demo_requirement(joining_date);

    let source = Arc::new(InMemoryCandidateSource::with_candidates(synthetic_pool(
        joining_date,
    )));
    let offers = Arc::new(InMemoryOfferPublisher::default());
    let service = CrewMatchingService::new(
        Arc::clone(&source),
        Arc::clone(&offers),
        RankingPipeline::default(),
    );

    println!("Crew matching demo");
    println!("Candidate pool: {} profiles", source.len());
    let report = service.evaluate(&requirement)?;
    render_match_report(&requirement, &report, true);

    if args.skip_offer {
        return Ok(());
    }

    println!("\nOffer hand-off");
    let Some(leader) = report.results.first() else {
        println!("  No candidate cleared the shortlist; nothing to offer");
        return Ok(());
    };
    match service.request_offer(&leader.candidate_id, &requirement) {
        Ok(offer) => println!(
            "  Offer queued for {} on {} as {} (score {})",
            offer.candidate_id, offer.vessel_name, offer.position, offer.overall_score
        ),
        Err(err) => println!("  Offer not sent: {}", err),
    }

    let outsider = CandidateId("cm-d05".to_string());
    if let Err(err) = service.request_offer(&outsider, &requirement) {
        println!("  Offer to {} refused: {}", outsider, err);
    }
    println!("  Outbox holds {} offer(s)", offers.events().len());
    Ok(())
}

pub(crate) fn render_match_report(
    requirement: &AssignmentRequirement,
    report: &MatchReport,
    show_factors: bool,
) {
    println!(
        "\n{} ({}) for {} joining {} [{} priority]",
        requirement.vessel_name,
        requirement.vessel_type,
        requirement.position,
        requirement.joining_date,
        requirement.priority.label()
    );

    if report.results.is_empty() {
        println!("  No candidates cleared the minimum score");
    }
    for entry in &report.results {
        println!(
            "  #{:<2} {:<10} {:<22} {:<16} {}",
            entry.position,
            entry.candidate_id.to_string(),
            entry.candidate_name,
            entry.candidate_rank,
            entry.result.summary()
        );
        if !show_factors {
            continue;
        }
        for factor in &entry.result.scoring_factors {
            println!(
                "       - {} [{}]: {:.1} ({})",
                factor.name, factor.weight, factor.score, factor.detail
            );
        }
        for note in &entry.result.compatibility_notes {
            println!("       + {}", note);
        }
        for risk in &entry.result.risk_factors {
            println!("       ! {}", risk);
        }
        println!("       confidence {}%", entry.result.ai_confidence);
    }

    let insights = &report.insights;
    println!("\nInsights");
    println!(
        "  Top candidates: {} | success probability {}% | avg response {:.1}h | market {:?}",
        insights.top_candidates,
        insights.success_probability,
        insights.average_response_time,
        insights.market_availability
    );
    println!("  {}", insights.competitive_landscape);
    for recommendation in &insights.recommendations {
        println!(
            "  [{:?}] {}: {}",
            recommendation.priority, recommendation.title, recommendation.description
        );
    }
}

fn demo_requirement(joining_date: NaiveDate) -> AssignmentRequirement {
    AssignmentRequirement {
        vessel_name: "MT Nordic Star".to_string(),
        vessel_type: "Tanker".to_string(),
        position: "Chief Officer".to_string(),
        required_certifications: strings(&["STCW", "GMDSS", "Tanker Endorsement"]),
        min_experience: 5.0,
        route: "Rotterdam-Houston".to_string(),
        joining_date,
        contract_duration_months: 4,
        required_languages: strings(&["English"]),
        priority: AssignmentPriority::High,
        salary_band: Some(SalaryBand {
            minimum: 9_500,
            maximum: 12_000,
            currency: "USD".to_string(),
        }),
        special_requirements: vec!["Inert gas system experience".to_string()],
    }
}

/// Small mixed pool spanning every quality band around the demo joining date.
pub(crate) fn synthetic_pool(joining_date: NaiveDate) -> Vec<CandidateProfile> {
    let entries: [(&str, &str, &[&str], f64, f64, i64, &[&str], &[&str], [f64; 3]); 5] = [
        (
            "Ana Reyes",
            "Chief Officer",
            &["STCW", "GMDSS", "Tanker Endorsement"],
            12.0,
            4.8,
            -3,
            &["Tanker", "Chemical Tanker"],
            &["English", "Tagalog"],
            [2.0, 95.0, 4.9],
        ),
        (
            "Jonas Berg",
            "Chief Officer",
            &["STCW", "GMDSS"],
            6.0,
            4.0,
            9,
            &["Tanker"],
            &["English", "Norwegian"],
            [5.5, 70.0, 4.2],
        ),
        (
            "Liu Wei",
            "Chief Officer",
            &["STCW", "GMDSS", "Tanker Endorsement"],
            8.0,
            4.5,
            0,
            &["LNG Carrier", "Tanker"],
            &["English", "Mandarin"],
            [3.0, 88.0, 4.6],
        ),
        (
            "Marta Silva",
            "Second Officer",
            &["STCW", "GMDSS", "Tanker Endorsement"],
            4.0,
            3.8,
            20,
            &["Container Ship"],
            &["English", "Portuguese"],
            [9.0, 62.0, 3.7],
        ),
        (
            "Ivan Petrov",
            "Second Officer",
            &["STCW"],
            3.0,
            3.2,
            49,
            &["Bulk Carrier"],
            &["Russian"],
            [20.0, 30.0, 3.0],
        ),
    ];

    entries
        .into_iter()
        .enumerate()
        .map(
            |(index, (name, rank, certifications, years, rating, offset, vessels, languages, history))| {
                CandidateProfile {
                    id: CandidateId(format!("cm-d{:02}", index + 1)),
                    name: name.to_string(),
                    rank: rank.to_string(),
                    certifications: strings(certifications),
                    experience_years: years,
                    performance_rating: rating,
                    availability_date: joining_date + Duration::days(offset),
                    last_assignment_end: Some(joining_date - Duration::days(90)),
                    vessel_types_experience: strings(vessels),
                    preferred_routes: BTreeSet::new(),
                    languages: strings(languages),
                    response_history: ResponseHistory {
                        average_response_hours: history[0],
                        acceptance_rate: history[1],
                        reliability_score: history[2],
                    },
                }
            },
        )
        .collect()
}

fn strings(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}
