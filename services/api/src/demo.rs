use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use dealscout::config::AppConfig;
use dealscout::discovery::buyers::{
    BooleanQuery, BuyerDiscoveryService, BuyerKind, ClauseField, ClauseOperator, DiscoveryRequest,
    DiscoveryServiceError, FilterState, KeywordClause, MatchCriterion, NumericRange, ProjectId,
    ScoredBuyer, ScoringConfig, ValidationError,
};
use dealscout::discovery::export::ranked_results_csv;
use dealscout::discovery::reveal::{cancel_pair, RevealSchedule, StagedReveal};
use dealscout::error::AppError;

use crate::infra::{demo_directory, InMemorySavedSearchRepository};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Candidate universe to rank: strategic or financial-sponsor
    #[arg(long, value_parser = parse_kind)]
    pub(crate) kind: Option<BuyerKind>,
    /// Disable a scoring criterion by id (repeatable), e.g. positioning
    #[arg(long = "disable")]
    pub(crate) disabled_criteria: Vec<String>,
    /// Keep only buyers headquartered in this country (repeatable)
    #[arg(long = "country")]
    pub(crate) countries: Vec<String>,
    /// Minimum composite match score, 0-100
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// Minimum annual revenue in USD
    #[arg(long)]
    pub(crate) min_revenue: Option<u64>,
    /// Keyword terms matched against each buyer's offering text
    #[arg(long)]
    pub(crate) keyword: Option<String>,
    /// Write the ranked shortlist to this path as CSV
    #[arg(long)]
    pub(crate) export_csv: Option<PathBuf>,
    /// Print results immediately instead of playing the processing display
    #[arg(long)]
    pub(crate) skip_reveal: bool,
}

fn parse_kind(raw: &str) -> Result<BuyerKind, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strategic" => Ok(BuyerKind::Strategic),
        "financial-sponsor" | "sponsor" => Ok(BuyerKind::FinancialSponsor),
        other => Err(format!(
            "unknown buyer kind '{other}' (expected strategic or financial-sponsor)"
        )),
    }
}

fn scoring_config_from(args: &DemoArgs) -> Result<ScoringConfig, AppError> {
    let mut config = ScoringConfig::default();
    for raw in &args.disabled_criteria {
        let criterion = MatchCriterion::from_id(raw).ok_or_else(|| {
            AppError::from(DiscoveryServiceError::Validation(
                ValidationError::UnknownCriterion(raw.clone()),
            ))
        })?;
        config.set_enabled(criterion, false);
    }
    Ok(config)
}

fn filters_from(args: &DemoArgs) -> FilterState {
    let mut filters = FilterState::default();
    for country in &args.countries {
        filters.hq_countries.insert(country.clone());
    }
    if let Some(min_score) = args.min_score {
        filters.min_match_score = min_score;
    }
    if let Some(min_revenue) = args.min_revenue {
        filters.revenue_range = Some(NumericRange::at_least(min_revenue));
    }
    filters
}

fn query_from(args: &DemoArgs) -> BooleanQuery {
    match &args.keyword {
        Some(text) => BooleanQuery::new(vec![KeywordClause {
            field: ClauseField::Offering,
            operator: ClauseOperator::And,
            text: text.clone(),
        }]),
        None => BooleanQuery::default(),
    }
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (directory, rationales) = demo_directory();
    let repository = Arc::new(InMemorySavedSearchRepository::default());
    let service = BuyerDiscoveryService::new(Arc::new(directory), repository, Arc::new(rationales));

    let request = DiscoveryRequest {
        kind: args.kind.unwrap_or(BuyerKind::Strategic),
        scoring_config: scoring_config_from(&args)?,
        filters: filters_from(&args),
        query: query_from(&args),
    };

    let results = service.discover(&request).map_err(AppError::from)?;

    let results = if args.skip_reveal {
        results
    } else {
        let schedule = RevealSchedule::new(config.reveal.total_duration(), config.reveal.steps);
        let staged = StagedReveal::new(results, schedule);
        let (_cancel_handle, cancel_token) = cancel_pair();
        match staged
            .run(
                |frame| {
                    println!(
                        "processing buyers... step {}/{} ({}%)",
                        frame.step, frame.total_steps, frame.percent
                    );
                },
                cancel_token,
            )
            .await
        {
            Ok(results) => results,
            Err(_) => {
                println!("processing cancelled; no results revealed");
                return Ok(());
            }
        }
    };

    print_shortlist(&results);

    let project = ProjectId("proj-demo".to_string());
    let saved = service
        .save_search(&project, "demo shortlist", &request.scoring_config, &results)
        .map_err(AppError::from)?;
    let reloaded = service
        .load_search_results(&saved.id)
        .map_err(AppError::from)?;
    println!(
        "\nsaved search '{}' as {} and reloaded {} row(s) from the snapshot",
        saved.name,
        saved.id.0,
        reloaded.len()
    );

    if let Some(path) = args.export_csv {
        let csv = ranked_results_csv(&results)
            .map_err(|error| AppError::Io(std::io::Error::new(std::io::ErrorKind::Other, error)))?;
        std::fs::write(&path, csv)?;
        println!("wrote CSV export to {}", path.display());
    }

    Ok(())
}

fn print_shortlist(results: &[ScoredBuyer]) {
    println!("\nranked buyer shortlist ({} candidates)\n", results.len());
    println!(
        "{:<30} {:<18} {:<16} {:>5}  {}",
        "Buyer", "Kind", "HQ", "Score", "Top rationale"
    );
    for scored in results {
        let top_rationale = scored
            .breakdown
            .first()
            .map(|entry| entry.summary.as_str())
            .unwrap_or("-");
        println!(
            "{:<30} {:<18} {:<16} {:>5}  {}",
            scored.buyer.name,
            scored.buyer.kind().label(),
            scored.buyer.headquarters_country,
            scored.composite_score,
            top_rationale
        );
    }
}
