use clap::{Parser, Subcommand};
use gearcase_algo::config::{LoggingSettings, Settings, SettingsError};
use gearcase_algo::core::{simulate_match, CompatibilityEngine, RankOptions};
use gearcase_algo::models::{GearCaseMatch, RankRequest, RankResponse, ScoreRequest};
use gearcase_algo::services::{Catalog, CatalogError};
use gearcase_algo::ValidationError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use validator::Validate;

/// Score and rank protective cases for audio gear
#[derive(Debug, Parser)]
#[command(name = "gearcase-algo", version, about)]
struct Cli {
    /// Settings file (defaults to config/default.toml + config/local.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rank every catalog case for one gear item
    Rank {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        gear: String,
        /// Named weight profile from the settings
        #[arg(long)]
        profile: Option<String>,
        #[arg(long)]
        limit: Option<usize>,
        /// Keep zero-score candidates in the output
        #[arg(long)]
        include_infeasible: bool,
    },
    /// Score a single gear/case pair
    Score {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        gear: String,
        #[arg(long = "case")]
        case_id: String,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Emit jittered match records for every feasible pair (seed data)
    Simulate {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("invalid request: {0}")]
    Request(#[from] validator::ValidationErrors),

    #[error("failed to write output: {0}")]
    Output(#[from] serde_json::Error),
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let settings = match settings {
        Ok(settings) => {
            init_tracing(&settings.logging);
            settings
        }
        Err(e) => {
            init_tracing(&LoggingSettings::default());
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match run(cli.command, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays valid JSON
fn init_tracing(logging: &LoggingSettings) {
    let level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| logging.level.clone());
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| logging.format.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    match format.as_str() {
        "json" => subscriber.json().init(),
        "pretty" => subscriber.pretty().init(),
        _ => subscriber.compact().init(),
    }
}

fn run(command: Command, settings: &Settings) -> Result<(), AppError> {
    match command {
        Command::Rank { catalog, gear, profile, limit, include_infeasible } => {
            let request = RankRequest {
                gear_id: gear,
                limit,
                include_infeasible,
                profile,
            };
            request.validate()?;
            rank(&catalog, &request, settings)
        }
        Command::Score { catalog, gear, case_id, profile } => {
            let request = ScoreRequest {
                gear_id: gear,
                case_id,
                profile,
            };
            request.validate()?;
            score(&catalog, &request, settings)
        }
        Command::Simulate { catalog, seed, profile } => simulate(&catalog, seed, profile.as_deref(), settings),
    }
}

fn rank(catalog_path: &Path, request: &RankRequest, settings: &Settings) -> Result<(), AppError> {
    let engine = CompatibilityEngine::new(settings.engine_config(request.profile.as_deref())?);
    let catalog = Catalog::load(catalog_path)?;
    let gear = catalog.gear(&request.gear_id)?;

    info!("Ranking {} cases for gear {}", catalog.cases.len(), gear.id);

    let ranked = engine.rank_candidates(gear, &catalog.cases, &request.options())?;

    // Cases dropped at load time still count as candidates
    let mut rejected: Vec<ValidationError> = catalog.rejected_cases().cloned().collect();
    let total_candidates = ranked.total_candidates + rejected.len();
    rejected.extend(ranked.rejected);

    if !rejected.is_empty() {
        warn!("{} candidate cases were excluded as invalid", rejected.len());
    }

    let response = RankResponse {
        gear_id: gear.id.clone(),
        matches: ranked.matches,
        rejected,
        total_candidates,
    };

    info!(
        "Returning {} matches for gear {} (from {} candidates)",
        response.matches.len(),
        response.gear_id,
        response.total_candidates
    );

    print_json(&response)
}

fn score(catalog_path: &Path, request: &ScoreRequest, settings: &Settings) -> Result<(), AppError> {
    let engine = CompatibilityEngine::new(settings.engine_config(request.profile.as_deref())?);
    let catalog = Catalog::load(catalog_path)?;
    let gear = catalog.gear(&request.gear_id)?;
    let case = catalog.case(&request.case_id)?;

    let result = engine.score_match(gear, case)?;
    print_json(&result)
}

fn simulate(
    catalog_path: &Path,
    seed: Option<u64>,
    profile: Option<&str>,
    settings: &Settings,
) -> Result<(), AppError> {
    let engine = CompatibilityEngine::new(settings.engine_config(profile)?);
    let catalog = Catalog::load(catalog_path)?;
    for err in &catalog.rejected {
        warn!("Skipping {}", err);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut records: Vec<GearCaseMatch> = Vec::new();
    for gear in &catalog.gear {
        match engine.rank_candidates(gear, &catalog.cases, &RankOptions::default()) {
            Ok(ranked) => records.extend(ranked.matches.iter().map(|m| simulate_match(m, &mut rng))),
            Err(e) => warn!("Skipping gear {}: {}", gear.id, e),
        }
    }

    info!("Generated {} synthetic match records", records.len());

    print_json(&records)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
