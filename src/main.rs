//! CLI entry point for the delay-intelligence tool.
//!
//! Provides subcommands for scoring traffic observations, managing crowd
//! reports and their votes, and requesting alternative routes around a delay.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use delay_intel::advisory::{Coordinate, RouteAdvisor};
use delay_intel::config::AppConfig;
use delay_intel::infra::gemini::GeminiClient;
use delay_intel::infra::nominatim::NominatimClient;
use delay_intel::infra::store::JsonFileReportStore;
use delay_intel::output::{append_records, load_observations, print_json, print_pretty};
use delay_intel::reports::{NewReport, ReportService, Severity, VoteDirection};
use delay_intel::scoring::{Predictor, ScoringEngine, TrafficObservation};
use delay_intel::services::display_area;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "delay_intel")]
#[command(about = "Transit delay prediction, crowd reports and route advisories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a single traffic observation
    Predict {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Delay category, e.g. "minor delay", "delay", "congestion"
        #[arg(short, long, default_value = "delay")]
        category: String,

        /// Severity level, nominally 0-5
        #[arg(short, long, allow_negative_numbers = true)]
        severity: i32,

        /// Weather label, e.g. "clear", "rain", "snow"
        #[arg(short, long, default_value = "clear")]
        weather: String,

        /// Seed the engine weights for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Score every observation in a CSV file
    Batch {
        /// CSV with columns latitude,longitude,category,severity_level,weather
        #[arg(value_name = "INPUT_CSV")]
        input: PathBuf,

        /// CSV file to append predictions to
        #[arg(short, long, default_value = "predictions.csv")]
        output: PathBuf,

        #[arg(long)]
        seed: Option<u64>,

        /// Score observations on parallel blocking tasks
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Manage crowd-sourced delay reports
    Report {
        /// Acting user id (defaults to DELAY_USER_ID)
        #[arg(short, long, global = true)]
        user: Option<String>,

        #[command(subcommand)]
        action: ReportAction,
    },
    /// Ask the text-generation service for routes around a delay
    Advise {
        /// Delay location as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        delay: Coordinate,

        /// Starting point as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        from: Coordinate,

        /// Destination as LAT,LON
        #[arg(long, allow_hyphen_values = true)]
        to: Coordinate,
    },
}

#[derive(Subcommand)]
enum ReportAction {
    /// Submit a new report
    Submit {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// What is wrong
        #[arg(short, long)]
        problem: String,

        /// Low, Medium or High
        #[arg(short, long)]
        severity: Severity,

        /// Reference to an uploaded image
        #[arg(long)]
        image: Option<String>,
    },
    /// Vote a report up or down
    Vote {
        id: String,

        /// "up" or "down"
        direction: VoteDirection,
    },
    /// Withdraw your vote from a report
    Retract { id: String },
    /// Delete a report you submitted
    Delete { id: String },
    /// List reports, newest first
    List {
        /// Resolve area names through the reverse geocoder
        #[arg(long, default_value_t = false)]
        areas: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = AppConfig::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("delay_intel.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Predict {
            lat,
            lon,
            category,
            severity,
            weather,
            seed,
        } => {
            let predictor = Predictor::new(engine(seed));
            let obs = TrafficObservation::new(lat, lon, category, severity, weather);
            if !(0..=5).contains(&obs.severity_level) {
                warn!(severity = obs.severity_level, "Severity outside 0-5 is scored unclamped");
            }

            let prediction = predictor.predict(&obs);
            print_pretty(&prediction);
            print_json(&prediction)?;
        }
        Commands::Batch {
            input,
            output,
            seed,
            parallel,
        } => {
            let observations = load_observations(&input)
                .with_context(|| format!("Failed to read observations from {}", input.display()))?;
            info!(count = observations.len(), "Observations loaded");

            let predictor = Predictor::new(engine(seed));
            let predictions = if parallel {
                predictor.predict_batch_parallel(observations).await?
            } else {
                predictor.predict_batch(&observations)
            };

            append_records(&output, &predictions)?;
            info!(count = predictions.len(), output = %output.display(), "Predictions written");
        }
        Commands::Report { user, action } => {
            let user = user.or_else(|| config.user_id.clone());
            run_report(&config, user.as_deref(), action).await?;
        }
        Commands::Advise { delay, from, to } => {
            advise(&config, delay, from, to).await?;
        }
    }

    Ok(())
}

fn engine(seed: Option<u64>) -> ScoringEngine {
    match seed {
        Some(seed) => {
            info!(seed, "Using seeded engine weights");
            ScoringEngine::seeded(seed)
        }
        None => ScoringEngine::new(),
    }
}

/// Runs one report action against the JSON file store.
#[tracing::instrument(skip(config, action), fields(store = %config.reports_path.display()))]
async fn run_report(config: &AppConfig, user: Option<&str>, action: ReportAction) -> Result<()> {
    let service = ReportService::new(JsonFileReportStore::new(&config.reports_path));

    match action {
        ReportAction::Submit {
            lat,
            lon,
            problem,
            severity,
            image,
        } => {
            let report = service
                .submit(
                    user,
                    NewReport {
                        latitude: lat,
                        longitude: lon,
                        problem,
                        severity,
                        image_url: image,
                    },
                )
                .await?;
            println!("{}", report.id);
        }
        ReportAction::Vote { id, direction } => {
            let report = service.vote(user, &id, direction).await?;
            println!(
                "{}% accurate (+{}/-{})",
                report.accuracy(),
                report.upvotes,
                report.downvotes
            );
        }
        ReportAction::Retract { id } => {
            let report = service.retract(user, &id).await?;
            println!(
                "{}% accurate (+{}/-{})",
                report.accuracy(),
                report.upvotes,
                report.downvotes
            );
        }
        ReportAction::Delete { id } => {
            service.delete(user, &id).await?;
        }
        ReportAction::List { areas } => {
            let geocoder = if areas {
                Some(NominatimClient::new(&config.geocoder_base_url)?)
            } else {
                None
            };

            for (report, accuracy) in service.list_with_accuracy().await? {
                let area = match &geocoder {
                    Some(g) => display_area(g, report.latitude, report.longitude).await,
                    None => format!("({:.4}, {:.4})", report.latitude, report.longitude),
                };
                println!(
                    "{}\t{}\t{}%\t+{}/-{}\t{}\t{}",
                    report.id,
                    report.severity,
                    accuracy,
                    report.upvotes,
                    report.downvotes,
                    area,
                    report.problem
                );
            }
        }
    }

    Ok(())
}

/// Requests alternative routes, bounded by the configured timeout and
/// abandoned on Ctrl+C.
async fn advise(config: &AppConfig, delay: Coordinate, from: Coordinate, to: Coordinate) -> Result<()> {
    let client = GeminiClient::new(
        config.require_gemini_api_key()?,
        &config.gemini_base_url,
        &config.gemini_model,
    )?;
    let advisor = RouteAdvisor::new(client);

    tokio::select! {
        outcome = tokio::time::timeout(config.advisory_timeout, advisor.advise(delay, from, to)) => {
            match outcome {
                Ok(result) => println!("{}", result?),
                Err(_) => anyhow::bail!(
                    "Route advisory timed out after {}s",
                    config.advisory_timeout.as_secs()
                ),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Route advisory cancelled");
            anyhow::bail!("Route advisory cancelled");
        }
    }

    Ok(())
}
