use anyhow::{Context, Result};
use clap::{Parser as CliParser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use vn_jobs_insight::analyzer::job_analysis::scoring_base;
use vn_jobs_insight::analyzer::overview::default_params;
use vn_jobs_insight::analyzer::{Analyzer, AnalyzerImpl};
use vn_jobs_insight::config::{AppConfig, load_or_default};
use vn_jobs_insight::forecast::{Forecaster, HttpForecaster, run_forecast};
use vn_jobs_insight::model::JobRecord;
use vn_jobs_insight::parser::{CsvJobParser, Dataset};
use vn_jobs_insight::report;

/// Analytics over Vietnamese online job postings (2024)
#[derive(CliParser, Debug)]
#[command(name = "vn-jobs-insight", version)]
struct Args {
    /// Path to config.json (defaults to ./config.json when present)
    #[arg(short, long)]
    config: Option<String>,

    /// CSV dataset, overrides `dataset_path` from the config
    #[arg(short, long)]
    dataset: Option<String>,

    /// City to keep (repeatable)
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Position level to keep (repeatable)
    #[arg(long = "level")]
    levels: Vec<String>,

    /// Comma-separated field keywords, e.g. "marketing, it"
    #[arg(long)]
    fields: Option<String>,

    /// Match cities exactly instead of by substring
    #[arg(long)]
    exact_city: bool,

    /// Match levels exactly instead of by substring
    #[arg(long)]
    exact_level: bool,

    /// Print JSON instead of text tables
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Counts, top cities and salary distribution
    Overview,
    /// Rank fields by closeness to a target salary and experience
    Hot {
        #[arg(long)]
        target_salary: Option<f64>,
        #[arg(long)]
        target_exp: Option<f64>,
        #[arg(long)]
        top_k: Option<usize>,
        #[arg(long)]
        sigma_salary: Option<f64>,
        #[arg(long)]
        sigma_exp: Option<f64>,
    },
    /// Forecast daily posting volume through the configured service
    Forecast {
        #[arg(long)]
        horizon_days: Option<u32>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for the report
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        error!("Panic occurred: {}", panic_info);
    }));

    let args = Args::parse();
    if let Err(e) = run(args).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = load_or_default(args.config.as_deref()).context("Config load error")?;
    apply_overrides(&mut config, &args);

    let dataset_path = args.dataset.as_deref().unwrap_or(&config.dataset_path);
    let dataset: Dataset = CsvJobParser::new()
        .load(dataset_path)
        .with_context(|| format!("Failed to load dataset {dataset_path}"))?;

    let analyzer = AnalyzerImpl::new();
    let filtered: Vec<&JobRecord> = config.filters.apply(&dataset.records);
    info!(
        "Filters kept {} of {} postings",
        filtered.len(),
        dataset.len()
    );

    let output = match args.command {
        Command::Overview => {
            let overview = analyzer.overview(&dataset.records, &filtered);
            render(args.json, &overview, report::render_overview)?
        }
        Command::Hot {
            target_salary,
            target_exp,
            top_k,
            sigma_salary,
            sigma_exp,
        } => {
            let hot = &mut config.hot_fields;
            hot.target_salary = target_salary.or(hot.target_salary);
            hot.target_exp = target_exp.or(hot.target_exp);
            hot.sigma_salary = sigma_salary.or(hot.sigma_salary);
            hot.sigma_exp = sigma_exp.unwrap_or(hot.sigma_exp);
            hot.top_k = top_k.unwrap_or(hot.top_k);

            let params = default_params(&dataset.records, &config.hot_fields);
            params.validate()?;

            let base = scoring_base(&dataset.records, &filtered);
            let result = analyzer.hot_fields(&base, &params);
            if result.is_empty() {
                warn!("No field accumulated any score");
            }
            if args.json {
                report::to_json(&result)?
            } else {
                report::render_hot_fields(&result, &params)
            }
        }
        Command::Forecast { horizon_days } => {
            let periods = horizon_days.unwrap_or(config.forecast.horizon_days);
            let forecaster = build_forecaster(&config)?;
            let outcome = run_forecast(
                forecaster.as_ref().map(|f| f as &dyn Forecaster),
                &filtered,
                dataset.date_column.as_deref(),
                periods,
            )
            .await;
            render(args.json, &outcome, report::render_forecast)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Command-line filters replace the configured ones when given.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let filters = &mut config.filters;
    if !args.cities.is_empty() {
        filters.cities = args.cities.clone();
    }
    if !args.levels.is_empty() {
        filters.levels = args.levels.clone();
    }
    if let Some(fields) = &args.fields {
        filters.fields_keywords = fields.clone();
    }
    if args.exact_city {
        filters.city_partial = false;
    }
    if args.exact_level {
        filters.level_partial = false;
    }
}

fn build_forecaster(config: &AppConfig) -> Result<Option<HttpForecaster>> {
    match &config.forecast.endpoint {
        Some(endpoint) => Ok(Some(HttpForecaster::new(
            endpoint.clone(),
            config.forecast.timeout_seconds,
        )?)),
        None => Ok(None),
    }
}

fn render<T: serde::Serialize>(json: bool, value: &T, text: fn(&T) -> String) -> Result<String> {
    if json {
        Ok(report::to_json(value)?)
    } else {
        Ok(text(value))
    }
}
