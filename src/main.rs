use std::path::PathBuf;
use std::sync::Arc;

use bodyshop_ledger::config::AppConfig;
use bodyshop_ledger::error::AppError;
use bodyshop_ledger::telemetry;
use bodyshop_ledger::workflows::jobs::{
    compute_estimate_totals, summarize_receivables, EstimateLine, JobFinancials, JobSnapshot,
    MemoryJobRepository, ReconcileService, ShopPolicy,
};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Body Shop Ledger",
    about = "Price estimates and reconcile job financials from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price an estimate line file against the shop rate configuration
    Estimate(EstimateArgs),
    /// Run the reconciliation workflow over a job snapshot
    Reconcile(ReconcileArgs),
    /// Aggregate receivables KPIs over a jobs file
    Kpis(KpisArgs),
}

#[derive(Args, Debug)]
struct EstimateArgs {
    /// JSON file containing an array of estimate lines
    #[arg(long)]
    lines: PathBuf,
    /// Shop policy JSON overriding the built-in defaults
    #[arg(long)]
    policy: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReconcileArgs {
    /// JSON file containing a job snapshot
    #[arg(long)]
    job: PathBuf,
    /// Shop policy JSON overriding the built-in defaults
    #[arg(long)]
    policy: Option<PathBuf>,
    /// Reconciliation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
struct KpisArgs {
    /// JSON file containing an array of per-job financials
    #[arg(long)]
    jobs: PathBuf,
    /// Evaluation date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    today: Option<NaiveDate>,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| format!("invalid date '{value}': {err}"))
}

fn load_policy(config: &AppConfig, explicit: Option<&PathBuf>) -> Result<ShopPolicy, AppError> {
    let path = explicit
        .map(|path| path.to_string_lossy().into_owned())
        .or_else(|| config.policy_path.clone());

    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)?;
            let policy = ShopPolicy::from_json(&raw)?;
            info!(%path, "loaded shop policy");
            Ok(policy)
        }
        None => Ok(ShopPolicy::default()),
    }
}

fn main() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let cli = Cli::parse();
    let today = Local::now().date_naive();

    match cli.command {
        Command::Estimate(args) => {
            let policy = load_policy(&config, args.policy.as_ref())?;
            let raw = std::fs::read_to_string(&args.lines)?;
            let lines: Vec<EstimateLine> = serde_json::from_str(&raw)?;
            let totals = compute_estimate_totals(&lines, &policy.rates);
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        Command::Reconcile(args) => {
            let policy = load_policy(&config, args.policy.as_ref())?;
            let raw = std::fs::read_to_string(&args.job)?;
            let snapshot: JobSnapshot = serde_json::from_str(&raw)?;
            let job_id = snapshot.id.clone();

            let repository = Arc::new(MemoryJobRepository::new());
            repository.set_policy(policy);
            repository.insert_job(snapshot);

            let service = ReconcileService::new(repository.clone());
            let outcome = service.reconcile(&job_id, args.today.unwrap_or(today))?;

            let report = json!({
                "outcome": outcome,
                "storage_accrual": repository.storage_accrual(&job_id),
                "lien_case": repository.lien_case(&job_id),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Kpis(args) => {
            let raw = std::fs::read_to_string(&args.jobs)?;
            let jobs: Vec<JobFinancials> = serde_json::from_str(&raw)?;
            let kpis = summarize_receivables(&jobs, args.today.unwrap_or(today));
            println!("{}", serde_json::to_string_pretty(&kpis)?);
        }
    }

    Ok(())
}
