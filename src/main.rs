use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use beat_planner::catalog::OutletCatalog;
use beat_planner::config::PlannerConfig;
use beat_planner::error::InputError;
use beat_planner::planner::{self, Narrative, NoRouteReason, PlanRequest, RoutePlan};
use beat_planner::polyline::{Polyline, RouteMarker};
use beat_planner::report::render_route_text;
use beat_planner::textgen::GenerativeClient;
use beat_planner::traits::ReportFormatter;

const EXIT_INPUT_ERROR: u8 = 2;
const EXIT_NO_ROUTE: u8 = 3;

#[derive(Parser, Debug)]
#[command(
    name = "beat-planner",
    about = "Plan a field agent's single-day outlet visiting route for a market and dealer"
)]
struct Cli {
    /// Outlet CSV export (market, distributor, outlet name, coordinates, last visit)
    #[arg(short, long)]
    outlets: PathBuf,

    /// Optional planner configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Market to plan for
    #[arg(long, requires = "dealer", conflicts_with = "batch")]
    market: Option<String>,

    /// Dealer/distributor to plan for
    #[arg(long, requires = "market", conflicts_with = "batch")]
    dealer: Option<String>,

    /// CSV of `market,dealer` pairs to plan in parallel
    #[arg(long, required_unless_present = "market")]
    batch: Option<PathBuf>,

    /// Print JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Ask the text service for a narrative report
    #[arg(long)]
    narrative: bool,
}

#[derive(Debug, Deserialize)]
struct BatchRow {
    market: String,
    dealer: String,
}

#[derive(Serialize)]
struct PlanOutput<'p, 'a> {
    plan: &'p RoutePlan<'a>,
    route_points: Polyline,
    markers: Vec<RouteMarker>,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    narrative: Option<Narrative>,
}

#[derive(Serialize)]
struct NoRouteOutput<'r> {
    market: &'r str,
    dealer: &'r str,
    error: &'static str,
    reason: NoRouteReason,
}

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PlannerConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => PlannerConfig::default(),
    };

    let catalog = OutletCatalog::from_csv_path(&cli.outlets)
        .with_context(|| format!("Failed to load outlets: {}", cli.outlets.display()))?;

    let formatter = if cli.narrative {
        Some(
            GenerativeClient::from_env(config.text_service.clone())
                .context("Failed to set up the text service client")?,
        )
    } else {
        None
    };
    let formatter = formatter.as_ref().map(|client| client as &dyn ReportFormatter);

    let requests = match &cli.batch {
        Some(path) => read_batch(path)?,
        None => {
            let market = cli.market.as_deref().unwrap_or_default();
            let dealer = cli.dealer.as_deref().unwrap_or_default();
            vec![PlanRequest::new(market, dealer)]
        }
    };

    let mut exit_code = 0u8;
    let valid = requests
        .iter()
        .filter_map(|request| match request {
            Ok(request) => Some(request.clone()),
            Err(err) => {
                eprintln!("error: {err}");
                exit_code = EXIT_INPUT_ERROR;
                None
            }
        })
        .collect::<Vec<_>>();

    let results = planner::plan_many(&catalog, &valid, &config.route);
    for (request, result) in valid.iter().zip(results) {
        match result {
            Ok(plan) => print_plan(&plan, formatter, cli.json)?,
            Err(reason) => {
                print_no_route(request, reason, cli.json)?;
                if exit_code == 0 {
                    exit_code = EXIT_NO_ROUTE;
                }
            }
        }
    }

    Ok(ExitCode::from(exit_code))
}

fn read_batch(path: &Path) -> Result<Vec<Result<PlanRequest, InputError>>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("Failed to open batch file: {}", path.display()))?;

    let mut requests = Vec::new();
    for row in reader.deserialize::<BatchRow>() {
        let row = row.with_context(|| format!("Malformed batch row in {}", path.display()))?;
        requests.push(PlanRequest::new(&row.market, &row.dealer));
    }
    Ok(requests)
}

fn print_plan(plan: &RoutePlan<'_>, formatter: Option<&dyn ReportFormatter>, json: bool) -> Result<()> {
    let text = render_route_text(plan);
    let narrative = formatter.map(|formatter| planner::narrate(plan, formatter));

    if json {
        let output = PlanOutput {
            plan,
            route_points: plan.polyline(),
            markers: plan.markers(),
            text,
            narrative,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match narrative {
            Some(Narrative::Generated { text: report }) => println!("{report}"),
            Some(failed) => {
                println!("{}\n", failed.text());
                println!("{text}");
            }
            None => println!("{text}"),
        }
    }
    Ok(())
}

fn print_no_route(request: &PlanRequest, reason: NoRouteReason, json: bool) -> Result<()> {
    if json {
        let output = NoRouteOutput {
            market: request.market(),
            dealer: request.dealer(),
            error: "No route could be generated",
            reason,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "No route could be generated for market '{}' and dealer '{}': {reason}",
            request.market(),
            request.dealer()
        );
    }
    Ok(())
}
