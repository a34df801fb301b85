//! route-planner - plan one technician's day from a JSON request
//!
//! Reads an `OptimizeRequest` (file or stdin), writes the `OptimizeResponse`
//! to stdout. Logs go to stderr.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use route_planner::config::{PlannerConfig, build_estimator};
use route_planner::{OptimizeRequest, optimize_route};

#[derive(Debug, Parser)]
#[command(name = "route-planner", about = "Plan a field-service route")]
struct Args {
    /// Request JSON file; reads stdin when omitted
    input: Option<PathBuf>,

    /// Pretty-print the response
    #[arg(long)]
    pretty: bool,
}

fn read_request(input: Option<&PathBuf>) -> Result<OptimizeRequest> {
    let raw = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    serde_json::from_str(&raw).context("request is not a valid OptimizeRequest")
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,route_planner=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = PlannerConfig::from_env().context("failed to load configuration")?;
    let estimator = build_estimator(&config)?;

    let request = read_request(args.input.as_ref())?;
    info!(stops = request.stops.len(), "optimizing route");

    let response = optimize_route(&request, &estimator)?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{out}");

    Ok(())
}
