//! CLI entry point for the transit sanity checker.
//!
//! Provides subcommands for running all sanity checks over a system dump
//! (JSON report plus optional CSV summary) and for listing the available
//! checks.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use transit_sanity::{
    checks::aggregate::run_system,
    checks::check::{CheckKind, CheckOutcome},
    loader::load_system,
    output::{append_summary, print_json, write_json},
};

#[derive(Parser)]
#[command(name = "transit_sanity")]
#[command(about = "Sanity checks for community-mapped transit data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run sanity checks over a transit system JSON dump
    Check {
        /// Path to the system JSON file
        #[arg(value_name = "SYSTEM_JSON")]
        dataset: String,

        /// Write the full JSON report to this file instead of logging it
        #[arg(short, long)]
        report: Option<String>,

        /// CSV file to append per-route summary rows to
        #[arg(long)]
        csv: Option<String>,

        /// Run only the named check (see `list-checks`)
        #[arg(short, long)]
        check: Option<String>,
    },
    /// List available checks by name
    ListChecks,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transit_sanity.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transit_sanity.log"));

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
        Commands::Check {
            dataset,
            report,
            csv,
            check,
        } => match check {
            Some(name) => run_single_check(&dataset, &name)?,
            None => run_all_checks(&dataset, report.as_deref(), csv.as_deref())?,
        },
        Commands::ListChecks => {
            for check in CheckKind::ALL {
                let scope = if check.needs_system() {
                    "route+system"
                } else {
                    "route"
                };
                info!(name = check.name(), scope, "Check");
            }
        }
    }

    Ok(())
}

#[tracing::instrument(skip(report_path, csv_path), fields(dataset))]
fn run_all_checks(dataset: &str, report_path: Option<&str>, csv_path: Option<&str>) -> Result<()> {
    let system = load_system(dataset)?;
    let report = run_system(&system);

    let flagged_routes = report
        .routes
        .iter()
        .filter(|r| r.finding_count() > 0)
        .count();

    info!(
        routes = report.route_count,
        flagged_routes,
        total_findings = report.total_findings,
        "Check run complete"
    );

    match report_path {
        Some(path) => {
            write_json(path, &report)?;
            info!(path, "Report written");
        }
        None => print_json(&report)?,
    }

    if let Some(path) = csv_path {
        append_summary(path, &report)?;
        info!(path, "Summary appended");
    }

    Ok(())
}

#[tracing::instrument(fields(dataset, check = name))]
fn run_single_check(dataset: &str, name: &str) -> Result<()> {
    let Some(check) = CheckKind::from_name(name) else {
        bail!(
            "unknown check {name:?}; available: {}",
            CheckKind::ALL.map(CheckKind::name).join(", ")
        );
    };

    let system = load_system(dataset)?;

    let results: HashMap<&str, CheckOutcome> = system
        .routes
        .iter()
        .map(|route| (route.id.as_str(), check.run(route, &system)))
        .collect();

    let total: usize = results.values().map(CheckOutcome::finding_count).sum();
    info!(check = check.name(), total_findings = total, "Check complete");
    info!("{}", serde_json::to_string_pretty(&results)?);

    Ok(())
}
