use clap::Parser;
use dotenv::dotenv;
use std::{path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use expired_orders::{ReportConfig, ReportError, RunOutcome, RunRequest, parse_run_date, run};
use expired_orders::summary::summary_table;

// --- CLI Structure ---
#[derive(Parser)]
#[command(name = "expired_orders")]
#[command(
    about = "Keep the expired orders due next month, grouped per practice",
    long_about = "Takes an expired orders report and keeps only the orders expiring in the \
                  month after RUN_DATE. The result is written to \
                  TARGET_DIR/ExpiredOrders_<MONTH>_<YEAR>.xlsx.\n\n\
                  Example: expired_orders 18-11-2018 ./CareReport.xls ./reports"
)]
struct Cli {
    /// Run date in DD-MM-YYYY format
    run_date: String,
    /// Path to the exported report (xls, xlsx, xlsb or ods)
    report: PathBuf,
    /// Directory the formatted workbook is written to
    target_dir: PathBuf,
    /// Exit with status 1 when the run fails (default is always 0)
    #[arg(long)]
    fail_on_error: bool,
    /// Do not print the per-practice summary table
    #[arg(long)]
    no_summary: bool,
}

fn main() -> ExitCode {
    dotenv().ok(); // Reads the .env file
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = ReportConfig::from_env();

    match execute(&cli, &config) {
        Ok(outcome) => {
            if !cli.no_summary {
                println!(
                    "\nExpired orders for {}: {}",
                    outcome.window.start().format("%B %Y"),
                    outcome.output_path.display()
                );
                summary_table(&outcome.groups).printstd();
            }
            info!("Formatting complete.");
            ExitCode::from(exit_status(false, cli.fail_on_error))
        }
        Err(err) => {
            error!(error = %err, cause = ?std::error::Error::source(&err), "Error running the expired orders formatter.");
            ExitCode::from(exit_status(true, cli.fail_on_error))
        }
    }
}

fn execute(cli: &Cli, config: &ReportConfig) -> Result<RunOutcome, ReportError> {
    let request = RunRequest {
        run_date: parse_run_date(&cli.run_date)?,
        report_path: cli.report.clone(),
        target_dir: cli.target_dir.clone(),
    };
    run(&request, config)
}

/// Status stays 0 on failure unless `--fail-on-error` is given.
fn exit_status(failed: bool, fail_on_error: bool) -> u8 {
    if failed && fail_on_error { 1 } else { 0 }
}
