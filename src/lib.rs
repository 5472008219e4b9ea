//! Filters an exported expired-orders report down to the orders expiring in
//! the month after a run date, regrouped under their practice, and writes the
//! result as a new formatted workbook.

pub mod config;
pub mod error;
pub mod filter;
pub mod group;
pub mod report;
pub mod sheet;
pub mod summary;
pub mod window;
pub mod xlsx;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::window::DISPLAY_FORMAT;

pub use config::ReportConfig;
pub use error::ReportError;
pub use group::{GroupedRows, extract_groups};
pub use report::{LayoutSummary, format_dob, write_report};
pub use sheet::{CalamineSheet, MemorySheet, SourceSheet};
pub use window::{DateWindow, parse_run_date};

/// Everything one invocation needs.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub run_date: NaiveDate,
    pub report_path: PathBuf,
    pub target_dir: PathBuf,
}

#[derive(Debug)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub window: DateWindow,
    pub groups: GroupedRows,
    pub layout: LayoutSummary,
}

/// Reads the report, filters and regroups it, and saves the new workbook.
pub fn run(request: &RunRequest, config: &ReportConfig) -> Result<RunOutcome, ReportError> {
    let window = DateWindow::following_month(request.run_date)?;
    info!(
        "Formatting {} for run date: {}",
        request.report_path.display(),
        request.run_date.format(DISPLAY_FORMAT)
    );

    let sheet = CalamineSheet::open(&request.report_path, config.source_sheet.as_deref())?;
    let output_path = resolve_output_path(&request.target_dir, &window)?;

    let header = group::read_header(&sheet);
    let groups = extract_groups(&sheet, &window);

    let mut sink = xlsx::XlsxReportSink::new(config)?;
    let layout = write_report(&mut sink, &header, &groups, config.column_width)?;
    sink.save(&output_path)?;
    info!(
        rows = layout.rows_written,
        practices = layout.groups_written,
        orders = layout.orders_written,
        "Formatted Excel file saved to {}",
        output_path.display()
    );

    Ok(RunOutcome {
        output_path,
        window,
        groups,
        layout,
    })
}

fn resolve_output_path(target_dir: &Path, window: &DateWindow) -> Result<PathBuf, ReportError> {
    if !target_dir.is_dir() {
        return Err(ReportError::TargetDirectory(target_dir.to_path_buf()));
    }
    Ok(target_dir.join(window.output_file_name()))
}
