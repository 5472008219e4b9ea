//! Lays out grouped orders as a table: heading row, then for every practice
//! with surviving orders a label row followed by its orders.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::ReportError;
use crate::group::{COLUMN_COUNT, DOB_INDEX, GroupedRows, SourceRow};
use crate::window::{DISPLAY_FORMAT, EURO_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Header,
    Body,
}

/// Write side of the spreadsheet boundary.
pub trait ReportSink {
    fn write_cell(
        &mut self,
        row: u32,
        col: u16,
        text: &str,
        style: CellStyle,
    ) -> Result<(), ReportError>;

    fn set_column_width(&mut self, col: u16, width: f64) -> Result<(), ReportError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutSummary {
    /// Physical rows emitted, heading included.
    pub rows_written: u32,
    pub groups_written: usize,
    pub orders_written: usize,
}

/// `05-03-1980` becomes `Mar 05, 1980`. Blank or malformed input yields `None`.
pub fn parse_dob(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, EURO_FORMAT) {
        Ok(date) => Some(date.format(DISPLAY_FORMAT).to_string()),
        Err(err) => {
            debug!(value = trimmed, error = %err, "Ignoring unparseable DOB");
            None
        }
    }
}

pub fn format_dob(raw: &str) -> String {
    parse_dob(raw).unwrap_or_default()
}

pub fn write_report<W: ReportSink + ?Sized>(
    sink: &mut W,
    header: &SourceRow,
    groups: &GroupedRows,
    column_width: f64,
) -> Result<LayoutSummary, ReportError> {
    let mut summary = LayoutSummary::default();

    for (col, heading) in (0u16..).zip(header.cells()) {
        sink.write_cell(0, col, heading, CellStyle::Header)?;
        sink.set_column_width(col, column_width)?;
    }
    let mut row: u32 = 1;

    for group in groups.non_empty() {
        sink.write_cell(row, 0, &group.name, CellStyle::Body)?;
        for col in 1..COLUMN_COUNT as u16 {
            sink.write_cell(row, col, "", CellStyle::Body)?;
        }
        row += 1;

        for order in &group.rows {
            for (col, value) in order.cells().iter().enumerate() {
                let text = if col == DOB_INDEX {
                    format_dob(order.dob())
                } else {
                    value.clone()
                };
                sink.write_cell(row, col as u16, &text, CellStyle::Body)?;
            }
            row += 1;
        }

        summary.groups_written += 1;
        summary.orders_written += group.rows.len();
    }

    summary.rows_written = row;
    Ok(summary)
}
