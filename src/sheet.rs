//! Read side of the spreadsheet boundary.
//!
//! The pipeline only needs a row count and the display text of a cell, so
//! anything that can answer those two questions can feed a report.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use crate::error::ReportError;
use crate::filter::EXPIRATION_FORMAT;
use crate::group::{DOB_INDEX, EXPIRE_DATE_INDEX};
use crate::window::EURO_FORMAT;

pub trait SourceSheet {
    /// Number of rows, including the two leading header rows.
    fn row_count(&self) -> usize;

    /// Display text of a cell, empty when the cell does not exist.
    fn cell_text(&self, row: usize, col: usize) -> String;
}

/// First (or named) sheet of a workbook, fully loaded into memory.
pub struct CalamineSheet {
    range: Range<Data>,
}

impl CalamineSheet {
    /// Opens `path` and loads one sheet. The file handle is released before
    /// this returns.
    pub fn open(path: &Path, sheet_name: Option<&str>) -> Result<Self, ReportError> {
        let mut workbook = open_workbook_auto(path).map_err(|source| ReportError::OpenReport {
            path: path.to_path_buf(),
            source,
        })?;

        let name = match sheet_name {
            Some(name) => {
                if !workbook.sheet_names().iter().any(|s| s == name) {
                    return Err(ReportError::SheetNotFound {
                        path: path.to_path_buf(),
                        sheet: name.to_string(),
                    });
                }
                name.to_string()
            }
            None => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| ReportError::NoSheets {
                    path: path.to_path_buf(),
                })?,
        };

        let range = workbook
            .worksheet_range(&name)
            .map_err(|source| ReportError::OpenReport {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(sheet = %name, rows = range.end().map_or(0, |(r, _)| r + 1), "Loaded report sheet");
        Ok(Self { range })
    }
}

impl SourceSheet for CalamineSheet {
    fn row_count(&self) -> usize {
        // calamine ranges start at the first used cell; `end` is absolute.
        self.range.end().map_or(0, |(row, _)| row as usize + 1)
    }

    fn cell_text(&self, row: usize, col: usize) -> String {
        let (Ok(row), Ok(col)) = (u32::try_from(row), u32::try_from(col)) else {
            return String::new();
        };
        self.range
            .get_value((row, col))
            .map(|data| data_text(data, DateShape::for_column(col as usize)))
            .unwrap_or_default()
    }
}

/// Text form a date-typed cell is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateShape {
    /// `DD-MM-YYYY`, as DOB cells are exported.
    Date,
    /// `Mon d yyyy h:mmAM`, as expiration cells are exported.
    Timestamp,
    /// Date at midnight, timestamp otherwise.
    ByTime,
}

impl DateShape {
    pub fn for_column(col: usize) -> Self {
        match col {
            DOB_INDEX => DateShape::Date,
            EXPIRE_DATE_INDEX => DateShape::Timestamp,
            _ => DateShape::ByTime,
        }
    }
}

/// Renders a calamine cell the way a spreadsheet would display it as text.
pub fn data_text(data: &Data, shape: DateShape) -> String {
    match data {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => number_text(*f),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|dt| datetime_text(dt, shape))
            .unwrap_or_default(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        _ => String::new(),
    }
}

fn number_text(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn datetime_text(dt: NaiveDateTime, shape: DateShape) -> String {
    let format = match shape {
        DateShape::Date => EURO_FORMAT,
        DateShape::Timestamp => EXPIRATION_FORMAT,
        DateShape::ByTime if dt.time().num_seconds_from_midnight() == 0 => EURO_FORMAT,
        DateShape::ByTime => EXPIRATION_FORMAT,
    };
    dt.format(format).to_string()
}

/// Row-major grid of cell text, used to feed the pipeline without a file.
#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rows: Vec<Vec<String>>,
}

impl MemorySheet {
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }
}

impl SourceSheet for MemorySheet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell_text(&self, row: usize, col: usize) -> String {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(col))
            .cloned()
            .unwrap_or_default()
    }
}
