use chrono::{Datelike, NaiveDate, NaiveDateTime};

use crate::error::ReportError;

/// Day-first date format used for the run date and for DOB cells.
pub const EURO_FORMAT: &str = "%d-%m-%Y";
/// Display format for dates in logs and output cells, e.g. `Mar 05, 1980`.
pub const DISPLAY_FORMAT: &str = "%b %d, %Y";

/// Parses a `DD-MM-YYYY` run date.
pub fn parse_run_date(input: &str) -> Result<NaiveDate, ReportError> {
    NaiveDate::parse_from_str(input.trim(), EURO_FORMAT).map_err(|source| {
        ReportError::InvalidRunDate {
            input: input.to_string(),
            source,
        }
    })
}

/// Half-open interval `[start, end)` covering one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateWindow {
    /// Window for the calendar month after `run_date`'s month.
    pub fn following_month(run_date: NaiveDate) -> Result<Self, ReportError> {
        let start = first_of_next_month(run_date).ok_or(ReportError::RunDateOutOfRange(run_date))?;
        let end = first_of_next_month(start).ok_or(ReportError::RunDateOutOfRange(run_date))?;
        Ok(Self {
            start: start.and_time(chrono::NaiveTime::MIN),
            end: end.and_time(chrono::NaiveTime::MIN),
        })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Both bounds are exclusive: an instant equal to `start` is outside too.
    pub fn contains_exclusive(&self, instant: NaiveDateTime) -> bool {
        instant > self.start && instant < self.end
    }

    /// `ExpiredOrders_DECEMBER_2018.xlsx` style name for the window's month.
    pub fn output_file_name(&self) -> String {
        format!(
            "ExpiredOrders_{}_{}.xlsx",
            self.start.format("%B").to_string().to_uppercase(),
            self.start.year()
        )
    }
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year().checked_add(1)?, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}
