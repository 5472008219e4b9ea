use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort a whole run. Per-cell problems never end up here.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("invalid run date '{input}', expected DD-MM-YYYY")]
    InvalidRunDate {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("run date {0} has no following calendar month")]
    RunDateOutOfRange(chrono::NaiveDate),

    #[error("could not open report {}", path.display())]
    OpenReport {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("report {} contains no sheets", path.display())]
    NoSheets { path: PathBuf },

    #[error("sheet '{sheet}' not found in report {}", path.display())]
    SheetNotFound { path: PathBuf, sheet: String },

    #[error("target directory {} does not exist or is not a directory", .0.display())]
    TargetDirectory(PathBuf),

    #[error("failed to build output workbook")]
    Write(#[from] rust_xlsxwriter::XlsxError),
}
