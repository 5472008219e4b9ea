use std::env;

use tracing::warn;

pub const FONT_VAR: &str = "EXPIRED_ORDERS_FONT";
pub const COLUMN_WIDTH_VAR: &str = "EXPIRED_ORDERS_COLUMN_WIDTH";
pub const SHEET_NAME_VAR: &str = "EXPIRED_ORDERS_SHEET_NAME";
pub const SOURCE_SHEET_VAR: &str = "EXPIRED_ORDERS_SOURCE_SHEET";

const DEFAULT_FONT: &str = "Arial";
const DEFAULT_COLUMN_WIDTH: f64 = 25.0;
const DEFAULT_SHEET_NAME: &str = "Expired Orders";

/// Presentation and input settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub font_name: String,
    pub column_width: f64,
    pub sheet_name: String,
    /// Input sheet to read; the first sheet when `None`.
    pub source_sheet: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            font_name: DEFAULT_FONT.to_string(),
            column_width: DEFAULT_COLUMN_WIDTH,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            source_sheet: None,
        }
    }
}

impl ReportConfig {
    /// Reads the process environment. Call `dotenv()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings through `lookup`, falling back to defaults for
    /// anything missing, blank or malformed.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let column_width = match non_blank(COLUMN_WIDTH_VAR) {
            Some(raw) => match raw.trim().parse::<f64>() {
                Ok(width) if width > 0.0 => width,
                _ => {
                    warn!(value = %raw, "Ignoring invalid {}, using {}", COLUMN_WIDTH_VAR, defaults.column_width);
                    defaults.column_width
                }
            },
            None => defaults.column_width,
        };

        Self {
            font_name: non_blank(FONT_VAR).unwrap_or(defaults.font_name),
            column_width,
            sheet_name: non_blank(SHEET_NAME_VAR).unwrap_or(defaults.sheet_name),
            source_sheet: non_blank(SOURCE_SHEET_VAR),
        }
    }
}
