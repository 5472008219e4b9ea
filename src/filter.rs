use chrono::NaiveDateTime;
use thiserror::Error;
use tracing::debug;

use crate::window::DateWindow;

/// Expiration timestamps look like `Dec 15 2018 10:30AM`.
pub const EXPIRATION_FORMAT: &str = "%b %d %Y %I:%M%p";

/// How a row's expiration cell relates to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryCheck {
    Missing,
    Unparseable,
    Inside(NaiveDateTime),
    Outside(NaiveDateTime),
}

impl ExpiryCheck {
    /// Missing and unparseable expirations are kept.
    pub fn keep(self) -> bool {
        !matches!(self, ExpiryCheck::Outside(_))
    }
}

/// Collapses runs of whitespace so column-aligned exports still parse.
pub fn normalize_expiration(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Error)]
pub enum ExpirationError {
    #[error(transparent)]
    Format(#[from] chrono::ParseError),
    /// Month must be written `Dec`, meridiem `AM`/`PM`.
    #[error("month or meridiem is not in export case: '{0}'")]
    Case(String),
}

pub fn parse_expiration(text: &str) -> Result<NaiveDateTime, ExpirationError> {
    let normalized = normalize_expiration(text);
    let parsed = NaiveDateTime::parse_from_str(&normalized, EXPIRATION_FORMAT)?;
    let month = parsed.format("%b").to_string();
    let meridiem = parsed.format("%p").to_string();
    if !normalized.starts_with(&month) || !normalized.ends_with(&meridiem) {
        return Err(ExpirationError::Case(normalized));
    }
    Ok(parsed)
}

pub fn check_expiration(text: Option<&str>, window: &DateWindow) -> ExpiryCheck {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return ExpiryCheck::Missing,
    };
    match parse_expiration(text) {
        Ok(expires) if window.contains_exclusive(expires) => ExpiryCheck::Inside(expires),
        Ok(expires) => ExpiryCheck::Outside(expires),
        Err(err) => {
            debug!(value = text, error = %err, "Ignoring date parsing error");
            ExpiryCheck::Unparseable
        }
    }
}

/// True when the row belongs in the report for `window`.
pub fn should_keep(text: Option<&str>, window: &DateWindow) -> bool {
    check_expiration(text, window).keep()
}
