//! Handlers for the console's subcommands, one module per admin page.

pub mod alumni;
pub mod companies;
pub mod courses;
pub mod dashboard;
pub mod discussions;
pub mod enrollments;
pub mod results;

use serde::de::DeserializeOwned;

use prep_console::{AppError, controllers::filter::Choice};

/// Parses a dropdown value given on the command line.
pub fn parse_choice<T: DeserializeOwned>(raw: &str, what: &str) -> Result<Choice<T>, AppError> {
    Choice::parse(raw).ok_or_else(|| AppError::Validation(format!("Unknown {what} '{raw}'")))
}

/// `YYYY-MM-DD HH:MM` or a dash.
pub fn when(at: Option<chrono::DateTime<chrono::Utc>>) -> String {
    at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}
