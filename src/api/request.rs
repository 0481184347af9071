//! Request types for the rota engine API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_flexible_date;
use crate::error::EngineResult;

/// Query string carrying an optional `date`.
///
/// The date may be written as `YYYY-MM-DD`, `DD/MM/YYYY` or `D Month YYYY`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    /// The requested date, if any.
    #[serde(default)]
    pub date: Option<String>,
}

impl DateQuery {
    /// Resolves the requested date, falling back to `today` when absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::DateParse`] if the date is present
    /// but unreadable.
    pub fn resolve(&self, today: NaiveDate) -> EngineResult<NaiveDate> {
        match self.date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => parse_flexible_date(text),
            _ => Ok(today),
        }
    }
}
