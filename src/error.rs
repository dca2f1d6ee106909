//! Domain error type shared by the entry store, user store, and range helpers.
//!
//! CLI and startup plumbing use `anyhow`; everything the HTTP layer needs to map
//! onto a status code goes through [`DaylogError`].

use thiserror::Error;

use crate::auth::AuthError;
use crate::stats::StatsError;

#[derive(Error, Debug)]
pub enum DaylogError {
    /// A field failed its range or format constraint.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("{entity} not found: {identifier}")]
    NotFound {
        entity: &'static str,
        identifier: String,
    },

    #[error("invalid date '{0}': expected YYYY-MM-DD, today, yesterday, or -N")]
    InvalidDate(String),

    #[error("invalid date range: {0}")]
    InvalidRange(String),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

pub type DaylogResult<T> = Result<T, DaylogError>;

impl DaylogError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            identifier: identifier.into(),
        }
    }
}
