use chrono::NaiveDate;

use crate::id::HeroId;

/// Validation errors produced while checking payloads and pagination.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A field required on creation was not supplied.
    #[error("field '{field}' is required")]
    MissingField { field: &'static str },

    /// A text field was supplied but contains only whitespace.
    #[error("field '{field}' must not be blank")]
    BlankField { field: &'static str },

    /// The death date precedes the birth date.
    #[error("death_date {death} precedes birth_date {birth}")]
    DateOrder { birth: NaiveDate, death: NaiveDate },

    /// A pagination parameter was outside its accepted range.
    #[error("invalid {parameter} {value}: {reason}")]
    InvalidPage {
        parameter: &'static str,
        value: i64,
        reason: &'static str,
    },
}

/// Failures raised by a [`HeroStore`](crate::HeroStore) backend.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The backend rejected the operation or could not be reached.
    #[error("store backend failure: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A row read back from the backend could not be mapped to a hero.
    #[error("corrupt hero row: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Wrap any backend error.
    pub fn backend(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Backend(err.into())
    }
}

/// Errors returned by [`HeroService`](crate::HeroService) operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HeroError {
    /// No hero carries the requested identifier.
    #[error("hero with id {0} not found")]
    NotFound(HeroId),

    /// The request payload or pagination failed validation.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The store failed while serving the request.
    #[error(transparent)]
    Store(#[from] StoreError),
}
