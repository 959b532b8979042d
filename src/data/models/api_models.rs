use diesel::result::Error as DieselError;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use validator::ValidationError;

// Errors for the card, confidence level and review schedule routes
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Not logged in")]
    Unauthorized,
    #[error("Database error")]
    Database(#[from] DieselError),
    #[error("Connection pool error: {0}")]
    Pool(String),
    #[error("Session error: {0}")]
    Session(String),
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// For PATCH-like bodies: with `#[serde(default)]` an absent field stays
/// `None` while an explicit `null` becomes `Some(None)` and clears the column.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Optional field that may be omitted but never sent as `null`.
pub fn non_null<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
