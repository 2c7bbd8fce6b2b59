//! Error types for the site layer

use chrono::NaiveDate;
use thiserror::Error;

/// Errors talking to the hosted backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response parsing failed
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Rejected API key
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// Backend returned an error
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body from the backend
        message: String,
    },
}

/// Errors surfaced to site users
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SiteError {
    /// The backend failed
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// No venue with the requested id
    #[error("Venue {0} not found")]
    VenueNotFound(String),

    /// The date is booked or outside the booking window
    #[error("{0} is no longer available. Please select another date.")]
    DateUnavailable(NaiveDate),

    /// A required form field is blank
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
}
