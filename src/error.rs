/// Error types for the appointment calendar.
///
/// Only two things can fail here: talking to the appointments API, and
/// asking the view state for a transition it does not support in the
/// current granularity. Everything else degrades to an empty or default
/// visual state.

use thiserror::Error;

use crate::view::Granularity;

/// Failure while fetching the appointment collection.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to appointments endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("appointments endpoint returned HTTP {0}")]
    Status(u16),

    #[error("could not decode appointments response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("unexpected response body: expected an array or an object with an `appointments` array")]
    UnexpectedBody,
}

/// A navigation action that is not valid for the current view.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("months can only be picked from the year view (current view: {0})")]
    NotInYearView(Granularity),

    #[error("invalid month: {0} (expected 1-12)")]
    InvalidMonth(u32),
}
