//! Error types for the portfolio tracker.

use thiserror::Error;

/// Errors returned by the upstream API client.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Login was rejected.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The token or device id was rejected after login.
    ///
    /// Tokens are never refreshed; the user must reconfigure through the
    /// login flow.
    #[error("authentication token expired or invalid")]
    TokenExpired,

    /// The requested portfolio id is unknown upstream.
    #[error("portfolio {0} not found")]
    PortfolioNotFound(i64),

    /// Any other error reported by the portfolio API.
    #[error("portfolio API error: {0}")]
    Portfolio(String),

    /// The request itself failed (connect, timeout, non-JSON body).
    #[error("network error: {0}")]
    Network(String),

    /// The response decoded but is missing expected structure.
    #[error("malformed API response: {0}")]
    Malformed(String),
}

impl ApiError {
    /// Whether this is an authentication-class failure.
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Authentication(_) | ApiError::TokenExpired)
    }

    /// Whether recovery requires the user to reconfigure credentials.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ApiError::TokenExpired)
    }
}

/// Errors surfaced by a coordinator update cycle.
#[derive(Error, Debug)]
pub enum PollError {
    /// No fetch is due yet and no cached snapshot exists.
    #[error("waiting for scheduled update")]
    AwaitingSchedule,

    /// The token was rejected upstream; the user must log in again.
    #[error("authentication token expired or invalid for '{portfolio}'; run the login command to reconfigure")]
    Reauthenticate { portfolio: String },

    #[error(transparent)]
    Api(#[from] ApiError),
}
