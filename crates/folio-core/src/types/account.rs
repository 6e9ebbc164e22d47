//! Account, credential, and portfolio identity types.

use serde::{Deserialize, Serialize};

/// Opaque credentials issued at login.
///
/// The token is never refreshed; once the upstream rejects it the user has
/// to reconfigure through the login flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub token: String,
    pub device_id: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct UserSession {
    pub token: String,
    pub user_id: Option<String>,
    pub user_email: Option<String>,
}

/// A trackable portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioRef {
    pub id: i64,
    pub name: String,
    /// Upstream portfolio type; holdings portfolios are `"position"`.
    pub kind: String,
}

impl PortfolioRef {
    pub fn is_position(&self) -> bool {
        self.kind == "position"
    }
}

/// Raw summary fields as returned by the API.
///
/// Numeric fields are locale-formatted strings, left unparsed until a
/// snapshot is built from them.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub market_value: String,
    pub open_pl: String,
    pub open_pl_percent: String,
    pub daily_pl: String,
    pub daily_pl_percent: String,
    pub raw: serde_json::Value,
}
