//! Parsed portfolio snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::parsers::parse_locale_number;
use crate::types::PortfolioSummary;

/// The last successfully parsed portfolio metrics set.
///
/// A coordinator holds at most one live snapshot; it is overwritten on each
/// successful fetch and discarded at teardown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub portfolio_name: String,
    pub market_value: f64,
    pub open_pl: f64,
    pub open_pl_percent: f64,
    pub daily_pl: f64,
    pub daily_pl_percent: f64,
    pub updated_at: DateTime<Utc>,
    /// Raw `screen_data` payload the metrics were read from.
    pub raw: serde_json::Value,
}

impl Snapshot {
    /// Parse a raw summary into a snapshot stamped with `updated_at`.
    pub fn from_summary(
        portfolio_name: &str,
        summary: &PortfolioSummary,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            portfolio_name: portfolio_name.to_string(),
            market_value: parse_locale_number(&summary.market_value),
            open_pl: parse_locale_number(&summary.open_pl),
            open_pl_percent: parse_locale_number(&summary.open_pl_percent),
            daily_pl: parse_locale_number(&summary.daily_pl),
            daily_pl_percent: parse_locale_number(&summary.daily_pl_percent),
            updated_at,
            raw: summary.raw.clone(),
        }
    }
}
