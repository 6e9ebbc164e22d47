//! Summary source trait definition.

use crate::error::ApiError;
use crate::types::PortfolioSummary;
use async_trait::async_trait;

/// Trait for fetching the raw summary of one portfolio.
///
/// A source is bound to a single portfolio and credential set; coordinators
/// depend on this seam rather than on a concrete API client.
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Fetch the current raw summary.
    ///
    /// # Returns
    /// The unparsed metric fields, or a classified error. Sources never
    /// retry; retry behavior belongs to the caller's cadence.
    async fn fetch_summary(&self) -> Result<PortfolioSummary, ApiError>;
}
