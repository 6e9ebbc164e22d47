//! Coordinator-facing summary source.

use async_trait::async_trait;

use folio_core::error::ApiError;
use folio_core::traits::SummarySource;
use folio_core::types::{Credentials, PortfolioSummary};

use crate::investing::InvestingClient;

/// A [`SummarySource`] binding an API client to one portfolio.
pub struct ClientSummarySource {
    client: InvestingClient,
    credentials: Credentials,
    portfolio_id: i64,
}

impl ClientSummarySource {
    pub fn new(client: InvestingClient, credentials: Credentials, portfolio_id: i64) -> Self {
        Self {
            client,
            credentials,
            portfolio_id,
        }
    }
}

#[async_trait]
impl SummarySource for ClientSummarySource {
    async fn fetch_summary(&self) -> Result<PortfolioSummary, ApiError> {
        self.client.summary(self.portfolio_id, &self.credentials).await
    }
}
