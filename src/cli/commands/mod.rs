//! Command implementations.

pub mod fetch;
pub mod login;
pub mod portfolios;
pub mod validate;
pub mod watch;

use anyhow::{Context, Result};
use std::path::Path;

use folio_client::{ClientConfig, InvestingClient};
use folio_config::AppConfig;
use folio_core::types::Credentials;

pub(crate) fn load_config(path: &Path) -> Result<AppConfig> {
    folio_config::load_config(path).with_context(|| format!("failed to load {}", path.display()))
}

pub(crate) fn client_from(config: &AppConfig) -> Result<InvestingClient> {
    InvestingClient::new(ClientConfig {
        base_url: config.api.base_url.clone(),
        app_version: config.api.app_version.clone(),
        meta_version: config.api.meta_version.clone(),
    })
    .context("failed to build API client")
}

pub(crate) fn credentials_from(config: &AppConfig) -> Credentials {
    Credentials {
        token: config.account.token.clone(),
        device_id: config.account.device_id.clone(),
    }
}
