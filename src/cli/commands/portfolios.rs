//! Portfolio listing command.

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::Path;

use crate::cli::PortfoliosArgs;

pub async fn run(args: PortfoliosArgs, config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    let client = super::client_from(&config)?;
    let credentials = super::credentials_from(&config);

    let portfolios = client.portfolios(&credentials, !args.all).await?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Id", "Name", "Type"]);
    for portfolio in &portfolios {
        table.add_row(vec![
            portfolio.id.to_string(),
            portfolio.name.clone(),
            portfolio.kind.clone(),
        ]);
    }
    println!("{table}");
    Ok(())
}
