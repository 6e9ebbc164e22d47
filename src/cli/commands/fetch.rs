//! One-shot summary fetch command.

use anyhow::{bail, Result};
use chrono::Utc;
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::Path;

use folio_core::types::{Snapshot, METRICS};

pub async fn run(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    config.validate()?;
    let client = super::client_from(&config)?;
    let credentials = super::credentials_from(&config);

    for portfolio in &config.portfolios {
        let summary = match client.summary(portfolio.id, &credentials).await {
            Ok(summary) => summary,
            Err(err) if err.is_terminal() => {
                bail!("{err}; run the login command to refresh credentials")
            }
            Err(err) => return Err(err.into()),
        };
        let snapshot = Snapshot::from_summary(&portfolio.name, &summary, Utc::now());
        print_snapshot(&snapshot);
    }
    Ok(())
}

pub(crate) fn print_snapshot(snapshot: &Snapshot) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        snapshot.portfolio_name.clone(),
        format!("as of {}", snapshot.updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
    ]);
    for descriptor in &METRICS {
        table.add_row(vec![
            descriptor.label.to_string(),
            format!("{:.2} {}", descriptor.metric.value(snapshot), descriptor.unit),
        ]);
    }
    println!("{table}");
}
