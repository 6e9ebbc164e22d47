//! Login and portfolio selection wizard.

use anyhow::{bail, Context, Result};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

use folio_client::{generate_device_id, ClientConfig, InvestingClient};
use folio_config::{AccountSettings, AppConfig, PortfolioSettings};
use folio_core::types::{Credentials, PortfolioRef};

use crate::cli::LoginArgs;

pub async fn run(args: LoginArgs, config_path: &Path) -> Result<()> {
    let email = match args.email {
        Some(email) => email,
        None => prompt_line("Email: ")?,
    };
    let password = rpassword::prompt_password("Password: ").context("failed to read password")?;

    // One device id per account, stable across reconfigurations.
    let device_id = generate_device_id(Some(&email));

    let client = InvestingClient::new(ClientConfig::default())?;
    let session = client.login(&email, &password, &device_id).await?;
    info!(
        "logged in as {}",
        session.user_email.as_deref().unwrap_or(&email)
    );

    let credentials = Credentials {
        token: session.token.clone(),
        device_id: device_id.clone(),
    };
    let portfolios = client.portfolios(&credentials, true).await?;
    if portfolios.is_empty() {
        bail!("no position portfolios found for this account");
    }

    let selected = match args.portfolio_id {
        Some(id) => portfolios
            .iter()
            .find(|p| p.id == id)
            .with_context(|| format!("portfolio {id} not found"))?
            .clone(),
        None => select_portfolio(&portfolios)?,
    };

    let config = AppConfig {
        account: AccountSettings {
            email,
            token: session.token,
            device_id,
        },
        portfolios: vec![PortfolioSettings {
            id: selected.id,
            name: selected.name.clone(),
        }],
        ..Default::default()
    };

    let rendered = toml::to_string_pretty(&config).context("failed to render configuration")?;
    std::fs::write(config_path, rendered)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    info!("configured portfolio '{}' ({})", selected.name, selected.id);
    println!("Configuration written to {}", config_path.display());
    Ok(())
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn select_portfolio(portfolios: &[PortfolioRef]) -> Result<PortfolioRef> {
    for (index, portfolio) in portfolios.iter().enumerate() {
        println!("  [{}] {} (id {})", index + 1, portfolio.name, portfolio.id);
    }
    let choice = prompt_line("Select a portfolio: ")?;
    let index: usize = choice.parse().context("expected a number from the list")?;
    if index == 0 || index > portfolios.len() {
        bail!("selection out of range");
    }
    Ok(portfolios[index - 1].clone())
}
