//! Configuration validation command.

use anyhow::Result;
use std::path::Path;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = super::load_config(config_path)?;
    config.validate()?;

    println!("Configuration OK");
    println!("  account: {}", config.account.email);
    for portfolio in &config.portfolios {
        println!("  portfolio: {} ({})", portfolio.name, portfolio.id);
    }
    println!(
        "  schedule: every {}m {:02}:00-{:02}:00 Mon-Fri, daily at {} and {}",
        config.schedule.weekday_interval_minutes,
        config.schedule.weekday_start_hour,
        config.schedule.weekday_end_hour,
        config.schedule.morning_time,
        config.schedule.night_time,
    );
    Ok(())
}
