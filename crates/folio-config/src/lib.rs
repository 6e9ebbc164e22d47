//! Configuration management.

mod settings;

pub use settings::{
    AccountSettings, ApiSettings, AppConfig, AppSettings, LoggingConfig, PortfolioSettings,
    ValidationError,
};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        write!(
            file,
            r#"
[account]
email = "user@example.com"
token = "tok"
device_id = "abcdef0123456789"

[[portfolios]]
id = 7
name = "Main"

[schedule]
weekday_interval_minutes = 30
"#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.account.email, "user@example.com");
        assert_eq!(config.portfolios.len(), 1);
        assert_eq!(config.portfolios[0].id, 7);
        assert_eq!(config.schedule.weekday_interval_minutes, 30);
        // Untouched sections keep their defaults.
        assert_eq!(config.schedule.weekday_start_hour, 9);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config(Path::new("does-not-exist.toml")).is_err());
    }
}
