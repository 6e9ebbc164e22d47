//! Configuration structures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use folio_core::parsers::parse_clock_time;
use folio_core::types::ScheduleConfig;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub account: AccountSettings,
    #[serde(default)]
    pub portfolios: Vec<PortfolioSettings>,
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "folio".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    /// `"pretty"` or `"json"`.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,
    pub app_version: String,
    pub meta_version: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://aappapi.investing.com".to_string(),
            app_version: "1408".to_string(),
            meta_version: "14".to_string(),
        }
    }
}

/// Stored account credentials, written by the login flow.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountSettings {
    pub email: String,
    pub token: String,
    pub device_id: String,
}

/// One portfolio to track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioSettings {
    pub id: i64,
    pub name: String,
}

/// Configuration validation failure.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("weekday interval must be between 1 and 60 minutes, got {0}")]
    Interval(u32),

    #[error("{field} must be between 0 and 23, got {value}")]
    Hour { field: &'static str, value: u32 },

    #[error("{field} is not a valid HH:MM time: '{value}'")]
    ClockTime { field: &'static str, value: String },

    #[error("account credentials are not configured; run the login command first")]
    MissingCredentials,

    #[error("no portfolios configured; run the login command first")]
    NoPortfolios,
}

impl AppConfig {
    /// Validate user-editable fields.
    ///
    /// A weekday window whose start is at or past its end is accepted; it
    /// simply never triggers.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let schedule = &self.schedule;
        if !(1..=60).contains(&schedule.weekday_interval_minutes) {
            return Err(ValidationError::Interval(schedule.weekday_interval_minutes));
        }
        for (field, value) in [
            ("weekday_start_hour", schedule.weekday_start_hour),
            ("weekday_end_hour", schedule.weekday_end_hour),
        ] {
            if value > 23 {
                return Err(ValidationError::Hour { field, value });
            }
        }
        for (field, value) in [
            ("night_time", &schedule.night_time),
            ("morning_time", &schedule.morning_time),
        ] {
            if parse_clock_time(value).is_none() {
                return Err(ValidationError::ClockTime {
                    field,
                    value: value.clone(),
                });
            }
        }

        if self.account.token.is_empty() || self.account.device_id.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        if self.portfolios.is_empty() {
            return Err(ValidationError::NoPortfolios);
        }

        Ok(())
    }
}
