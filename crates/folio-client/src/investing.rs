//! Investing.com app API integration.

use md5::{Digest, Md5};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info};

use folio_core::error::ApiError;
use folio_core::types::{Credentials, PortfolioRef, PortfolioSummary, UserSession};

const DEFAULT_BASE_URL: &str = "https://aappapi.investing.com";
const DEFAULT_APP_VERSION: &str = "1408";
const DEFAULT_META_VERSION: &str = "14";
const INTERNAL_VERSION: &str = "1293";
const USER_AGENT: &str = "Dalvik/2.1.0 (Linux; U; Android 10; Pixel 3 Build/QQ1D.200105.002)";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream error code for a rejected or expired token.
const CODE_TOKEN_EXPIRED: &str = "1001";
/// Upstream error code for an unknown portfolio id.
const CODE_PORTFOLIO_NOT_FOUND: &str = "203";

/// API client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub app_version: String,
    pub meta_version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_version: DEFAULT_APP_VERSION.to_string(),
            meta_version: DEFAULT_META_VERSION.to_string(),
        }
    }
}

/// Response envelope shared by the portfolio operations.
#[derive(Debug, Deserialize)]
struct SystemStatus {
    status: Option<String>,
    message_error_code: Option<Value>,
    messages: Option<SystemMessages>,
}

#[derive(Debug, Deserialize)]
struct SystemMessages {
    display_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    system: Option<SystemStatus>,
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    token: Option<String>,
    #[serde(rename = "user_ID")]
    user_id: Option<Value>,
    user_email: Option<String>,
    errors: Option<Vec<LoginFieldError>>,
}

#[derive(Debug, Deserialize)]
struct LoginFieldError {
    #[serde(rename = "fieldError")]
    field_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PortfolioListResponse {
    system: Option<SystemStatus>,
    data: Option<Vec<PortfolioListScreen>>,
}

#[derive(Debug, Deserialize)]
struct PortfolioListScreen {
    screen_data: Option<PortfolioScreenData>,
}

#[derive(Debug, Deserialize)]
struct PortfolioScreenData {
    portfolio: Option<Vec<PortfolioEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
struct PortfolioEntry {
    portfolio_id: Option<Value>,
    portfolio_name: Option<String>,
    #[serde(rename = "portfolioType")]
    portfolio_type: Option<String>,
}

impl PortfolioEntry {
    fn id(&self) -> Option<i64> {
        match self.portfolio_id.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    system: Option<SystemStatus>,
    data: Option<Vec<SummaryScreen>>,
}

#[derive(Debug, Deserialize)]
struct SummaryScreen {
    screen_data: Option<Value>,
}

/// Client for the Investing.com app API.
///
/// Stateless; every operation is one short-lived request with a fixed
/// timeout, returning a decoded payload or a classified [`ApiError`]. The
/// client never retries.
pub struct InvestingClient {
    config: ClientConfig,
    http: Client,
}

impl InvestingClient {
    /// Create a new API client.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Common query parameters; `data` is serialized compactly.
    fn query(data: &Value) -> Vec<(&'static str, String)> {
        vec![
            ("time_utc_offset", "3600".to_string()),
            ("skinID", "2".to_string()),
            ("lang_ID", "4".to_string()),
            ("data", data.to_string()),
        ]
    }

    /// Log in and return the session token.
    ///
    /// The password is MD5-hashed before transmission; the digest is an
    /// upstream protocol requirement, not a security control.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        device_id: &str,
    ) -> Result<UserSession, ApiError> {
        let password_hash = format!("{:x}", Md5::digest(password.as_bytes()));
        let url = format!("{}/login_api.php", self.config.base_url);

        debug!("attempting login for {email}");

        let response = self
            .http
            .post(&url)
            .query(&Self::query(&json!({"action": "login"})))
            .header("x-udid", device_id)
            .header("x-app-ver", &self.config.app_version)
            .header("x-meta-ver", &self.config.meta_version)
            .form(&[
                ("internal_version", INTERNAL_VERSION),
                ("reg_initiator", "Side Menu Sign In"),
                ("email", email),
                ("smssupport", "1"),
                ("password", password_hash.as_str()),
                ("reg_source", "android"),
            ])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Authentication(format!(
                "HTTP error {}",
                response.status()
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        if let Some(system) = &body.system {
            if system.status.as_deref() == Some("error") {
                let message = system
                    .messages
                    .as_ref()
                    .and_then(|m| m.display_message.clone())
                    .unwrap_or_else(|| "unknown error".to_string());
                return Err(ApiError::Authentication(message));
            }
        }

        let data = body
            .data
            .ok_or_else(|| ApiError::Authentication("no data in response".to_string()))?;
        if let Some(errors) = &data.errors {
            let message = errors
                .first()
                .and_then(|e| e.field_error.clone())
                .unwrap_or_else(|| "login failed".to_string());
            return Err(ApiError::Authentication(message));
        }
        let token = data
            .token
            .ok_or_else(|| ApiError::Authentication("no token in response".to_string()))?;

        info!("login successful for user {:?}", data.user_email);

        Ok(UserSession {
            token,
            user_id: data.user_id.as_ref().map(json_to_string),
            user_email: data.user_email,
        })
    }

    /// List the portfolios of the authenticated user.
    ///
    /// With `position_only` set, entries whose type is not `"position"`
    /// (watchlists) are filtered out.
    pub async fn portfolios(
        &self,
        credentials: &Credentials,
        position_only: bool,
    ) -> Result<Vec<PortfolioRef>, ApiError> {
        let data = json!([{
            "action": "get_all_portfolios_new",
            "bring_sums": false,
            "include_pair_attr": false,
            "include_pairs": true,
        }]);
        let url = format!("{}/portfolio_api.php", self.config.base_url);

        debug!("fetching portfolios");

        let response = self
            .http
            .get(&url)
            .query(&Self::query(&data))
            .header("Accept", "application/json")
            .header("x-token", &credentials.token)
            .header("x-udid", &credentials.device_id)
            .header("x-app-ver", &self.config.app_version)
            .header("x-meta-ver", &self.config.meta_version)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Portfolio(format!(
                "HTTP error {}",
                response.status()
            )));
        }

        let body: PortfolioListResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        check_portfolio_status(body.system.as_ref(), None)?;

        let screens = body.data.unwrap_or_default();
        let entries = screens
            .first()
            .and_then(|screen| screen.screen_data.as_ref())
            .and_then(|screen_data| screen_data.portfolio.clone())
            .unwrap_or_default();

        let mut portfolios = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry
                .id()
                .ok_or_else(|| ApiError::Malformed("portfolio entry without a numeric id".to_string()))?;
            let kind = entry.portfolio_type.unwrap_or_default();
            if position_only && kind != "position" {
                continue;
            }
            portfolios.push(PortfolioRef {
                id,
                name: entry.portfolio_name.unwrap_or_else(|| format!("Portfolio {id}")),
                kind,
            });
        }

        Ok(portfolios)
    }

    /// Fetch the summary metrics for one portfolio.
    ///
    /// Numeric fields come back as locale-formatted strings and are left
    /// unparsed; a missing metric key defaults to `"0"`.
    pub async fn summary(
        &self,
        portfolio_id: i64,
        credentials: &Credentials,
    ) -> Result<PortfolioSummary, ApiError> {
        let data = json!({
            "action": "get_portfolio_positions",
            "bring_sums": false,
            "include_pair_attr": false,
            "pair_id": 0,
            "portfolioid": portfolio_id,
            "positionType": "summary",
        });
        let url = format!("{}/portfolio_api.php", self.config.base_url);

        debug!("fetching summary for portfolio {portfolio_id}");

        let response = self
            .http
            .get(&url)
            .query(&Self::query(&data))
            .header("x-token", &credentials.token)
            .header("x-udid", &credentials.device_id)
            .header("x-app-ver", &self.config.app_version)
            .header("x-meta-ver", &self.config.meta_version)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ApiError::Portfolio(format!(
                "HTTP error {}",
                response.status()
            )));
        }

        let body: SummaryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        check_portfolio_status(body.system.as_ref(), Some(portfolio_id))?;

        let screens = body.data.unwrap_or_default();
        let screen = screens
            .first()
            .ok_or_else(|| ApiError::Malformed("no data in response".to_string()))?;
        let screen_data = screen
            .screen_data
            .as_ref()
            .filter(|v| v.as_object().is_some_and(|o| !o.is_empty()))
            .ok_or_else(|| ApiError::Malformed("missing expected screen_data".to_string()))?;

        Ok(PortfolioSummary {
            market_value: metric_field(screen_data, "MarketValue"),
            open_pl: metric_field(screen_data, "OpenPL"),
            open_pl_percent: metric_field(screen_data, "OpenPLPerc"),
            daily_pl: metric_field(screen_data, "DailyPL"),
            daily_pl_percent: metric_field(screen_data, "DailyPLPerc"),
            raw: screen_data.clone(),
        })
    }
}

/// Map a failed portfolio-API envelope to the error taxonomy.
fn check_portfolio_status(
    system: Option<&SystemStatus>,
    portfolio_id: Option<i64>,
) -> Result<(), ApiError> {
    let Some(system) = system else {
        return Ok(());
    };
    if system.status.as_deref() != Some("failed") {
        return Ok(());
    }

    let code = system
        .message_error_code
        .as_ref()
        .map(json_to_string)
        .unwrap_or_else(|| "unknown".to_string());
    match (code.as_str(), portfolio_id) {
        (CODE_TOKEN_EXPIRED, _) => Err(ApiError::TokenExpired),
        (CODE_PORTFOLIO_NOT_FOUND, Some(id)) => Err(ApiError::PortfolioNotFound(id)),
        _ => Err(ApiError::Portfolio(format!("API error: {code}"))),
    }
}

/// Read a metric field as a string, defaulting absent keys to `"0"`.
fn metric_field(screen_data: &Value, key: &str) -> String {
    match screen_data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "0".to_string(),
    }
}

/// Render a JSON scalar as a plain string, without quoting.
fn json_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
