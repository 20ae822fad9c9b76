use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::catalog::DEFAULT_MERCHANT_ORIGIN;
use crate::ConfigError;

/// Search endpoint queried with the product title scraped from the product page.
pub const DEFAULT_SEARCH_URL: &str =
    "https://www.lidl-hellas.gr/q/api/search?assortment=GR&locale=el_GR&fetchsize=500&version=v2.0.0";

/// Desktop browser identification; the merchant rejects obvious bot agents.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Reads configuration from the process environment, after loading `.env`
/// if one exists.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if a variable is set to an
/// unusable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Like [`load_app_config`] but without touching `.env` files.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] if a variable is set to an
/// unusable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn invalid(var: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

/// Every setting has a default, so an empty environment yields a working
/// configuration pointed at `./config/products.txt`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let text = |var: &str, default: &str| lookup(var).unwrap_or_else(|_| default.to_string());

    let number = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.trim().parse::<u64>().map_err(|e| invalid(var, e)),
            Err(_) => Ok(default),
        }
    };

    let positive = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match number(var, default)? {
            0 => Err(invalid(var, "must be greater than zero")),
            value => Ok(value),
        }
    };

    let max_concurrent = positive("LIDLWATCH_MAX_CONCURRENT", 1)?;
    let max_retries = number("LIDLWATCH_MAX_RETRIES", 0)?;

    Ok(AppConfig {
        catalog_path: PathBuf::from(text("LIDLWATCH_CATALOG_PATH", "./config/products.txt")),
        log_level: text("LIDLWATCH_LOG_LEVEL", "info"),
        merchant_origin: text("LIDLWATCH_MERCHANT_ORIGIN", DEFAULT_MERCHANT_ORIGIN),
        search_url: text("LIDLWATCH_SEARCH_URL", DEFAULT_SEARCH_URL),
        request_timeout_secs: positive("LIDLWATCH_REQUEST_TIMEOUT_SECS", 3)?,
        user_agent: text("LIDLWATCH_USER_AGENT", DEFAULT_USER_AGENT),
        request_delay_ms: number("LIDLWATCH_REQUEST_DELAY_MS", 1_000)?,
        check_interval_secs: positive("LIDLWATCH_CHECK_INTERVAL_SECS", 3_600)?,
        max_concurrent: usize::try_from(max_concurrent)
            .map_err(|e| invalid("LIDLWATCH_MAX_CONCURRENT", e))?,
        max_retries: u32::try_from(max_retries).map_err(|e| invalid("LIDLWATCH_MAX_RETRIES", e))?,
        retry_backoff_base_ms: number("LIDLWATCH_RETRY_BACKOFF_BASE_MS", 1_000)?,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
