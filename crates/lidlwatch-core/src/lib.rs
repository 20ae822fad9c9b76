pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod money;
pub mod products;

pub use app_config::AppConfig;
pub use catalog::{load_catalog, parse_catalog, DEFAULT_MERCHANT_ORIGIN};
pub use config::{
    load_app_config, load_app_config_from_env, DEFAULT_SEARCH_URL, DEFAULT_USER_AGENT,
};
pub use error::{CatalogError, ConfigError};
pub use money::{format_minor_units, minor_units_from_f64, to_minor_units};
pub use products::{ProductSpec, ResolvedProduct};
