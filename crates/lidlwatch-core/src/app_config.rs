use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub log_level: String,
    pub merchant_origin: String,
    pub search_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub request_delay_ms: u64,
    pub check_interval_secs: u64,
    pub max_concurrent: usize,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}
