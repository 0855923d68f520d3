use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Planning-applications API root; always ends with `/`.
    pub api_base_url: String,
    /// Records requested per page (`maxresults`).
    pub page_size: usize,
    pub postcode_api_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub inter_request_delay_ms: u64,
    pub cache_path: PathBuf,
}
