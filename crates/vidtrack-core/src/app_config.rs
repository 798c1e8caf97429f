use std::path::PathBuf;

/// Runtime settings for the ingestion runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub log_level: String,
    pub scrape_command: Option<String>,
    pub schedule: String,
    pub summary_top_n: usize,
}
