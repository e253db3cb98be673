// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub api_token: Option<String>,
    pub rust_log: String,
    pub log_dir: PathBuf,
    pub export_dir: PathBuf,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .map_err(|_| AppError::Config("API_BASE_URL must be set".to_string()))?;

        let api_token = env::var("API_TOKEN").ok().filter(|t| !t.trim().is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let export_dir = env::var("EXPORT_DIR").unwrap_or_else(|_| ".".to_string());

        let page_size = match env::var("PAGE_SIZE") {
            Ok(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| AppError::Config(format!("PAGE_SIZE must be a positive integer, got '{raw}'")))?,
            Err(_) => 10,
        };

        Ok(Self {
            api_base_url: Self::parse_base_url(&api_base_url)?,
            api_token,
            rust_log,
            log_dir: PathBuf::from(log_dir),
            export_dir: PathBuf::from(export_dir),
            page_size,
        })
    }

    /// Builds a config pointing at `base_url` with defaults for everything else.
    pub fn for_base_url(base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: Self::parse_base_url(base_url)?,
            api_token: None,
            rust_log: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            export_dir: PathBuf::from("."),
            page_size: 10,
        })
    }

    /// Parses the API root, forcing a trailing slash so relative joins keep the path prefix.
    pub fn parse_base_url(raw: &str) -> Result<Url, AppError> {
        let trimmed = raw.trim();
        let normalized = if trimmed.ends_with('/') {
            trimmed.to_string()
        } else {
            format!("{trimmed}/")
        };
        Ok(Url::parse(&normalized)?)
    }
}
