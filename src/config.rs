//! Runtime configuration read from environment variables.
//!
//! The binary loads a `.env` file with `dotenvy` before calling
//! [`AppConfig::from_env`].

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::infra::{gemini, nominatim};

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Required only for route advisories.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Caller-side bound on the text-generation call.
    pub advisory_timeout: Duration,
    pub reports_path: PathBuf,
    pub user_id: Option<String>,
    pub geocoder_base_url: String,
    pub log_file_path: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let advisory_timeout = match get("ADVISORY_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    Error::Config(format!("ADVISORY_TIMEOUT_SECS must be a whole number of seconds, got '{raw}'"))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(30),
        };

        Ok(Self {
            gemini_api_key: get("GEMINI_API_KEY"),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.to_string()),
            gemini_base_url: get("GEMINI_BASE_URL")
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.to_string()),
            advisory_timeout,
            reports_path: get("REPORTS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("reports.json")),
            user_id: get("DELAY_USER_ID"),
            geocoder_base_url: get("GEOCODER_BASE_URL")
                .unwrap_or_else(|| nominatim::DEFAULT_BASE_URL.to_string()),
            log_file_path: get("LOG_FILE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("logs/delay_intel.log")),
        })
    }

    pub fn require_gemini_api_key(&self) -> Result<&str> {
        self.gemini_api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY must be set".to_string()))
    }
}
