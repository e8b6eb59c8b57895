//! Configuration module
//!
//! Environment-driven configuration for the client: backend base URL,
//! bearer token, device model string, and the admin-tagging setting
//! (uploads are tagged by a third party instead of the uploader).

use std::env;

const DEFAULT_BASE_URL: &str = "https://openlittermap.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub base_url: String,
    /// Bearer token for the backend. Optional here so library users can
    /// construct a config without credentials; the CLI requires it.
    pub token: Option<String>,
    /// Device model reported with each upload.
    pub device_model: String,
    /// When enabled, uploaded photos are tagged server-side by a third
    /// party, so untagged uploads are not kept locally for tagging.
    pub admin_tagging: bool,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            device_model: "unknown".to_string(),
            admin_tagging: false,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Build from environment variables: LITTERLOG_API_URL,
    /// LITTERLOG_TOKEN, LITTERLOG_DEVICE_MODEL, LITTERLOG_ADMIN_TAGGING,
    /// LITTERLOG_HTTP_TIMEOUT_SECS. Everything has a default except the
    /// token, which stays `None` when unset.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("LITTERLOG_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token: env::var("LITTERLOG_TOKEN").ok(),
            device_model: env::var("LITTERLOG_DEVICE_MODEL")
                .unwrap_or_else(|_| "unknown".to_string()),
            admin_tagging: env::var("LITTERLOG_ADMIN_TAGGING")
                .map(|v| parse_bool(&v))
                .unwrap_or(false),
            http_timeout_secs: env::var("LITTERLOG_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_parsing_accepts_common_truthy_values() {
        assert!(parse_bool("true"));
        assert!(parse_bool("TRUE"));
        assert!(parse_bool("1"));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool("banana"));
    }

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.token.is_none());
        assert!(!config.admin_tagging);
        assert_eq!(config.http_timeout_secs, 60);
    }
}
