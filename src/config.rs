use std::env;
use std::time::Duration;

use crate::ai::groq;
use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Provider credential; generation fails without it.
    pub api_key: Option<String>,
    pub port: u16,
    /// Origins allowed to call the API from a browser.
    pub allowed_origins: Vec<String>,
    pub api_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl Config {
    /// Create config from environment variables
    ///
    /// Reads:
    /// - `GROQ_API_KEY` (optional here, required to generate ideas)
    /// - `PORT` (default: 8080)
    /// - `ALLOWED_ORIGINS`, comma separated (default: "http://localhost:3000")
    /// - `GROQ_API_URL` (default: Groq's chat completions endpoint)
    /// - `GROQ_MODEL` (default: "llama3-8b-8192")
    /// - `GROQ_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match non_empty(lookup("PORT")) {
            Some(value) => parse_value("PORT", value)?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = match non_empty(lookup("GROQ_TIMEOUT_SECS")) {
            Some(value) => parse_value("GROQ_TIMEOUT_SECS", value)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key: non_empty(lookup("GROQ_API_KEY")),
            port,
            allowed_origins: parse_origins(lookup("ALLOWED_ORIGINS").as_deref()),
            api_url: non_empty(lookup("GROQ_API_URL"))
                .unwrap_or_else(|| groq::DEFAULT_API_URL.to_string()),
            model: non_empty(lookup("GROQ_MODEL")).unwrap_or_else(|| groq::DEFAULT_MODEL.to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}

/// Split a comma separated origin list, falling back to the local development
/// origin when nothing usable is given.
pub fn parse_origins(raw: Option<&str>) -> Vec<String> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() {
        vec![DEFAULT_ORIGIN.to_string()]
    } else {
        origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_key, None);
        assert_eq!(config.port, 8080);
        assert_eq!(config.allowed_origins, vec!["http://localhost:3000"]);
        assert_eq!(config.api_url, groq::DEFAULT_API_URL);
        assert_eq!(config.model, "llama3-8b-8192");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("GROQ_API_KEY", "gsk_test"),
            ("PORT", "9000"),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
            ("GROQ_MODEL", "llama-3.1-8b-instant"),
            ("GROQ_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("gsk_test"));
        assert_eq!(config.port, 9000);
        assert_eq!(
            config.allowed_origins,
            vec!["https://a.example", "https://b.example"]
        );
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_api_key_counts_as_missing() {
        let config = config_from(&[("GROQ_API_KEY", "")]).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn rejects_bad_port() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { name: "PORT", .. }));
    }

    #[test]
    fn origins_fall_back_to_local_development() {
        assert_eq!(parse_origins(None), vec![DEFAULT_ORIGIN]);
        assert_eq!(parse_origins(Some("")), vec![DEFAULT_ORIGIN]);
        assert_eq!(parse_origins(Some(" , ")), vec![DEFAULT_ORIGIN]);
        assert_eq!(
            parse_origins(Some("https://ideas.example,")),
            vec!["https://ideas.example"]
        );
    }

    #[test]
    fn wildcard_origin_is_kept() {
        let config = config_from(&[("ALLOWED_ORIGINS", "*")]).unwrap();
        assert_eq!(config.allowed_origins, vec!["*"]);
    }
}
