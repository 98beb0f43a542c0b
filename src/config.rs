use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::constants::{
    DEFAULT_LISTEN_ADDR, DEFAULT_REFRESH_INTERVAL_SECONDS, DEFAULT_REGIONS_FILE,
    DEFAULT_REQUEST_TIMEOUT_SECONDS, FORECAST_BASE_URL,
};

#[derive(Clone, Debug)]
pub struct Config {
    pub listen_addr: String,
    pub regions_file: PathBuf,
    pub forecast_base_url: String,
    pub request_timeout: Duration,
    pub refresh_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_optional = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let listen_addr = env_string(env_optional("WX_LISTEN_ADDR"), DEFAULT_LISTEN_ADDR);
        let regions_file = PathBuf::from(env_string(
            env_optional("WX_REGIONS_FILE"),
            DEFAULT_REGIONS_FILE,
        ));
        let forecast_base_url = trim_base_url(&env_string(
            env_optional("WX_FORECAST_BASE_URL"),
            FORECAST_BASE_URL,
        ));
        let request_timeout = Duration::from_secs(env_u64(
            "WX_REQUEST_TIMEOUT_SECONDS",
            env_optional("WX_REQUEST_TIMEOUT_SECONDS"),
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?);
        let refresh_interval = Duration::from_secs(
            env_u64(
                "WX_REFRESH_INTERVAL_SECONDS",
                env_optional("WX_REFRESH_INTERVAL_SECONDS"),
                DEFAULT_REFRESH_INTERVAL_SECONDS,
            )?
            .max(1),
        );

        Ok(Self {
            listen_addr,
            regions_file,
            forecast_base_url,
            request_timeout,
            refresh_interval,
        })
    }
}

fn trim_base_url(value: &str) -> String {
    value.trim().trim_end_matches('/').to_string()
}

fn env_string(value: Option<String>, default: &str) -> String {
    value.unwrap_or_else(|| default.to_string())
}

fn env_u64(name: &str, value: Option<String>, default: u64) -> Result<u64> {
    match value {
        Some(value) => value
            .parse::<u64>()
            .with_context(|| format!("Failed to parse {}={} as u64", name, value)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let cfg = config_from(&[]).unwrap();
        assert_eq!(cfg.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(cfg.regions_file, PathBuf::from(DEFAULT_REGIONS_FILE));
        assert_eq!(cfg.forecast_base_url, FORECAST_BASE_URL);
        assert_eq!(
            cfg.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS)
        );
        assert_eq!(
            cfg.refresh_interval,
            Duration::from_secs(DEFAULT_REFRESH_INTERVAL_SECONDS)
        );
    }

    #[test]
    fn overrides_are_trimmed_and_parsed() {
        let cfg = config_from(&[
            ("WX_LISTEN_ADDR", " 0.0.0.0:8080 "),
            ("WX_FORECAST_BASE_URL", "http://localhost:9000/"),
            ("WX_REQUEST_TIMEOUT_SECONDS", "5"),
            ("WX_REFRESH_INTERVAL_SECONDS", "0"),
        ])
        .unwrap();
        assert_eq!(cfg.listen_addr, "0.0.0.0:8080");
        assert_eq!(cfg.forecast_base_url, "http://localhost:9000");
        assert_eq!(cfg.request_timeout, Duration::from_secs(5));
        assert_eq!(cfg.refresh_interval, Duration::from_secs(1));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config_from(&[("WX_REGIONS_FILE", "   ")]).unwrap();
        assert_eq!(cfg.regions_file, PathBuf::from(DEFAULT_REGIONS_FILE));
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let error = config_from(&[("WX_REQUEST_TIMEOUT_SECONDS", "soon")]).unwrap_err();
        assert!(error.to_string().contains("WX_REQUEST_TIMEOUT_SECONDS=soon"));
    }
}
