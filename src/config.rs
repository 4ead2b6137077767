use std::{env, net::SocketAddr, time::Duration};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_UPSTREAM_URL: &str = "http://127.0.0.1:3000/de-analytics";
pub const DEFAULT_POLL_SECS: u64 = 36;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ANALYTICS_POLL_SECS must be a positive number of seconds, got {0:?}")]
    PollInterval(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub upstream_url: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let upstream_url = lookup("ANALYTICS_UPSTREAM_URL")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let poll_secs = match lookup("ANALYTICS_POLL_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::PollInterval(raw)),
            },
            None => DEFAULT_POLL_SECS,
        };

        Ok(Self {
            addr: SocketAddr::from(([0, 0, 0, 0], port)),
            upstream_url,
            poll_interval: Duration::from_secs(poll_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.addr.port(), DEFAULT_PORT);
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(36));
    }

    #[test]
    fn env_values_override_defaults() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "9100"),
            ("ANALYTICS_UPSTREAM_URL", "http://stats.local/de-analytics/"),
            ("ANALYTICS_POLL_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.addr.port(), 9100);
        assert_eq!(config.upstream_url, "http://stats.local/de-analytics");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let err = Config::from_lookup(lookup(&[("ANALYTICS_POLL_SECS", "0")])).unwrap_err();
        assert_eq!(err, ConfigError::PollInterval("0".into()));
    }
}
