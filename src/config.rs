//! Startup configuration from environment variables.
//!
//! Plain strings and ints with documented defaults; no file format, no
//! schema. A `.env` file next to the binary is honored for convenience.

use std::env;
use std::time::Duration;

/// Everything the dashboard needs to reach one Proxmox node.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PROXMOX_HOST` (required).
    pub host: String,
    /// `PROXMOX_PORT`, default 8006.
    pub port: u16,
    /// `PROXMOX_USERNAME` (required, without realm suffix).
    pub username: String,
    /// `PROXMOX_PASSWORD` (required).
    pub password: String,
    /// `PROXMOX_REALM`, default "pam".
    pub realm: String,
    /// `PROXMOX_NODE`, default "pve".
    pub node: String,
    /// `PROXMOX_VERIFY_SSL`, default false (self-signed certs are the norm).
    pub verify_ssl: bool,
    /// `PROXMOX_POLL_INTERVAL_SECS`, default 10.
    pub poll_interval: Duration,
}

impl AppConfig {
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

    /// Loads the configuration from the process environment, honoring a
    /// `.env` file if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary lookup. Unparseable
    /// numeric values fall back to their defaults with a logged warning.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_or_default(&lookup, "PROXMOX_PORT", 8006u16);
        let interval_secs = parse_or_default(&lookup, "PROXMOX_POLL_INTERVAL_SECS", 10u64);
        let verify_ssl = lookup("PROXMOX_VERIFY_SSL")
            .map(|value| matches!(value.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        Self {
            host: lookup("PROXMOX_HOST").unwrap_or_default(),
            port,
            username: lookup("PROXMOX_USERNAME").unwrap_or_default(),
            password: lookup("PROXMOX_PASSWORD").unwrap_or_default(),
            realm: lookup("PROXMOX_REALM").unwrap_or_else(|| "pam".to_string()),
            node: lookup("PROXMOX_NODE").unwrap_or_else(|| "pve".to_string()),
            verify_ssl,
            poll_interval: Duration::from_secs(interval_secs.max(1)),
        }
    }
}

fn parse_or_default<T: std::str::FromStr + Copy + std::fmt::Display>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, raw, %default, "unparseable value, using default");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8006);
        assert_eq!(config.realm, "pam");
        assert_eq!(config.node, "pve");
        assert!(!config.verify_ssl);
        assert_eq!(config.poll_interval, Duration::from_secs(10));
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("PROXMOX_HOST", "192.168.1.182"),
            ("PROXMOX_PORT", "443"),
            ("PROXMOX_USERNAME", "root"),
            ("PROXMOX_PASSWORD", "secret"),
            ("PROXMOX_REALM", "pve"),
            ("PROXMOX_NODE", "lab"),
            ("PROXMOX_VERIFY_SSL", "True"),
            ("PROXMOX_POLL_INTERVAL_SECS", "30"),
        ]);
        assert_eq!(config.host, "192.168.1.182");
        assert_eq!(config.port, 443);
        assert_eq!(config.realm, "pve");
        assert_eq!(config.node, "lab");
        assert!(config.verify_ssl);
        assert_eq!(config.poll_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_unparseable_port_falls_back() {
        let config = config_from(&[("PROXMOX_PORT", "not-a-port")]);
        assert_eq!(config.port, 8006);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let config = config_from(&[("PROXMOX_POLL_INTERVAL_SECS", "0")]);
        assert_eq!(config.poll_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_verify_ssl_negative_values() {
        for value in ["false", "0", "no", "off", "garbage"] {
            let config = config_from(&[("PROXMOX_VERIFY_SSL", value)]);
            assert!(!config.verify_ssl, "{} should not enable verification", value);
        }
    }
}
