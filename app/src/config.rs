//! Configuration management for the Medify demo.
//!
//! Loads configuration from environment variables with sensible defaults.

use medify_dispatch::DispatchConfig;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedifyConfig {
    /// Request tracker timings and ETA range
    pub dispatch: DispatchConfig,
    /// Log level for the medify crates (overridden by `RUST_LOG`)
    pub log_level: String,
}

impl MedifyConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Unparseable values fall back to their defaults, as does an empty or
    /// inverted ETA range.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());
        let defaults = DispatchConfig::default();

        let transit_delay = parsed("MEDIFY_TRANSIT_DELAY_MS")
            .map_or(defaults.transit_delay, Duration::from_millis);
        let emergency_ack_delay = parsed("MEDIFY_EMERGENCY_ACK_DELAY_MS")
            .map_or(defaults.emergency_ack_delay, Duration::from_millis);

        let eta_min = parsed("MEDIFY_ETA_MIN_MINUTES").and_then(|v| u32::try_from(v).ok());
        let eta_max = parsed("MEDIFY_ETA_MAX_MINUTES").and_then(|v| u32::try_from(v).ok());
        let eta_minutes = eta_min.unwrap_or(defaults.eta_minutes.start)
            ..eta_max.unwrap_or(defaults.eta_minutes.end);
        let eta_minutes = if eta_minutes.is_empty() {
            defaults.eta_minutes.clone()
        } else {
            eta_minutes
        };

        Self {
            dispatch: defaults
                .with_transit_delay(transit_delay)
                .with_emergency_ack_delay(emergency_ack_delay)
                .with_eta_minutes(eta_minutes),
            log_level: lookup("MEDIFY_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }

    /// Default `EnvFilter` directives when `RUST_LOG` is unset.
    ///
    /// Targets match by prefix, so `medify` covers every workspace crate.
    #[must_use]
    pub fn log_directives(&self) -> String {
        format!("warn,medify={}", self.log_level)
    }
}

impl Default for MedifyConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> MedifyConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        MedifyConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = MedifyConfig::default();
        assert_eq!(config.dispatch.transit_delay, Duration::from_secs(5));
        assert_eq!(config.dispatch.emergency_ack_delay, Duration::ZERO);
        assert_eq!(config.dispatch.eta_minutes, 20..35);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("MEDIFY_TRANSIT_DELAY_MS", "250"),
            ("MEDIFY_EMERGENCY_ACK_DELAY_MS", "1500"),
            ("MEDIFY_ETA_MIN_MINUTES", "10"),
            ("MEDIFY_ETA_MAX_MINUTES", "12"),
            ("MEDIFY_LOG_LEVEL", "trace"),
        ]);
        assert_eq!(config.dispatch.transit_delay, Duration::from_millis(250));
        assert_eq!(config.dispatch.emergency_ack_delay, Duration::from_millis(1500));
        assert_eq!(config.dispatch.eta_minutes, 10..12);
        assert_eq!(config.log_directives(), "warn,medify=trace");
    }

    #[test]
    fn test_garbage_falls_back() {
        let config = config_with(&[
            ("MEDIFY_TRANSIT_DELAY_MS", "soon"),
            ("MEDIFY_ETA_MIN_MINUTES", "40"),
        ]);
        assert_eq!(config.dispatch.transit_delay, Duration::from_secs(5));
        assert_eq!(config.dispatch.eta_minutes, 20..35);
    }
}
