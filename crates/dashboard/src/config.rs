use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use stockmap_core::classifier::{LocationClassifier, DEFAULT_ADMIN_PATTERN};
use stockmap_core::safe_stock::FailurePolicy;

use crate::error::DashboardError;

/// Dashboard configuration loaded from environment variables.
///
/// All fields have defaults suitable for a local inventory API.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the inventory API (default: `http://localhost:3000/api`).
    pub api_url: String,
    /// Overview stats refresh cadence (default: 5 s).
    pub stats_interval: Duration,
    /// Quiet period before a barcode query is resolved (default: 500 ms).
    pub search_debounce: Duration,
    /// Per-request HTTP timeout (default: 30 s).
    pub request_timeout: Duration,
    /// Bearer token sent with delete requests.
    pub auth_token: Option<String>,
    /// Regex matching administrative floor-map codes.
    pub admin_location_pattern: String,
    /// What a failed safe-stock persist does to the edited value.
    pub safe_stock_on_failure: FailurePolicy,
    /// Directory export files are written into (default: `.`).
    pub export_dir: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".into(),
            stats_interval: Duration::from_secs(5),
            search_debounce: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            auth_token: None,
            admin_location_pattern: DEFAULT_ADMIN_PATTERN.into(),
            safe_stock_on_failure: FailurePolicy::Keep,
            export_dir: PathBuf::from("."),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                  | Default                      |
    /// |--------------------------|------------------------------|
    /// | `INVENTORY_API_URL`      | `http://localhost:3000/api`  |
    /// | `STATS_INTERVAL_SECS`    | `5`                          |
    /// | `SEARCH_DEBOUNCE_MS`     | `500`                        |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                         |
    /// | `AUTH_TOKEN`             | unset                        |
    /// | `ADMIN_LOCATION_PATTERN` | aisles, legends, letters, pillars, gates |
    /// | `SAFE_STOCK_ON_FAILURE`  | `keep`                       |
    /// | `EXPORT_DIR`             | `.`                          |
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = get("INVENTORY_API_URL").unwrap_or(defaults.api_url);

        let stats_interval = parse_or(&get, "STATS_INTERVAL_SECS", 5u64)?;
        if stats_interval == 0 {
            return Err(DashboardError::Config(
                "STATS_INTERVAL_SECS must be greater than 0".into(),
            ));
        }

        let search_debounce = parse_or(&get, "SEARCH_DEBOUNCE_MS", 500u64)?;
        let request_timeout = parse_or(&get, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let admin_location_pattern =
            get("ADMIN_LOCATION_PATTERN").unwrap_or(defaults.admin_location_pattern);
        // Fail at load time on a pattern that does not compile.
        LocationClassifier::new(&admin_location_pattern)?;

        let safe_stock_on_failure = match get("SAFE_STOCK_ON_FAILURE") {
            Some(raw) => raw.parse::<FailurePolicy>()?,
            None => defaults.safe_stock_on_failure,
        };

        Ok(Self {
            api_url,
            stats_interval: Duration::from_secs(stats_interval),
            search_debounce: Duration::from_millis(search_debounce),
            request_timeout: Duration::from_secs(request_timeout),
            auth_token: get("AUTH_TOKEN"),
            admin_location_pattern,
            safe_stock_on_failure,
            export_dir: get("EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.export_dir),
        })
    }

    /// Classifier built from [`admin_location_pattern`](Self::admin_location_pattern).
    pub fn classifier(&self) -> Result<LocationClassifier, DashboardError> {
        Ok(LocationClassifier::new(&self.admin_location_pattern)?)
    }
}

fn parse_or<G, T>(get: &G, key: &str, default: T) -> Result<T, DashboardError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DashboardError::Config(format!("{key} must be a number, got '{raw}'"))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use stockmap_core::error::CoreError;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<DashboardConfig, DashboardError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        DashboardConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, "http://localhost:3000/api");
        assert_eq!(config.stats_interval, Duration::from_secs(5));
        assert_eq!(config.search_debounce, Duration::from_millis(500));
        assert_eq!(config.auth_token, None);
        assert_eq!(config.safe_stock_on_failure, FailurePolicy::Keep);
        assert_eq!(config.admin_location_pattern, DEFAULT_ADMIN_PATTERN);
    }

    #[test]
    fn overrides_are_applied() {
        let config = load(&[
            ("INVENTORY_API_URL", "http://inv:8080/api"),
            ("STATS_INTERVAL_SECS", "10"),
            ("SEARCH_DEBOUNCE_MS", "250"),
            ("AUTH_TOKEN", "tok"),
            ("SAFE_STOCK_ON_FAILURE", "revert"),
            ("EXPORT_DIR", "/tmp/out"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://inv:8080/api");
        assert_eq!(config.stats_interval, Duration::from_secs(10));
        assert_eq!(config.search_debounce, Duration::from_millis(250));
        assert_eq!(config.auth_token.as_deref(), Some("tok"));
        assert_eq!(config.safe_stock_on_failure, FailurePolicy::Revert);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = load(&[("AUTH_TOKEN", "  "), ("STATS_INTERVAL_SECS", "")]).unwrap();
        assert_eq!(config.auth_token, None);
        assert_eq!(config.stats_interval, Duration::from_secs(5));
    }

    #[test]
    fn non_numeric_interval_is_config_error() {
        assert_matches!(
            load(&[("STATS_INTERVAL_SECS", "fast")]),
            Err(DashboardError::Config(_))
        );
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert_matches!(
            load(&[("STATS_INTERVAL_SECS", "0")]),
            Err(DashboardError::Config(_))
        );
    }

    #[test]
    fn invalid_admin_pattern_is_rejected() {
        assert_matches!(
            load(&[("ADMIN_LOCATION_PATTERN", "(")]),
            Err(DashboardError::Core(CoreError::Config(_)))
        );
    }

    #[test]
    fn invalid_policy_is_rejected() {
        assert_matches!(
            load(&[("SAFE_STOCK_ON_FAILURE", "maybe")]),
            Err(DashboardError::Core(CoreError::Config(_)))
        );
    }
}
