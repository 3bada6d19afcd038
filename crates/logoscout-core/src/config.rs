use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if an env var holds an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every variable has a default; lookups only fail on malformed values.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let max_results = parse_usize("LOGOSCOUT_MAX_RESULTS", "3")?;
    if max_results == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "LOGOSCOUT_MAX_RESULTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let probe_concurrency = parse_usize("LOGOSCOUT_PROBE_CONCURRENCY", "8")?;

    Ok(AppConfig {
        log_level: or_default("LOGOSCOUT_LOG_LEVEL", "info"),
        request_timeout_secs: parse_u64("LOGOSCOUT_REQUEST_TIMEOUT_SECS", "10")?,
        probe_timeout_secs: parse_u64("LOGOSCOUT_PROBE_TIMEOUT_SECS", "8")?,
        user_agent: or_default("LOGOSCOUT_USER_AGENT", "logoscout/0.1"),
        probe_concurrency: probe_concurrency.max(1),
        max_results,
        min_dimension: parse_u32("LOGOSCOUT_MIN_DIMENSION", "100")?,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_uses_defaults_with_empty_env() {
        let map: HashMap<&str, &str> = HashMap::new();
        let config = build_app_config(lookup_from_map(&map)).expect("defaults must be valid");

        assert_eq!(config.log_level, "info");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.probe_timeout_secs, 8);
        assert_eq!(config.user_agent, "logoscout/0.1");
        assert_eq!(config.probe_concurrency, 8);
        assert_eq!(config.max_results, 3);
        assert_eq!(config.min_dimension, 100);
    }

    #[test]
    fn build_app_config_reads_overrides() {
        let mut map = HashMap::new();
        map.insert("LOGOSCOUT_REQUEST_TIMEOUT_SECS", "30");
        map.insert("LOGOSCOUT_USER_AGENT", "test-agent/2.0");
        map.insert("LOGOSCOUT_MAX_RESULTS", "5");

        let config = build_app_config(lookup_from_map(&map)).expect("overrides must parse");
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.user_agent, "test-agent/2.0");
        assert_eq!(config.max_results, 5);
    }

    #[test]
    fn build_app_config_rejects_unparseable_timeout() {
        let mut map = HashMap::new();
        map.insert("LOGOSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");

        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOGOSCOUT_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(LOGOSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_rejects_zero_max_results() {
        let mut map = HashMap::new();
        map.insert("LOGOSCOUT_MAX_RESULTS", "0");

        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LOGOSCOUT_MAX_RESULTS"),
            "expected InvalidEnvVar(LOGOSCOUT_MAX_RESULTS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_clamps_probe_concurrency_to_one() {
        let mut map = HashMap::new();
        map.insert("LOGOSCOUT_PROBE_CONCURRENCY", "0");

        let config = build_app_config(lookup_from_map(&map)).expect("zero concurrency is clamped");
        assert_eq!(config.probe_concurrency, 1);
    }
}
