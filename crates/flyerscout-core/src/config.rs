use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
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
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
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

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let postal_code = or_default("FLYERSCOUT_POSTAL_CODE", "N2K1Y7");
    let sid = or_default("FLYERSCOUT_SID", "8552038072202149");
    let search_base_url = or_default(
        "FLYERSCOUT_SEARCH_BASE_URL",
        "https://cdn-gateflipp.flippback.com",
    );
    let data_base_url = or_default(
        "FLYERSCOUT_DATA_BASE_URL",
        "https://dam.flippenterprise.net",
    );
    let request_timeout_secs = parse_u64("FLYERSCOUT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "FLYERSCOUT_USER_AGENT",
        "Mozilla/5.0 (compatible; FlyerBot/1.0)",
    );
    let classifier_url = lookup("FLYERSCOUT_CLASSIFIER_URL").ok();
    let classifier_threshold = parse_f32("FLYERSCOUT_CLASSIFIER_THRESHOLD", "0.6")?;
    if !(0.0..=1.0).contains(&classifier_threshold) {
        return Err(ConfigError::InvalidEnvVar {
            var: "FLYERSCOUT_CLASSIFIER_THRESHOLD".to_string(),
            reason: format!("must be within [0, 1], got {classifier_threshold}"),
        });
    }
    let notify_url = lookup("FLYERSCOUT_NOTIFY_URL").ok();
    let log_level = or_default("FLYERSCOUT_LOG_LEVEL", "info");

    Ok(AppConfig {
        postal_code,
        sid,
        search_base_url,
        data_base_url,
        request_timeout_secs,
        user_agent,
        classifier_url,
        classifier_threshold,
        notify_url,
        log_level,
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
    fn build_app_config_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.postal_code, "N2K1Y7");
        assert_eq!(cfg.sid, "8552038072202149");
        assert_eq!(cfg.search_base_url, "https://cdn-gateflipp.flippback.com");
        assert_eq!(cfg.data_base_url, "https://dam.flippenterprise.net");
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "Mozilla/5.0 (compatible; FlyerBot/1.0)");
        assert!(cfg.classifier_url.is_none());
        assert!((cfg.classifier_threshold - 0.6).abs() < f32::EPSILON);
        assert!(cfg.notify_url.is_none());
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn build_app_config_overrides() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FLYERSCOUT_POSTAL_CODE", "M5V2T6");
        map.insert("FLYERSCOUT_REQUEST_TIMEOUT_SECS", "10");
        map.insert("FLYERSCOUT_CLASSIFIER_URL", "http://localhost:8080");
        map.insert("FLYERSCOUT_CLASSIFIER_THRESHOLD", "0.8");
        map.insert("FLYERSCOUT_NOTIFY_URL", "https://ntfy.sh/deals");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.postal_code, "M5V2T6");
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.classifier_url.as_deref(), Some("http://localhost:8080"));
        assert!((cfg.classifier_threshold - 0.8).abs() < f32::EPSILON);
        assert_eq!(cfg.notify_url.as_deref(), Some("https://ntfy.sh/deals"));
    }

    #[test]
    fn build_app_config_invalid_timeout() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FLYERSCOUT_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLYERSCOUT_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(FLYERSCOUT_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_invalid_threshold() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FLYERSCOUT_CLASSIFIER_THRESHOLD", "abc");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLYERSCOUT_CLASSIFIER_THRESHOLD"),
            "expected InvalidEnvVar(FLYERSCOUT_CLASSIFIER_THRESHOLD), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_threshold_out_of_range() {
        let mut map: HashMap<&str, &str> = HashMap::new();
        map.insert("FLYERSCOUT_CLASSIFIER_THRESHOLD", "1.5");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "FLYERSCOUT_CLASSIFIER_THRESHOLD"),
            "expected InvalidEnvVar(FLYERSCOUT_CLASSIFIER_THRESHOLD), got: {result:?}"
        );
    }
}
