use std::path::PathBuf;

use crate::app_config::{AppConfig, ChainParentSelectPolicy, Environment};
use crate::session::Role;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let api_base_url = require("PTK_API_BASE_URL")?;

    let env = parse_environment(&or_default("PTK_ENV", "development"));
    let log_level = or_default("PTK_LOG_LEVEL", "info");
    let auth_token = lookup("PTK_AUTH_TOKEN").ok();
    let session_role = Role::parse(&or_default("PTK_ROLE", "user"));
    let session_user_id = lookup("PTK_USER_ID").ok();

    let request_timeout_secs = parse_u64("PTK_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PTK_USER_AGENT", "patriot-thanks/0.1 (directory-client)");
    let max_retries = parse_u32("PTK_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("PTK_RETRY_BACKOFF_BASE_MS", "500")?;

    let categories_path = lookup("PTK_CATEGORIES_PATH").ok().map(PathBuf::from);

    let chain_parent_select =
        parse_chain_parent_select(&or_default("PTK_CHAIN_PARENT_SELECT", "allow"))?;

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        auth_token,
        session_role,
        session_user_id,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        categories_path,
        chain_parent_select,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_chain_parent_select(s: &str) -> Result<ChainParentSelectPolicy, ConfigError> {
    match s {
        "allow" => Ok(ChainParentSelectPolicy::Allow),
        "block" => Ok(ChainParentSelectPolicy::Block),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PTK_CHAIN_PARENT_SELECT".to_string(),
            reason: format!("expected 'allow' or 'block', got '{other}'"),
        }),
    }
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

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("PTK_API_BASE_URL", "https://api.patriotthanks.test");
        m
    }

    #[test]
    fn parse_environment_known_values() {
        assert_eq!(parse_environment("development"), Environment::Development);
        assert_eq!(parse_environment("test"), Environment::Test);
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("staging"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_api_base_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "PTK_API_BASE_URL"),
            "expected MissingEnvVar(PTK_API_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_required_vars() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.auth_token.is_none());
        assert_eq!(cfg.session_role, Role::User);
        assert_eq!(cfg.request_timeout_secs, 30);
        assert_eq!(cfg.user_agent, "patriot-thanks/0.1 (directory-client)");
        assert_eq!(cfg.max_retries, 3);
        assert_eq!(cfg.retry_backoff_base_ms, 500);
        assert!(cfg.categories_path.is_none());
        assert_eq!(cfg.chain_parent_select, ChainParentSelectPolicy::Allow);
    }

    #[test]
    fn build_app_config_reads_role_and_token() {
        let mut map = full_env();
        map.insert("PTK_ROLE", "admin");
        map.insert("PTK_AUTH_TOKEN", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.session_role, Role::Admin);
        assert_eq!(cfg.auth_token.as_deref(), Some("secret-token"));
    }

    #[test]
    fn build_app_config_redacts_token_in_debug() {
        let mut map = full_env();
        map.insert("PTK_AUTH_TOKEN", "secret-token");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("secret-token"), "token leaked: {debug}");
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn build_app_config_invalid_timeout_fails() {
        let mut map = full_env();
        map.insert("PTK_REQUEST_TIMEOUT_SECS", "not-a-number");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PTK_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(PTK_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_max_retries_override() {
        let mut map = full_env();
        map.insert("PTK_MAX_RETRIES", "5");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.max_retries, 5);
    }

    #[test]
    fn build_app_config_chain_parent_select_block() {
        let mut map = full_env();
        map.insert("PTK_CHAIN_PARENT_SELECT", "block");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.chain_parent_select, ChainParentSelectPolicy::Block);
    }

    #[test]
    fn build_app_config_chain_parent_select_invalid() {
        let mut map = full_env();
        map.insert("PTK_CHAIN_PARENT_SELECT", "maybe");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "PTK_CHAIN_PARENT_SELECT"),
            "expected InvalidEnvVar(PTK_CHAIN_PARENT_SELECT), got: {result:?}"
        );
    }
}
