use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::preferences::Theme;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on concurrently open editing sessions.
    pub max_sessions: usize,
    /// Theme used for sessions that never stored a preference.
    pub default_theme: Theme,
    /// Minutes without an edit after which a session is evicted.
    pub session_idle_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            max_sessions: parse_or(&lookup, "MAX_SESSIONS", 1000)?,
            default_theme: parse_or(&lookup, "DEFAULT_THEME", Theme::Light)?,
            session_idle_minutes: parse_or(&lookup, "SESSION_IDLE_MINUTES", 120)?,
        };
        ensure!(config.max_sessions > 0, "MAX_SESSIONS must be at least 1");
        ensure!(
            config.session_idle_minutes > 0,
            "SESSION_IDLE_MINUTES must be at least 1"
        );
        Ok(config)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert_eq!(config.max_sessions, 1000);
        assert_eq!(config.default_theme, Theme::Light);
        assert_eq!(config.session_idle_minutes, 120);
    }

    #[test]
    fn test_overrides() {
        let config =
            config_from(&[("PORT", "3000"), ("MAX_SESSIONS", "5"), ("DEFAULT_THEME", "dark")])
                .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_sessions, 5);
        assert_eq!(config.default_theme, Theme::Dark);
    }

    #[test]
    fn test_invalid_values_fail() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("MAX_SESSIONS", "0")]).is_err());
        assert!(config_from(&[("SESSION_IDLE_MINUTES", "0")]).is_err());
        let err = config_from(&[("DEFAULT_THEME", "sepia")]).unwrap_err();
        assert!(err.to_string().contains("DEFAULT_THEME"));
    }
}
