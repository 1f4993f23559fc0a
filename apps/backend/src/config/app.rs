//! Process configuration read from the environment.

use std::env;

use crate::error::AppError;
use crate::middleware::cors::DEFAULT_ORIGIN;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5001;
pub const DEFAULT_DB_NAME: &str = "catalog";

/// Deployment flavour; production turns on `Secure` cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Development,
    Production,
}

impl RuntimeEnv {
    fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(v) if v.eq_ignore_ascii_case("production") => RuntimeEnv::Production,
            _ => RuntimeEnv::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, RuntimeEnv::Production)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// MongoDB connection string (`DB_URI`).
    pub db_uri: Option<String>,
    /// Database used when the URI does not name one.
    pub db_name: String,
    /// `JWT_SECRET`; absence is reported per request, not at startup.
    pub jwt_secret: Option<String>,
    pub runtime_env: RuntimeEnv,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty or blank values count as
    /// unset, except `JWT_SECRET`, where any non-empty value is a secret.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT is not a valid port: {raw}")))?,
            None => DEFAULT_PORT,
        };

        let runtime_env = RuntimeEnv::parse(var("APP_ENV").or_else(|| var("NODE_ENV")).as_deref());

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_ORIGIN.to_string()]);

        Ok(Config {
            host: var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            db_uri: var("DB_URI"),
            db_name: var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string()),
            // Used verbatim: only an empty value counts as unset.
            jwt_secret: lookup("JWT_SECRET").filter(|v| !v.is_empty()),
            runtime_env,
            cors_allowed_origins,
        })
    }

    /// `DB_URI`, or a configuration error naming it.
    pub fn require_db_uri(&self) -> Result<&str, AppError> {
        self.db_uri
            .as_deref()
            .ok_or_else(|| AppError::config("DB_URI must be set"))
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5001);
        assert_eq!(config.db_name, "catalog");
        assert_eq!(config.runtime_env, RuntimeEnv::Development);
        assert_eq!(config.cors_allowed_origins, ["http://localhost:3000"]);
        assert!(config.jwt_secret.is_none());
        assert!(config.require_db_uri().is_err());
    }

    #[test]
    fn node_env_is_honoured_when_app_env_missing() {
        let config = config_from(&[("NODE_ENV", "production")]).unwrap();
        assert!(config.runtime_env.is_production());

        let config = config_from(&[("APP_ENV", "development"), ("NODE_ENV", "production")]).unwrap();
        assert!(!config.runtime_env.is_production());
    }

    #[test]
    fn origins_are_split_and_trimmed() {
        let config = config_from(&[(
            "CORS_ALLOWED_ORIGINS",
            "https://shop.example.com, http://localhost:5173,",
        )])
        .unwrap();
        assert_eq!(
            config.cors_allowed_origins,
            ["https://shop.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn bad_port_is_a_config_error() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn empty_secret_is_unset() {
        let config = config_from(&[("JWT_SECRET", "")]).unwrap();
        assert!(config.jwt_secret.is_none());
    }

    #[test]
    fn blank_secret_is_kept_verbatim() {
        let config = config_from(&[("JWT_SECRET", "  ")]).unwrap();
        assert_eq!(config.jwt_secret.as_deref(), Some("  "));
    }
}
