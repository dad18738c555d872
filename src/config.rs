use anyhow::Result;
use config::{Config, Environment, File};
use sea_orm::Database;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_CONFIG_FILE: &str = "forecasthub.toml";
pub const ENV_PREFIX: &str = "FORECASTHUB";
/// Plain variable consulted last when no connection string is configured.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error(
        "no database connection string configured; pass --database-url, \
         set FORECASTHUB_DATABASE_URL or DATABASE_URL"
    )]
    MissingConnectionString,
}

/// Settings read from defaults, the optional TOML file and `FORECASTHUB_*` variables.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub database_url: Option<String>,
    pub bind_address: String,
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// An explicitly given file must exist; the default `forecasthub.toml` is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn load_with(
        config_file: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        debug!("Reading configuration file {} (required: {})", path.display(), required);

        let settings = Config::builder()
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .add_source(File::from(path).required(required))
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

/// Picks the connection string: CLI flag, then configuration, then `DATABASE_URL`.
///
/// Blank values count as absent.
pub fn resolve_database_url<F>(
    flag: Option<String>,
    config: &AppConfig,
    lookup_env: F,
) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    fn present(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty())
    }

    present(flag)
        .or_else(|| present(config.database_url.clone()))
        .or_else(|| present(lookup_env(FALLBACK_DATABASE_URL_VAR)))
        .ok_or(ConfigError::MissingConnectionString)
}

/// Connects to the database and builds the shared application state.
pub async fn initialize_app_state(database_url: &str) -> Result<AppState> {
    trace!("Connecting to database");
    let db = Database::connect(database_url).await?;
    info!("Connected to database");
    Ok(AppState { db })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn config_with(database_url: Option<&str>) -> AppConfig {
        AppConfig {
            database_url: database_url.map(str::to_string),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            static_dir: None,
        }
    }

    #[test]
    fn test_defaults_without_file_or_environment() {
        let config = AppConfig::load_with(None, env(&[])).unwrap();

        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.database_url, None);
        assert_eq!(config.static_dir, None);
    }

    #[test]
    fn test_prefixed_environment_overrides_defaults() {
        let config = AppConfig::load_with(
            None,
            env(&[
                ("FORECASTHUB_BIND_ADDRESS", "127.0.0.1:8080"),
                ("FORECASTHUB_DATABASE_URL", "sqlite::memory:"),
                ("FORECASTHUB_STATIC_DIR", "dist"),
            ]),
        )
        .unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080");
        assert_eq!(config.database_url.as_deref(), Some("sqlite::memory:"));
        assert_eq!(config.static_dir, Some(PathBuf::from("dist")));
    }

    #[test]
    fn test_file_values_are_overridden_by_environment() {
        let path = std::env::temp_dir().join(format!("forecasthub-test-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "database_url = \"sqlite://from-file.db\"").unwrap();
        writeln!(file, "bind_address = \"127.0.0.1:4000\"").unwrap();
        drop(file);

        let config = AppConfig::load_with(
            Some(&path),
            env(&[("FORECASTHUB_BIND_ADDRESS", "127.0.0.1:5000")]),
        );
        std::fs::remove_file(&path).ok();
        let config = config.unwrap();

        assert_eq!(config.database_url.as_deref(), Some("sqlite://from-file.db"));
        assert_eq!(config.bind_address, "127.0.0.1:5000");
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let result = AppConfig::load_with(Some(Path::new("/nonexistent/forecasthub.toml")), env(&[]));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_flag_wins_over_config_and_environment() {
        let url = resolve_database_url(
            Some("sqlite://flag.db".to_string()),
            &config_with(Some("sqlite://config.db")),
            |_| Some("sqlite://env.db".to_string()),
        )
        .unwrap();
        assert_eq!(url, "sqlite://flag.db");
    }

    #[test]
    fn test_config_wins_over_plain_environment() {
        let url = resolve_database_url(None, &config_with(Some("sqlite://config.db")), |_| {
            Some("sqlite://env.db".to_string())
        })
        .unwrap();
        assert_eq!(url, "sqlite://config.db");
    }

    #[test]
    fn test_plain_environment_is_the_fallback() {
        let url = resolve_database_url(Some("  ".to_string()), &config_with(None), |name| {
            (name == FALLBACK_DATABASE_URL_VAR).then(|| "sqlite://env.db".to_string())
        })
        .unwrap();
        assert_eq!(url, "sqlite://env.db");
    }

    #[test]
    fn test_missing_connection_string_is_fatal() {
        let result = resolve_database_url(None, &config_with(None), |_| None);
        assert!(matches!(result, Err(ConfigError::MissingConnectionString)));
    }
}
