use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

const DEFAULT_ENV: &str = "local";
const ENV_VAR_NAME: &str = "ADBOARD_ENV";
const CONFIG_DIR_ENV: &str = "ADBOARD_CONFIG_DIR";

/// Plain variables honoured for compatibility with existing deployments.
const LEGACY_PORT_ENV: &str = "PORT";
const LEGACY_CONNECTION_STRING_ENV: &str = "CONNECTION_STRING";

/// Deployment environment the application is running in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Local,
    Staging,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "local" => Ok(Environment::Local),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            other => Err(anyhow!(
                "unsupported environment '{}'; expected local/staging/production",
                other
            )),
        }
    }
}

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, base file, environment overlay,
    /// prefixed variables and finally the legacy `PORT`/`CONNECTION_STRING`.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let environment = std::env::var(ENV_VAR_NAME).unwrap_or_else(|_| DEFAULT_ENV.to_string());
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                std::env::current_dir()
                    .map(|cwd| cwd.join("config"))
                    .unwrap_or_else(|_| PathBuf::from("config"))
            });

        let base_path = config_dir.join("base.toml");
        let environment_path = config_dir.join(format!("{}.toml", environment));

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::File::from(environment_path).required(false))
            .add_source(
                config::Environment::with_prefix("ADBOARD")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var(LEGACY_PORT_ENV).ok())
            .with_context(|| format!("invalid {} override", LEGACY_PORT_ENV))?
            .set_override_option(
                "database.connection_string",
                std::env::var(LEGACY_CONNECTION_STRING_ENV).ok(),
            )
            .with_context(|| format!("invalid {} override", LEGACY_CONNECTION_STRING_ENV))?;

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let mut settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        // The selector variable wins over whatever the files declared.
        settings.environment = environment.parse()?;

        Ok(settings)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "ServerSettings::default_host")]
    pub host: String,
    #[serde(default = "ServerSettings::default_port")]
    pub port: u16,
    #[serde(default = "ServerSettings::default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl ServerSettings {
    fn default_host() -> String {
        "0.0.0.0".to_string()
    }

    fn default_port() -> u16 {
        4700
    }

    fn default_request_timeout_ms() -> u64 {
        15000
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            request_timeout_ms: Self::default_request_timeout_ms(),
        }
    }
}

/// Which persistence strategy backs the advertisement store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Mongo,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "mongo" | "mongodb" => Ok(StoreBackend::Mongo),
            other => Err(anyhow!(
                "unsupported store backend '{}'; expected memory/mongo",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "DatabaseSettings::default_connection_string")]
    pub connection_string: String,
    #[serde(default = "DatabaseSettings::default_database")]
    pub database: String,
    #[serde(default = "DatabaseSettings::default_collection")]
    pub collection: String,
}

impl DatabaseSettings {
    fn default_connection_string() -> String {
        "mongodb://127.0.0.1:27017".to_string()
    }

    fn default_database() -> String {
        "adboard".to_string()
    }

    fn default_collection() -> String {
        "advertisements".to_string()
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            connection_string: Self::default_connection_string(),
            database: Self::default_database(),
            collection: Self::default_collection(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySettings {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "TelemetrySettings::default_filter")]
    pub filter: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl TelemetrySettings {
    fn default_filter() -> String {
        "info".to_string()
    }
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            filter: Self::default_filter(),
            log_format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_environment_is_local() {
        let settings = Settings::default();
        assert_eq!(settings.environment, Environment::Local);
    }

    #[test]
    fn default_server_listens_on_4700() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 4700);
        assert_eq!(settings.server.request_timeout_ms, 15000);
    }

    #[test]
    fn default_store_is_in_memory() {
        let settings = Settings::default();
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.database.collection, "advertisements");
    }

    #[test]
    fn store_backend_parses_aliases() {
        assert_eq!("memory".parse::<StoreBackend>().unwrap(), StoreBackend::Memory);
        assert_eq!("MongoDB".parse::<StoreBackend>().unwrap(), StoreBackend::Mongo);
        assert!("redis".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn unknown_environment_is_rejected() {
        assert!("qa".parse::<Environment>().is_err());
        assert_eq!(
            "production".parse::<Environment>().unwrap(),
            Environment::Production
        );
    }

    #[test]
    fn partial_table_falls_back_to_defaults() {
        let settings: Settings = serde_json::from_value(serde_json::json!({
            "server": { "port": 9000 },
            "store": { "backend": "mongo" }
        }))
        .unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.store.backend, StoreBackend::Mongo);
        assert_eq!(settings.database.database, "adboard");
    }
}
