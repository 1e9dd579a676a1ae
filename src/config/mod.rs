//! Layered service configuration
//!
//! Values are resolved from, in increasing priority: built-in defaults, the
//! TOML config file, `BASEBALL_<SECTION>__<KEY>` environment variables, and
//! finally the command line (applied by the binary).

use ::config::{Environment, File, FileFormat};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::ingestor::RowErrorPolicy;
use crate::models::RecordKind;

const ENV_PREFIX: &str = "BASEBALL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub web: WebConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub position_players_csv: PathBuf,
    pub pitchers_csv: PathBuf,
    /// Import both CSV files before the server starts listening
    pub on_startup: bool,
    pub on_malformed_row: RowErrorPolicy,
}

impl ImportConfig {
    /// Configured source file for `kind`
    pub fn csv_path(&self, kind: RecordKind) -> &Path {
        match kind {
            RecordKind::PositionPlayers => &self.position_players_csv,
            RecordKind::Pitchers => &self.pitchers_csv,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://./baseball.db".to_string(),
                max_connections: Some(5),
            },
            web: WebConfig {
                host: "0.0.0.0".to_string(),
                port: 4242,
            },
            import: ImportConfig {
                position_players_csv: PathBuf::from("./assets/batters.csv"),
                pitchers_csv: PathBuf::from("./assets/pitchers.csv"),
                on_startup: true,
                on_malformed_row: RowErrorPolicy::Fail,
            },
        }
    }
}

impl Config {
    /// Load configuration from `path`, writing the defaults there first if
    /// the file does not exist yet
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            let contents = toml::to_string_pretty(&Self::default())?;
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, contents)?;
            info!("Wrote default configuration to {}", path.display());
        }

        Self::load_with_environment(path, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_environment(path: &Path, environment: Environment) -> Result<Self> {
        let defaults = ::config::Config::try_from(&Self::default())?;

        let settings = ::config::Config::builder()
            .add_source(defaults)
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Toml).required(false))
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> Environment {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::environment().source(Some(vars))
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from_file(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.web.port, 4242);
        assert_eq!(config.import.on_malformed_row, RowErrorPolicy::Fail);
        assert!(config.import.on_startup);

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[import]"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[web]\nport = 9000\n\n[import]\non_malformed_row = \"skip\"\npitchers_csv = \"/data/p.csv\"\n",
        )
        .unwrap();

        let config = Config::load_with_environment(&path, env_from(&[])).unwrap();

        assert_eq!(config.web.port, 9000);
        assert_eq!(config.web.host, "0.0.0.0");
        assert_eq!(config.import.on_malformed_row, RowErrorPolicy::Skip);
        assert_eq!(
            config.import.csv_path(RecordKind::Pitchers),
            Path::new("/data/p.csv")
        );
        assert_eq!(
            config.import.csv_path(RecordKind::PositionPlayers),
            Path::new("./assets/batters.csv")
        );
    }

    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[web]\nport = 9000\n").unwrap();

        let config = Config::load_with_environment(
            &path,
            env_from(&[
                ("BASEBALL_WEB__PORT", "9100"),
                ("BASEBALL_DATABASE__URL", "sqlite::memory:"),
            ]),
        )
        .unwrap();

        assert_eq!(config.web.port, 9100);
        assert_eq!(config.database.url, "sqlite::memory:");
    }
}
