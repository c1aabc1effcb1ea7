use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8765;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the HTML page and the optional local command.
    /// Defaults to the directory of the running executable.
    pub base_dir: Option<PathBuf>,
    pub html_file: String,
    /// Preferred command, relative to `base_dir`.
    pub command_path: PathBuf,
    pub position_timeout_ms: u64,
    pub click_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            base_dir: None,
            html_file: "gui.html".to_string(),
            command_path: PathBuf::from("bin").join(format!(
                "mouseclick{}",
                std::env::consts::EXE_SUFFIX
            )),
            position_timeout_ms: 2000,
            click_timeout_ms: 5000,
        }
    }
}

impl ServerConfig {
    pub fn position_timeout(&self) -> Duration {
        Duration::from_millis(self.position_timeout_ms)
    }

    pub fn click_timeout(&self) -> Duration {
        Duration::from_millis(self.click_timeout_ms)
    }

    pub fn resolve_base_dir(&self) -> std::io::Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => {
                let exe = std::env::current_exe()?;
                Ok(exe
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(".")))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Abort when the pointer sits in a screen corner.
    pub failsafe: bool,
    /// Sleep after every primitive pointer action.
    pub pause_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            failsafe: true,
            pause_ms: 100,
        }
    }
}

impl SimulationConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn create_template<P: AsRef<Path>>(path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(&Config::default())?;
        fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_round_trips_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mouseclick.yaml");
        Config::create_template(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: Config = serde_yaml::from_str("server:\n  port: 9000\nsimulation:\n  failsafe: false\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.position_timeout(), Duration::from_secs(2));
        assert_eq!(config.server.click_timeout(), Duration::from_secs(5));
        assert!(!config.simulation.failsafe);
        assert_eq!(config.simulation.pause(), Duration::from_millis(100));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(dir.path().join("absent.yaml")),
            Err(ConfigError::Io(_))
        ));
    }
}
