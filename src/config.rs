//! Layered runtime configuration.
//!
//! Values resolve in layers: built-in defaults, then the config file, then
//! environment variables, then CLI flags. Only two things are configurable,
//! the backend base URL and the log filter:
//!
//! ```toml
//! # ~/.config/taskdeck/config.toml
//! api_url = "http://localhost:3000"
//! log_level = "debug"
//! ```
//!
//! `TASKDECK_API_URL` and `TASKDECK_LOG` override the file; `--api-url` and
//! `--verbose` override everything.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const API_URL_ENV: &str = "TASKDECK_API_URL";
pub const LOG_ENV: &str = "TASKDECK_LOG";

/// Template written by `taskdeck config init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# taskdeck configuration

# Backend base URL (overridden by TASKDECK_API_URL and --api-url)
api_url = "http://localhost:3000"

# Log level for the taskdeck crate: trace, debug, info, warn, error
# log_level = "info"
"#;

/// On-disk settings. Everything is optional; missing keys fall through to
/// the next layer.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub log_level: Option<String>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// tracing `EnvFilter` directive, e.g. `taskdeck=info`.
    pub log_filter: String,
    /// Where the config file is looked for (it may not exist).
    pub config_path: PathBuf,
}

impl Config {
    /// Gather all layers and resolve. `cli_api_url` and `verbose` come from
    /// the command line and win over everything else.
    pub fn load(cli_api_url: Option<&str>, verbose: bool) -> Result<Self> {
        let config_path = Self::default_config_path();
        let file = if config_path.exists() {
            ConfigFile::load(&config_path)?
        } else {
            ConfigFile::default()
        };
        let env_api_url = std::env::var(API_URL_ENV).ok();
        let env_log = std::env::var(LOG_ENV).ok();
        Ok(Self::resolve(
            config_path,
            file,
            env_api_url,
            env_log,
            cli_api_url,
            verbose,
        ))
    }

    fn resolve(
        config_path: PathBuf,
        file: ConfigFile,
        env_api_url: Option<String>,
        env_log: Option<String>,
        cli_api_url: Option<&str>,
        verbose: bool,
    ) -> Self {
        let api_url = cli_api_url
            .map(str::to_string)
            .or(env_api_url)
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.trim_end_matches('/').to_string();

        let log_filter = if verbose {
            "taskdeck=debug".to_string()
        } else if let Some(filter) = env_log {
            filter
        } else if let Some(level) = file.log_level {
            format!("taskdeck={level}")
        } else {
            "taskdeck=info".to_string()
        };

        Self {
            api_url,
            log_filter,
            config_path,
        }
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskdeck")
            .join("config.toml")
    }

    /// Log files go to the state directory — the TUI owns the terminal, so
    /// nothing may be printed there.
    pub fn log_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskdeck")
            .join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn resolve(
        file: ConfigFile,
        env_api_url: Option<&str>,
        cli_api_url: Option<&str>,
    ) -> Config {
        Config::resolve(
            PathBuf::from("unused"),
            file,
            env_api_url.map(str::to_string),
            None,
            cli_api_url,
            false,
        )
    }

    #[test]
    fn defaults_apply_when_no_layer_sets_a_value() {
        let config = resolve(ConfigFile::default(), None, None);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_filter, "taskdeck=info");
    }

    #[test]
    fn file_beats_default_env_beats_file_cli_beats_env() {
        let file = ConfigFile {
            api_url: Some("http://file:1".to_string()),
            log_level: None,
        };
        assert_eq!(resolve(file.clone(), None, None).api_url, "http://file:1");
        assert_eq!(
            resolve(file.clone(), Some("http://env:2"), None).api_url,
            "http://env:2"
        );
        assert_eq!(
            resolve(file, Some("http://env:2"), Some("http://cli:3")).api_url,
            "http://cli:3"
        );
    }

    #[test]
    fn api_url_is_normalized_without_a_trailing_slash() {
        let config = resolve(ConfigFile::default(), Some("http://api.example.com/"), None);
        assert_eq!(config.api_url, "http://api.example.com");
    }

    #[test]
    fn verbose_flag_wins_the_log_filter() {
        let file = ConfigFile {
            api_url: None,
            log_level: Some("warn".to_string()),
        };
        let config = Config::resolve(PathBuf::from("unused"), file, None, None, None, true);
        assert_eq!(config.log_filter, "taskdeck=debug");
    }

    #[test]
    fn file_log_level_is_scoped_to_the_crate() {
        let file = ConfigFile {
            api_url: None,
            log_level: Some("trace".to_string()),
        };
        let config = Config::resolve(PathBuf::from("unused"), file, None, None, None, false);
        assert_eq!(config.log_filter, "taskdeck=trace");
    }

    #[test]
    fn config_file_loads_and_reports_parse_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "api_url = \"http://somewhere:9000\"\n").unwrap();
        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.api_url.as_deref(), Some("http://somewhere:9000"));

        fs::write(&path, "api_url = [not toml").unwrap();
        let err = ConfigFile::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
