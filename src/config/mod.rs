mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub state_dir: Option<PathBuf>,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub state_dir: PathBuf,
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let state_dir = file
            .state_dir
            .map(PathBuf::from)
            .or_else(|| cli.state_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("state_dir must be specified via --state-dir or in config file")
            })?;

        if !state_dir.exists() {
            bail!("State directory does not exist: {:?}", state_dir);
        }
        if !state_dir.is_dir() {
            bail!("state_dir is not a directory: {:?}", state_dir);
        }

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        Ok(Self {
            state_dir,
            port,
            logging_level,
            frontend_dir_path,
        })
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_temp_state_dir() -> TempDir {
        TempDir::new().unwrap()
    }

    #[test]
    fn test_parse_logging_level() {
        assert!(matches!(
            parse_logging_level("none"),
            Some(RequestsLoggingLevel::None)
        ));
        assert!(matches!(
            parse_logging_level("path"),
            Some(RequestsLoggingLevel::Path)
        ));
        assert!(matches!(
            parse_logging_level("headers"),
            Some(RequestsLoggingLevel::Headers)
        ));
        // Case insensitive
        assert!(matches!(
            parse_logging_level("PATH"),
            Some(RequestsLoggingLevel::Path)
        ));
        // Invalid
        assert!(parse_logging_level("invalid").is_none());
    }

    #[test]
    fn test_resolve_cli_only() {
        let temp_dir = make_temp_state_dir();
        let cli = CliConfig {
            state_dir: Some(temp_dir.path().to_path_buf()),
            port: 3001,
            logging_level: RequestsLoggingLevel::Headers,
            frontend_dir_path: Some("/frontend".to_string()),
        };

        let config = AppConfig::resolve(&cli, None).unwrap();

        assert_eq!(config.state_dir, temp_dir.path());
        assert_eq!(config.port, 3001);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        assert_eq!(config.frontend_dir_path, Some("/frontend".to_string()));
    }

    #[test]
    fn test_resolve_toml_overrides_cli() {
        let temp_dir = make_temp_state_dir();
        let cli = CliConfig {
            state_dir: Some(PathBuf::from("/should/be/overridden")),
            port: 3001,
            logging_level: RequestsLoggingLevel::Path,
            ..Default::default()
        };

        let file_config = FileConfig {
            state_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            port: Some(4000),
            logging_level: Some("headers".to_string()),
            ..Default::default()
        };

        let config = AppConfig::resolve(&cli, Some(file_config)).unwrap();

        // TOML values should override CLI
        assert_eq!(config.state_dir, temp_dir.path());
        assert_eq!(config.port, 4000);
        assert_eq!(config.logging_level, RequestsLoggingLevel::Headers);
        // CLI value used when TOML doesn't specify
        assert_eq!(config.frontend_dir_path, None);
    }

    #[test]
    fn test_resolve_missing_state_dir_error() {
        let cli = CliConfig::default();
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("state_dir must be specified"));
    }

    #[test]
    fn test_resolve_nonexistent_state_dir_error() {
        let cli = CliConfig {
            state_dir: Some(PathBuf::from("/nonexistent/path/that/should/not/exist")),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_resolve_state_dir_not_directory_error() {
        // Create a temporary file (not a directory)
        let temp_file = tempfile::NamedTempFile::new().unwrap();
        let cli = CliConfig {
            state_dir: Some(temp_file.path().to_path_buf()),
            ..Default::default()
        };
        let result = AppConfig::resolve(&cli, None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_file_config_load_and_parse() {
        let temp_dir = make_temp_state_dir();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            "port = 8080\nlogging_level = \"none\"\n",
        )
        .unwrap();

        let file_config = FileConfig::load(&config_path).unwrap();
        assert_eq!(file_config.port, Some(8080));
        assert_eq!(file_config.logging_level, Some("none".to_string()));
        assert_eq!(file_config.state_dir, None);
    }

    #[test]
    fn test_file_config_rejects_invalid_toml() {
        let temp_dir = make_temp_state_dir();
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "port = = 8080").unwrap();

        assert!(FileConfig::load(&config_path).is_err());
    }
}
