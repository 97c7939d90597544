/// Configuration for the board server.
/// Reads server.json from ~/.config/taskboard/server.json (or platform
/// equivalent). `TASKBOARD_CONFIG` overrides the path.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use taskboard_core::config::{BoardConfig, ConfigError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// JSON board definition; the stock board is used when unset.
    #[serde(default)]
    pub board_file: Option<String>,
}

fn default_port() -> u16 {
    8080
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            board_file: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("TASKBOARD_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("taskboard")
        .join("server.json")
}

/// Load config from path. Returns defaults if the file is missing or broken.
pub fn load_config(path: &Path) -> ServerConfig {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Failed to parse config {}: {}", path.display(), e);
            ServerConfig::default()
        }),
        Err(_) => {
            log::info!("No config at {}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}

/// Resolve the initial board. A configured board file that fails to load is
/// an error; there is no silent fallback to the stock board in that case.
pub fn load_board_config(config: &ServerConfig) -> Result<BoardConfig, ConfigError> {
    match &config.board_file {
        Some(file) => {
            let board_config = BoardConfig::load(Path::new(file))?;
            log::info!("Loaded board from {}", file);
            Ok(board_config)
        }
        None => Ok(BoardConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(Path::new("/nonexistent/taskboard/server.json"));
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_partial_config() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, r#"{{"port": 9191}}"#).unwrap();
        let config = load_config(tmp.path());
        assert_eq!(config.port, 9191);
        assert_eq!(config.bind_address, "127.0.0.1");
        assert!(config.board_file.is_none());
    }

    #[test]
    fn test_broken_config_uses_defaults() {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "port = 1").unwrap();
        assert_eq!(load_config(tmp.path()), ServerConfig::default());
    }

    #[test]
    fn test_board_file_errors_propagate() {
        let config = ServerConfig {
            board_file: Some("/nonexistent/board.json".to_string()),
            ..ServerConfig::default()
        };
        assert!(load_board_config(&config).is_err());
    }

    #[test]
    fn test_stock_board_without_board_file() {
        let board_config = load_board_config(&ServerConfig::default()).unwrap();
        assert_eq!(board_config, BoardConfig::default());
    }
}
