//! Server configuration module
//! Handles dynamic configuration parameters for the drawing server

use crate::constants::{DEFAULT_HOST, DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_PORT, DEFAULT_STORAGE_DIR};
use crate::error::{Result, RustyCanvasError};
use std::env;
use std::path::PathBuf;

/// Where room snapshots are written by save/load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per room under `storage_dir`
    File,
    /// Process memory only, lost on restart
    Memory,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "file" => Ok(Self::File),
            "memory" => Ok(Self::Memory),
            other => Err(RustyCanvasError::ConfigError(format!(
                "Unknown storage backend '{}', expected 'file' or 'memory'",
                other
            ))),
        }
    }
}

/// Server configuration parameters
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding `<room_id>.json` snapshots
    pub storage_dir: PathBuf,
    pub storage_backend: StorageBackend,
    /// Largest inbound text frame accepted, in bytes
    pub max_message_size: usize,
}

impl ServerConfig {
    /// Memory-backed configuration for tests
    pub fn for_testing() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            storage_backend: StorageBackend::Memory,
            max_message_size: DEFAULT_MAX_MESSAGE_SIZE,
        }
    }

    /// Load configuration from environment variables if available
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("RUSTY_CANVAS_HOST").unwrap_or(DEFAULT_HOST.to_string());

        let port = match lookup("RUSTY_CANVAS_PORT") {
            Some(p) => p.trim().parse().map_err(|_| {
                RustyCanvasError::ConfigError(format!("Invalid RUSTY_CANVAS_PORT: {}", p))
            })?,
            None => DEFAULT_PORT,
        };

        let storage_dir = lookup("RUSTY_CANVAS_STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));

        let storage_backend = match lookup("RUSTY_CANVAS_STORAGE") {
            Some(value) => StorageBackend::parse(&value)?,
            None => StorageBackend::File,
        };

        let max_message_size = match lookup("RUSTY_CANVAS_MAX_MESSAGE_SIZE") {
            Some(s) => s.trim().parse().map_err(|_| {
                RustyCanvasError::ConfigError(format!(
                    "Invalid RUSTY_CANVAS_MAX_MESSAGE_SIZE: {}",
                    s
                ))
            })?,
            None => DEFAULT_MAX_MESSAGE_SIZE,
        };

        if max_message_size == 0 {
            return Err(RustyCanvasError::ConfigError(
                "RUSTY_CANVAS_MAX_MESSAGE_SIZE must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            storage_dir,
            storage_backend,
            max_message_size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = ServerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage_dir, PathBuf::from(DEFAULT_STORAGE_DIR));
        assert_eq!(config.storage_backend, StorageBackend::File);
        assert_eq!(config.max_message_size, DEFAULT_MAX_MESSAGE_SIZE);
    }

    #[test]
    fn test_values_are_read() {
        let config = ServerConfig::from_lookup(lookup_from(&[
            ("RUSTY_CANVAS_HOST", "127.0.0.1"),
            ("RUSTY_CANVAS_PORT", "4000"),
            ("RUSTY_CANVAS_STORAGE_DIR", "/tmp/canvas"),
            ("RUSTY_CANVAS_STORAGE", "Memory"),
            ("RUSTY_CANVAS_MAX_MESSAGE_SIZE", "2048"),
        ]))
        .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 4000);
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/canvas"));
        assert_eq!(config.storage_backend, StorageBackend::Memory);
        assert_eq!(config.max_message_size, 2048);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerConfig::from_lookup(lookup_from(&[("RUSTY_CANVAS_PORT", "abc")]));
        assert!(result.unwrap_err().to_string().contains("RUSTY_CANVAS_PORT"));
    }

    #[test]
    fn test_zero_message_size_is_rejected() {
        let result =
            ServerConfig::from_lookup(lookup_from(&[("RUSTY_CANVAS_MAX_MESSAGE_SIZE", "0")]));
        assert!(matches!(result, Err(RustyCanvasError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = ServerConfig::from_lookup(lookup_from(&[("RUSTY_CANVAS_STORAGE", "redis")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_for_testing_uses_memory() {
        let config = ServerConfig::for_testing();
        assert_eq!(config.storage_backend, StorageBackend::Memory);
    }
}
