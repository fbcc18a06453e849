//! Cell configuration

use std::fs;
use std::path::Path;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cell configuration
///
/// Buffer sizes bound how many requests may wait for the coordination task
/// before callers are suspended. They never let a put complete before the
/// task has taken the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestConfig {
    /// Queue depth for incoming values
    #[serde(rename = "put-buffer", default = "default_put_buffer")]
    pub put_buffer: usize,

    /// Queue depth for pending reads
    #[serde(rename = "get-buffer", default = "default_get_buffer")]
    pub get_buffer: usize,
}

fn default_put_buffer() -> usize {
    debug!("default_put_buffer: called");
    16
}

fn default_get_buffer() -> usize {
    debug!("default_get_buffer: called");
    64
}

impl Default for LatestConfig {
    fn default() -> Self {
        debug!("LatestConfig::default: called");
        Self {
            put_buffer: 16,
            get_buffer: 64,
        }
    }
}

impl LatestConfig {
    /// Load configuration from a YAML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded cell config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Inbound channel capacity (tokio channels reject zero)
    pub(crate) fn put_capacity(&self) -> usize {
        self.put_buffer.max(1)
    }

    /// Outbound channel capacity (tokio channels reject zero)
    pub(crate) fn get_capacity(&self) -> usize {
        self.get_buffer.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = LatestConfig::default();
        assert_eq!(config.put_buffer, 16);
        assert_eq!(config.get_buffer, 64);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let yaml = "put-buffer: 4\n";
        let config: LatestConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.put_buffer, 4);
        assert_eq!(config.get_buffer, 64);
    }

    #[test]
    fn test_zero_buffers_are_clamped() {
        let config = LatestConfig {
            put_buffer: 0,
            get_buffer: 0,
        };
        assert_eq!(config.put_capacity(), 1);
        assert_eq!(config.get_capacity(), 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "put-buffer: 2").unwrap();
        writeln!(file, "get-buffer: 8").unwrap();

        let config = LatestConfig::load_from_file(file.path()).unwrap();
        assert_eq!(
            config,
            LatestConfig {
                put_buffer: 2,
                get_buffer: 8,
            }
        );
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = LatestConfig::load_from_file(dir.path().join("missing.yml"));
        assert!(result.is_err());
    }
}
