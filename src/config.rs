//! Configuration for raftstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

use crate::error::{Result, StoreError};

/// Main configuration for a raftstore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Backing file for the database. Holds both the `logs` and `conf` tables.
    pub path: PathBuf,

    /// How hard each commit pushes data to disk
    pub durability: Durability,

    /// Largest payload accepted for a single log entry (in bytes)
    pub max_entry_size: usize,

    /// Page cache size handed to the engine (in bytes); engine default if unset
    pub cache_size: Option<usize>,

    // -------------------------------------------------------------------------
    // Node Configuration
    // -------------------------------------------------------------------------
    /// Address this node advertises to its peers
    pub bind_addr: String,
}

/// Commit durability level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Durability {
    /// Commits are visible immediately but only reach disk with a later durable commit
    Low,

    /// Commits are persisted eventually (no fsync on the commit path)
    Medium,

    /// fsync on every commit (safest, slowest)
    #[default]
    High,
}

impl From<Durability> for redb::Durability {
    fn from(level: Durability) -> Self {
        match level {
            Durability::Low => redb::Durability::None,
            Durability::Medium => redb::Durability::Eventual,
            Durability::High => redb::Durability::Immediate,
        }
    }
}

impl std::str::FromStr for Durability {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Durability::Low),
            "medium" => Ok(Durability::Medium),
            "high" => Ok(Durability::High),
            other => Err(StoreError::Config(format!("invalid durability '{}'", other))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./raftstore.redb"),
            durability: Durability::High,
            max_entry_size: 16 * 1024 * 1024, // 16 MB
            cache_size: None,
            bind_addr: "127.0.0.1:7481".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject settings the store cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(StoreError::Config("storage path is empty".to_string()));
        }
        if self.max_entry_size == 0 {
            return Err(StoreError::Config(
                "max_entry_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the backing file path
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = path.into();
        self
    }

    /// Set the commit durability level
    pub fn durability(mut self, durability: Durability) -> Self {
        self.config.durability = durability;
        self
    }

    /// Set the maximum entry payload size (in bytes)
    pub fn max_entry_size(mut self, size: usize) -> Self {
        self.config.max_entry_size = size;
        self
    }

    /// Set the engine page cache size (in bytes)
    pub fn cache_size(mut self, size: usize) -> Self {
        self.config.cache_size = Some(size);
        self
    }

    /// Set the advertised node address
    pub fn bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.bind_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_durability_parse() {
        assert_eq!("LOW".parse::<Durability>().unwrap(), Durability::Low);
        assert_eq!("medium".parse::<Durability>().unwrap(), Durability::Medium);
        assert_eq!("high".parse::<Durability>().unwrap(), Durability::High);
        assert!("extreme".parse::<Durability>().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_entry_size() {
        let config = Config::builder().max_entry_size(0).build();
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let config = Config::builder().path("").build();
        assert!(matches!(config.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn test_default_is_valid() {
        Config::default().validate().unwrap();
    }
}
