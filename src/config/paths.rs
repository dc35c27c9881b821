//! Path resolution for udo configuration and data files.
//!
//! All udo data is stored in `~/.udo/`:
//! - `config.yaml` - Main configuration file
//! - `udo.db` - Default location of the `SQLite` to-do database

use std::path::PathBuf;

use crate::error::UdoError;

/// Paths to udo configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.udo/`
    pub root: PathBuf,
    /// Config file: `~/.udo/config.yaml`
    pub config_file: PathBuf,
    /// Default database file: `~/.udo/udo.db`
    pub database: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, UdoError> {
        let home = std::env::var("HOME")
            .map_err(|_| UdoError::Config("Could not determine home directory".to_string()))?;

        Ok(Self::with_root(PathBuf::from(home).join(".udo")))
    }

    /// Create paths with a custom root directory (useful for testing).
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("udo.db"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), UdoError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                UdoError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }
        Ok(())
    }
}
