//! Builder for creating and configuring Tracker instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Tracker;
use crate::{
    config::Config,
    error::{Result, TrackerError},
    store::{MemoryStore, SqliteStore},
};

/// Builder for creating and configuring Tracker instances.
#[derive(Debug, Clone, Default)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    config: Config,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/docket/docket.db` or `~/.local/share/docket/docket.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the business-rule configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Builds a tracker backed by SQLite.
    ///
    /// # Errors
    ///
    /// Returns `TrackerError::XdgDirectory` if no default path can be resolved
    /// Returns `TrackerError::FileSystem` if the database directory cannot be
    /// created
    /// Returns `TrackerError::Database` if database initialization fails
    /// Returns `TrackerError::Configuration` if stored project names collide
    /// under the configured name collation
    pub fn build(self) -> Result<Tracker<SqliteStore>> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TrackerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Opening database at {}", db_path.display());
        let store = SqliteStore::new(&db_path, self.config.name_collation)?;
        Ok(Tracker::new(store, self.config))
    }

    /// Builds a tracker backed by an in-memory store; the database path is
    /// ignored.
    pub fn build_in_memory(self) -> Tracker<MemoryStore> {
        Tracker::new(MemoryStore::new(), self.config)
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("docket")
            .place_data_file("docket.db")
            .map_err(|e| TrackerError::XdgDirectory(e.to_string()))
    }
}
