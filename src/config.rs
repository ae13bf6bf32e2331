//! Durable account configuration.
//!
//! The config file is shared by every process running against the same
//! account, so it is the authoritative copy of the token. It is stored at
//! `~/.config/pan_session/config.json` unless overridden.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{DriveError, Result};
use crate::session::UserRecord;

/// Application name used for the config directory.
const APP_NAME: &str = "pan_session";

/// Config file name.
const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "PAN_SESSION_CONFIG";

/// Read access to the persisted active user.
pub trait ConfigStore: Send + Sync {
    /// Snapshot of the active user as currently persisted.
    fn active_user(&self) -> Result<UserRecord>;
}

/// On-disk layout of the config file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub active_user_id: String,
    #[serde(default)]
    pub users: Vec<UserRecord>,
}

impl ConfigFile {
    pub fn active_user(&self) -> Option<&UserRecord> {
        self.users
            .iter()
            .find(|u| u.user_id == self.active_user_id)
    }
}

/// JSON-file backed [`ConfigStore`].
///
/// Every read goes back to disk so that tokens saved by a sibling process
/// are picked up.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Store at the platform config directory.
    pub fn default_location() -> Result<Self> {
        let config_dir = dirs::config_dir().ok_or(DriveError::NoConfigDir)?;
        Ok(Self::new(config_dir.join(APP_NAME).join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file; a missing file is an empty config.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the config file atomically.
    ///
    /// Contents go to a temp file in the same directory, renamed over the
    /// config. Readers see either the old or the new file, never a partial one.
    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let contents = serde_json::to_string_pretty(config)?;
        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Insert or replace a user by id and write the file back.
    pub fn upsert_user(&self, record: &UserRecord) -> Result<()> {
        let mut config = self.load()?;
        match config.users.iter_mut().find(|u| u.user_id == record.user_id) {
            Some(existing) => *existing = record.clone(),
            None => config.users.push(record.clone()),
        }
        if config.active_user_id.is_empty() {
            config.active_user_id = record.user_id.clone();
        }
        self.save(&config)
    }
}

impl ConfigStore for FileConfigStore {
    fn active_user(&self) -> Result<UserRecord> {
        self.load()?
            .active_user()
            .cloned()
            .ok_or(DriveError::NoActiveUser)
    }
}
