use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::constants::{IDENTITY_KEY, TOKEN_KEY};

/// Durable session record surviving process restarts: two independent
/// plain-text keys under a state directory, one for the raw bearer token
/// and one for the serialized identity.
///
/// The record is advisory. The backend's acceptance of the token is the
/// source of truth for validity, so absent or unreadable keys simply read
/// as `None`.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open the store in the platform-specific state directory.
    pub fn open_default() -> Result<Self> {
        let dir = if let Some(proj_dirs) = ProjectDirs::from("", "", "atrium") {
            proj_dirs.data_local_dir().to_path_buf()
        } else {
            // Fallback to home directory
            let home = std::env::var("HOME")
                .or_else(|_| std::env::var("USERPROFILE"))
                .context("could not determine home directory")?;
            PathBuf::from(home).join(".local").join("share").join("atrium")
        };
        Self::open(dir)
    }

    /// Open the store in a specific directory, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create session directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn token(&self) -> Option<String> {
        self.read(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.write(TOKEN_KEY, token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.clear(TOKEN_KEY)
    }

    pub fn identity(&self) -> Option<String> {
        self.read(IDENTITY_KEY)
    }

    pub fn set_identity(&self, identity: &str) -> Result<()> {
        self.write(IDENTITY_KEY, identity)
    }

    pub fn clear_identity(&self) -> Result<()> {
        self.clear(IDENTITY_KEY)
    }

    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.dir.join(key)).ok()
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.dir.join(key);
        fs::write(&path, value).with_context(|| format!("failed to write {}", path.display()))
    }

    fn clear(&self, key: &str) -> Result<()> {
        let path = self.dir.join(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", path.display()))
            }
        }
    }
}
