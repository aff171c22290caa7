//! One JSON file per wallet under a data directory (default `~/.hookline/`).

use super::{ProfileStore, Versioned};
use crate::error::StoreError;
use crate::profile::{PlayerProfile, WalletId};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

const PROFILE_EXTENSION: &str = "json";
const TEMP_EXTENSION: &str = "tmp";

/// Profiles saved as `<wallet>.json`, each holding `{ version, value }`.
///
/// Wallet ids are limited to `[a-z0-9._-]`, so the id is used as the file stem
/// directly. Writes land in a temp file that is renamed over the target, and a
/// mutex serialises the read-check-write of create and swap.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    /// `~/.hookline`
    pub fn default_dir() -> io::Result<PathBuf> {
        let home_dir = dirs::home_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine home directory",
            )
        })?;
        Ok(home_dir.join(".hookline"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, wallet: &WalletId) -> PathBuf {
        self.dir
            .join(format!("{}.{}", wallet.as_str(), PROFILE_EXTENSION))
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // Guards no data of its own; files are replaced by rename.
        self.write_lock.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn read_file(path: &Path) -> Result<Option<Versioned<PlayerProfile>>, StoreError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn write_file(&self, wallet: &WalletId, stored: &Versioned<PlayerProfile>) -> Result<(), StoreError> {
        let path = self.path_for(wallet);
        let temp = path.with_extension(TEMP_EXTENSION);
        let json = serde_json::to_string_pretty(stored)?;
        fs::write(&temp, json)?;
        if let Err(e) = fs::rename(&temp, &path) {
            fs::remove_file(&temp).ok();
            return Err(e.into());
        }
        Ok(())
    }
}

impl ProfileStore for JsonFileStore {
    fn get(&self, wallet: &WalletId) -> Result<Option<Versioned<PlayerProfile>>, StoreError> {
        Self::read_file(&self.path_for(wallet))
    }

    fn create(
        &self,
        wallet: &WalletId,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError> {
        let _guard = self.lock();
        if self.path_for(wallet).exists() {
            return Err(StoreError::AlreadyExists(wallet.to_string()));
        }
        let stored = Versioned::initial(profile);
        self.write_file(wallet, &stored)?;
        Ok(stored)
    }

    fn compare_and_swap(
        &self,
        wallet: &WalletId,
        expected_version: u64,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError> {
        let _guard = self.lock();
        let current = Self::read_file(&self.path_for(wallet))?
            .ok_or_else(|| StoreError::NotFound(wallet.to_string()))?;
        if current.version != expected_version {
            return Err(StoreError::Conflict {
                wallet: wallet.to_string(),
            });
        }
        let stored = current.next(profile);
        self.write_file(wallet, &stored)?;
        Ok(stored)
    }

    /// Loads every profile file. Unreadable files are skipped with a warning so
    /// one corrupted save cannot hide the rest.
    fn all(&self) -> Result<Vec<PlayerProfile>, StoreError> {
        let mut profiles = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|s| s.to_str()) != Some(PROFILE_EXTENSION) {
                continue;
            }
            match Self::read_file(&path) {
                Ok(Some(stored)) => profiles.push(stored.value),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping unreadable profile");
                }
            }
        }
        Ok(profiles)
    }
}
