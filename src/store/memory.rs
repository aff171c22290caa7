//! In-process profile store.

use super::{ProfileStore, Versioned};
use crate::error::StoreError;
use crate::profile::{PlayerProfile, WalletId};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

type Table = HashMap<WalletId, Versioned<PlayerProfile>>;

/// Profiles held in a `HashMap` behind an `RwLock`. Swaps run under the write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Writers replace whole entries, so a poisoned table is never half-updated.
    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.profiles.read().unwrap_or_else(|p| p.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.profiles.write().unwrap_or_else(|p| p.into_inner())
    }
}

impl ProfileStore for MemoryStore {
    fn get(&self, wallet: &WalletId) -> Result<Option<Versioned<PlayerProfile>>, StoreError> {
        Ok(self.read().get(wallet).cloned())
    }

    fn create(
        &self,
        wallet: &WalletId,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError> {
        let mut table = self.write();
        if table.contains_key(wallet) {
            return Err(StoreError::AlreadyExists(wallet.to_string()));
        }
        let stored = Versioned::initial(profile);
        table.insert(wallet.clone(), stored.clone());
        Ok(stored)
    }

    fn compare_and_swap(
        &self,
        wallet: &WalletId,
        expected_version: u64,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError> {
        let mut table = self.write();
        let current = table
            .get_mut(wallet)
            .ok_or_else(|| StoreError::NotFound(wallet.to_string()))?;
        if current.version != expected_version {
            return Err(StoreError::Conflict {
                wallet: wallet.to_string(),
            });
        }
        *current = current.next(profile);
        Ok(current.clone())
    }

    fn all(&self) -> Result<Vec<PlayerProfile>, StoreError> {
        Ok(self.read().values().map(|v| v.value.clone()).collect())
    }
}
