//! Profile persistence.
//!
//! Stores hand out versioned snapshots. Every write is a compare-and-swap
//! against the version the caller read, so two requests racing on one wallet
//! cannot both commit.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::{GameError, StoreError};
use crate::profile::{PlayerProfile, WalletId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A stored value and the version it was read at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Versioned<T> {
    /// Starts at 1 on create and goes up by exactly one per swap
    pub version: u64,
    pub value: T,
}

impl<T> Versioned<T> {
    pub fn initial(value: T) -> Self {
        Self { version: 1, value }
    }

    pub fn next(&self, value: T) -> Self {
        Self {
            version: self.version + 1,
            value,
        }
    }
}

/// Persistent profile storage keyed by wallet.
pub trait ProfileStore: Send + Sync {
    fn get(&self, wallet: &WalletId) -> Result<Option<Versioned<PlayerProfile>>, StoreError>;

    /// Inserts a new profile. Fails with `AlreadyExists` if the wallet has one.
    fn create(
        &self,
        wallet: &WalletId,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError>;

    /// Replaces the profile only if its stored version is still `expected_version`.
    fn compare_and_swap(
        &self,
        wallet: &WalletId,
        expected_version: u64,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError>;

    /// Every stored profile, in no particular order.
    fn all(&self) -> Result<Vec<PlayerProfile>, StoreError>;
}

impl<S: ProfileStore + ?Sized> ProfileStore for Arc<S> {
    fn get(&self, wallet: &WalletId) -> Result<Option<Versioned<PlayerProfile>>, StoreError> {
        (**self).get(wallet)
    }

    fn create(
        &self,
        wallet: &WalletId,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError> {
        (**self).create(wallet, profile)
    }

    fn compare_and_swap(
        &self,
        wallet: &WalletId,
        expected_version: u64,
        profile: PlayerProfile,
    ) -> Result<Versioned<PlayerProfile>, StoreError> {
        (**self).compare_and_swap(wallet, expected_version, profile)
    }

    fn all(&self) -> Result<Vec<PlayerProfile>, StoreError> {
        (**self).all()
    }
}

/// Runs `op` up to `attempts` times while it keeps losing races.
///
/// Each attempt must start from a fresh read. Any error other than a conflict
/// is returned immediately.
pub fn retry_on_conflict<T>(
    attempts: u32,
    mut op: impl FnMut() -> Result<T, GameError>,
) -> Result<T, GameError> {
    let attempts = attempts.max(1);
    let mut attempt = 1;
    loop {
        match op() {
            Err(err) if err.is_retryable() && attempt < attempts => {
                tracing::warn!(attempt, attempts, error = %err, "retrying after conflict");
                attempt += 1;
            }
            other => return other,
        }
    }
}
