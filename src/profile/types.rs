//! Player profile data structures.

use crate::catalog::FishRarity;
use crate::core::config::EngineConfig;
use crate::error::GameError;
use crate::progression::XpCurve;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

const MAX_WALLET_LENGTH: usize = 128;

/// Case-normalised wallet address, the primary key of a profile.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletId(String);

impl WalletId {
    /// Trims and lowercases an address. Rejects empty input and anything that is
    /// not `[a-z0-9._-]` after normalisation.
    pub fn parse(raw: &str) -> Result<Self, GameError> {
        let normalized = raw.trim().to_lowercase();
        let valid = !normalized.is_empty()
            && normalized.len() <= MAX_WALLET_LENGTH
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(GameError::InvalidWallet(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form for default display names: `0x1234...abcd`.
    pub fn truncated(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

impl fmt::Display for WalletId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for WalletId {
    type Error = GameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletId> for String {
    fn from(wallet: WalletId) -> Self {
        wallet.0
    }
}

/// One fish landed, frozen at catch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatchRecord {
    pub species_id: String,
    pub species_name: String,
    pub rarity: FishRarity,
    pub caught_at: DateTime<Utc>,
    pub xp_awarded: u64,
    /// The species' own currency reward, without any level-up bonus
    pub currency_awarded: u64,
    pub rod_id: String,
}

/// Persistent per-wallet game state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub wallet: WalletId,
    pub display_name: String,
    pub created_at: DateTime<Utc>,

    pub level: u32,
    pub xp: u64,
    pub balance: u64,

    pub equipped_rod_id: String,
    pub owned_rods: BTreeSet<String>,

    pub last_cast_at: Option<DateTime<Utc>>,
    pub total_casts: u64,
    pub total_fish_caught: u64,
    pub unique_species: BTreeSet<String>,
    #[serde(default)]
    pub catch_history: Vec<CatchRecord>,
}

impl PlayerProfile {
    /// A fresh profile seeded with the configured starter defaults.
    ///
    /// The level is derived from the starting XP so the two can never disagree.
    pub fn new(
        wallet: WalletId,
        display_name: String,
        config: &EngineConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let level = XpCurve::from_config(config).level_from_total_xp(config.starting_xp);
        let starter = config.starter_rod_id.clone();
        Self {
            wallet,
            display_name,
            created_at: now,
            level,
            xp: config.starting_xp,
            balance: config.starting_currency,
            equipped_rod_id: starter.clone(),
            owned_rods: BTreeSet::from([starter]),
            last_cast_at: None,
            total_casts: 0,
            total_fish_caught: 0,
            unique_species: BTreeSet::new(),
            catch_history: Vec::new(),
        }
    }

    pub fn owns_rod(&self, rod_id: &str) -> bool {
        self.owned_rods.contains(rod_id)
    }

    pub fn has_caught(&self, species_id: &str) -> bool {
        self.unique_species.contains(species_id)
    }

    pub fn last_catch(&self) -> Option<&CatchRecord> {
        self.catch_history.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_wallet_is_case_normalized() {
        let a = WalletId::parse("  0xAbCdEF0123456789 ").unwrap();
        let b = WalletId::parse("0xabcdef0123456789").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcdef0123456789");
    }

    #[test]
    fn test_wallet_rejects_garbage() {
        assert!(WalletId::parse("").is_err());
        assert!(WalletId::parse("   ").is_err());
        assert!(WalletId::parse("../etc/passwd").is_err());
        assert!(WalletId::parse("has space").is_err());
        assert!(WalletId::parse(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_wallet_truncated() {
        let wallet = WalletId::parse("0x1234567890abcdef1234").unwrap();
        assert_eq!(wallet.truncated(), "0x1234...1234");
        let short = WalletId::parse("alice").unwrap();
        assert_eq!(short.truncated(), "alice");
    }

    #[test]
    fn test_wallet_serde_normalizes() {
        let wallet: WalletId = serde_json::from_str("\"0xABC\"").unwrap();
        assert_eq!(wallet.as_str(), "0xabc");
        assert!(serde_json::from_str::<WalletId>("\"\"").is_err());
    }

    #[test]
    fn test_new_profile_has_starter_defaults() {
        let config = EngineConfig::default();
        let wallet = WalletId::parse("0xfeed").unwrap();
        let profile = PlayerProfile::new(wallet.clone(), "Angler".to_string(), &config, now());

        assert_eq!(profile.wallet, wallet);
        assert_eq!(profile.level, 1);
        assert_eq!(profile.xp, 0);
        assert_eq!(profile.balance, 100);
        assert_eq!(profile.equipped_rod_id, "starter");
        assert!(profile.owns_rod("starter"));
        assert_eq!(profile.owned_rods.len(), 1);
        assert!(profile.last_cast_at.is_none());
        assert_eq!(profile.total_casts, 0);
        assert!(profile.catch_history.is_empty());
        assert_eq!(profile.created_at, now());
    }

    #[test]
    fn test_new_profile_level_follows_starting_xp() {
        let config = EngineConfig {
            starting_xp: 260,
            ..Default::default()
        };
        let profile = PlayerProfile::new(
            WalletId::parse("0xbeef").unwrap(),
            "Pro".to_string(),
            &config,
            now(),
        );
        assert_eq!(profile.level, 3);
    }
}
