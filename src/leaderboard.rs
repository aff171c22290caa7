//! Player rankings.
//!
//! Profiles are ordered by one metric, highest first. Ties go to the player
//! who registered earlier, then to the lower wallet id so the order is total.

use crate::core::constants::LEADERBOARD_PAGE_SIZE;
use crate::profile::{PlayerProfile, WalletId};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// What the board is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Xp,
    Level,
    FishCaught,
}

impl LeaderboardSort {
    fn metric(self, profile: &PlayerProfile) -> u64 {
        match self {
            LeaderboardSort::Xp => profile.xp,
            LeaderboardSort::Level => profile.level as u64,
            LeaderboardSort::FishCaught => profile.total_fish_caught,
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LeaderboardSort::Xp => "xp",
            LeaderboardSort::Level => "level",
            LeaderboardSort::FishCaught => "fish",
        })
    }
}

impl FromStr for LeaderboardSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xp" => Ok(LeaderboardSort::Xp),
            "level" => Ok(LeaderboardSort::Level),
            "fish" | "fish_caught" | "caught" => Ok(LeaderboardSort::FishCaught),
            other => Err(format!("unknown leaderboard sort: {} (use xp, level or fish)", other)),
        }
    }
}

/// One row of the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: usize,
    pub wallet: WalletId,
    pub display_name: String,
    pub level: u32,
    pub xp: u64,
    pub total_fish_caught: u64,
    pub unique_species: usize,
}

fn compare(sort: LeaderboardSort, a: &PlayerProfile, b: &PlayerProfile) -> Ordering {
    sort.metric(b)
        .cmp(&sort.metric(a))
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.wallet.cmp(&b.wallet))
}

/// The full board, best first.
pub fn rank(profiles: &[PlayerProfile], sort: LeaderboardSort) -> Vec<LeaderboardEntry> {
    let mut ordered: Vec<&PlayerProfile> = profiles.iter().collect();
    ordered.sort_by(|a, b| compare(sort, a, b));
    ordered
        .into_iter()
        .enumerate()
        .map(|(i, p)| LeaderboardEntry {
            rank: i + 1,
            wallet: p.wallet.clone(),
            display_name: p.display_name.clone(),
            level: p.level,
            xp: p.xp,
            total_fish_caught: p.total_fish_caught,
            unique_species: p.unique_species.len(),
        })
        .collect()
}

/// A player's standing: one more than the number of players ordered ahead of
/// them, so it always equals their row in [`rank`].
pub fn rank_of(
    profiles: &[PlayerProfile],
    wallet: &WalletId,
    sort: LeaderboardSort,
) -> Option<usize> {
    let me = profiles.iter().find(|p| &p.wallet == wallet)?;
    let ahead = profiles
        .iter()
        .filter(|p| compare(sort, p, me) == Ordering::Less)
        .count();
    Some(ahead + 1)
}

/// Page `page` (0-based) of a ranked board. Out-of-range pages are empty.
pub fn page(entries: &[LeaderboardEntry], page: usize, page_size: usize) -> &[LeaderboardEntry] {
    let size = if page_size == 0 {
        LEADERBOARD_PAGE_SIZE
    } else {
        page_size
    };
    let start = page.saturating_mul(size).min(entries.len());
    let end = start.saturating_add(size).min(entries.len());
    &entries[start..end]
}
