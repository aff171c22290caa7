// Cast timing
pub const CAST_COOLDOWN_MS: i64 = 10 * 60 * 1000; // 10 minutes

// Catch odds
pub const BASE_SUCCESS_RATE: f64 = 70.0; // percent, before rod bonus

// Starting values for new players
pub const STARTING_CURRENCY: u64 = 100;
pub const STARTING_ROD_ID: &str = "starter";
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_XP: u64 = 0;

// XP and leveling
pub const XP_CURVE_BASE: f64 = 100.0; // XP needed for level 2
pub const XP_CURVE_SCALE: f64 = 1.5; // each level needs 1.5x the previous
pub const LEVEL_UP_CURRENCY_BONUS: u64 = 50; // per level gained

// Players and leaderboard
pub const MAX_DISPLAY_NAME_LENGTH: usize = 20;
pub const LEADERBOARD_PAGE_SIZE: usize = 50;

// Messages
pub const MISS_MESSAGE: &str = "Nothing bit... Try again!";
