//! Player profiles keyed by wallet.

pub mod naming;
pub mod types;

pub use naming::validate_display_name;
pub use types::{CatchRecord, PlayerProfile, WalletId};
