//! Rod shop: purchase and equip transitions plus storefront listings.

pub mod logic;

pub use logic::{equip, listings, purchase, RodListing, RodStatus};
