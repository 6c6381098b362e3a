//! Space-aware price resolution
//!
//! An item's charged price depends on where the guest sits: an active
//! override for the (item, space) pair wins, then the item's base price,
//! then the legacy flat price, then zero. Deterministic, no caching.

mod resolver;

pub use resolver::{PriceResolver, resolve_price};
