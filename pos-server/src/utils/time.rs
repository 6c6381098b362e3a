//! Time helpers
//!
//! All persisted timestamps are milliseconds since the Unix epoch.

use chrono::Utc;

/// Current time in milliseconds since epoch
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
