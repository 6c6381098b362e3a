//! Bill finalization math
//!
//! Pure functions shared by the bill handlers: freezing submitted lines into
//! bill lines ([`finalize`]) and folding finished bills into net-profit
//! figures ([`stats`]). Price resolution and persistence stay in the
//! handler/repository layers.

pub mod finalize;
pub mod stats;

pub use finalize::{compute_bill_totals, freeze_line};
pub use stats::{BillStats, NetProfitStats, bill_stats, net_profit};

use thiserror::Error;

/// Bill validation errors
#[derive(Debug, Error)]
pub enum BillingError {
    #[error("Invalid bill line: {0}")]
    InvalidLine(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}

impl From<BillingError> for crate::utils::AppError {
    fn from(e: BillingError) -> Self {
        crate::utils::AppError::validation(e.to_string())
    }
}
