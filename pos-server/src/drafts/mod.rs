//! Table draft logic
//!
//! Pure functions for the shared table-cart workflow: stamping and totalling
//! a submitted cart ([`cart`]) and recording KOT history ([`kot`]). Storage
//! is the repository's concern; everything here operates on plain values so
//! it can be tested without a database.

pub mod cart;
pub mod kot;

pub use cart::{apply_save, cleared_draft};
pub use kot::{cart_deltas, mark_printed, send_to_kitchen};

use thiserror::Error;

/// Draft validation errors
#[derive(Debug, Error)]
pub enum DraftError {
    #[error("Invalid cart line: {0}")]
    InvalidLine(String),
}

impl From<DraftError> for crate::utils::AppError {
    fn from(e: DraftError) -> Self {
        crate::utils::AppError::validation(e.to_string())
    }
}
