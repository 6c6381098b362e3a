//! Utility module - shared helpers and types
//!
//! # Contents
//!
//! - [`AppError`] / [`AppResponse`] - unified error and response types
//! - [`logger`] - tracing initialization
//! - [`money`] - Decimal precision helpers for monetary math
//! - [`time`] - millisecond timestamps

pub mod error;
pub mod logger;
pub mod money;
pub mod time;

pub use error::{AppError, AppResponse, AppResult};
