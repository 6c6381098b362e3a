//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`auth`] - registration, login, current user
//! - [`upload`] - base64 image upload
//! - [`spaces`] - seating space management
//! - [`tables`] - dining table management
//! - [`categories`] - menu category management
//! - [`menu_items`] - menu items and per-space price overrides
//! - [`drafts`] - table cart drafts and KOT history
//! - [`bills`] - bill finalization and reporting
//! - [`plans`] - subscription plans and activation
//! - [`staff`] - staff management (admin only)

pub mod auth;
pub mod health;
pub mod upload;

// Data model APIs
pub mod bills;
pub mod categories;
pub mod drafts;
pub mod menu_items;
pub mod plans;
pub mod spaces;
pub mod staff;
pub mod tables;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
