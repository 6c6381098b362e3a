//! POS Server - multi-tenant restaurant point-of-sale backend
//!
//! # Overview
//!
//! - **Database** (`db`): embedded SurrealDB storage, one namespace for all
//!   tenants, every record scoped by restaurant
//! - **Auth** (`auth`): JWT + Argon2, subscription gate
//! - **Drafts** (`drafts`): shared table carts with KOT history
//! - **Pricing** (`pricing`): per-space price resolution
//! - **Billing** (`billing`): bill totals and net-profit math
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module structure
//!
//! ```text
//! pos-server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # JWT, middleware, subscription gate
//! ├── db/            # models and repositories
//! ├── pricing/       # price resolver
//! ├── drafts/        # cart + KOT logic
//! ├── billing/       # bill math
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # errors, logging, money, time
//! ```

pub mod api;
pub mod auth;
pub mod billing;
pub mod core;
pub mod db;
pub mod drafts;
pub mod pricing;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use pricing::PriceResolver;
pub use utils::logger::{init_logger, init_logger_with_file};
pub use utils::{AppError, AppResponse, AppResult};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env, prepare the working directory and initialize logging
pub fn setup_environment(config: &Config) -> std::io::Result<()> {
    config.ensure_work_dir_structure()?;
    let logs_dir = config.logs_dir();
    init_logger_with_file(None, logs_dir.to_str());
    Ok(())
}
