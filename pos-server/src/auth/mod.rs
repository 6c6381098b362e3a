//! Authentication and authorization
//!
//! JWT issuing/validation, the request middleware that enforces it, and the
//! subscription gate that blocks mutating requests for lapsed restaurants.

pub mod jwt;
pub mod middleware;
pub mod subscription;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use subscription::{SubscriptionGate, require_subscription};
