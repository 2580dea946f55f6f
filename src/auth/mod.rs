//! Bearer-token authentication.
//!
//! `JwtSettings` owns the signing key and validation policy, `AuthMiddleware`
//! applies it to a scope, and `AuthenticatedUser` gives handlers the caller.

pub mod extractors;
pub mod middleware;
pub mod token;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use token::{Claims, JwtSettings, AUDIENCE};
