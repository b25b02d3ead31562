//! Authentication and authorization
//!
//! - [`JwtService`] issues and validates tokens
//! - [`CurrentUser`] is the authenticated caller
//! - [`require_auth`], [`require_permission`], [`require_admin`] guard routes

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod permissions;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_permission};
