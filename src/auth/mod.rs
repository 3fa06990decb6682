//! Bearer token authentication
//!
//! - [`token`]: HS256 token issue/validate with a fixed one-hour lifetime
//! - [`middleware`]: axum layer resolving the caller from a bearer token
//! - [`legacy`]: unsigned legacy tokens, diagnostics only

pub mod legacy;
pub mod middleware;
pub mod token;

pub use middleware::{AuthenticatedUser, jwt_auth_middleware};
pub use token::{Claims, TOKEN_TTL_SECS, TokenError, TokenService, TokenUser};
