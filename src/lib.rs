//! Storefront Orders - order history and cancellation service
//!
//! # Modules
//!
//! - [`orders`] - Order model, status lifecycle, storage and service
//! - [`auth`] - HS256 bearer tokens and the request auth layer
//! - [`gateway`] - axum router, handlers and OpenAPI docs
//! - [`config`] - YAML configuration with environment overrides
//! - [`db`] - PostgreSQL pool
//! - [`logging`] - tracing subscriber setup

pub mod auth;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod orders;

// Convenient re-exports at crate root
pub use auth::{AuthenticatedUser, Claims, TokenService, TokenUser};
pub use config::AppConfig;
pub use gateway::{build_router, run_server, state::AppState};
pub use orders::{OrderError, OrderService, OrderStatus, TransitionPolicy};
