//! HTTP handlers
//!
//! - [`order`]: authenticated order endpoints
//! - [`health`]: liveness and storage check
//! - `legacy`: legacy token diagnostics (`legacy-tokens` feature)

pub mod health;
#[cfg(feature = "legacy-tokens")]
pub mod legacy;
pub mod order;

pub use health::{HealthResponse, __path_health_check, health_check};
#[cfg(feature = "legacy-tokens")]
pub use legacy::{
    LegacyInspectData, LegacyInspectRequest, __path_inspect_legacy_token, inspect_legacy_token,
};
pub use order::{
    __path_cancel_order, __path_get_order, __path_list_orders, __path_update_order_status,
    cancel_order, get_order, list_orders, update_order_status,
};
