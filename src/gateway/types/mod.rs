//! Gateway types module
//!
//! ## Input Types
//! - [`UpdateStatusRequest`]: status update body
//!
//! ## Output Types
//! - [`OrderListView`], [`OrderDetailView`]: order views with display fields
//! - [`ApiResponse<T>`]: Unified API response wrapper
//!
//! ## Submodules
//! - [`order`]: Order request/response DTOs
//! - [`response`]: Response types and error codes

pub mod order;
pub mod response;

// Re-export commonly used types at module root
pub use order::{
    OrderActionData, OrderDetailView, OrderItemView, OrderListView, OrderSummaryView, OrderView,
    UpdateStatusRequest,
};
pub use response::{ApiError, ApiResponse, ApiResult, error_codes, ok};
