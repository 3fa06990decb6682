//! Order management
//!
//! A shopper's orders: list, detail with line items, status update and
//! cancellation of pending orders. Storage is PostgreSQL or in-memory.

pub mod display;
pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use display::{StatusBadge, format_amount, format_status, status_badge};
pub use error::OrderError;
pub use memory::MemoryOrderRepository;
pub use models::{
    NewOrder, NewOrderItem, Order, OrderDetail, OrderItem, OrderStatus, OrderSummary,
    TransitionPolicy,
};
pub use postgres::PgOrderRepository;
pub use repository::OrderRepository;
pub use service::OrderService;
