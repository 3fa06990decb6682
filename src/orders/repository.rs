//! Repository trait for order data access
//!
//! Every state change goes through [`OrderRepository::transition`], a single
//! conditional write. Ownership and the expected current status are part of
//! the same write, so two concurrent requests cannot both pass the check.

use async_trait::async_trait;

use super::error::OrderError;
use super::models::{Order, OrderItem, OrderStatus, OrderSummary};

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Orders owned by `user_id`, newest first
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<OrderSummary>, OrderError>;

    /// The order, only if it belongs to `user_id`
    async fn find_for_user(&self, user_id: i64, order_id: i64)
    -> Result<Option<Order>, OrderError>;

    /// Line items in insertion order
    async fn items_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>, OrderError>;

    /// Atomic CAS: set `to` only if the order belongs to `user_id` and its
    /// current status is one of `from`.
    ///
    /// Returns true if a row was updated.
    async fn transition(
        &self,
        user_id: i64,
        order_id: i64,
        from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<bool, OrderError>;

    /// Storage liveness probe
    async fn ping(&self) -> Result<(), OrderError>;
}
