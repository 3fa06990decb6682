//! Order Service - business logic for a shopper's orders
//!
//! The caller's user id is resolved by the auth layer and passed to every
//! operation. Each storage call runs under a bounded timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::error::OrderError;
use super::models::{OrderDetail, OrderStatus, OrderSummary, TransitionPolicy};
use super::repository::OrderRepository;

pub const STATUS_UPDATED_MSG: &str = "Order status updated successfully.";
pub const ORDER_CANCELLED_MSG: &str = "Order cancelled successfully.";

pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    policy: TransitionPolicy,
    storage_timeout: Duration,
}

impl OrderService {
    pub fn new(
        repo: Arc<dyn OrderRepository>,
        policy: TransitionPolicy,
        storage_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            policy,
            storage_timeout,
        }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, OrderError>
    where
        F: Future<Output = Result<T, OrderError>>,
    {
        match tokio::time::timeout(self.storage_timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(OrderError::Timeout),
        }
    }

    /// All orders of `user_id`, newest first
    pub async fn list_orders(&self, user_id: i64) -> Result<Vec<OrderSummary>, OrderError> {
        let orders = self
            .bounded(self.repo.list_for_user(user_id))
            .await
            .inspect_err(|e| log_failure("list_orders", user_id, None, e))?;
        tracing::debug!(user_id, count = orders.len(), "Listed orders");
        Ok(orders)
    }

    /// Order with its items; another user's order is reported as not found
    pub async fn get_order(&self, user_id: i64, order_id: i64) -> Result<OrderDetail, OrderError> {
        self.load_detail(user_id, order_id)
            .await
            .inspect_err(|e| log_failure("get_order", user_id, Some(order_id), e))
    }

    async fn load_detail(&self, user_id: i64, order_id: i64) -> Result<OrderDetail, OrderError> {
        let order = self
            .bounded(self.repo.find_for_user(user_id, order_id))
            .await?
            .ok_or(OrderError::NotFound)?;
        let items = self.bounded(self.repo.items_for_order(order.id)).await?;
        Ok(OrderDetail { order, items })
    }

    /// Set a new status in one conditional write.
    ///
    /// Fails with `InvalidStatus` before touching storage if `new_status` is
    /// not one of the five known values. Unknown order, foreign order and a
    /// transition the policy forbids all fail as `UpdateRejected`.
    pub async fn update_status(
        &self,
        user_id: i64,
        order_id: i64,
        new_status: &str,
    ) -> Result<&'static str, OrderError> {
        self.apply_status(user_id, order_id, new_status)
            .await
            .inspect_err(|e| log_failure("update_status", user_id, Some(order_id), e))
    }

    async fn apply_status(
        &self,
        user_id: i64,
        order_id: i64,
        new_status: &str,
    ) -> Result<&'static str, OrderError> {
        let target: OrderStatus = new_status.parse()?;
        let from = target.allowed_predecessors(self.policy);
        let updated = self
            .bounded(self.repo.transition(user_id, order_id, &from, target))
            .await?;
        if !updated {
            return Err(OrderError::UpdateRejected);
        }
        tracing::info!(user_id, order_id, status = %target, "Order status updated");
        Ok(STATUS_UPDATED_MSG)
    }

    /// Cancel a pending order in one conditional write
    pub async fn cancel_order(
        &self,
        user_id: i64,
        order_id: i64,
    ) -> Result<&'static str, OrderError> {
        let cancelled = self
            .bounded(self.repo.transition(
                user_id,
                order_id,
                &[OrderStatus::Pending],
                OrderStatus::Cancelled,
            ))
            .await
            .inspect_err(|e| log_failure("cancel_order", user_id, Some(order_id), e))?;

        if !cancelled {
            let err = OrderError::NotCancellable;
            log_failure("cancel_order", user_id, Some(order_id), &err);
            return Err(err);
        }
        tracing::info!(user_id, order_id, "Order cancelled");
        Ok(ORDER_CANCELLED_MSG)
    }

    /// Storage liveness, bounded by the same timeout
    pub async fn ping(&self) -> Result<(), OrderError> {
        self.bounded(self.repo.ping()).await
    }
}

fn log_failure(op: &str, user_id: i64, order_id: Option<i64>, err: &OrderError) {
    match err {
        OrderError::Storage(_) | OrderError::Timeout => {
            tracing::error!(op, user_id, ?order_id, error = %err, "Order storage failure")
        }
        _ => tracing::warn!(op, user_id, ?order_id, error = %err, "Order request rejected"),
    }
}
