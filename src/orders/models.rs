//! Order data models

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::OrderError;

// ============================================================================
// Order Status
// ============================================================================

/// Order lifecycle status
///
/// Stored as lowercase text in `orders.order_status`.
/// Terminal states: DELIVERED, CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Only pending orders may be cancelled by the shopper
    #[inline]
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    /// Statuses an order may be in for a move to `self` under `policy`.
    pub fn allowed_predecessors(&self, policy: TransitionPolicy) -> Vec<OrderStatus> {
        match policy {
            TransitionPolicy::Permissive => Self::ALL.to_vec(),
            TransitionPolicy::Strict => match self {
                OrderStatus::Pending => vec![],
                OrderStatus::Processing => vec![OrderStatus::Pending],
                OrderStatus::Shipped => vec![OrderStatus::Processing],
                OrderStatus::Delivered => vec![OrderStatus::Shipped],
                OrderStatus::Cancelled => vec![OrderStatus::Pending, OrderStatus::Processing],
            },
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus, policy: TransitionPolicy) -> bool {
        next.allowed_predecessors(policy).contains(self)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }
}

/// Which status changes `update_status` accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Forward-only lifecycle; delivered and cancelled are terminal
    #[default]
    Strict,
    /// Any status may be set from any status
    Permissive,
}

// ============================================================================
// Orders and Items
// ============================================================================

/// One purchase, with the shipping/payment snapshot taken at checkout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// List row: an order plus the number of its line items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub order: Order,
    pub item_count: i64,
}

/// One purchased line. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderItem {
    pub order_id: i64,
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub total: Decimal,
}

/// Order together with its items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetail {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

/// Checkout snapshot used to seed the in-memory store
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub payment_method: String,
    pub total_amount: Decimal,
    pub order_status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Line item of a [`NewOrder`]
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_name: String,
    pub price: Decimal,
    pub quantity: i32,
}

impl NewOrderItem {
    pub fn total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}
