//! Order request/response DTOs
//!
//! Views carry the display fields (label, badge, formatted amounts) next to
//! the raw values so clients render without re-implementing the rules.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::orders::{
    Order, OrderDetail, OrderItem, OrderStatus, OrderSummary, StatusBadge, format_amount,
    format_status, status_badge,
};

/// Status update request body
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// One of pending, processing, shipped, delivered, cancelled
    #[schema(example = "processing")]
    pub new_status: String,
}

/// Result of a status change
#[derive(Debug, Serialize, ToSchema)]
pub struct OrderActionData {
    #[schema(example = 42)]
    pub order_id: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderView {
    #[schema(example = 42)]
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    #[schema(example = "credit_card")]
    pub payment_method: String,
    #[schema(example = "Credit card")]
    pub payment_method_label: String,
    #[schema(value_type = String, example = "59.98")]
    pub total_amount: Decimal,
    #[schema(example = "59.98")]
    pub total_display: String,
    pub order_status: OrderStatus,
    #[schema(example = "Pending")]
    pub status_label: String,
    pub status_badge: StatusBadge,
    /// True only while the order is pending
    pub cancellable: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderView {
    fn from(o: Order) -> Self {
        let status = o.order_status.as_str();
        Self {
            id: o.id,
            payment_method_label: format_status(&o.payment_method),
            total_display: format_amount(o.total_amount),
            status_label: format_status(status),
            status_badge: status_badge(status),
            cancellable: o.order_status.can_cancel(),
            full_name: o.full_name,
            email: o.email,
            phone: o.phone,
            address: o.address,
            city: o.city,
            zip_code: o.zip_code,
            payment_method: o.payment_method,
            total_amount: o.total_amount,
            order_status: o.order_status,
            created_at: o.created_at,
            updated_at: o.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummaryView {
    #[serde(flatten)]
    pub order: OrderView,
    #[schema(example = 2)]
    pub item_count: i64,
}

impl From<OrderSummary> for OrderSummaryView {
    fn from(s: OrderSummary) -> Self {
        Self {
            order: s.order.into(),
            item_count: s.item_count,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderListView {
    pub count: usize,
    pub orders: Vec<OrderSummaryView>,
}

impl From<Vec<OrderSummary>> for OrderListView {
    fn from(rows: Vec<OrderSummary>) -> Self {
        Self {
            count: rows.len(),
            orders: rows.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderItemView {
    #[schema(example = "Widget")]
    pub product_name: String,
    #[schema(value_type = String, example = "29.99")]
    pub price: Decimal,
    #[schema(example = 2)]
    pub quantity: i32,
    #[schema(value_type = String, example = "59.98")]
    pub total: Decimal,
    pub price_display: String,
    pub total_display: String,
}

impl From<OrderItem> for OrderItemView {
    fn from(i: OrderItem) -> Self {
        Self {
            price_display: format_amount(i.price),
            total_display: format_amount(i.total),
            product_name: i.product_name,
            price: i.price,
            quantity: i.quantity,
            total: i.total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetailView {
    pub order: OrderView,
    pub items: Vec<OrderItemView>,
}

impl From<OrderDetail> for OrderDetailView {
    fn from(d: OrderDetail) -> Self {
        Self {
            order: d.order.into(),
            items: d.items.into_iter().map(Into::into).collect(),
        }
    }
}
