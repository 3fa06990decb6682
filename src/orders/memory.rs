//! In-memory order store
//!
//! Used by the `memory` storage backend and by tests. Each order lives in
//! one DashMap entry together with its items; `get_mut` holds the shard lock
//! for the whole check-and-set, which makes `transition` atomic.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;

use super::error::OrderError;
use super::models::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderSummary};
use super::repository::OrderRepository;

struct StoredOrder {
    order: Order,
    items: Vec<OrderItem>,
}

pub struct MemoryOrderRepository {
    orders: DashMap<i64, StoredOrder>,
    id_gen: AtomicI64,
}

impl Default for MemoryOrderRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOrderRepository {
    pub fn new() -> Self {
        Self {
            orders: DashMap::new(),
            id_gen: AtomicI64::new(1),
        }
    }

    /// Insert an order with a storage-assigned id
    pub fn insert(&self, new: NewOrder, items: Vec<NewOrderItem>) -> i64 {
        let id = self.id_gen.fetch_add(1, Ordering::SeqCst);
        self.insert_with_id(id, new, items);
        id
    }

    /// Insert an order under a fixed id (fixtures). Later generated ids skip past it.
    pub fn insert_with_id(&self, id: i64, new: NewOrder, items: Vec<NewOrderItem>) {
        self.id_gen.fetch_max(id + 1, Ordering::SeqCst);

        let items = items
            .into_iter()
            .map(|i| OrderItem {
                order_id: id,
                total: i.total(),
                product_name: i.product_name,
                price: i.price,
                quantity: i.quantity,
            })
            .collect();

        let order = Order {
            id,
            user_id: new.user_id,
            full_name: new.full_name,
            email: new.email,
            phone: new.phone,
            address: new.address,
            city: new.city,
            zip_code: new.zip_code,
            payment_method: new.payment_method,
            total_amount: new.total_amount,
            order_status: new.order_status,
            created_at: new.created_at,
            updated_at: None,
        };

        self.orders.insert(id, StoredOrder { order, items });
    }

    /// Demo data for the memory backend: user 7 owns pending order 42 and
    /// shipped order 43, user 8 owns pending order 44.
    pub fn seed_demo(&self) {
        let base = Utc::now();
        let snapshot = |user_id: i64, name: &str, total: Decimal, status: OrderStatus, age_hours: i64| NewOrder {
            user_id,
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            phone: "555-0100".to_string(),
            address: "1 Main St".to_string(),
            city: "Springfield".to_string(),
            zip_code: "12345".to_string(),
            payment_method: "cash_on_delivery".to_string(),
            total_amount: total,
            order_status: status,
            created_at: base - chrono::Duration::hours(age_hours),
        };
        let widget = NewOrderItem {
            product_name: "Widget".to_string(),
            price: Decimal::new(2999, 2),
            quantity: 2,
        };
        let gadget = NewOrderItem {
            product_name: "Gadget".to_string(),
            price: Decimal::new(1250, 2),
            quantity: 1,
        };

        self.insert_with_id(
            42,
            snapshot(7, "Ada Shopper", Decimal::new(7248, 2), OrderStatus::Pending, 1),
            vec![widget.clone(), gadget.clone()],
        );
        self.insert_with_id(
            43,
            snapshot(7, "Ada Shopper", Decimal::new(1250, 2), OrderStatus::Shipped, 48),
            vec![gadget],
        );
        self.insert_with_id(
            44,
            snapshot(8, "Bob Buyer", Decimal::new(5998, 2), OrderStatus::Pending, 2),
            vec![widget],
        );
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrderRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<OrderSummary>, OrderError> {
        let mut rows: Vec<OrderSummary> = self
            .orders
            .iter()
            .filter(|e| e.order.user_id == user_id)
            .map(|e| OrderSummary {
                order: e.order.clone(),
                item_count: e.items.len() as i64,
            })
            .collect();

        rows.sort_by(|a, b| {
            b.order
                .created_at
                .cmp(&a.order.created_at)
                .then(b.order.id.cmp(&a.order.id))
        });
        Ok(rows)
    }

    async fn find_for_user(
        &self,
        user_id: i64,
        order_id: i64,
    ) -> Result<Option<Order>, OrderError> {
        Ok(self
            .orders
            .get(&order_id)
            .filter(|e| e.order.user_id == user_id)
            .map(|e| e.order.clone()))
    }

    async fn items_for_order(&self, order_id: i64) -> Result<Vec<OrderItem>, OrderError> {
        Ok(self
            .orders
            .get(&order_id)
            .map(|e| e.items.clone())
            .unwrap_or_default())
    }

    async fn transition(
        &self,
        user_id: i64,
        order_id: i64,
        from: &[OrderStatus],
        to: OrderStatus,
    ) -> Result<bool, OrderError> {
        let Some(mut entry) = self.orders.get_mut(&order_id) else {
            return Ok(false);
        };
        let order = &mut entry.order;
        if order.user_id != user_id || !from.contains(&order.order_status) {
            return Ok(false);
        }
        order.order_status = to;
        order.updated_at = Some(Utc::now());
        Ok(true)
    }

    async fn ping(&self) -> Result<(), OrderError> {
        Ok(())
    }
}
