use std::sync::Arc;

use crate::auth::TokenService;
use crate::orders::OrderService;

/// Gateway application state (shared)
#[derive(Clone)]
pub struct AppState {
    /// Order management
    pub orders: Arc<OrderService>,
    /// Bearer token verification
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(orders: Arc<OrderService>, tokens: Arc<TokenService>) -> Self {
        Self { orders, tokens }
    }
}
