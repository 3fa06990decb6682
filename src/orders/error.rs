//! Order service error types
//!
//! Causes stay distinct here for logging and tests. What the caller sees is
//! [`OrderError::public_message`], which never says whether an order exists
//! for another user.

use axum::http::StatusCode;
use thiserror::Error;

use crate::gateway::types::error_codes;

#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Invalid order status: {0}")]
    InvalidStatus(String),

    #[error("Order not found")]
    NotFound,

    /// Zero rows matched the conditional status write
    #[error("Order status update rejected")]
    UpdateRejected,

    /// Zero rows matched the conditional cancel
    #[error("Order is not cancellable")]
    NotCancellable,

    #[error("Storage call timed out")]
    Timeout,

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<sqlx::Error> for OrderError {
    fn from(e: sqlx::Error) -> Self {
        OrderError::Storage(e.to_string())
    }
}

impl OrderError {
    /// User-facing message
    pub fn public_message(&self) -> &'static str {
        match self {
            OrderError::InvalidStatus(_) => "Invalid order status.",
            OrderError::NotFound => "Order not found.",
            OrderError::UpdateRejected => "Failed to update order status.",
            OrderError::NotCancellable => {
                "Unable to cancel order. Order may have already been processed."
            }
            OrderError::Timeout | OrderError::Storage(_) => {
                "The order service is temporarily unavailable."
            }
        }
    }

    /// Response envelope error code
    pub fn code(&self) -> i32 {
        match self {
            OrderError::InvalidStatus(_) => error_codes::INVALID_PARAMETER,
            OrderError::NotFound => error_codes::ORDER_NOT_FOUND,
            OrderError::UpdateRejected | OrderError::NotCancellable => {
                error_codes::ORDER_ACTION_REJECTED
            }
            OrderError::Timeout => error_codes::SERVICE_UNAVAILABLE,
            OrderError::Storage(_) => error_codes::INTERNAL_ERROR,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            OrderError::InvalidStatus(_) => StatusCode::BAD_REQUEST,
            OrderError::NotFound => StatusCode::NOT_FOUND,
            OrderError::UpdateRejected | OrderError::NotCancellable => StatusCode::CONFLICT,
            OrderError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            OrderError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
