//! Display helpers for order views
//!
//! Pure functions. They take raw strings so a status value that is not (yet)
//! known to [`OrderStatus`](super::models::OrderStatus) still renders.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use utoipa::ToSchema;

/// Visual category of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Warning,
    Info,
    Primary,
    Success,
    Danger,
    /// Unknown or other status
    Secondary,
}

pub fn status_badge(status: &str) -> StatusBadge {
    match status {
        "pending" => StatusBadge::Warning,
        "processing" => StatusBadge::Info,
        "shipped" => StatusBadge::Primary,
        "delivered" => StatusBadge::Success,
        "cancelled" => StatusBadge::Danger,
        _ => StatusBadge::Secondary,
    }
}

/// `"cash_on_delivery"` -> `"Cash on delivery"`
pub fn format_status(status: &str) -> String {
    let spaced = status.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Two decimals with thousands separators: `1234.5` -> `"1,234.50"`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}
