//! Legacy unsigned identity tokens
//!
//! [SECURITY WARNING] A legacy token is base64 of a JSON object such as
//! `{"user_id": 7}`. There is no signature and no expiry: anyone can mint one
//! for any user id. Nothing here may be used to authorize a request. The
//! auth middleware only accepts signed tokens from [`super::TokenService`].
//!
//! Kept for migration diagnostics; the HTTP surface is compiled only with the
//! `legacy-tokens` feature.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use serde_json::Value;

fn decode_payload(token: &str) -> Option<Value> {
    let token = token.trim();
    let bytes = STANDARD
        .decode(token)
        .or_else(|_| STANDARD_NO_PAD.decode(token))
        .ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// `user_id` as a JSON integer or a string of digits
pub fn legacy_user_id(token: &str) -> Option<i64> {
    match decode_payload(token)?.get("user_id")? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// True when the blob decodes to JSON with a numeric `user_id`: any JSON
/// number, or a string holding a finite decimal or exponent number.
/// Says nothing about who created it.
pub fn legacy_is_valid(token: &str) -> bool {
    let Some(payload) = decode_payload(token) else {
        return false;
    };
    match payload.get("user_id") {
        Some(Value::Number(_)) => true,
        Some(Value::String(s)) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}
