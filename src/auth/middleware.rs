use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::token::Claims;
use crate::gateway::{state::AppState, types::ApiError};

/// Caller identity resolved from a valid bearer token
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
    pub role: String,
    pub name: String,
}

impl AuthenticatedUser {
    fn from_claims(claims: Claims) -> Option<Self> {
        Some(Self {
            user_id: claims.user_id()?,
            email: claims.email,
            role: claims.role,
            name: claims.name,
        })
    }
}

/// Extract the token from `Authorization: Bearer <token>`. Scheme is case-insensitive.
pub fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub async fn jwt_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    // 1. Extract Authorization header
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::missing_auth("Missing Authorization header"))?;

    let token = bearer_token(auth_header)
        .ok_or_else(|| ApiError::unauthorized("Invalid token format"))?;

    // 2. Verify token; the cause of a rejection is not reported
    let user = state
        .tokens
        .validate(token)
        .and_then(AuthenticatedUser::from_claims)
        .ok_or_else(|| ApiError::unauthorized("Invalid or expired token"))?;

    // 3. Inject caller identity
    tracing::debug!(user_id = user.user_id, "Authenticated request");
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Bearer   abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("BEARER abc"), Some("abc"));
        assert_eq!(bearer_token("Bearerabc"), None);
        assert_eq!(bearer_token("Bearer"), None);
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let claims = Claims {
            sub: "ada".to_string(),
            email: "ada@example.com".to_string(),
            role: "customer".to_string(),
            name: "Ada".to_string(),
            iat: 0,
            exp: 3600,
        };
        assert!(AuthenticatedUser::from_claims(claims).is_none());
    }
}
