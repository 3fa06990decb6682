//! Bearer token issue/validate (HS256)

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// Token lifetime. Fixed policy, not configurable per call.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    #[serde(deserialize_with = "subject_from_string_or_int")]
    pub sub: String, // Subject (user_id as string; older issuers wrote an integer)
    pub email: String,
    pub role: String,
    pub name: String,
    pub iat: i64, // Issued at
    pub exp: i64, // Expiration time (UTC timestamp)
}

/// Accept `"sub": "7"` and `"sub": 7`
fn subject_from_string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Subject {
        Text(String),
        Int(i64),
    }

    Ok(match Subject::deserialize(deserializer)? {
        Subject::Text(s) => s,
        Subject::Int(n) => n.to_string(),
    })
}

impl Claims {
    /// Subject parsed back into a user id
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// User record a token is issued for
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenUser {
    pub id: i64,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub role: String,
    #[validate(length(min = 1))]
    pub name: String,
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token user: {0}")]
    InvalidUser(#[from] validator::ValidationErrors),

    #[error("Failed to encode token: {0}")]
    Encode(#[from] jsonwebtoken::errors::Error),
}

/// Issues and validates HS256 tokens with a shared secret loaded at startup
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against our own clock in `validate_at`
        validation.validate_exp = false;
        validation.leeway = 0;
        // sub and iat are enforced by `Claims` itself; the library check only
        // recognises a string sub
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token valid for one hour from now
    pub fn issue(&self, user: &TokenUser) -> Result<String, TokenError> {
        self.issue_at(user, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `issued_at`
    pub fn issue_at(&self, user: &TokenUser, issued_at: i64) -> Result<String, TokenError> {
        user.validate()?;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.clone(),
            name: user.name.clone(),
            iat: issued_at,
            exp: issued_at + TOKEN_TTL_SECS,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        tracing::debug!(user_id = user.id, exp = claims.exp, "Issued token");
        Ok(token)
    }

    /// Verify signature and expiry. Any failure yields `None`.
    pub fn validate(&self, token: &str) -> Option<Claims> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Validate as if the current time were `now`. Expired when `now >= exp`.
    pub fn validate_at(&self, token: &str, now: i64) -> Option<Claims> {
        let claims = match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected");
                return None;
            }
        };

        if now >= claims.exp {
            tracing::debug!(sub = %claims.sub, exp = claims.exp, "Token expired");
            return None;
        }
        Some(claims)
    }
}
