//! Bearer token authentication.

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use refhub_models::{Actor, User, UserId};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: UserId,
    /// Issued at
    pub iat: i64,
    /// Expiration
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user_id: &UserId) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: user_id.clone(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("Token signing failed: {}", e)))
    }

    /// Verify a token's signature and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token validation failed: {}", e);
                ApiError::unauthorized("Invalid or expired token")
            })
    }
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

impl AuthUser {
    pub fn id(&self) -> &UserId {
        &self.user.id
    }

    /// The caller as seen by the access rules.
    pub fn actor(&self) -> Actor {
        Actor::from(&self.user)
    }
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::unauthorized("Access token required"))?;

        let claims = state.tokens.verify(bearer.token())?;

        // Tokens outlive deleted accounts
        let user = state
            .db
            .users()
            .get(&claims.user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

        Ok(AuthUser { user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_and_verify() {
        let tokens = TokenService::new(b"secret", Duration::from_secs(3600));
        let token = tokens.issue(&UserId::from("u1")).unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id, UserId::from("u1"));
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issuer = TokenService::new(b"secret", Duration::from_secs(3600));
        let other = TokenService::new(b"other", Duration::from_secs(3600));
        let token = issuer.issue(&UserId::from("u1")).unwrap();
        assert!(matches!(other.verify(&token), Err(ApiError::Unauthorized(_))));
    }

    #[test]
    fn test_expired_token_rejected() {
        let tokens = TokenService::new(b"secret", Duration::from_secs(3600));
        let now = Utc::now().timestamp();
        let claims = Claims {
            user_id: UserId::from("u1"),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        let tokens = TokenService::new(b"secret", Duration::from_secs(3600));
        assert!(tokens.verify("not.a.token").is_err());
    }
}
