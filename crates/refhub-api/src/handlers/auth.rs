//! Signup, login and current-user handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use refhub_models::{CompanyId, NewUser, Profile, Role, UserSummary};
use refhub_store::StoreError;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::metrics::record_auth_event;
use crate::services::{hash_password, verify_password};
use crate::state::AppState;

/// Signup request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

/// Login request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Token response for signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserSummary,
    pub token: String,
}

/// Current user response.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserSummary,
    pub profile: Option<Profile>,
}

/// Register a new account.
pub async fn signup(
    State(state): State<AppState>,
    body: ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let request = body.validated()?;
    let email = request.email.trim().to_string();

    if state.db.users().find_by_email(&email).await?.is_some() {
        record_auth_event("signup", "duplicate");
        return Err(ApiError::bad_request("User already exists"));
    }

    let password_hash = hash_password(request.password).await?;
    let user = state
        .db
        .users()
        .create(NewUser {
            email,
            password_hash,
            role: request.role,
            company_id: request.company_id,
        })
        .await
        .map_err(|e| match e {
            // Lost a race with a concurrent signup
            StoreError::AlreadyExists(msg) => ApiError::bad_request(msg),
            other => other.into(),
        })?;

    let token = state.tokens.issue(&user.id)?;
    record_auth_event("signup", "ok");
    info!("User {} signed up as {}", user.id, user.role);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: UserSummary::from(&user),
            token,
        }),
    ))
}

/// Exchange credentials for a token.
pub async fn login(
    State(state): State<AppState>,
    body: ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let request = body.validated()?;

    let Some(user) = state.db.users().find_by_email(request.email.trim()).await? else {
        record_auth_event("login", "unknown_user");
        return Err(ApiError::unauthorized("Invalid credentials"));
    };

    if !verify_password(request.password, user.password_hash.clone()).await? {
        record_auth_event("login", "bad_password");
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = state.tokens.issue(&user.id)?;
    record_auth_event("login", "ok");

    Ok(Json(AuthResponse {
        user: UserSummary::from(&user),
        token,
    }))
}

/// The authenticated user and their profile, if any.
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<MeResponse>> {
    let profile = state.db.profiles().get_by_user(auth.id()).await?;

    Ok(Json(MeResponse {
        user: UserSummary::from(&auth.user),
        profile,
    }))
}
