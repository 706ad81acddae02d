//! Request extractors that report rejections as [`ApiError`].

use axum::extract::{FromRequest, FromRequestParts};
use validator::Validate;

use crate::error::{ApiError, ApiResult};

/// JSON body. Malformed bodies and unknown enum values become 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl<T: Validate> ApiJson<T> {
    /// Run the body's `validator` rules and unwrap it.
    pub fn validated(self) -> ApiResult<T> {
        self.0.validate()?;
        Ok(self.0)
    }
}

/// Query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);
