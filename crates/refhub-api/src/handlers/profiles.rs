//! Profile handlers.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use refhub_models::{NewProfile, Profile, ProfilePatch};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::ApiJson;
use crate::metrics::record_resume_upload;
use crate::state::AppState;

/// Multipart field carrying the resume file.
const RESUME_FIELD: &str = "resume";

/// Profile creation request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub full_name: String,
    pub resume_url: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub experience: Option<u32>,
    pub education: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
}

impl From<CreateProfileRequest> for NewProfile {
    fn from(r: CreateProfileRequest) -> Self {
        Self {
            full_name: r.full_name,
            resume_url: r.resume_url,
            skills: r.skills,
            experience: r.experience,
            education: r.education,
            portfolio_url: r.portfolio_url,
            bio: r.bio,
        }
    }
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub full_name: Option<String>,
    pub resume_url: Option<String>,
    pub skills: Option<Vec<String>>,
    pub experience: Option<u32>,
    pub education: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub portfolio_url: Option<String>,
    pub bio: Option<String>,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(r: UpdateProfileRequest) -> Self {
        Self {
            full_name: r.full_name,
            resume_url: r.resume_url,
            skills: r.skills,
            experience: r.experience,
            education: r.education,
            portfolio_url: r.portfolio_url,
            bio: r.bio,
        }
    }
}

/// Resume upload response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUploadResponse {
    pub resume_url: String,
}

/// Create the caller's profile.
pub async fn create_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    body: ApiJson<CreateProfileRequest>,
) -> ApiResult<(StatusCode, Json<Profile>)> {
    let request = body.validated()?;
    let profile = state
        .db
        .profiles()
        .create(auth.id(), request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

/// Update the caller's profile.
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    body: ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<Profile>> {
    let request = body.validated()?;
    let profile = state
        .db
        .profiles()
        .update(auth.id(), request.into())
        .await?;
    Ok(Json(profile))
}

/// Store an uploaded resume and attach it to the caller's profile.
pub async fn upload_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<ResumeUploadResponse>> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(RESUME_FIELD) {
            let content_type = field.content_type().map(str::to_string);
            // Reject by type before buffering the body
            state.resumes.check(content_type.as_deref(), 0)?;
            let data = field.bytes().await?;
            upload = Some((content_type, data));
        } else {
            field.bytes().await?;
        }
    }

    let (content_type, data) = upload.ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let stored = state.resumes.save(content_type.as_deref(), &data).await?;
    record_resume_upload(stored.size);

    let profiles = state.db.profiles();
    if profiles.get_by_user(auth.id()).await?.is_some() {
        profiles
            .update(
                auth.id(),
                ProfilePatch {
                    resume_url: Some(stored.url.clone()),
                    ..Default::default()
                },
            )
            .await?;
    }

    Ok(Json(ResumeUploadResponse {
        resume_url: stored.url,
    }))
}
