//! Job posting handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use refhub_models::{Action, Job, JobFilter, JobId, JobPatch, JobStatus, NewJob, UserId, WorkStyle};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Job creation request. Owner fields come from the caller.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub description: String,
    pub location: Option<String>,
    pub work_style: Option<WorkStyle>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: JobStatus,
}

/// Partial job update.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub description: Option<String>,
    pub location: Option<String>,
    pub work_style: Option<WorkStyle>,
    pub skills: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

impl From<UpdateJobRequest> for JobPatch {
    fn from(r: UpdateJobRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            location: r.location,
            work_style: r.work_style,
            skills: r.skills,
            status: r.status,
        }
    }
}

/// List jobs, newest first.
pub async fn list_jobs(
    State(state): State<AppState>,
    ApiQuery(filter): ApiQuery<JobFilter>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.db.jobs().list(&filter).await?;
    Ok(Json(jobs))
}

/// Get a single job.
pub async fn get_job(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<JobId>,
) -> ApiResult<Json<Job>> {
    state
        .db
        .jobs()
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Job not found"))
}

/// Post a job as the calling referrer.
///
/// The body is parsed only after the role check so a wrong role is always 403.
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<ApiJson<CreateJobRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Job>)> {
    let actor = auth.actor();
    actor.authorize(Action::CreateJob)?;

    let company_id = actor
        .company_id
        .ok_or_else(|| ApiError::bad_request("Referrer must belong to a company to post jobs"))?;

    let request = body?.validated()?;
    let job = state
        .db
        .jobs()
        .create(NewJob {
            title: request.title,
            description: request.description,
            location: request.location,
            work_style: request.work_style,
            skills: request.skills,
            company_id,
            referrer_id: actor.user_id,
            status: request.status,
        })
        .await?;

    info!("Referrer {} posted job {}", job.referrer_id, job.id);
    Ok((StatusCode::CREATED, Json(job)))
}

/// Update a job owned by the caller.
pub async fn update_job(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<JobId>,
    body: Result<ApiJson<UpdateJobRequest>, ApiError>,
) -> ApiResult<Json<Job>> {
    let jobs = state.db.jobs();
    let job = jobs
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;

    auth.actor().authorize(Action::UpdateJob { job: &job })?;

    let request = body?.validated()?;
    let updated = jobs.update(&id, request.into()).await?;
    Ok(Json(updated))
}

/// Jobs posted by one referrer.
pub async fn list_referrer_jobs(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(referrer_id): ApiPath<UserId>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = state.db.jobs().list_by_referrer(&referrer_id).await?;
    Ok(Json(jobs))
}
