//! Application handlers and the status workflow endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use refhub_models::{
    Action, Application, ApplicationId, ApplicationStatus, JobId, NewApplication, Role,
};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::metrics::{record_application_submitted, record_status_change};
use crate::state::AppState;

/// Application request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub job_id: JobId,
    pub message: Option<String>,
}

/// Status update request. Values outside the status set are rejected as 400.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ApplicationStatus,
}

/// Apply to a job as the calling candidate.
pub async fn create_application(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<ApiJson<CreateApplicationRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Application>)> {
    auth.actor().authorize(Action::CreateApplication)?;
    let ApiJson(request) = body?;

    // Job existence and status are checked under the store's write lock
    let application = state
        .db
        .applications()
        .create(NewApplication {
            job_id: request.job_id,
            candidate_id: auth.id().clone(),
            message: request.message.filter(|m| !m.trim().is_empty()),
        })
        .await?;

    record_application_submitted();
    info!(
        "Candidate {} applied to job {}",
        application.candidate_id, application.job_id
    );
    Ok((StatusCode::CREATED, Json(application)))
}

/// Applications visible to the caller given their role.
pub async fn list_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Application>>> {
    let repo = state.db.applications();
    let applications = match auth.user.role {
        Role::Candidate => repo.list_by_candidate(auth.id()).await?,
        Role::Referrer => repo.list_by_referrer(auth.id()).await?,
        Role::Hr => match &auth.user.company_id {
            Some(company_id) => repo.list_by_company(company_id).await?,
            None => Vec::new(),
        },
    };
    Ok(Json(applications))
}

/// The caller's own applications.
pub async fn list_candidate_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Application>>> {
    Ok(Json(
        state.db.applications().list_by_candidate(auth.id()).await?,
    ))
}

/// Applications referred by the caller.
pub async fn list_referrer_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Application>>> {
    Ok(Json(
        state.db.applications().list_by_referrer(auth.id()).await?,
    ))
}

/// Every application to the caller's company.
pub async fn list_company_applications(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<Application>>> {
    let actor = auth.actor();
    actor.authorize(Action::ViewCompanyApplications)?;

    let company_id = actor
        .company_id
        .ok_or_else(|| ApiError::forbidden("Only HR admins can view company applications"))?;
    Ok(Json(
        state.db.applications().list_by_company(&company_id).await?,
    ))
}

/// Get one application.
pub async fn get_application(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ApplicationId>,
) -> ApiResult<Json<Application>> {
    let (application, job) = state
        .db
        .applications()
        .get_with_job(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    auth.actor().authorize(Action::ViewApplication {
        application: &application,
        job_company: &job.company_id,
    })?;

    Ok(Json(application))
}

/// Set an application's status.
pub async fn update_application_status(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<ApplicationId>,
    body: Result<ApiJson<UpdateStatusRequest>, ApiError>,
) -> ApiResult<Json<Application>> {
    let repo = state.db.applications();
    let (_, job) = repo
        .get_with_job(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;

    auth.actor().authorize(Action::UpdateApplicationStatus {
        job_company: &job.company_id,
    })?;
    let ApiJson(request) = body?;

    let application = repo.update_status(&id, request.status, Utc::now()).await?;
    record_status_change(application.status.as_str());

    Ok(Json(application))
}
