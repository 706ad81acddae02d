//! Company handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use refhub_models::{Action, Company, CompanyId, CompanyPatch, NewCompany};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Company creation request.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyRequest {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub logo_url: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

/// Partial company update.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub logo_url: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
}

/// List companies, newest first.
pub async fn list_companies(State(state): State<AppState>) -> ApiResult<Json<Vec<Company>>> {
    Ok(Json(state.db.companies().list().await?))
}

/// Get a single company.
pub async fn get_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<CompanyId>,
) -> ApiResult<Json<Company>> {
    state
        .db
        .companies()
        .get(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Company not found"))
}

/// Create a company and make the calling HR user its admin.
pub async fn create_company(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<ApiJson<CreateCompanyRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Company>)> {
    auth.actor().authorize(Action::CreateCompany)?;
    let r = body?.validated()?;

    let (company, _admin) = state
        .db
        .companies()
        .create_with_admin(
            NewCompany {
                name: r.name,
                description: r.description,
                website: r.website,
                logo_url: r.logo_url,
                industry: r.industry,
                size: r.size,
            },
            auth.id(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(company)))
}

/// Update a company administered by the caller.
pub async fn update_company(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<CompanyId>,
    body: Result<ApiJson<UpdateCompanyRequest>, ApiError>,
) -> ApiResult<Json<Company>> {
    let companies = state.db.companies();
    if companies.get(&id).await?.is_none() {
        return Err(ApiError::not_found("Company not found"));
    }
    auth.actor()
        .authorize(Action::UpdateCompany { company_id: &id })?;

    let r = body?.validated()?;
    let company = companies
        .update(
            &id,
            CompanyPatch {
                name: r.name,
                description: r.description,
                website: r.website,
                logo_url: r.logo_url,
                industry: r.industry,
                size: r.size,
            },
        )
        .await?;
    Ok(Json(company))
}
