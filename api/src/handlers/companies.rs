use std::collections::HashMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::handlers::{from_validated, ErrorResponse};
use crate::state::AppState;
use common::db::repositories::CompanyRepository;
use common::models::{Company, CompanyDetail, CompanyFilter, CompanyUpdate, NewCompany};
use common::validation::{coerce_query, COMPANY_NEW, COMPANY_SEARCH, COMPANY_UPDATE};

#[derive(Debug, Serialize)]
pub struct CompanyResponse<T: Serialize> {
    pub company: T,
}

#[derive(Debug, Serialize)]
pub struct CompaniesResponse {
    pub companies: Vec<Company>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompanySearch {
    name: Option<String>,
    min_employees: Option<i32>,
    max_employees: Option<i32>,
}

impl TryFrom<CompanySearch> for CompanyFilter {
    type Error = ErrorResponse;

    fn try_from(search: CompanySearch) -> Result<Self, Self::Error> {
        if let (Some(min), Some(max)) = (search.min_employees, search.max_employees) {
            if min > max {
                return Err(ErrorResponse::new(
                    "bad_request",
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }

        Ok(Self {
            name: search.name,
            min_employees: search.min_employees,
            max_employees: search.max_employees,
        })
    }
}

/// Create a new company (admin only)
#[tracing::instrument(skip(state, body))]
pub async fn create_company(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyResponse<Company>>), ErrorResponse> {
    let Json(body) = body?;
    COMPANY_NEW.validate(&body)?;
    let new_company: NewCompany = from_validated(body)?;

    let repo = CompanyRepository::new(state.db_pool.clone());
    let company = repo.create(&new_company).await?;

    tracing::info!(handle = %company.handle, "Company created successfully");
    Ok((StatusCode::CREATED, Json(CompanyResponse { company })))
}

/// List companies, optionally filtered by `name`, `minEmployees` and `maxEmployees`
#[tracing::instrument(skip(state))]
pub async fn list_companies(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<CompaniesResponse>, ErrorResponse> {
    let Query(params) = params?;
    let search = coerce_query(&params, &["minEmployees", "maxEmployees"], &[]);
    COMPANY_SEARCH.validate(&search)?;
    let filter = CompanyFilter::try_from(from_validated::<CompanySearch>(search)?)?;

    let repo = CompanyRepository::new(state.db_pool.clone());
    let companies = repo.find_all(&filter).await?;

    Ok(Json(CompaniesResponse { companies }))
}

/// Get a company with its jobs
#[tracing::instrument(skip(state))]
pub async fn get_company(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Json<CompanyResponse<CompanyDetail>>, ErrorResponse> {
    let Path(handle) = handle?;

    let repo = CompanyRepository::new(state.db_pool.clone());
    let company = repo.get(&handle).await?;

    Ok(Json(CompanyResponse { company }))
}

/// Partially update a company (admin only)
#[tracing::instrument(skip(state, body))]
pub async fn update_company(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<CompanyResponse<Company>>, ErrorResponse> {
    let Path(handle) = handle?;
    let Json(body) = body?;
    COMPANY_UPDATE.validate(&body)?;
    let update: CompanyUpdate = from_validated(body)?;

    let repo = CompanyRepository::new(state.db_pool.clone());
    let company = repo.update(&handle, &update).await?;

    tracing::info!(handle = %handle, "Company updated successfully");
    Ok(Json(CompanyResponse { company }))
}

/// Delete a company and its jobs (admin only)
#[tracing::instrument(skip(state))]
pub async fn delete_company(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
) -> Result<Json<DeletedResponse>, ErrorResponse> {
    let Path(handle) = handle?;

    let repo = CompanyRepository::new(state.db_pool.clone());
    repo.remove(&handle).await?;

    tracing::info!(handle = %handle, "Company deleted successfully");
    Ok(Json(DeletedResponse { deleted: handle }))
}
