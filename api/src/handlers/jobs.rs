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
use common::db::repositories::JobRepository;
use common::models::{Job, JobDetail, JobFilter, JobListing, JobUpdate, NewJob};
use common::validation::{coerce_query, JOB_NEW, JOB_SEARCH, JOB_UPDATE};

#[derive(Debug, Serialize)]
pub struct JobResponse<T: Serialize> {
    pub job: T,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobListing>,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// Query-string filters, after coercion and validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobSearch {
    min_salary: Option<i32>,
    #[serde(default)]
    has_equity: bool,
    title: Option<String>,
}

impl From<JobSearch> for JobFilter {
    fn from(search: JobSearch) -> Self {
        Self {
            min_salary: search.min_salary,
            has_equity: search.has_equity,
            title: search.title,
        }
    }
}

/// Create a new job (admin only)
#[tracing::instrument(skip(state, body))]
pub async fn create_job(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse<Job>>), ErrorResponse> {
    let Json(body) = body?;
    JOB_NEW.validate(&body)?;
    let new_job: NewJob = from_validated(body)?;

    let repo = JobRepository::new(state.db_pool.clone());
    let job = repo.create(&new_job).await?;

    tracing::info!(job_id = job.id, "Job created successfully");
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// List jobs, optionally filtered by `minSalary`, `hasEquity` and `title`
#[tracing::instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> Result<Json<JobsResponse>, ErrorResponse> {
    let Query(params) = params?;
    let search = coerce_query(&params, &["minSalary"], &["hasEquity"]);
    JOB_SEARCH.validate(&search)?;
    let filter: JobFilter = from_validated::<JobSearch>(search)?.into();

    let repo = JobRepository::new(state.db_pool.clone());
    let jobs = repo.find_all(&filter).await?;

    tracing::debug!(count = jobs.len(), "Listed jobs");
    Ok(Json(JobsResponse { jobs }))
}

/// Get a job with its company
#[tracing::instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<JobResponse<JobDetail>>, ErrorResponse> {
    let Path(id) = id?;

    let repo = JobRepository::new(state.db_pool.clone());
    let job = repo.get(id).await?;

    Ok(Json(JobResponse { job }))
}

/// Partially update a job (admin only)
///
/// Accepts any subset of `title`, `salary` and `equity`; an empty body is a 400.
#[tracing::instrument(skip(state, body))]
pub async fn update_job(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<JobResponse<Job>>, ErrorResponse> {
    let Path(id) = id?;
    let Json(body) = body?;
    JOB_UPDATE.validate(&body)?;
    let update: JobUpdate = from_validated(body)?;

    let repo = JobRepository::new(state.db_pool.clone());
    let job = repo.update(id, &update).await?;

    tracing::info!(job_id = id, "Job updated successfully");
    Ok(Json(JobResponse { job }))
}

/// Delete a job (admin only)
#[tracing::instrument(skip(state))]
pub async fn delete_job(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, ErrorResponse> {
    let Path(id) = id?;

    let repo = JobRepository::new(state.db_pool.clone());
    repo.remove(id).await?;

    tracing::info!(job_id = id, "Job deleted successfully");
    Ok(Json(DeletedResponse { deleted: id }))
}
