// Job repository implementation
// CRUD over the jobs table, joined to companies for enrichment

use crate::db::repositories::queries::{alias_map, company_queries, job_queries, FilterClause};
use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::{Company, Job, JobDetail, JobFilter, JobListing, JobUpdate, NewJob};
use crate::sql::{bind_values, build_set_clause};
use tracing::instrument;

/// Repository for job-related database operations
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: DbPool,
}

impl JobRepository {
    /// Create a new JobRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new job
    #[instrument(skip(self, job), fields(company_handle = %job.company_handle))]
    pub async fn create(&self, job: &NewJob) -> Result<Job, DatabaseError> {
        let query = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            job_queries::RETURNING_COLUMNS
        );

        let job = sqlx::query_as::<_, Job>(&query)
            .bind(&job.title)
            .bind(job.salary)
            .bind(job.equity)
            .bind(&job.company_handle)
            .fetch_one(self.pool.pool())
            .await?;

        tracing::info!(job_id = job.id, title = %job.title, "Job created");
        Ok(job)
    }

    /// List jobs matching every supplied filter
    ///
    /// - `min_salary`: salary at least this much
    /// - `has_equity`: only jobs with non-zero equity
    /// - `title`: case-insensitive substring match
    #[instrument(skip(self))]
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<JobListing>, DatabaseError> {
        let mut clause = FilterClause::new();

        if let Some(min_salary) = filter.min_salary {
            clause.push_bound("j.salary >= {}", min_salary);
        }
        if filter.has_equity {
            clause.push("j.equity > 0");
        }
        if let Some(title) = &filter.title {
            clause.push_bound("j.title ILIKE {}", format!("%{}%", title));
        }

        let query = format!(
            "{}{} ORDER BY j.title, j.id",
            job_queries::SELECT_LISTING,
            clause.to_sql()
        );

        let jobs = bind_values(sqlx::query_as::<_, JobListing>(&query), clause.into_values())
            .fetch_all(self.pool.pool())
            .await?;

        tracing::debug!(count = jobs.len(), "Listed jobs");
        Ok(jobs)
    }

    /// Find a job by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Job>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM jobs WHERE id = $1",
            job_queries::RETURNING_COLUMNS
        );

        let job = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(self.pool.pool())
            .await?;

        Ok(job)
    }

    /// Get a job with its company embedded
    ///
    /// # Errors
    /// Returns `DatabaseError::NotFound` when no job has this ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<JobDetail, DatabaseError> {
        let job = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        let query = format!(
            "SELECT {} FROM companies WHERE handle = $1",
            company_queries::RETURNING_COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(&job.company_handle)
            .fetch_optional(self.pool.pool())
            .await?;

        Ok(JobDetail::new(job, company))
    }

    /// Apply a partial update to a job
    ///
    /// Only the fields present in `update` change.
    ///
    /// # Errors
    /// - `DatabaseError::EmptyUpdate` when `update` has no fields
    /// - `DatabaseError::NotFound` when no job has this ID
    #[instrument(skip(self, update))]
    pub async fn update(&self, id: i32, update: &JobUpdate) -> Result<Job, DatabaseError> {
        let partial = build_set_clause(
            &update.to_update_request(),
            &alias_map(job_queries::COLUMN_ALIASES),
        )?;

        let query = format!(
            "UPDATE jobs SET {} WHERE id = ${} RETURNING {}",
            partial.set_clause,
            partial.next_placeholder(),
            job_queries::RETURNING_COLUMNS
        );

        let job = bind_values(sqlx::query_as::<_, Job>(&query), partial.values)
            .bind(id)
            .fetch_optional(self.pool.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No job: {}", id)))?;

        tracing::info!(job_id = id, "Job updated");
        Ok(job)
    }

    /// Delete a job
    ///
    /// # Errors
    /// Returns `DatabaseError::NotFound` when no job has this ID
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_as::<_, (i32,)>("DELETE FROM jobs WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool.pool())
            .await?;

        if deleted.is_none() {
            return Err(DatabaseError::NotFound(format!("No job: {}", id)));
        }

        tracing::info!(job_id = id, "Job deleted");
        Ok(())
    }
}
