// Company repository implementation

use crate::db::repositories::queries::{alias_map, company_queries, FilterClause};
use crate::db::DbPool;
use crate::errors::DatabaseError;
use crate::models::{Company, CompanyDetail, CompanyFilter, CompanyJob, CompanyUpdate, NewCompany};
use crate::sql::{bind_values, build_set_clause};
use tracing::instrument;

/// Repository for company-related database operations
#[derive(Debug, Clone)]
pub struct CompanyRepository {
    pool: DbPool,
}

impl CompanyRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Create a new company
    ///
    /// # Errors
    /// Returns `DatabaseError::DuplicateKey` when the handle or name is taken
    #[instrument(skip(self, company), fields(handle = %company.handle))]
    pub async fn create(&self, company: &NewCompany) -> Result<Company, DatabaseError> {
        let query = format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            company_queries::RETURNING_COLUMNS
        );

        let company = sqlx::query_as::<_, Company>(&query)
            .bind(&company.handle)
            .bind(&company.name)
            .bind(&company.description)
            .bind(company.num_employees)
            .bind(&company.logo_url)
            .fetch_one(self.pool.pool())
            .await?;

        tracing::info!(handle = %company.handle, "Company created");
        Ok(company)
    }

    /// List companies matching every supplied filter
    #[instrument(skip(self))]
    pub async fn find_all(&self, filter: &CompanyFilter) -> Result<Vec<Company>, DatabaseError> {
        let mut clause = FilterClause::new();

        if let Some(name) = &filter.name {
            clause.push_bound("name ILIKE {}", format!("%{}%", name));
        }
        if let Some(min) = filter.min_employees {
            clause.push_bound("num_employees >= {}", min);
        }
        if let Some(max) = filter.max_employees {
            clause.push_bound("num_employees <= {}", max);
        }

        let query = format!(
            "SELECT {} FROM companies{} ORDER BY name",
            company_queries::RETURNING_COLUMNS,
            clause.to_sql()
        );

        let companies = bind_values(sqlx::query_as::<_, Company>(&query), clause.into_values())
            .fetch_all(self.pool.pool())
            .await?;

        tracing::debug!(count = companies.len(), "Listed companies");
        Ok(companies)
    }

    /// Get a company with the jobs it has posted
    #[instrument(skip(self))]
    pub async fn get(&self, handle: &str) -> Result<CompanyDetail, DatabaseError> {
        let query = format!(
            "SELECT {} FROM companies WHERE handle = $1",
            company_queries::RETURNING_COLUMNS
        );
        let company = sqlx::query_as::<_, Company>(&query)
            .bind(handle)
            .fetch_optional(self.pool.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        let jobs = sqlx::query_as::<_, CompanyJob>(
            "SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id",
        )
        .bind(handle)
        .fetch_all(self.pool.pool())
        .await?;

        Ok(CompanyDetail { company, jobs })
    }

    /// Apply a partial update to a company
    ///
    /// `numEmployees` and `logoUrl` map to their snake_case columns.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        handle: &str,
        update: &CompanyUpdate,
    ) -> Result<Company, DatabaseError> {
        let partial = build_set_clause(
            &update.to_update_request(),
            &alias_map(company_queries::COLUMN_ALIASES),
        )?;

        let query = format!(
            "UPDATE companies SET {} WHERE handle = ${} RETURNING {}",
            partial.set_clause,
            partial.next_placeholder(),
            company_queries::RETURNING_COLUMNS
        );

        let company = bind_values(sqlx::query_as::<_, Company>(&query), partial.values)
            .bind(handle)
            .fetch_optional(self.pool.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("No company: {}", handle)))?;

        tracing::info!(handle = %handle, "Company updated");
        Ok(company)
    }

    /// Delete a company; its jobs cascade
    #[instrument(skip(self))]
    pub async fn remove(&self, handle: &str) -> Result<(), DatabaseError> {
        let deleted = sqlx::query_as::<_, (String,)>(
            "DELETE FROM companies WHERE handle = $1 RETURNING handle",
        )
        .bind(handle)
        .fetch_optional(self.pool.pool())
        .await?;

        if deleted.is_none() {
            return Err(DatabaseError::NotFound(format!("No company: {}", handle)));
        }

        tracing::info!(handle = %handle, "Company deleted");
        Ok(())
    }
}
