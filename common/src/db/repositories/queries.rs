// SQL query constants for repositories
// Centralizes repeated column lists and alias maps

use crate::sql::{ColumnAliasMap, SqlValue};

/// SQL query fragments for jobs table
pub mod job_queries {
    /// Columns returned for a job row
    pub const RETURNING_COLUMNS: &str = "id, title, salary, equity, company_handle";

    /// Listing select joined to the owning company
    pub const SELECT_LISTING: &str = r#"SELECT j.id, j.title, j.salary, j.equity,
            j.company_handle, c.name AS company_name
        FROM jobs j
        LEFT JOIN companies AS c ON c.handle = j.company_handle"#;

    /// Job JSON names match their columns
    pub const COLUMN_ALIASES: &[(&str, &str)] = &[];
}

/// SQL query fragments for companies table
pub mod company_queries {
    /// Columns returned for a company row
    pub const RETURNING_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

    /// JSON field names that differ from their storage columns
    pub const COLUMN_ALIASES: &[(&str, &str)] = &[
        ("numEmployees", "num_employees"),
        ("logoUrl", "logo_url"),
    ];
}

/// Collect a constant alias table into a lookup map
pub fn alias_map(pairs: &'static [(&'static str, &'static str)]) -> ColumnAliasMap<'static> {
    pairs.iter().copied().collect()
}

/// Conjunctive WHERE clause with sequential placeholders
#[derive(Debug, Default)]
pub struct FilterClause {
    expressions: Vec<String>,
    values: Vec<SqlValue>,
}

impl FilterClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate taking one value; `{}` in `template` becomes its placeholder
    pub fn push_bound(&mut self, template: &str, value: impl Into<SqlValue>) {
        self.values.push(value.into());
        let placeholder = format!("${}", self.values.len());
        self.expressions.push(template.replace("{}", &placeholder));
    }

    /// Add a predicate without parameters
    pub fn push(&mut self, expression: &str) {
        self.expressions.push(expression.to_string());
    }

    /// Render as ` WHERE a AND b`, or an empty string when there are no predicates
    pub fn to_sql(&self) -> String {
        if self.expressions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.expressions.join(" AND "))
        }
    }

    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}
