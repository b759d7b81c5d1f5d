// Partial-update SQL builder and typed bind values
// Translates a subset of an entity's fields into a parameterized SET clause

use crate::errors::EmptyUpdateError;
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;
use std::collections::HashMap;

/// A storage-representable scalar bound to a positional placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Decimal(Decimal),
    Boolean(bool),
    Null,
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(value)
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Integer(i64::from(value))
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        SqlValue::Float(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Decimal(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Boolean(value)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

/// Ordered field name → value mapping describing a partial update
///
/// Insertion order decides placeholder numbering. Setting a field that is
/// already present replaces its value and keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateRequest {
    fields: Vec<(String, SqlValue)>,
}

impl UpdateRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any earlier value for the same name
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> &mut Self {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
        self
    }

    /// Builder-style variant of [`UpdateRequest::set`]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field only when a value is present
    pub fn set_if_some<T: Into<SqlValue>>(
        &mut self,
        field: impl Into<String>,
        value: Option<T>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.set(field, value);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<K: Into<String>, V: Into<SqlValue>> FromIterator<(K, V)> for UpdateRequest {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = UpdateRequest::new();
        for (field, value) in iter {
            request.set(field, value);
        }
        request
    }
}

/// External field name → storage column name overrides
pub type ColumnAliasMap<'a> = HashMap<&'a str, &'a str>;

/// A SET clause and the values for its placeholders, in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct PartialUpdate {
    pub set_clause: String,
    pub values: Vec<SqlValue>,
}

impl PartialUpdate {
    /// Index of the next free placeholder after the SET clause
    pub fn next_placeholder(&self) -> usize {
        self.values.len() + 1
    }
}

/// Build a `"column"=$n` SET clause from an update request
///
/// Columns resolve through `aliases` and fall back to the field name verbatim.
/// Aliases for fields absent from the request are ignored.
///
/// # Errors
/// Returns [`EmptyUpdateError`] when the request has no fields
pub fn build_set_clause(
    request: &UpdateRequest,
    aliases: &ColumnAliasMap<'_>,
) -> Result<PartialUpdate, EmptyUpdateError> {
    if request.is_empty() {
        return Err(EmptyUpdateError);
    }

    let mut fragments = Vec::with_capacity(request.len());
    let mut values = Vec::with_capacity(request.len());

    for (idx, (field, value)) in request.iter().enumerate() {
        let column = aliases.get(field).copied().unwrap_or(field);
        fragments.push(format!("\"{}\"=${}", column, idx + 1));
        values.push(value.clone());
    }

    Ok(PartialUpdate {
        set_clause: fragments.join(", "),
        values,
    })
}

/// Bind values to a query in placeholder order
pub fn bind_values<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    values: Vec<SqlValue>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for value in values {
        query = match value {
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Integer(v) => query.bind(v),
            SqlValue::Float(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::Boolean(v) => query.bind(v),
            SqlValue::Null => query.bind(None::<String>),
        };
    }
    query
}
