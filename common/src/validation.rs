// Fixed-shape payload validation
// Checks raw JSON against a schema and reports every violation it finds

use crate::errors::ValidationError;
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

/// Accepted shape of a single property
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String {
        min_length: usize,
        max_length: Option<usize>,
        format: Option<StringFormat>,
    },
    Integer {
        minimum: Option<i64>,
    },
    Boolean,
}

#[derive(Debug, Clone, Copy)]
pub enum StringFormat {
    /// Anchored regular expression
    Pattern(&'static str),
    Uri,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// A closed object schema: only the listed properties are allowed
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [FieldRule],
}

const fn text(name: &'static str, min_length: usize, required: bool) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::String {
            min_length,
            max_length: None,
            format: None,
        },
        required,
    }
}

const fn handle(name: &'static str, required: bool) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::String {
            min_length: 1,
            max_length: Some(25),
            format: None,
        },
        required,
    }
}

const fn non_negative(name: &'static str, required: bool) -> FieldRule {
    FieldRule {
        name,
        kind: FieldKind::Integer { minimum: Some(0) },
        required,
    }
}

const EQUITY: FieldRule = FieldRule {
    name: "equity",
    kind: FieldKind::String {
        min_length: 1,
        max_length: None,
        format: Some(StringFormat::Pattern(r"^(0|0?\.[0-9]+|1(\.0+)?)$")),
    },
    required: false,
};

const LOGO_URL: FieldRule = FieldRule {
    name: "logoUrl",
    kind: FieldKind::String {
        min_length: 1,
        max_length: None,
        format: Some(StringFormat::Uri),
    },
    required: false,
};

pub const JOB_NEW: Schema = Schema {
    name: "jobNew",
    fields: &[
        text("title", 1, true),
        non_negative("salary", false),
        EQUITY,
        handle("companyHandle", true),
    ],
};

pub const JOB_UPDATE: Schema = Schema {
    name: "jobUpdate",
    fields: &[text("title", 1, false), non_negative("salary", false), EQUITY],
};

pub const JOB_SEARCH: Schema = Schema {
    name: "jobSearch",
    fields: &[
        non_negative("minSalary", false),
        FieldRule {
            name: "hasEquity",
            kind: FieldKind::Boolean,
            required: false,
        },
        text("title", 1, false),
    ],
};

pub const COMPANY_NEW: Schema = Schema {
    name: "companyNew",
    fields: &[
        handle("handle", true),
        text("name", 1, true),
        text("description", 0, true),
        non_negative("numEmployees", false),
        LOGO_URL,
    ],
};

pub const COMPANY_UPDATE: Schema = Schema {
    name: "companyUpdate",
    fields: &[
        text("name", 1, false),
        text("description", 0, false),
        non_negative("numEmployees", false),
        LOGO_URL,
    ],
};

pub const COMPANY_SEARCH: Schema = Schema {
    name: "companySearch",
    fields: &[
        text("name", 1, false),
        non_negative("minEmployees", false),
        non_negative("maxEmployees", false),
    ],
};

impl Schema {
    /// Validate an instance, collecting every violation
    pub fn validate(&self, instance: &Value) -> Result<(), ValidationError> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            Ok(())
        } else {
            tracing::debug!(schema = self.name, ?violations, "Payload rejected");
            Err(ValidationError::SchemaViolations(violations))
        }
    }

    pub fn violations(&self, instance: &Value) -> Vec<String> {
        let Some(object) = instance.as_object() else {
            return vec!["instance is not of a type(s) object".to_string()];
        };

        let mut violations = Vec::new();

        for rule in self.fields {
            match object.get(rule.name) {
                Some(value) => check_field(rule, value, &mut violations),
                None if rule.required => {
                    violations.push(format!("instance requires property \"{}\"", rule.name))
                }
                None => {}
            }
        }

        for key in object.keys() {
            if !self.fields.iter().any(|rule| rule.name == key) {
                violations.push(format!(
                    "instance is not allowed to have the additional property \"{}\"",
                    key
                ));
            }
        }

        violations
    }
}

fn check_field(rule: &FieldRule, value: &Value, violations: &mut Vec<String>) {
    let path = format!("instance.{}", rule.name);

    match rule.kind {
        FieldKind::String {
            min_length,
            max_length,
            format,
        } => {
            let Some(s) = value.as_str() else {
                violations.push(format!("{} is not of a type(s) string", path));
                return;
            };
            let length = s.chars().count();
            if length < min_length {
                violations.push(format!("{} does not meet minimum length of {}", path, min_length));
            }
            if let Some(max) = max_length {
                if length > max {
                    violations.push(format!("{} does not meet maximum length of {}", path, max));
                }
            }
            match format {
                Some(StringFormat::Pattern(pattern)) if !regex_is_match(pattern, s) => {
                    violations.push(format!("{} does not match pattern \"{}\"", path, pattern));
                }
                Some(StringFormat::Uri) if url::Url::parse(s).is_err() => {
                    violations.push(format!("{} does not conform to the \"uri\" format", path));
                }
                _ => {}
            }
        }
        FieldKind::Integer { minimum } => {
            let Some(n) = value.as_i64() else {
                violations.push(format!("{} is not of a type(s) integer", path));
                return;
            };
            if let Some(min) = minimum {
                if n < min {
                    violations.push(format!("{} must be greater than or equal to {}", path, min));
                }
            }
            // Stored in INTEGER columns
            if n > i64::from(i32::MAX) {
                violations.push(format!("{} must be less than or equal to {}", path, i32::MAX));
            }
        }
        FieldKind::Boolean => {
            if !value.is_boolean() {
                violations.push(format!("{} is not of a type(s) boolean", path));
            }
        }
    }
}

fn regex_is_match(pattern: &'static str, value: &str) -> bool {
    static CACHE: OnceLock<Mutex<HashMap<&'static str, Regex>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    let regex = {
        let mut cache = cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        match cache.get(pattern) {
            Some(re) => re.clone(),
            None => match Regex::new(pattern) {
                Ok(re) => {
                    cache.insert(pattern, re.clone());
                    re
                }
                Err(e) => {
                    tracing::error!(pattern, error = %e, "Invalid schema pattern");
                    return false;
                }
            },
        }
    };

    regex.is_match(value)
}

/// Build a JSON object from query-string parameters
///
/// Integer fields are parsed when possible and otherwise left as strings so
/// the schema reports them. Boolean fields are `true` only for the literal
/// `"true"` and default to `false` when absent.
pub fn coerce_query(
    params: &HashMap<String, String>,
    integer_fields: &[&str],
    boolean_fields: &[&str],
) -> Value {
    let mut object = Map::new();

    for (key, raw) in params {
        let value = if integer_fields.contains(&key.as_str()) {
            raw.trim()
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(raw.clone()))
        } else if boolean_fields.contains(&key.as_str()) {
            Value::Bool(raw == "true")
        } else {
            Value::String(raw.clone())
        };
        object.insert(key.clone(), value);
    }

    for field in boolean_fields {
        object
            .entry(field.to_string())
            .or_insert(Value::Bool(false));
    }

    Value::Object(object)
}
