//! Schema interpretation
//!
//! Validation walks the rule tree once, collecting every violation rather
//! than stopping at the first, and produces a sanitized copy of the input
//! with defaults filled in. Fields the schema does not know about pass
//! through unchanged; callers rely on that to forward provider-specific
//! extensions. Validation is deterministic and performs no I/O.

use crate::rules::{Field, FieldKind, Schema};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Field-path-keyed collection of schema violations.
///
/// Paths use dot and index qualifiers, e.g. `to[2].email` or
/// `metadata.website`. The empty path refers to the input value itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Violations(BTreeMap<String, String>);

impl Violations {
    pub fn insert(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.insert(path.into(), message.into());
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.0.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (path, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            if path.is_empty() {
                write!(f, "{message}")?;
            } else {
                write!(f, "{path} {message}")?;
            }
        }
        Ok(())
    }
}

/// Outcome of validating one input against one schema.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// True iff no violations were collected.
    pub valid: bool,
    /// Sanitized copy of the input with defaults applied.
    pub data: Value,
    pub errors: Violations,
}

impl Schema {
    /// Validate `input` against this schema.
    pub fn validate(&self, input: &Value) -> ValidationReport {
        let mut errors = Violations::default();

        let data = match input.as_object() {
            Some(map) => {
                let mut out = map.clone();
                for (name, rule) in &self.fields {
                    match map.get(name) {
                        None => {
                            if rule.required {
                                errors.insert(name.clone(), "is required");
                            } else if let Some(default) = &rule.default {
                                out.insert(name.clone(), default.clone());
                            }
                        }
                        Some(value) => {
                            out.insert(name.clone(), check_value(name, rule, value, &mut errors));
                        }
                    }
                }
                Value::Object(out)
            }
            None => {
                errors.insert("", "must be an object");
                input.clone()
            }
        };

        ValidationReport {
            valid: errors.is_empty(),
            data,
            errors,
        }
    }
}

/// Check one value against one rule, returning the sanitized value.
///
/// A kind mismatch is recorded and the value is returned as-is; sibling
/// fields keep being checked by the caller.
fn check_value(path: &str, rule: &Field, value: &Value, errors: &mut Violations) -> Value {
    if let Some(kind) = rule.kind {
        if let Some(message) = kind_violation(kind, value) {
            errors.insert(path, message);
            return value.clone();
        }
    }

    if !rule.one_of.is_empty() {
        if let Some(s) = value.as_str() {
            if !rule.one_of.iter().any(|allowed| allowed == s) {
                errors.insert(path, format!("must be one of: {}", rule.one_of.join(", ")));
            }
        }
    }

    match value {
        Value::Array(elements) => {
            if let Some(min) = rule.min_items {
                if elements.len() < min {
                    let message = if min == 1 {
                        "must not be empty".to_string()
                    } else {
                        format!("must contain at least {min} elements")
                    };
                    errors.insert(path, message);
                }
            }
            match &rule.items {
                Some(element_rule) => Value::Array(
                    elements
                        .iter()
                        .enumerate()
                        .map(|(i, element)| {
                            check_value(&format!("{path}[{i}]"), element_rule, element, errors)
                        })
                        .collect(),
                ),
                None => value.clone(),
            }
        }
        Value::Object(_) => match &rule.fields {
            Some(nested) => {
                let report = nested.validate(value);
                for (sub_path, message) in report.errors.iter() {
                    errors.insert(format!("{path}.{sub_path}"), message.clone());
                }
                report.data
            }
            None => value.clone(),
        },
        _ => value.clone(),
    }
}

fn kind_violation(kind: FieldKind, value: &Value) -> Option<String> {
    match kind {
        FieldKind::String => (!value.is_string()).then(|| "must be a string".to_string()),
        FieldKind::Boolean => (!value.is_boolean()).then(|| "must be a boolean".to_string()),
        FieldKind::Array => (!value.is_array()).then(|| "must be an array".to_string()),
        FieldKind::Object => (!value.is_object()).then(|| "must be an object".to_string()),
        FieldKind::Email => match value.as_str() {
            Some(s) if email_address::EmailAddress::is_valid(s) => None,
            Some(_) => Some("is not a valid email address".to_string()),
            None => Some("must be a string".to_string()),
        },
        FieldKind::Url => match value.as_str() {
            Some(s) if url::Url::parse(s).is_ok() => None,
            Some(_) => Some("is not a valid URL".to_string()),
            None => Some("must be a string".to_string()),
        },
    }
}
