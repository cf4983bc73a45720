//! Property schema descriptors.
//!
//! A schema is the contract a property editor honors when generating input
//! fields: field name → expected shape. Validation is permissive by
//! default: unknown extra properties are tolerated, and an empty schema
//! accepts anything. The store never validates; schemas are applied at
//! component creation time and by editor UIs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sitewright_store::PropertyMap;
use thiserror::Error;

/// Expected shape of a single property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Email,
    Url,
    Bool,
    Number,
    /// One of a fixed set of string options
    Choice(Vec<String>),
    List(Box<FieldKind>),
    Object(Schema),
}

impl FieldKind {
    pub fn choice(options: &[&str]) -> Self {
        FieldKind::Choice(options.iter().map(|s| s.to_string()).collect())
    }

    pub fn list(kind: FieldKind) -> Self {
        FieldKind::List(Box::new(kind))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// A single validation failure, addressed by property path
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{path}: {message}")]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty schema: accepts any property map
    pub fn permissive() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            kind,
            required: true,
        });
        self
    }

    pub fn optional(mut self, name: &str, kind: FieldKind) -> Self {
        self.fields.push(FieldSpec {
            name: name.to_string(),
            kind,
            required: false,
        });
        self
    }

    pub fn is_permissive(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validate a property map. Extra properties are not violations.
    pub fn validate(&self, properties: &PropertyMap) -> Result<(), Vec<SchemaViolation>> {
        let mut violations = Vec::new();

        for field in &self.fields {
            match properties.get(&field.name) {
                Some(value) => check_value(&field.name, &field.kind, value, &mut violations),
                None if field.required => violations.push(SchemaViolation {
                    path: field.name.clone(),
                    message: "required field is missing".to_string(),
                }),
                None => {}
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_value(path: &str, kind: &FieldKind, value: &Value, violations: &mut Vec<SchemaViolation>) {
    match kind {
        FieldKind::Text | FieldKind::Url => {
            if !value.is_string() {
                push_mismatch(path, "string", value, violations);
            }
        }

        FieldKind::Email => match value.as_str() {
            Some(s) if s.contains('@') => {}
            Some(_) => violations.push(SchemaViolation {
                path: path.to_string(),
                message: "expected an email address".to_string(),
            }),
            None => push_mismatch(path, "string", value, violations),
        },

        FieldKind::Bool => {
            if !value.is_boolean() {
                push_mismatch(path, "bool", value, violations);
            }
        }

        FieldKind::Number => {
            if !value.is_number() {
                push_mismatch(path, "number", value, violations);
            }
        }

        FieldKind::Choice(options) => match value.as_str() {
            Some(s) if options.iter().any(|o| o == s) => {}
            Some(s) => violations.push(SchemaViolation {
                path: path.to_string(),
                message: format!("\"{}\" is not one of {:?}", s, options),
            }),
            None => push_mismatch(path, "string", value, violations),
        },

        FieldKind::List(item_kind) => match value.as_array() {
            Some(items) => {
                for (index, item) in items.iter().enumerate() {
                    check_value(&format!("{}[{}]", path, index), item_kind, item, violations);
                }
            }
            None => push_mismatch(path, "array", value, violations),
        },

        FieldKind::Object(schema) => match value.as_object() {
            Some(map) => {
                if let Err(nested) = schema.validate(map) {
                    for violation in nested {
                        violations.push(SchemaViolation {
                            path: format!("{}.{}", path, violation.path),
                            message: violation.message,
                        });
                    }
                }
            }
            None => push_mismatch(path, "object", value, violations),
        },
    }
}

fn push_mismatch(path: &str, expected: &str, value: &Value, violations: &mut Vec<SchemaViolation>) {
    violations.push(SchemaViolation {
        path: path.to_string(),
        message: format!("expected {}, got {}", expected, json_type_name(value)),
    });
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
