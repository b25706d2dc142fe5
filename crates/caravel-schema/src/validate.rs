//! # Payload Validation
//!
//! The pure check gating every schema-derived write: required
//! properties must be present, and present properties must inhabit
//! their declared type. No side effects, no ledger access.
//!
//! All violations are collected before the payload is rejected, so a
//! caller fixing a payload sees every problem at once.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::schema::Schema;

/// Error raised when a payload fails validation against its schema.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The payload did not conform to the declared schema.
    #[error("payload failed validation against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name of the schema the payload was validated against.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The payload was not a JSON object.
    #[error("payload for schema '{schema_name}' must be a JSON object")]
    PayloadNotAnObject {
        /// Name of the schema the payload was validated against.
        schema_name: String,
    },
}

/// A single validation violation with structured context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Name of the offending property.
    pub property: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  {}: {}", self.property, self.message)
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// Validate a payload against a declared schema.
///
/// Checks, for every declared property:
/// - a `required` property must be present in the payload;
/// - a present property must inhabit its declared type (`asset`
///   properties must be strings naming a key; existence of that key is
///   verified by the caller, not here).
///
/// Properties in the payload that the schema does not declare are
/// ignored. The check is pure: no ledger reads, no writes.
///
/// # Errors
///
/// Returns [`SchemaError::PayloadNotAnObject`] for non-object payloads
/// and [`SchemaError::ValidationFailed`] with the full violation list
/// otherwise.
pub fn validate(schema: &Schema, payload: &Value) -> Result<(), SchemaError> {
    let fields = payload
        .as_object()
        .ok_or_else(|| SchemaError::PayloadNotAnObject {
            schema_name: schema.name.clone(),
        })?;

    let mut violations = Vec::new();

    for property in &schema.properties {
        match fields.get(&property.name) {
            None => {
                if property.required {
                    violations.push(Violation {
                        property: property.name.clone(),
                        message: "required property is missing".to_string(),
                    });
                }
            }
            Some(value) => {
                if !property.property_type.admits(value) {
                    violations.push(Violation {
                        property: property.name.clone(),
                        message: format!(
                            "expected {}, got {}",
                            property.property_type,
                            json_type_name(value)
                        ),
                    });
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::ValidationFailed {
            schema_name: schema.name.clone(),
            violations: ValidationViolations { violations },
        })
    }
}

/// The JSON type name of a value, for violation messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
