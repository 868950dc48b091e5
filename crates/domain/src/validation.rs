//! Field-level validation errors.
//!
//! Mutating use cases collect every violation they find before failing, so
//! a single response tells the caller about all invalid fields at once.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CourtsideError;

/// A single (field, message) violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

/// Aggregated validation error carrying all collected field errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Record a violation. Collection never short-circuits.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fold another collection phase into this one.
    pub fn merge(&mut self, other: ValidationError) {
        self.errors.extend(other.errors);
    }

    /// Ok when nothing was collected, otherwise the aggregated domain error.
    pub fn into_result(self) -> Result<(), CourtsideError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CourtsideError::InvalidInput(self))
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "validation failed")?;
        } else {
            write!(f, "validation failed: ")?;
            for (i, err) in self.errors.iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", err.field, err.message)?;
            }
        }
        Ok(())
    }
}
