//! Form validation errors.

use std::borrow::Cow;

use cadastro_shared::AppError;
use serde::Serialize;
use thiserror::Error;

/// A single rejected field with its user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Form field name.
    pub field: &'static str,
    /// Message shown under the field.
    pub message: Cow<'static, str>,
}

/// Every field a form rejected, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[error("{} invalid field(s): {}", .errors.len(), field_list(.errors))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty error set.
    #[must_use]
    pub const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Records a rejected field.
    pub fn add(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Records a rejection when `failed` is true.
    pub fn check(
        &mut self,
        failed: bool,
        field: &'static str,
        message: impl Into<Cow<'static, str>>,
    ) {
        if failed {
            self.add(field, message);
        }
    }

    /// Returns true if no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns all rejections.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the names of the rejected fields.
    #[must_use]
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors.iter().map(|e| e.field).collect()
    }

    /// Returns the first message recorded for `field`.
    #[must_use]
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_ref())
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

fn field_list(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.field)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}
