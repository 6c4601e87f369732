//! Form rules and request payloads for the registration and product forms.
//!
//! Each form validates every field at once and reports all failures, so the
//! caller can show a message under each rejected input.

use cadastro_shared::{AppError, AppResult};
use serde::Serialize;

pub mod error;
pub mod listing;
pub mod product;
pub mod registration;

pub use error::{FieldError, ValidationErrors};
pub use listing::{ROWS_PER_PAGE, filter_products, page_count, paginate};
pub use product::{FormMode, ImageUpload, Product, ProductForm, ProductPayload};
pub use registration::{RegistrationForm, UserPayload};

/// Serializes a payload as the JSON request body.
///
/// # Errors
///
/// Returns [`AppError::Serialization`] if the payload cannot be serialized.
pub fn request_body<T: Serialize>(payload: &T) -> AppResult<String> {
    serde_json::to_string_pretty(payload).map_err(|err| AppError::Serialization(err.to_string()))
}
