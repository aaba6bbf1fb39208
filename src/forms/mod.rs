//! Form and query-string definitions backing the HTTP routes.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::domain::types::TypeConstraintError;
use crate::pagination::{DEFAULT_PAGE_SIZE, PageRequest, PageRequestError, Sort, SortKey};

pub mod person;
pub mod vaccine;

/// Field name to the messages shown next to that field.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Key under which errors that belong to no single field are reported.
pub const FORM_ERRORS_KEY: &str = "form";

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("malformed form data: {0}")]
    Malformed(String),

    #[error("missing record id")]
    MissingId,

    #[error(transparent)]
    Constraint(#[from] TypeConstraintError),
}

impl FormError {
    /// Flattens the error into per-field messages for re-rendering a form.
    pub fn into_field_errors(self) -> FieldErrors {
        match self {
            FormError::Validation(errors) => field_errors(&errors),
            other => {
                let mut errors = FieldErrors::new();
                errors.insert(FORM_ERRORS_KEY.to_string(), vec![other.to_string()]);
                errors
            }
        }
    }
}

/// Collects the messages attached by `validator` per field.
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let messages = errors
                .iter()
                .map(|error| {
                    error
                        .message
                        .as_ref()
                        .map(|message| message.to_string())
                        .unwrap_or_else(|| error.code.to_string())
                })
                .collect();
            (field.to_string(), messages)
        })
        .collect()
}

/// Rejects values made only of whitespace.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Decodes an urlencoded body or query string; empty values become `None`.
pub fn decode<T: DeserializeOwned>(input: &[u8]) -> Result<T, FormError> {
    serde_html_form::from_bytes(input).map_err(|e| FormError::Malformed(e.to_string()))
}

/// Builds the page window from raw `page`, `size` and `sort` parameters.
pub fn page_request<S: SortKey>(
    page: Option<i64>,
    size: Option<i64>,
    sort: Option<&str>,
) -> Result<PageRequest<S>, PageRequestError> {
    let sort = match sort.map(str::trim).filter(|s| !s.is_empty()) {
        Some(spec) => Sort::parse(spec)?,
        None => Sort::default(),
    };
    PageRequest::new(
        page.unwrap_or(0),
        size.unwrap_or(DEFAULT_PAGE_SIZE as i64),
        sort,
    )
}

/// Record identifier posted by the edit and remove buttons.
#[derive(Debug, serde::Deserialize)]
pub struct RecordIdForm {
    #[serde(rename = "codigo")]
    pub id: Option<i32>,
}

impl RecordIdForm {
    pub fn id(&self) -> Result<i32, FormError> {
        self.id.ok_or(FormError::MissingId)
    }
}
