use thiserror::Error;

use crate::forms::{FieldErrors, FormError};
use crate::pagination::PageRequestError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,

    /// Submitted form failed validation; messages are keyed by field.
    #[error("invalid form: {0:?}")]
    Validation(FieldErrors),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("type constraint violated: {0}")]
    TypeConstraint(String),

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<PageRequestError> for ServiceError {
    fn from(err: PageRequestError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Malformed(message) => ServiceError::BadRequest(message),
            other => ServiceError::Validation(other.into_field_errors()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_not_found_becomes_not_found() {
        assert!(matches!(
            ServiceError::from(RepositoryError::NotFound),
            ServiceError::NotFound
        ));
        assert!(matches!(
            ServiceError::from(RepositoryError::ConnectionError("down".into())),
            ServiceError::Repository(_)
        ));
    }

    #[test]
    fn malformed_forms_are_bad_requests() {
        assert!(matches!(
            ServiceError::from(FormError::Malformed("codigo".into())),
            ServiceError::BadRequest(_)
        ));
        assert!(matches!(
            ServiceError::from(FormError::MissingId),
            ServiceError::Validation(_)
        ));
    }
}
