use sea_orm::DbErr;
use thiserror::Error;

use crate::spec::search_operation::SearchOperation;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Unknown tag name: {0}")]
    UnknownTag(String),

    #[error("Unknown search key: {0}")]
    UnknownField(String),

    #[error("Operation {operation} is not supported on '{key}'")]
    UnsupportedOperation {
        key: String,
        operation: SearchOperation,
    },

    #[error("{resource} not found with {field} : '{value}'")]
    ResourceNotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("{0}")]
    App(String),

    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

impl AppError {
    /// True when the failure was caused by the caller's input rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::BadRequest(_)
                | AppError::UnknownTag(_)
                | AppError::UnknownField(_)
                | AppError::UnsupportedOperation { .. }
                | AppError::ResourceNotFound { .. }
        )
    }
}
