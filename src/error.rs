use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::db::StoreError;
use crate::models::schema::ValidationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Email already in use")]
    DuplicateEmail,

    #[error("Invalid {0} format")]
    InvalidIdentifier(&'static str),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Unauthorized(&'static str),

    /// A persistence failure; `message` is what the caller sees.
    #[error("{message}")]
    StoreFault {
        message: &'static str,
        #[source]
        source: StoreError,
    },
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'a str>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_)
            | ApiError::DuplicateEmail
            | ApiError::InvalidIdentifier(_)
            | ApiError::BadRequest(_)
            | ApiError::StoreFault { .. } => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::StoreFault { message, source } = self {
            log::error!("{}: {}", message, source);
        }
        let field = match self {
            ApiError::Validation(err) => err.field(),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
            field,
        })
    }
}

pub trait StoreResultExt<T> {
    /// Turns a store failure into a [`ApiError::StoreFault`] carrying `message`.
    fn or_fault(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for Result<T, StoreError> {
    fn or_fault(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|source| ApiError::StoreFault { message, source })
    }
}
