use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use serde_json::json;

use thiserror::Error;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the reminder subsystem
#[derive(Debug, Error)]
pub enum Error {
    // Registration input errors
    #[error("{0}")]
    Validation(String),
    // Store read/write errors
    #[error("Storage failure: {0}")]
    Persistence(#[from] StoreError),
    // Notification gateway errors
    #[error("Failed to dispatch notification: {0:#}")]
    Dispatch(anyhow::Error),
}

pub type RestResult<T> = std::result::Result<T, RestError>;

/// Errors surfaced by REST endpoints
#[derive(Debug, Error)]
pub enum RestError {
    #[error("{0}")]
    ParseError(String),

    #[error("Internal Server Error: {0}")]
    InternalError(String),
}

impl From<Error> for RestError {
    fn from(e: Error) -> Self {
        match e {
            Error::Validation(msg) => Self::ParseError(msg),
            Error::Persistence(error) => {
                tracing::error!(error.cause_chain = ?error, "Store operation failed");
                Self::InternalError("Database error".into())
            }
            Error::Dispatch(error) => {
                tracing::error!(error.cause_chain = ?error, "Notification dispatch failed");
                Self::InternalError("Failed to send email".into())
            }
        }
    }
}

impl From<StoreError> for RestError {
    fn from(e: StoreError) -> Self {
        Error::from(e).into()
    }
}

impl ResponseError for RestError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ParseError(_) => StatusCode::BAD_REQUEST,
            Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "success": false,
            "error": self.to_string(),
        }))
    }
}
