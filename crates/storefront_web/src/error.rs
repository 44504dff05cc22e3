//! Error type for HTTP handlers.
//!
//! Bridges core errors to responses: each kind maps to one status code and
//! a message that is safe to show an end user. Causes behind 5xx responses
//! are logged and dropped.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde::Serialize;
use storefront_core::db::DbError;
use storefront_core::{LifecycleError, ListingError, RepoError, ResourceKind, ValidationError};
use thiserror::Error;

pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load data. Please try again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Payload(#[from] JsonRejection),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Path identity that cannot name any record.
    #[error("{0} identity does not resolve")]
    UnknownRecord(ResourceKind),
    #[error(transparent)]
    Listing(#[from] ListingError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Repo(#[from] RepoError),
    #[error(transparent)]
    Database(#[from] DbError),
    #[error("blocking task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Payload(rejection) => rejection.status(),
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Listing(ListingError::InvalidParameter { .. }) => StatusCode::BAD_REQUEST,
            Self::Lifecycle(LifecycleError::NotFound { .. }) | Self::UnknownRecord(_) => {
                StatusCode::NOT_FOUND
            }
            Self::Listing(ListingError::Repo(_))
            | Self::Lifecycle(LifecycleError::Persistence(_))
            | Self::Repo(_)
            | Self::Database(_)
            | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Payload(_) => "INVALID_PAYLOAD",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Listing(ListingError::InvalidParameter { .. }) => "INVALID_PARAMETER",
            Self::Lifecycle(LifecycleError::NotFound { .. }) | Self::UnknownRecord(_) => {
                "NOT_FOUND"
            }
            _ => "INTERNAL_ERROR",
        }
    }

    fn user_message(&self) -> String {
        match self {
            Self::Payload(rejection) => rejection.body_text(),
            Self::Validation(err) => err.to_string(),
            Self::UnknownRecord(kind) => format!("{} not found.", kind.label()),
            Self::Listing(ListingError::InvalidParameter { .. }) => self.to_string(),
            Self::Lifecycle(err) => err.user_message(),
            _ => LOAD_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(
                "event=http_error module=web status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        }

        let body = ErrorBody {
            ok: false,
            code: self.code(),
            message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}
