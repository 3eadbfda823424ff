//! Maps catalog errors to HTTP responses.
//!
//! Client errors and not-found answers echo the error text. Store errors are
//! logged and answered with the operation's generic failure message.

use crate::app::CatalogError;
use crate::domain::toy::ValidationError;
use crate::transport::http::types::{ErrorBody, MessageBody};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

pub const FAILED_FETCH_TOYS: &str = "Failed to fetch toys.";
pub const FAILED_FETCH_TOY: &str = "Failed to fetch toy.";
pub const FAILED_ADD_TOY: &str = "Failed to add toy.";
pub const FAILED_UPDATE_TOY: &str = "Failed to update toy.";
pub const FAILED_DELETE_TOY: &str = "Failed to delete toy.";

#[derive(Debug)]
pub struct ApiError {
    pub error: CatalogError,
    /// Returned to the caller instead of the store error's details.
    pub failure: &'static str,
}

impl ApiError {
    pub fn new(error: CatalogError, failure: &'static str) -> Self {
        Self { error, failure }
    }

    pub fn status(&self) -> StatusCode {
        match &self.error {
            CatalogError::InvalidId
            | CatalogError::Validation(_)
            | CatalogError::MissingEmail
            | CatalogError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            CatalogError::NoToysForSeller | CatalogError::NotFound | CatalogError::NotUpdated => {
                StatusCode::NOT_FOUND
            }
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self.error {
            CatalogError::NoToysForSeller => (
                status,
                Json(MessageBody {
                    message: self.error.to_string(),
                }),
            )
                .into_response(),
            CatalogError::Store(e) => {
                tracing::error!(error = %e, "{}", self.failure);
                (status, Json(ErrorBody::new(self.failure))).into_response()
            }
            other => (status, Json(ErrorBody::new(other.to_string()))).into_response(),
        }
    }
}

/// A body axum could not deserialize becomes a validation error.
pub fn payload_rejection(rejection: JsonRejection) -> CatalogError {
    CatalogError::Validation(ValidationError::Malformed(rejection.body_text()))
}
