use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::{debug, error};

use crate::api::ApiClientError;
use crate::purchase::handoff::HandoffError;
use crate::purchase::PurchaseError;
use crate::utils::response::error as error_response;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error("Invalid confirmation: {0}")]
    Handoff(#[from] HandoffError),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError(String),
}

impl From<ApiClientError> for AppError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::NotFound(resource) => AppError::NotFound(resource),
            other => AppError::ExternalServiceError(other.to_string()),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Purchase(PurchaseError::MissingSelection) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Purchase(PurchaseError::DialogClosed) => StatusCode::CONFLICT,
            AppError::Purchase(PurchaseError::TotalOverflow) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Handoff(HandoffError::Encode(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Handoff(HandoffError::SoldOut(_)) => StatusCode::CONFLICT,
            AppError::Handoff(_) => StatusCode::BAD_REQUEST,
            AppError::ExternalServiceError(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Purchase(PurchaseError::MissingSelection) => "MISSING_SELECTION",
            AppError::Purchase(PurchaseError::DialogClosed) => "DIALOG_CLOSED",
            AppError::Purchase(PurchaseError::TotalOverflow) => "TOTAL_OVERFLOW",
            AppError::Handoff(HandoffError::Encode(_)) => "INTERNAL_SERVER_ERROR",
            AppError::Handoff(HandoffError::SoldOut(_)) => "SOLD_OUT",
            AppError::Handoff(_) => "INVALID_CONFIRMATION",
            AppError::ExternalServiceError(_) => "EXTERNAL_SERVICE_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn log(&self) {
        match self {
            // Inline buyer feedback, not a fault.
            AppError::Purchase(err) => debug!(error = %err, "Purchase dialog error"),
            AppError::ValidationError(msg) | AppError::NotFound(msg) => {
                debug!(code = self.code(), message = %msg, "Request rejected");
            }
            AppError::Handoff(err @ HandoffError::Encode(_)) => {
                error!(error = ?err, "Failed to encode confirmation");
            }
            // Malformed or edited query from the client.
            AppError::Handoff(err) => debug!(error = %err, "Confirmation rejected"),
            AppError::ExternalServiceError(msg) | AppError::InternalServerError(msg) => {
                error!(error = ?self, message = %msg, "Application error");
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        self.log();

        // Upstream and internal failures keep their details in the log only
        let public_message = match &self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Purchase(err) => err.to_string(),
            AppError::Handoff(HandoffError::Encode(_)) | AppError::InternalServerError(_) => {
                "An internal error occurred".to_string()
            }
            AppError::Handoff(err) => err.to_string(),
            AppError::ExternalServiceError(_) => "The ticketing service is unavailable".to_string(),
        };

        error_response(code, public_message, None, status)
    }
}
