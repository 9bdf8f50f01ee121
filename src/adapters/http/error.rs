//! API error responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::domain::allocation::AllocationError;
use crate::usecases::stock_search::SearchError;

/// JSON error body. `warning` is the text the UI shows in its warning box.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Errors surfaced by the dashboard API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),
    #[error("Invalid query string: {0}")]
    InvalidQuery(#[from] QueryRejection),
    #[error("Too many suggestion requests, try again shortly")]
    RateLimited,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Allocation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Search(SearchError::MissingTicker)
            | Self::InvalidBody(_)
            | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::Search(SearchError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Search(SearchError::Source(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn warning(&self) -> Option<String> {
        match self {
            Self::Allocation(e) => Some(e.warning()),
            Self::Search(SearchError::MissingTicker) => Some(self.to_string()),
            Self::InvalidBody(_) => Some("Please enter a numeric investment amount.".to_string()),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
            warning: self.warning(),
        };
        (status, Json(body)).into_response()
    }
}
