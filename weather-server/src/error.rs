use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};
use weather_core::{ProviderError, ServiceError};

/// Error returned by HTTP handlers, rendered as `{"detail": "..."}`.
#[derive(Debug)]
pub enum ApiError {
    Service(ServiceError),
    /// The request body could not be decoded into a submission.
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Service(ServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            // provider-reported errors are all treated as the caller's problem
            ApiError::Service(ServiceError::Upstream(ProviderError::Rejected(_))) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Service(ServiceError::Upstream(ProviderError::Transport(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
        }
    }

    pub fn detail(&self) -> String {
        match self {
            ApiError::Service(err) => err.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        ApiError::Service(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.detail();

        if status.is_server_error() {
            error!(%status, %detail, "request failed");
        } else {
            debug!(%status, %detail, "request rejected");
        }

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
