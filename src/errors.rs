use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or out-of-range input. The caller can re-prompt with the same form.
    #[error("{0}")]
    Validation(String),

    /// The record's current status does not allow the requested operation.
    #[error("{0}")]
    State(String),

    #[error("{0}")]
    NotFound(String),

    /// The persistence backend failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::State(_) => "state",
            AppError::NotFound(_) => "not_found",
            AppError::Backend(_) => "backend",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::State(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Backend(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    kind: &'static str,
    error: String,
    retryable: bool,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Backend(e) = &self {
            tracing::error!("Backend error: {e:?}");
        }

        let body = ErrorBody {
            success: false,
            kind: self.kind(),
            error: self.to_string(),
            retryable: matches!(self, AppError::Backend(_)),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Backend(e.into())
    }
}
