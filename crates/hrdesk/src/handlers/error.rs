use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hrdesk_core::{staff::StaffError, storage::RepositoryError};

/// Handler error carrying any failure.
///
/// Status codes:
///
/// - invalid employee or vacation payload (`StaffError`, `InvalidData`) -> 400
/// - unknown employee or vacation (`NotFound`) -> 404
/// - duplicate record (`AlreadyExists`) -> 409
/// - storage unreachable (`ConnectionFailed`) -> 503
/// - anything else -> 500
pub struct AppError(pub anyhow::Error);

impl AppError {
    fn status_code(&self) -> StatusCode {
        if self.0.downcast_ref::<StaffError>().is_some() {
            return StatusCode::BAD_REQUEST;
        }

        match self.0.downcast_ref::<RepositoryError>() {
            Some(RepositoryError::InvalidData(_)) => StatusCode::BAD_REQUEST,
            Some(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Some(RepositoryError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            Some(RepositoryError::ConnectionFailed(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Some(RepositoryError::QueryFailed(_) | RepositoryError::Serialization(_)) | None => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        if status_code.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        }

        (status_code, self.0.to_string()).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
