use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use notesync_core::auth::AuthError;
use notesync_core::notes::NoteError;
use notesync_core::storage::{repository_error_to_status_code, RepositoryError};

/// Unified handler error, mapped onto HTTP responses.
///
/// Validation and auth failures carry their specific message to the caller.
/// Storage failures answer with a generic body; the detail goes to the log
/// only, and the process keeps serving.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] NoteError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::Auth(auth_err) => match auth_err {
                AuthError::MissingCredentials | AuthError::WeakPassword { .. } => {
                    (StatusCode::BAD_REQUEST, self.to_string())
                }
                AuthError::DuplicateEmail => (StatusCode::CONFLICT, self.to_string()),
                AuthError::InvalidCredentials => (StatusCode::UNAUTHORIZED, self.to_string()),
                AuthError::Hash(_) => {
                    tracing::error!(error = %self, "Password hashing failure");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Internal server error".to_string(),
                    )
                }
            },

            AppError::Storage(repo_err) => {
                let status = StatusCode::from_u16(repository_error_to_status_code(repo_err))
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    tracing::error!(error = %self, "Storage failure");
                    (status, "Internal server error".to_string())
                } else {
                    (status, self.to_string())
                }
            }
        };

        (status, message).into_response()
    }
}
