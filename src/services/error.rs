use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::league::lifecycle::LifecycleError;
use crate::models::common::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum LeagueError {
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Destructive operation requires confirm=true")]
    ConfirmationRequired,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl LeagueError {
    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation(message.into())
    }

    /// Turn a unique-constraint violation into a 409, pass anything else through.
    pub fn conflict_on_unique(error: sqlx::Error, message: &str) -> Self {
        match error.as_database_error().and_then(|e| e.code()) {
            Some(code) if code == "23505" => LeagueError::Conflict(message.to_string()),
            _ => LeagueError::Database(error),
        }
    }
}

impl ResponseError for LeagueError {
    fn status_code(&self) -> StatusCode {
        match self {
            LeagueError::NotFound(_) => StatusCode::NOT_FOUND,
            LeagueError::Lifecycle(LifecycleError::InvalidDelta(_)) => StatusCode::BAD_REQUEST,
            LeagueError::Lifecycle(_) | LeagueError::Conflict(_) => StatusCode::CONFLICT,
            LeagueError::Validation(_) | LeagueError::ConfirmationRequired => StatusCode::BAD_REQUEST,
            LeagueError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // Store details stay in the logs
            LeagueError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ApiResponse::<()>::error(message))
    }
}
