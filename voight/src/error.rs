//! Error taxonomy for interview operations.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde_json::json;

use crate::models::InterviewStatus;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("no interview with id {0}")]
    NotFound(u64),

    #[error("interview {id} is {actual}, expected {expected}")]
    InvalidState {
        id: u64,
        expected: InterviewStatus,
        actual: InterviewStatus,
    },

    #[error("{0}")]
    InvalidOperation(String),

    #[error("invalid game catalog: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidState { .. } => StatusCode::CONFLICT,
            Error::InvalidOperation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_state_message_names_both_statuses() {
        let err = Error::InvalidState {
            id: 7,
            expected: InterviewStatus::InProgress,
            actual: InterviewStatus::Finished,
        };
        let message = err.to_string();
        assert!(message.contains("finished"));
        assert!(message.contains("in-progress"));
    }
}
