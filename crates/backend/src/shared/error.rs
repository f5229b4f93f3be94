use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api::MessageResponse;
use contracts::shared::metadata::ValidationError;
use sea_orm::DbErr;
use thiserror::Error;

/// Ошибки обработки запросов к API
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Record #{index} of the batch is invalid: {source}")]
    InvalidBatchItem {
        index: usize,
        #[source]
        source: ValidationError,
    },

    #[error("Stage not found")]
    NotFound,

    #[error("Database error: {0}")]
    Store(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedPayload(_)
            | AppError::Validation(_)
            | AppError::InvalidBatchItem { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::metadata::Violation;

    #[test]
    fn test_status_mapping() {
        let mut invalid = ValidationError::new("Stage");
        invalid.push("cost", Violation::Required);

        assert_eq!(
            AppError::MalformedPayload("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation(invalid.clone()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::InvalidBatchItem {
                index: 3,
                source: invalid
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Store(DbErr::Custom("down".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_batch_message_names_record() {
        let mut invalid = ValidationError::new("Stage");
        invalid.push("dept", Violation::TooLong { max: 2, actual: 3 });
        let err = AppError::InvalidBatchItem {
            index: 4,
            source: invalid,
        };
        assert_eq!(
            err.to_string(),
            "Record #4 of the batch is invalid: Stage validation failed: dept must be at most 2 characters long (got 3)"
        );
    }
}
