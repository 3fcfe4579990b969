use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::usecases::subscriptions::SubscriptionError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: u16,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl From<SubscriptionError> for AppError {
    fn from(err: SubscriptionError) -> Self {
        match (err.status_code(), err) {
            (_, SubscriptionError::Internal(inner)) => AppError::Internal(inner),
            (StatusCode::NOT_FOUND, err) => AppError::NotFound(err.to_string()),
            (StatusCode::CONFLICT, err) => AppError::Conflict(err.to_string()),
            (_, err) => AppError::BadRequest(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Internal(_) => {
                // Don't leak internal error detail to client
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: status.as_u16(),
            message,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crates::domain::value_objects::{
        billing_specs::BillingSpecError, enums::billing_kinds::BillingKind,
        subscriptions::SubscriptionInputError,
    };
    use uuid::Uuid;

    #[test]
    fn use_case_errors_map_to_statuses() {
        let cases = [
            (
                SubscriptionError::InvalidInput(SubscriptionInputError::Billing(
                    BillingSpecError::InvalidCycleDay(42),
                )),
                StatusCode::BAD_REQUEST,
            ),
            (
                SubscriptionError::NotFound(Uuid::nil()),
                StatusCode::NOT_FOUND,
            ),
            (
                SubscriptionError::BillingKindChanged {
                    from: "fixed_expiry_date".to_string(),
                    to: BillingKind::RecurringDayOfMonth,
                },
                StatusCode::CONFLICT,
            ),
            (
                SubscriptionError::Internal(anyhow::anyhow!("password=hunter2")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected);
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn bad_request_keeps_validation_message() {
        let err = AppError::from(SubscriptionError::InvalidInput(
            SubscriptionInputError::Billing(BillingSpecError::InvalidDateFormat(
                "2026/01/18".to_string(),
            )),
        ));
        assert_eq!(
            err.to_string(),
            "Bad request: invalid date format \"2026/01/18\": expected YYYY-MM-DD"
        );
    }
}
