use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

use crate::model::payroll::PayrollStatus;

/// Rejected compensation inputs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid compensation: {0}")]
    InvalidCompensation(String),

    #[error("Deductions {total_deductions} exceed gross salary {gross_salary}")]
    NegativeNetPay {
        gross_salary: i64,
        total_deductions: i64,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("Payroll record for {employee_id} is paid and can no longer be edited")]
    RecordLocked { employee_id: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Incomplete record: {0}")]
    IncompleteRecord(String),

    #[error("No bank account to pay out to")]
    MissingPayoutTarget,

    #[error("Cannot move payroll record from {from} to {to}")]
    InvalidTransition {
        from: PayrollStatus,
        to: PayrollStatus,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("No payroll records in period")]
    EmptyPeriod,

    #[error("Payroll totals overflow: {0}")]
    Overflow(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateConfigError {
    #[error("Professional tax table is empty")]
    EmptySlabTable,

    #[error("Professional tax slabs must be strictly ascending (slab {0})")]
    UnorderedSlabs(usize),

    #[error("Only the last professional tax slab may be open-ended")]
    MisplacedOpenSlab,

    #[error("Last professional tax slab must be open-ended")]
    MissingOpenSlab,

    #[error("Negative amount or rate in statutory table: {0}")]
    Negative(&'static str),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Payroll record for {employee_id} in {period} not found")]
    NotFound { employee_id: String, period: String },

    #[error("Payroll record for {employee_id} in {period} already exists")]
    Duplicate { employee_id: String, period: String },

    #[error("Payroll record for {employee_id} is paid and can no longer be replaced")]
    Locked { employee_id: String },

    #[error("Payroll record for {employee_id} was changed by another request")]
    Conflict { employee_id: String },
}

/// Every failure a handler can surface, mapped onto an HTTP status.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Edit(EditError::Validation(_)) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Edit(EditError::RecordLocked { .. }) => StatusCode::CONFLICT,
            ApiError::Transition(_) => StatusCode::CONFLICT,
            ApiError::Aggregate(AggregateError::EmptyPeriod) => StatusCode::NOT_FOUND,
            ApiError::Aggregate(AggregateError::Overflow(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Repository(RepositoryError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Repository(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let message = self.to_string();

        tracing::warn!(status = %status_code, error = %message, "Request failed");

        HttpResponse::build(status_code).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_failures_to_statuses() {
        let cases = [
            (
                ApiError::from(ValidationError::InvalidCompensation("hra is negative".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::from(EditError::RecordLocked {
                    employee_id: "SSSPL001".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(TransitionError::MissingPayoutTarget),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(AggregateError::EmptyPeriod),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::from(RepositoryError::Conflict {
                    employee_id: "SSSPL004".into(),
                }),
                StatusCode::CONFLICT,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("HR/Admin only".into()), StatusCode::FORBIDDEN),
        ];

        for (error, status) in cases {
            assert_eq!(error.status_code(), status, "{error}");
        }
    }

    #[test]
    fn negative_net_pay_message_names_both_amounts() {
        let err = ValidationError::NegativeNetPay {
            gross_salary: 10000,
            total_deductions: 12000,
        };
        assert_eq!(err.to_string(), "Deductions 12000 exceed gross salary 10000");
    }
}
