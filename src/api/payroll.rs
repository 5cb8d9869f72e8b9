use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::db::PayrollRepository;
use crate::error::{ApiError, RepositoryError};
use crate::model::payroll::{
    CompensationEdit, CompensationInput, Month, PayPeriod, PayrollRecord, PayrollStatus,
};
use crate::payroll::{
    AggregateSummary, CompanyProfile, Payslip, StatutoryRates, aggregate_period, apply_edit,
    derive_payroll_record, process_period, transition_status,
};
use crate::utils::search::filter_by_query;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct PeriodQuery {
    #[schema(example = "December")]
    pub month: Month,

    #[schema(example = 2025)]
    pub year: i32,

    /// Case-insensitive match on employee name or id
    #[schema(example = "amit")]
    pub search: Option<String>,
}

impl PeriodQuery {
    fn period(&self) -> PayPeriod {
        PayPeriod::new(self.month, self.year)
    }
}

#[derive(Serialize, ToSchema)]
pub struct PayrollRegisterResponse {
    pub period: PayPeriod,
    pub data: Vec<PayrollRecord>,
    /// Records matching the search
    #[schema(example = 1)]
    pub shown: usize,
    /// Records in the period
    #[schema(example = 5)]
    pub total: usize,
}

#[derive(Deserialize, ToSchema)]
pub struct StatusChange {
    #[schema(example = "processed")]
    pub status: PayrollStatus,
}

#[derive(Serialize, ToSchema)]
pub struct ProcessFailure {
    pub employee_id: String,
    pub reason: String,
}

#[derive(Serialize, ToSchema)]
pub struct ProcessResponse {
    pub processed: Vec<String>,
    pub failed: Vec<ProcessFailure>,
}

type RecordPath = web::Path<(i32, Month, String)>;

fn load_record(
    repo: &dyn PayrollRepository,
    period: PayPeriod,
    employee_id: &str,
) -> Result<PayrollRecord, ApiError> {
    repo.find(period, employee_id).ok_or_else(|| {
        RepositoryError::NotFound {
            employee_id: employee_id.to_string(),
            period: period.to_string(),
        }
        .into()
    })
}

/// Payroll register for a period
#[utoipa::path(
    get,
    path = "/api/payroll",
    params(PeriodQuery),
    responses(
        (status = 200, body = PayrollRegisterResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn list_payroll(
    _auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, ApiError> {
    let period = query.period();
    let records = repo.load_period(period);
    let total = records.len();

    let data: Vec<PayrollRecord> =
        filter_by_query(&records, query.search.as_deref().unwrap_or_default())
            .into_iter()
            .cloned()
            .collect();

    Ok(HttpResponse::Ok().json(PayrollRegisterResponse {
        period,
        shown: data.len(),
        total,
        data,
    }))
}

/// Organisation-wide totals for a period
#[utoipa::path(
    get,
    path = "/api/payroll/summary",
    params(PeriodQuery),
    responses(
        (status = 200, body = AggregateSummary),
        (status = 404, description = "No payroll records in period")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn payroll_summary(
    _auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = repo.load_period(query.period());
    let summary = aggregate_period(&records)?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Create a draft payroll record
#[utoipa::path(
    post,
    path = "/api/payroll",
    request_body = CompensationInput,
    responses(
        (status = 201, body = PayrollRecord),
        (status = 403, description = "HR/Admin only"),
        (status = 409, description = "Record already exists"),
        (status = 422, description = "Invalid compensation or negative net pay")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn create_payroll(
    auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    rates: web::Data<StatutoryRates>,
    payload: web::Json<CompensationInput>,
) -> Result<HttpResponse, ApiError> {
    auth.require_hr_or_admin()?;

    let record = derive_payroll_record(&payload, &rates)?;
    repo.insert(record.clone())?;

    info!(
        employee_id = %record.employee_id,
        period = %record.period(),
        net_pay = record.net_pay,
        user = %auth.username,
        "Payroll draft created"
    );

    Ok(HttpResponse::Created().json(record))
}

/// Fetch one payroll record
#[utoipa::path(
    get,
    path = "/api/payroll/{year}/{month}/{employee_id}",
    params(
        ("year", description = "Pay period year"),
        ("month", description = "Pay period month name"),
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, body = PayrollRecord),
        (status = 404, description = "Payroll record not found")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn get_payroll(
    _auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    path: RecordPath,
) -> Result<HttpResponse, ApiError> {
    let (year, month, employee_id) = path.into_inner();
    let record = load_record(repo.get_ref(), PayPeriod::new(month, year), &employee_id)?;

    Ok(HttpResponse::Ok().json(record))
}

/// Edit a record that is not yet paid
#[utoipa::path(
    put,
    path = "/api/payroll/{year}/{month}/{employee_id}",
    request_body = CompensationEdit,
    params(
        ("year", description = "Pay period year"),
        ("month", description = "Pay period month name"),
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, body = PayrollRecord),
        (status = 404, description = "Payroll record not found"),
        (status = 409, description = "Record is paid"),
        (status = 422, description = "Invalid compensation or negative net pay")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn update_payroll(
    auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    rates: web::Data<StatutoryRates>,
    path: RecordPath,
    body: web::Json<CompensationEdit>,
) -> Result<HttpResponse, ApiError> {
    auth.require_hr_or_admin()?;

    let (year, month, employee_id) = path.into_inner();
    let current = load_record(repo.get_ref(), PayPeriod::new(month, year), &employee_id)?;

    let updated = apply_edit(&current, &body, &rates)?;
    repo.replace(&current, updated.clone())?;

    info!(
        employee_id = %employee_id,
        previous_status = %current.status,
        net_pay = updated.net_pay,
        "Payroll record updated"
    );

    Ok(HttpResponse::Ok().json(updated))
}

/// Move a record to its next status
#[utoipa::path(
    put,
    path = "/api/payroll/{year}/{month}/{employee_id}/status",
    request_body = StatusChange,
    params(
        ("year", description = "Pay period year"),
        ("month", description = "Pay period month name"),
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, body = PayrollRecord),
        (status = 403, description = "Payment confirmation is admin only"),
        (status = 404, description = "Payroll record not found"),
        (status = 409, description = "Transition not allowed")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn update_status(
    auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    path: RecordPath,
    body: web::Json<StatusChange>,
) -> Result<HttpResponse, ApiError> {
    if body.status == PayrollStatus::Paid {
        auth.require_admin()?;
    } else {
        auth.require_hr_or_admin()?;
    }

    let (year, month, employee_id) = path.into_inner();
    let current = load_record(repo.get_ref(), PayPeriod::new(month, year), &employee_id)?;
    let from = current.status;

    let moved = transition_status(current.clone(), body.status).inspect_err(|e| {
        warn!(employee_id = %employee_id, from = %from, to = %body.status, error = %e, "Status change rejected");
    })?;
    repo.replace(&current, moved.clone())?;

    info!(employee_id = %employee_id, from = %from, to = %moved.status, "Payroll status changed");

    Ok(HttpResponse::Ok().json(moved))
}

/// Process every draft of a period
#[utoipa::path(
    post,
    path = "/api/payroll/process",
    params(PeriodQuery),
    responses(
        (status = 200, body = ProcessResponse),
        (status = 403, description = "HR/Admin only")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn process_payroll(
    auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    query: web::Query<PeriodQuery>,
) -> Result<HttpResponse, ApiError> {
    auth.require_hr_or_admin()?;

    let period = query.period();
    let outcome = process_period(repo.load_period(period));

    let mut failed: Vec<ProcessFailure> = outcome
        .failed
        .into_iter()
        .map(|(record, err)| ProcessFailure {
            employee_id: record.employee_id,
            reason: err.to_string(),
        })
        .collect();

    let mut processed = Vec::with_capacity(outcome.processed.len());
    for record in outcome.processed {
        let mut draft = record.clone();
        draft.status = PayrollStatus::Draft;
        let employee_id = record.employee_id.clone();

        match repo.replace(&draft, record) {
            Ok(()) => processed.push(employee_id),
            Err(err) => {
                warn!(employee_id = %employee_id, error = %err, "Processed record not stored");
                failed.push(ProcessFailure {
                    employee_id,
                    reason: err.to_string(),
                });
            }
        }
    }

    info!(
        period = %period,
        processed = processed.len(),
        failed = failed.len(),
        "Payroll run processed"
    );

    Ok(HttpResponse::Ok().json(ProcessResponse { processed, failed }))
}

/// Payslip view of one record
#[utoipa::path(
    get,
    path = "/api/payroll/{year}/{month}/{employee_id}/payslip",
    params(
        ("year", description = "Pay period year"),
        ("month", description = "Pay period month name"),
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, body = Payslip),
        (status = 404, description = "Payroll record not found")
    ),
    security(("role_header" = [])),
    tag = "Payroll"
)]
pub async fn get_payslip(
    _auth: AuthUser,
    repo: web::Data<dyn PayrollRepository>,
    company: web::Data<CompanyProfile>,
    path: RecordPath,
) -> Result<HttpResponse, ApiError> {
    let (year, month, employee_id) = path.into_inner();
    let record = load_record(repo.get_ref(), PayPeriod::new(month, year), &employee_id)?;

    Ok(HttpResponse::Ok().json(Payslip::from_record(&record, &company)))
}
