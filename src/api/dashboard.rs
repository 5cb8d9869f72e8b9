use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::db::{DirectoryRepository, PayrollRepository};
use crate::error::{AggregateError, ApiError};
use crate::model::attendance::{AttendanceStatus, AttendanceSummary};
use crate::model::employee::EmploymentStatus;
use crate::model::payroll::{Month, PayPeriod};
use crate::payroll::{AggregateSummary, aggregate_period};

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    /// Attendance day
    #[schema(example = "2026-01-12", value_type = String, format = "date")]
    #[param(value_type = String, example = "2026-01-12")]
    pub date: NaiveDate,
    #[schema(example = "December")]
    pub month: Month,
    #[schema(example = 2025)]
    pub year: i32,
}

#[derive(Serialize, ToSchema)]
pub struct DashboardResponse {
    pub total_employees: usize,
    pub on_leave: usize,
    /// Present or late on the attendance day
    pub present_today: usize,
    pub attendance: AttendanceSummary,
    /// Absent when the period has no payroll records yet
    pub payroll: Option<AggregateSummary>,
}

/// Headline figures for the landing page
#[utoipa::path(
    get,
    path = "/api/dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, body = DashboardResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("role_header" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(
    _auth: AuthUser,
    directory: web::Data<dyn DirectoryRepository>,
    payroll: web::Data<dyn PayrollRepository>,
    query: web::Query<DashboardQuery>,
) -> Result<HttpResponse, ApiError> {
    let employees = directory.employees();
    let on_leave = employees
        .iter()
        .filter(|e| e.status == EmploymentStatus::OnLeave)
        .count();

    let attendance = AttendanceSummary::from_records(&directory.attendance_on(query.date));
    let present_today =
        attendance.count(AttendanceStatus::Present) + attendance.count(AttendanceStatus::Late);

    let records = payroll.load_period(PayPeriod::new(query.month, query.year));
    let payroll = match aggregate_period(&records) {
        Ok(summary) => Some(summary),
        Err(AggregateError::EmptyPeriod) => None,
        Err(err) => return Err(err.into()),
    };

    Ok(HttpResponse::Ok().json(DashboardResponse {
        total_employees: employees.len(),
        on_leave,
        present_today,
        attendance,
        payroll,
    }))
}
