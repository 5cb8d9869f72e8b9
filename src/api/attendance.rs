use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::db::DirectoryRepository;
use crate::error::ApiError;
use crate::model::attendance::{AttendanceEntry, AttendanceStatus, AttendanceSummary};
use crate::utils::search::filter_by_query;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct AttendanceQuery {
    #[schema(example = "2026-01-12", value_type = String, format = "date")]
    #[param(value_type = String, example = "2026-01-12")]
    pub date: NaiveDate,
    #[schema(example = "SSSPL00")]
    pub search: Option<String>,
    #[schema(example = "late")]
    pub status: Option<AttendanceStatus>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceRegisterResponse {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub data: Vec<AttendanceEntry>,
    /// Counts over the whole day, not just the filtered rows
    pub summary: AttendanceSummary,
}

/// Attendance register for one day
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Attendance register", body = AttendanceRegisterResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(("role_header" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    _auth: AuthUser,
    repo: web::Data<dyn DirectoryRepository>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, ApiError> {
    let records = repo.attendance_on(query.date);
    let summary = AttendanceSummary::from_records(&records);

    let data = filter_by_query(&records, query.search.as_deref().unwrap_or_default())
        .into_iter()
        .filter(|r| query.status.is_none_or(|status| r.status == status))
        .cloned()
        .map(AttendanceEntry::from)
        .collect();

    Ok(HttpResponse::Ok().json(AttendanceRegisterResponse {
        date: query.date,
        data,
        summary,
    }))
}
