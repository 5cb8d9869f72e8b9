use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::auth::AuthUser;
use crate::db::DirectoryRepository;
use crate::error::ApiError;
use crate::model::employee::Employee;
use crate::utils::search::filter_by_query;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EmployeeQuery {
    /// Case-insensitive match on name or employee id
    #[schema(example = "patel")]
    pub search: Option<String>,
    #[schema(example = "Sales")]
    pub department: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 1)]
    pub shown: usize,
    #[schema(example = 6)]
    pub total: usize,
}

/// Employee directory
#[utoipa::path(
    get,
    path = "/api/employee",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Employee directory", body = EmployeeListResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Employee",
    security(("role_header" = []))
)]
pub async fn list_employees(
    _auth: AuthUser,
    repo: web::Data<dyn DirectoryRepository>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let employees = repo.employees();
    let total = employees.len();

    let data: Vec<Employee> =
        filter_by_query(&employees, query.search.as_deref().unwrap_or_default())
            .into_iter()
            .filter(|e| {
                query
                    .department
                    .as_deref()
                    .is_none_or(|department| e.department.eq_ignore_ascii_case(department))
            })
            .cloned()
            .collect();

    Ok(HttpResponse::Ok().json(EmployeeListResponse {
        shown: data.len(),
        total,
        data,
    }))
}
