use crate::api::attendance::{AttendanceQuery, AttendanceRegisterResponse};
use crate::api::dashboard::{DashboardQuery, DashboardResponse};
use crate::api::employee::{EmployeeListResponse, EmployeeQuery};
use crate::api::payroll::{
    PayrollRegisterResponse, PeriodQuery, ProcessFailure, ProcessResponse, StatusChange,
};
use crate::model::attendance::{
    AttendanceEntry, AttendanceRecord, AttendanceStatus, AttendanceSummary, StatusCount,
};
use crate::model::employee::{Employee, EmploymentStatus};
use crate::model::payroll::{
    CompensationEdit, CompensationInput, DeductionOverrides, Earnings, Month, PayPeriod,
    PayrollRecord, PayrollStatus,
};
use crate::payroll::payslip::PayslipLine;
use crate::payroll::{AggregateSummary, CompanyProfile, DepartmentTotals, Payslip};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

pub struct RoleHeader;

impl Modify for RoleHeader {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "role_header",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-Role"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Payroll API",
        version = "1.0.0",
        description = r#"
## HRM Payroll

Payroll register, payslips and period summaries, with the employee
directory and daily attendance register alongside.

### Payroll lifecycle
`draft` → `processed` → `paid`. Processing re-validates every derived
amount; payment needs a bank account and an admin. Paid records are
read-only.

### Security
Callers identify themselves with the `X-Role` (`admin`, `hr`, `employee`)
and `X-User` headers. Writes need HR or Admin.
"#,
    ),
    paths(
        crate::api::payroll::list_payroll,
        crate::api::payroll::payroll_summary,
        crate::api::payroll::create_payroll,
        crate::api::payroll::get_payroll,
        crate::api::payroll::update_payroll,
        crate::api::payroll::update_status,
        crate::api::payroll::process_payroll,
        crate::api::payroll::get_payslip,

        crate::api::employee::list_employees,

        crate::api::attendance::list_attendance,

        crate::api::dashboard::dashboard
    ),
    components(
        schemas(
            Month,
            PayPeriod,
            PayrollStatus,
            Earnings,
            DeductionOverrides,
            CompensationInput,
            CompensationEdit,
            PayrollRecord,
            PeriodQuery,
            PayrollRegisterResponse,
            StatusChange,
            ProcessFailure,
            ProcessResponse,
            AggregateSummary,
            DepartmentTotals,
            CompanyProfile,
            Payslip,
            PayslipLine,
            Employee,
            EmploymentStatus,
            EmployeeQuery,
            EmployeeListResponse,
            AttendanceRecord,
            AttendanceEntry,
            AttendanceStatus,
            AttendanceSummary,
            StatusCount,
            AttendanceQuery,
            AttendanceRegisterResponse,
            DashboardQuery,
            DashboardResponse
        )
    ),
    modifiers(&RoleHeader),
    tags(
        (name = "Payroll", description = "Payroll register, lifecycle and payslips"),
        (name = "Employee", description = "Employee directory"),
        (name = "Attendance", description = "Daily attendance register"),
        (name = "Dashboard", description = "Landing page figures"),
    )
)]
pub struct ApiDoc;
