use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::utils::search::Searchable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum EmploymentStatus {
    Active,
    OnLeave,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "SSSPL003",
        "name": "Amit Patel",
        "department": "Sales",
        "designation": "Regional Head",
        "email": "amit.patel@srinivasa.in",
        "status": "active"
    })
)]
pub struct Employee {
    #[schema(example = "SSSPL003")]
    pub employee_id: String,

    #[schema(example = "Amit Patel")]
    pub name: String,

    #[schema(example = "Sales")]
    pub department: String,

    #[schema(example = "Regional Head")]
    pub designation: String,

    #[schema(example = "amit.patel@srinivasa.in")]
    pub email: String,

    #[schema(example = "active")]
    pub status: EmploymentStatus,
}

impl Searchable for Employee {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn identifier(&self) -> &str {
        &self.employee_id
    }
}
