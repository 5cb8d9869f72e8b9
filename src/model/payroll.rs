use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, de};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::utils::search::Searchable;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Display,
    EnumString,
    ToSchema,
)]
#[strum(ascii_case_insensitive)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    /// Number of calendar days in this month of `year`.
    pub fn days_in(self, year: i32) -> u32 {
        let (next_year, next_month) = if self == Month::December {
            (year + 1, 1)
        } else {
            (year, self.number() + 1)
        };

        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first_of_next| first_of_next.pred_opt())
            .map(|last| last.day())
            .unwrap_or(31)
    }
}

// Month names arrive in paths, queries and bodies in any case.
impl<'de> Deserialize<'de> for Month {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Month::from_str(&name).map_err(|_| de::Error::custom(format!("unknown month `{name}`")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
pub struct PayPeriod {
    #[schema(example = "December")]
    pub month: Month,
    #[schema(example = 2025)]
    pub year: i32,
}

impl PayPeriod {
    pub fn new(month: Month, year: i32) -> Self {
        Self { month, year }
    }

    pub fn days(&self) -> u32 {
        self.month.days_in(self.year)
    }

    pub fn has_valid_year(&self) -> bool {
        (1000..=9999).contains(&self.year)
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PayrollStatus {
    Draft,
    Processed,
    Paid,
}

impl PayrollStatus {
    /// The only status this one may move to.
    pub fn next(self) -> Option<Self> {
        match self {
            PayrollStatus::Draft => Some(PayrollStatus::Processed),
            PayrollStatus::Processed => Some(PayrollStatus::Paid),
            PayrollStatus::Paid => None,
        }
    }
}

/// Earnings side of a payslip. Gross salary is always their sum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Earnings {
    #[schema(example = 50000)]
    pub basic_salary: i64,
    #[schema(example = 25000)]
    pub hra: i64,
    #[schema(example = 15000)]
    pub special_allowance: i64,
    #[schema(example = 5000)]
    pub conveyance: i64,
    #[schema(example = 5000)]
    pub medical_allowance: i64,
}

impl Earnings {
    pub fn components(&self) -> [(&'static str, i64); 5] {
        [
            ("basic_salary", self.basic_salary),
            ("hra", self.hra),
            ("special_allowance", self.special_allowance),
            ("conveyance", self.conveyance),
            ("medical_allowance", self.medical_allowance),
        ]
    }
}

/// Statutory amounts that replace the rate-table defaults when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeductionOverrides {
    pub pf_employee: Option<i64>,
    pub pf_employer: Option<i64>,
    pub esic_employee: Option<i64>,
    pub esic_employer: Option<i64>,
    pub professional_tax: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompensationInput {
    #[schema(example = "SSSPL001")]
    pub employee_id: String,
    #[schema(example = "Rajesh Kumar Singh")]
    pub employee_name: String,
    #[schema(example = "Engineering")]
    pub department: String,
    #[schema(example = "Senior Engineer")]
    pub designation: String,
    pub month: Month,
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 26)]
    pub pay_days: u32,
    #[schema(example = 1200000)]
    pub ctc: i64,
    pub earnings: Earnings,
    #[serde(default)]
    #[schema(example = 5000)]
    pub tds: i64,
    #[serde(default)]
    pub overrides: DeductionOverrides,
    #[schema(example = "HDFC XXXXX1234", nullable = true)]
    pub bank_account: Option<String>,
}

impl CompensationInput {
    pub fn period(&self) -> PayPeriod {
        PayPeriod::new(self.month, self.year)
    }
}

/// Partial update of a not-yet-paid record. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CompensationEdit {
    pub pay_days: Option<u32>,
    pub ctc: Option<i64>,
    pub basic_salary: Option<i64>,
    pub hra: Option<i64>,
    pub special_allowance: Option<i64>,
    pub conveyance: Option<i64>,
    pub medical_allowance: Option<i64>,
    pub tds: Option<i64>,
    #[serde(default)]
    pub overrides: DeductionOverrides,
    /// Drop the stored PF/ESIC/professional tax and re-apply the rate table.
    #[serde(default)]
    pub recalculate_statutory: bool,
    pub bank_account: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "employee_id": "SSSPL001",
    "employee_name": "Rajesh Kumar Singh",
    "department": "Engineering",
    "designation": "Senior Engineer",
    "month": "December",
    "year": 2025,
    "pay_days": 26,
    "ctc": 1200000,
    "gross_salary": 100000,
    "basic_salary": 50000,
    "hra": 25000,
    "special_allowance": 15000,
    "conveyance": 5000,
    "medical_allowance": 5000,
    "pf_employee": 6000,
    "pf_employer": 6000,
    "esic_employee": 750,
    "esic_employer": 3250,
    "professional_tax": 200,
    "tds": 5000,
    "total_deductions": 11950,
    "net_pay": 88050,
    "status": "paid",
    "bank_account": "HDFC XXXXX1234"
}))]
pub struct PayrollRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub designation: String,

    pub month: Month,
    pub year: i32,
    pub pay_days: u32,

    pub ctc: i64,
    pub gross_salary: i64,
    pub basic_salary: i64,
    pub hra: i64,
    pub special_allowance: i64,
    pub conveyance: i64,
    pub medical_allowance: i64,

    pub pf_employee: i64,
    pub pf_employer: i64,
    pub esic_employee: i64,
    pub esic_employer: i64,
    pub professional_tax: i64,
    pub tds: i64,
    pub total_deductions: i64,

    pub net_pay: i64,
    pub status: PayrollStatus,

    /// Masked display string, e.g. "HDFC XXXXX1234".
    pub bank_account: Option<String>,
}

impl PayrollRecord {
    pub fn period(&self) -> PayPeriod {
        PayPeriod::new(self.month, self.year)
    }

    pub fn earnings(&self) -> Earnings {
        Earnings {
            basic_salary: self.basic_salary,
            hra: self.hra,
            special_allowance: self.special_allowance,
            conveyance: self.conveyance,
            medical_allowance: self.medical_allowance,
        }
    }

    /// Employer-side PF and ESIC; informational, never part of total deductions.
    /// `None` when the sum does not fit in an `i64`.
    pub fn employer_contributions(&self) -> Option<i64> {
        self.pf_employer.checked_add(self.esic_employer)
    }

    pub fn is_locked(&self) -> bool {
        self.status == PayrollStatus::Paid
    }
}

impl Searchable for PayrollRecord {
    fn display_name(&self) -> &str {
        &self.employee_name
    }

    fn identifier(&self) -> &str {
        &self.employee_id
    }
}
