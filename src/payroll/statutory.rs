use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::RateConfigError;

/// 100% expressed in basis points.
const FULL_BP: i128 = 10_000;

/// One professional tax band. `up_to` is inclusive; `None` closes the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfessionalTaxSlab {
    #[schema(example = 20000, nullable = true)]
    pub up_to: Option<i64>,
    #[schema(example = 150)]
    pub amount: i64,
}

/// Rates used to fill PF, ESIC and professional tax on new records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatutoryRates {
    pub pf_employee_bp: u32,
    pub pf_employer_bp: u32,
    /// ESIC applies while gross salary is at or below this ceiling.
    pub esic_ceiling: i64,
    pub esic_employee_bp: u32,
    pub esic_employer_bp: u32,
    pub professional_tax: Vec<ProfessionalTaxSlab>,
}

impl Default for StatutoryRates {
    fn default() -> Self {
        Self {
            pf_employee_bp: 1_200,
            pf_employer_bp: 1_200,
            esic_ceiling: 21_000,
            esic_employee_bp: 75,
            esic_employer_bp: 325,
            // Telangana slabs
            professional_tax: vec![
                ProfessionalTaxSlab {
                    up_to: Some(15_000),
                    amount: 0,
                },
                ProfessionalTaxSlab {
                    up_to: Some(20_000),
                    amount: 150,
                },
                ProfessionalTaxSlab {
                    up_to: None,
                    amount: 200,
                },
            ],
        }
    }
}

/// `amount * bp / 10000`, rounded half-up to the whole unit.
fn share_of(amount: i64, bp: u32) -> i64 {
    let share = (i128::from(amount) * i128::from(bp) + FULL_BP / 2) / FULL_BP;
    i64::try_from(share).unwrap_or(i64::MAX)
}

impl StatutoryRates {
    /// Loads and validates a JSON rate table.
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading rate table {}", path.display()))?;
        let rates: StatutoryRates = serde_json::from_str(&raw)
            .with_context(|| format!("parsing rate table {}", path.display()))?;
        rates.validate()?;
        Ok(rates)
    }

    pub fn validate(&self) -> Result<(), RateConfigError> {
        if self.esic_ceiling < 0 {
            return Err(RateConfigError::Negative("esic_ceiling"));
        }

        let slabs = &self.professional_tax;
        let Some(last) = slabs.last() else {
            return Err(RateConfigError::EmptySlabTable);
        };
        if last.up_to.is_some() {
            return Err(RateConfigError::MissingOpenSlab);
        }

        let mut previous: Option<i64> = None;
        for (index, slab) in slabs.iter().enumerate() {
            if slab.amount < 0 {
                return Err(RateConfigError::Negative("professional_tax.amount"));
            }
            if index + 1 == slabs.len() {
                break;
            }
            let Some(up_to) = slab.up_to else {
                return Err(RateConfigError::MisplacedOpenSlab);
            };
            if up_to < 0 {
                return Err(RateConfigError::Negative("professional_tax.up_to"));
            }
            if previous.is_some_and(|prev| up_to <= prev) {
                return Err(RateConfigError::UnorderedSlabs(index));
            }
            previous = Some(up_to);
        }

        Ok(())
    }

    /// (employee, employer) provident fund on `basic_salary`.
    pub fn provident_fund(&self, basic_salary: i64) -> (i64, i64) {
        (
            share_of(basic_salary, self.pf_employee_bp),
            share_of(basic_salary, self.pf_employer_bp),
        )
    }

    /// (employee, employer) ESIC on `gross_salary`; zero above the ceiling.
    pub fn esic(&self, gross_salary: i64) -> (i64, i64) {
        if gross_salary > self.esic_ceiling {
            return (0, 0);
        }
        (
            share_of(gross_salary, self.esic_employee_bp),
            share_of(gross_salary, self.esic_employer_bp),
        )
    }

    pub fn professional_tax(&self, gross_salary: i64) -> i64 {
        self.professional_tax
            .iter()
            .find(|slab| slab.up_to.is_none_or(|limit| gross_salary <= limit))
            .map(|slab| slab.amount)
            .unwrap_or(0)
    }
}
