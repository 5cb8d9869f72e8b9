use serde::Serialize;
use utoipa::ToSchema;

use crate::model::payroll::{PayrollRecord, PayrollStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CompanyProfile {
    #[schema(example = "Srinivasa Sales and Service Pvt Ltd")]
    pub name: String,
    #[schema(example = "Somajiguda, Hyderabad")]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PayslipLine {
    #[schema(example = "Basic Salary")]
    pub label: String,
    #[schema(example = 50000)]
    pub amount: i64,
}

fn line(label: &str, amount: i64) -> PayslipLine {
    PayslipLine {
        label: label.to_string(),
        amount,
    }
}

/// Printable view of one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Payslip {
    pub company: CompanyProfile,
    #[schema(example = "December 2025")]
    pub pay_period: String,
    pub pay_days: u32,
    pub employee_id: String,
    pub employee_name: String,
    pub department: String,
    pub designation: String,
    pub earnings: Vec<PayslipLine>,
    pub gross_salary: i64,
    pub deductions: Vec<PayslipLine>,
    pub total_deductions: i64,
    /// Employer PF and ESIC, shown for reference only.
    pub employer_contributions: Vec<PayslipLine>,
    pub net_pay: i64,
    pub credited_to: Option<String>,
    pub status: PayrollStatus,
}

impl Payslip {
    pub fn from_record(record: &PayrollRecord, company: &CompanyProfile) -> Self {
        Self {
            company: company.clone(),
            pay_period: record.period().to_string(),
            pay_days: record.pay_days,
            employee_id: record.employee_id.clone(),
            employee_name: record.employee_name.clone(),
            department: record.department.clone(),
            designation: record.designation.clone(),
            earnings: vec![
                line("Basic Salary", record.basic_salary),
                line("HRA", record.hra),
                line("Special Allowance", record.special_allowance),
                line("Conveyance", record.conveyance),
                line("Medical Allowance", record.medical_allowance),
            ],
            gross_salary: record.gross_salary,
            deductions: vec![
                line("Provident Fund", record.pf_employee),
                line("ESIC", record.esic_employee),
                line("Professional Tax", record.professional_tax),
                line("TDS", record.tds),
            ],
            total_deductions: record.total_deductions,
            employer_contributions: vec![
                line("PF (Employer)", record.pf_employer),
                line("ESIC (Employer)", record.esic_employer),
            ],
            net_pay: record.net_pay,
            credited_to: record.bank_account.clone(),
            status: record.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payroll::{CompensationInput, DeductionOverrides, Earnings, Month};
    use crate::payroll::derive::derive_payroll_record;
    use crate::payroll::statutory::StatutoryRates;

    #[test]
    fn lines_add_up_to_totals() {
        let input = CompensationInput {
            employee_id: "SSSPL002".into(),
            employee_name: "Priya Sharma".into(),
            department: "Sales".into(),
            designation: "Sales Manager".into(),
            month: Month::December,
            year: 2025,
            pay_days: 26,
            ctc: 900_000,
            earnings: Earnings {
                basic_salary: 37_500,
                hra: 18_750,
                special_allowance: 11_250,
                conveyance: 4_000,
                medical_allowance: 3_500,
            },
            tds: 3_000,
            overrides: DeductionOverrides {
                esic_employee: Some(563),
                esic_employer: Some(2_438),
                ..Default::default()
            },
            bank_account: Some("ICICI XXXXX5678".into()),
        };
        let record = derive_payroll_record(&input, &StatutoryRates::default()).unwrap();
        let company = CompanyProfile {
            name: "Srinivasa Sales and Service Pvt Ltd".into(),
            address: "Somajiguda, Hyderabad".into(),
        };

        let payslip = Payslip::from_record(&record, &company);

        assert_eq!(payslip.pay_period, "December 2025");
        assert_eq!(
            payslip.earnings.iter().map(|l| l.amount).sum::<i64>(),
            payslip.gross_salary
        );
        assert_eq!(
            payslip.deductions.iter().map(|l| l.amount).sum::<i64>(),
            payslip.total_deductions
        );
        assert_eq!(payslip.total_deductions, 8_263);
        assert_eq!(payslip.net_pay, 66_737);
        assert_eq!(payslip.credited_to.as_deref(), Some("ICICI XXXXX5678"));
    }
}
