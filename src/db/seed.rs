//! Mock register data for December 2025 and the 2026-01-12 attendance day.

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;

use crate::db::{InMemoryDb, PayrollRepository};
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::employee::{Employee, EmploymentStatus};
use crate::model::payroll::{
    CompensationInput, DeductionOverrides, Earnings, Month, PayrollStatus,
};
use crate::payroll::{StatutoryRates, derive_payroll_record, transition_status};

struct PayrollRow {
    employee_id: &'static str,
    pay_days: u32,
    ctc: i64,
    earnings: [i64; 5],
    // pf employee, pf employer, esic employee, esic employer, professional tax
    statutory: [i64; 5],
    tds: i64,
    bank_account: &'static str,
    status: PayrollStatus,
}

static EMPLOYEES: Lazy<Vec<Employee>> = Lazy::new(|| {
    [
        ("SSSPL001", "Rajesh Kumar Singh", "Engineering", "Senior Engineer", EmploymentStatus::Active),
        ("SSSPL002", "Priya Sharma", "Sales", "Sales Manager", EmploymentStatus::Active),
        ("SSSPL003", "Amit Patel", "Sales", "Regional Head", EmploymentStatus::Active),
        ("SSSPL004", "Sneha Reddy", "HR", "HR Executive", EmploymentStatus::Active),
        ("SSSPL005", "Vikram Joshi", "Operations", "Service Engineer", EmploymentStatus::Active),
        ("SSSPL006", "Ananya Gupta", "Finance", "Accountant", EmploymentStatus::OnLeave),
    ]
    .into_iter()
    .map(|(employee_id, name, department, designation, status)| Employee {
        employee_id: employee_id.to_string(),
        name: name.to_string(),
        department: department.to_string(),
        designation: designation.to_string(),
        email: format!("{}@srinivasa.in", name.to_lowercase().replace(' ', ".")),
        status,
    })
    .collect()
});

const DECEMBER_2025: [PayrollRow; 5] = [
    PayrollRow {
        employee_id: "SSSPL001",
        pay_days: 26,
        ctc: 1_200_000,
        earnings: [50_000, 25_000, 15_000, 5_000, 5_000],
        statutory: [6_000, 6_000, 750, 3_250, 200],
        tds: 5_000,
        bank_account: "HDFC XXXXX1234",
        status: PayrollStatus::Paid,
    },
    PayrollRow {
        employee_id: "SSSPL002",
        pay_days: 26,
        ctc: 900_000,
        earnings: [37_500, 18_750, 11_250, 4_000, 3_500],
        statutory: [4_500, 4_500, 563, 2_438, 200],
        tds: 3_000,
        bank_account: "ICICI XXXXX5678",
        status: PayrollStatus::Paid,
    },
    PayrollRow {
        employee_id: "SSSPL003",
        pay_days: 26,
        ctc: 1_800_000,
        earnings: [75_000, 37_500, 22_500, 8_000, 7_000],
        statutory: [9_000, 9_000, 0, 0, 200],
        tds: 15_000,
        bank_account: "SBI XXXXX9012",
        status: PayrollStatus::Paid,
    },
    PayrollRow {
        employee_id: "SSSPL004",
        pay_days: 20,
        ctc: 600_000,
        earnings: [25_000, 12_500, 7_500, 2_500, 2_500],
        statutory: [3_000, 3_000, 375, 1_625, 200],
        // reconciles the register's 35,117 net pay
        tds: 11_308,
        bank_account: "AXIS XXXXX3456",
        status: PayrollStatus::Processed,
    },
    PayrollRow {
        employee_id: "SSSPL005",
        pay_days: 26,
        ctc: 480_000,
        earnings: [20_000, 10_000, 6_000, 2_000, 2_000],
        statutory: [2_400, 2_400, 300, 1_300, 200],
        tds: 0,
        bank_account: "KOTAK XXXXX7890",
        status: PayrollStatus::Draft,
    },
];

fn employee(employee_id: &str) -> anyhow::Result<&'static Employee> {
    EMPLOYEES
        .iter()
        .find(|e| e.employee_id == employee_id)
        .with_context(|| format!("unknown employee {employee_id}"))
}

fn attendance() -> Vec<AttendanceRecord> {
    let day = NaiveDate::from_ymd_opt(2026, 1, 12);
    let time = |hh, mm| NaiveTime::from_hms_opt(hh, mm, 0);

    let rows = [
        ("SSSPL001", Some((9, 5, 18, 30)), AttendanceStatus::Present, 5, 30),
        ("SSSPL002", Some((9, 0, 18, 0)), AttendanceStatus::Present, 0, 0),
        ("SSSPL003", Some((9, 45, 18, 15)), AttendanceStatus::Late, 45, 15),
        ("SSSPL004", None, AttendanceStatus::Absent, 0, 0),
        ("SSSPL005", Some((9, 0, 13, 0)), AttendanceStatus::HalfDay, 0, 0),
        ("SSSPL006", None, AttendanceStatus::OnLeave, 0, 0),
    ];

    rows.into_iter()
        .zip(EMPLOYEES.iter())
        .filter_map(|((employee_id, punches, status, late_by, overtime), employee)| {
            Some(AttendanceRecord {
                employee_id: employee_id.to_string(),
                name: employee.name.clone(),
                date: day?,
                in_time: punches.and_then(|(ih, im, _, _)| time(ih, im)),
                out_time: punches.and_then(|(_, _, oh, om)| time(oh, om)),
                shift: "General".to_string(),
                status,
                late_by_minutes: late_by,
                overtime_minutes: overtime,
            })
        })
        .collect()
}

/// Builds the in-memory store with the mock register. Every payroll row goes
/// through derivation and the status lifecycle, so the seed obeys the same
/// invariants as records created at runtime.
pub fn init_db() -> anyhow::Result<InMemoryDb> {
    let rates = StatutoryRates::default();
    let db = InMemoryDb::new()
        .with_employees(EMPLOYEES.clone())
        .with_attendance(attendance());

    for row in &DECEMBER_2025 {
        let employee = employee(row.employee_id)?;
        let [basic_salary, hra, special_allowance, conveyance, medical_allowance] = row.earnings;
        let [pf_employee, pf_employer, esic_employee, esic_employer, professional_tax] =
            row.statutory;

        let input = CompensationInput {
            employee_id: employee.employee_id.clone(),
            employee_name: employee.name.clone(),
            department: employee.department.clone(),
            designation: employee.designation.clone(),
            month: Month::December,
            year: 2025,
            pay_days: row.pay_days,
            ctc: row.ctc,
            earnings: Earnings {
                basic_salary,
                hra,
                special_allowance,
                conveyance,
                medical_allowance,
            },
            tds: row.tds,
            overrides: DeductionOverrides {
                pf_employee: Some(pf_employee),
                pf_employer: Some(pf_employer),
                esic_employee: Some(esic_employee),
                esic_employer: Some(esic_employer),
                professional_tax: Some(professional_tax),
            },
            bank_account: Some(row.bank_account.to_string()),
        };

        let mut record = derive_payroll_record(&input, &rates)
            .with_context(|| format!("seeding {}", row.employee_id))?;
        while record.status != row.status {
            let Some(next) = record.status.next() else {
                break;
            };
            record = transition_status(record, next)
                .with_context(|| format!("seeding {}", row.employee_id))?;
        }

        db.insert(record)?;
    }

    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payroll::PayPeriod;
    use crate::payroll::aggregate_period;

    #[test]
    fn seeded_register_matches_published_totals() {
        let db = init_db().unwrap();
        let records = db.load_period(PayPeriod::new(Month::December, 2025));

        let net: Vec<i64> = records.iter().map(|r| r.net_pay).collect();
        assert_eq!(net, vec![88_050, 66_737, 125_800, 35_117, 37_100]);

        let summary = aggregate_period(&records).unwrap();
        assert_eq!(summary.total_payroll, 352_804);
        assert_eq!(summary.total_deductions, 62_196);
        assert_eq!(summary.paid_count, 3);
    }

    #[test]
    fn emails_derive_from_names() {
        assert_eq!(employee("SSSPL003").unwrap().email, "amit.patel@srinivasa.in");
    }
}
