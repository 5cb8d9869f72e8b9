use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AggregateError;
use crate::model::payroll::{PayrollRecord, PayrollStatus};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DepartmentTotals {
    #[schema(example = "Sales")]
    pub department: String,
    pub headcount: usize,
    pub total_net_pay: i64,
    pub total_deductions: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "total_payroll": 352804,
    "total_deductions": 62196,
    "total_gross": 415000,
    "employer_contributions": 33513,
    "total_count": 5,
    "paid_count": 3,
    "processed_count": 1,
    "draft_count": 1,
    "paid_percentage": 60.0,
    "average_salary": 70560.8,
    "by_department": []
}))]
pub struct AggregateSummary {
    /// Sum of net pay across every record, whatever its status.
    pub total_payroll: i64,
    pub total_deductions: i64,
    pub total_gross: i64,
    pub employer_contributions: i64,
    pub total_count: usize,
    pub paid_count: usize,
    pub processed_count: usize,
    pub draft_count: usize,
    pub paid_percentage: f64,
    pub average_salary: f64,
    /// Sorted by department name.
    pub by_department: Vec<DepartmentTotals>,
}

fn add(total: i64, amount: i64, field: &'static str) -> Result<i64, AggregateError> {
    total
        .checked_add(amount)
        .ok_or(AggregateError::Overflow(field))
}

/// Folds one period's records into organisation-wide totals.
///
/// The result depends only on the multiset of records, never on their order.
pub fn aggregate_period(records: &[PayrollRecord]) -> Result<AggregateSummary, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyPeriod);
    }

    let mut summary = AggregateSummary {
        total_payroll: 0,
        total_deductions: 0,
        total_gross: 0,
        employer_contributions: 0,
        total_count: records.len(),
        paid_count: 0,
        processed_count: 0,
        draft_count: 0,
        paid_percentage: 0.0,
        average_salary: 0.0,
        by_department: Vec::new(),
    };
    let mut departments: BTreeMap<&str, DepartmentTotals> = BTreeMap::new();

    for record in records {
        summary.total_payroll = add(summary.total_payroll, record.net_pay, "total_payroll")?;
        summary.total_deductions = add(
            summary.total_deductions,
            record.total_deductions,
            "total_deductions",
        )?;
        summary.total_gross = add(summary.total_gross, record.gross_salary, "total_gross")?;
        let employer = record
            .employer_contributions()
            .ok_or(AggregateError::Overflow("employer_contributions"))?;
        summary.employer_contributions = add(
            summary.employer_contributions,
            employer,
            "employer_contributions",
        )?;

        match record.status {
            PayrollStatus::Paid => summary.paid_count += 1,
            PayrollStatus::Processed => summary.processed_count += 1,
            PayrollStatus::Draft => summary.draft_count += 1,
        }

        let totals = departments
            .entry(record.department.as_str())
            .or_insert_with(|| DepartmentTotals {
                department: record.department.clone(),
                headcount: 0,
                total_net_pay: 0,
                total_deductions: 0,
            });
        totals.headcount += 1;
        totals.total_net_pay = add(totals.total_net_pay, record.net_pay, "total_net_pay")?;
        totals.total_deductions = add(
            totals.total_deductions,
            record.total_deductions,
            "total_deductions",
        )?;
    }

    let count = summary.total_count as f64;
    summary.paid_percentage = summary.paid_count as f64 / count * 100.0;
    summary.average_salary = summary.total_payroll as f64 / count;
    summary.by_department = departments.into_values().collect();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payroll::Month;
    use pretty_assertions::assert_eq;

    fn record(id: &str, department: &str, net_pay: i64, status: PayrollStatus) -> PayrollRecord {
        let total_deductions = net_pay / 10;
        let gross_salary = net_pay + total_deductions;
        PayrollRecord {
            employee_id: id.into(),
            employee_name: format!("Employee {id}"),
            department: department.into(),
            designation: "Engineer".into(),
            month: Month::December,
            year: 2025,
            pay_days: 26,
            ctc: gross_salary * 12,
            gross_salary,
            basic_salary: gross_salary,
            hra: 0,
            special_allowance: 0,
            conveyance: 0,
            medical_allowance: 0,
            pf_employee: 0,
            pf_employer: 100,
            esic_employee: 0,
            esic_employer: 0,
            professional_tax: 0,
            tds: total_deductions,
            total_deductions,
            net_pay,
            status,
            bank_account: None,
        }
    }

    fn december() -> Vec<PayrollRecord> {
        vec![
            record("SSSPL001", "Engineering", 88_050, PayrollStatus::Paid),
            record("SSSPL002", "Sales", 66_737, PayrollStatus::Paid),
            record("SSSPL003", "Sales", 125_800, PayrollStatus::Paid),
            record("SSSPL004", "HR", 35_117, PayrollStatus::Processed),
            record("SSSPL005", "Operations", 37_100, PayrollStatus::Draft),
        ]
    }

    #[test]
    fn totals_the_december_register() {
        let summary = aggregate_period(&december()).unwrap();

        assert_eq!(summary.total_payroll, 352_804);
        assert_eq!(summary.average_salary, 70_560.8);
        assert_eq!(summary.total_count, 5);
        assert_eq!(summary.paid_count, 3);
        assert_eq!(summary.processed_count, 1);
        assert_eq!(summary.draft_count, 1);
        assert_eq!(summary.paid_percentage, 60.0);
        assert_eq!(summary.employer_contributions, 500);
    }

    #[test]
    fn empty_period_is_an_error() {
        assert_eq!(aggregate_period(&[]), Err(AggregateError::EmptyPeriod));
    }

    #[test]
    fn order_does_not_matter() {
        let records = december();
        let expected = aggregate_period(&records).unwrap();

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate_period(&reversed).unwrap(), expected);

        let mut rotated = records;
        rotated.rotate_left(2);
        assert_eq!(aggregate_period(&rotated).unwrap(), expected);
    }

    #[test]
    fn groups_by_department_in_name_order() {
        let summary = aggregate_period(&december()).unwrap();
        let names: Vec<&str> = summary
            .by_department
            .iter()
            .map(|d| d.department.as_str())
            .collect();
        assert_eq!(names, vec!["Engineering", "HR", "Operations", "Sales"]);

        let sales = &summary.by_department[3];
        assert_eq!(sales.headcount, 2);
        assert_eq!(sales.total_net_pay, 66_737 + 125_800);
    }

    #[test]
    fn overflowing_totals_are_an_error() {
        let huge = i64::MAX / 2 + 1;
        let records = vec![
            record("SSSPL001", "Engineering", huge, PayrollStatus::Paid),
            record("SSSPL002", "Engineering", huge, PayrollStatus::Draft),
        ];

        assert_eq!(
            aggregate_period(&records),
            Err(AggregateError::Overflow("total_payroll"))
        );
    }

    #[test]
    fn overflowing_employer_side_is_an_error() {
        let mut single = record("SSSPL001", "Engineering", 88_050, PayrollStatus::Paid);
        single.pf_employer = i64::MAX;
        single.esic_employer = 1;

        assert_eq!(single.employer_contributions(), None);
        assert_eq!(
            aggregate_period(&[single]),
            Err(AggregateError::Overflow("employer_contributions"))
        );
    }

    #[test]
    fn rerunning_is_idempotent() {
        let records = december();
        assert_eq!(
            aggregate_period(&records).unwrap(),
            aggregate_period(&records).unwrap()
        );
    }
}
