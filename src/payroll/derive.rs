use crate::error::{EditError, ValidationError};
use crate::model::payroll::{
    CompensationEdit, CompensationInput, DeductionOverrides, Earnings, PayrollRecord,
    PayrollStatus,
};
use crate::payroll::statutory::StatutoryRates;

fn invalid(reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidCompensation(reason.into())
}

fn non_negative(field: &str, amount: i64) -> Result<i64, ValidationError> {
    if amount < 0 {
        return Err(invalid(format!("{field} is negative")));
    }
    Ok(amount)
}

fn checked_sum(field: &str, parts: &[i64]) -> Result<i64, ValidationError> {
    parts
        .iter()
        .try_fold(0i64, |acc, part| acc.checked_add(*part))
        .ok_or_else(|| invalid(format!("{field} overflows")))
}

/// Builds a fully derived draft record from base inputs.
///
/// PF, ESIC and professional tax come from `rates` unless `input.overrides`
/// carries an explicit amount. Net pay is never clamped: deductions above
/// gross are rejected.
pub fn derive_payroll_record(
    input: &CompensationInput,
    rates: &StatutoryRates,
) -> Result<PayrollRecord, ValidationError> {
    if input.employee_id.trim().is_empty() {
        return Err(invalid("employee_id is empty"));
    }

    let period = input.period();
    if !period.has_valid_year() {
        return Err(invalid(format!("year {} is not a 4-digit year", input.year)));
    }
    if input.pay_days > period.days() {
        return Err(invalid(format!(
            "pay_days {} outside 0..={} for {period}",
            input.pay_days,
            period.days()
        )));
    }

    non_negative("ctc", input.ctc)?;
    non_negative("tds", input.tds)?;

    let earnings = &input.earnings;
    for (field, amount) in earnings.components() {
        non_negative(field, amount)?;
    }
    let components = earnings.components().map(|(_, amount)| amount);
    let gross_salary = checked_sum("gross_salary", &components)?;

    let overrides = &input.overrides;
    let (default_pf_employee, default_pf_employer) =
        rates.provident_fund(earnings.basic_salary);
    let (default_esic_employee, default_esic_employer) = rates.esic(gross_salary);

    let pick = |field: &str, explicit: Option<i64>, default: i64| match explicit {
        Some(amount) => non_negative(field, amount),
        None => Ok(default),
    };
    let pf_employee = pick("pf_employee", overrides.pf_employee, default_pf_employee)?;
    let pf_employer = pick("pf_employer", overrides.pf_employer, default_pf_employer)?;
    let esic_employee = pick("esic_employee", overrides.esic_employee, default_esic_employee)?;
    let esic_employer = pick("esic_employer", overrides.esic_employer, default_esic_employer)?;
    let professional_tax = pick(
        "professional_tax",
        overrides.professional_tax,
        rates.professional_tax(gross_salary),
    )?;

    checked_sum("employer_contributions", &[pf_employer, esic_employer])?;
    let total_deductions = checked_sum(
        "total_deductions",
        &[pf_employee, esic_employee, professional_tax, input.tds],
    )?;

    let net_pay = gross_salary - total_deductions;
    if net_pay < 0 {
        return Err(ValidationError::NegativeNetPay {
            gross_salary,
            total_deductions,
        });
    }

    Ok(PayrollRecord {
        employee_id: input.employee_id.trim().to_string(),
        employee_name: input.employee_name.clone(),
        department: input.department.clone(),
        designation: input.designation.clone(),
        month: input.month,
        year: input.year,
        pay_days: input.pay_days,
        ctc: input.ctc,
        gross_salary,
        basic_salary: earnings.basic_salary,
        hra: earnings.hra,
        special_allowance: earnings.special_allowance,
        conveyance: earnings.conveyance,
        medical_allowance: earnings.medical_allowance,
        pf_employee,
        pf_employer,
        esic_employee,
        esic_employer,
        professional_tax,
        tds: input.tds,
        total_deductions,
        net_pay,
        status: PayrollStatus::Draft,
        bank_account: input.bank_account.clone(),
    })
}

/// Inputs that reproduce `record`, with every statutory amount pinned.
fn input_from_record(record: &PayrollRecord) -> CompensationInput {
    CompensationInput {
        employee_id: record.employee_id.clone(),
        employee_name: record.employee_name.clone(),
        department: record.department.clone(),
        designation: record.designation.clone(),
        month: record.month,
        year: record.year,
        pay_days: record.pay_days,
        ctc: record.ctc,
        earnings: record.earnings(),
        tds: record.tds,
        overrides: DeductionOverrides {
            pf_employee: Some(record.pf_employee),
            pf_employer: Some(record.pf_employer),
            esic_employee: Some(record.esic_employee),
            esic_employer: Some(record.esic_employer),
            professional_tax: Some(record.professional_tax),
        },
        bank_account: record.bank_account.clone(),
    }
}

/// Applies `edit` to a record that is not yet paid and recomputes every
/// derived field. The result is always a draft again.
pub fn apply_edit(
    record: &PayrollRecord,
    edit: &CompensationEdit,
    rates: &StatutoryRates,
) -> Result<PayrollRecord, EditError> {
    if record.is_locked() {
        return Err(EditError::RecordLocked {
            employee_id: record.employee_id.clone(),
        });
    }

    let mut input = input_from_record(record);
    if edit.recalculate_statutory {
        input.overrides = DeductionOverrides::default();
    }

    let current = input.earnings.clone();
    input.earnings = Earnings {
        basic_salary: edit.basic_salary.unwrap_or(current.basic_salary),
        hra: edit.hra.unwrap_or(current.hra),
        special_allowance: edit.special_allowance.unwrap_or(current.special_allowance),
        conveyance: edit.conveyance.unwrap_or(current.conveyance),
        medical_allowance: edit.medical_allowance.unwrap_or(current.medical_allowance),
    };
    input.pay_days = edit.pay_days.unwrap_or(input.pay_days);
    input.ctc = edit.ctc.unwrap_or(input.ctc);
    input.tds = edit.tds.unwrap_or(input.tds);
    if let Some(bank_account) = &edit.bank_account {
        input.bank_account = Some(bank_account.clone());
    }

    let explicit = &edit.overrides;
    let pinned = &mut input.overrides;
    pinned.pf_employee = explicit.pf_employee.or(pinned.pf_employee);
    pinned.pf_employer = explicit.pf_employer.or(pinned.pf_employer);
    pinned.esic_employee = explicit.esic_employee.or(pinned.esic_employee);
    pinned.esic_employer = explicit.esic_employer.or(pinned.esic_employer);
    pinned.professional_tax = explicit.professional_tax.or(pinned.professional_tax);

    Ok(derive_payroll_record(&input, rates)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::payroll::Month;
    use pretty_assertions::assert_eq;

    fn register_input() -> CompensationInput {
        CompensationInput {
            employee_id: "SSSPL001".into(),
            employee_name: "Rajesh Kumar Singh".into(),
            department: "Engineering".into(),
            designation: "Senior Engineer".into(),
            month: Month::December,
            year: 2025,
            pay_days: 26,
            ctc: 1_200_000,
            earnings: Earnings {
                basic_salary: 50_000,
                hra: 25_000,
                special_allowance: 15_000,
                conveyance: 5_000,
                medical_allowance: 5_000,
            },
            tds: 5_000,
            overrides: DeductionOverrides {
                pf_employee: Some(6_000),
                pf_employer: Some(6_000),
                esic_employee: Some(750),
                esic_employer: Some(3_250),
                professional_tax: Some(200),
            },
            bank_account: Some("HDFC XXXXX1234".into()),
        }
    }

    fn small_salary_input() -> CompensationInput {
        CompensationInput {
            employee_id: "SSSPL010".into(),
            employee_name: "Kiran Rao".into(),
            department: "Operations".into(),
            designation: "Technician".into(),
            month: Month::February,
            year: 2024,
            pay_days: 29,
            ctc: 216_000,
            earnings: Earnings {
                basic_salary: 9_000,
                hra: 4_500,
                special_allowance: 3_000,
                conveyance: 1_000,
                medical_allowance: 500,
            },
            tds: 0,
            overrides: DeductionOverrides::default(),
            bank_account: None,
        }
    }

    #[test]
    fn derives_register_example() {
        let record = derive_payroll_record(&register_input(), &StatutoryRates::default()).unwrap();

        assert_eq!(record.gross_salary, 100_000);
        assert_eq!(record.total_deductions, 11_950);
        assert_eq!(record.net_pay, 88_050);
        assert_eq!(record.status, PayrollStatus::Draft);
        // employer side is informational only
        assert_eq!(record.employer_contributions(), Some(9_250));
    }

    #[test]
    fn rejects_employer_side_beyond_i64() {
        let mut input = register_input();
        input.overrides.pf_employer = Some(i64::MAX);
        input.overrides.esic_employer = Some(1);

        let err = derive_payroll_record(&input, &StatutoryRates::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidCompensation("employer_contributions overflows".into())
        );
    }

    #[test]
    fn applies_statutory_defaults() {
        let record =
            derive_payroll_record(&small_salary_input(), &StatutoryRates::default()).unwrap();

        assert_eq!(record.gross_salary, 18_000);
        assert_eq!((record.pf_employee, record.pf_employer), (1_080, 1_080));
        assert_eq!((record.esic_employee, record.esic_employer), (135, 585));
        assert_eq!(record.professional_tax, 150);
        assert_eq!(record.total_deductions, 1_080 + 135 + 150);
        assert_eq!(record.net_pay, 18_000 - 1_365);
    }

    #[test]
    fn esic_defaults_to_zero_above_ceiling() {
        let mut input = register_input();
        input.overrides = DeductionOverrides::default();
        let record = derive_payroll_record(&input, &StatutoryRates::default()).unwrap();

        assert_eq!((record.esic_employee, record.esic_employer), (0, 0));
        assert_eq!(record.total_deductions, 6_000 + 200 + 5_000);
    }

    #[test]
    fn rejects_negative_component() {
        let mut input = register_input();
        input.earnings.hra = -1;

        let err = derive_payroll_record(&input, &StatutoryRates::default()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidCompensation("hra is negative".into()));
    }

    #[test]
    fn rejects_pay_days_beyond_month_length() {
        let mut input = small_salary_input();
        input.pay_days = 29;
        assert!(derive_payroll_record(&input, &StatutoryRates::default()).is_ok());

        input.year = 2025;
        let err = derive_payroll_record(&input, &StatutoryRates::default()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidCompensation(_)));
    }

    #[test]
    fn rejects_bad_year_and_blank_employee() {
        let mut input = register_input();
        input.year = 25;
        assert!(matches!(
            derive_payroll_record(&input, &StatutoryRates::default()),
            Err(ValidationError::InvalidCompensation(_))
        ));

        let mut input = register_input();
        input.employee_id = "  ".into();
        assert!(matches!(
            derive_payroll_record(&input, &StatutoryRates::default()),
            Err(ValidationError::InvalidCompensation(_))
        ));
    }

    #[test]
    fn rejects_deductions_above_gross() {
        let mut input = register_input();
        input.tds = 95_000;

        let err = derive_payroll_record(&input, &StatutoryRates::default()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NegativeNetPay {
                gross_salary: 100_000,
                total_deductions: 101_950,
            }
        );
    }

    #[test]
    fn zero_pay_days_and_zero_net_are_valid() {
        let mut input = small_salary_input();
        input.pay_days = 0;
        input.tds = 18_000 - 1_365;

        let record = derive_payroll_record(&input, &StatutoryRates::default()).unwrap();
        assert_eq!(record.net_pay, 0);
    }

    #[test]
    fn edit_recomputes_derived_fields() {
        let rates = StatutoryRates::default();
        let record = derive_payroll_record(&register_input(), &rates).unwrap();

        let edit = CompensationEdit {
            hra: Some(30_000),
            tds: Some(6_000),
            ..Default::default()
        };
        let edited = apply_edit(&record, &edit, &rates).unwrap();

        assert_eq!(edited.gross_salary, 105_000);
        assert_eq!(edited.pf_employee, 6_000);
        assert_eq!(edited.esic_employee, 750);
        assert_eq!(edited.total_deductions, 12_950);
        assert_eq!(edited.net_pay, 92_050);
    }

    #[test]
    fn edit_can_reapply_rate_table() {
        let rates = StatutoryRates::default();
        let record = derive_payroll_record(&register_input(), &rates).unwrap();

        let edit = CompensationEdit {
            recalculate_statutory: true,
            ..Default::default()
        };
        let edited = apply_edit(&record, &edit, &rates).unwrap();

        assert_eq!(edited.esic_employee, 0);
        assert_eq!(edited.esic_employer, 0);
        assert_eq!(edited.net_pay, 100_000 - 11_200);
    }

    #[test]
    fn processed_record_returns_to_draft_after_edit() {
        let rates = StatutoryRates::default();
        let mut record = derive_payroll_record(&register_input(), &rates).unwrap();
        record.status = PayrollStatus::Processed;

        let edited = apply_edit(&record, &CompensationEdit::default(), &rates).unwrap();
        assert_eq!(edited.status, PayrollStatus::Draft);
        assert_eq!(edited.net_pay, record.net_pay);
    }

    #[test]
    fn paid_record_cannot_be_edited() {
        let rates = StatutoryRates::default();
        let mut record = derive_payroll_record(&register_input(), &rates).unwrap();
        record.status = PayrollStatus::Paid;

        let err = apply_edit(&record, &CompensationEdit::default(), &rates).unwrap_err();
        assert_eq!(
            err,
            EditError::RecordLocked {
                employee_id: "SSSPL001".into()
            }
        );
    }

    #[test]
    fn invalid_edit_is_rejected() {
        let rates = StatutoryRates::default();
        let record = derive_payroll_record(&register_input(), &rates).unwrap();

        let edit = CompensationEdit {
            basic_salary: Some(-10),
            ..Default::default()
        };
        assert!(matches!(
            apply_edit(&record, &edit, &rates),
            Err(EditError::Validation(ValidationError::InvalidCompensation(_)))
        ));
    }
}
