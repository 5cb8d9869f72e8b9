use crate::error::TransitionError;
use crate::model::payroll::{PayrollRecord, PayrollStatus};

/// Re-checks every derived invariant of a record.
pub fn check_invariants(record: &PayrollRecord) -> Result<(), TransitionError> {
    let incomplete = |reason: String| Err(TransitionError::IncompleteRecord(reason));

    let earnings: i128 = record
        .earnings()
        .components()
        .iter()
        .map(|(_, v)| i128::from(*v))
        .sum();
    if earnings != i128::from(record.gross_salary) {
        return incomplete(format!(
            "earnings sum {earnings} != gross salary {}",
            record.gross_salary
        ));
    }

    let deductions: i128 = [
        record.pf_employee,
        record.esic_employee,
        record.professional_tax,
        record.tds,
    ]
    .into_iter()
    .map(i128::from)
    .sum();
    if deductions != i128::from(record.total_deductions) {
        return incomplete(format!(
            "deductions sum {deductions} != total deductions {}",
            record.total_deductions
        ));
    }

    if i128::from(record.gross_salary) - i128::from(record.total_deductions)
        != i128::from(record.net_pay)
    {
        return incomplete(format!(
            "gross {} - deductions {} != net pay {}",
            record.gross_salary, record.total_deductions, record.net_pay
        ));
    }

    if record.net_pay < 0 {
        return incomplete(format!("net pay {} is negative", record.net_pay));
    }

    let days = record.period().days();
    if record.pay_days > days {
        return incomplete(format!("pay_days {} outside 0..={days}", record.pay_days));
    }

    Ok(())
}

/// Moves a record one step forward in its lifecycle.
///
/// `draft -> processed` requires every derived invariant to hold and
/// `processed -> paid` requires a payout account. Skips, backward moves and
/// no-op moves are rejected.
pub fn transition_status(
    mut record: PayrollRecord,
    target: PayrollStatus,
) -> Result<PayrollRecord, TransitionError> {
    if record.status.next() != Some(target) {
        return Err(TransitionError::InvalidTransition {
            from: record.status,
            to: target,
        });
    }

    match target {
        PayrollStatus::Processed => check_invariants(&record)?,
        PayrollStatus::Paid => {
            let has_account = record
                .bank_account
                .as_deref()
                .is_some_and(|account| !account.trim().is_empty());
            if !has_account {
                return Err(TransitionError::MissingPayoutTarget);
            }
        }
        // never a successor, rejected above
        PayrollStatus::Draft => {}
    }

    record.status = target;
    Ok(record)
}

/// Outcome of promoting every draft in a period.
#[derive(Debug, Default)]
pub struct ProcessOutcome {
    pub processed: Vec<PayrollRecord>,
    pub failed: Vec<(PayrollRecord, TransitionError)>,
}

/// Promotes each draft to processed. Non-draft records are skipped; drafts
/// that fail validation are reported and left as they were.
pub fn process_period(records: Vec<PayrollRecord>) -> ProcessOutcome {
    let mut outcome = ProcessOutcome::default();

    for record in records {
        if record.status != PayrollStatus::Draft {
            continue;
        }
        match transition_status(record.clone(), PayrollStatus::Processed) {
            Ok(processed) => outcome.processed.push(processed),
            Err(err) => outcome.failed.push((record, err)),
        }
    }

    outcome
}
