//! Payroll computation: statutory defaults, derivation and edits, the
//! draft/processed/paid lifecycle, and period aggregation.
//!
//! Everything here is synchronous and side-effect free.

pub mod aggregate;
pub mod derive;
pub mod payslip;
pub mod statutory;
pub mod status;

pub use aggregate::{AggregateSummary, DepartmentTotals, aggregate_period};
pub use derive::{apply_edit, derive_payroll_record};
pub use payslip::{CompanyProfile, Payslip};
pub use statutory::{ProfessionalTaxSlab, StatutoryRates};
pub use status::{ProcessOutcome, check_invariants, process_period, transition_status};
