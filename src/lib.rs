//! Loan calculator: solves for the missing one of payment, principal and
//! number of periods, or builds a differentiated payment schedule.

pub mod cli;
pub mod dispatch;
pub mod error;
pub mod loan;
pub mod period;
pub mod report;

pub use dispatch::{calculate, CalculationResult, LoanInput, PaymentType};
pub use error::{LoanError, Result};
