//! Error type surfaced by the loan calculator.

use std::fmt;
use thiserror::Error;

/// Why a set of loan parameters was rejected. Only logged; the user sees
/// the same message for every reason.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InvalidReason {
    NegativeValue,
    NotFinite,
    MissingInterest,
    MissingType,
    PaymentWithDifferentiated,
    MissingPrincipalOrPeriods,
    ZeroPeriods,
    PeriodsOutOfRange,
    UnsolvableCombination,
    ResultOutOfRange,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::NegativeValue => "a supplied value is negative",
            InvalidReason::NotFinite => "a supplied value is not a finite number",
            InvalidReason::MissingInterest => "interest is required",
            InvalidReason::MissingType => "payment type is required",
            InvalidReason::PaymentWithDifferentiated => {
                "payment cannot be given for differentiated payments"
            }
            InvalidReason::MissingPrincipalOrPeriods => {
                "differentiated payments need both principal and periods"
            }
            InvalidReason::ZeroPeriods => "periods must be at least 1",
            InvalidReason::PeriodsOutOfRange => "periods is above the longest supported term",
            InvalidReason::UnsolvableCombination => {
                "exactly one of payment, principal and periods must be omitted"
            }
            InvalidReason::ResultOutOfRange => "the result does not fit a whole amount",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoanError {
    #[error("Incorrect parameters")]
    InvalidParameters(InvalidReason),
}

impl LoanError {
    pub fn reason(&self) -> InvalidReason {
        match self {
            LoanError::InvalidParameters(reason) => *reason,
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;

#[cfg(test)]
mod tests {
    use super::{InvalidReason, LoanError};
    use test_log::test;

    #[test]
    fn every_reason_shows_the_same_message() {
        for reason in [
            InvalidReason::NegativeValue,
            InvalidReason::NotFinite,
            InvalidReason::MissingInterest,
            InvalidReason::MissingType,
            InvalidReason::PaymentWithDifferentiated,
            InvalidReason::MissingPrincipalOrPeriods,
            InvalidReason::ZeroPeriods,
            InvalidReason::PeriodsOutOfRange,
            InvalidReason::UnsolvableCombination,
            InvalidReason::ResultOutOfRange,
        ] {
            let err = LoanError::InvalidParameters(reason);
            assert_eq!(err.to_string(), "Incorrect parameters");
            assert_eq!(err.reason(), reason);
        }
    }
}
