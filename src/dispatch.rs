//! Validation of the supplied parameters and dispatch to the calculators.
//!
//! A [`LoanInput`] is checked once and turned into a [`Calculation`]; the
//! omitted field decides which value gets solved for.

use crate::error::{InvalidReason, LoanError, Result};
use crate::loan::{
    annuity_payment, differentiated_schedule, loan_principal, nominal_rate, overpayment,
    repayment_periods, DifferentiatedSchedule, Repayment, MAX_PERIODS,
};
use log::debug;
use std::fmt;

/// How the loan is repaid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PaymentType {
    /// Equal payments every month.
    Annuity,
    /// Equal principal parts plus interest on the remaining balance.
    Differentiated,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentType::Annuity => write!(f, "annuity"),
            PaymentType::Differentiated => write!(f, "differentiated"),
        }
    }
}

/// Parameters as given by the caller. `None` means "solve for this".
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LoanInput {
    pub payment_type: Option<PaymentType>,
    pub payment: Option<f64>,
    pub principal: Option<f64>,
    pub periods: Option<i64>,
    /// Annual interest in percent.
    pub interest: Option<f64>,
}

/// A validated request. `rate` is the monthly nominal rate.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Calculation {
    AnnuityForPayment {
        principal: f64,
        periods: u32,
        rate: f64,
    },
    AnnuityForPrincipal {
        payment: f64,
        periods: u32,
        rate: f64,
    },
    AnnuityForPeriods {
        principal: f64,
        payment: f64,
        rate: f64,
    },
    Differentiated {
        principal: f64,
        periods: u32,
        rate: f64,
    },
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum CalculationResult {
    MonthlyPayment {
        amount: i64,
        overpayment: i64,
    },
    Principal {
        amount: i64,
        overpayment: i64,
    },
    /// `overpayment` is `None` when the loan is never repaid.
    PeriodCount {
        repayment: Repayment,
        overpayment: Option<i64>,
    },
    Schedule(DifferentiatedSchedule),
}

fn invalid(reason: InvalidReason) -> LoanError {
    debug!("rejecting parameters: {}", reason);
    LoanError::InvalidParameters(reason)
}

fn check_values(input: &LoanInput) -> Result<()> {
    let amounts = [input.payment, input.principal, input.interest];
    let values = amounts
        .iter()
        .flatten()
        .copied()
        .chain(input.periods.map(|n| n as f64));

    for value in values {
        if value < 0. {
            return Err(invalid(InvalidReason::NegativeValue));
        }
        if !value.is_finite() {
            return Err(invalid(InvalidReason::NotFinite));
        }
    }
    Ok(())
}

fn month_count(periods: i64) -> Result<u32> {
    if periods == 0 {
        return Err(invalid(InvalidReason::ZeroPeriods));
    }
    match u32::try_from(periods) {
        Ok(months) if months <= MAX_PERIODS => Ok(months),
        _ => Err(invalid(InvalidReason::PeriodsOutOfRange)),
    }
}

/// Checks the parameter combination and picks what to solve for.
pub fn validate(input: &LoanInput) -> Result<Calculation> {
    check_values(input)?;
    let interest = input
        .interest
        .ok_or_else(|| invalid(InvalidReason::MissingInterest))?;
    let payment_type = input
        .payment_type
        .ok_or_else(|| invalid(InvalidReason::MissingType))?;
    let rate = nominal_rate(interest);
    debug!("{} loan at monthly rate {}", payment_type, rate);

    match payment_type {
        PaymentType::Differentiated => {
            if input.payment.is_some() {
                return Err(invalid(InvalidReason::PaymentWithDifferentiated));
            }
            match (input.principal, input.periods) {
                (Some(principal), Some(periods)) => Ok(Calculation::Differentiated {
                    principal,
                    periods: month_count(periods)?,
                    rate,
                }),
                _ => Err(invalid(InvalidReason::MissingPrincipalOrPeriods)),
            }
        }
        PaymentType::Annuity => match (input.payment, input.principal, input.periods) {
            (None, Some(principal), Some(periods)) => Ok(Calculation::AnnuityForPayment {
                principal,
                periods: month_count(periods)?,
                rate,
            }),
            (Some(payment), None, Some(periods)) => Ok(Calculation::AnnuityForPrincipal {
                payment,
                periods: month_count(periods)?,
                rate,
            }),
            (Some(payment), Some(principal), None) => Ok(Calculation::AnnuityForPeriods {
                principal,
                payment,
                rate,
            }),
            _ => Err(invalid(InvalidReason::UnsolvableCombination)),
        },
    }
}

impl Calculation {
    /// Fails only when a computed amount does not fit an `i64`.
    pub fn run(&self) -> Result<CalculationResult> {
        debug!("running {:?}", self);
        let result = match *self {
            Calculation::AnnuityForPayment {
                principal,
                periods,
                rate,
            } => {
                let amount = annuity_payment(principal, periods, rate)?;
                CalculationResult::MonthlyPayment {
                    amount,
                    overpayment: overpayment(amount as f64 * periods as f64, principal)?,
                }
            }
            Calculation::AnnuityForPrincipal {
                payment,
                periods,
                rate,
            } => {
                let amount = loan_principal(payment, periods, rate)?;
                CalculationResult::Principal {
                    amount,
                    overpayment: overpayment(payment * periods as f64, amount as f64)?,
                }
            }
            Calculation::AnnuityForPeriods {
                principal,
                payment,
                rate,
            } => {
                let repayment = repayment_periods(principal, payment, rate);
                let overpayment = match repayment {
                    Repayment::Months(months) => {
                        Some(overpayment(payment * months as f64, principal)?)
                    }
                    Repayment::Never => None,
                };
                CalculationResult::PeriodCount {
                    repayment,
                    overpayment,
                }
            }
            Calculation::Differentiated {
                principal,
                periods,
                rate,
            } => CalculationResult::Schedule(differentiated_schedule(principal, periods, rate)?),
        };
        Ok(result)
    }
}

/// Validates `input` and computes the missing value.
pub fn calculate(input: &LoanInput) -> Result<CalculationResult> {
    validate(input)?.run()
}
