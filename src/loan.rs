use crate::error::{InvalidReason, LoanError, Result};
use log::{debug, trace};
use std::fmt;

/// Longest accepted term, in months.
pub const MAX_PERIODS: u32 = 120_000;

/// Outcome of solving for the number of periods.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Repayment {
    Months(u32),
    /// The payment never covers the interest accrued each month, or the
    /// loan would run longer than [`MAX_PERIODS`].
    Never,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ScheduledPayment {
    pub period: u32,
    pub amount: i64,
}

impl ScheduledPayment {
    pub fn new(period: u32, amount: i64) -> Self {
        Self { period, amount }
    }
}

impl fmt::Display for ScheduledPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Month {}: payment is {}", self.period, self.amount)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DifferentiatedSchedule {
    pub payments: Vec<ScheduledPayment>,
    pub overpayment: i64,
}

impl DifferentiatedSchedule {
    pub fn total_paid(&self) -> i64 {
        self.payments.iter().map(|pmt| pmt.amount).sum()
    }
}

fn out_of_range() -> LoanError {
    LoanError::InvalidParameters(InvalidReason::ResultOutOfRange)
}

// truncates toward zero; i64::MAX as f64 rounds up to 2^63
fn whole(value: f64) -> Result<i64> {
    if value.is_finite() && value.abs() < i64::MAX as f64 {
        Ok(value as i64)
    } else {
        debug!("{} does not fit a whole amount", value);
        Err(out_of_range())
    }
}

// 1 - (1+i)^-n, without forming (1+i)^n
fn repaid_share(periods: u32, rate: f64) -> f64 {
    -(-(periods as f64) * rate.ln_1p()).exp_m1()
}

/// Converts an annual percentage (12 means 12%) into the monthly rate.
pub fn nominal_rate(annual_percent: f64) -> f64 {
    (annual_percent / 100.) / 12.
}

/// Total paid minus principal, truncated toward zero.
pub fn overpayment(total_paid: f64, principal: f64) -> Result<i64> {
    whole(total_paid - principal)
}

/// Fixed monthly payment, rounded up so the lender is never short.
pub fn annuity_payment(principal: f64, periods: u32, rate: f64) -> Result<i64> {
    let payment = if rate == 0. {
        principal / periods as f64
    } else {
        principal * rate / repaid_share(periods, rate)
    };
    debug!(
        "annuity payment for principal {} over {} periods at {}: {}",
        principal, periods, rate, payment
    );
    whole(payment.ceil())
}

/// Largest principal the payment amortizes in `periods`, rounded down.
pub fn loan_principal(payment: f64, periods: u32, rate: f64) -> Result<i64> {
    let principal = if rate == 0. {
        payment * periods as f64
    } else {
        payment * repaid_share(periods, rate) / rate
    };
    debug!(
        "principal for payment {} over {} periods at {}: {}",
        payment, periods, rate, principal
    );
    whole(principal.floor())
}

/// Whole number of months needed to repay `principal` with `payment`.
pub fn repayment_periods(principal: f64, payment: f64, rate: f64) -> Repayment {
    if principal == 0. {
        return Repayment::Months(0);
    }

    let months = if rate == 0. {
        if payment == 0. {
            return Repayment::Never;
        }
        principal / payment
    } else {
        let interest = rate * principal;
        let remainder = payment - interest;
        if remainder <= 0. {
            debug!(
                "payment {} does not cover monthly interest {}",
                payment, interest
            );
            return Repayment::Never;
        }
        (interest / remainder).ln_1p() / rate.ln_1p()
    };
    debug!(
        "periods for principal {} with payment {} at {}: {}",
        principal, payment, rate, months
    );

    if !months.is_finite() || months > MAX_PERIODS as f64 {
        debug!("repayment takes longer than {} months", MAX_PERIODS);
        return Repayment::Never;
    }
    Repayment::Months(months.ceil() as u32)
}

/// Builds the differentiated schedule. Every payment is rounded up on its own.
pub fn differentiated_schedule(
    principal: f64,
    periods: u32,
    rate: f64,
) -> Result<DifferentiatedSchedule> {
    let n = periods as f64;
    let mut payments = Vec::with_capacity(periods as usize);
    let mut total_paid: i64 = 0;

    for month in 1..=periods {
        let paid_off = principal * (month - 1) as f64 / n;
        let payment = (principal / n) + rate * (principal - paid_off);
        let amount = whole(payment.ceil())?;
        trace!(
            "month {}, balance before {}, payment {}, rounded {}",
            month,
            principal - paid_off,
            payment,
            amount
        );
        total_paid = total_paid.checked_add(amount).ok_or_else(out_of_range)?;
        payments.push(ScheduledPayment::new(month, amount));
    }

    Ok(DifferentiatedSchedule {
        payments,
        overpayment: overpayment(total_paid as f64, principal)?,
    })
}

#[cfg(test)]
mod tests {
    use super::{
        annuity_payment, differentiated_schedule, loan_principal, nominal_rate, overpayment,
        repayment_periods, Repayment, ScheduledPayment, MAX_PERIODS,
    };
    use crate::error::InvalidReason;
    use test_log::test;

    #[test]
    fn test_nominal_rate() {
        assert_eq!(nominal_rate(12.), 0.01);
        assert_eq!(nominal_rate(0.), 0.);
    }

    #[test]
    fn test_annuity_payment() {
        assert_eq!(annuity_payment(100000., 12, nominal_rate(12.)), Ok(8885));
        assert_eq!(annuity_payment(1000000., 60, nominal_rate(10.)), Ok(21248));
        assert_eq!(annuity_payment(250000., 360, nominal_rate(4.2)), Ok(1223));
    }

    #[test]
    fn test_annuity_payment_zero_rate() {
        assert_eq!(annuity_payment(1200., 12, 0.), Ok(100));
        assert_eq!(annuity_payment(1000., 3, 0.), Ok(334));
    }

    #[test]
    fn annuity_payment_long_terms() {
        // tends to principal * rate as the term grows
        assert_eq!(annuity_payment(100000., 100000, nominal_rate(12.)), Ok(1000));
        assert_eq!(annuity_payment(100000., 1160, nominal_rate(1000.)), Ok(83334));
    }

    #[test]
    fn tiny_rate_behaves_like_zero_rate() {
        // 1 + rate rounds to exactly 1.0 here
        let rate = nominal_rate(1e-15);
        assert_eq!(1. + rate, 1.);
        assert_eq!(annuity_payment(1200., 12, rate), Ok(100));
        assert_eq!(loan_principal(100., 12, rate), Ok(1200));
        assert_eq!(repayment_periods(1200., 100., rate), Repayment::Months(12));
    }

    #[test]
    fn test_loan_principal() {
        assert_eq!(loan_principal(8722., 120, nominal_rate(5.6)), Ok(800018));
        assert_eq!(loan_principal(8885., 12, nominal_rate(12.)), Ok(100001));
        assert_eq!(loan_principal(250.5, 4, 0.), Ok(1002));
        assert_eq!(loan_principal(1000., 100000, 0.01), Ok(100000));
    }

    #[test]
    fn amounts_beyond_i64_are_rejected() {
        let err = annuity_payment(1e300, 12, 0.01).unwrap_err();
        assert_eq!(err.reason(), InvalidReason::ResultOutOfRange);
        let err = loan_principal(1e300, 12, 0.01).unwrap_err();
        assert_eq!(err.reason(), InvalidReason::ResultOutOfRange);
        let err = differentiated_schedule(1e300, 12, 0.01).unwrap_err();
        assert_eq!(err.reason(), InvalidReason::ResultOutOfRange);
        assert!(overpayment(1e19, 0.).is_err());
    }

    #[test]
    fn principal_recovers_from_payment() {
        // ceiling on the payment, floor on the principal: never below the
        // original and off by less than one unit of payment per period
        for &(principal, periods, percent) in &[
            (100000., 12, 12.),
            (1000000., 60, 10.),
            (5000., 7, 3.5),
            (250000., 360, 4.2),
            (800000., 120, 5.6),
        ] {
            let rate = nominal_rate(percent);
            let payment = annuity_payment(principal, periods, rate).unwrap();
            let recovered = loan_principal(payment as f64, periods, rate).unwrap() as f64;
            assert!(recovered >= principal, "{} < {}", recovered, principal);
            assert!(recovered - principal < periods as f64);
        }
    }

    #[test]
    fn test_repayment_periods() {
        assert_eq!(
            repayment_periods(500000., 23000., nominal_rate(7.8)),
            Repayment::Months(24)
        );
        assert_eq!(
            repayment_periods(100000., 1000., nominal_rate(6.)),
            Repayment::Months(139)
        );
        assert_eq!(repayment_periods(1000., 300., 0.), Repayment::Months(4));
        assert_eq!(repayment_periods(0., 300., 0.01), Repayment::Months(0));
    }

    #[test]
    fn test_repayment_never() {
        assert_eq!(repayment_periods(1000., 5., 0.01), Repayment::Never);
        // payment equal to the interest only
        assert_eq!(repayment_periods(1000., 10., 0.01), Repayment::Never);
        assert_eq!(repayment_periods(1000., 0., 0.), Repayment::Never);
    }

    #[test]
    fn repayment_longer_than_max_periods() {
        assert_eq!(repayment_periods(1e9, 1., 0.), Repayment::Never);
        assert_eq!(
            repayment_periods(1000000., 1.0001, 0.000001),
            Repayment::Never
        );
        assert_eq!(
            repayment_periods(MAX_PERIODS as f64, 1., 0.),
            Repayment::Months(MAX_PERIODS)
        );
    }

    #[test]
    fn test_differentiated_schedule() {
        let schedule = differentiated_schedule(12000., 12, nominal_rate(12.)).unwrap();
        let amounts: Vec<i64> = schedule.payments.iter().map(|p| p.amount).collect();
        assert_eq!(
            amounts,
            vec![1120, 1110, 1100, 1090, 1080, 1070, 1060, 1050, 1040, 1030, 1020, 1010]
        );
        assert_eq!(schedule.overpayment, 780);
        assert_eq!(schedule.total_paid() - 12000, schedule.overpayment);
    }

    #[test]
    fn differentiated_rounds_each_month_up() {
        let schedule = differentiated_schedule(1000000., 10, nominal_rate(10.)).unwrap();
        let amounts: Vec<i64> = schedule.payments.iter().map(|p| p.amount).collect();
        assert_eq!(
            amounts,
            vec![108334, 107500, 106667, 105834, 105000, 104167, 103334, 102500, 101667, 100834]
        );
        assert_eq!(schedule.overpayment, 45837);
    }

    #[test]
    fn differentiated_overpayment_matches_sum() {
        for &(principal, periods, percent) in
            &[(500000., 8, 7.8), (12000., 12, 12.), (73000., 31, 9.9)]
        {
            let schedule =
                differentiated_schedule(principal, periods, nominal_rate(percent)).unwrap();
            assert_eq!(schedule.payments.len(), periods as usize);
            assert_eq!(
                Ok(schedule.overpayment),
                overpayment(schedule.total_paid() as f64, principal)
            );
        }
    }

    #[test]
    fn differentiated_is_deterministic() {
        let first = differentiated_schedule(500000., 8, nominal_rate(7.8)).unwrap();
        let second = differentiated_schedule(500000., 8, nominal_rate(7.8)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.overpayment, 14628);
    }

    #[test]
    fn schedule_row_display() {
        assert_eq!(
            ScheduledPayment::new(3, 1100).to_string(),
            "Month 3: payment is 1100"
        );
    }
}
