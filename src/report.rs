//! Console rendering of a [`CalculationResult`]. Every line ends with a newline.

use crate::dispatch::CalculationResult;
use crate::loan::Repayment;
use crate::period::format_period;
use std::fmt;

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationResult::MonthlyPayment {
                amount,
                overpayment,
            } => {
                writeln!(f, "Your monthly payment = {}!", amount)?;
                writeln!(f, "Overpayment = {}", overpayment)
            }
            CalculationResult::Principal {
                amount,
                overpayment,
            } => {
                writeln!(f, "Your loan principal = {}!", amount)?;
                writeln!(f, "Overpayment = {}", overpayment)
            }
            CalculationResult::PeriodCount {
                repayment,
                overpayment,
            } => {
                match repayment {
                    Repayment::Never => {
                        writeln!(f, "This loan cannot be repaid with the given payment!")?
                    }
                    Repayment::Months(0) => writeln!(f, "This loan is already repaid!")?,
                    Repayment::Months(months) => writeln!(
                        f,
                        "It will take {} to repay this loan!",
                        format_period(*months)
                    )?,
                }
                match overpayment {
                    Some(overpayment) => writeln!(f, "Overpayment = {}", overpayment),
                    None => Ok(()),
                }
            }
            CalculationResult::Schedule(schedule) => {
                for pmt in &schedule.payments {
                    writeln!(f, "{}", pmt)?;
                }
                writeln!(f)?;
                writeln!(f, "Overpayment = {}", schedule.overpayment)
            }
        }
    }
}
