//! Command-line arguments.

use crate::dispatch::{LoanInput, PaymentType};
use clap::{Parser, ValueEnum};
use log::LevelFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TypeArg {
    /// Equal payments every month
    Annuity,
    /// Equal principal parts plus interest on the remaining balance
    Differentiated,
}

impl From<TypeArg> for PaymentType {
    fn from(arg: TypeArg) -> Self {
        match arg {
            TypeArg::Annuity => PaymentType::Annuity,
            TypeArg::Differentiated => PaymentType::Differentiated,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "loancalc",
    version,
    about = "A loan calculator supporting annuity and differentiated payments"
)]
pub struct Cli {
    /// Type of payment
    #[arg(long = "type", value_enum)]
    pub payment_type: Option<TypeArg>,

    /// The monthly payment amount
    #[arg(long, allow_negative_numbers = true)]
    pub payment: Option<f64>,

    /// The loan principal
    #[arg(long, allow_negative_numbers = true)]
    pub principal: Option<f64>,

    /// Number of months
    #[arg(long, allow_negative_numbers = true)]
    pub periods: Option<i64>,

    /// Annual interest rate, without the percent sign
    #[arg(long, allow_negative_numbers = true)]
    pub interest: Option<f64>,

    /// More log output on stderr (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn input(&self) -> LoanInput {
        LoanInput {
            payment_type: self.payment_type.map(PaymentType::from),
            payment: self.payment,
            principal: self.principal,
            periods: self.periods,
            interest: self.interest,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
