use clap::Parser;
use loancalc::cli::Cli;
use loancalc::calculate;
use log::info;
use simple_logger::SimpleLogger;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    if let Err(err) = SimpleLogger::new().with_level(cli.log_level()).env().init() {
        eprintln!("logger not started: {}", err);
    }

    match calculate(&cli.input()) {
        Ok(result) => {
            print!("{}", result);
            ExitCode::SUCCESS
        }
        Err(err) => {
            info!("invalid parameters: {}", err.reason());
            println!("{}", err);
            ExitCode::FAILURE
        }
    }
}

// verifies that the result types stay plain data
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<loancalc::CalculationResult>();
    is_normal::<loancalc::LoanInput>();
}
