//! Banking Engine CLI
//!
//! Command-line interface for running fee, penalty, and interest sweeps
//! over a book of accounts loaded from a CSV file.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv > updated_accounts.csv
//! cargo run -- --sweep maintenance accounts.csv > updated_accounts.csv
//! cargo run -- --sweep all --as-of 2024-06-15 accounts.csv > updated_accounts.csv
//! ```
//!
//! The program reads account records from the input CSV file, runs the
//! selected sweep(s) against the evaluation date, and writes the final
//! account states to stdout. Malformed input rows and per-account sweep
//! failures are reported on stderr and never abort the run.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Fatal error (missing arguments, file not found, output failure)

use rust_banking_engine::cli::{self, CliArgs, SweepKind};
use rust_banking_engine::core::{
    AccountStore, Clock, FixedClock, InMemoryAccountStore, RuleEvaluator, SweepReport, SystemClock,
};
use rust_banking_engine::io::{write_accounts_csv, AccountReader};
use std::process;
use tracing::info;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Load the book, run the selected sweep(s), and write the result
fn run(args: &CliArgs) -> Result<(), String> {
    let reader = AccountReader::new(&args.input_file)?;

    let mut store = InMemoryAccountStore::new();
    for result in reader {
        match result {
            Ok(account) => store.save(account),
            // A bad row is skipped, never fatal
            Err(e) => eprintln!("CSV parsing error: {}", e),
        }
    }
    info!(accounts = store.len(), "account book loaded");

    let clock: Box<dyn Clock> = match args.as_of {
        Some(date) => Box::new(FixedClock::new(date)),
        None => Box::new(SystemClock),
    };
    let mut evaluator = RuleEvaluator::new(store, clock);

    let reports: Vec<SweepReport> = match args.sweep {
        SweepKind::Penalty => vec![evaluator.apply_low_balance_penalties()],
        SweepKind::StudentPenalty => vec![evaluator.apply_student_overdraft_penalties()],
        SweepKind::Maintenance => vec![evaluator.apply_maintenance_fees()],
        SweepKind::SavingsInterest => vec![evaluator.apply_savings_interest()],
        SweepKind::CreditInterest => vec![evaluator.apply_credit_card_interest()],
        SweepKind::All => vec![
            evaluator.apply_low_balance_penalties(),
            evaluator.apply_student_overdraft_penalties(),
            evaluator.apply_maintenance_fees(),
            evaluator.apply_savings_interest(),
            evaluator.apply_credit_card_interest(),
        ],
    };

    for report in &reports {
        for failure in &report.errors {
            eprintln!("Sweep error for account {}: {}", failure.account, failure.error);
        }
    }

    let accounts = evaluator.store().all_accounts();
    let mut output = std::io::stdout();
    write_accounts_csv(&accounts, &mut output)
}
