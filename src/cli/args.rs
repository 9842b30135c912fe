use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Run fee, penalty, and interest sweeps over a book of accounts
#[derive(Parser, Debug)]
#[command(name = "banking-engine")]
#[command(about = "Run fee, penalty, and interest sweeps over a book of accounts", long_about = None)]
pub struct CliArgs {
    /// Input CSV file path containing account records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Which sweep to run over the book
    #[arg(
        long = "sweep",
        value_name = "SWEEP",
        default_value = "all",
        help = "Sweep to run: penalty, student-penalty, maintenance, savings-interest, credit-interest, or all"
    )]
    pub sweep: SweepKind,

    /// Evaluation date for due-date comparisons
    #[arg(
        long = "as-of",
        value_name = "DATE",
        help = "Evaluate due dates as of this date (YYYY-MM-DD); defaults to the system date"
    )]
    pub as_of: Option<NaiveDate>,
}

/// Available sweep selections
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SweepKind {
    /// Flat penalty for Checking/Savings below their minimum balance
    Penalty,
    /// Flat penalty for overdrawn student accounts
    StudentPenalty,
    /// Monthly maintenance fee on Checking accounts
    Maintenance,
    /// Annual interest on Savings accounts
    SavingsInterest,
    /// Monthly interest on CreditCard debt
    CreditInterest,
    /// Every sweep, in the order above
    All,
}
