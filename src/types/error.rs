//! Error types for the banking engine
//!
//! This module defines all error types that can occur in the account model
//! and the rule evaluation sweeps. Errors carry enough context to be
//! actionable on their own in CLI output and sweep reports.
//!
//! # Error Categories
//!
//! - **Money Errors**: Currency mismatches, invalid amounts, overflow
//! - **Account Errors**: Insufficient funds, inactive accounts, lookups
//! - **Validation Errors**: Rates, limits, and balances out of bounds
//! - **Eligibility Errors**: Student account age rules
//! - **File/CSV Errors**: Used by the CSV ingestion shell

use crate::types::account::{AccountId, AccountStatus, AccountType};
use crate::types::money::Currency;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the banking engine
///
/// This enum represents all possible failures in account construction,
/// transactional operations, and sweep evaluation. Construction-time
/// violations prevent the value from existing; runtime violations leave
/// all state unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    /// Two monetary values with different currencies met in one operation
    ///
    /// Mixed currencies are a programming error, never a recoverable
    /// condition; no operation converts silently.
    #[error("Currency mismatch in {operation}: expected {expected}, got {found}")]
    CurrencyMismatch {
        /// Operation that mixed currencies
        operation: String,
        /// Currency of the left-hand side / account
        expected: Currency,
        /// Currency that was supplied
        found: Currency,
    },

    /// Amount is not strictly positive where a positive amount is required
    ///
    /// Deposits, withdrawals, transfers, purchases, and debt payments all
    /// require positive amounts. The operation is rejected without side
    /// effects.
    #[error("Invalid amount {amount} for {operation}: amount must be positive")]
    InvalidAmount {
        /// Operation that received the amount
        operation: String,
        /// The offending amount
        amount: Decimal,
    },

    /// The account cannot cover the requested amount
    ///
    /// "Cover" is variant-specific: Checking and Savings must stay at or
    /// above their minimum balance, StudentChecking may drain to exactly
    /// zero, CreditCard may spend up to its available credit.
    #[error(
        "Insufficient funds in account {account} for {operation}: available {available}, requested {requested}"
    )]
    InsufficientFunds {
        /// Account id
        account: AccountId,
        /// Operation that was refused
        operation: String,
        /// Balance (or capacity) the account could cover
        available: Decimal,
        /// Requested amount
        requested: Decimal,
    },

    /// The account is not in the Active status
    ///
    /// Transactional operations are refused on frozen accounts; sweeps
    /// still charge them.
    #[error("Account {account} is not active (status: {status})")]
    AccountInactive {
        /// Account id
        account: AccountId,
        /// The status the account is actually in
        status: AccountStatus,
    },

    /// A rate, limit, or minimum balance is outside its allowed range
    ///
    /// Raised both at construction and by the validating setters; the
    /// prior value is left unchanged. Floor-only rules use `Decimal::MAX`
    /// as the upper bound and render as "at least {min}".
    #[error("{field} must be {}, provided: {provided}", if *max == Decimal::MAX { format!("at least {}", min) } else { format!("between {} and {}", min, max) })]
    ValidationRange {
        /// Human-readable field name
        field: String,
        /// Inclusive lower bound
        min: Decimal,
        /// Inclusive upper bound
        max: Decimal,
        /// The rejected value
        provided: Decimal,
    },

    /// An account holder does not satisfy the student account age rules
    ///
    /// Raised at StudentChecking construction for every owner that fails
    /// the check; the account is never created.
    #[error("Account holder '{holder}' is not eligible for a student account (age {age}): {requirement}")]
    EligibilityViolation {
        /// Holder name
        holder: String,
        /// Holder age at the evaluation date
        age: u32,
        /// Which rule was violated
        requirement: String,
    },

    /// No account exists with the given id
    #[error("Account {id} not found")]
    NotFound {
        /// The id that was looked up
        id: AccountId,
    },

    /// Currency code is not a three-letter ISO 4217 code
    #[error("Unknown currency code '{code}'")]
    UnknownCurrency {
        /// The rejected code
        code: String,
    },

    /// A non-range structural validation failed (e.g. malformed zip code)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation does not exist for this account variant
    ///
    /// E.g. a purchase against a Savings account. The capability is decided
    /// by the account kind, not by runtime type tests in callers.
    #[error("Operation {operation} is not supported for account {account} ({account_type})")]
    UnsupportedOperation {
        /// Operation name
        operation: String,
        /// Account id
        account: AccountId,
        /// The variant the account actually is
        account_type: AccountType,
    },

    /// Arithmetic overflow would occur
    ///
    /// The operation is rejected to keep the balance intact.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// Arithmetic underflow would occur
    ///
    /// The operation is rejected to keep the balance intact.
    #[error("Arithmetic underflow in {operation}")]
    ArithmeticUnderflow {
        /// Operation that would underflow
        operation: String,
    },

    /// File not found at the specified path
    ///
    /// Fatal for the CSV shell; processing never starts.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Recoverable in the shell: the malformed row is skipped and
    /// processing continues with the next row.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Conversion from io::Error to BankError
impl From<std::io::Error> for BankError {
    fn from(error: std::io::Error) -> Self {
        BankError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to BankError
impl From<csv::Error> for BankError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        BankError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl BankError {
    /// Create a CurrencyMismatch error
    pub fn currency_mismatch(operation: &str, expected: Currency, found: Currency) -> Self {
        BankError::CurrencyMismatch {
            operation: operation.to_string(),
            expected,
            found,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(operation: &str, amount: Decimal) -> Self {
        BankError::InvalidAmount {
            operation: operation.to_string(),
            amount,
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(
        account: AccountId,
        operation: &str,
        available: Decimal,
        requested: Decimal,
    ) -> Self {
        BankError::InsufficientFunds {
            account,
            operation: operation.to_string(),
            available,
            requested,
        }
    }

    /// Create an AccountInactive error
    pub fn account_inactive(account: AccountId, status: AccountStatus) -> Self {
        BankError::AccountInactive { account, status }
    }

    /// Create a ValidationRange error
    pub fn validation_range(field: &str, min: Decimal, max: Decimal, provided: Decimal) -> Self {
        BankError::ValidationRange {
            field: field.to_string(),
            min,
            max,
            provided,
        }
    }

    /// Create an EligibilityViolation error
    pub fn eligibility_violation(holder: &str, age: u32, requirement: &str) -> Self {
        BankError::EligibilityViolation {
            holder: holder.to_string(),
            age,
            requirement: requirement.to_string(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(id: AccountId) -> Self {
        BankError::NotFound { id }
    }

    /// Create an UnsupportedOperation error
    pub fn unsupported_operation(
        operation: &str,
        account: AccountId,
        account_type: AccountType,
    ) -> Self {
        BankError::UnsupportedOperation {
            operation: operation.to_string(),
            account,
            account_type,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        BankError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create an ArithmeticUnderflow error
    pub fn arithmetic_underflow(operation: &str) -> Self {
        BankError::ArithmeticUnderflow {
            operation: operation.to_string(),
        }
    }
}
