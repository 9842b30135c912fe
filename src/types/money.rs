//! Money and currency types for the banking engine
//!
//! This module defines the `Money` value type used for all monetary math
//! in the account model, and the `Currency` code that tags it.
//!
//! # Precision
//!
//! Amounts are exact decimals (`rust_decimal::Decimal`) held at 2 decimal
//! places; construction rescales with banker's rounding (half-to-even) so
//! repeated fee and interest applications cannot accumulate drift.
//!
//! # Currency Safety
//!
//! Every binary operation (add, subtract, compare, increase, decrease)
//! requires both operands to carry the same currency code and fails with
//! `CurrencyMismatch` otherwise. Nothing converts silently.

use crate::types::error::BankError;
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;

/// ISO 4217 currency code
///
/// A compact, copyable three-letter code. Construction through
/// [`Currency::from_code`] validates the shape (three ASCII uppercase
/// letters); the well-known constants below cover the common cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Currency([u8; 3]);

impl Currency {
    /// United States dollar
    pub const USD: Currency = Currency(*b"USD");

    /// Euro
    pub const EUR: Currency = Currency(*b"EUR");

    /// Pound sterling
    pub const GBP: Currency = Currency(*b"GBP");

    /// Parse a currency code from a string
    ///
    /// The code must be exactly three ASCII uppercase letters.
    ///
    /// # Errors
    ///
    /// Returns `BankError::UnknownCurrency` for any other shape.
    pub fn from_code(code: &str) -> Result<Self, BankError> {
        let bytes = code.as_bytes();
        if bytes.len() == 3 && bytes.iter().all(|b| b.is_ascii_uppercase()) {
            Ok(Currency([bytes[0], bytes[1], bytes[2]]))
        } else {
            Err(BankError::UnknownCurrency {
                code: code.to_string(),
            })
        }
    }

    /// The three-letter code as a string slice
    pub fn code(&self) -> &str {
        // Validated as ASCII at construction
        std::str::from_utf8(&self.0).expect("currency codes are ASCII")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Currency-tagged exact decimal amount
///
/// The arithmetic primitive for everything above it in the account model.
/// Negative amounts are valid states (drawn credit, overdrafts); no
/// operation clamps to zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Create a new Money value
    ///
    /// The amount is rescaled to 2 decimal places using half-to-even
    /// rounding; this is the only place rounding happens, so all derived
    /// values (interest, fees, utilization) are reproducible.
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Money {
            amount: amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven),
            currency,
        }
    }

    /// Create a zero amount in the given currency
    pub fn zero(currency: Currency) -> Self {
        Money {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// The numeric amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency tag
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Add another amount, producing a new Money value
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if the currencies differ, or
    /// `ArithmeticOverflow` if the sum does not fit.
    pub fn add(&self, other: &Money) -> Result<Money, BankError> {
        self.ensure_same_currency(other, "add")?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| BankError::arithmetic_overflow("add"))?;
        Ok(Money::new(amount, self.currency))
    }

    /// Subtract another amount, producing a new Money value
    ///
    /// The result may be negative; there is no clamping at zero.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if the currencies differ, or
    /// `ArithmeticUnderflow` if the difference does not fit.
    pub fn subtract(&self, other: &Money) -> Result<Money, BankError> {
        self.ensure_same_currency(other, "subtract")?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| BankError::arithmetic_underflow("subtract"))?;
        Ok(Money::new(amount, self.currency))
    }

    /// Compare two amounts of the same currency
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if the currencies differ.
    pub fn compare(&self, other: &Money) -> Result<Ordering, BankError> {
        self.ensure_same_currency(other, "compare")?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Increase this amount in place, returning the new amount
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if the currencies differ, or
    /// `ArithmeticOverflow` if the sum does not fit. On error the amount
    /// is left unchanged.
    pub fn increase(&mut self, other: &Money) -> Result<Decimal, BankError> {
        self.ensure_same_currency(other, "increase")?;
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| BankError::arithmetic_overflow("increase"))?;
        self.amount = amount;
        Ok(self.amount)
    }

    /// Decrease this amount in place, returning the new amount
    ///
    /// The result may go negative; fees and penalties are applied without
    /// a zero floor.
    ///
    /// # Errors
    ///
    /// Returns `CurrencyMismatch` if the currencies differ, or
    /// `ArithmeticUnderflow` if the difference does not fit. On error the
    /// amount is left unchanged.
    pub fn decrease(&mut self, other: &Money) -> Result<Decimal, BankError> {
        self.ensure_same_currency(other, "decrease")?;
        let amount = self
            .amount
            .checked_sub(other.amount)
            .ok_or_else(|| BankError::arithmetic_underflow("decrease"))?;
        self.amount = amount;
        Ok(self.amount)
    }

    /// Whether the amount is strictly positive
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Whether the amount is zero
    pub fn is_zero(&self) -> bool {
        self.amount == Decimal::ZERO
    }

    /// Whether the amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.amount < Decimal::ZERO
    }

    fn ensure_same_currency(&self, other: &Money, operation: &str) -> Result<(), BankError> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(BankError::currency_mismatch(
                operation,
                self.currency,
                other.currency,
            ))
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}
