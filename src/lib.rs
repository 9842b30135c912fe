//! Rust Banking Engine Library
//! # Overview
//!
//! This library implements the financial model behind a set of bank
//! account products: the money arithmetic, the account variants with
//! their fee/penalty/interest policies, and the batch rule-evaluation
//! sweeps that decide which accounts owe a charge and apply it.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Money, AccountHolder, Account, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Business logic components:
//!   - [`core::evaluator`] - Batch fee, penalty, and interest sweeps
//!   - [`core::traits`] - Account store contract and due-schedule capability
//!   - [`core::account_store`] - In-memory reference store
//!   - [`core::clock`] - Injectable calendar date source
//! - [`io`] - CSV account book ingestion and output
//!
//! # Account Variants
//!
//! The engine supports four account products:
//!
//! - **Checking**: minimum balance with penalty, monthly maintenance fee
//! - **Savings**: minimum balance with penalty, annual interest
//! - **CreditCard**: credit limit, monthly interest charged on drawn credit
//! - **StudentChecking**: no minimum or fees; owners must be 18-23 at opening
//!
//! # Sweeps
//!
//! Five batch operations select due accounts from a store and apply one
//! rule to each: low-balance penalties, student overdraft penalties,
//! maintenance fees, savings interest, and credit card interest. Sweeps
//! are fail-soft (per-account errors are collected, never fatal) and
//! every charge is stamped with its schedule date atomically.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use core::{AccountStore, Clock, InMemoryAccountStore, RuleEvaluator, SweepReport};
pub use io::write_accounts_csv;
pub use types::{
    Account, AccountHolder, AccountId, AccountStatus, AccountType, BankError, Currency, Money,
};
