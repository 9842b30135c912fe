//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `money`: Money and currency types
//! - `holder`: Account holder and embedded value objects
//! - `account`: Account record, variant sum type, and per-variant policy
//! - `error`: Error types for the banking engine

pub mod account;
pub mod error;
pub mod holder;
pub mod money;

pub use account::{
    Account, AccountId, AccountKind, AccountStatus, AccountType, Checking, CreditCard, Savings,
};
pub use error::BankError;
pub use holder::{AccountHolder, Address, HolderId, PersonalData, Role, UserStatus};
pub use money::{Currency, Money};
