//! Core traits for account storage and recurring-charge capabilities
//!
//! This module defines the collaborator contract the rule evaluator pulls
//! candidate accounts from (`AccountStore`), and the `DueSchedule`
//! capability trait that marks which account variants carry a recurring
//! charge. Persistence and transport layers outside this crate implement
//! `AccountStore` against their own backends; the in-memory
//! implementation in [`crate::core::account_store`] backs the CLI and
//! the tests.

use crate::types::{
    Account, AccountId, AccountStatus, AccountType, BankError, Checking, CreditCard, HolderId,
    Savings,
};
use chrono::{Months, NaiveDate};

/// Collaborator contract for account persistence and queries
///
/// Query methods return owned account records: the core never holds
/// references into storage, mutates its own copy, and hands the result
/// back through [`AccountStore::save`]. Implementations must keep
/// `save` idempotent per account id (last write wins).
pub trait AccountStore {
    /// Look up one account by id
    ///
    /// # Errors
    ///
    /// Returns `BankError::NotFound` when no account has the id.
    fn find_by_id(&self, id: AccountId) -> Result<Account, BankError>;

    /// All accounts owned (primarily or secondarily) by the holder
    fn find_by_owner(&self, owner_id: HolderId) -> Vec<Account>;

    /// All accounts in the given lifecycle status
    fn find_by_status(&self, status: AccountStatus) -> Vec<Account>;

    /// All accounts of the given variant
    fn find_by_type(&self, account_type: AccountType) -> Vec<Account>;

    /// Checking and Savings accounts currently below their minimum balance
    fn find_due_for_penalty(&self) -> Vec<Account>;

    /// StudentChecking accounts with a negative balance
    fn find_overdrawn_student_accounts(&self) -> Vec<Account>;

    /// Checking accounts whose monthly maintenance fee is due
    fn find_due_for_maintenance(&self, today: NaiveDate) -> Vec<Account>;

    /// Accounts of `account_type` whose interest is due
    ///
    /// Empty for variants without an interest schedule.
    fn find_due_for_interest(&self, account_type: AccountType, today: NaiveDate) -> Vec<Account>;

    /// Persist an account record (insert or replace by id)
    fn save(&mut self, account: Account);

    /// Delete an account by id; returns whether it existed
    fn delete_by_id(&mut self, id: AccountId) -> bool;
}

/// Capability of a variant that carries a recurring, date-gated charge
///
/// Implemented by the variants that have one: `Checking` (monthly
/// maintenance fee), `Savings` (annual interest), `CreditCard` (monthly
/// interest). StudentChecking has no recurring charge and simply does not
/// implement the capability, which is what makes the due-sweeps skip it
/// without runtime type tests.
pub trait DueSchedule {
    /// Whether the charge is due as of `today`
    fn is_due(&self, today: NaiveDate) -> bool;

    /// Earliest date the charge can next become due
    ///
    /// `None` while the charge has never been applied (it is due
    /// immediately).
    fn next_due(&self) -> Option<NaiveDate>;
}

impl DueSchedule for Checking {
    fn is_due(&self, today: NaiveDate) -> bool {
        self.should_apply_monthly_maintenance_fee(today)
    }

    fn next_due(&self) -> Option<NaiveDate> {
        self.last_maintenance_fee_date()
            .and_then(|last| last.checked_add_months(Months::new(1)))
    }
}

impl DueSchedule for Savings {
    fn is_due(&self, today: NaiveDate) -> bool {
        self.should_apply_annual_interest(today)
    }

    fn next_due(&self) -> Option<NaiveDate> {
        self.next_interest_date()
    }
}

impl DueSchedule for CreditCard {
    fn is_due(&self, today: NaiveDate) -> bool {
        self.should_apply_monthly_interest(today)
    }

    fn next_due(&self) -> Option<NaiveDate> {
        self.last_interest_date()
            .and_then(|last| last.checked_add_months(Months::new(1)))
    }
}
