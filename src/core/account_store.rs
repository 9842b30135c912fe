//! In-memory account store
//!
//! This module provides the `InMemoryAccountStore`, the reference
//! implementation of the [`AccountStore`](crate::core::traits::AccountStore)
//! collaborator contract. It maintains an in-memory map of account ids to
//! account records and answers the predicate queries the rule evaluator
//! sweeps over.
//!
//! The CLI loads a book of accounts from CSV into this store; tests build
//! their fixtures directly against it.

use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, AccountStatus, AccountType, BankError, HolderId};
use chrono::NaiveDate;
use std::collections::HashMap;

/// HashMap-backed account store
///
/// Query results are sorted by account id so sweep output and CSV
/// generation are deterministic.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    /// Map of account ids to account records
    accounts: HashMap<AccountId, Account>,
}

impl InMemoryAccountStore {
    /// Create a new store with no accounts
    pub fn new() -> Self {
        InMemoryAccountStore {
            accounts: HashMap::new(),
        }
    }

    /// Number of accounts in the store
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the store holds no accounts
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// All accounts sorted by id
    ///
    /// Returns owned records sorted by account id in ascending order for
    /// deterministic output.
    pub fn all_accounts(&self) -> Vec<Account> {
        let mut accounts: Vec<Account> = self.accounts.values().cloned().collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Account>
    where
        F: Fn(&Account) -> bool,
    {
        let mut accounts: Vec<Account> = self
            .accounts
            .values()
            .filter(|account| predicate(account))
            .cloned()
            .collect();
        accounts.sort_by_key(|account| account.id());
        accounts
    }
}

impl AccountStore for InMemoryAccountStore {
    fn find_by_id(&self, id: AccountId) -> Result<Account, BankError> {
        self.accounts
            .get(&id)
            .cloned()
            .ok_or_else(|| BankError::not_found(id))
    }

    fn find_by_owner(&self, owner_id: HolderId) -> Vec<Account> {
        self.filtered(|account| {
            account.primary_owner().id() == owner_id
                || account
                    .secondary_owner()
                    .is_some_and(|secondary| secondary.id() == owner_id)
        })
    }

    fn find_by_status(&self, status: AccountStatus) -> Vec<Account> {
        self.filtered(|account| account.status() == status)
    }

    fn find_by_type(&self, account_type: AccountType) -> Vec<Account> {
        self.filtered(|account| account.account_type() == account_type)
    }

    fn find_due_for_penalty(&self) -> Vec<Account> {
        self.filtered(|account| account.is_below_minimum_balance() == Some(true))
    }

    fn find_overdrawn_student_accounts(&self) -> Vec<Account> {
        self.filtered(|account| {
            account.account_type() == AccountType::StudentChecking && account.balance().is_negative()
        })
    }

    fn find_due_for_maintenance(&self, today: NaiveDate) -> Vec<Account> {
        self.filtered(|account| account.maintenance_fee_due(today))
    }

    fn find_due_for_interest(&self, account_type: AccountType, today: NaiveDate) -> Vec<Account> {
        self.filtered(|account| {
            account.account_type() == account_type && account.interest_due(today)
        })
    }

    fn save(&mut self, account: Account) {
        self.accounts.insert(account.id(), account);
    }

    fn delete_by_id(&mut self, id: AccountId) -> bool {
        self.accounts.remove(&id).is_some()
    }
}
