//! Batch rule evaluation sweeps
//!
//! This module provides the `RuleEvaluator` that orchestrates the fee,
//! penalty, and interest sweeps by coordinating between the account store
//! and the injected clock.
//!
//! Every sweep follows the same pipeline:
//! 1. Pull candidate accounts from the store (predicate query)
//! 2. Invoke the variant's own charge/interest method per candidate
//! 3. Persist only the accounts actually mutated
//! 4. Return the full candidate list, mutated or not, plus any
//!    per-account errors
//!
//! Sweeps are fail-soft: one candidate's failure is collected into the
//! report and logged, and never aborts the rest of the batch. Each
//! account's charge and its schedule-date stamp happen inside a single
//! `Account` method, so they cannot diverge.
//!
//! The penalty sweeps deliberately have no cool-down: every invocation
//! re-charges every account still below its minimum. Callers own the
//! cadence.

use crate::core::clock::Clock;
use crate::core::traits::AccountStore;
use crate::types::{Account, AccountId, AccountType, BankError};
use chrono::NaiveDate;
use tracing::{debug, warn};

/// A per-account failure collected during a sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepError {
    /// Account that failed
    pub account: AccountId,
    /// What went wrong
    pub error: BankError,
}

/// Outcome of one sweep
///
/// `accounts` is the full candidate list in post-sweep state, including
/// candidates that were not mutated (not due, or failed). `applied`
/// counts the accounts whose charge actually landed and was persisted.
#[derive(Debug, Default)]
pub struct SweepReport {
    /// Every candidate the sweep selected, mutated or not
    pub accounts: Vec<Account>,
    /// Per-account failures; never fatal to the batch
    pub errors: Vec<SweepError>,
    /// Number of accounts mutated and persisted
    pub applied: usize,
}

impl SweepReport {
    /// Whether every candidate was processed without error
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Orchestrates the batch fee, penalty, and interest sweeps
///
/// Owns the account store and the clock; sweeps read candidates, apply
/// the variant's charge method, and persist the mutated records.
pub struct RuleEvaluator<S, C> {
    store: S,
    clock: C,
}

impl<S: AccountStore, C: Clock> RuleEvaluator<S, C> {
    /// Create a new evaluator over a store and a clock
    pub fn new(store: S, clock: C) -> Self {
        RuleEvaluator { store, clock }
    }

    /// Shared access to the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the underlying store
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consume the evaluator, returning the store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Charge the flat penalty to every account below its minimum balance
    ///
    /// Candidates are Checking and Savings accounts with
    /// `balance < minimum_balance`. The penalty applies unconditionally
    /// per candidate and has no cool-down: an account that stays below
    /// its minimum is re-charged by every invocation.
    pub fn apply_low_balance_penalties(&mut self) -> SweepReport {
        let candidates = self.store.find_due_for_penalty();
        self.run_sweep("low_balance_penalty", candidates, |account, _today| {
            account.apply_penalty_fee().map(|_| true)
        })
    }

    /// Charge the flat penalty to every student account in overdraft
    ///
    /// Candidates are StudentChecking accounts with a negative balance.
    /// Same repeat-charge contract as the low-balance sweep.
    pub fn apply_student_overdraft_penalties(&mut self) -> SweepReport {
        let candidates = self.store.find_overdrawn_student_accounts();
        self.run_sweep("student_overdraft_penalty", candidates, |account, _today| {
            account.apply_penalty_fee().map(|_| true)
        })
    }

    /// Apply the monthly maintenance fee to every checking account due
    ///
    /// The fee and its date stamp are applied atomically per account, so
    /// running the sweep twice on the same day charges only once.
    pub fn apply_maintenance_fees(&mut self) -> SweepReport {
        let today = self.clock.today();
        let candidates = self.store.find_due_for_maintenance(today);
        self.run_sweep("maintenance_fee", candidates, |account, today| {
            account.apply_monthly_maintenance_fee(today)
        })
    }

    /// Credit annual interest to every savings account due
    pub fn apply_savings_interest(&mut self) -> SweepReport {
        let today = self.clock.today();
        let candidates = self
            .store
            .find_due_for_interest(AccountType::Savings, today);
        self.run_sweep("savings_interest", candidates, |account, today| {
            account.apply_interest(today)
        })
    }

    /// Charge monthly interest to every credit card account due
    ///
    /// Interest accrues only on drawn credit; a card without debt is
    /// still marked evaluated (its schedule date advances) without a
    /// balance change.
    pub fn apply_credit_card_interest(&mut self) -> SweepReport {
        let today = self.clock.today();
        let candidates = self
            .store
            .find_due_for_interest(AccountType::CreditCard, today);
        self.run_sweep("credit_card_interest", candidates, |account, today| {
            account.apply_interest(today)
        })
    }

    /// Run one sweep over a candidate list
    ///
    /// `apply` returns whether the account was mutated; mutated accounts
    /// are persisted, failures are collected, and every candidate ends up
    /// in the report either way.
    fn run_sweep<F>(&mut self, sweep: &str, candidates: Vec<Account>, apply: F) -> SweepReport
    where
        F: Fn(&mut Account, NaiveDate) -> Result<bool, BankError>,
    {
        let today = self.clock.today();
        let mut report = SweepReport::default();

        debug!(sweep, candidates = candidates.len(), "starting sweep");

        for mut account in candidates {
            match apply(&mut account, today) {
                Ok(true) => {
                    debug!(
                        sweep,
                        account = account.id(),
                        balance = %account.balance(),
                        "applied"
                    );
                    self.store.save(account.clone());
                    report.applied += 1;
                }
                Ok(false) => {}
                Err(error) => {
                    warn!(sweep, account = account.id(), %error, "candidate failed");
                    report.errors.push(SweepError {
                        account: account.id(),
                        error,
                    });
                }
            }
            report.accounts.push(account);
        }

        debug!(
            sweep,
            applied = report.applied,
            errors = report.errors.len(),
            "sweep finished"
        );
        report
    }
}
