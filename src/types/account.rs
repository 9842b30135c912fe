//! Account types for the banking engine
//!
//! This module defines the `Account` record shared by every account
//! variant, the closed `AccountKind` sum type carrying the per-variant
//! data, and the variant structs themselves (`Checking`, `Savings`,
//! `CreditCard`; student checking carries no extra fields).
//!
//! # Design
//!
//! Variants are a sum type over one shared record, not an inheritance
//! hierarchy: the shared fields (balance, owners, status, penalty fee)
//! live on `Account`, and the per-variant policy (minimum balance,
//! schedules, credit limit) lives on the variant structs. `Account`
//! provides the dispatch surface the rule evaluator and callers use, so
//! no caller ever branches on the concrete variant itself.
//!
//! # Currency Pinning
//!
//! Every embedded `Money` field is created in the currency of the initial
//! balance and never changes. Validating setters re-check the currency,
//! which makes cross-currency arithmetic inside one account unreachable.

use crate::types::error::BankError;
use crate::types::holder::AccountHolder;
use crate::types::money::{Currency, Money};
use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Account identifier
///
/// Supports account ids from 0 to 2^64-1
pub type AccountId = u64;

/// Lifecycle status of an account
///
/// Transitions are driven by collaborators outside this core; the core
/// only reads the status to refuse transactional operations on accounts
/// that are not Active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    /// Account operates normally
    Active,
    /// Account is frozen; holder-initiated operations are refused
    Frozen,
}

impl AccountStatus {
    /// Lowercase name used in CSV and display output
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Frozen => "frozen",
        }
    }

    /// Parse a status from its lowercase name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "active" => Some(AccountStatus::Active),
            "frozen" => Some(AccountStatus::Frozen),
            _ => None,
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag identifying the account variant
///
/// Used by store queries and the CSV shell; behavior dispatch goes
/// through `Account` methods, never through this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountType {
    Checking,
    Savings,
    CreditCard,
    StudentChecking,
}

impl AccountType {
    /// Lowercase name used in CSV and display output
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::CreditCard => "credit_card",
            AccountType::StudentChecking => "student_checking",
        }
    }

    /// Parse a type from its lowercase name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "checking" => Some(AccountType::Checking),
            "savings" => Some(AccountType::Savings),
            "credit_card" => Some(AccountType::CreditCard),
            "student_checking" => Some(AccountType::StudentChecking),
            _ => None,
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True when `last + months` lies strictly before `today`
///
/// The boundary day itself is not yet due; an unset date is always due.
fn recurring_charge_due(last: Option<NaiveDate>, months: u32, today: NaiveDate) -> bool {
    match last {
        None => true,
        Some(last) => last
            .checked_add_months(Months::new(months))
            .is_some_and(|due| due < today),
    }
}

/// Checking account policy: minimum balance and monthly maintenance fee
///
/// Defaults to a 250 minimum balance (hard floor 250) and a 12 monthly
/// maintenance fee, both in the account's balance currency.
#[derive(Debug, Clone, PartialEq)]
pub struct Checking {
    minimum_balance: Money,
    monthly_maintenance_fee: Money,
    last_maintenance_fee_date: Option<NaiveDate>,
}

impl Checking {
    const MINIMUM_BALANCE_FLOOR: i64 = 250;
    const DEFAULT_MAINTENANCE_FEE: i64 = 12;

    fn new(currency: Currency) -> Self {
        Checking {
            minimum_balance: Money::new(Decimal::new(Self::MINIMUM_BALANCE_FLOOR, 0), currency),
            monthly_maintenance_fee: Money::new(
                Decimal::new(Self::DEFAULT_MAINTENANCE_FEE, 0),
                currency,
            ),
            last_maintenance_fee_date: None,
        }
    }

    /// Minimum balance the account must keep to avoid the penalty
    pub fn minimum_balance(&self) -> &Money {
        &self.minimum_balance
    }

    /// Fee charged once per month
    pub fn monthly_maintenance_fee(&self) -> &Money {
        &self.monthly_maintenance_fee
    }

    /// Date the maintenance fee was last applied, unset for new accounts
    pub fn last_maintenance_fee_date(&self) -> Option<NaiveDate> {
        self.last_maintenance_fee_date
    }

    /// Restore the schedule date when rehydrating from storage
    pub fn set_last_maintenance_fee_date(&mut self, date: Option<NaiveDate>) {
        self.last_maintenance_fee_date = date;
    }

    /// Set the minimum balance, re-validating the floor and currency
    ///
    /// # Errors
    ///
    /// Returns `ValidationRange` below the 250 floor or
    /// `CurrencyMismatch` for a foreign currency; the prior value is
    /// kept on error.
    pub fn set_minimum_balance(&mut self, minimum_balance: Money) -> Result<(), BankError> {
        if minimum_balance.currency() != self.minimum_balance.currency() {
            return Err(BankError::currency_mismatch(
                "set_minimum_balance",
                self.minimum_balance.currency(),
                minimum_balance.currency(),
            ));
        }
        if minimum_balance.amount() < Decimal::new(Self::MINIMUM_BALANCE_FLOOR, 0) {
            return Err(BankError::validation_range(
                "minimum balance",
                Decimal::new(Self::MINIMUM_BALANCE_FLOOR, 0),
                Decimal::MAX,
                minimum_balance.amount(),
            ));
        }
        self.minimum_balance = minimum_balance;
        Ok(())
    }

    /// Whether the balance has fallen below the minimum
    pub fn is_below_minimum_balance(&self, balance: &Money) -> bool {
        balance.amount() < self.minimum_balance.amount()
    }

    /// Whether the monthly maintenance fee is due as of `today`
    ///
    /// Due when the fee has never been applied, or when a full month has
    /// passed strictly before `today`. The boundary day (exactly one
    /// month later) is not yet due.
    pub fn should_apply_monthly_maintenance_fee(&self, today: NaiveDate) -> bool {
        recurring_charge_due(self.last_maintenance_fee_date, 1, today)
    }

    /// Whether `amount` can leave the account without dropping below the
    /// minimum balance
    pub fn has_enough_balance(&self, balance: &Money, amount: &Money) -> Result<bool, BankError> {
        let remaining = balance.subtract(amount)?;
        Ok(remaining.compare(&self.minimum_balance)? != Ordering::Less)
    }
}

/// Savings account policy: minimum balance and annual interest
///
/// Defaults to a 1000 minimum balance (floor 100) and a 0.25% annual
/// interest rate (valid range: above zero, at most 0.5).
#[derive(Debug, Clone, PartialEq)]
pub struct Savings {
    minimum_balance: Money,
    interest_rate: Decimal,
    last_interest_date: Option<NaiveDate>,
}

impl Savings {
    const DEFAULT_MINIMUM_BALANCE: i64 = 1000;
    const MINIMUM_BALANCE_FLOOR: i64 = 100;

    fn new(currency: Currency) -> Self {
        Savings {
            minimum_balance: Money::new(Decimal::new(Self::DEFAULT_MINIMUM_BALANCE, 0), currency),
            interest_rate: Decimal::new(25, 4), // 0.0025
            last_interest_date: None,
        }
    }

    fn max_interest_rate() -> Decimal {
        Decimal::new(5, 1) // 0.5
    }

    /// Minimum balance the account must keep to avoid the penalty
    pub fn minimum_balance(&self) -> &Money {
        &self.minimum_balance
    }

    /// Annual interest rate as a fraction (0.0025 = 0.25%)
    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Date interest was last credited, unset for new accounts
    pub fn last_interest_date(&self) -> Option<NaiveDate> {
        self.last_interest_date
    }

    /// Restore the schedule date when rehydrating from storage
    pub fn set_last_interest_date(&mut self, date: Option<NaiveDate>) {
        self.last_interest_date = date;
    }

    /// Set the interest rate, re-validating the bounds
    ///
    /// # Errors
    ///
    /// Returns `ValidationRange` unless `0 < rate <= 0.5`; the prior rate
    /// is kept on error.
    pub fn set_interest_rate(&mut self, interest_rate: Decimal) -> Result<(), BankError> {
        if interest_rate <= Decimal::ZERO || interest_rate > Self::max_interest_rate() {
            return Err(BankError::validation_range(
                "interest rate",
                Decimal::ZERO,
                Self::max_interest_rate(),
                interest_rate,
            ));
        }
        self.interest_rate = interest_rate;
        Ok(())
    }

    /// Set the minimum balance, re-validating the floor and currency
    ///
    /// # Errors
    ///
    /// Returns `ValidationRange` below the 100 floor or
    /// `CurrencyMismatch` for a foreign currency; the prior value is
    /// kept on error.
    pub fn set_minimum_balance(&mut self, minimum_balance: Money) -> Result<(), BankError> {
        if minimum_balance.currency() != self.minimum_balance.currency() {
            return Err(BankError::currency_mismatch(
                "set_minimum_balance",
                self.minimum_balance.currency(),
                minimum_balance.currency(),
            ));
        }
        if minimum_balance.amount() < Decimal::new(Self::MINIMUM_BALANCE_FLOOR, 0) {
            return Err(BankError::validation_range(
                "minimum balance",
                Decimal::new(Self::MINIMUM_BALANCE_FLOOR, 0),
                Decimal::MAX,
                minimum_balance.amount(),
            ));
        }
        self.minimum_balance = minimum_balance;
        Ok(())
    }

    /// Whether the balance has fallen below the minimum
    pub fn is_below_minimum_balance(&self, balance: &Money) -> bool {
        balance.amount() < self.minimum_balance.amount()
    }

    /// Whether `amount` can leave the account without dropping below the
    /// minimum balance
    pub fn has_sufficient_balance(
        &self,
        balance: &Money,
        amount: &Money,
    ) -> Result<bool, BankError> {
        let remaining = balance.subtract(amount)?;
        Ok(remaining.compare(&self.minimum_balance)? != Ordering::Less)
    }

    /// Whether the annual interest is due as of `today`
    ///
    /// Due when interest has never been credited, or when a full year has
    /// passed strictly before `today`.
    pub fn should_apply_annual_interest(&self, today: NaiveDate) -> bool {
        recurring_charge_due(self.last_interest_date, 12, today)
    }

    /// Interest for one year on the current balance
    ///
    /// Accrues on the full balance, including negative balances; the
    /// result is rounded half-to-even at 2 decimal places.
    pub fn calculate_annual_interest(&self, balance: &Money) -> Result<Money, BankError> {
        let amount = balance
            .amount()
            .checked_mul(self.interest_rate)
            .ok_or_else(|| BankError::arithmetic_overflow("calculate_annual_interest"))?;
        Ok(Money::new(amount, balance.currency()))
    }

    /// Earliest date the next interest credit becomes possible
    ///
    /// Unset accounts can be credited immediately, so this is `None`
    /// until the first credit happens.
    pub fn next_interest_date(&self) -> Option<NaiveDate> {
        self.last_interest_date
            .and_then(|last| last.checked_add_months(Months::new(12)))
    }
}

/// Credit card policy: credit limit and monthly interest on drawn credit
///
/// The balance of a credit card account is negative while credit is
/// drawn; there is no minimum-balance concept, only available credit.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditCard {
    credit_limit: Money,
    interest_rate: Decimal,
    last_interest_date: Option<NaiveDate>,
}

impl CreditCard {
    const MIN_CREDIT_LIMIT: i64 = 100;
    const MAX_CREDIT_LIMIT: i64 = 100_000;

    fn min_interest_rate() -> Decimal {
        Decimal::new(1, 1) // 0.1
    }

    fn max_interest_rate() -> Decimal {
        Decimal::new(10, 1) // 1.0
    }

    fn default_interest_rate() -> Decimal {
        Decimal::new(2, 1) // 0.2
    }

    fn new(
        credit_limit: Money,
        interest_rate: Option<Decimal>,
        balance_currency: Currency,
    ) -> Result<Self, BankError> {
        if credit_limit.currency() != balance_currency {
            return Err(BankError::currency_mismatch(
                "credit_limit",
                balance_currency,
                credit_limit.currency(),
            ));
        }
        let mut card = CreditCard {
            credit_limit: Money::new(Decimal::new(Self::MIN_CREDIT_LIMIT, 0), balance_currency),
            interest_rate: Self::default_interest_rate(),
            last_interest_date: None,
        };
        card.set_credit_limit(credit_limit)?;
        if let Some(rate) = interest_rate {
            card.set_interest_rate(rate)?;
        }
        Ok(card)
    }

    /// Credit limit
    pub fn credit_limit(&self) -> &Money {
        &self.credit_limit
    }

    /// Annual interest rate charged monthly on drawn credit
    pub fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }

    /// Date interest was last evaluated, unset for new accounts
    pub fn last_interest_date(&self) -> Option<NaiveDate> {
        self.last_interest_date
    }

    /// Restore the schedule date when rehydrating from storage
    pub fn set_last_interest_date(&mut self, date: Option<NaiveDate>) {
        self.last_interest_date = date;
    }

    /// Set the credit limit, re-validating the range and currency
    ///
    /// # Errors
    ///
    /// Returns `ValidationRange` outside [100, 100000] or
    /// `CurrencyMismatch` for a foreign currency; the prior limit is kept
    /// on error.
    pub fn set_credit_limit(&mut self, credit_limit: Money) -> Result<(), BankError> {
        if credit_limit.currency() != self.credit_limit.currency() {
            return Err(BankError::currency_mismatch(
                "set_credit_limit",
                self.credit_limit.currency(),
                credit_limit.currency(),
            ));
        }
        let amount = credit_limit.amount();
        if amount < Decimal::new(Self::MIN_CREDIT_LIMIT, 0)
            || amount > Decimal::new(Self::MAX_CREDIT_LIMIT, 0)
        {
            return Err(BankError::validation_range(
                "credit limit",
                Decimal::new(Self::MIN_CREDIT_LIMIT, 0),
                Decimal::new(Self::MAX_CREDIT_LIMIT, 0),
                amount,
            ));
        }
        self.credit_limit = credit_limit;
        Ok(())
    }

    /// Set the interest rate, re-validating the bounds
    ///
    /// # Errors
    ///
    /// Returns `ValidationRange` unless `0.1 <= rate <= 1.0`; the prior
    /// rate is kept on error.
    pub fn set_interest_rate(&mut self, interest_rate: Decimal) -> Result<(), BankError> {
        if interest_rate < Self::min_interest_rate() || interest_rate > Self::max_interest_rate() {
            return Err(BankError::validation_range(
                "interest rate",
                Self::min_interest_rate(),
                Self::max_interest_rate(),
                interest_rate,
            ));
        }
        self.interest_rate = interest_rate;
        Ok(())
    }

    /// Credit still available for purchases: `credit_limit + balance`
    ///
    /// A negative balance (drawn credit) reduces availability; a positive
    /// balance (overpayment) raises it above the limit.
    pub fn available_credit(&self, balance: &Money) -> Result<Money, BankError> {
        self.credit_limit.add(balance)
    }

    /// Drawn credit: `max(0, -balance)`
    pub fn current_debt(&self, balance: &Money) -> Money {
        if balance.is_negative() {
            Money::new(-balance.amount(), balance.currency())
        } else {
            Money::zero(balance.currency())
        }
    }

    /// Whether the available credit covers `amount`
    pub fn covers(&self, balance: &Money, amount: &Money) -> Result<bool, BankError> {
        let available = self.available_credit(balance)?;
        Ok(available.compare(amount)? != Ordering::Less)
    }

    /// Whether the monthly interest is due as of `today`
    pub fn should_apply_monthly_interest(&self, today: NaiveDate) -> bool {
        recurring_charge_due(self.last_interest_date, 1, today)
    }

    /// Interest for one month on the current debt
    ///
    /// One twelfth of the annual rate applied to the drawn credit,
    /// rounded half-to-even at 2 decimal places. Zero when the balance
    /// is non-negative: interest accrues only on debt.
    pub fn calculate_monthly_interest(&self, balance: &Money) -> Result<Money, BankError> {
        let debt = self.current_debt(balance);
        if debt.is_zero() {
            return Ok(Money::zero(balance.currency()));
        }
        let amount = debt
            .amount()
            .checked_mul(self.interest_rate)
            .and_then(|annual| annual.checked_div(Decimal::new(12, 0)))
            .ok_or_else(|| BankError::arithmetic_overflow("calculate_monthly_interest"))?;
        Ok(Money::new(amount, balance.currency()))
    }

    /// Debt as a percentage of the credit limit, 0 when there is no debt
    ///
    /// Rounded half-to-even at 2 decimal places so the figure is
    /// reproducible across runs.
    pub fn credit_utilization_percentage(&self, balance: &Money) -> Result<Decimal, BankError> {
        let debt = self.current_debt(balance);
        if debt.is_zero() {
            return Ok(Decimal::ZERO);
        }
        let ratio = debt
            .amount()
            .checked_div(self.credit_limit.amount())
            .and_then(|r| r.checked_mul(Decimal::new(100, 0)))
            .ok_or_else(|| BankError::arithmetic_overflow("credit_utilization_percentage"))?;
        Ok(ratio.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven))
    }
}

/// Per-variant data of an account
///
/// A closed set: the rule evaluator and the store dispatch through
/// `Account` methods, so adding a variant is a compile-time change, not a
/// runtime discovery.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountKind {
    Checking(Checking),
    Savings(Savings),
    CreditCard(CreditCard),
    StudentChecking,
}

/// Bank account: shared record plus variant data
///
/// Created with a primary owner and an initial balance; the secondary
/// owner is optional. Every embedded monetary field is pinned to the
/// balance currency at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    id: AccountId,
    balance: Money,
    secret_key: String,
    creation_date: NaiveDate,
    status: AccountStatus,
    penalty_fee: Money,
    primary_owner: Arc<AccountHolder>,
    secondary_owner: Option<Arc<AccountHolder>>,
    kind: AccountKind,
}

impl Account {
    const DEFAULT_PENALTY_FEE: i64 = 40;

    fn with_kind(
        id: AccountId,
        balance: Money,
        secret_key: &str,
        primary_owner: Arc<AccountHolder>,
        secondary_owner: Option<Arc<AccountHolder>>,
        today: NaiveDate,
        kind: AccountKind,
    ) -> Self {
        let penalty_fee = Money::new(
            Decimal::new(Self::DEFAULT_PENALTY_FEE, 0),
            balance.currency(),
        );
        Account {
            id,
            balance,
            secret_key: secret_key.to_string(),
            creation_date: today,
            status: AccountStatus::Active,
            penalty_fee,
            primary_owner,
            secondary_owner,
            kind,
        }
    }

    /// Create a checking account with default policy
    ///
    /// 250 minimum balance, 12 monthly maintenance fee, both in the
    /// balance currency. The maintenance fee has never been applied, so
    /// the first sweep will charge it.
    pub fn checking(
        id: AccountId,
        balance: Money,
        secret_key: &str,
        primary_owner: Arc<AccountHolder>,
        secondary_owner: Option<Arc<AccountHolder>>,
        today: NaiveDate,
    ) -> Self {
        let kind = AccountKind::Checking(Checking::new(balance.currency()));
        Self::with_kind(
            id,
            balance,
            secret_key,
            primary_owner,
            secondary_owner,
            today,
            kind,
        )
    }

    /// Create a savings account with default policy
    ///
    /// 1000 minimum balance and 0.25% annual interest. Use the variant
    /// setters through [`Account::as_savings_mut`] for custom rates; they
    /// re-validate the construction bounds.
    pub fn savings(
        id: AccountId,
        balance: Money,
        secret_key: &str,
        primary_owner: Arc<AccountHolder>,
        secondary_owner: Option<Arc<AccountHolder>>,
        today: NaiveDate,
    ) -> Self {
        let kind = AccountKind::Savings(Savings::new(balance.currency()));
        Self::with_kind(
            id,
            balance,
            secret_key,
            primary_owner,
            secondary_owner,
            today,
            kind,
        )
    }

    /// Create a credit card account
    ///
    /// # Errors
    ///
    /// Returns `ValidationRange` for a credit limit outside [100, 100000]
    /// or a rate outside [0.1, 1.0], and `CurrencyMismatch` when the
    /// limit is not in the balance currency. `None` for the rate selects
    /// the 0.2 default.
    #[allow(clippy::too_many_arguments)]
    pub fn credit_card(
        id: AccountId,
        balance: Money,
        secret_key: &str,
        primary_owner: Arc<AccountHolder>,
        secondary_owner: Option<Arc<AccountHolder>>,
        credit_limit: Money,
        interest_rate: Option<Decimal>,
        today: NaiveDate,
    ) -> Result<Self, BankError> {
        let card = CreditCard::new(credit_limit, interest_rate, balance.currency())?;
        Ok(Self::with_kind(
            id,
            balance,
            secret_key,
            primary_owner,
            secondary_owner,
            today,
            AccountKind::CreditCard(card),
        ))
    }

    /// Create a student checking account
    ///
    /// Every owner present must satisfy the student age rules (at least
    /// 18, under 24) as of `today`.
    ///
    /// # Errors
    ///
    /// Returns `EligibilityViolation` for the first owner that fails the
    /// check; no account is created.
    pub fn student_checking(
        id: AccountId,
        balance: Money,
        secret_key: &str,
        primary_owner: Arc<AccountHolder>,
        secondary_owner: Option<Arc<AccountHolder>>,
        today: NaiveDate,
    ) -> Result<Self, BankError> {
        primary_owner.check_student_eligibility(today)?;
        if let Some(secondary) = &secondary_owner {
            secondary.check_student_eligibility(today)?;
        }
        Ok(Self::with_kind(
            id,
            balance,
            secret_key,
            primary_owner,
            secondary_owner,
            today,
            AccountKind::StudentChecking,
        ))
    }

    // ----- shared accessors -----

    /// Account id
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Current balance
    pub fn balance(&self) -> &Money {
        &self.balance
    }

    /// Secret key (opaque credential data; verification is external)
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    /// Date the account was created
    pub fn creation_date(&self) -> NaiveDate {
        self.creation_date
    }

    /// Lifecycle status
    pub fn status(&self) -> AccountStatus {
        self.status
    }

    /// Change the lifecycle status (driven by external collaborators)
    pub fn set_status(&mut self, status: AccountStatus) {
        self.status = status;
    }

    /// Whether the account is in the Active status
    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }

    /// Flat penalty fee, in the balance currency (default 40)
    pub fn penalty_fee(&self) -> &Money {
        &self.penalty_fee
    }

    /// Primary owner (always present)
    pub fn primary_owner(&self) -> &AccountHolder {
        &self.primary_owner
    }

    /// Secondary owner, if any
    pub fn secondary_owner(&self) -> Option<&AccountHolder> {
        self.secondary_owner.as_deref()
    }

    /// Per-variant data
    pub fn kind(&self) -> &AccountKind {
        &self.kind
    }

    /// Variant tag
    pub fn account_type(&self) -> AccountType {
        match self.kind {
            AccountKind::Checking(_) => AccountType::Checking,
            AccountKind::Savings(_) => AccountType::Savings,
            AccountKind::CreditCard(_) => AccountType::CreditCard,
            AccountKind::StudentChecking => AccountType::StudentChecking,
        }
    }

    /// Descriptive one-line summary of the variant's rules (display only)
    pub fn account_type_info(&self) -> &'static str {
        match self.kind {
            AccountKind::Checking(_) => {
                "Checking account: 250 minimum balance, 12 monthly maintenance fee, penalty when below minimum"
            }
            AccountKind::Savings(_) => {
                "Savings account: minimum balance with penalty, annual interest credited automatically"
            }
            AccountKind::CreditCard(_) => {
                "Credit card: credit limit, monthly interest charged on drawn credit"
            }
            AccountKind::StudentChecking => {
                "Student checking account: no minimum balance, no maintenance fee, owners aged 18 to 23"
            }
        }
    }

    /// Checking policy, if this is a checking account
    pub fn as_checking(&self) -> Option<&Checking> {
        match &self.kind {
            AccountKind::Checking(checking) => Some(checking),
            _ => None,
        }
    }

    /// Mutable checking policy, if this is a checking account
    pub fn as_checking_mut(&mut self) -> Option<&mut Checking> {
        match &mut self.kind {
            AccountKind::Checking(checking) => Some(checking),
            _ => None,
        }
    }

    /// Savings policy, if this is a savings account
    pub fn as_savings(&self) -> Option<&Savings> {
        match &self.kind {
            AccountKind::Savings(savings) => Some(savings),
            _ => None,
        }
    }

    /// Mutable savings policy, if this is a savings account
    pub fn as_savings_mut(&mut self) -> Option<&mut Savings> {
        match &mut self.kind {
            AccountKind::Savings(savings) => Some(savings),
            _ => None,
        }
    }

    /// Credit card policy, if this is a credit card account
    pub fn as_credit_card(&self) -> Option<&CreditCard> {
        match &self.kind {
            AccountKind::CreditCard(card) => Some(card),
            _ => None,
        }
    }

    /// Mutable credit card policy, if this is a credit card account
    pub fn as_credit_card_mut(&mut self) -> Option<&mut CreditCard> {
        match &mut self.kind {
            AccountKind::CreditCard(card) => Some(card),
            _ => None,
        }
    }

    // ----- minimum balance and penalties -----

    /// Minimum balance for variants that have one (Checking, Savings)
    pub fn minimum_balance(&self) -> Option<&Money> {
        match &self.kind {
            AccountKind::Checking(checking) => Some(checking.minimum_balance()),
            AccountKind::Savings(savings) => Some(savings.minimum_balance()),
            _ => None,
        }
    }

    /// Whether the balance is below the minimum
    ///
    /// `None` for variants without a minimum-balance concept.
    pub fn is_below_minimum_balance(&self) -> Option<bool> {
        match &self.kind {
            AccountKind::Checking(checking) => {
                Some(checking.is_below_minimum_balance(&self.balance))
            }
            AccountKind::Savings(savings) => Some(savings.is_below_minimum_balance(&self.balance)),
            _ => None,
        }
    }

    /// Subtract the flat penalty fee from the balance, unconditionally
    ///
    /// Used by the penalty sweeps after candidate selection; there is no
    /// cool-down, so repeated calls keep charging. Returns the new
    /// balance amount.
    pub fn apply_penalty_fee(&mut self) -> Result<Decimal, BankError> {
        let fee = self.penalty_fee.clone();
        self.balance.decrease(&fee)
    }

    /// Charge the flat penalty when the balance is below the minimum
    ///
    /// Returns whether the penalty was charged; a no-op (and `false`) for
    /// accounts at or above their minimum, or without one.
    pub fn apply_penalty_if_below_minimum(&mut self) -> Result<bool, BankError> {
        match self.is_below_minimum_balance() {
            Some(true) => {
                self.apply_penalty_fee()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    // ----- recurring charges -----

    /// Whether the monthly maintenance fee is due (Checking only)
    pub fn maintenance_fee_due(&self, today: NaiveDate) -> bool {
        self.as_checking()
            .is_some_and(|checking| checking.should_apply_monthly_maintenance_fee(today))
    }

    /// Apply the monthly maintenance fee when due
    ///
    /// Subtracts the fee and stamps the date in one step, so the charge
    /// and its schedule update never diverge. Returns whether the fee was
    /// applied; `false` when not due or not a checking account.
    pub fn apply_monthly_maintenance_fee(&mut self, today: NaiveDate) -> Result<bool, BankError> {
        let AccountKind::Checking(checking) = &mut self.kind else {
            return Ok(false);
        };
        if !checking.should_apply_monthly_maintenance_fee(today) {
            return Ok(false);
        }
        let fee = checking.monthly_maintenance_fee.clone();
        self.balance.decrease(&fee)?;
        checking.last_maintenance_fee_date = Some(today);
        Ok(true)
    }

    /// Whether interest is due (Savings: annual; CreditCard: monthly)
    pub fn interest_due(&self, today: NaiveDate) -> bool {
        match &self.kind {
            AccountKind::Savings(savings) => savings.should_apply_annual_interest(today),
            AccountKind::CreditCard(card) => card.should_apply_monthly_interest(today),
            _ => false,
        }
    }

    /// Apply the variant's interest when due
    ///
    /// Savings credit `balance * rate` once a year; credit cards charge
    /// one month of interest on drawn credit. The schedule date advances
    /// whenever the account was evaluated, so a credit card with no debt
    /// returns `true` without a balance change. `false` means not due (or
    /// a variant without interest) and no mutation at all.
    pub fn apply_interest(&mut self, today: NaiveDate) -> Result<bool, BankError> {
        match &mut self.kind {
            AccountKind::Savings(savings) => {
                if !savings.should_apply_annual_interest(today) {
                    return Ok(false);
                }
                let interest = savings.calculate_annual_interest(&self.balance)?;
                self.balance.increase(&interest)?;
                savings.last_interest_date = Some(today);
                Ok(true)
            }
            AccountKind::CreditCard(card) => {
                if !card.should_apply_monthly_interest(today) {
                    return Ok(false);
                }
                let interest = card.calculate_monthly_interest(&self.balance)?;
                if !interest.is_zero() {
                    self.balance.decrease(&interest)?;
                }
                card.last_interest_date = Some(today);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    // ----- transactional operations -----

    fn ensure_active(&self) -> Result<(), BankError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(BankError::account_inactive(self.id, self.status))
        }
    }

    fn validate_amount(&self, amount: &Money, operation: &str) -> Result<(), BankError> {
        if !amount.is_positive() {
            return Err(BankError::invalid_amount(operation, amount.amount()));
        }
        if amount.currency() != self.balance.currency() {
            return Err(BankError::currency_mismatch(
                operation,
                self.balance.currency(),
                amount.currency(),
            ));
        }
        Ok(())
    }

    /// Whether `amount` may leave the account under the variant's policy
    ///
    /// Checking and Savings must stay at or above their minimum balance,
    /// StudentChecking may drain to exactly zero, CreditCard may draw up
    /// to its available credit.
    pub fn can_withdraw(&self, amount: &Money) -> Result<bool, BankError> {
        match &self.kind {
            AccountKind::Checking(checking) => checking.has_enough_balance(&self.balance, amount),
            AccountKind::Savings(savings) => savings.has_sufficient_balance(&self.balance, amount),
            AccountKind::CreditCard(card) => card.covers(&self.balance, amount),
            AccountKind::StudentChecking => Ok(self.balance.compare(amount)? != Ordering::Less),
        }
    }

    /// Largest amount the variant's policy would let leave the account
    ///
    /// Reported as the "available" figure in `InsufficientFunds` errors.
    fn withdrawal_capacity(&self) -> Decimal {
        match &self.kind {
            AccountKind::Checking(checking) => {
                self.balance.amount() - checking.minimum_balance().amount()
            }
            AccountKind::Savings(savings) => {
                self.balance.amount() - savings.minimum_balance().amount()
            }
            AccountKind::CreditCard(card) => card
                .available_credit(&self.balance)
                .map(|credit| credit.amount())
                .unwrap_or(Decimal::ZERO),
            AccountKind::StudentChecking => self.balance.amount(),
        }
    }

    /// Credit funds to the account
    ///
    /// # Errors
    ///
    /// `InvalidAmount` for non-positive amounts, `CurrencyMismatch` for a
    /// foreign currency, `AccountInactive` when not Active. Nothing is
    /// mutated on error.
    pub fn deposit(&mut self, amount: &Money) -> Result<(), BankError> {
        self.validate_amount(amount, "deposit")?;
        self.ensure_active()?;
        self.balance.increase(amount)?;
        Ok(())
    }

    /// Debit funds from the account
    ///
    /// # Errors
    ///
    /// `InvalidAmount`, `CurrencyMismatch`, `AccountInactive`, or
    /// `InsufficientFunds` when the variant's policy refuses the amount.
    /// Nothing is mutated on error.
    pub fn withdraw(&mut self, amount: &Money) -> Result<(), BankError> {
        self.validate_amount(amount, "withdraw")?;
        self.ensure_active()?;
        if !self.can_withdraw(amount)? {
            return Err(BankError::insufficient_funds(
                self.id,
                "withdraw",
                self.withdrawal_capacity(),
                amount.amount(),
            ));
        }
        self.balance.decrease(amount)?;
        Ok(())
    }

    /// Move funds from this account to `target`
    ///
    /// Both sides are validated before a single cent moves: positive
    /// amount, matching currencies on both accounts, both accounts
    /// Active, and sufficient funds on this side.
    pub fn transfer_to(&mut self, amount: &Money, target: &mut Account) -> Result<(), BankError> {
        self.validate_amount(amount, "transfer_out")?;
        self.ensure_active()?;
        target.validate_amount(amount, "transfer_in")?;
        target.ensure_active()?;
        if !self.can_withdraw(amount)? {
            return Err(BankError::insufficient_funds(
                self.id,
                "transfer_out",
                self.withdrawal_capacity(),
                amount.amount(),
            ));
        }
        // Prove the credit side fits before debiting
        target
            .balance
            .amount()
            .checked_add(amount.amount())
            .ok_or_else(|| BankError::arithmetic_overflow("transfer_to"))?;
        self.balance.decrease(amount)?;
        target.balance.increase(amount)?;
        Ok(())
    }

    /// Credit funds arriving from another account
    ///
    /// # Errors
    ///
    /// `InvalidAmount`, `CurrencyMismatch`, or `AccountInactive`; nothing
    /// is mutated on error.
    pub fn receive_transfer(&mut self, amount: &Money) -> Result<(), BankError> {
        self.validate_amount(amount, "receive_transfer")?;
        self.ensure_active()?;
        self.balance.increase(amount)?;
        Ok(())
    }

    // ----- credit card operations -----

    fn credit_card_or_unsupported(&self, operation: &str) -> Result<&CreditCard, BankError> {
        self.as_credit_card().ok_or_else(|| {
            BankError::unsupported_operation(operation, self.id, self.account_type())
        })
    }

    /// Credit still available for purchases (CreditCard only)
    pub fn available_credit(&self) -> Result<Money, BankError> {
        let card = self.credit_card_or_unsupported("available_credit")?;
        card.available_credit(&self.balance)
    }

    /// Drawn credit (CreditCard only)
    pub fn current_debt(&self) -> Result<Money, BankError> {
        let card = self.credit_card_or_unsupported("current_debt")?;
        Ok(card.current_debt(&self.balance))
    }

    /// Debt as a percentage of the credit limit (CreditCard only)
    pub fn credit_utilization_percentage(&self) -> Result<Decimal, BankError> {
        let card = self.credit_card_or_unsupported("credit_utilization_percentage")?;
        card.credit_utilization_percentage(&self.balance)
    }

    /// Whether a purchase of `amount` would be permitted (CreditCard only)
    pub fn can_make_purchase(&self, amount: &Money) -> Result<bool, BankError> {
        let card = self.credit_card_or_unsupported("can_make_purchase")?;
        card.covers(&self.balance, amount)
    }

    /// Draw credit for a purchase (CreditCard only)
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for other variants, `InvalidAmount`,
    /// `CurrencyMismatch`, `AccountInactive`, or `InsufficientFunds` when
    /// the available credit does not cover the amount. No side effect on
    /// refusal.
    pub fn make_purchase(&mut self, amount: &Money) -> Result<(), BankError> {
        let card = self.credit_card_or_unsupported("make_purchase")?;
        let available = card.available_credit(&self.balance)?;
        self.validate_amount(amount, "make_purchase")?;
        self.ensure_active()?;
        if available.compare(amount)? == Ordering::Less {
            return Err(BankError::insufficient_funds(
                self.id,
                "make_purchase",
                available.amount(),
                amount.amount(),
            ));
        }
        self.balance.decrease(amount)?;
        Ok(())
    }

    /// Pay down drawn credit (CreditCard only)
    ///
    /// Overpayment beyond the current debt is allowed and leaves the
    /// balance positive.
    ///
    /// # Errors
    ///
    /// `UnsupportedOperation` for other variants, `InvalidAmount`,
    /// `CurrencyMismatch`, or `AccountInactive`; nothing is mutated on
    /// error.
    pub fn pay_credit_card_debt(&mut self, amount: &Money) -> Result<(), BankError> {
        self.credit_card_or_unsupported("pay_credit_card_debt")?;
        self.validate_amount(amount, "pay_credit_card_debt")?;
        self.ensure_active()?;
        self.balance.increase(amount)?;
        Ok(())
    }
}
