//! CSV format handling for account records
//!
//! This module centralizes all CSV format concerns, providing:
//! - AccountCsvRecord structure for deserialization
//! - Conversion from CSV records to validated `Account` values
//! - Account output serialization
//!
//! All functions are pure (no I/O) for easy testing.
//!
//! # Record Layout
//!
//! One flat row per account: the shared account columns, the primary
//! owner columns, and the variant-specific columns (minimum balance,
//! interest rate, credit limit, schedule dates), which are left empty
//! for variants they do not apply to. Output rows use the same layout,
//! so a written book can be read back in.

use crate::types::{
    Account, AccountHolder, AccountId, AccountKind, AccountStatus, AccountType, Address, Currency,
    HolderId, Money, PersonalData,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;

/// CSV record structure for deserialization
///
/// Matches the input CSV column layout. Monetary and date fields are
/// carried as strings so a malformed value produces a per-row error
/// instead of aborting the whole file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AccountCsvRecord {
    pub id: AccountId,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: String,
    pub currency: String,
    pub status: String,
    pub secret_key: String,
    pub creation_date: String,
    pub owner_id: HolderId,
    pub owner_name: String,
    pub owner_birth_date: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub owner_street: String,
    pub owner_city: String,
    pub owner_zip: String,
    pub owner_country: String,
    pub minimum_balance: Option<String>,
    pub interest_rate: Option<String>,
    pub credit_limit: Option<String>,
    pub last_fee_date: Option<String>,
    pub last_interest_date: Option<String>,
}

/// Output column order, shared by the writer and the round-trip tests
pub const CSV_HEADER: [&str; 21] = [
    "id",
    "type",
    "balance",
    "currency",
    "status",
    "secret_key",
    "creation_date",
    "owner_id",
    "owner_name",
    "owner_birth_date",
    "owner_email",
    "owner_phone",
    "owner_street",
    "owner_city",
    "owner_zip",
    "owner_country",
    "minimum_balance",
    "interest_rate",
    "credit_limit",
    "last_fee_date",
    "last_interest_date",
];

fn parse_decimal(value: &str, field: &str, id: AccountId) -> Result<Decimal, String> {
    Decimal::from_str(value.trim())
        .map_err(|_| format!("Invalid {} '{}' for account {}", field, value, id))
}

fn parse_date(value: &str, field: &str, id: AccountId) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        format!(
            "Invalid {} '{}' for account {}: expected YYYY-MM-DD",
            field, value, id
        )
    })
}

/// Empty and whitespace-only optional cells count as absent
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Convert an AccountCsvRecord to a validated Account
///
/// This function:
/// - Parses the type, status, currency, and date columns
/// - Builds the primary owner from the owner columns
/// - Constructs the matching account variant, running the same
///   validation as programmatic construction (credit limit and rate
///   ranges, minimum-balance floors, student eligibility as of the
///   creation date)
/// - Restores the recurring-charge schedule dates
///
/// # Returns
///
/// Result containing either:
/// - Ok(Account) - Successfully converted and validated account
/// - Err(String) - Error message describing the conversion failure
pub fn convert_account_record(record: AccountCsvRecord) -> Result<Account, String> {
    let id = record.id;
    let account_type = AccountType::from_str(&record.account_type).ok_or_else(|| {
        format!(
            "Invalid account type '{}' for account {}",
            record.account_type, id
        )
    })?;
    let status = AccountStatus::from_str(&record.status)
        .ok_or_else(|| format!("Invalid status '{}' for account {}", record.status, id))?;
    let currency = Currency::from_code(record.currency.trim())
        .map_err(|e| format!("Account {}: {}", id, e))?;
    let balance = Money::new(parse_decimal(&record.balance, "balance", id)?, currency);
    let creation_date = parse_date(&record.creation_date, "creation_date", id)?;

    let owner_birth_date = parse_date(&record.owner_birth_date, "owner_birth_date", id)?;
    let address = Address::new(
        &record.owner_street,
        &record.owner_city,
        record.owner_zip.trim(),
        &record.owner_country,
    )
    .map_err(|e| format!("Account {}: {}", id, e))?;
    let owner = Arc::new(AccountHolder::new(
        record.owner_id,
        record.owner_name.trim(),
        owner_birth_date,
        PersonalData {
            email: record.owner_email.trim().to_string(),
            phone_number: record.owner_phone.trim().to_string(),
        },
        address,
        creation_date,
    ));

    let secret_key = record.secret_key.trim();
    let mut account = match account_type {
        AccountType::Checking => {
            let mut account =
                Account::checking(id, balance, secret_key, owner, None, creation_date);
            if let Some(checking) = account.as_checking_mut() {
                if let Some(min) = present(&record.minimum_balance) {
                    let min = parse_decimal(min, "minimum_balance", id)?;
                    checking
                        .set_minimum_balance(Money::new(min, currency))
                        .map_err(|e| format!("Account {}: {}", id, e))?;
                }
                if let Some(date) = present(&record.last_fee_date) {
                    let date = parse_date(date, "last_fee_date", id)?;
                    checking.set_last_maintenance_fee_date(Some(date));
                }
            }
            account
        }
        AccountType::Savings => {
            let mut account = Account::savings(id, balance, secret_key, owner, None, creation_date);
            if let Some(savings) = account.as_savings_mut() {
                if let Some(min) = present(&record.minimum_balance) {
                    let min = parse_decimal(min, "minimum_balance", id)?;
                    savings
                        .set_minimum_balance(Money::new(min, currency))
                        .map_err(|e| format!("Account {}: {}", id, e))?;
                }
                if let Some(rate) = present(&record.interest_rate) {
                    let rate = parse_decimal(rate, "interest_rate", id)?;
                    savings
                        .set_interest_rate(rate)
                        .map_err(|e| format!("Account {}: {}", id, e))?;
                }
                if let Some(date) = present(&record.last_interest_date) {
                    let date = parse_date(date, "last_interest_date", id)?;
                    savings.set_last_interest_date(Some(date));
                }
            }
            account
        }
        AccountType::CreditCard => {
            let limit = present(&record.credit_limit)
                .ok_or_else(|| format!("Credit card account {} requires a credit_limit", id))?;
            let limit = Money::new(parse_decimal(limit, "credit_limit", id)?, currency);
            let rate = present(&record.interest_rate)
                .map(|rate| parse_decimal(rate, "interest_rate", id))
                .transpose()?;
            let mut account =
                Account::credit_card(id, balance, secret_key, owner, None, limit, rate, creation_date)
                    .map_err(|e| format!("Account {}: {}", id, e))?;
            if let Some(card) = account.as_credit_card_mut() {
                if let Some(date) = present(&record.last_interest_date) {
                    let date = parse_date(date, "last_interest_date", id)?;
                    card.set_last_interest_date(Some(date));
                }
            }
            account
        }
        AccountType::StudentChecking => {
            Account::student_checking(id, balance, secret_key, owner, None, creation_date)
                .map_err(|e| format!("Account {}: {}", id, e))?
        }
    };
    account.set_status(status);

    Ok(account)
}

fn optional_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.to_string()).unwrap_or_default()
}

/// Write a book of accounts to CSV format
///
/// Emits the [`CSV_HEADER`] columns with monetary fields at 2 decimal
/// places; variant columns an account does not carry stay empty.
/// Accounts are sorted by id for deterministic output.
///
/// # Arguments
///
/// * `accounts` - Slice of accounts to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_accounts_csv(accounts: &[Account], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(CSV_HEADER)
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_accounts = accounts.to_vec();
    sorted_accounts.sort_by_key(|account| account.id());

    for account in sorted_accounts {
        let owner = account.primary_owner();
        let address = owner.primary_address();

        let (minimum_balance, interest_rate, credit_limit, last_fee_date, last_interest_date) =
            match account.kind() {
                AccountKind::Checking(checking) => (
                    format!("{:.2}", checking.minimum_balance().amount()),
                    String::new(),
                    String::new(),
                    optional_date(checking.last_maintenance_fee_date()),
                    String::new(),
                ),
                AccountKind::Savings(savings) => (
                    format!("{:.2}", savings.minimum_balance().amount()),
                    savings.interest_rate().to_string(),
                    String::new(),
                    String::new(),
                    optional_date(savings.last_interest_date()),
                ),
                AccountKind::CreditCard(card) => (
                    String::new(),
                    card.interest_rate().to_string(),
                    format!("{:.2}", card.credit_limit().amount()),
                    String::new(),
                    optional_date(card.last_interest_date()),
                ),
                AccountKind::StudentChecking => (
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                    String::new(),
                ),
            };

        writer
            .write_record(&[
                account.id().to_string(),
                account.account_type().to_string(),
                format!("{:.2}", account.balance().amount()),
                account.balance().currency().to_string(),
                account.status().to_string(),
                account.secret_key().to_string(),
                account.creation_date().to_string(),
                owner.id().to_string(),
                owner.name().to_string(),
                owner.date_of_birth().to_string(),
                owner.personal_data().email.clone(),
                owner.personal_data().phone_number.clone(),
                address.street().to_string(),
                address.city().to_string(),
                address.zip_code().to_string(),
                address.country().to_string(),
                minimum_balance,
                interest_rate,
                credit_limit,
                last_fee_date,
                last_interest_date,
            ])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
