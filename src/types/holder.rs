//! Account holder types
//!
//! This module defines the `AccountHolder` owner entity and its embedded
//! value objects (`Address`, `PersonalData`). Holders exist independently
//! of accounts: an account references its owners, and one holder may be
//! the primary or secondary owner of any number of accounts.
//!
//! The holder also carries the age derivation used by the student account
//! eligibility rules: a student account owner must be at least 18 and
//! under 24 at construction time.

use crate::types::error::BankError;
use chrono::NaiveDate;
use std::fmt;

/// Account holder identifier
pub type HolderId = u64;

/// Role of a system user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Regular customer who can own accounts
    AccountHolder,
    /// Administrative user
    Admin,
}

/// Status of a system user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    /// User may operate normally
    Active,
    /// User is suspended; accounts remain but the user cannot operate
    Suspended,
}

/// Postal address
///
/// Zip codes must be 5 to 10 alphanumeric characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    street: String,
    city: String,
    zip_code: String,
    country: String,
}

impl Address {
    /// Create a new address, validating the zip code shape
    ///
    /// # Errors
    ///
    /// Returns `BankError::Validation` if the zip code is not 5-10
    /// alphanumeric characters.
    pub fn new(street: &str, city: &str, zip_code: &str, country: &str) -> Result<Self, BankError> {
        let zip_ok = (5..=10).contains(&zip_code.len())
            && zip_code.chars().all(|c| c.is_ascii_alphanumeric());
        if !zip_ok {
            return Err(BankError::Validation(format!(
                "zip code '{}' must be 5-10 alphanumeric characters",
                zip_code
            )));
        }
        Ok(Address {
            street: street.to_string(),
            city: city.to_string(),
            zip_code: zip_code.to_string(),
            country: country.to_string(),
        })
    }

    /// Street line
    pub fn street(&self) -> &str {
        &self.street
    }

    /// City name
    pub fn city(&self) -> &str {
        &self.city
    }

    /// Zip code
    pub fn zip_code(&self) -> &str {
        &self.zip_code
    }

    /// Country name
    pub fn country(&self) -> &str {
        &self.country
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {}, {}",
            self.street, self.zip_code, self.city, self.country
        )
    }
}

/// Contact data block for an account holder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonalData {
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone_number: String,
}

/// Owner of bank accounts
///
/// Referenced (never owned) by accounts; see `Account` for how primary
/// and secondary owners are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountHolder {
    id: HolderId,
    name: String,
    date_of_birth: NaiveDate,
    personal_data: PersonalData,
    primary_address: Address,
    mailing_address: Option<Address>,
    role: Role,
    status: UserStatus,
    created_at: NaiveDate,
}

impl AccountHolder {
    /// Create a new account holder
    ///
    /// The holder starts Active with the `AccountHolder` role and no
    /// separate mailing address; `today` stamps `created_at`.
    pub fn new(
        id: HolderId,
        name: &str,
        date_of_birth: NaiveDate,
        personal_data: PersonalData,
        primary_address: Address,
        today: NaiveDate,
    ) -> Self {
        AccountHolder {
            id,
            name: name.to_string(),
            date_of_birth,
            personal_data,
            primary_address,
            mailing_address: None,
            role: Role::AccountHolder,
            status: UserStatus::Active,
            created_at: today,
        }
    }

    /// Attach a separate mailing address
    pub fn with_mailing_address(mut self, mailing_address: Address) -> Self {
        self.mailing_address = Some(mailing_address);
        self
    }

    /// Holder id
    pub fn id(&self) -> HolderId {
        self.id
    }

    /// Full name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Date of birth
    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    /// Contact data
    pub fn personal_data(&self) -> &PersonalData {
        &self.personal_data
    }

    /// Primary (residential) address
    pub fn primary_address(&self) -> &Address {
        &self.primary_address
    }

    /// Mailing address, when it differs from the primary address
    pub fn mailing_address(&self) -> Option<&Address> {
        self.mailing_address.as_ref()
    }

    /// User role
    pub fn role(&self) -> Role {
        self.role
    }

    /// User status
    pub fn status(&self) -> UserStatus {
        self.status
    }

    /// Creation date
    pub fn created_at(&self) -> NaiveDate {
        self.created_at
    }

    /// Age in whole years as of `today`
    ///
    /// Returns `None` when the birth date lies in the future.
    pub fn age(&self, today: NaiveDate) -> Option<u32> {
        today.years_since(self.date_of_birth)
    }

    /// Check the student account eligibility rules
    ///
    /// A student account owner must be at least 18 and under 24 years old
    /// as of `today`.
    ///
    /// # Errors
    ///
    /// Returns a distinct `EligibilityViolation` for each failing bound,
    /// so callers (and API consumers downstream) see which rule tripped.
    pub fn check_student_eligibility(&self, today: NaiveDate) -> Result<(), BankError> {
        let age = self.age(today).unwrap_or(0);
        if age < 18 {
            return Err(BankError::eligibility_violation(
                &self.name,
                age,
                "must be at least 18 years old",
            ));
        }
        if age >= 24 {
            return Err(BankError::eligibility_violation(
                &self.name,
                age,
                "must be under 24 years old",
            ));
        }
        Ok(())
    }
}
