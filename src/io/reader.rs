//! Streaming CSV reader for account books
//!
//! Provides a streaming iterator over account records from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Iterator Interface
//!
//! AccountReader implements the Iterator trait, yielding
//! Result<Account, String> for each CSV row:
//!
//! ```no_run
//! use rust_banking_engine::io::AccountReader;
//! use std::path::Path;
//!
//! let reader = AccountReader::new(Path::new("accounts.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(account) => println!("Loaded account {}", account.id()),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing and validation errors are yielded as Err
//!   variants in the iterator, so one bad row never aborts the file
//! - Line numbers are included in error messages for debugging
//!
//! # Memory Efficiency
//!
//! Rows are read and converted one at a time; memory usage is O(1) per
//! record, not O(file_size).

use crate::io::csv_format::{convert_account_record, AccountCsvRecord};
use crate::types::Account;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Streaming account CSV reader
///
/// Provides an iterator interface over validated accounts. Rows that
/// fail parsing or domain validation are yielded as errors and can be
/// skipped by the caller.
#[derive(Debug)]
pub struct AccountReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl AccountReader {
    /// Create a new AccountReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration.
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (for the optional variant columns)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(AccountReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for AccountReader {
    type Item = Result<Account, String>;

    /// Get the next account from the CSV file
    ///
    /// Reads and deserializes the next row, converts it into a validated
    /// `Account`, and annotates any failure with the line number.
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Account))` - Successfully parsed and validated account
    /// * `Some(Err(String))` - Parse or validation error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        let mut deserializer = self.reader.deserialize::<AccountCsvRecord>();

        match deserializer.next()? {
            Ok(record) => {
                self.line_num += 1;
                Some(
                    convert_account_record(record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AccountType;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,type,balance,currency,status,secret_key,creation_date,\
owner_id,owner_name,owner_birth_date,owner_email,owner_phone,\
owner_street,owner_city,owner_zip,owner_country,\
minimum_balance,interest_rate,credit_limit,last_fee_date,last_interest_date";

    fn owner_cols(name: &str, birth: &str) -> String {
        format!(
            "10,{},{},{}@example.com,+34600000000,1 Bank St,Madrid,28001,Spain",
            name,
            birth,
            name.to_lowercase().replace(' ', ".")
        )
    }

    fn create_temp_csv(rows: &[String]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "{}", HEADER).expect("Failed to write header");
        for row in rows {
            writeln!(file, "{}", row).expect("Failed to write row");
        }
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_account_reader_new_opens_file() {
        let file = create_temp_csv(&[]);
        assert!(AccountReader::new(file.path()).is_ok());
    }

    #[test]
    fn test_account_reader_new_fails_on_missing_file() {
        let result = AccountReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_account_reader_loads_a_checking_account() {
        let row = format!(
            "1,checking,500.00,USD,active,sk-1,2024-06-15,{},,,,,",
            owner_cols("Iris Vega", "1990-03-01")
        );
        let file = create_temp_csv(&[row]);

        let accounts: Vec<_> = AccountReader::new(file.path()).unwrap().collect();
        assert_eq!(accounts.len(), 1);

        let account = accounts[0].as_ref().unwrap();
        assert_eq!(account.id(), 1);
        assert_eq!(account.account_type(), AccountType::Checking);
        assert_eq!(account.balance().amount(), Decimal::new(50000, 2));
    }

    #[test]
    fn test_account_reader_loads_every_variant() {
        let rows = vec![
            format!(
                "1,checking,500.00,USD,active,sk-1,2024-06-15,{},300,,,2024-05-01,",
                owner_cols("Iris Vega", "1990-03-01")
            ),
            format!(
                "2,savings,2000.00,USD,active,sk-2,2024-06-15,{},,0.01,,,2023-06-01",
                owner_cols("Iris Vega", "1990-03-01")
            ),
            format!(
                "3,credit_card,-75.50,USD,active,sk-3,2024-06-15,{},,0.15,1000,,2024-05-01",
                owner_cols("Iris Vega", "1990-03-01")
            ),
            format!(
                "4,student_checking,100.00,USD,active,sk-4,2024-06-15,{},,,,,",
                owner_cols("Leo Sarr", "2004-02-10")
            ),
        ];
        let file = create_temp_csv(&rows);

        let accounts: Vec<_> = AccountReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();

        assert_eq!(accounts.len(), 4);
        assert_eq!(accounts[0].account_type(), AccountType::Checking);
        assert_eq!(accounts[1].account_type(), AccountType::Savings);
        assert_eq!(accounts[2].account_type(), AccountType::CreditCard);
        assert_eq!(accounts[3].account_type(), AccountType::StudentChecking);
    }

    #[test]
    fn test_account_reader_includes_line_numbers_in_errors() {
        let rows = vec![
            format!(
                "1,checking,500.00,USD,active,sk-1,2024-06-15,{},,,,,",
                owner_cols("Iris Vega", "1990-03-01")
            ),
            format!(
                "2,checking,not_a_number,USD,active,sk-2,2024-06-15,{},,,,,",
                owner_cols("Iris Vega", "1990-03-01")
            ),
            format!(
                "3,checking,750.00,USD,active,sk-3,2024-06-15,{},,,,,",
                owner_cols("Iris Vega", "1990-03-01")
            ),
        ];
        let file = create_temp_csv(&rows);

        let results: Vec<_> = AccountReader::new(file.path()).unwrap().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(results[2].is_ok());

        let error = results[1].as_ref().unwrap_err();
        // Line 3 because of the header
        assert!(error.contains("Line 3"));
        assert!(error.contains("balance"));
    }

    #[test]
    fn test_account_reader_continues_after_validation_error() {
        let rows = vec![
            // Adult owner on a student account: validation failure
            format!(
                "1,student_checking,100.00,USD,active,sk-1,2024-06-15,{},,,,,",
                owner_cols("Iris Vega", "1990-03-01")
            ),
            format!(
                "2,savings,2000.00,USD,active,sk-2,2024-06-15,{},,,,,",
                owner_cols("Iris Vega", "1990-03-01")
            ),
        ];
        let file = create_temp_csv(&rows);

        let results: Vec<_> = AccountReader::new(file.path()).unwrap().collect();
        assert!(results[0].is_err());
        assert!(results[0].as_ref().unwrap_err().contains("not eligible"));
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_account_reader_handles_empty_file_after_header() {
        let file = create_temp_csv(&[]);
        let results: Vec<_> = AccountReader::new(file.path()).unwrap().collect();
        assert!(results.is_empty());
    }

    #[test]
    fn test_account_reader_trims_whitespace() {
        let row = format!(
            "1,  checking  ,  500.00  ,  USD  ,active,sk-1,2024-06-15,{},,,,,",
            owner_cols("Iris Vega", "1990-03-01")
        );
        let file = create_temp_csv(&[row]);

        let accounts: Vec<_> = AccountReader::new(file.path())
            .unwrap()
            .filter_map(Result::ok)
            .collect();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance().amount(), Decimal::new(50000, 2));
    }
}
