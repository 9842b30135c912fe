//! End-to-end integration tests
//!
//! These tests exercise the complete pipeline through the public API:
//! build a book of accounts, run sweeps against a pinned clock, and
//! assert the resulting balances and schedule dates. A second group
//! drives the CSV shell: accounts written with the CSV writer are read
//! back through the streaming reader and swept, mirroring what the CLI
//! binary does.
//!
//! All due-date comparisons run against a `FixedClock`, so the expected
//! balances are exact.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_banking_engine::core::{
        AccountStore, FixedClock, InMemoryAccountStore, RuleEvaluator,
    };
    use rust_banking_engine::io::{write_accounts_csv, AccountReader};
    use rust_banking_engine::types::{
        Account, AccountHolder, AccountStatus, AccountType, Address, Currency, Money, PersonalData,
    };
    use rust_decimal::Decimal;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn usd(amount: i64, scale: u32) -> Money {
        Money::new(Decimal::new(amount, scale), Currency::USD)
    }

    fn holder(id: u64, name: &str, dob: NaiveDate) -> Arc<AccountHolder> {
        Arc::new(AccountHolder::new(
            id,
            name,
            dob,
            PersonalData {
                email: format!("holder{}@example.com", id),
                phone_number: "+34600000000".to_string(),
            },
            Address::new("1 Bank St", "Madrid", "28001", "Spain").unwrap(),
            today(),
        ))
    }

    /// A small book covering every variant and every sweep predicate
    fn seeded_book() -> InMemoryAccountStore {
        let adult = holder(1, "Iris Vega", date(1990, 3, 1));
        let student = holder(2, "Leo Sarr", date(2004, 2, 10));

        let mut store = InMemoryAccountStore::new();
        // 200.00 checking against a 250 minimum
        store.save(Account::checking(
            1,
            usd(20000, 2),
            "sk-1",
            Arc::clone(&adult),
            None,
            today(),
        ));
        // Healthy checking
        store.save(Account::checking(
            2,
            usd(100000, 2),
            "sk-2",
            Arc::clone(&adult),
            None,
            today(),
        ));
        // Savings with interest last credited 13 months ago
        let mut savings = Account::savings(3, usd(100000, 2), "sk-3", Arc::clone(&adult), None, today());
        savings
            .as_savings_mut()
            .unwrap()
            .set_last_interest_date(Some(date(2023, 5, 15)));
        store.save(savings);
        // Overdrawn student account
        store.save(
            Account::student_checking(4, usd(-2500, 2), "sk-4", Arc::clone(&student), None, today())
                .unwrap(),
        );
        // Credit card carrying 50.00 of debt
        store.save(
            Account::credit_card(
                5,
                usd(-5000, 2),
                "sk-5",
                adult,
                None,
                usd(100, 0),
                None,
                today(),
            )
            .unwrap(),
        );
        store
    }

    #[test]
    fn test_full_sweep_pass_over_a_mixed_book() {
        let mut evaluator = RuleEvaluator::new(seeded_book(), FixedClock::new(today()));

        let penalty = evaluator.apply_low_balance_penalties();
        let student = evaluator.apply_student_overdraft_penalties();
        let maintenance = evaluator.apply_maintenance_fees();
        let savings = evaluator.apply_savings_interest();
        let cards = evaluator.apply_credit_card_interest();

        assert!(penalty.is_clean());
        assert_eq!(penalty.applied, 1);
        assert_eq!(student.applied, 1);
        assert_eq!(maintenance.applied, 2);
        assert_eq!(savings.applied, 1);
        assert_eq!(cards.applied, 1);

        let store = evaluator.store();
        // Checking 1: 200 - 40 penalty - 12 maintenance
        assert_eq!(
            store.find_by_id(1).unwrap().balance().amount(),
            Decimal::new(14800, 2)
        );
        // Checking 2: only the maintenance fee
        assert_eq!(
            store.find_by_id(2).unwrap().balance().amount(),
            Decimal::new(98800, 2)
        );
        // Savings 3: 1000 * 0.0025 = 2.50 credited
        assert_eq!(
            store.find_by_id(3).unwrap().balance().amount(),
            Decimal::new(100250, 2)
        );
        // Student 4: -25 - 40
        assert_eq!(
            store.find_by_id(4).unwrap().balance().amount(),
            Decimal::new(-6500, 2)
        );
        // Card 5: 50.00 debt at 20%/12 = 0.83 of interest
        assert_eq!(
            store.find_by_id(5).unwrap().balance().amount(),
            Decimal::new(-5083, 2)
        );
    }

    #[test]
    fn test_date_gated_sweeps_are_idempotent_within_a_day() {
        let mut evaluator = RuleEvaluator::new(seeded_book(), FixedClock::new(today()));

        evaluator.apply_maintenance_fees();
        evaluator.apply_savings_interest();
        evaluator.apply_credit_card_interest();

        let balances_after_first: Vec<Decimal> = evaluator
            .store()
            .all_accounts()
            .iter()
            .map(|a| a.balance().amount())
            .collect();

        // Same day, same clock: every date-gated sweep is a no-op
        assert_eq!(evaluator.apply_maintenance_fees().applied, 0);
        assert_eq!(evaluator.apply_savings_interest().applied, 0);
        assert_eq!(evaluator.apply_credit_card_interest().applied, 0);

        let balances_after_second: Vec<Decimal> = evaluator
            .store()
            .all_accounts()
            .iter()
            .map(|a| a.balance().amount())
            .collect();
        assert_eq!(balances_after_first, balances_after_second);
    }

    #[test]
    fn test_penalty_sweeps_recharge_until_balance_recovers() {
        let mut evaluator = RuleEvaluator::new(seeded_book(), FixedClock::new(today()));

        evaluator.apply_low_balance_penalties();
        evaluator.apply_low_balance_penalties();
        evaluator.apply_low_balance_penalties();

        // 200 - 40*3: the penalty has no cool-down and keeps stacking
        assert_eq!(
            evaluator.store().find_by_id(1).unwrap().balance().amount(),
            Decimal::new(8000, 2)
        );
    }

    #[test]
    fn test_schedule_dates_advance_with_the_clock() {
        let mut evaluator = RuleEvaluator::new(seeded_book(), FixedClock::new(today()));
        evaluator.apply_maintenance_fees();

        let account = evaluator.store().find_by_id(1).unwrap();
        assert_eq!(
            account.as_checking().unwrap().last_maintenance_fee_date(),
            Some(today())
        );

        // A month and a day later the fee is due again
        let mut evaluator = RuleEvaluator::new(
            evaluator.into_store(),
            FixedClock::new(date(2024, 7, 16)),
        );
        let report = evaluator.apply_maintenance_fees();
        assert_eq!(report.applied, 2);
        // 200 less two maintenance fees
        assert_eq!(
            evaluator.store().find_by_id(1).unwrap().balance().amount(),
            Decimal::new(17600, 2)
        );
    }

    #[rstest]
    #[case::boundary_day_not_due(date(2024, 7, 15), 0)]
    #[case::day_after_boundary_due(date(2024, 7, 16), 2)]
    fn test_maintenance_boundary_day_is_not_due(
        #[case] second_run: NaiveDate,
        #[case] expected_applied: usize,
    ) {
        let mut evaluator = RuleEvaluator::new(seeded_book(), FixedClock::new(today()));
        evaluator.apply_maintenance_fees();

        let mut evaluator =
            RuleEvaluator::new(evaluator.into_store(), FixedClock::new(second_run));
        assert_eq!(evaluator.apply_maintenance_fees().applied, expected_applied);
    }

    #[test]
    fn test_csv_round_trip_preserves_balances_and_schedules() {
        let mut evaluator = RuleEvaluator::new(seeded_book(), FixedClock::new(today()));
        evaluator.apply_maintenance_fees();
        evaluator.apply_savings_interest();
        let accounts = evaluator.store().all_accounts();

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        let mut buffer = Vec::new();
        write_accounts_csv(&accounts, &mut buffer).unwrap();
        file.write_all(&buffer).expect("Failed to write CSV");
        file.flush().expect("Failed to flush temp file");

        let restored: Vec<Account> = AccountReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(restored.len(), accounts.len());
        for (restored, original) in restored.iter().zip(accounts.iter()) {
            assert_eq!(restored.id(), original.id());
            assert_eq!(restored.account_type(), original.account_type());
            assert_eq!(restored.balance(), original.balance());
            assert_eq!(restored.status(), original.status());
        }

        // Schedule dates survive, so a re-run on the same day stays a no-op
        let mut store = InMemoryAccountStore::new();
        for account in restored {
            store.save(account);
        }
        let mut evaluator = RuleEvaluator::new(store, FixedClock::new(today()));
        assert_eq!(evaluator.apply_maintenance_fees().applied, 0);
        assert_eq!(evaluator.apply_savings_interest().applied, 0);
    }

    #[test]
    fn test_csv_round_trip_preserves_frozen_status() {
        let mut store = seeded_book();
        let mut account = store.find_by_id(2).unwrap();
        account.set_status(AccountStatus::Frozen);
        store.save(account);

        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        let mut buffer = Vec::new();
        write_accounts_csv(&store.all_accounts(), &mut buffer).unwrap();
        file.write_all(&buffer).expect("Failed to write CSV");
        file.flush().expect("Failed to flush temp file");

        let restored: Vec<Account> = AccountReader::new(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let frozen = restored.iter().find(|a| a.id() == 2).unwrap();
        assert_eq!(frozen.status(), AccountStatus::Frozen);
    }

    #[test]
    fn test_student_book_rows_with_ineligible_owners_are_skipped_not_fatal() {
        // Hand-written book: one valid row sandwiched between an
        // ineligible student row and a malformed row
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(
            file,
            "id,type,balance,currency,status,secret_key,creation_date,\
owner_id,owner_name,owner_birth_date,owner_email,owner_phone,\
owner_street,owner_city,owner_zip,owner_country,\
minimum_balance,interest_rate,credit_limit,last_fee_date,last_interest_date"
        )
        .unwrap();
        writeln!(
            file,
            "1,student_checking,100.00,USD,active,sk-1,2024-06-15,\
10,Iris Vega,1990-03-01,iris@example.com,+34600000000,1 Bank St,Madrid,28001,Spain,,,,,"
        )
        .unwrap();
        writeln!(
            file,
            "2,savings,2000.00,USD,active,sk-2,2024-06-15,\
10,Iris Vega,1990-03-01,iris@example.com,+34600000000,1 Bank St,Madrid,28001,Spain,,,,,"
        )
        .unwrap();
        writeln!(
            file,
            "3,checking,oops,USD,active,sk-3,2024-06-15,\
10,Iris Vega,1990-03-01,iris@example.com,+34600000000,1 Bank St,Madrid,28001,Spain,,,,,"
        )
        .unwrap();
        file.flush().expect("Failed to flush temp file");

        let results: Vec<_> = AccountReader::new(file.path()).unwrap().collect();
        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
        assert!(results[2].is_err());

        let loaded = results[1].as_ref().unwrap();
        assert_eq!(loaded.account_type(), AccountType::Savings);
        assert_eq!(loaded.balance().amount(), Decimal::new(200000, 2));
    }

    #[test]
    fn test_sweep_failure_does_not_block_other_candidates() {
        let adult = holder(1, "Iris Vega", date(1990, 3, 1));
        let mut store = InMemoryAccountStore::new();
        // Interest on a Decimal::MAX balance overflows
        store.save(Account::savings(
            1,
            Money::new(Decimal::MAX, Currency::USD),
            "sk-1",
            Arc::clone(&adult),
            None,
            today(),
        ));
        store.save(Account::savings(2, usd(100000, 2), "sk-2", adult, None, today()));

        let mut evaluator = RuleEvaluator::new(store, FixedClock::new(today()));
        let report = evaluator.apply_savings_interest();

        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].account, 1);
        assert_eq!(report.applied, 1);
        assert_eq!(
            evaluator.store().find_by_id(2).unwrap().balance().amount(),
            Decimal::new(100250, 2)
        );
    }
}
