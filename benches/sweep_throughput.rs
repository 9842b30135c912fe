//! Benchmark suite for the rule evaluation sweeps
//!
//! Measures sweep throughput over in-memory account books of three
//! sizes using the divan benchmarking framework. Books are generated
//! in the benchmark setup (outside the measured section), so the
//! figures reflect candidate selection plus charge application only.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench
//! ```

use chrono::NaiveDate;
use rust_banking_engine::core::{AccountStore, FixedClock, InMemoryAccountStore, RuleEvaluator};
use rust_banking_engine::types::{Account, AccountHolder, Address, Currency, Money, PersonalData};
use rust_decimal::Decimal;
use std::sync::Arc;

fn main() {
    divan::main();
}

const BOOK_SIZES: [u64; 3] = [100, 1_000, 10_000];

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn usd(amount: i64) -> Money {
    Money::new(Decimal::new(amount, 2), Currency::USD)
}

fn owner(id: u64, dob: NaiveDate) -> Arc<AccountHolder> {
    Arc::new(AccountHolder::new(
        id,
        "Bench Holder",
        dob,
        PersonalData {
            email: format!("holder{}@example.com", id),
            phone_number: "+34600000000".to_string(),
        },
        Address::new("1 Bank St", "Madrid", "28001", "Spain").unwrap(),
        today(),
    ))
}

/// Build a book of `size` accounts cycling through the variants
///
/// Half of the checking/savings accounts sit below their minimum and
/// half of the student accounts are overdrawn, so every sweep has a
/// non-trivial candidate set.
fn book(size: u64) -> RuleEvaluator<InMemoryAccountStore, FixedClock> {
    let adult = owner(1, NaiveDate::from_ymd_opt(1990, 3, 1).unwrap());
    let student = owner(2, NaiveDate::from_ymd_opt(2004, 2, 10).unwrap());

    let mut store = InMemoryAccountStore::new();
    for id in 0..size {
        let account = match id % 4 {
            0 => {
                let balance = if id % 8 == 0 { usd(20000) } else { usd(100000) };
                Account::checking(id, balance, "sk", Arc::clone(&adult), None, today())
            }
            1 => {
                let balance = if id % 8 == 1 { usd(50000) } else { usd(200000) };
                Account::savings(id, balance, "sk", Arc::clone(&adult), None, today())
            }
            2 => Account::credit_card(
                id,
                usd(-5000),
                "sk",
                Arc::clone(&adult),
                None,
                Money::new(Decimal::new(1000, 0), Currency::USD),
                None,
                today(),
            )
            .expect("valid credit card fixture"),
            _ => {
                let balance = if id % 8 == 3 { usd(-2500) } else { usd(10000) };
                Account::student_checking(id, balance, "sk", Arc::clone(&student), None, today())
                    .expect("valid student fixture")
            }
        };
        store.save(account);
    }
    RuleEvaluator::new(store, FixedClock::new(today()))
}

#[divan::bench(args = BOOK_SIZES)]
fn low_balance_penalty_sweep(bencher: divan::Bencher, size: u64) {
    bencher
        .with_inputs(|| book(size))
        .bench_local_values(|mut evaluator| evaluator.apply_low_balance_penalties());
}

#[divan::bench(args = BOOK_SIZES)]
fn student_overdraft_penalty_sweep(bencher: divan::Bencher, size: u64) {
    bencher
        .with_inputs(|| book(size))
        .bench_local_values(|mut evaluator| evaluator.apply_student_overdraft_penalties());
}

#[divan::bench(args = BOOK_SIZES)]
fn maintenance_fee_sweep(bencher: divan::Bencher, size: u64) {
    bencher
        .with_inputs(|| book(size))
        .bench_local_values(|mut evaluator| evaluator.apply_maintenance_fees());
}

#[divan::bench(args = BOOK_SIZES)]
fn savings_interest_sweep(bencher: divan::Bencher, size: u64) {
    bencher
        .with_inputs(|| book(size))
        .bench_local_values(|mut evaluator| evaluator.apply_savings_interest());
}

#[divan::bench(args = BOOK_SIZES)]
fn credit_card_interest_sweep(bencher: divan::Bencher, size: u64) {
    bencher
        .with_inputs(|| book(size))
        .bench_local_values(|mut evaluator| evaluator.apply_credit_card_interest());
}

#[divan::bench(args = BOOK_SIZES)]
fn full_sweep_pass(bencher: divan::Bencher, size: u64) {
    bencher.with_inputs(|| book(size)).bench_local_values(|mut evaluator| {
        evaluator.apply_low_balance_penalties();
        evaluator.apply_student_overdraft_penalties();
        evaluator.apply_maintenance_fees();
        evaluator.apply_savings_interest();
        evaluator.apply_credit_card_interest();
    });
}
