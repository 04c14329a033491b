//! Benchmark suite for comparing ledger implementations
//!
//! Compares the single-actor `Ledger` with the `ConcurrentLedger`, single
//! threaded and under contention, using the divan benchmarking framework.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! ```

use rust_bank_ledger::{ConcurrentLedger, IdScheme, Ledger, LedgerKind, LedgerOps};
use rust_decimal::Decimal;
use std::thread;

const ACCOUNTS: usize = 64;
const TRANSFERS: usize = 10_000;

fn main() {
    divan::main();
}

fn name(index: usize) -> String {
    format!("acct{:03}", index)
}

fn seed(ledger: &mut dyn LedgerOps) {
    for index in 0..ACCOUNTS {
        ledger
            .create_account(&name(index), Decimal::new(1_000_000, 2))
            .expect("Seeding failed");
    }
}

/// Round-robin transfers through the `LedgerOps` trait object
#[divan::bench(args = [LedgerKind::Sync, LedgerKind::Concurrent])]
fn transfers_single_thread(bencher: divan::Bencher, kind: LedgerKind) {
    let names: Vec<String> = (0..ACCOUNTS).map(name).collect();

    bencher
        .with_inputs(|| {
            let mut ledger = rust_bank_ledger::create_ledger(kind, IdScheme::Name);
            seed(ledger.as_mut());
            ledger
        })
        .bench_local_values(|mut ledger| {
            for i in 0..TRANSFERS {
                let from = &names[i % ACCOUNTS];
                let to = &names[(i + 1) % ACCOUNTS];
                // Balances stay well above the amount, so every transfer succeeds
                ledger
                    .transfer(from, to, Decimal::ONE)
                    .expect("Transfer failed");
            }
            ledger
        });
}

/// The same transfers split across threads sharing one `ConcurrentLedger`
#[divan::bench(args = [2, 4, 8])]
fn transfers_contended(bencher: divan::Bencher, threads: usize) {
    let names: Vec<String> = (0..ACCOUNTS).map(name).collect();

    bencher
        .with_inputs(|| {
            let ledger = ConcurrentLedger::new();
            for index in 0..ACCOUNTS {
                ledger
                    .create_account(&name(index), Decimal::new(1_000_000, 2))
                    .expect("Seeding failed");
            }
            ledger
        })
        .bench_local_values(|ledger| {
            thread::scope(|scope| {
                for t in 0..threads {
                    let ledger = &ledger;
                    let names = &names;
                    scope.spawn(move || {
                        for i in (t..TRANSFERS).step_by(threads) {
                            let from = &names[i % ACCOUNTS];
                            let to = &names[(i + 7) % ACCOUNTS];
                            ledger
                                .transfer(from, to, Decimal::ONE)
                                .expect("Transfer failed");
                        }
                    });
                }
            });
            ledger
        });
}

/// Writing the whole ledger as CSV
#[divan::bench]
fn write_csv(bencher: divan::Bencher) {
    let mut ledger = Ledger::new();
    seed(&mut ledger);

    bencher.bench_local(|| {
        let mut output = Vec::new();
        ledger.write_csv(&mut output).expect("Write failed");
        output
    });
}
