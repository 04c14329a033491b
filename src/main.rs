//! Rust Bank Ledger CLI
//!
//! Interactive shell over an in-memory ledger of accounts.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --file ledger.csv --autosave
//! cargo run -- --id-scheme sequential --engine concurrent
//! RUST_LOG=debug cargo run -- -f ledger.csv
//! ```
//!
//! Commands are read from stdin one per line (`create-account`, `deposit`,
//! `withdraw`, `transfer`, `load-csv`, `save-csv`, `show`, `help`, `exit`).
//! Replies go to stdout and logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (unreadable or malformed startup file, failed autosave, broken stream)

use rust_bank_ledger::{cli, telemetry};
use std::io;
use std::process;

fn main() {
    let args = cli::parse_args();
    telemetry::init(&args.log_level);

    let config = args.to_ledger_config();

    let stdin = io::stdin();
    let mut output = io::stdout();
    if let Err(e) = cli::run(&config, stdin.lock(), &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
