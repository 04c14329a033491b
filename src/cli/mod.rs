// CLI module
// Command-line arguments, the shell command grammar and the interactive session

mod args;
mod command;
mod shell;

pub use args::CliArgs;
pub use command::{parse_amount, ShellCommand, ShellLine};
pub use shell::{Reply, Shell};

use crate::config::LedgerConfig;
use crate::core::{create_ledger, LoadOutcome};
use crate::types::LedgerError;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing::info;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or `--help`), clap prints an error
/// or the help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Run a complete ledger session
///
/// Builds the ledger described by `config`, loads its data file when one is
/// configured, runs the shell over `input`, and saves back to the data file
/// when autosave is on.
///
/// # Arguments
///
/// * `config` - Session configuration
/// * `input` - Source of shell command lines
/// * `output` - Destination for shell replies
///
/// # Errors
///
/// Returns an error if the startup load fails, if the shell cannot read or
/// write its streams, or if the final autosave fails. Errors from individual
/// shell commands are reported in `output` and do not end the session.
pub fn run<R: BufRead>(
    config: &LedgerConfig,
    input: R,
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut ledger = create_ledger(config.kind, config.id_scheme);

    if let Some(path) = &config.data_file {
        match ledger.load_from_file(path)? {
            LoadOutcome::Loaded { accounts } => {
                info!(accounts, path = %path.display(), "startup load");
            }
            LoadOutcome::Missing => {
                info!(path = %path.display(), "no ledger file yet, starting empty");
            }
        }
    }

    let mut shell = Shell::new(ledger);
    shell.run(input, output)?;
    let ledger = shell.into_ledger();

    if config.autosave {
        if let Some(path) = &config.data_file {
            ledger.save_to_file(path)?;
            info!(path = %path.display(), "autosaved");
        }
    }

    Ok(())
}
