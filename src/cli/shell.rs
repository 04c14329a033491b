//! Interactive ledger shell
//!
//! Reads one command per line, applies it to the ledger it was given, and
//! writes a one-line (or, for `show`, one-line-per-account) reply. Every
//! ledger failure and every usage error is printed and the loop carries on;
//! only `exit`, `quit` or end of input stop it.

use crate::cli::command::{parse_amount, ShellCommand, ShellLine};
use crate::core::{LedgerOps, LoadOutcome};
use crate::types::LedgerError;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// What the shell does after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print this text and read the next line
    Message(String),
    /// Leave the loop
    Exit,
}

/// Command loop over a ledger
pub struct Shell {
    ledger: Box<dyn LedgerOps>,
}

impl Shell {
    pub fn new(ledger: Box<dyn LedgerOps>) -> Self {
        Shell { ledger }
    }

    pub fn ledger(&self) -> &dyn LedgerOps {
        self.ledger.as_ref()
    }

    pub fn into_ledger(self) -> Box<dyn LedgerOps> {
        self.ledger
    }

    /// Run the command loop until `exit` or end of input
    pub fn run<R: BufRead>(&mut self, mut input: R, output: &mut dyn Write) -> io::Result<()> {
        writeln!(output, "Type 'help' for available commands.")?;

        let mut line = String::new();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(output, "\nExiting.")?;
                return Ok(());
            }

            match self.handle_line(&line) {
                Some(Reply::Exit) => {
                    writeln!(output, "Exiting.")?;
                    return Ok(());
                }
                Some(Reply::Message(text)) => writeln!(output, "{}", text)?,
                None => {}
            }
        }
    }

    /// Parse and execute one line
    ///
    /// Returns `None` for a blank line.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        if line.trim().is_empty() {
            return None;
        }

        let command = match ShellLine::parse_line(line) {
            Ok(command) => command,
            Err(e) => return Some(Reply::Message(e.to_string().trim_end().to_string())),
        };

        debug!(?command, "executing");
        match self.execute(command) {
            Ok(reply) => Some(reply),
            Err(e) => {
                debug!(error = %e, "command failed");
                Some(Reply::Message(format!("Error: {}", e)))
            }
        }
    }

    /// Execute one parsed command against the ledger
    pub fn execute(&mut self, command: ShellCommand) -> Result<Reply, LedgerError> {
        let message = match command {
            ShellCommand::CreateAccount {
                name,
                initial_balance,
            } => {
                let initial_balance = parse_amount(&initial_balance)?;
                let id = self.ledger.create_account(&name, initial_balance)?;
                format!("Account created with identifier: {}", id)
            }
            ShellCommand::Deposit { account, amount } => {
                let amount = parse_amount(&amount)?;
                self.ledger.deposit(&account, amount)?;
                let balance = self.ledger.account(&account)?.balance();
                format!(
                    "Deposited {} to account {}. New balance: {}",
                    amount, account, balance
                )
            }
            ShellCommand::Withdraw { account, amount } => {
                let amount = parse_amount(&amount)?;
                self.ledger.withdraw(&account, amount)?;
                let balance = self.ledger.account(&account)?.balance();
                format!(
                    "Withdrew {} from account {}. New balance: {}",
                    amount, account, balance
                )
            }
            ShellCommand::Transfer { from, to, amount } => {
                let amount = parse_amount(&amount)?;
                self.ledger.transfer(&from, &to, amount)?;
                format!("Transferred {} from {} to {}", amount, from, to)
            }
            ShellCommand::LoadCsv { file } => match self.ledger.load_from_file(&file)? {
                LoadOutcome::Loaded { accounts } => {
                    format!("Loaded {} accounts from {}", accounts, file.display())
                }
                LoadOutcome::Missing => {
                    format!("No file at {}; ledger unchanged", file.display())
                }
            },
            ShellCommand::SaveCsv { file } => {
                self.ledger.save_to_file(&file)?;
                format!("Accounts saved to {}", file.display())
            }
            ShellCommand::Show => self.render_accounts(),
            ShellCommand::Exit => return Ok(Reply::Exit),
        };

        Ok(Reply::Message(message))
    }

    fn render_accounts(&self) -> String {
        let accounts = self.ledger.list_accounts();
        if accounts.is_empty() {
            return "No accounts found.".to_string();
        }

        let name_is_id = self.ledger.uses_name_as_id();
        accounts
            .iter()
            .map(|account| {
                if name_is_id {
                    format!("{}: {}", account.id(), account.balance())
                } else {
                    format!(
                        "{} ({}): {}",
                        account.id(),
                        account.name(),
                        account.balance()
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{create_ledger, IdScheme, LedgerKind};
    use rstest::rstest;
    use rust_decimal::Decimal;
    use std::fs;
    use tempfile::tempdir;

    fn shell(kind: LedgerKind) -> Shell {
        Shell::new(create_ledger(kind, IdScheme::Name))
    }

    fn message(reply: Option<Reply>) -> String {
        match reply {
            Some(Reply::Message(text)) => text,
            other => panic!("Expected a message, got {:?}", other),
        }
    }

    #[rstest]
    fn test_transfer_session(#[values(LedgerKind::Sync, LedgerKind::Concurrent)] kind: LedgerKind) {
        let mut shell = shell(kind);

        assert_eq!(
            message(shell.handle_line("create-account A 100.00")),
            "Account created with identifier: A"
        );
        shell.handle_line("create-account B 50.00");
        assert_eq!(
            message(shell.handle_line("transfer A B 30.00")),
            "Transferred 30.00 from A to B"
        );
        assert_eq!(message(shell.handle_line("show")), "A: 70.00\nB: 80.00");
    }

    #[rstest]
    #[case::insufficient(
        "withdraw C 50.00",
        "Error: Insufficient funds in account C: balance 20.00, requested 50.00"
    )]
    #[case::negative_deposit("deposit C -1", "Error: Invalid amount '-1': must be a positive decimal")]
    #[case::bad_amount("deposit C ten", "Error: Invalid amount 'ten': must be a positive decimal")]
    #[case::unknown_account("deposit D 1", "Error: Account D not found")]
    #[case::self_transfer("transfer C C 1", "Error: Cannot transfer from account C to itself")]
    #[case::duplicate("create-account C 1", "Error: Duplicate account identifier C")]
    fn test_errors_are_reported(#[case] line: &str, #[case] expected: &str) {
        let mut shell = shell(LedgerKind::Sync);
        shell.handle_line("create-account C 20.00");

        assert_eq!(message(shell.handle_line(line)), expected);
        assert_eq!(
            shell.ledger().account("C").unwrap().balance(),
            Decimal::new(2000, 2)
        );
    }

    #[test]
    fn test_deposit_and_withdraw_report_new_balance() {
        let mut shell = shell(LedgerKind::Sync);
        shell.handle_line("create-account Eve 100.00");

        assert_eq!(
            message(shell.handle_line("deposit Eve 0.50")),
            "Deposited 0.50 to account Eve. New balance: 100.50"
        );
        assert_eq!(
            message(shell.handle_line("withdraw Eve 40.50")),
            "Withdrew 40.50 from account Eve. New balance: 60.00"
        );
    }

    #[test]
    fn test_show_empty_and_keyed_layout() {
        let mut empty = shell(LedgerKind::Sync);
        assert_eq!(message(empty.handle_line("show")), "No accounts found.");

        let mut keyed = Shell::new(create_ledger(LedgerKind::Sync, IdScheme::Sequential));
        keyed.handle_line("create-account Sam 1");
        keyed.handle_line("create-account Sam 2");
        assert_eq!(
            message(keyed.handle_line("list")),
            "acct-1 (Sam): 1\nacct-2 (Sam): 2"
        );
    }

    #[test]
    fn test_blank_line_and_exit() {
        let mut shell = shell(LedgerKind::Sync);
        assert_eq!(shell.handle_line("   "), None);
        assert_eq!(shell.handle_line("quit"), Some(Reply::Exit));
    }

    #[test]
    fn test_usage_error_is_a_message() {
        let mut shell = shell(LedgerKind::Sync);
        let text = message(shell.handle_line("deposit onlyone"));
        assert!(text.contains("required"), "unexpected usage text: {}", text);
    }

    #[test]
    fn test_save_and_load_commands() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ledger.csv");
        let mut shell = shell(LedgerKind::Sync);
        shell.handle_line("create-account A 1.25");

        let saved = message(shell.handle_line(&format!("save-csv {}", path.display())));
        assert!(saved.starts_with("Accounts saved to"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "name,balance\nA,1.25\n");

        let missing = dir.path().join("missing.csv");
        let reply = message(shell.handle_line(&format!("load-csv {}", missing.display())));
        assert!(reply.ends_with("ledger unchanged"));

        shell.handle_line("deposit A 1");
        let reply = message(shell.handle_line(&format!("load-csv {}", path.display())));
        assert!(reply.starts_with("Loaded 1 accounts"));
        assert_eq!(message(shell.handle_line("show")), "A: 1.25");
    }

    #[test]
    fn test_run_loop_until_end_of_input() {
        let mut shell = shell(LedgerKind::Sync);
        let input = "create-account A 5\n\nshow\n";
        let mut output = Vec::new();

        shell.run(input.as_bytes(), &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Type 'help' for available commands.\n\
             > Account created with identifier: A\n\
             > > A: 5\n\
             > \nExiting.\n"
        );
    }

    #[test]
    fn test_run_loop_stops_at_exit() {
        let mut shell = shell(LedgerKind::Sync);
        let input = "exit\ncreate-account A 5\n";
        let mut output = Vec::new();

        shell.run(input.as_bytes(), &mut output).unwrap();

        assert!(String::from_utf8(output).unwrap().ends_with("> Exiting.\n"));
        assert!(shell.ledger().list_accounts().is_empty());
    }
}
