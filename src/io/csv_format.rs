//! CSV format handling for ledger files
//!
//! This module centralizes all CSV format concerns:
//! - the two row schemas (`name,balance` and `account_id,name,balance`)
//! - serialization of accounts into rows
//! - parsing and validation of rows back into accounts
//!
//! All functions work on readers and writers (no file handling) for easy
//! testing. Loading is all-or-nothing: the returned accounts are only
//! produced once every row has validated.

use crate::types::{Account, AccountId, LedgerError};
use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::{Read, Write};

/// Column layout of a ledger file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSchema {
    /// `name,balance`: the name is the identifier and must be unique
    Named,
    /// `account_id,name,balance`: the identifier is a separate token
    Keyed,
}

impl RowSchema {
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            RowSchema::Named => &["name", "balance"],
            RowSchema::Keyed => &["account_id", "name", "balance"],
        }
    }
}

/// CSV record structure for deserialization
///
/// `account_id` is absent for the named schema.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    pub account_id: Option<String>,
    pub name: String,
    pub balance: String,
}

/// Parse a persisted balance
///
/// Accepts a plain decimal literal with an optional sign. Rejects anything
/// that is not an exact decimal (including values that would lose digits)
/// and negative values.
pub fn parse_balance(raw: &str) -> Result<Decimal, String> {
    let balance =
        Decimal::from_str_exact(raw).map_err(|_| format!("invalid balance '{}'", raw))?;

    if balance < Decimal::ZERO {
        return Err(format!("negative balance {}", raw));
    }

    Ok(balance)
}

/// Write accounts to CSV
///
/// Writes the schema's header followed by one row per account. Accounts
/// are sorted by identifier for deterministic output.
pub fn write_accounts_csv<'a, I>(
    accounts: I,
    schema: RowSchema,
    output: &mut dyn Write,
) -> Result<(), LedgerError>
where
    I: IntoIterator<Item = &'a Account>,
{
    let mut writer = Writer::from_writer(output);

    writer.write_record(schema.headers())?;

    let mut sorted: Vec<&Account> = accounts.into_iter().collect();
    sorted.sort_by(|a, b| a.id().cmp(b.id()));

    for account in sorted {
        let row = account.to_row();
        match schema {
            RowSchema::Named => writer.write_record([&row.name, &row.balance])?,
            RowSchema::Keyed => {
                writer.write_record([&row.account_id, &row.name, &row.balance])?
            }
        }
    }

    writer.flush()?;

    Ok(())
}

/// Read and validate accounts from CSV
///
/// The header must match `schema` exactly. Every row is checked before
/// anything is returned:
///
/// - a blank identifier fails with `InvalidFormat`
/// - a repeated identifier fails with `DuplicateIdentifier`
/// - an unparseable or negative balance fails with `InvalidFormat`
///
/// # Returns
///
/// All accounts in file order, or the first error encountered.
pub fn read_accounts_csv<R: Read>(
    input: R,
    schema: RowSchema,
) -> Result<Vec<Account>, LedgerError> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_reader(input);

    let headers = reader.headers()?.clone();
    if !headers.iter().eq(schema.headers().iter().copied()) {
        return Err(LedgerError::invalid_format(
            Some(1),
            format!(
                "expected header '{}', found '{}'",
                schema.headers().join(","),
                headers.iter().collect::<Vec<_>>().join(",")
            ),
        ));
    }

    let mut seen: HashSet<AccountId> = HashSet::new();
    let mut accounts = Vec::new();
    let mut record = StringRecord::new();

    while reader.read_record(&mut record)? {
        let line = record.position().map(|pos| pos.line());
        let row: CsvRecord = record.deserialize(Some(&headers))?;

        let id = match (schema, row.account_id) {
            (RowSchema::Named, _) if row.name.is_empty() => {
                return Err(LedgerError::invalid_format(line, "empty account name"))
            }
            (RowSchema::Named, _) => AccountId::from(row.name.as_str()),
            (RowSchema::Keyed, Some(id)) => AccountId::from(id),
            (RowSchema::Keyed, None) => {
                return Err(LedgerError::invalid_format(line, "missing account_id"))
            }
        };

        if !seen.insert(id.clone()) {
            return Err(LedgerError::duplicate_identifier(id));
        }

        let balance = parse_balance(&row.balance)
            .map_err(|message| LedgerError::invalid_format(line, format!("{} for account {}", message, id)))?;

        accounts.push(Account::new(id, row.name, balance));
    }

    Ok(accounts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    fn account(id: &str, name: &str, balance: &str) -> Account {
        Account::new(
            AccountId::from(id),
            name,
            Decimal::from_str(balance).unwrap(),
        )
    }

    fn write_to_string(accounts: &[Account], schema: RowSchema) -> String {
        let mut output = Vec::new();
        write_accounts_csv(accounts, schema, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[rstest]
    #[case::plain("100.00", Decimal::new(10000, 2))]
    #[case::explicit_plus("+5.5", Decimal::new(55, 1))]
    #[case::zero("0", Decimal::ZERO)]
    #[case::many_places("0.000000001", Decimal::new(1, 9))]
    fn test_parse_balance_valid(#[case] raw: &str, #[case] expected: Decimal) {
        assert_eq!(parse_balance(raw), Ok(expected));
    }

    #[rstest]
    #[case::negative("-5.00", "negative balance")]
    #[case::not_a_number("abc", "invalid balance")]
    #[case::empty("", "invalid balance")]
    #[case::thousands_separator("1,000.00", "invalid balance")]
    fn test_parse_balance_invalid(#[case] raw: &str, #[case] expected_error: &str) {
        let error = parse_balance(raw).unwrap_err();
        assert!(error.contains(expected_error), "unexpected error: {}", error);
    }

    #[rstest]
    #[case::named_empty(vec![], RowSchema::Named, "name,balance\n")]
    #[case::keyed_empty(vec![], RowSchema::Keyed, "account_id,name,balance\n")]
    #[case::named_sorted(
        vec![account("B", "B", "50.00"), account("A", "A", "100.00")],
        RowSchema::Named,
        "name,balance\nA,100.00\nB,50.00\n"
    )]
    #[case::keyed_duplicate_names(
        vec![account("acct-2", "Sam", "1.5"), account("acct-1", "Sam", "0.10")],
        RowSchema::Keyed,
        "account_id,name,balance\nacct-1,Sam,0.10\nacct-2,Sam,1.5\n"
    )]
    #[case::name_needing_quotes(
        vec![account("Smith, J", "Smith, J", "7")],
        RowSchema::Named,
        "name,balance\n\"Smith, J\",7\n"
    )]
    fn test_write_accounts_csv(
        #[case] accounts: Vec<Account>,
        #[case] schema: RowSchema,
        #[case] expected: &str,
    ) {
        assert_eq!(write_to_string(&accounts, schema), expected);
    }

    #[test]
    fn test_read_named_rows() {
        let data = "name,balance\nA,100.00\n  B , 50.00 \n";
        let accounts = read_accounts_csv(data.as_bytes(), RowSchema::Named).unwrap();

        assert_eq!(
            accounts,
            vec![account("A", "A", "100.00"), account("B", "B", "50.00")]
        );
    }

    #[test]
    fn test_read_keyed_rows_allows_duplicate_names() {
        let data = "account_id,name,balance\nacct-1,Sam,10\nacct-2,Sam,20\n";
        let accounts = read_accounts_csv(data.as_bytes(), RowSchema::Keyed).unwrap();

        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[1].id(), &AccountId::from("acct-2"));
        assert_eq!(accounts[1].name(), "Sam");
    }

    #[test]
    fn test_write_then_read_preserves_scale() {
        let accounts = vec![account("A", "A", "100.00"), account("B", "B", "0.30")];
        let written = write_to_string(&accounts, RowSchema::Named);

        let read = read_accounts_csv(written.as_bytes(), RowSchema::Named).unwrap();

        let balances: Vec<String> = read.iter().map(|a| a.to_row().balance).collect();
        assert_eq!(balances, vec!["100.00", "0.30"]);
    }

    #[rstest]
    #[case::named("name,balance\nx,1\nx,2\n", RowSchema::Named)]
    #[case::keyed("account_id,name,balance\nx,A,1\nx,B,2\n", RowSchema::Keyed)]
    fn test_read_rejects_duplicate_identifier(#[case] data: &str, #[case] schema: RowSchema) {
        let result = read_accounts_csv(data.as_bytes(), schema);
        assert_eq!(result, Err(LedgerError::duplicate_identifier("x")));
    }

    #[rstest]
    #[case::negative_balance("name,balance\nA,1\nB,-5.00\n", Some(3), "negative balance -5.00 for account B")]
    #[case::bad_balance("name,balance\nA,lots\n", Some(2), "invalid balance 'lots' for account A")]
    #[case::wrong_header("account,balance\nA,1\n", Some(1), "expected header 'name,balance'")]
    fn test_read_rejects_invalid_format(
        #[case] data: &str,
        #[case] expected_line: Option<u64>,
        #[case] expected_message: &str,
    ) {
        match read_accounts_csv(data.as_bytes(), RowSchema::Named) {
            Err(LedgerError::InvalidFormat { line, message }) => {
                assert_eq!(line, expected_line);
                assert!(
                    message.contains(expected_message),
                    "unexpected message: {}",
                    message
                );
            }
            other => panic!("Expected InvalidFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_read_rejects_ragged_row() {
        let data = "name,balance\nA,1,surplus\n";
        let result = read_accounts_csv(data.as_bytes(), RowSchema::Named);
        assert!(matches!(result, Err(LedgerError::InvalidFormat { .. })));
    }

    #[rstest]
    #[case::blank_name("name,balance\nA,1\n   ,2\n", RowSchema::Named, 3)]
    #[case::blank_account_id("account_id,name,balance\n,A,1\n", RowSchema::Keyed, 2)]
    fn test_read_rejects_blank_identifier(
        #[case] data: &str,
        #[case] schema: RowSchema,
        #[case] expected_line: u64,
    ) {
        let result = read_accounts_csv(data.as_bytes(), schema);
        assert!(
            matches!(
                result,
                Err(LedgerError::InvalidFormat { line: Some(line), .. }) if line == expected_line
            ),
            "unexpected result: {:?}",
            result
        );
    }

    #[test]
    fn test_read_keyed_file_with_named_schema_fails() {
        let data = "account_id,name,balance\nacct-1,A,1\n";
        let result = read_accounts_csv(data.as_bytes(), RowSchema::Named);
        assert!(matches!(
            result,
            Err(LedgerError::InvalidFormat { line: Some(1), .. })
        ));
    }
}
