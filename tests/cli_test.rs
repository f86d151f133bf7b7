mod common;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use common::{cents, data_file};
use frontdesk::application::{Bank, Library};
use frontdesk::cli::Cli;
use frontdesk::domain::AccountKind;

/// Run one command against the given data file
fn run(data: &Path, args: &[&str]) -> Result<()> {
    let data = data.to_str().unwrap();
    let mut argv = vec!["frontdesk", "--data", data];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv)?.run()
}

#[test]
fn test_bank_session_persists_between_commands() -> Result<()> {
    let (path, _temp) = data_file("bank_data.txt")?;

    run(&path, &["bank", "add-customer", "1", "Alice"])?;
    run(&path, &["bank", "add-customer", "2", "Bob"])?;
    run(&path, &["bank", "open", "1", "savings", "100", "Alice Smith", "100"])?;
    run(&path, &["bank", "open", "2", "current", "200", "Bob", "0"])?;
    run(&path, &["bank", "transfer", "1", "savings", "50", "--to", "2", "--into", "current"])?;
    run(&path, &["bank", "deposit", "1", "savings", "0.25"])?;

    let mut bank = Bank::new();
    bank.load_data(&path)?;
    assert_eq!(
        bank.view_balance(1, AccountKind::Savings)?.balance,
        cents(5025)
    );
    assert_eq!(
        bank.view_balance(2, AccountKind::Current)?.balance,
        cents(5000)
    );
    assert_eq!(bank.find_account(100).unwrap().holder, "Alice Smith");

    Ok(())
}

#[test]
fn test_failed_command_does_not_save() -> Result<()> {
    let (path, _temp) = data_file("bank_data.txt")?;
    run(&path, &["bank", "add-customer", "1", "Alice"])?;
    run(&path, &["bank", "open", "1", "savings", "100", "Alice", "10"])?;
    let before = std::fs::read_to_string(&path)?;

    assert!(run(&path, &["bank", "withdraw", "1", "savings", "11"]).is_err());
    assert!(run(&path, &["bank", "withdraw", "1", "savings", "ten"]).is_err());
    assert!(run(&path, &["bank", "deposit", "1", "checking", "1"]).is_err());

    assert_eq!(std::fs::read_to_string(&path)?, before);

    Ok(())
}

#[test]
fn test_balance_for_unknown_customer_is_informational() -> Result<()> {
    let (path, _temp) = data_file("bank_data.txt")?;

    run(&path, &["bank", "balance", "9", "savings"])?;
    assert!(!path.exists());

    Ok(())
}

#[test]
fn test_library_session() -> Result<()> {
    let (path, _temp) = data_file("library_data.txt")?;

    run(&path, &["library", "add-book", "7", "Dune", "Frank Herbert"])?;
    run(&path, &["library", "add-member", "3", "Ann"])?;
    run(&path, &["library", "add-member", "4", "Ben"])?;
    run(&path, &["library", "issue", "7", "3"])?;
    assert!(run(&path, &["library", "issue", "7", "4"]).is_err());
    run(&path, &["library", "books", "--format", "json"])?;

    let mut library = Library::new();
    library.load_data(&path)?;
    assert_eq!(library.loans().len(), 1);
    assert!(library.loans()[0].is_open_for(7, 3));

    Ok(())
}

#[test]
fn test_hotel_import_merges_files() -> Result<()> {
    let (path, _temp) = data_file("hotel_data.txt")?;
    let (other, _temp2) = data_file("other.txt")?;

    run(&path, &["hotel", "add-room", "101", "single"])?;
    run(&other, &["hotel", "add-room", "201", "suite"])?;
    run(&path, &["hotel", "import", other.to_str().unwrap()])?;

    let text = std::fs::read_to_string(&path)?;
    assert!(text.contains("101|Single|1\n201|Suite|1\n"));

    assert!(run(&path, &["hotel", "add-room", "301", "attic"]).is_err());

    Ok(())
}
