use std::io::{Read, Write};

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::domain::{Account, AccountKind, AccountNumber, Customer, CustomerId, Money};

use super::flatfile::{SPACE, SectionRecord, SectionWriter, read_sections};

const ACCOUNTS: &str = "Accounts";
const CUSTOMERS: &str = "Customers";

#[derive(Serialize, Deserialize)]
struct AccountRow {
    tag: String,
    number: AccountNumber,
    holder: String,
    balance: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankData {
    pub accounts: Vec<Account>,
    pub customers: Vec<Customer>,
}

/// Accounts go first with no header, one `S 101 Alice 100.00` line each, so
/// a file without customers keeps the plain accounts-only layout.
/// Customers follow under `Customers:` as `id name number...`.
pub fn write_bank<W: Write>(writer: W, accounts: &[Account], customers: &[Customer]) -> Result<()> {
    let mut out = SectionWriter::new(writer, SPACE);

    for account in accounts {
        out.row(&AccountRow {
            tag: account.kind.tag().to_string(),
            number: account.number,
            holder: account.holder.clone(),
            balance: account.balance().to_string(),
        })?;
    }

    if !customers.is_empty() {
        out.section(CUSTOMERS)?;
        for customer in customers {
            let mut fields = vec![customer.id.to_string(), customer.name.clone()];
            fields.extend(customer.accounts().iter().map(|link| link.number.to_string()));
            out.fields(&fields)?;
        }
    }

    out.finish()
}

pub fn read_bank<R: Read>(reader: R) -> Result<BankData> {
    let mut data = BankData::default();

    for record in read_sections(reader, SPACE, &[ACCOUNTS, CUSTOMERS])? {
        match record.section.as_deref() {
            None | Some(ACCOUNTS) => data.accounts.push(decode_account(&record)?),
            Some(CUSTOMERS) => {
                let customer = decode_customer(&record, &data.accounts)?;
                data.customers.push(customer);
            }
            Some(other) => bail!("line {}: unexpected section '{}'", record.line, other),
        }
    }

    Ok(data)
}

fn decode_account(record: &SectionRecord) -> Result<Account> {
    let row: AccountRow = record.decode()?;
    let kind = AccountKind::from_tag(&row.tag)
        .ok_or_else(|| anyhow!("line {}: unknown account tag '{}'", record.line, row.tag))?;
    let balance = parse_balance(&row.balance)
        .with_context(|| format!("line {}: bad balance for account {}", record.line, row.number))?;
    Account::open(row.number, row.holder, kind, balance)
        .with_context(|| format!("line {}: invalid account {}", record.line, row.number))
}

/// Decimal text as written by this crate, or the shortest-form doubles of
/// older files (`1e+06`, `1.23457e+06`), rounded to the nearest cent. A double
/// that was already cut to six significant digits when written loads as that
/// rounded value; the lost digits are not recoverable.
fn parse_balance(text: &str) -> Result<Money> {
    if let Ok(money) = text.parse::<Money>() {
        return Ok(money);
    }
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| anyhow!("invalid money amount '{}'", text))?;
    let cents = (value * 100.0).round();
    if !cents.is_finite() || cents.abs() >= i64::MAX as f64 {
        bail!("money amount '{}' is out of range", text);
    }
    Ok(Money::from_cents(cents as i64))
}

fn decode_customer(record: &SectionRecord, accounts: &[Account]) -> Result<Customer> {
    let id: CustomerId = record.parse_field(0, "customer id")?;
    let name = record.field(1, "customer name")?;
    let mut customer = Customer::new(id, name);

    for index in 2..record.record.len() {
        let number: AccountNumber = record.parse_field(index, "account number")?;
        let account = accounts
            .iter()
            .find(|a| a.number == number)
            .ok_or_else(|| {
                anyhow!(
                    "line {}: customer {} links unknown account {}",
                    record.line,
                    id,
                    number
                )
            })?;
        customer.add_account(number, account.kind);
    }

    Ok(customer)
}
