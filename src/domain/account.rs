use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{DomainError, Money};

pub type AccountNumber = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountKind {
    Savings,
    Current,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Savings => "Savings",
            AccountKind::Current => "Current",
        }
    }

    /// One-letter tag used in the bank data file.
    pub fn tag(&self) -> char {
        match self {
            AccountKind::Savings => 'S',
            AccountKind::Current => 'C',
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "S" => Some(AccountKind::Savings),
            "C" => Some(AccountKind::Current),
            _ => None,
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "savings" | "s" => Ok(AccountKind::Savings),
            "current" | "c" => Ok(AccountKind::Current),
            _ => Err(format!("unknown account kind '{}'", s)),
        }
    }
}

/// A bank account. Savings and current accounts follow the same rules and
/// differ only in how they are labelled and tagged on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub number: AccountNumber,
    pub holder: String,
    pub kind: AccountKind,
    balance: Money,
}

impl Account {
    /// Open an account. The opening balance may be zero but not negative.
    pub fn open(
        number: AccountNumber,
        holder: impl Into<String>,
        kind: AccountKind,
        balance: Money,
    ) -> Result<Self, DomainError> {
        if balance.is_negative() {
            return Err(DomainError::InvalidAmount(balance));
        }
        Ok(Self {
            number,
            holder: holder.into(),
            kind,
            balance,
        })
    }

    pub fn savings(
        number: AccountNumber,
        holder: impl Into<String>,
        balance: Money,
    ) -> Result<Self, DomainError> {
        Self::open(number, holder, AccountKind::Savings, balance)
    }

    pub fn current(
        number: AccountNumber,
        holder: impl Into<String>,
        balance: Money,
    ) -> Result<Self, DomainError> {
        Self::open(number, holder, AccountKind::Current, balance)
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn deposit(&mut self, amount: Money) -> Result<(), DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidAmount(amount));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(DomainError::BalanceOverflow {
                balance: self.balance,
                amount,
            })?;
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<(), DomainError> {
        if !amount.is_positive() {
            return Err(DomainError::InvalidAmount(amount));
        }
        if amount > self.balance {
            return Err(DomainError::InsufficientFunds {
                balance: self.balance,
                requested: amount,
            });
        }
        self.balance = self
            .balance
            .checked_sub(amount)
            .ok_or(DomainError::InvalidAmount(amount))?;
        Ok(())
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Account Number: {} | Holder: {} | Balance: ${}",
            self.kind, self.number, self.holder, self.balance
        )
    }
}
