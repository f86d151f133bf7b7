use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AccountKind, AccountNumber};

pub type CustomerId = i64;

/// A customer's association with an account, by number. The kind is
/// recorded when the link is made so lookups need not touch the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLink {
    pub number: AccountNumber,
    pub kind: AccountKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    links: Vec<AccountLink>,
}

impl Customer {
    pub fn new(id: CustomerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            links: Vec::new(),
        }
    }

    /// Link an account. A second link of the same kind is kept but shadowed:
    /// `account_for` keeps returning the first one. Returns `false` when the
    /// new link is shadowed.
    pub fn add_account(&mut self, number: AccountNumber, kind: AccountKind) -> bool {
        let shadowed = self.account_for(kind).is_some();
        self.links.push(AccountLink { number, kind });
        !shadowed
    }

    /// First linked account of the given kind.
    pub fn account_for(&self, kind: AccountKind) -> Option<AccountNumber> {
        self.links
            .iter()
            .find(|link| link.kind == kind)
            .map(|link| link.number)
    }

    pub fn accounts(&self) -> &[AccountLink] {
        &self.links
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Customer ID: {} | Name: {}", self.id, self.name)?;
        if !self.links.is_empty() {
            let links: Vec<String> = self
                .links
                .iter()
                .map(|link| format!("{} ({})", link.number, link.kind))
                .collect();
            write!(f, " | Accounts: {}", links.join(", "))?;
        }
        Ok(())
    }
}
