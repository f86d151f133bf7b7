use thiserror::Error;

use super::Money;

/// Rule violations raised by a single entity (an account, a book, a room).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Amount must be positive, got {0}")]
    InvalidAmount(Money),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    #[error("Balance overflow: {balance} plus {amount} is out of range")]
    BalanceOverflow { balance: Money, amount: Money },

    #[error("{0} is currently unavailable")]
    Unavailable(String),
}
