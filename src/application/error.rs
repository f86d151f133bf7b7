use thiserror::Error;

use crate::domain::{
    AccountKind, AccountNumber, BookId, CustomerId, DomainError, GuestId, MemberId, Money,
    RoomNumber,
};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(Money),

    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    #[error("Balance overflow: {balance} plus {amount} is out of range")]
    BalanceOverflow { balance: Money, amount: Money },

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountNumber),

    #[error("{kind} account not found for customer {customer}")]
    AccountNotFoundForVariant {
        customer: CustomerId,
        kind: AccountKind,
    },

    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    #[error("Room not found: {0}")]
    RoomNotFound(RoomNumber),

    #[error("{0} is currently unavailable")]
    Unavailable(String),

    #[error("No active loan for book {book} and member {member}")]
    NoActiveLoan { book: BookId, member: MemberId },

    #[error("No active booking for room {room} and customer {guest}")]
    NoActiveBooking { room: RoomNumber, guest: GuestId },

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidAmount(amount) => AppError::InvalidAmount(amount),
            DomainError::InsufficientFunds { balance, requested } => {
                AppError::InsufficientFunds { balance, requested }
            }
            DomainError::BalanceOverflow { balance, amount } => {
                AppError::BalanceOverflow { balance, amount }
            }
            DomainError::Unavailable(what) => AppError::Unavailable(what),
        }
    }
}

impl AppError {
    /// True for failures that only mean "nothing by that identifier".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AppError::CustomerNotFound(_)
                | AppError::AccountNotFound(_)
                | AppError::AccountNotFoundForVariant { .. }
                | AppError::MemberNotFound(_)
                | AppError::BookNotFound(_)
                | AppError::RoomNotFound(_)
        )
    }
}
