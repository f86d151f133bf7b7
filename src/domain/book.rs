use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

pub type BookId = i64;
pub type MemberId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub available: bool,
}

impl Book {
    pub fn new(id: BookId, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            available: true,
        }
    }

    /// Mark the book as lent out. Fails if it already is.
    pub fn check_out(&mut self) -> Result<(), DomainError> {
        if !self.available {
            return Err(DomainError::Unavailable(format!("Book {}", self.id)));
        }
        self.available = false;
        Ok(())
    }

    pub fn check_in(&mut self) {
        self.available = true;
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book ID: {} | Title: {} | Author: {} | Available: {}",
            self.id,
            self.title,
            self.author,
            if self.available { "Yes" } else { "No" }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Member ID: {} | Name: {}", self.id, self.name)
    }
}

/// A book lent to a member. Loans are never removed, only closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub book_id: BookId,
    pub member_id: MemberId,
    pub active: bool,
}

impl Loan {
    pub fn new(book_id: BookId, member_id: MemberId) -> Self {
        Self {
            book_id,
            member_id,
            active: true,
        }
    }

    pub fn close(&mut self) {
        self.active = false;
    }

    pub fn is_open_for(&self, book_id: BookId, member_id: MemberId) -> bool {
        self.active && self.book_id == book_id && self.member_id == member_id
    }
}

impl fmt::Display for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book ID: {} | Member ID: {} | Status: {}",
            self.book_id,
            self.member_id,
            if self.active { "Active" } else { "Returned" }
        )
    }
}
