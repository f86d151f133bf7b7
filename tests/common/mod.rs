// Each test binary uses only some of these fixtures.
#![allow(dead_code)]

use std::path::PathBuf;

use anyhow::Result;
use frontdesk::application::{Bank, Hotel, Library};
use frontdesk::domain::{AccountKind, Book, Customer, Guest, Member, Money, Room, RoomKind};
use tempfile::TempDir;

/// Helper to create a scratch directory and a data file path inside it
pub fn data_file(name: &str) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(name);
    Ok((path, temp_dir))
}

pub fn cents(c: i64) -> Money {
    Money::from_cents(c)
}

/// Test fixture: two customers with one savings and one current account each
pub struct StandardBank;

impl StandardBank {
    /// Alice (1): savings 100 = 100.00, current 101 = 0.00
    /// Bob (2): savings 200 = 25.00, current 201 = 0.00
    pub fn create() -> Result<Bank> {
        let mut bank = Bank::new();
        bank.add_customer(Customer::new(1, "Alice"));
        bank.add_customer(Customer::new(2, "Bob"));

        bank.open_account(1, AccountKind::Savings, 100, "Alice", cents(10000))?;
        bank.open_account(1, AccountKind::Current, 101, "Alice", cents(0))?;
        bank.open_account(2, AccountKind::Savings, 200, "Bob", cents(2500))?;
        bank.open_account(2, AccountKind::Current, 201, "Bob", cents(0))?;
        Ok(bank)
    }

    pub fn balance(bank: &Bank, number: i64) -> Money {
        bank.find_account(number)
            .map(|a| a.balance())
            .expect("fixture account exists")
    }
}

/// Test fixture: a few books and members
pub fn standard_library() -> Library {
    let mut library = Library::new();
    library.add_book(Book::new(7, "Dune", "Frank Herbert"));
    library.add_book(Book::new(8, "Emma", "Jane Austen"));
    library.add_member(Member::new(3, "Ann Smith"));
    library.add_member(Member::new(4, "Ben Jones"));
    library
}

/// Test fixture: one room of each type and two customers
pub fn standard_hotel() -> Hotel {
    let mut hotel = Hotel::new();
    hotel.add_room(Room::new(101, RoomKind::Single));
    hotel.add_room(Room::new(102, RoomKind::Double));
    hotel.add_room(Room::new(201, RoomKind::Suite));
    hotel.add_guest(Guest::new(1, "Kim Park"));
    hotel.add_guest(Guest::new(2, "Lee Chan"));
    hotel
}
