use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::Level;

use crate::application::{Bank, Hotel, Library, TransferRequest};
use crate::domain::{
    AccountKind, AccountNumber, Book, BookId, Customer, CustomerId, Guest, GuestId, Member,
    MemberId, Money, Room, RoomKind, RoomNumber,
};

pub const LIBRARY_DATA: &str = "library_data.txt";
pub const HOTEL_DATA: &str = "hotel_data.txt";
pub const BANK_DATA: &str = "bank_data.txt";

/// Frontdesk - library loans, hotel bookings and a bank ledger in flat files
#[derive(Parser)]
#[command(name = "frontdesk")]
#[command(about = "Keep library loans, hotel bookings and bank accounts in plain text files")]
#[command(version)]
pub struct Cli {
    /// Data file path (defaults to library_data.txt, hotel_data.txt or bank_data.txt)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Library circulation commands
    #[command(subcommand)]
    Library(LibraryCommands),

    /// Hotel booking commands
    #[command(subcommand)]
    Hotel(HotelCommands),

    /// Bank ledger commands
    #[command(subcommand)]
    Bank(BankCommands),
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum LibraryCommands {
    /// Add a book to the catalogue
    AddBook {
        id: BookId,
        title: String,
        author: String,
    },

    /// Register a member
    AddMember { id: MemberId, name: String },

    /// Lend a book to a member
    Issue { book: BookId, member: MemberId },

    /// Take a lent book back
    Return { book: BookId, member: MemberId },

    /// List books
    Books {
        /// Only books currently on the shelf
        #[arg(long)]
        available: bool,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List members
    Members {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List loans
    Loans {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Append the records of another library file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
pub enum HotelCommands {
    /// Add a room
    AddRoom {
        number: RoomNumber,

        /// Room type: single, double, suite
        kind: String,
    },

    /// Register a customer
    AddCustomer { id: GuestId, name: String },

    /// Book a room for a customer
    Book { room: RoomNumber, customer: GuestId },

    /// Cancel a booking
    Cancel { room: RoomNumber, customer: GuestId },

    /// Show every room and whether it is free
    Rooms {
        /// Only free rooms
        #[arg(long)]
        available: bool,

        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List customers
    Customers {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List bookings
    Bookings {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Append the records of another hotel file
    Import { file: PathBuf },
}

#[derive(Subcommand)]
pub enum BankCommands {
    /// Register a customer
    AddCustomer { id: CustomerId, name: String },

    /// Open a savings or current account for an existing customer
    Open {
        customer: CustomerId,

        /// Account kind: savings, current
        kind: String,

        number: AccountNumber,

        holder: String,

        /// Opening balance (e.g., "100.00" or "100")
        #[arg(default_value = "0")]
        balance: String,
    },

    /// Link an existing account to a customer
    Attach {
        customer: CustomerId,
        number: AccountNumber,
    },

    /// Deposit into a customer's account
    Deposit {
        customer: CustomerId,
        kind: String,
        amount: String,
    },

    /// Withdraw from a customer's account
    Withdraw {
        customer: CustomerId,
        kind: String,
        amount: String,
    },

    /// Move money between accounts
    Transfer {
        /// Source customer
        customer: CustomerId,

        /// Source account kind
        kind: String,

        amount: String,

        /// Target customer (omit to transfer between your own accounts)
        #[arg(long)]
        to: Option<CustomerId>,

        /// Target account kind
        #[arg(long)]
        into: String,
    },

    /// Show the balance of a customer's account
    Balance { customer: CustomerId, kind: String },

    /// List all accounts
    Accounts {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List customers and their accounts
    Customers {
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Append the accounts and customers of another bank file
    Import { file: PathBuf },
}

/// Install the stderr log subscriber. `--verbose` turns on per-operation logs.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

impl Cli {
    fn data_path(&self, default: &str) -> PathBuf {
        self.data.clone().unwrap_or_else(|| PathBuf::from(default))
    }

    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Library(ref cmd) => {
                let path = self.data_path(LIBRARY_DATA);
                run_library_command(&path, cmd)
            }
            Commands::Hotel(ref cmd) => {
                let path = self.data_path(HOTEL_DATA);
                run_hotel_command(&path, cmd)
            }
            Commands::Bank(ref cmd) => {
                let path = self.data_path(BANK_DATA);
                run_bank_command(&path, cmd)
            }
        }
    }
}

fn run_library_command(path: &Path, cmd: &LibraryCommands) -> Result<()> {
    let mut library = Library::new();
    if path.exists() {
        library.load_data(path)?;
    }

    let changed = match cmd {
        LibraryCommands::AddBook { id, title, author } => {
            library.add_book(Book::new(*id, title.clone(), author.clone()));
            println!("Added book {}: {}", id, title);
            true
        }

        LibraryCommands::AddMember { id, name } => {
            library.add_member(Member::new(*id, name.clone()));
            println!("Added member {}: {}", id, name);
            true
        }

        LibraryCommands::Issue { book, member } => {
            library.issue_book(*book, *member)?;
            println!("Issued book {} to member {}", book, member);
            true
        }

        LibraryCommands::Return { book, member } => {
            library.return_book(*book, *member)?;
            println!("Book {} returned by member {}", book, member);
            true
        }

        LibraryCommands::Books { available, format } => {
            if *available {
                print_list(library.available_books(), *format, "No books available.")?;
            } else {
                print_list(library.books(), *format, "No books found.")?;
            }
            false
        }

        LibraryCommands::Members { format } => {
            print_list(library.members(), *format, "No members found.")?;
            false
        }

        LibraryCommands::Loans { format } => {
            print_list(library.loans(), *format, "No loans found.")?;
            false
        }

        LibraryCommands::Import { file } => {
            library.load_data(file)?;
            println!("Imported library records from {}", file.display());
            true
        }
    };

    if changed {
        library.save_data(path)?;
    }
    Ok(())
}

fn run_hotel_command(path: &Path, cmd: &HotelCommands) -> Result<()> {
    let mut hotel = Hotel::new();
    if path.exists() {
        hotel.load_data(path)?;
    }

    let changed = match cmd {
        HotelCommands::AddRoom { number, kind } => {
            let kind: RoomKind = kind.parse().map_err(|e| anyhow::anyhow!("{}", e))?;
            hotel.add_room(Room::new(*number, kind));
            println!("Added {} room {}", kind, number);
            true
        }

        HotelCommands::AddCustomer { id, name } => {
            hotel.add_guest(Guest::new(*id, name.clone()));
            println!("Added customer {}: {}", id, name);
            true
        }

        HotelCommands::Book { room, customer } => {
            hotel.book_room(*room, *customer)?;
            println!("Booked room {} for customer {}", room, customer);
            true
        }

        HotelCommands::Cancel { room, customer } => {
            hotel.cancel_booking(*room, *customer)?;
            println!("Cancelled booking of room {} for customer {}", room, customer);
            true
        }

        HotelCommands::Rooms { available, format } => {
            if *available {
                print_list(hotel.available_rooms(), *format, "No rooms available.")?;
            } else {
                print_list(hotel.rooms(), *format, "No rooms found.")?;
            }
            false
        }

        HotelCommands::Customers { format } => {
            print_list(hotel.guests(), *format, "No customers found.")?;
            false
        }

        HotelCommands::Bookings { format } => {
            print_list(hotel.bookings(), *format, "No bookings found.")?;
            false
        }

        HotelCommands::Import { file } => {
            hotel.load_data(file)?;
            println!("Imported hotel records from {}", file.display());
            true
        }
    };

    if changed {
        hotel.save_data(path)?;
    }
    Ok(())
}

fn run_bank_command(path: &Path, cmd: &BankCommands) -> Result<()> {
    let mut bank = Bank::new();
    if path.exists() {
        bank.load_data(path)?;
    }

    let changed = match cmd {
        BankCommands::AddCustomer { id, name } => {
            bank.add_customer(Customer::new(*id, name.clone()));
            println!("Added customer {}: {}", id, name);
            true
        }

        BankCommands::Open {
            customer,
            kind,
            number,
            holder,
            balance,
        } => {
            let kind = parse_kind(kind)?;
            let balance = parse_amount(balance)?;
            bank.open_account(*customer, kind, *number, holder.clone(), balance)?;
            println!(
                "Opened {} account {} for customer {} with {}",
                kind, number, customer, balance
            );
            true
        }

        BankCommands::Attach { customer, number } => {
            bank.attach_account(*customer, *number)?;
            println!("Linked account {} to customer {}", number, customer);
            true
        }

        BankCommands::Deposit {
            customer,
            kind,
            amount,
        } => {
            let kind = parse_kind(kind)?;
            let balance = bank.deposit(*customer, kind, parse_amount(amount)?)?;
            println!("Deposit successful. {} balance: ${}", kind, balance);
            true
        }

        BankCommands::Withdraw {
            customer,
            kind,
            amount,
        } => {
            let kind = parse_kind(kind)?;
            let balance = bank.withdraw(*customer, kind, parse_amount(amount)?)?;
            println!("Withdrawal successful. {} balance: ${}", kind, balance);
            true
        }

        BankCommands::Transfer {
            customer,
            kind,
            amount,
            to,
            into,
        } => {
            let request = TransferRequest {
                from_customer: *customer,
                from_kind: parse_kind(kind)?,
                amount: parse_amount(amount)?,
                to_customer: *to,
                to_kind: parse_kind(into)?,
            };
            let receipt = bank.transfer(request)?;
            println!(
                "Transferred {} from account {} to account {}{}",
                receipt.amount,
                receipt.from_account,
                receipt.to_account,
                if receipt.self_transfer {
                    " (same customer)"
                } else {
                    ""
                }
            );
            true
        }

        BankCommands::Balance { customer, kind } => {
            let kind = parse_kind(kind)?;
            match bank.view_balance(*customer, kind) {
                Ok(view) => println!("{} Account Balance: ${}", view.kind, view.balance),
                Err(err) if err.is_not_found() => println!("{}", err),
                Err(err) => return Err(err.into()),
            }
            false
        }

        BankCommands::Accounts { format } => {
            print_list(bank.accounts(), *format, "No accounts found.")?;
            false
        }

        BankCommands::Customers { format } => {
            print_list(bank.customers(), *format, "No customers found.")?;
            false
        }

        BankCommands::Import { file } => {
            bank.load_data(file)?;
            println!("Imported bank records from {}", file.display());
            true
        }
    };

    if changed {
        bank.save_data(path)?;
    }
    Ok(())
}

fn parse_kind(raw: &str) -> Result<AccountKind> {
    raw.parse().map_err(|e| {
        anyhow::anyhow!(
            "Invalid account kind '{}'. Valid kinds: savings, current. Error: {}",
            raw,
            e
        )
    })
}

fn parse_amount(raw: &str) -> Result<Money> {
    raw.parse::<Money>()
        .context("Invalid amount format. Use '50.00' or '50'")
}

fn print_list<'a, T, I>(items: I, format: OutputFormat, empty: &str) -> Result<()>
where
    T: Display + Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let items: Vec<&T> = items.into_iter().collect();
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
        OutputFormat::Table if items.is_empty() => println!("{}", empty),
        OutputFormat::Table => {
            for item in items {
                println!("{}", item);
            }
        }
    }
    Ok(())
}
