use std::path::Path;

use tracing::{debug, info};

use crate::domain::{Book, BookId, Loan, Member, MemberId};
use crate::storage::{self, LibraryData};

use super::AppError;

/// Library circulation: books, members and the loans between them.
#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
    members: Vec<Member>,
    loans: Vec<Loan>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_book(&mut self, book: Book) {
        debug!(id = book.id, title = %book.title, "adding book");
        self.books.push(book);
    }

    pub fn add_member(&mut self, member: Member) {
        debug!(id = member.id, "adding member");
        self.members.push(member);
    }

    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn find_member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn available_books(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().filter(|b| b.available)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    /// Lend a book to a member. The book must exist and be on the shelf.
    pub fn issue_book(&mut self, book_id: BookId, member_id: MemberId) -> Result<(), AppError> {
        if self.find_member(member_id).is_none() {
            return Err(AppError::MemberNotFound(member_id));
        }
        let book = self
            .books
            .iter_mut()
            .find(|b| b.id == book_id)
            .ok_or(AppError::BookNotFound(book_id))?;
        book.check_out()?;

        self.loans.push(Loan::new(book_id, member_id));
        debug!(book = book_id, member = member_id, "issued book");
        Ok(())
    }

    /// Close the member's active loan of the book and put it back on the shelf.
    pub fn return_book(&mut self, book_id: BookId, member_id: MemberId) -> Result<(), AppError> {
        let loan = self
            .loans
            .iter_mut()
            .find(|l| l.is_open_for(book_id, member_id))
            .ok_or(AppError::NoActiveLoan {
                book: book_id,
                member: member_id,
            })?;
        loan.close();

        if let Some(book) = self.books.iter_mut().find(|b| b.id == book_id) {
            book.check_in();
        }
        debug!(book = book_id, member = member_id, "returned book");
        Ok(())
    }

    pub fn save_data(&self, path: &Path) -> Result<(), AppError> {
        storage::save_file(path, |writer| {
            storage::write_library(writer, &self.books, &self.members, &self.loans)
        })?;
        info!(
            path = %path.display(),
            books = self.books.len(),
            members = self.members.len(),
            loans = self.loans.len(),
            "saved library data"
        );
        Ok(())
    }

    /// Append the records stored at `path`; on a decode error nothing is added.
    pub fn load_data(&mut self, path: &Path) -> Result<(), AppError> {
        let LibraryData {
            books,
            members,
            loans,
        } = storage::load_file(path, storage::read_library)?;
        info!(
            path = %path.display(),
            books = books.len(),
            members = members.len(),
            loans = loans.len(),
            "loaded library data"
        );
        self.books.extend(books);
        self.members.extend(members);
        self.loans.extend(loans);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        let mut lib = Library::new();
        lib.add_book(Book::new(7, "Dune", "Frank Herbert"));
        lib.add_member(Member::new(3, "Ann"));
        lib.add_member(Member::new(4, "Ben"));
        lib
    }

    #[test]
    fn test_issue_requires_member() {
        let mut lib = library();
        assert!(matches!(
            lib.issue_book(7, 99),
            Err(AppError::MemberNotFound(99))
        ));
        assert!(lib.find_book(7).unwrap().available);
        assert!(lib.loans().is_empty());
    }

    #[test]
    fn test_issue_unknown_book() {
        let mut lib = library();
        assert!(matches!(lib.issue_book(8, 3), Err(AppError::BookNotFound(8))));
    }

    #[test]
    fn test_return_without_loan() {
        let mut lib = library();
        lib.issue_book(7, 3).unwrap();

        assert!(matches!(
            lib.return_book(7, 4),
            Err(AppError::NoActiveLoan { book: 7, member: 4 })
        ));
        lib.return_book(7, 3).unwrap();
        assert!(lib.return_book(7, 3).is_err());
    }

    #[test]
    fn test_available_books() {
        let mut lib = library();
        lib.add_book(Book::new(8, "Emma", "Jane Austen"));
        lib.issue_book(7, 3).unwrap();

        let ids: Vec<_> = lib.available_books().map(|b| b.id).collect();
        assert_eq!(ids, vec![8]);
    }
}
