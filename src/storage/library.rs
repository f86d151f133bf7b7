use std::io::{Read, Write};

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::domain::{Book, BookId, Loan, Member, MemberId};

use super::flatfile::{PIPE, SectionWriter, flag, read_sections};

const BOOKS: &str = "Books";
const MEMBERS: &str = "Members";
const LOANS: &str = "Loans";

#[derive(Serialize, Deserialize)]
struct BookRow {
    id: BookId,
    title: String,
    author: String,
    #[serde(with = "flag")]
    available: bool,
}

#[derive(Serialize, Deserialize)]
struct MemberRow {
    id: MemberId,
    name: String,
}

#[derive(Serialize, Deserialize)]
struct LoanRow {
    book_id: BookId,
    member_id: MemberId,
    #[serde(with = "flag")]
    active: bool,
}

/// Everything a library data file holds, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LibraryData {
    pub books: Vec<Book>,
    pub members: Vec<Member>,
    pub loans: Vec<Loan>,
}

pub fn write_library<W: Write>(
    writer: W,
    books: &[Book],
    members: &[Member],
    loans: &[Loan],
) -> Result<()> {
    let mut out = SectionWriter::new(writer, PIPE);

    out.section(BOOKS)?;
    for book in books {
        out.row(&BookRow {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            available: book.available,
        })?;
    }

    out.section(MEMBERS)?;
    for member in members {
        out.row(&MemberRow {
            id: member.id,
            name: member.name.clone(),
        })?;
    }

    out.section(LOANS)?;
    for loan in loans {
        out.row(&LoanRow {
            book_id: loan.book_id,
            member_id: loan.member_id,
            active: loan.active,
        })?;
    }

    out.finish()
}

pub fn read_library<R: Read>(reader: R) -> Result<LibraryData> {
    let mut data = LibraryData::default();

    for record in read_sections(reader, PIPE, &[BOOKS, MEMBERS, LOANS])? {
        match record.require_section()? {
            BOOKS => {
                let row: BookRow = record.decode()?;
                data.books.push(Book {
                    id: row.id,
                    title: row.title,
                    author: row.author,
                    available: row.available,
                });
            }
            MEMBERS => {
                let row: MemberRow = record.decode()?;
                data.members.push(Member::new(row.id, row.name));
            }
            LOANS => {
                let row: LoanRow = record.decode()?;
                data.loans.push(Loan {
                    book_id: row.book_id,
                    member_id: row.member_id,
                    active: row.active,
                });
            }
            other => bail!("line {}: unexpected section '{}'", record.line, other),
        }
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layout() {
        let mut book = Book::new(7, "Dune", "Frank Herbert");
        book.available = false;
        let members = vec![Member::new(3, "Ann Smith")];
        let loans = vec![Loan::new(7, 3)];

        let mut buf = Vec::new();
        write_library(&mut buf, &[book], &members, &loans).unwrap();

        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Books:\n7|Dune|Frank Herbert|0\nMembers:\n3|Ann Smith\nLoans:\n7|3|1\n"
        );
    }

    #[test]
    fn test_reads_file_written_by_hand() {
        let text = "Books:\n1|Emma|Jane Austen|1\n2|Ulysses|James Joyce|0\n\
                    Members:\n5|Bo\nLoans:\n2|5|1\n1|5|0\n";
        let data = read_library(text.as_bytes()).unwrap();

        assert_eq!(data.books.len(), 2);
        assert!(data.books[0].available);
        assert!(!data.books[1].available);
        assert_eq!(data.members, vec![Member::new(5, "Bo")]);
        assert!(data.loans[0].active);
        assert!(!data.loans[1].active);
    }

    #[test]
    fn test_title_with_pipe_roundtrips() {
        let books = vec![Book::new(1, "This|That", "Anon")];
        let mut buf = Vec::new();
        write_library(&mut buf, &books, &[], &[]).unwrap();

        let data = read_library(buf.as_slice()).unwrap();
        assert_eq!(data.books, books);
    }

    #[test]
    fn test_non_numeric_id_fails() {
        let text = "Members:\nabc|Bo\n";
        assert!(read_library(text.as_bytes()).is_err());
    }

    #[test]
    fn test_record_before_header_fails() {
        let text = "1|Emma|Jane Austen|1\n";
        assert!(read_library(text.as_bytes()).is_err());
    }
}
