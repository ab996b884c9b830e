//! In-memory catalog state and its transitions
//!
//! Every transition validates against the current state first and mutates
//! only once all checks have passed, so a failed call leaves the catalog
//! exactly as it was.

use std::collections::{BTreeSet, HashMap};

use chrono::Utc;
use indexmap::IndexMap;

use crate::{
    error::{AppError, AppResult},
    models::{
        Book, CatalogSnapshot, CatalogStats, Identity, Loan, LoanRegister, Member, MemberLoans,
        Person, Role,
    },
};

#[derive(Debug, Default)]
pub struct Catalog {
    allow_duplicate_isbn: bool,
    book_shelf: Vec<Book>,
    membership_list: Vec<Member>,
    loan_register: LoanRegister,
}

impl Catalog {
    pub fn new(allow_duplicate_isbn: bool) -> Self {
        Self {
            allow_duplicate_isbn,
            ..Default::default()
        }
    }

    /// Shelf position of the book an ISBN resolves to. The last book with a
    /// given ISBN shadows earlier ones.
    fn book_slot(&self, isbn: &str) -> Option<usize> {
        self.book_shelf.iter().rposition(|b| b.isbn() == isbn)
    }

    fn member_slot(&self, email: &str) -> Option<usize> {
        self.membership_list.iter().position(|m| m.email() == email)
    }

    fn active_member_slot(&self, email: &str) -> AppResult<usize> {
        self.member_slot(email)
            .filter(|&i| self.membership_list[i].is_member())
            .ok_or_else(|| AppError::MemberNotFound(email.to_string()))
    }

    pub fn add_book(&mut self, book: Book) -> AppResult<()> {
        if !self.allow_duplicate_isbn && self.book_slot(book.isbn()).is_some() {
            return Err(AppError::DuplicateIsbn(book.isbn().to_string()));
        }
        self.book_shelf.push(book);
        Ok(())
    }

    /// Register a person as member, reactivating a revoked record with the
    /// same email if there is one.
    pub fn register_member(&mut self, person: &Person) -> AppResult<Member> {
        if person.is_librarian() {
            return Err(AppError::InvalidRole(
                "Librarian cannot be registered as Member".to_string(),
            ));
        }
        match self.member_slot(person.email()) {
            Some(i) if self.membership_list[i].is_member() => {
                Err(AppError::DuplicateMember(person.email().to_string()))
            }
            Some(i) => {
                let member = &mut self.membership_list[i];
                member.set_role(Role::Member);
                Ok(member.clone())
            }
            None => {
                let member = Member::from_person(person);
                self.membership_list.push(member.clone());
                Ok(member)
            }
        }
    }

    /// Revoke a membership. Refused while the member still holds loans.
    pub fn revoke_member(&mut self, email: &str) -> AppResult<Member> {
        let slot = self.active_member_slot(email)?;
        let member = &mut self.membership_list[slot];
        let count = member.book_loans().len();
        if count > 0 {
            return Err(AppError::MemberHasLoans {
                email: email.to_string(),
                count,
            });
        }
        member.set_role(Role::Plain);
        Ok(member.clone())
    }

    pub fn borrow(&mut self, isbn: &str, email: &str) -> AppResult<Book> {
        let book_slot = self
            .book_slot(isbn)
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))?;
        let member_slot = self.active_member_slot(email)?;

        // A shadowed copy with the same ISBN may already be out
        let isbn_on_loan = self.loan_register.values().any(|isbns| isbns.contains(isbn));
        let book = &mut self.book_shelf[book_slot];
        if !book.is_available() || isbn_on_loan {
            return Err(AppError::BookUnavailable {
                isbn: isbn.to_string(),
                title: book.title().to_string(),
            });
        }

        book.set_available(false);
        self.membership_list[member_slot].loans_mut().push(Loan {
            isbn: isbn.to_string(),
            borrowed_at: Utc::now(),
            shelf_slot: book_slot,
        });
        self.loan_register
            .entry(email.to_string())
            .or_default()
            .insert(isbn.to_string());

        Ok(book.clone())
    }

    /// Return a book. The member's own loan decides which shelf copy comes
    /// back, so a loan stays returnable after a later copy shadows its ISBN.
    pub fn return_book(&mut self, isbn: &str, email: &str) -> AppResult<Book> {
        let resolved = self
            .book_slot(isbn)
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))?;
        let not_borrowed = || AppError::NotBorrowed {
            email: email.to_string(),
            isbn: isbn.to_string(),
            title: self.book_shelf[resolved].title().to_string(),
        };
        let member_slot = self.member_slot(email).ok_or_else(not_borrowed)?;
        let (loan_pos, book_slot) = self.membership_list[member_slot]
            .book_loans()
            .iter()
            .enumerate()
            .find(|(_, l)| l.isbn == isbn)
            .map(|(pos, l)| (pos, l.shelf_slot))
            .ok_or_else(not_borrowed)?;

        let book = &mut self.book_shelf[book_slot];
        book.set_available(true);
        self.membership_list[member_slot].loans_mut().remove(loan_pos);
        if let Some(isbns) = self.loan_register.get_mut(email) {
            isbns.remove(isbn);
            if isbns.is_empty() {
                self.loan_register.remove(email);
            }
        }

        Ok(book.clone())
    }

    pub fn member_loans(&self, email: &str) -> AppResult<MemberLoans> {
        let slot = self
            .member_slot(email)
            .ok_or_else(|| AppError::MemberNotFound(email.to_string()))?;
        let books = self.membership_list[slot]
            .book_loans()
            .iter()
            .filter_map(|l| self.book_shelf.get(l.shelf_slot).cloned())
            .collect();
        Ok(MemberLoans {
            email: email.to_string(),
            books,
        })
    }

    pub fn available_books(&self) -> Vec<Book> {
        self.book_shelf
            .iter()
            .filter(|b| b.is_available())
            .cloned()
            .collect()
    }

    /// ISBN -> book, ordered by first shelf appearance, last write wins
    pub fn catalog_by_isbn(&self) -> IndexMap<String, Book> {
        let mut catalog = IndexMap::with_capacity(self.book_shelf.len());
        for book in &self.book_shelf {
            catalog.insert(book.isbn().to_string(), book.clone());
        }
        catalog
    }

    pub fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.book_slot(isbn)
            .map(|i| self.book_shelf[i].clone())
            .ok_or_else(|| AppError::BookNotFound(isbn.to_string()))
    }

    pub fn get_member(&self, email: &str) -> AppResult<Member> {
        self.member_slot(email)
            .map(|i| self.membership_list[i].clone())
            .ok_or_else(|| AppError::MemberNotFound(email.to_string()))
    }

    pub fn members(&self) -> Vec<Member> {
        self.membership_list.clone()
    }

    pub fn loan_register(&self) -> LoanRegister {
        self.loan_register.clone()
    }

    pub fn stats(&self) -> CatalogStats {
        let available = self.book_shelf.iter().filter(|b| b.is_available()).count();
        CatalogStats {
            books: self.book_shelf.len(),
            available,
            on_loan: self.book_shelf.len() - available,
            active_members: self.membership_list.iter().filter(|m| m.is_member()).count(),
        }
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            book_shelf: self.book_shelf.clone(),
            membership_list: self.membership_list.clone(),
            loan_register: self.loan_register.clone(),
        }
    }

    /// Cross-check availability flags, member loans and the loan register.
    pub fn check_invariants(&self) -> AppResult<()> {
        let mut holders: HashMap<usize, &str> = HashMap::new();
        let mut isbn_holders: HashMap<&str, &str> = HashMap::new();
        let mut expected = LoanRegister::new();

        for member in &self.membership_list {
            for loan in member.book_loans() {
                let book = self.book_shelf.get(loan.shelf_slot).ok_or_else(|| {
                    AppError::Internal(format!("loan of {} points past the shelf", loan.isbn))
                })?;
                if book.isbn() != loan.isbn {
                    return Err(AppError::Internal(format!(
                        "loan of {} resolves to book {}",
                        loan.isbn,
                        book.isbn()
                    )));
                }
                if book.is_available() {
                    return Err(AppError::Internal(format!(
                        "book {} is on loan to {} but marked available",
                        loan.isbn,
                        member.email()
                    )));
                }
                if let Some(other) = holders.insert(loan.shelf_slot, member.email()) {
                    return Err(AppError::Internal(format!(
                        "book {} is on loan to both {} and {}",
                        loan.isbn,
                        other,
                        member.email()
                    )));
                }
                if let Some(other) = isbn_holders.insert(loan.isbn.as_str(), member.email()) {
                    return Err(AppError::Internal(format!(
                        "ISBN {} is on loan to both {} and {}",
                        loan.isbn,
                        other,
                        member.email()
                    )));
                }
                expected
                    .entry(member.email().to_string())
                    .or_insert_with(BTreeSet::new)
                    .insert(loan.isbn.clone());
            }
        }

        for (slot, book) in self.book_shelf.iter().enumerate() {
            if !book.is_available() && !holders.contains_key(&slot) {
                return Err(AppError::Internal(format!(
                    "book {} is unavailable but held by no member",
                    book.isbn()
                )));
            }
        }

        if expected != self.loan_register {
            return Err(AppError::Internal(format!(
                "loan register {:?} diverges from member loans {:?}",
                self.loan_register, expected
            )));
        }
        Ok(())
    }
}
