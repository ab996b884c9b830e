//! Member model and loan records

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    book::Book,
    person::{Identity, Person, Role},
};

/// One active loan held by a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Loan {
    pub isbn: String,
    pub borrowed_at: DateTime<Utc>,
    /// Position of the borrowed book on the shelf
    #[serde(skip)]
    pub(crate) shelf_slot: usize,
}

/// A registered member of the library.
///
/// Loans are kept in borrow order and only change through the catalog's
/// borrow and return transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Member {
    name: String,
    email: String,
    role: Role,
    book_loans: Vec<Loan>,
}

impl Member {
    /// Build a member record from a person. The member flag is set unless the
    /// person already held a role.
    pub(crate) fn from_person(person: &Person) -> Self {
        let role = match person.role() {
            Role::Plain => Role::Member,
            other => other,
        };
        Self {
            name: person.name().to_string(),
            email: person.email().to_string(),
            role,
            book_loans: Vec::new(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_member(&self) -> bool {
        self.role == Role::Member
    }

    pub fn book_loans(&self) -> &[Loan] {
        &self.book_loans
    }

    pub(crate) fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub(crate) fn loans_mut(&mut self) -> &mut Vec<Loan> {
        &mut self.book_loans
    }
}

impl Identity for Member {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }
}

/// Summary of a member's current loans
#[derive(Debug, Clone, Serialize)]
pub struct MemberLoans {
    pub email: String,
    pub books: Vec<Book>,
}

impl MemberLoans {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

impl std::fmt::Display for MemberLoans {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.books.is_empty() {
            return write!(f, "{} has no current book loans", self.email);
        }
        write!(f, "{} loaned the following books:", self.email)?;
        for book in &self.books {
            write!(f, "\n  - {}", book)?;
        }
        Ok(())
    }
}
