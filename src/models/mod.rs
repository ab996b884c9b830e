//! Data models for Libmini

pub mod book;
pub mod catalog;
pub mod librarian;
pub mod member;
pub mod person;

// Re-export commonly used types
pub use book::Book;
pub use catalog::{CatalogSnapshot, CatalogStats, LoanRegister};
pub use librarian::Librarian;
pub use member::{Loan, Member, MemberLoans};
pub use person::{CreatePerson, Identity, Person, Role};
