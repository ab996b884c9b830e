//! Loan management service

use crate::{
    error::AppResult,
    models::{Book, MemberLoans},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for a member
    pub async fn borrow(&self, isbn: &str, email: &str) -> AppResult<Book> {
        let result = self.repository.write().await.borrow(isbn, email);
        match &result {
            Ok(book) => tracing::info!(isbn = %isbn, email = %email, "Borrowed '{}'", book.title()),
            Err(e) => tracing::warn!(isbn = %isbn, email = %email, "Borrow refused: {}", e),
        }
        result
    }

    /// Return a borrowed book
    pub async fn return_book(&self, isbn: &str, email: &str) -> AppResult<Book> {
        let result = self.repository.write().await.return_book(isbn, email);
        match &result {
            Ok(book) => tracing::info!(isbn = %isbn, email = %email, "Returned '{}'", book.title()),
            Err(e) => tracing::warn!(isbn = %isbn, email = %email, "Return refused: {}", e),
        }
        result
    }

    /// Current loans of a member
    pub async fn member_loans(&self, email: &str) -> AppResult<MemberLoans> {
        self.repository.read().await.member_loans(email)
    }
}
