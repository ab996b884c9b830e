//! Catalog management service

use indexmap::IndexMap;

use crate::{
    error::AppResult,
    models::{Book, CatalogSnapshot, CatalogStats, Identity, Librarian, LoanRegister},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Put a new book on the shelf
    pub async fn add_book(&self, librarian: &Librarian, book: Book) -> AppResult<()> {
        let isbn = book.isbn().to_string();
        match self.repository.write().await.add_book(book) {
            Ok(()) => {
                tracing::info!(isbn = %isbn, by = %librarian.email(), "Book added to catalog");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(isbn = %isbn, "Book rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Get the book an ISBN currently resolves to
    pub async fn get_book(&self, isbn: &str) -> AppResult<Book> {
        self.repository.read().await.get_book(isbn)
    }

    /// Books on the shelf that can be borrowed, in catalog order
    pub async fn available_books(&self) -> Vec<Book> {
        let books = self.repository.read().await.available_books();
        tracing::debug!("{} book(s) available", books.len());
        books
    }

    pub async fn catalog_by_isbn(&self) -> IndexMap<String, Book> {
        self.repository.read().await.catalog_by_isbn()
    }

    pub async fn loan_register(&self) -> LoanRegister {
        self.repository.read().await.loan_register()
    }

    pub async fn stats(&self) -> CatalogStats {
        self.repository.read().await.stats()
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.repository.read().await.snapshot()
    }

    /// Verify that availability, member loans and the loan register agree
    pub async fn check_invariants(&self) -> AppResult<()> {
        self.repository.read().await.check_invariants()
    }
}
