//! Error types for Libmini

use thiserror::Error;

/// Numeric outcome codes reported alongside errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    NoSuchUser = 4,
    NoSuchItem = 5,
    ItemNotAvailable = 7,
    NotBorrowed = 12,
    ItemAlreadyExists = 16,
    BadValue = 18,
    UserIdentificationAlreadyExists = 19,
    UnknownChannel = 20,
    UserHasBorrowedSpecimens = 21,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Book with ISBN '{0}' not found in library catalog")]
    BookNotFound(String),

    #[error("The book '{title}' (ISBN {isbn}) is currently not available")]
    BookUnavailable { isbn: String, title: String },

    #[error("Dear {email}, you haven't borrowed the book '{title}' (ISBN {isbn})")]
    NotBorrowed {
        email: String,
        isbn: String,
        title: String,
    },

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Unknown notifier type: {0}")]
    UnknownChannel(String),

    #[error("A book with ISBN '{0}' is already on the shelf")]
    DuplicateIsbn(String),

    #[error("{0} is already a registered member")]
    DuplicateMember(String),

    #[error("No active member with email {0}")]
    MemberNotFound(String),

    #[error("{email} still has {count} book(s) on loan")]
    MemberHasLoans { email: String, count: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Outcome code for this error
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::BookNotFound(_) => ErrorCode::NoSuchItem,
            AppError::BookUnavailable { .. } => ErrorCode::ItemNotAvailable,
            AppError::NotBorrowed { .. } => ErrorCode::NotBorrowed,
            AppError::InvalidRole(_) => ErrorCode::NotAuthorized,
            AppError::UnknownChannel(_) => ErrorCode::UnknownChannel,
            AppError::DuplicateIsbn(_) => ErrorCode::ItemAlreadyExists,
            AppError::DuplicateMember(_) => ErrorCode::UserIdentificationAlreadyExists,
            AppError::MemberNotFound(_) => ErrorCode::NoSuchUser,
            AppError::MemberHasLoans { .. } => ErrorCode::UserHasBorrowedSpecimens,
            AppError::Validation(_) => ErrorCode::BadValue,
            AppError::Delivery(_) | AppError::Config(_) | AppError::Internal(_) => {
                ErrorCode::Failure
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
