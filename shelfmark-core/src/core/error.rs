//! Error types for the Shelfmark core library.

use thiserror::Error;

/// All errors that can occur within the Shelfmark core library.
#[derive(Debug, Error)]
pub enum ShelfmarkError {
    /// A SQLite operation failed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The backing catalog file could not be opened or its schema could
    /// not be created. Fatal to the store instance; a catalog is only
    /// handed out after a successful open.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A book ID was requested that does not exist in the database.
    #[error("Book not found: {0}")]
    BookNotFound(i64),

    /// An insert or update would give two books the same ISBN.
    #[error("A book with ISBN '{0}' already exists")]
    DuplicateIsbn(String),

    /// A required field was empty or a numeric field was out of range.
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

/// Convenience alias that pins the error type to [`ShelfmarkError`].
pub type Result<T> = std::result::Result<T, ShelfmarkError>;

impl ShelfmarkError {
    /// Returns a short, human-readable message suitable for display to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(e) => format!("Failed to save: {e}"),
            Self::CatalogUnavailable(_) => "Could not open catalog file".to_string(),
            Self::BookNotFound(_) => "Book no longer exists".to_string(),
            Self::DuplicateIsbn(isbn) => format!("ISBN {isbn} is already in the catalog"),
            Self::ValidationFailed(msg) => msg.clone(),
        }
    }
}
