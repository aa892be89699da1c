//! CRUD and substring search over the book catalog.

use crate::core::book::{self, Book};
use crate::core::error::{Result, ShelfmarkError};
use crate::core::storage::Storage;
use log::debug;
use rusqlite::{params, Connection, Row};
use std::path::Path;

/// An open book catalog backed by a SQLite database.
///
/// `Catalog` is the primary interface for all record mutations. Each
/// instance exclusively owns its backing file for the lifetime of the
/// process; every operation is synchronous and committed before it
/// returns, so nothing is buffered across calls.
pub struct Catalog {
    storage: Storage,
}

impl Catalog {
    /// Opens or creates the catalog at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::CatalogUnavailable`] if the backing file
    /// cannot be opened or its schema cannot be created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            storage: Storage::open(path)?,
        })
    }

    /// Opens an in-memory catalog.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            storage: Storage::open_in_memory()?,
        })
    }

    /// Borrows the underlying SQLite connection.
    pub fn connection(&self) -> &Connection {
        self.storage.connection()
    }

    /// Inserts a new book and returns its assigned id.
    ///
    /// Ids come from the store's own allocation and are never reissued
    /// after a delete.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::ValidationFailed`] for an empty required
    /// field or a negative quantity, [`ShelfmarkError::DuplicateIsbn`] if
    /// a book with the same ISBN already exists. Nothing is written in
    /// either case.
    pub fn insert_book(
        &mut self,
        title: &str,
        author: &str,
        isbn: &str,
        quantity: i64,
    ) -> Result<i64> {
        book::validate_fields(title, author, isbn, quantity)?;

        self.storage
            .connection()
            .execute(
                "INSERT INTO books (title, author, isbn, quantity) VALUES (?1, ?2, ?3, ?4)",
                params![title, author, isbn, quantity],
            )
            .map_err(|e| isbn_conflict(e, isbn))?;

        let id = self.storage.connection().last_insert_rowid();
        debug!("inserted book {id} (isbn {isbn})");
        Ok(id)
    }

    /// Fetches one book by id.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::BookNotFound`] if no book has `id`.
    pub fn get_book(&self, id: i64) -> Result<Book> {
        self.storage
            .connection()
            .query_row(
                "SELECT id, title, author, isbn, quantity FROM books WHERE id = ?1",
                params![id],
                map_book_row,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => ShelfmarkError::BookNotFound(id),
                other => other.into(),
            })
    }

    /// Lists books in insertion (id) order, optionally filtered.
    ///
    /// A non-empty filter keeps every book whose title, author or ISBN
    /// contains it as a substring; matching is case-insensitive, and the
    /// SQL wildcard characters are escaped so the filter is always taken
    /// literally. `None` or a blank filter returns the whole catalog.
    /// An empty result is `Ok(vec![])`, never an error.
    pub fn list_books(&self, filter: Option<&str>) -> Result<Vec<Book>> {
        let conn = self.storage.connection();
        let filter = filter.map(str::trim).filter(|f| !f.is_empty());

        let books = match filter {
            Some(term) => {
                let pattern = format!("%{}%", escape_like(term));
                let mut stmt = conn.prepare(
                    "SELECT id, title, author, isbn, quantity FROM books
                     WHERE title LIKE ?1 ESCAPE '\\'
                        OR author LIKE ?1 ESCAPE '\\'
                        OR isbn LIKE ?1 ESCAPE '\\'
                     ORDER BY id",
                )?;
                let rows = stmt
                    .query_map(params![pattern], map_book_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
            None => {
                let mut stmt = conn
                    .prepare("SELECT id, title, author, isbn, quantity FROM books ORDER BY id")?;
                let rows = stmt
                    .query_map([], map_book_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            }
        };

        Ok(books)
    }

    /// Replaces every field of an existing book except its id.
    ///
    /// Returns the persisted row read back. Updating a book to its own
    /// unchanged ISBN succeeds; only a collision with a *different*
    /// book's ISBN is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::BookNotFound`] if no book has `id`,
    /// [`ShelfmarkError::DuplicateIsbn`] on an ISBN collision, or
    /// [`ShelfmarkError::ValidationFailed`] on the same field rules as
    /// insert. The stored record is unchanged on any failure.
    pub fn update_book(
        &mut self,
        id: i64,
        title: &str,
        author: &str,
        isbn: &str,
        quantity: i64,
    ) -> Result<Book> {
        book::validate_fields(title, author, isbn, quantity)?;

        let changed = self
            .storage
            .connection()
            .execute(
                "UPDATE books SET title = ?1, author = ?2, isbn = ?3, quantity = ?4 WHERE id = ?5",
                params![title, author, isbn, quantity, id],
            )
            .map_err(|e| isbn_conflict(e, isbn))?;

        // SQLite reports success for an UPDATE that matched no row; zero
        // affected rows is how a missing id shows up.
        if changed == 0 {
            return Err(ShelfmarkError::BookNotFound(id));
        }

        debug!("updated book {id}");
        self.get_book(id)
    }

    /// Deletes one book by id.
    ///
    /// Deleting an id that is not in the catalog is an error, matching
    /// `update_book`; a successful delete removes exactly one row.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::BookNotFound`] if no book has `id`.
    pub fn delete_book(&mut self, id: i64) -> Result<()> {
        let changed = self
            .storage
            .connection()
            .execute("DELETE FROM books WHERE id = ?1", params![id])?;

        if changed == 0 {
            return Err(ShelfmarkError::BookNotFound(id));
        }

        debug!("deleted book {id}");
        Ok(())
    }

    /// Returns the number of books in the catalog.
    pub fn count_books(&self) -> Result<usize> {
        let count: i64 =
            self.storage
                .connection()
                .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Closes the backing store. The catalog is unusable afterwards.
    pub fn close(self) -> Result<()> {
        self.storage.close()
    }
}

fn map_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        isbn: row.get(3)?,
        quantity: row.get(4)?,
    })
}

/// Maps a UNIQUE-constraint failure on `books.isbn` to
/// [`ShelfmarkError::DuplicateIsbn`], leaving other SQLite errors as-is.
fn isbn_conflict(err: rusqlite::Error, isbn: &str) -> ShelfmarkError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE {
            return ShelfmarkError::DuplicateIsbn(isbn.to_string());
        }
    }
    err.into()
}

/// Escapes `%`, `_` and the escape character itself so a search term is
/// matched as a literal substring by LIKE.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
