//! Application-level orchestration of catalog and display.

use crate::core::book::Book;
use crate::core::catalog::Catalog;
use crate::core::display;
use crate::core::error::Result;
use log::info;
use std::path::Path;

/// Sample records inserted into a brand-new catalog.
const SAMPLE_BOOKS: [(&str, &str, &str, i64); 5] = [
    ("The Hobbit", "J.R.R. Tolkien", "978-0345339683", 10),
    ("Pride and Prejudice", "Jane Austen", "978-0141439518", 7),
    ("To the Lighthouse", "Virginia Woolf", "978-0156907392", 4),
    ("Dune", "Frank Herbert", "978-0441013593", 6),
    ("Foundation", "Isaac Asimov", "978-0553803717", 8),
];

/// Owns the open catalog and turns query results into display text.
///
/// `Library` is the seam a front end binds to: mutations go through the
/// delegation methods, listings come back as rendered text, and the text
/// span the user selects goes through
/// [`parse_selection`](crate::parse_selection) to recover the record
/// identity for update and delete. The catalog and the display functions
/// never reference each other; this struct is the only place they meet.
pub struct Library {
    catalog: Catalog,
}

impl Library {
    /// Opens or creates the library catalog at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfmarkError::CatalogUnavailable`](crate::ShelfmarkError::CatalogUnavailable)
    /// if the backing file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            catalog: Catalog::open(path)?,
        })
    }

    /// Opens an in-memory library.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            catalog: Catalog::open_in_memory()?,
        })
    }

    /// Borrows the underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Seeds a brand-new catalog with sample data, first run only.
    ///
    /// Returns how many books were inserted: the full sample set for an
    /// empty catalog, zero otherwise.
    pub fn seed_if_empty(&mut self) -> Result<usize> {
        if self.catalog.count_books()? > 0 {
            return Ok(0);
        }

        for (title, author, isbn, quantity) in SAMPLE_BOOKS {
            self.catalog.insert_book(title, author, isbn, quantity)?;
        }
        info!("seeded catalog with {} sample books", SAMPLE_BOOKS.len());
        Ok(SAMPLE_BOOKS.len())
    }

    /// Adds a book, returning its assigned id.
    pub fn add_book(&mut self, title: &str, author: &str, isbn: &str, quantity: i64) -> Result<i64> {
        self.catalog.insert_book(title, author, isbn, quantity)
    }

    /// Renders the whole catalog for the list pane.
    pub fn view_all(&self) -> Result<String> {
        Ok(display::render_books(&self.catalog.list_books(None)?))
    }

    /// Renders the books matching `term` for the list pane.
    pub fn search(&self, term: &str) -> Result<String> {
        Ok(display::render_books(&self.catalog.list_books(Some(term))?))
    }

    /// Replaces every field of the book `id` except the id itself.
    pub fn update_book(
        &mut self,
        id: i64,
        title: &str,
        author: &str,
        isbn: &str,
        quantity: i64,
    ) -> Result<Book> {
        self.catalog.update_book(id, title, author, isbn, quantity)
    }

    /// Removes the book `id` from the catalog.
    pub fn delete_book(&mut self, id: i64) -> Result<()> {
        self.catalog.delete_book(id)
    }

    /// Closes the backing catalog.
    pub fn close(self) -> Result<()> {
        self.catalog.close()
    }
}
