//! Text rendering of book lists and field recovery from selections.
//!
//! The functions here form the round-trip contract between the catalog
//! and a form-and-list front end: [`render_books`] produces the text
//! shown in the list pane, and [`parse_selection`] recovers a book's
//! editable fields from whatever span of that text the user selected.
//! Label text, field order and separator shape are all load-bearing;
//! changing any of them breaks selections made against previously
//! rendered text.

use serde::{Deserialize, Serialize};

use crate::core::book::Book;

/// Shown instead of record blocks when a listing is empty.
pub const NO_BOOKS_MESSAGE: &str = "No books found.";

const SEPARATOR: &str = "----------------------------------------";

/// Renders a sequence of books as fixed-format text blocks.
///
/// Each block is a separator line, one `Label: value` line per field in
/// `ID`, `Title`, `Author`, `ISBN`, `Quantity` order, then a trailing
/// separator and a blank line. An empty slice renders as the literal
/// [`NO_BOOKS_MESSAGE`] line instead of any blocks.
pub fn render_books(books: &[Book]) -> String {
    if books.is_empty() {
        return format!("{NO_BOOKS_MESSAGE}\n");
    }

    let mut out = String::new();
    for book in books {
        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&format!("ID: {}\n", book.id));
        out.push_str(&format!("Title: {}\n", book.title));
        out.push_str(&format!("Author: {}\n", book.author));
        out.push_str(&format!("ISBN: {}\n", book.isbn));
        out.push_str(&format!("Quantity: {}\n", book.quantity));
        out.push_str(SEPARATOR);
        out.push_str("\n\n");
    }
    out
}

/// Editable fields recovered from a selected span of rendered text.
///
/// Every field is optional: a field is `None` when its label line was
/// not part of the selection, or when a numeric value failed to parse.
/// Callers must treat `None` as "leave for the user to re-enter", never
/// as an empty value to write back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookSelection {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub quantity: Option<i64>,
}

impl BookSelection {
    /// True when no field at all was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.title.is_none()
            && self.author.is_none()
            && self.isbn.is_none()
            && self.quantity.is_none()
    }
}

/// Recovers book fields from a contiguous span of rendered text.
///
/// The span is expected to cover roughly one block but may include
/// partial boundary lines. Each line is matched against the field
/// labels; the value is everything after the label up to the end of the
/// line, trimmed. The `ID:` value is additionally cut at the first
/// whitespace so a separator glued onto the same line does not corrupt
/// it. When a label occurs more than once in the span, the last
/// occurrence wins. Parsing never fails; an unrecognisable span simply
/// yields an empty selection.
pub fn parse_selection(text: &str) -> BookSelection {
    let mut selection = BookSelection::default();

    for line in text.lines() {
        if let Some(value) = value_after(line, "ID:") {
            selection.id = value.split_whitespace().next().and_then(|v| v.parse().ok());
        } else if let Some(value) = value_after(line, "Title:") {
            selection.title = Some(value.to_string());
        } else if let Some(value) = value_after(line, "Author:") {
            selection.author = Some(value.to_string());
        } else if let Some(value) = value_after(line, "ISBN:") {
            selection.isbn = Some(value.to_string());
        } else if let Some(value) = value_after(line, "Quantity:") {
            selection.quantity = value.parse().ok();
        }
    }

    selection
}

/// Returns the trimmed text following the first occurrence of `label`.
fn value_after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.find(label).map(|at| line[at + label.len()..].trim())
}
