use serde::{Deserialize, Serialize};

use crate::core::error::{Result, ShelfmarkError};

/// A single book record as stored in the catalog.
///
/// `id` is assigned by the catalog on insert and never changes afterwards.
/// The serde derives let records cross the front-end IPC boundary as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub quantity: i64,
}

/// Checks the field constraints shared by insert and update.
///
/// Title, author and ISBN must contain at least one non-whitespace
/// character; the quantity must be non-negative. The catalog is the
/// authority for these rules regardless of what a form already checked.
pub(crate) fn validate_fields(title: &str, author: &str, isbn: &str, quantity: i64) -> Result<()> {
    if title.trim().is_empty() {
        return Err(ShelfmarkError::ValidationFailed(
            "Title must not be empty".to_string(),
        ));
    }
    if author.trim().is_empty() {
        return Err(ShelfmarkError::ValidationFailed(
            "Author must not be empty".to_string(),
        ));
    }
    if isbn.trim().is_empty() {
        return Err(ShelfmarkError::ValidationFailed(
            "ISBN must not be empty".to_string(),
        ));
    }
    if quantity < 0 {
        return Err(ShelfmarkError::ValidationFailed(
            "Quantity must be a non-negative integer".to_string(),
        ));
    }
    Ok(())
}

/// Converts the quantity text of a form field into a stored quantity.
///
/// # Errors
///
/// Returns [`ShelfmarkError::ValidationFailed`] if the text is not an
/// integer or is negative.
pub fn parse_quantity(input: &str) -> Result<i64> {
    let quantity: i64 = input.trim().parse().map_err(|_| {
        ShelfmarkError::ValidationFailed("Quantity must be a non-negative integer".to_string())
    })?;
    if quantity < 0 {
        return Err(ShelfmarkError::ValidationFailed(
            "Quantity must be a non-negative integer".to_string(),
        ));
    }
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "978-0441013593".to_string(),
            quantity: 6,
        }
    }

    #[test]
    fn test_create_book() {
        let book = dune();
        assert_eq!(book.title, "Dune");
        assert_eq!(book.quantity, 6);
    }

    #[test]
    fn test_book_serializes_for_ipc() {
        let json = serde_json::to_string(&dune()).unwrap();
        assert!(json.contains("\"isbn\""));
        assert!(json.contains("978-0441013593"));
    }

    #[test]
    fn test_validate_accepts_zero_quantity() {
        assert!(validate_fields("Dune", "Frank Herbert", "978-0441013593", 0).is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(validate_fields("", "Frank Herbert", "x", 1).is_err());
        assert!(validate_fields("Dune", "   ", "x", 1).is_err());
        assert!(validate_fields("Dune", "Frank Herbert", "", 1).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_quantity() {
        let err = validate_fields("Dune", "Frank Herbert", "x", -1).unwrap_err();
        assert!(matches!(err, ShelfmarkError::ValidationFailed(_)));
    }

    #[test]
    fn test_parse_quantity_accepts_integers() {
        assert_eq!(parse_quantity("42").unwrap(), 42);
        assert_eq!(parse_quantity(" 0 ").unwrap(), 0);
    }

    #[test]
    fn test_parse_quantity_rejects_non_numeric() {
        assert!(matches!(
            parse_quantity("several").unwrap_err(),
            ShelfmarkError::ValidationFailed(_)
        ));
        assert!(parse_quantity("").is_err());
    }

    #[test]
    fn test_parse_quantity_rejects_negative() {
        assert!(parse_quantity("-1").is_err());
    }
}
