//! Book (inventory entry) model and request types.
//!
//! Request bodies are deserialized leniently: every field is optional at the
//! JSON layer and `price`/`quantity` accept either JSON numbers or numeric
//! strings (the bundled front end submits form values as strings). The
//! inventory service validates the raw request into the strongly-typed
//! [`NewBook`] / [`BookPatch`] records before anything reaches the store.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A book held in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    /// Store-assigned identifier, immutable after creation
    pub id: u64,
    pub title: String,
    pub author: String,
    /// External edition identifier, unique across the live collection
    pub isbn: String,
    pub price: f64,
    pub quantity: u32,
    pub genre: Option<String>,
    pub description: Option<String>,
}

/// A numeric field as it arrives on the wire: a JSON number or a string
/// holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FormNumber {
    Number(f64),
    Text(String),
}

impl FormNumber {
    /// Coerce to a non-negative float. `field` names the field in the
    /// error message.
    pub fn as_price(&self, field: &str) -> Result<f64, String> {
        let value = match self {
            FormNumber::Number(n) => *n,
            FormNumber::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("{} must be a valid number, got '{}'", field, s))?,
        };
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{} must be a non-negative number, got {}", field, value));
        }
        Ok(value)
    }

    /// Coerce to a non-negative integer. `field` names the field in the
    /// error message.
    pub fn as_quantity(&self, field: &str) -> Result<u32, String> {
        match self {
            FormNumber::Number(n) => {
                if n.is_finite() && *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 {
                    Ok(*n as u32)
                } else {
                    Err(format!("{} must be a non-negative integer, got {}", field, n))
                }
            }
            FormNumber::Text(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("{} must be a valid non-negative integer, got '{}'", field, s)),
        }
    }
}

/// Raw create request body. All fields optional so that presence checks
/// produce specific validation messages instead of a deserialization
/// rejection.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<FormNumber>,
    #[schema(value_type = Option<String>)]
    pub quantity: Option<FormNumber>,
    pub genre: Option<String>,
    pub description: Option<String>,
}

/// Raw update request body; any subset of updatable fields
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<FormNumber>,
    #[schema(value_type = Option<String>)]
    pub quantity: Option<FormNumber>,
    pub genre: Option<String>,
    pub description: Option<String>,
}

/// A fully validated create request, ready for the store
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub price: f64,
    pub quantity: u32,
    pub genre: Option<String>,
    pub description: Option<String>,
}

/// A fully validated update; `None` leaves the field unchanged. For
/// `genre`/`description`, supplying an empty string clears the field.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub isbn: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
    pub genre: Option<String>,
    pub description: Option<String>,
}

impl Book {
    /// Merge a validated patch into this book. `id` is never touched.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(isbn) = patch.isbn {
            self.isbn = isbn;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(genre) = patch.genre {
            self.genre = non_empty(genre);
        }
        if let Some(description) = patch.description {
            self.description = non_empty(description);
        }
    }
}

/// Normalize optional text: trimmed-empty input becomes `None`
pub fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_accepts_number_and_string() {
        assert_eq!(FormNumber::Number(9.99).as_price("Price"), Ok(9.99));
        assert_eq!(
            FormNumber::Text("9.99".to_string()).as_price("Price"),
            Ok(9.99)
        );
        assert_eq!(FormNumber::Text(" 0 ".to_string()).as_price("Price"), Ok(0.0));
    }

    #[test]
    fn price_rejects_negative_and_garbage() {
        assert!(FormNumber::Number(-1.0).as_price("Price").is_err());
        let err = FormNumber::Text("cheap".to_string())
            .as_price("Price")
            .unwrap_err();
        assert!(err.contains("Price"));
        assert!(err.contains("cheap"));
    }

    #[test]
    fn quantity_accepts_integral_input() {
        assert_eq!(FormNumber::Number(5.0).as_quantity("Quantity"), Ok(5));
        assert_eq!(FormNumber::Text("5".to_string()).as_quantity("Quantity"), Ok(5));
    }

    #[test]
    fn quantity_rejects_fractional_negative_and_garbage() {
        assert!(FormNumber::Number(3.5).as_quantity("Quantity").is_err());
        assert!(FormNumber::Number(-2.0).as_quantity("Quantity").is_err());
        assert!(FormNumber::Text("-2".to_string()).as_quantity("Quantity").is_err());
        assert!(FormNumber::Text("many".to_string()).as_quantity("Quantity").is_err());
    }

    #[test]
    fn apply_merges_only_present_fields() {
        let mut book = Book {
            id: 1,
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            isbn: "111".to_string(),
            price: 9.99,
            quantity: 5,
            genre: Some("Sci-Fi".to_string()),
            description: None,
        };
        book.apply(BookPatch {
            quantity: Some(3),
            genre: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(book.quantity, 3);
        assert_eq!(book.genre, None);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.price, 9.99);
    }
}
