//! Inventory management service.
//!
//! Validates raw request bodies into typed records and delegates to the
//! book store. Validation runs in a fixed order: required-field presence,
//! numeric coercion, then existence and ISBN-uniqueness checks (the last
//! two inside the store's critical section). All validation happens before
//! any mutation, so a rejected request never leaves a partial write.

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookPatch, CreateBook, NewBook, UpdateBook},
    repository::Repository,
};

#[derive(Clone)]
pub struct InventoryService {
    repository: Repository,
}

impl InventoryService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// All books, in insertion order
    pub fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.get_all_books()
    }

    /// Get a book by id
    pub fn get_book(&self, id: u64) -> AppResult<Book> {
        self.repository.books.get_book_by_id(id)
    }

    /// Validate and create a new book
    pub fn create_book(&self, request: CreateBook) -> AppResult<Book> {
        let title = required_text("Title", request.title)?;
        let author = required_text("Author", request.author)?;
        let isbn = required_text("ISBN", request.isbn)?;
        let price = request
            .price
            .ok_or_else(|| AppError::Validation("Price is required".to_string()))?
            .as_price("Price")
            .map_err(AppError::Validation)?;
        let quantity = request
            .quantity
            .ok_or_else(|| AppError::Validation("Quantity is required".to_string()))?
            .as_quantity("Quantity")
            .map_err(AppError::Validation)?;

        let created = self.repository.books.create_book(NewBook {
            title,
            author,
            isbn,
            price,
            quantity,
            genre: request.genre,
            description: request.description,
        })?;
        tracing::info!("Created book id={} isbn={}", created.id, created.isbn);
        Ok(created)
    }

    /// Validate and apply a partial update to an existing book
    pub fn update_book(&self, id: u64, request: UpdateBook) -> AppResult<Book> {
        let mut patch = BookPatch {
            genre: request.genre,
            description: request.description,
            ..Default::default()
        };
        // Supplied text fields must still be non-empty; the stored record
        // always keeps all required attributes populated.
        if let Some(title) = request.title {
            patch.title = Some(supplied_text("Title", title)?);
        }
        if let Some(author) = request.author {
            patch.author = Some(supplied_text("Author", author)?);
        }
        if let Some(isbn) = request.isbn {
            patch.isbn = Some(supplied_text("ISBN", isbn)?);
        }
        if let Some(price) = request.price {
            patch.price = Some(price.as_price("Price").map_err(AppError::Validation)?);
        }
        if let Some(quantity) = request.quantity {
            patch.quantity = Some(
                quantity
                    .as_quantity("Quantity")
                    .map_err(AppError::Validation)?,
            );
        }

        let updated = self.repository.books.update_book(id, patch)?;
        tracing::info!("Updated book id={}", updated.id);
        Ok(updated)
    }

    /// Delete a book by id
    pub fn delete_book(&self, id: u64) -> AppResult<Book> {
        let removed = self.repository.books.delete_book(id)?;
        tracing::info!("Deleted book id={} isbn={}", removed.id, removed.isbn);
        Ok(removed)
    }
}

fn required_text(field: &str, value: Option<String>) -> AppResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!(
            "{} is required and cannot be empty",
            field
        ))),
    }
}

fn supplied_text(field: &str, value: String) -> AppResult<String> {
    if value.trim().is_empty() {
        Err(AppError::Validation(format!("{} cannot be empty", field)))
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::book::FormNumber;

    fn service() -> InventoryService {
        InventoryService::new(Repository::new())
    }

    fn dune() -> CreateBook {
        CreateBook {
            title: Some("Dune".to_string()),
            author: Some("Herbert".to_string()),
            isbn: Some("111".to_string()),
            price: Some(FormNumber::Text("9.99".to_string())),
            quantity: Some(FormNumber::Text("5".to_string())),
            genre: None,
            description: None,
        }
    }

    #[test]
    fn create_coerces_string_numbers() {
        let svc = service();
        let book = svc.create_book(dune()).unwrap();
        assert_eq!(book.id, 1);
        assert_eq!(book.price, 9.99);
        assert_eq!(book.quantity, 5);
    }

    #[test]
    fn create_rejects_missing_title() {
        let svc = service();
        let err = svc
            .create_book(CreateBook {
                title: None,
                ..dune()
            })
            .unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("Title")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.list_books().unwrap().is_empty());
    }

    #[test]
    fn create_rejects_blank_isbn() {
        let svc = service();
        let err = svc
            .create_book(CreateBook {
                isbn: Some("  ".to_string()),
                ..dune()
            })
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn create_rejects_non_numeric_price_before_store() {
        let svc = service();
        let err = svc
            .create_book(CreateBook {
                price: Some(FormNumber::Text("free".to_string())),
                ..dune()
            })
            .unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("'free'")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(svc.list_books().unwrap().is_empty());
    }

    #[test]
    fn update_with_bad_quantity_leaves_book_unchanged() {
        let svc = service();
        let book = svc.create_book(dune()).unwrap();
        let err = svc
            .update_book(
                book.id,
                UpdateBook {
                    quantity: Some(FormNumber::Text("many".to_string())),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(svc.get_book(book.id).unwrap(), book);
    }

    #[test]
    fn update_rejects_blank_isbn() {
        let svc = service();
        let book = svc.create_book(dune()).unwrap();
        let err = svc
            .update_book(
                book.id,
                UpdateBook {
                    isbn: Some(String::new()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(svc.get_book(book.id).unwrap().isbn, "111");
    }

    #[test]
    fn bad_quantity_on_missing_book_fails_validation_first() {
        // Coercion runs before the existence check, so the error is 400
        // material even though the id is unknown.
        let svc = service();
        let err = svc
            .update_book(
                999,
                UpdateBook {
                    quantity: Some(FormNumber::Text("many".to_string())),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn identical_updates_are_idempotent() {
        let svc = service();
        let book = svc.create_book(dune()).unwrap();
        let patch = UpdateBook {
            quantity: Some(FormNumber::Text("3".to_string())),
            ..Default::default()
        };
        let first = svc.update_book(book.id, patch.clone()).unwrap();
        let second = svc.update_book(book.id, patch).unwrap();
        assert_eq!(first, second);
        assert_eq!(second.quantity, 3);
        assert_eq!(second.title, "Dune");
    }
}
