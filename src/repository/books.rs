//! In-memory book store.
//!
//! The collection and its id counter live behind a single mutex, so every
//! check-then-mutate sequence (ISBN uniqueness + insert, existence + merge)
//! is one critical section. Ids are monotonically increasing and never
//! reused, even after a delete.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::{AppError, AppResult},
    models::book::{non_empty, Book, BookPatch, NewBook},
};

#[derive(Debug, Default)]
struct Shelf {
    books: Vec<Book>,
    next_id: u64,
}

/// Repository for book records
#[derive(Clone, Default)]
pub struct BooksRepository {
    shelf: Arc<Mutex<Shelf>>,
}

impl BooksRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Shelf>> {
        self.shelf
            .lock()
            .map_err(|_| AppError::Internal("book store lock poisoned".to_string()))
    }

    /// All books, in insertion order
    pub fn get_all_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.lock()?.books.clone())
    }

    /// Look up a book by its store-assigned id
    pub fn get_book_by_id(&self, id: u64) -> AppResult<Book> {
        self.lock()?
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Look up a book by ISBN
    pub fn get_book_by_isbn(&self, isbn: &str) -> AppResult<Option<Book>> {
        Ok(self.lock()?.books.iter().find(|b| b.isbn == isbn).cloned())
    }

    /// Whether any book other than `exclude_id` holds this ISBN
    pub fn isbn_exists(&self, isbn: &str, exclude_id: Option<u64>) -> AppResult<bool> {
        Ok(self
            .lock()?
            .books
            .iter()
            .any(|b| b.isbn == isbn && Some(b.id) != exclude_id))
    }

    /// Assign the next id and store the book. The ISBN uniqueness check runs
    /// again inside the lock so concurrent creates cannot race past the
    /// service-level validation.
    pub fn create_book(&self, new: NewBook) -> AppResult<Book> {
        let mut shelf = self.lock()?;
        if shelf.books.iter().any(|b| b.isbn == new.isbn) {
            return Err(AppError::Validation(format!(
                "A book with ISBN '{}' already exists",
                new.isbn
            )));
        }
        shelf.next_id += 1;
        let book = Book {
            id: shelf.next_id,
            title: new.title,
            author: new.author,
            isbn: new.isbn,
            price: new.price,
            quantity: new.quantity,
            genre: new.genre.and_then(non_empty),
            description: new.description.and_then(non_empty),
        };
        shelf.books.push(book.clone());
        Ok(book)
    }

    /// Merge a validated patch into the book with `id`. Existence and ISBN
    /// collision are checked under the same lock, before any field changes.
    pub fn update_book(&self, id: u64, patch: BookPatch) -> AppResult<Book> {
        let mut shelf = self.lock()?;
        let index = shelf
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        if let Some(ref isbn) = patch.isbn {
            if shelf.books.iter().any(|b| b.isbn == *isbn && b.id != id) {
                return Err(AppError::Validation(format!(
                    "A book with ISBN '{}' already exists",
                    isbn
                )));
            }
        }
        let book = &mut shelf.books[index];
        book.apply(patch);
        Ok(book.clone())
    }

    /// Remove and return the book with `id`
    pub fn delete_book(&self, id: u64) -> AppResult<Book> {
        let mut shelf = self.lock()?;
        let index = shelf
            .books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        Ok(shelf.books.remove(index))
    }
}
