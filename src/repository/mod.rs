//! Repository layer owning the in-memory data store

pub mod books;

/// Main repository struct holding the in-memory stores
#[derive(Clone, Default)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with an empty book store
    pub fn new() -> Self {
        Self {
            books: books::BooksRepository::new(),
        }
    }
}
