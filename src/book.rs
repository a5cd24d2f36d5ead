use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier a book is keyed by in the catalog
pub type BookId = u32;

/// A single book tracked by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Book {
    /// Catalog key, unique within the catalog
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Whether the book is on the shelf right now
    pub available: bool,
}

impl Book {
    /// Create a new book; every book starts out available
    #[must_use]
    pub fn new(id: BookId, title: &str, author: &str) -> Self {
        Self { id, title: title.to_string(), author: author.to_string(), available: true }
    }

    /// Get a human-readable description of the book's availability
    #[must_use]
    pub fn describe(&self) -> String {
        if self.available {
            format!("\"{}\" by {} is on the shelf", self.title, self.author)
        } else {
            format!("\"{}\" by {} is checked out", self.title, self.author)
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Book{{id={}, title='{}', author='{}', available={}}}",
            self.id, self.title, self.author, self.available
        )
    }
}
