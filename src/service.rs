use std::fmt;

use crate::{
    book::{Book, BookId},
    catalog::OrderedCatalog,
    events::LibraryEvent,
    ledger::ReservationLedger,
    observers::LibraryObserver,
};

/// Custom error type for library operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryError {
    /// No book with the requested identifier exists in the catalog
    NotFound {
        /// The identifier that was looked up
        book_id: BookId,
    },
    /// The book is already checked out
    AlreadyBorrowed {
        /// Identifier of the checked-out book
        book_id: BookId,
    },
    /// The book is already on the shelf
    AlreadyAvailable {
        /// Identifier of the shelved book
        book_id: BookId,
    },
    /// The book is available right now, so there is nothing to wait for
    NoReservationNeeded {
        /// Identifier of the available book
        book_id: BookId,
    },
    /// No reservations are waiting in the ledger
    EmptyLedger,
}

impl std::error::Error for LibraryError {}

impl fmt::Display for LibraryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { book_id } => write!(f, "No book with id {book_id} in the catalog"),
            Self::AlreadyBorrowed { book_id } => write!(f, "Book {book_id} is already checked out"),
            Self::AlreadyAvailable { book_id } => {
                write!(f, "Book {book_id} is already on the shelf")
            }
            Self::NoReservationNeeded { book_id } => {
                write!(f, "Book {book_id} is available, no need to reserve")
            }
            Self::EmptyLedger => write!(f, "No reservations in queue"),
        }
    }
}

/// A specialized Result type for library operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// What processing the oldest reservation accomplished
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReservationOutcome {
    /// The entry was served: the book is available again for the member
    Served {
        /// Name of the member served
        member_name: String,
        /// Title of the book served
        title: String,
    },
    /// The entry was stale (its book was back on the shelf, or gone) and
    /// was dropped without touching the catalog
    Stale,
}

/// Coordinates the ordered catalog and the reservation ledger.
///
/// All mutation goes through `&mut self`: the service assumes one caller at
/// a time and carries no locking of its own. Callers wanting multi-actor
/// access must wrap the whole service in their own synchronization.
pub struct LibraryService {
    /// Ordered index of every book
    catalog: OrderedCatalog,
    /// Waiting line of reservations, oldest first
    ledger: ReservationLedger,
    /// Identifier handed to the next added book
    next_id: BookId,
    /// Registered operation observers
    observers: Vec<Box<dyn LibraryObserver>>,
}

// Manual implementation of Debug for LibraryService
impl fmt::Debug for LibraryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LibraryService")
            .field("catalog", &self.catalog)
            .field("ledger", &self.ledger)
            .field("next_id", &self.next_id)
            .field("observers_count", &self.observers.len())
            .finish()
    }
}

impl Default for LibraryService {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryService {
    /// Create a service with an empty catalog and ledger
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: OrderedCatalog::new(),
            ledger: ReservationLedger::new(),
            next_id: 1,
            observers: Vec::new(),
        }
    }

    /// Register an observer to be notified of completed operations
    pub fn register_observer(&mut self, observer: Box<dyn LibraryObserver>) {
        self.observers.push(observer);
    }

    /// Notify every registered observer of `event`
    fn notify(&self, event: &LibraryEvent) {
        for observer in &self.observers {
            observer.on_event(event);
        }
    }

    /// Add a book to the catalog and return a snapshot of the new record.
    ///
    /// Identifiers are assigned sequentially starting at 1, and every book
    /// starts out available. Adding always succeeds.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn add_book(&mut self, title: &str, author: &str) -> Book {
        let book = Book::new(self.next_id, title, author);
        self.next_id += 1;
        self.catalog.insert(book.clone());
        self.notify(&LibraryEvent::Added { book_id: book.id, title: book.title.clone() });
        book
    }

    /// Check a book out.
    ///
    /// The reservation ledger is not consulted: borrowing only flips the
    /// availability flag.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if no book has this identifier and
    /// `LibraryError::AlreadyBorrowed` if it is already checked out.
    pub fn borrow_book(&mut self, id: BookId) -> LibraryResult<Book> {
        let book = self.catalog.find_mut(id).ok_or(LibraryError::NotFound { book_id: id })?;
        if !book.available {
            return Err(LibraryError::AlreadyBorrowed { book_id: id });
        }
        book.available = false;
        let snapshot = book.clone();
        self.notify(&LibraryEvent::Borrowed { book_id: id, title: snapshot.title.clone() });
        Ok(snapshot)
    }

    /// Put a checked-out book back on the shelf.
    ///
    /// Returning never serves the ledger by itself; pending reservations
    /// are only handed out through `process_next_reservation`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if no book has this identifier and
    /// `LibraryError::AlreadyAvailable` if it was never checked out.
    pub fn return_book(&mut self, id: BookId) -> LibraryResult<Book> {
        let book = self.catalog.find_mut(id).ok_or(LibraryError::NotFound { book_id: id })?;
        if book.available {
            return Err(LibraryError::AlreadyAvailable { book_id: id });
        }
        book.available = true;
        let snapshot = book.clone();
        self.notify(&LibraryEvent::Returned { book_id: id, title: snapshot.title.clone() });
        Ok(snapshot)
    }

    /// Put a member in line for a checked-out book.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if no book has this identifier and
    /// `LibraryError::NoReservationNeeded` if the book is on the shelf — an
    /// available book cannot be waited for.
    pub fn reserve_book(&mut self, id: BookId, member_name: &str) -> LibraryResult<()> {
        let book = self.catalog.find(id).ok_or(LibraryError::NotFound { book_id: id })?;
        if book.available {
            return Err(LibraryError::NoReservationNeeded { book_id: id });
        }
        self.ledger.enqueue(id, member_name);
        self.notify(&LibraryEvent::Reserved { book_id: id, member_name: member_name.to_string() });
        Ok(())
    }

    /// Serve the oldest reservation in the ledger.
    ///
    /// The dequeued entry is checked against the catalog: when its book is
    /// still checked out, the book is made available for the waiting member
    /// and the outcome names who got what. When the entry is stale — the
    /// book was returned in the meantime, or no longer exists — it is
    /// dropped without touching the catalog and the outcome is
    /// `ReservationOutcome::Stale`. A stale entry is never an error and is
    /// never re-queued.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::EmptyLedger` when nothing is waiting.
    pub fn process_next_reservation(&mut self) -> LibraryResult<ReservationOutcome> {
        let entry = self.ledger.dequeue().ok_or(LibraryError::EmptyLedger)?;
        let served_title = match self.catalog.find_mut(entry.book_id) {
            Some(book) if !book.available => {
                book.available = true;
                Some(book.title.clone())
            }
            _ => None,
        };
        match served_title {
            Some(title) => {
                self.notify(&LibraryEvent::ReservationServed {
                    book_id: entry.book_id,
                    member_name: entry.member_name.clone(),
                    title: title.clone(),
                });
                Ok(ReservationOutcome::Served { member_name: entry.member_name, title })
            }
            None => {
                self.notify(&LibraryEvent::ReservationDiscarded {
                    book_id: entry.book_id,
                    member_name: entry.member_name.clone(),
                });
                Ok(ReservationOutcome::Stale)
            }
        }
    }

    /// Iterate over every book in ascending identifier order
    pub fn list_all(&self) -> impl Iterator<Item = &Book> {
        self.catalog.iter()
    }

    /// True when the catalog holds no books
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Number of books in the catalog
    #[must_use]
    pub fn book_count(&self) -> usize {
        self.catalog.len()
    }

    /// Number of reservations waiting in the ledger
    #[must_use]
    pub fn pending_reservations(&self) -> usize {
        self.ledger.len()
    }

    /// The ordered catalog, exposed for structural rendering
    pub(crate) fn catalog(&self) -> &OrderedCatalog {
        &self.catalog
    }

    /// The reservation ledger, exposed for rendering the waiting line
    pub(crate) fn ledger(&self) -> &ReservationLedger {
        &self.ledger
    }
}

// Include tests module
#[cfg(test)]
mod tests;
