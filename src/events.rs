use serde::{Deserialize, Serialize};

use crate::book::BookId;

/// Notifications emitted by the service after a completed operation.
///
/// Events describe what already happened; they carry owned data rather than
/// references into the catalog, so observers can hold onto them freely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum LibraryEvent {
    /// A book entered the catalog
    Added {
        /// Identifier assigned to the new book
        book_id: BookId,
        /// Title of the new book
        title: String,
    },
    /// A book was checked out
    Borrowed {
        /// Identifier of the borrowed book
        book_id: BookId,
        /// Title of the borrowed book
        title: String,
    },
    /// A book came back to the shelf
    Returned {
        /// Identifier of the returned book
        book_id: BookId,
        /// Title of the returned book
        title: String,
    },
    /// A member joined the waiting line for a checked-out book
    Reserved {
        /// Identifier of the reserved book
        book_id: BookId,
        /// Name of the waiting member
        member_name: String,
    },
    /// The oldest reservation was served: the book is back on the shelf
    /// with the member's name on it
    ReservationServed {
        /// Identifier of the reserved book
        book_id: BookId,
        /// Name of the member served
        member_name: String,
        /// Title of the book served
        title: String,
    },
    /// The oldest reservation referenced a book that no longer needed it
    /// and was dropped without touching the catalog
    ReservationDiscarded {
        /// Identifier the stale entry referenced
        book_id: BookId,
        /// Name of the member whose entry was dropped
        member_name: String,
    },
}
