//! In-process catalog manager for a library's book inventory.
//!
//! Books are indexed by numeric identifier in an ordered catalog, members
//! waiting for unavailable books queue up in a global first-in-first-out
//! reservation ledger, and a service coordinates the two through
//! borrow/return/reserve operations.

pub mod book;
pub mod catalog;
pub mod events;
pub mod ledger;
pub mod observers;
pub mod service;
pub mod visualization;

pub use book::{Book, BookId};
pub use catalog::OrderedCatalog;
pub use events::LibraryEvent;
pub use ledger::{ReservationEntry, ReservationLedger};
pub use service::{LibraryError, LibraryResult, LibraryService, ReservationOutcome};
pub use visualization::CatalogVisualization;
