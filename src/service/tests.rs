use std::{cell::RefCell, rc::Rc};

use crate::{
    events::LibraryEvent,
    observers::LibraryObserver,
    service::{LibraryError, LibraryService, ReservationOutcome},
};

/// Helper to set up a service with three books on the shelf
fn library_with_books() -> LibraryService {
    let mut service = LibraryService::new();
    service.add_book("Dune", "Herbert");
    service.add_book("Solaris", "Lem");
    service.add_book("Foundation", "Asimov");
    service
}

#[test]
fn test_ids_are_assigned_sequentially() {
    let mut service = LibraryService::new();

    let first = service.add_book("Dune", "Herbert");
    let second = service.add_book("Solaris", "Lem");

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
    assert!(first.available);
}

#[test]
fn test_list_all_is_ascending() {
    let service = library_with_books();

    let ids: Vec<u32> = service.list_all().map(|book| book.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(service.book_count(), 3);
    assert!(!service.is_empty());
}

#[test]
fn test_borrow_and_return_toggle() {
    let mut service = library_with_books();

    let borrowed = service.borrow_book(1);
    assert!(matches!(borrowed, Ok(ref book) if !book.available));

    let again = service.borrow_book(1);
    assert_eq!(again, Err(LibraryError::AlreadyBorrowed { book_id: 1 }));

    let returned = service.return_book(1);
    assert!(matches!(returned, Ok(ref book) if book.available));

    let again = service.return_book(1);
    assert_eq!(again, Err(LibraryError::AlreadyAvailable { book_id: 1 }));
}

#[test]
fn test_borrow_missing_book() {
    let mut service = LibraryService::new();
    assert_eq!(service.borrow_book(99), Err(LibraryError::NotFound { book_id: 99 }));
}

#[test]
fn test_reserve_available_book_is_refused() {
    let mut service = library_with_books();

    assert_eq!(
        service.reserve_book(1, "Carol"),
        Err(LibraryError::NoReservationNeeded { book_id: 1 })
    );
    assert_eq!(service.pending_reservations(), 0);
}

#[test]
fn test_reserve_missing_book() {
    let mut service = library_with_books();
    assert_eq!(service.reserve_book(42, "Carol"), Err(LibraryError::NotFound { book_id: 42 }));
}

#[test]
fn test_reservation_lifecycle() {
    let mut service = LibraryService::new();

    let book = service.add_book("Dune", "Herbert");
    assert_eq!(book.id, 1);
    assert!(book.available);

    let borrowed = service.borrow_book(1);
    assert!(matches!(borrowed, Ok(ref b) if !b.available));

    assert_eq!(service.reserve_book(1, "Carol"), Ok(()));
    assert_eq!(service.pending_reservations(), 1);

    let outcome = service.process_next_reservation();
    assert_eq!(
        outcome,
        Ok(ReservationOutcome::Served {
            member_name: "Carol".to_string(),
            title: "Dune".to_string(),
        })
    );
    assert!(matches!(service.list_all().next(), Some(b) if b.available));

    // The ledger is drained now
    assert_eq!(service.process_next_reservation(), Err(LibraryError::EmptyLedger));
}

#[test]
fn test_reservations_are_served_in_fifo_order() {
    let mut service = library_with_books();
    drop(service.borrow_book(1));
    drop(service.borrow_book(2));
    drop(service.reserve_book(1, "Alice"));
    drop(service.reserve_book(2, "Bob"));

    let first = service.process_next_reservation();
    assert!(
        matches!(first, Ok(ReservationOutcome::Served { ref member_name, .. }) if member_name == "Alice")
    );

    let second = service.process_next_reservation();
    assert!(
        matches!(second, Ok(ReservationOutcome::Served { ref member_name, .. }) if member_name == "Bob")
    );
}

#[test]
fn test_stale_reservation_is_discarded() {
    let mut service = library_with_books();
    drop(service.borrow_book(1));
    drop(service.reserve_book(1, "Carol"));

    // The book comes back before the ledger is processed, so the entry no
    // longer has anything to serve
    drop(service.return_book(1));

    assert_eq!(service.process_next_reservation(), Ok(ReservationOutcome::Stale));
    assert!(matches!(service.list_all().next(), Some(book) if book.available));
    assert_eq!(service.pending_reservations(), 0);
}

/// Records every event it sees, for asserting on notification flow
struct RecordingObserver {
    /// Shared log of observed events
    seen: Rc<RefCell<Vec<LibraryEvent>>>,
}

impl LibraryObserver for RecordingObserver {
    fn on_event(&self, event: &LibraryEvent) {
        self.seen.borrow_mut().push(event.clone());
    }
}

#[test]
fn test_observers_see_completed_operations() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut service = LibraryService::new();
    service.register_observer(Box::new(RecordingObserver { seen: Rc::clone(&seen) }));

    service.add_book("Dune", "Herbert");
    drop(service.borrow_book(1));

    let events = seen.borrow();
    assert_eq!(events.len(), 2);
    assert!(matches!(events.first(), Some(LibraryEvent::Added { book_id: 1, .. })));
    assert!(matches!(events.get(1), Some(LibraryEvent::Borrowed { book_id: 1, .. })));
}

#[test]
fn test_failed_operations_do_not_notify() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut service = LibraryService::new();
    service.register_observer(Box::new(RecordingObserver { seen: Rc::clone(&seen) }));

    drop(service.borrow_book(99));

    assert!(seen.borrow().is_empty());
}
