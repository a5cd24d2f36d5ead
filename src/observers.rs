use crate::events::LibraryEvent;

/// Trait for operation observation
pub trait LibraryObserver {
    /// Called after the service completes a mutating operation
    fn on_event(&self, event: &LibraryEvent);
}

/// Logs every operation the service completes
#[derive(Debug)]
pub struct OperationLogger;

impl LibraryObserver for OperationLogger {
    fn on_event(&self, event: &LibraryEvent) {
        match event {
            LibraryEvent::Added { book_id, title } => {
                println!("LOGGER: Added book {book_id}: \"{title}\"");
            }
            LibraryEvent::Borrowed { book_id, title } => {
                println!("LOGGER: Borrowed book {book_id}: \"{title}\"");
            }
            LibraryEvent::Returned { book_id, title } => {
                println!("LOGGER: Returned book {book_id}: \"{title}\"");
            }
            LibraryEvent::Reserved { book_id, member_name } => {
                println!("LOGGER: Reserved book {book_id} for {member_name}");
            }
            LibraryEvent::ReservationServed { book_id, member_name, title } => {
                println!("LOGGER: Served reservation on book {book_id} (\"{title}\") for {member_name}");
            }
            LibraryEvent::ReservationDiscarded { book_id, member_name } => {
                println!("LOGGER: Dropped stale reservation on book {book_id} for {member_name}");
            }
        }
    }
}

/// Sends member-facing notices for reservation milestones
#[derive(Debug)]
pub struct MemberNotifier;

impl LibraryObserver for MemberNotifier {
    fn on_event(&self, event: &LibraryEvent) {
        match event {
            LibraryEvent::Reserved { member_name, .. } => {
                println!("NOTIFICATION: {member_name} joined the waiting line!");
            }
            LibraryEvent::ReservationServed { member_name, title, .. } => {
                println!("NOTIFICATION: {member_name}, \"{title}\" is ready for pickup!");
            }
            _ => {}
        }
    }
}
