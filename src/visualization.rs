use std::{fs::File, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    book::Book, catalog::CatalogNode, ledger::ReservationEntry, service::LibraryService,
};

/// Flat, serializable picture of the whole library at one moment
#[derive(Debug, Deserialize, Serialize)]
struct LibrarySnapshot {
    /// Every book, ascending by identifier
    books: Vec<Book>,
    /// Waiting reservations, oldest first
    reservations: Vec<ReservationEntry>,
}

/// Rendering tools for the catalog and the ledger
#[derive(Debug)]
pub struct CatalogVisualization;

impl CatalogVisualization {
    /// Print every book in ascending identifier order
    pub fn print_catalog(service: &LibraryService) {
        println!("All books in the library:");
        if service.is_empty() {
            println!("  (the catalog is empty)");
            return;
        }
        for book in service.list_all() {
            println!("  {book}");
        }
    }

    /// Generate a DOT graph representation of the catalog tree.
    ///
    /// Every book is one node: available books are filled palegreen,
    /// checked-out books lightcoral. Edges are labeled `L` and `R` for the
    /// left and right subtrees.
    #[must_use]
    pub fn generate_dot(service: &LibraryService) -> String {
        let mut dot = String::from("digraph catalog {\n");
        dot.push_str("  node [shape=box, style=filled];\n");
        Self::dot_subtree(service.catalog().root_node(), &mut dot);
        dot.push_str("}\n");
        dot
    }

    /// Append DOT lines for `node` and everything below it
    fn dot_subtree(node: Option<&CatalogNode>, dot: &mut String) {
        let Some(node) = node else { return };
        let book = node.book();
        let fill = if book.available { "palegreen" } else { "lightcoral" };

        // Escape quotes so titles cannot break out of the label
        let title = book.title.replace('"', "\\\"");
        dot.push_str(&format!("  b{} [label=\"{}: {title}\", fillcolor={fill}];\n", book.id, book.id));

        if let Some(left) = node.left() {
            dot.push_str(&format!("  b{} -> b{} [label=\"L\"];\n", book.id, left.book().id));
            Self::dot_subtree(Some(left), dot);
        }
        if let Some(right) = node.right() {
            dot.push_str(&format!("  b{} -> b{} [label=\"R\"];\n", book.id, right.book().id));
            Self::dot_subtree(Some(right), dot);
        }
    }

    /// Save the DOT representation to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to
    pub fn save_dot_to_file(dot: &str, filename: &str) -> Result<(), std::io::Error> {
        let path = Path::new(filename);
        let mut file = File::create(path)?;
        file.write_all(dot.as_bytes())?;
        Ok(())
    }

    /// Generate a markdown table of the waiting line, oldest entry first
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn ledger_table(service: &LibraryService) -> String {
        if service.pending_reservations() == 0 {
            return "No reservations waiting.".to_string();
        }

        let mut table = String::from("| # | Book | Member |\n");
        table.push_str("|---|------|--------|\n");

        for (i, entry) in service.ledger().iter().enumerate() {
            table.push_str(&format!("| {} | {} | {} |\n", i + 1, entry.book_id, entry.member_name));
        }

        table
    }

    /// Print a summary of catalog and ledger statistics
    pub fn print_stats(service: &LibraryService) {
        let available = service.list_all().filter(|book| book.available).count();

        println!("=== Library Statistics ===");
        println!("Total books: {}", service.book_count());
        println!("On the shelf: {available}");
        println!("Pending reservations: {}", service.pending_reservations());
    }

    /// Serialize the current catalog and ledger to pretty-printed JSON.
    ///
    /// The tree is flattened to its in-order listing first; the snapshot is
    /// a picture for the caller to render or ship elsewhere, not a
    /// persistence format.
    ///
    /// # Errors
    ///
    /// Returns a `serde_json::Error` if serialization fails
    pub fn snapshot_json(service: &LibraryService) -> Result<String, serde_json::Error> {
        let snapshot = LibrarySnapshot {
            books: service.list_all().cloned().collect(),
            reservations: service.ledger().iter().cloned().collect(),
        };
        serde_json::to_string_pretty(&snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogVisualization;
    use crate::service::LibraryService;

    /// Helper building a library with one shelved and one borrowed book
    fn sample_library() -> LibraryService {
        let mut service = LibraryService::new();
        service.add_book("Dune", "Herbert");
        service.add_book("Solaris", "Lem");
        drop(service.borrow_book(2));
        service
    }

    #[test]
    fn test_dot_colors_track_availability() {
        let service = sample_library();
        let dot = CatalogVisualization::generate_dot(&service);

        assert!(dot.contains("b1 [label=\"1: Dune\", fillcolor=palegreen]"));
        assert!(dot.contains("b2 [label=\"2: Solaris\", fillcolor=lightcoral]"));
        assert!(dot.contains("b1 -> b2 [label=\"R\"]"));
    }

    #[test]
    fn test_ledger_table_lists_waiting_members() {
        let mut service = sample_library();
        drop(service.reserve_book(2, "Carol"));

        let table = CatalogVisualization::ledger_table(&service);
        assert!(table.contains("| 1 | 2 | Carol |"));
    }

    #[test]
    fn test_ledger_table_reports_empty_line() {
        let service = sample_library();
        assert_eq!(CatalogVisualization::ledger_table(&service), "No reservations waiting.");
    }

    #[test]
    #[allow(clippy::expect_used)]
    fn test_snapshot_names_books_and_members() {
        let mut service = sample_library();
        drop(service.reserve_book(2, "Carol"));

        let json = CatalogVisualization::snapshot_json(&service).expect("snapshot should serialize");
        assert!(json.contains("\"Dune\""));
        assert!(json.contains("\"Carol\""));
    }
}
