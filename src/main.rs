use std::io::{self, BufRead, Write};

use library_catalog::{
    CatalogVisualization, LibraryService, ReservationOutcome,
    observers::{MemberNotifier, OperationLogger},
};

// Prompt for one line; None when input is exhausted
fn prompt_line(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

// Prompt until a valid number is entered; None when input is exhausted
fn prompt_number(input: &mut impl BufRead, prompt: &str) -> io::Result<Option<u32>> {
    loop {
        let Some(line) = prompt_line(input, prompt)? else { return Ok(None) };
        match line.parse::<u32>() {
            Ok(value) => return Ok(Some(value)),
            Err(_) => println!("Invalid, please enter a valid number."),
        }
    }
}

// Menu 1: keep adding books until the user stops
fn add_books(service: &mut LibraryService, input: &mut impl BufRead) -> io::Result<()> {
    loop {
        let Some(title) = prompt_line(input, "Please enter the book name: ")? else {
            return Ok(());
        };
        let Some(author) = prompt_line(input, "Please enter the book author: ")? else {
            return Ok(());
        };

        let book = service.add_book(&title, &author);
        println!("Successfully added book '{}' by {}", book.title, book.author);

        println!("Would you like to add more books?");
        let more = loop {
            let Some(value) = prompt_number(input, "1. Yes / 2. No: ")? else { return Ok(()) };
            if value == 1 || value == 2 {
                break value;
            }
            println!("Invalid, please enter a valid number.");
        };
        if more == 2 {
            return Ok(());
        }
    }
}

// Menu 2: list the catalog, then borrow one book by identifier
fn borrow_book(service: &mut LibraryService, input: &mut impl BufRead) -> io::Result<()> {
    CatalogVisualization::print_catalog(service);

    let Some(id) = prompt_number(input, "Please enter the book ID you'd like to borrow: ")? else {
        return Ok(());
    };
    match service.borrow_book(id) {
        Ok(book) => println!("Book borrowed successfully: {}", book.title),
        Err(error) => println!("{error}"),
    }
    Ok(())
}

// Menu 3: put a member in line for a checked-out book
fn reserve_book(service: &mut LibraryService, input: &mut impl BufRead) -> io::Result<()> {
    if service.is_empty() {
        println!("The library is empty. No books available for reservation.");
        return Ok(());
    }
    CatalogVisualization::print_catalog(service);

    let Some(id) = prompt_number(input, "Please enter the book ID you'd like to reserve: ")?
    else {
        return Ok(());
    };
    let Some(member) = prompt_line(input, "Please enter your name: ")? else { return Ok(()) };

    match service.reserve_book(id, &member) {
        Ok(()) => println!("Book reserved for {member}"),
        Err(error) => println!("{error}"),
    }
    Ok(())
}

// Menu 4: put a checked-out book back on the shelf
fn return_book(service: &mut LibraryService, input: &mut impl BufRead) -> io::Result<()> {
    if service.is_empty() {
        println!("The library is empty. No books available for return.");
        return Ok(());
    }
    CatalogVisualization::print_catalog(service);

    let Some(id) = prompt_number(input, "Please enter the ID of the book you'd like to return: ")?
    else {
        return Ok(());
    };
    match service.return_book(id) {
        Ok(book) => println!("Book returned successfully: {}", book.title),
        Err(error) => println!("{error}"),
    }
    Ok(())
}

// Menu 5: listing plus current statistics and the waiting line
fn show_books(service: &LibraryService) {
    CatalogVisualization::print_catalog(service);
    CatalogVisualization::print_stats(service);
    println!("{}", CatalogVisualization::ledger_table(service));
}

// Menu 6: serve the oldest reservation
fn process_reservation(service: &mut LibraryService) {
    match service.process_next_reservation() {
        Ok(ReservationOutcome::Served { member_name, title }) => {
            println!("Reservation processed for {member_name} - Book: {title}");
        }
        Ok(ReservationOutcome::Stale) => println!("No reservation processed"),
        Err(error) => println!("{error}"),
    }
}

fn main() -> io::Result<()> {
    let mut service = LibraryService::new();

    // Wire up the stock observers so operations are logged and members get
    // their pickup notices
    service.register_observer(Box::new(OperationLogger));
    service.register_observer(Box::new(MemberNotifier));

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("Welcome to the Library!");
        println!("How may I help you?");
        println!("1. Add book");
        println!("2. Borrow book");
        println!("3. Reserve book");
        println!("4. Return book");
        println!("5. Show all books");
        println!("6. Process next reservation");
        println!("7. Exit");

        let Some(choice) = prompt_number(&mut input, "> ")? else { break };

        match choice {
            1 => add_books(&mut service, &mut input)?,
            2 => borrow_book(&mut service, &mut input)?,
            3 => reserve_book(&mut service, &mut input)?,
            4 => return_book(&mut service, &mut input)?,
            5 => show_books(&service),
            6 => process_reservation(&mut service),
            7 => {
                println!("Thank you for using the Library");
                break;
            }
            _ => println!("Invalid, please enter a valid number."),
        }
    }

    Ok(())
}
