//! Libmini demo driver
//!
//! Seeds a catalog, registers a few members and walks through the borrow and
//! return flows, sending receipts along the way.

use rand::seq::SliceRandom;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use libmini::{
    config::AppConfig,
    models::{Book, Identity, Librarian, Person},
    services::{notify::NotifierFactory, receipts::ReceiptService},
    AppState,
};

const COHORT: &[(&str, &str)] = &[
    ("Alasoluyi Oyinlola", "alasoluyioyinlola@libmini.com"),
    ("Hezekiah Ajayi-Omoleye", "hezekiahajayi-omoleye@libmini.com"),
    ("Salome Gabriel", "salomegabriel@libmini.com"),
    ("Adepitan Gbenga", "adepitangbenga@libmini.com"),
    ("Marvelous Oluwasina", "marvelousoluwasina@libmini.com"),
    ("Alli Fesomade", "allifesomade@libmini.com"),
    ("Unago C. Shege", "unagocshege@libmini.com"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("libmini={}", config.logging.level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Libmini demo v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::new(config)?;
    let services = &state.services;
    tracing::info!("Borrow receipts go out over {}", services.receipts.channel());

    let mut persons = COHORT
        .iter()
        .map(|(name, email)| Person::new(*name, *email))
        .collect::<Result<Vec<_>, _>>()?;
    let librarian = match persons.pop() {
        Some(person) => Librarian::appoint(person)?,
        None => anyhow::bail!("no persons to appoint as librarian"),
    };
    println!("Librarian appointed: {} <{}>", librarian.name(), librarian.email());

    let books = [
        Book::new("Anifowoshe The Aeroplane Stopper", "K1 De Ultimate", "978-0134853987"),
        Book::new("How to Buy a Yacht With 2 Dollars", "Yu Krim Inahl", "978-0123456789"),
        Book::new("Getting Married With Forty Naira", "O.T Law", "978-0132350884"),
    ];
    for book in &books {
        services.catalog.add_book(&librarian, book.clone()).await?;
        println!("Added to catalog: {}", book);
    }

    let mut members = Vec::new();
    for person in persons.choose_multiple(&mut rand::thread_rng(), 3) {
        let member = services.members.register(&librarian, person).await?;
        println!("Member registered: {}", member.name());
        members.push(member);
    }
    let [m1, m2, m3] = members.as_slice() else {
        anyhow::bail!("expected three registered members");
    };

    let sms_receipts = ReceiptService::new(NotifierFactory::new().create("sms")?.into());

    println!("\n== Borrowing ==");
    let attempts = [
        (books[0].isbn(), m1),
        (books[1].isbn(), m2),
        (books[1].isbn(), m3),
        ("123-45667890", m3),
    ];
    for (isbn, member) in attempts {
        match services.loans.borrow(isbn, member.email()).await {
            Ok(book) => {
                let delivery = services.receipts.borrow_receipt(member.email(), &book)?;
                println!("{}", delivery.acknowledgment);
            }
            Err(e) => println!("Borrow failed: {}", e),
        }
    }
    for member in [m1, m2, m3] {
        println!(" - {}", services.loans.member_loans(member.email()).await?);
    }
    println!(
        "Loan register: {}",
        serde_json::to_string_pretty(&services.catalog.loan_register().await)?
    );

    println!("\n== Returning ==");
    let returns = [(books[0].isbn(), m1), (books[1].isbn(), m2), (books[1].isbn(), m3)];
    for (isbn, member) in returns {
        match services.loans.return_book(isbn, member.email()).await {
            Ok(book) => {
                let delivery = sms_receipts.return_receipt(member.email(), &book)?;
                println!("{}", delivery.acknowledgment);
            }
            Err(e) => println!("Return failed: {}", e),
        }
    }
    for member in [m1, m2, m3] {
        let loans = services.loans.member_loans(member.email()).await?;
        if !loans.is_empty() {
            println!("Still on loan after returns:");
        }
        println!(" - {}", loans);
    }

    services.catalog.check_invariants().await?;

    println!("\nAvailable books:");
    for book in services.catalog.available_books().await {
        println!(" - {}", book);
    }
    println!(
        "\nCatalog snapshot:\n{}",
        serde_json::to_string_pretty(&services.catalog.snapshot().await)?
    );

    Ok(())
}
