//! Catalog and loan flows through the service layer

use libmini::{
    config::AppConfig,
    models::{Book, Identity, Librarian, Member, Person},
    services::notify::{Channel, Notifier, NotifierFactory},
    AppError, AppState,
};

/// Fresh state with a librarian and the given ISBNs on the shelf
async fn setup(isbns: &[&str]) -> (AppState, Librarian) {
    let state = AppState::new(AppConfig::default()).expect("Failed to build state");
    let librarian = Librarian::appoint(
        Person::new("Unago C. Shege", "unagocshege@libmini.com").expect("Invalid person"),
    )
    .expect("Failed to appoint librarian");
    for isbn in isbns {
        state
            .services
            .catalog
            .add_book(&librarian, Book::new(format!("Book {}", isbn), "Author", *isbn))
            .await
            .expect("Failed to add book");
    }
    (state, librarian)
}

async fn register(state: &AppState, librarian: &Librarian, name: &str) -> Member {
    let person = Person::new(name, format!("{}@libmini.com", name.to_lowercase()))
        .expect("Invalid person");
    state
        .services
        .members
        .register(librarian, &person)
        .await
        .expect("Failed to register member")
}

#[tokio::test]
async fn test_available_books_track_availability() {
    let (state, librarian) = setup(&["A", "B", "C"]).await;
    let x = register(&state, &librarian, "X").await;
    let services = &state.services;

    services.loans.borrow("B", x.email()).await.unwrap();

    let available = services.catalog.available_books().await;
    let isbns: Vec<&str> = available.iter().map(|b| b.isbn()).collect();
    assert_eq!(isbns, vec!["A", "C"]);
    for book in services.catalog.catalog_by_isbn().await.values() {
        assert_eq!(book.is_available(), book.isbn() != "B");
    }
}

#[tokio::test]
async fn test_single_book_scenario() {
    let (state, librarian) = setup(&["A"]).await;
    let x = register(&state, &librarian, "X").await;
    let services = &state.services;

    services.loans.borrow("A", x.email()).await.unwrap();
    assert!(services.catalog.available_books().await.is_empty());
    let register = services.catalog.loan_register().await;
    assert_eq!(register.len(), 1);
    assert!(register["x@libmini.com"].contains("A"));

    services.loans.return_book("A", x.email()).await.unwrap();
    let available = services.catalog.available_books().await;
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].isbn(), "A");
    assert!(services.catalog.loan_register().await.is_empty());
    services.catalog.check_invariants().await.unwrap();
}

#[tokio::test]
async fn test_borrow_return_round_trip() {
    let (state, librarian) = setup(&["A", "B"]).await;
    let x = register(&state, &librarian, "X").await;
    let y = register(&state, &librarian, "Y").await;
    let services = &state.services;
    services.loans.borrow("B", y.email()).await.unwrap();

    let before = services.catalog.snapshot().await;
    services.loans.borrow("A", x.email()).await.unwrap();
    services.loans.return_book("A", x.email()).await.unwrap();
    assert_eq!(services.catalog.snapshot().await, before);
}

#[tokio::test]
async fn test_second_borrow_is_unavailable() {
    let (state, librarian) = setup(&["A"]).await;
    let x = register(&state, &librarian, "X").await;
    let y = register(&state, &librarian, "Y").await;
    let services = &state.services;

    services.loans.borrow("A", x.email()).await.unwrap();
    let before = services.catalog.snapshot().await;
    for member in [&x, &y] {
        let err = services.loans.borrow("A", member.email()).await.unwrap_err();
        assert!(matches!(err, AppError::BookUnavailable { .. }));
    }
    assert_eq!(services.catalog.snapshot().await, before);
}

#[tokio::test]
async fn test_return_not_borrowed() {
    let (state, librarian) = setup(&["A", "B"]).await;
    let x = register(&state, &librarian, "X").await;
    let y = register(&state, &librarian, "Y").await;
    let services = &state.services;

    let err = services.loans.return_book("B", y.email()).await.unwrap_err();
    assert!(matches!(err, AppError::NotBorrowed { .. }));

    services.loans.borrow("A", x.email()).await.unwrap();
    let before = services.catalog.snapshot().await;
    let err = services.loans.return_book("A", y.email()).await.unwrap_err();
    assert!(matches!(err, AppError::NotBorrowed { .. }));
    assert_eq!(services.catalog.snapshot().await, before);
}

#[tokio::test]
async fn test_unknown_isbn_not_found() {
    let (state, librarian) = setup(&["A"]).await;
    let x = register(&state, &librarian, "X").await;
    let services = &state.services;

    assert!(matches!(
        services.loans.borrow("123-45667890", x.email()).await,
        Err(AppError::BookNotFound(_))
    ));
    assert!(matches!(
        services.loans.return_book("123-45667890", x.email()).await,
        Err(AppError::BookNotFound(_))
    ));
}

#[tokio::test]
async fn test_register_librarian_rejected() {
    let (state, librarian) = setup(&[]).await;
    register(&state, &librarian, "X").await;
    let services = &state.services;

    let err = services
        .members
        .register(&librarian, librarian.person())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidRole(_)));
    assert_eq!(services.members.list().await.len(), 1);
}

#[tokio::test]
async fn test_register_returns_new_member_identity() {
    let (state, librarian) = setup(&[]).await;
    let person = Person::new("Salome Gabriel", "salomegabriel@libmini.com").unwrap();

    let member = state.services.members.register(&librarian, &person).await.unwrap();
    assert!(member.is_member());
    assert!(!person.is_member());
    assert_eq!(member.email(), person.email());
}

#[tokio::test]
async fn test_member_loans_are_isolated() {
    let (state, librarian) = setup(&["A", "B"]).await;
    let x = register(&state, &librarian, "X").await;
    let y = register(&state, &librarian, "Y").await;
    let services = &state.services;

    services.loans.borrow("A", x.email()).await.unwrap();
    services.loans.borrow("B", y.email()).await.unwrap();

    let x_loans = services.loans.member_loans(x.email()).await.unwrap();
    let y_loans = services.loans.member_loans(y.email()).await.unwrap();
    assert!(!x_loans.is_empty());
    assert_eq!(x_loans.books.iter().map(|b| b.isbn()).collect::<Vec<_>>(), vec!["A"]);
    assert_eq!(y_loans.books.iter().map(|b| b.isbn()).collect::<Vec<_>>(), vec!["B"]);
    assert!(x_loans.to_string().contains("Book A"));
    assert!(!x_loans.to_string().contains("Book B"));
}

#[tokio::test]
async fn test_revocation_policy() {
    let (state, librarian) = setup(&["A"]).await;
    let x = register(&state, &librarian, "X").await;
    let services = &state.services;

    services.loans.borrow("A", x.email()).await.unwrap();
    assert!(matches!(
        services.members.revoke(&librarian, x.email()).await,
        Err(AppError::MemberHasLoans { count: 1, .. })
    ));

    services.loans.return_book("A", x.email()).await.unwrap();
    assert!(services.loans.member_loans(x.email()).await.unwrap().is_empty());
    let revoked = services.members.revoke(&librarian, x.email()).await.unwrap();
    assert!(!revoked.is_member());
    assert!(!services.members.get(x.email()).await.unwrap().is_member());
    assert!(matches!(
        services.loans.borrow("A", x.email()).await,
        Err(AppError::MemberNotFound(_))
    ));
    services.catalog.check_invariants().await.unwrap();
}

#[tokio::test]
async fn test_invariants_after_mixed_sequence() {
    let (state, librarian) = setup(&["A", "B", "C", "D"]).await;
    let members = [
        register(&state, &librarian, "X").await,
        register(&state, &librarian, "Y").await,
        register(&state, &librarian, "Z").await,
    ];
    let services = &state.services;

    let ops: &[(bool, &str, usize)] = &[
        (true, "A", 0),
        (true, "B", 1),
        (true, "A", 2),
        (false, "A", 1),
        (true, "C", 0),
        (false, "A", 0),
        (true, "A", 2),
        (false, "B", 0),
        (true, "D", 1),
        (false, "C", 0),
        (true, "Q", 1),
    ];
    for &(is_borrow, isbn, who) in ops {
        let email = members[who].email();
        let _ = if is_borrow {
            services.loans.borrow(isbn, email).await
        } else {
            services.loans.return_book(isbn, email).await
        };
        services.catalog.check_invariants().await.unwrap();
    }

    let stats = services.catalog.stats().await;
    assert_eq!(stats.on_loan, 3);
    assert_eq!(stats.available, 1);
    let register = services.catalog.loan_register().await;
    assert!(register["z@libmini.com"].contains("A"));
    assert!(register["y@libmini.com"].contains("B"));
    assert!(register["y@libmini.com"].contains("D"));
    assert!(!register.contains_key("x@libmini.com"));
}

#[tokio::test]
async fn test_duplicate_isbn_rejected_by_default() {
    let (state, librarian) = setup(&["A"]).await;
    let err = state
        .services
        .catalog
        .add_book(&librarian, Book::new("Other", "Someone", "A"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::DuplicateIsbn(_)));
    assert_eq!(state.services.catalog.get_book("A").await.unwrap().title(), "Book A");
}

#[test]
fn test_factory_channels() {
    let factory = NotifierFactory::new();
    let upper = factory.create("EMAIL").unwrap();
    let lower = factory.create("email").unwrap();
    assert_eq!(upper.channel(), lower.channel());
    assert_eq!(
        upper.send("x@libmini.com", "Receipt").unwrap(),
        lower.send("x@libmini.com", "Receipt").unwrap()
    );
    assert_eq!(factory.create("sms").unwrap().channel(), Channel::Sms);
    assert!(matches!(
        factory.create("fax").err(),
        Some(AppError::UnknownChannel(_))
    ));
}

#[test]
fn test_receipts_use_default_channel() {
    let state = tokio_test::block_on(async { setup(&["A"]).await.0 });
    assert_eq!(state.services.receipts.channel(), Channel::Email);
    let book = Book::new("Dune", "Frank Herbert", "A");
    let delivery = state
        .services
        .receipts
        .borrow_receipt("x@libmini.com", &book)
        .unwrap();
    assert_eq!(delivery.channel, Channel::Email);
    assert_eq!(
        delivery.acknowledgment,
        "EMAIL sent to: x@libmini.com | Message: Receipt: You borrowed 'Dune' by 'Frank Herbert'"
    );
}
