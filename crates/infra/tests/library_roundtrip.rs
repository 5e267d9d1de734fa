//! End-to-end flows through the `Library` facade against a temporary directory.

use std::path::Path;

use libris_core::DomainError;
use libris_infra::{InfraError, Library, LibraryConfig};
use libris_inventory::{ReturnOutcome, SearchField};

const BOOKS_CSV: &str = "\
isbn,title,author,weight_kg,value_cop
978-0132350884,Clean Code,Robert C. Martin,1.2,150000
978-0201616224,The Pragmatic Programmer,Andrew Hunt,0.8,120000
978-0596007126,Head First Design Patterns,Eric Freeman,0.5,90000
978-0262033848,Introduction to Algorithms,Thomas H. Cormen,2.5,300000
978-0321125217,Domain-Driven Design,Eric Evans,4.5,200000
978-0201633610,Design Patterns,Erich Gamma,3.0,180000
978-0134494166,Clean Architecture,Robert C. Martin,1.0,140000
978-0137081073,The Clean Coder,Robert C. Martin,1.5,110000
";

fn config_in(root: &Path) -> LibraryConfig {
    let config = LibraryConfig::rooted_at(&root.join("data"), &root.join("reports"));
    std::fs::create_dir_all(&config.data_dir).unwrap();
    std::fs::write(&config.inventory_file, BOOKS_CSV).unwrap();
    config
}

#[test]
fn open_loads_inventory_into_both_views() {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::open(config_in(dir.path())).unwrap();
    let manager = library.manager();

    assert_eq!(manager.len(), 8);
    assert_eq!(manager.ordered_inventory().len(), 8);
    assert!(manager.views_consistent());
    assert!(manager.loan_history().is_empty());
    assert!(manager.reservations().is_empty());

    let design = manager.search("design", SearchField::Title);
    assert_eq!(design.len(), 3);
    assert_eq!(
        manager.find_book("978-0262033848").unwrap().title(),
        "Introduction to Algorithms"
    );
}

#[test]
fn open_with_nothing_on_disk_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = LibraryConfig::rooted_at(&dir.path().join("data"), &dir.path().join("reports"));
    let library = Library::open(config).unwrap();
    assert!(library.manager().is_empty());
}

#[test]
fn ledgers_survive_save_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());

    let mut library = Library::open(config.clone()).unwrap();
    {
        let manager = library.manager_mut();
        manager.add_user("user_123", "Ada").unwrap();
        manager.borrow("978-0132350884").unwrap();
        manager.borrow("978-0201616224").unwrap();
        manager.reserve("user_123", "978-0132350884").unwrap();
    }
    library.save_ledgers().unwrap();

    let reopened = Library::open(config).unwrap();
    assert_eq!(reopened.manager().loan_history(), library.manager().loan_history());
    assert_eq!(reopened.manager().reservations(), library.manager().reservations());
    assert_eq!(
        reopened.manager().loan_history().peek().unwrap().isbn,
        "978-0201616224"
    );
    assert_eq!(reopened.manager().reservation_count("978-0132350884"), 1);
}

#[test]
fn reserved_copy_goes_to_the_reserver_on_return() {
    let dir = tempfile::tempdir().unwrap();
    let mut library = Library::open(config_in(dir.path())).unwrap();
    let manager = library.manager_mut();

    manager.add_user("user_123", "Ada").unwrap();
    manager.borrow("978-0262033848").unwrap();
    assert!(matches!(
        manager.borrow("978-0262033848"),
        Err(DomainError::PreconditionViolation(_))
    ));
    manager.reserve("user_123", "978-0262033848").unwrap();

    match manager.return_book("978-0262033848").unwrap() {
        ReturnOutcome::AssignedTo(reservation) => assert_eq!(reservation.user_id, "user_123"),
        other => panic!("expected the reserver to get the copy, got {other:?}"),
    }
    assert_eq!(manager.stock_of("978-0262033848").unwrap(), 0);

    assert_eq!(
        manager.return_book("978-0262033848").unwrap(),
        ReturnOutcome::Restocked { stock: 1 }
    );
}

#[test]
fn value_report_is_written_in_ascending_value_order() {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::open(config_in(dir.path())).unwrap();
    let path = library.export_value_report().unwrap();

    let content = std::fs::read_to_string(path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("ISBN,Title,Author,Weight,Value"));
    let values: Vec<f64> = lines
        .map(|line| line.rsplit(',').next().unwrap().parse().unwrap())
        .collect();
    assert_eq!(values.len(), 8);
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn shelf_algorithms_run_over_the_loaded_inventory() {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::open(config_in(dir.path())).unwrap();
    let manager = library.manager();

    // 4.5 + 3.0 + 2.5 + 1.5 = 11.5
    let combos = manager
        .heavy_shelf(&["978-0321125217", "978-0201633610", "978-0262033848", "978-0137081073"])
        .unwrap();
    assert_eq!(combos.len(), 1);
    assert!(!manager.heavy_shelf(&[]).unwrap().is_empty());

    let (selection, trace) = library.optimal_shelf(&[]).unwrap();
    assert!(selection.total_weight <= library.config().shelf_weight_budget);
    assert!(selection.total_value > 0.0);
    assert!(!trace.is_empty());

    let total = manager.total_value_by_author("Robert C. Martin").unwrap();
    assert_eq!(total, 400_000.0);
    let avg = manager.average_weight_by_author("robert c. martin").unwrap();
    assert!((avg - (1.2 + 1.0 + 1.5) / 3.0).abs() < 1e-9);
}

#[test]
fn malformed_ledger_fails_reload_without_touching_memory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(dir.path());
    let mut library = Library::open(config.clone()).unwrap();
    library.manager_mut().borrow("978-0132350884").unwrap();

    std::fs::write(config.reservations_path(), "not json").unwrap();
    let err = library.reload_ledgers().unwrap_err();
    assert!(matches!(err, InfraError::Json { .. }));
    assert_eq!(library.manager().loan_history().len(), 1);
}
