//! Library inventory domain module.
//!
//! Books, users, the two inventory views, the loan/reservation ledgers, and
//! the search, sort, and shelf-selection algorithms that run over them. Pure
//! in-memory logic: loading, persistence, and report files live in
//! `libris-infra`.

pub mod book;
pub mod ledger;
pub mod manager;
pub mod ordering;
pub mod recursion;
pub mod search;
pub mod shelf;
pub mod sort;
pub mod user;

pub use book::{Book, BookUpdate};
pub use ledger::{LoanHistory, LoanRecord, Reservation, ReservationQueue};
pub use manager::{AddOutcome, InventoryManager, ReturnOutcome};
pub use ordering::{IsbnKeyed, insert_sorted, insertion_sort, is_sorted_by_isbn};
pub use recursion::{MAX_RECURSION_INPUT, average_weight_by_author, total_value_by_author};
pub use search::{SearchField, binary_search, linear_search};
pub use shelf::{
    DEFAULT_WEIGHT_BUDGET, HEAVY_SHELF_THRESHOLD, ShelfDecision, ShelfSelection, heavy_shelf_combinations,
    heavy_shelf_combinations_over, optimal_shelf,
};
pub use sort::{merge_sort_by_key, merge_sort_by_value};
pub use user::User;
