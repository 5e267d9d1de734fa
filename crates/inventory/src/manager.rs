//! Inventory manager: the single owner of books, users, and both ledgers.
//!
//! Books live in one slot map. The general view (insertion order) and the
//! ordered view (ISBN ascending) hold handles into it, so a stock change is
//! visible through both. Every public operation validates before mutating.

use std::collections::HashMap;

use libris_core::{DomainError, DomainResult, Entity, Isbn, UserId, position_of};
use libris_events::EventSink;

use crate::book::{Book, BookUpdate};
use crate::ledger::{LoanHistory, LoanRecord, Reservation, ReservationQueue};
use crate::ordering::{IsbnKeyed, insert_sorted, is_sorted_by_isbn};
use crate::recursion::{self, MAX_RECURSION_INPUT};
use crate::search::{SearchField, binary_search, linear_search};
use crate::shelf::{self, ShelfDecision, ShelfSelection};
use crate::sort::merge_sort_by_value;
use crate::user::User;

/// Stable handle of a stored book.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
struct BookSlot(u64);

/// Ordered-view entry. The ISBN is copied because it never changes after creation.
#[derive(Debug, Clone)]
struct OrderedEntry {
    isbn: Isbn,
    slot: BookSlot,
}

impl IsbnKeyed for OrderedEntry {
    fn isbn_key(&self) -> &str {
        self.isbn.as_str()
    }
}

/// Result of [`InventoryManager::add_book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new title was added to both views with one copy.
    Added { isbn: Isbn },
    /// The ISBN already existed; its stock went up by one.
    StockIncremented { isbn: Isbn, stock: u32 },
}

/// Result of [`InventoryManager::return_book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnOutcome {
    /// No reservation was pending; the copy went back on the shelf.
    Restocked { stock: u32 },
    /// The oldest pending reservation received the copy; stock is unchanged.
    AssignedTo(Reservation),
}

#[derive(Debug, Default)]
pub struct InventoryManager {
    books: HashMap<BookSlot, Book>,
    next_slot: u64,
    general: Vec<BookSlot>,
    ordered: Vec<OrderedEntry>,
    users: Vec<User>,
    loan_history: LoanHistory,
    reservations: ReservationQueue,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────

    pub fn add_user(&mut self, user_id: &str, name: &str) -> DomainResult<&User> {
        let user = User::new(user_id, name)?;
        if position_of(&self.users, user.id()).is_some() {
            tracing::warn!(user_id = %user.user_id(), "user already exists");
            return Err(DomainError::conflict(format!("user {} already exists", user.user_id())));
        }
        tracing::info!(user_id = %user.user_id(), "user added");
        self.users.push(user);
        let last = self.users.len() - 1;
        Ok(&self.users[last])
    }

    pub fn find_user(&self, user_id: &str) -> Option<&User> {
        let user_id = user_id.trim();
        self.users.iter().find(|u| u.user_id() == user_id)
    }

    pub fn update_user(&mut self, user_id: &str, name: &str) -> DomainResult<&User> {
        let idx = self.user_index(user_id)?;
        let user = &mut self.users[idx];
        user.rename(name)?;
        tracing::info!(user_id, "user updated");
        Ok(user)
    }

    pub fn delete_user(&mut self, user_id: &str) -> DomainResult<User> {
        let idx = self.user_index(user_id)?;
        tracing::info!(user_id, "user deleted");
        Ok(self.users.remove(idx))
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    fn user_index(&self, user_id: &str) -> DomainResult<usize> {
        let id = UserId::new(user_id)?;
        position_of(&self.users, &id).ok_or_else(|| DomainError::not_found(format!("user {id}")))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Books
    // ─────────────────────────────────────────────────────────────────────

    /// Add a book, or add a copy when the ISBN is already known.
    ///
    /// A known ISBN keeps its stored fields and gains one copy; the incoming
    /// book's own stock is ignored. A new ISBN is appended to the general
    /// view, placed into the ordered view by insertion, and starts with one copy.
    pub fn add_book(&mut self, mut book: Book) -> AddOutcome {
        if let Some(slot) = self.slot_of(book.isbn().as_str()) {
            if let Some(existing) = self.books.get_mut(&slot) {
                existing.increment_stock();
                tracing::info!(isbn = %existing.isbn(), stock = existing.stock(), "stock incremented");
                return AddOutcome::StockIncremented {
                    isbn: existing.isbn().clone(),
                    stock: existing.stock(),
                };
            }
        }

        book.reset_stock();
        let isbn = book.isbn().clone();
        let slot = BookSlot(self.next_slot);
        self.next_slot += 1;

        self.books.insert(slot, book);
        self.general.push(slot);
        insert_sorted(
            &mut self.ordered,
            OrderedEntry {
                isbn: isbn.clone(),
                slot,
            },
        );

        tracing::info!(%isbn, "book added");
        AddOutcome::Added { isbn }
    }

    /// Exact ISBN lookup via binary search on the ordered view.
    pub fn find_book(&self, isbn: &str) -> Option<&Book> {
        self.slot_of(isbn).and_then(|slot| self.books.get(&slot))
    }

    pub fn update_book(&mut self, isbn: &str, update: BookUpdate) -> DomainResult<&Book> {
        let slot = self
            .slot_of(isbn)
            .ok_or_else(|| DomainError::not_found(format!("book {isbn}")))?;
        let book = self
            .books
            .get_mut(&slot)
            .ok_or_else(|| DomainError::invariant(format!("ordered view references missing book {isbn}")))?;
        book.apply_update(update);
        tracing::info!(isbn, "book updated");
        Ok(book)
    }

    /// Remove a book from storage and from both views.
    pub fn delete_book(&mut self, isbn: &str) -> DomainResult<Book> {
        let ordered_idx = binary_search(&self.ordered, isbn.trim())
            .ok_or_else(|| DomainError::not_found(format!("book {isbn}")))?;
        let slot = self.ordered[ordered_idx].slot;
        let general_idx = self
            .general
            .iter()
            .position(|s| *s == slot)
            .ok_or_else(|| DomainError::invariant(format!("book {isbn} missing from general view")))?;
        if !self.books.contains_key(&slot) {
            return Err(DomainError::invariant(format!("book {isbn} missing from storage")));
        }

        self.ordered.remove(ordered_idx);
        self.general.remove(general_idx);
        let removed = self
            .books
            .remove(&slot)
            .ok_or_else(|| DomainError::invariant(format!("book {isbn} missing from storage")))?;

        tracing::info!(isbn, "book deleted");
        Ok(removed)
    }

    /// Books in insertion order.
    pub fn general_inventory(&self) -> Vec<&Book> {
        self.general.iter().filter_map(|slot| self.books.get(slot)).collect()
    }

    /// Books in ascending ISBN order.
    pub fn ordered_inventory(&self) -> Vec<&Book> {
        self.ordered
            .iter()
            .filter_map(|entry| self.books.get(&entry.slot))
            .collect()
    }

    /// Number of distinct titles.
    pub fn len(&self) -> usize {
        self.general.len()
    }

    pub fn is_empty(&self) -> bool {
        self.general.is_empty()
    }

    /// Case-insensitive substring search over the general view.
    pub fn search(&self, query: &str, field: SearchField) -> Vec<&Book> {
        linear_search(self.general_inventory(), query, field)
    }

    pub fn stock_of(&self, isbn: &str) -> DomainResult<u32> {
        self.require_book(isbn).map(Book::stock)
    }

    /// Both views hold the same set of books exactly once, and the ordered view is sorted.
    pub fn views_consistent(&self) -> bool {
        if self.general.len() != self.ordered.len() || self.general.len() != self.books.len() {
            return false;
        }
        let mut general: Vec<u64> = self.general.iter().map(|s| s.0).collect();
        let mut ordered: Vec<u64> = self.ordered.iter().map(|e| e.slot.0).collect();
        general.sort_unstable();
        ordered.sort_unstable();
        general.dedup();
        general == ordered
            && general.len() == self.books.len()
            && is_sorted_by_isbn(&self.ordered)
            && self
                .ordered
                .iter()
                .all(|e| self.books.get(&e.slot).is_some_and(|b| b.isbn() == &e.isbn))
    }

    fn slot_of(&self, isbn: &str) -> Option<BookSlot> {
        binary_search(&self.ordered, isbn.trim()).map(|idx| self.ordered[idx].slot)
    }

    fn require_book(&self, isbn: &str) -> DomainResult<&Book> {
        self.find_book(isbn)
            .ok_or_else(|| DomainError::not_found(format!("book {isbn}")))
    }

    fn require_book_mut(&mut self, isbn: &str) -> DomainResult<&mut Book> {
        let slot = self
            .slot_of(isbn)
            .ok_or_else(|| DomainError::not_found(format!("book {isbn}")))?;
        self.books
            .get_mut(&slot)
            .ok_or_else(|| DomainError::invariant(format!("ordered view references missing book {isbn}")))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Loans and reservations
    // ─────────────────────────────────────────────────────────────────────

    /// Lend one copy and record the loan on the history stack.
    pub fn borrow(&mut self, isbn: &str) -> DomainResult<&Book> {
        let book = self.require_book_mut(isbn)?;
        if !book.is_available() {
            tracing::warn!(isbn, "borrow rejected: out of stock");
            return Err(DomainError::precondition(format!("book {isbn} is out of stock")));
        }
        book.decrement_stock()?;
        let stock = book.stock();
        let key = book.isbn().clone();
        self.loan_history.push(key);
        tracing::info!(isbn, stock, "book borrowed");
        self.require_book(isbn)
    }

    /// Take a copy back.
    ///
    /// When any reservation is pending, the oldest one receives the copy and
    /// stock stays as it is, whichever ISBN that reservation was made for.
    /// Otherwise stock goes up by one. The loan history is not touched.
    pub fn return_book(&mut self, isbn: &str) -> DomainResult<ReturnOutcome> {
        let isbn = isbn.trim();
        let slot = match self.slot_of(isbn) {
            Some(slot) => slot,
            None => {
                tracing::warn!(isbn, "return rejected: book not in inventory");
                return Err(DomainError::not_found(format!("book {isbn}")));
            }
        };
        if !self.books.contains_key(&slot) {
            return Err(DomainError::invariant(format!("ordered view references missing book {isbn}")));
        }

        if let Some(reservation) = self.reservations.dequeue() {
            if reservation.isbn != isbn {
                // TODO: serve only reservations recorded for the returned ISBN once the policy is settled.
                tracing::warn!(
                    returned = isbn,
                    reserved = %reservation.isbn,
                    user_id = %reservation.user_id,
                    "returned copy assigned to a reservation for a different isbn"
                );
            }
            tracing::info!(isbn, user_id = %reservation.user_id, "returned copy assigned to reservation");
            return Ok(ReturnOutcome::AssignedTo(reservation));
        }

        let book = self
            .books
            .get_mut(&slot)
            .ok_or_else(|| DomainError::invariant(format!("ordered view references missing book {isbn}")))?;
        book.increment_stock();
        tracing::info!(isbn, stock = book.stock(), "book restocked");
        Ok(ReturnOutcome::Restocked { stock: book.stock() })
    }

    /// Queue a reservation for a registered user on an out-of-stock book.
    pub fn reserve(&mut self, user_id: &str, isbn: &str) -> DomainResult<()> {
        let user = self
            .find_user(user_id)
            .ok_or_else(|| DomainError::not_found(format!("user {user_id}")))?
            .user_id()
            .clone();
        let book = self.require_book(isbn)?;
        let stock = book.stock();
        let key = book.isbn().clone();

        if !self.reservations.enqueue(user, stock, key) {
            tracing::warn!(user_id, isbn, stock, "reservation rejected: book in stock");
            return Err(DomainError::precondition(format!(
                "book {isbn} is in stock ({stock}); borrow it instead"
            )));
        }
        tracing::info!(user_id, isbn, "reservation queued");
        Ok(())
    }

    pub fn reservation_count(&self, isbn: &str) -> usize {
        self.reservations.count_matching(isbn.trim())
    }

    pub fn loan_count(&self, isbn: &str) -> usize {
        self.loan_history.count_matching(isbn.trim())
    }

    pub fn loan_history(&self) -> &LoanHistory {
        &self.loan_history
    }

    pub fn reservations(&self) -> &ReservationQueue {
        &self.reservations
    }

    /// Remove and return the most recent loan record.
    pub fn pop_loan(&mut self) -> Option<LoanRecord> {
        self.loan_history.pop()
    }

    /// Replace the loan history wholesale (e.g. after loading it from disk).
    pub fn replace_loan_history(&mut self, history: LoanHistory) {
        self.loan_history = history;
    }

    /// Replace the reservation queue wholesale (e.g. after loading it from disk).
    pub fn replace_reservations(&mut self, reservations: ReservationQueue) {
        self.reservations = reservations;
    }

    // ─────────────────────────────────────────────────────────────────────
    // Reports and algorithms
    // ─────────────────────────────────────────────────────────────────────

    /// The general view merge-sorted by ascending value.
    pub fn value_report(&self) -> Vec<&Book> {
        merge_sort_by_value(&self.general_inventory())
    }

    /// Resolve a shelf from ISBNs; an empty list means the whole general view.
    pub fn shelf(&self, isbns: &[&str]) -> DomainResult<Vec<&Book>> {
        if isbns.is_empty() {
            return Ok(self.general_inventory());
        }
        isbns.iter().map(|isbn| self.require_book(isbn)).collect()
    }

    pub fn heavy_shelf(&self, isbns: &[&str]) -> DomainResult<Vec<[&Book; 4]>> {
        let books = self.shelf(isbns)?;
        Ok(shelf::heavy_shelf_combinations(&books))
    }

    pub fn optimal_shelf<S>(&self, isbns: &[&str], budget: f64, trace: &mut S) -> DomainResult<ShelfSelection<'_>>
    where
        S: EventSink<ShelfDecision>,
    {
        let books = self.shelf(isbns)?;
        shelf::optimal_shelf(&books, budget, trace)
    }

    /// Total value of an author's books in the general view (non-tail recursion).
    pub fn total_value_by_author(&self, author: &str) -> DomainResult<f64> {
        let books = self.recursion_input()?;
        Ok(recursion::total_value_by_author(&books, author))
    }

    /// Average weight of an author's books in the general view (accumulator recursion).
    pub fn average_weight_by_author(&self, author: &str) -> DomainResult<f64> {
        let books = self.recursion_input()?;
        Ok(recursion::average_weight_by_author(&books, author))
    }

    fn recursion_input(&self) -> DomainResult<Vec<&Book>> {
        let books = self.general_inventory();
        if books.len() > MAX_RECURSION_INPUT {
            return Err(DomainError::invalid_input(format!(
                "inventory of {} books exceeds the recursion limit of {MAX_RECURSION_INPUT}",
                books.len()
            )));
        }
        Ok(books)
    }
}
