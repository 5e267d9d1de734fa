//! Loan history (LIFO stack) and reservation queue (FIFO).
//!
//! Both ledgers serialize as a flat JSON array of records, oldest first, so a
//! save/load cycle reproduces the exact sequence.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use libris_core::{Isbn, UserId};
use libris_events::Event;

/// One borrow event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub isbn: Isbn,
    pub loan_date: DateTime<Utc>,
}

impl Event for LoanRecord {
    fn event_type(&self) -> &'static str {
        "ledger.loan.recorded"
    }
}

/// One pending reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub user_id: UserId,
    pub isbn: Isbn,
    pub request_date: DateTime<Utc>,
}

impl Event for Reservation {
    fn event_type(&self) -> &'static str {
        "ledger.reservation.requested"
    }
}

/// LIFO loan history. The most recent record is on top.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanHistory {
    records: Vec<LoanRecord>,
}

impl LoanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a loan stamped with the current time.
    pub fn push(&mut self, isbn: Isbn) {
        self.push_at(isbn, Utc::now());
    }

    pub fn push_at(&mut self, isbn: Isbn, loan_date: DateTime<Utc>) {
        self.records.push(LoanRecord { isbn, loan_date });
    }

    pub fn pop(&mut self) -> Option<LoanRecord> {
        self.records.pop()
    }

    pub fn peek(&self) -> Option<&LoanRecord> {
        self.records.last()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of loans recorded against `isbn`.
    pub fn count_matching(&self, isbn: &str) -> usize {
        self.records.iter().filter(|r| r.isbn == isbn).count()
    }

    /// Records from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &LoanRecord> + '_ {
        self.records.iter().rev()
    }
}

/// FIFO reservation queue.
///
/// Admission control: a reservation is only accepted for a book whose
/// current stock is zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationQueue {
    records: VecDeque<Reservation>,
}

impl ReservationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a reservation stamped with the current time.
    ///
    /// Returns `false`, and records nothing, when the book is in stock.
    pub fn enqueue(&mut self, user_id: UserId, current_stock: u32, isbn: Isbn) -> bool {
        self.enqueue_at(user_id, current_stock, isbn, Utc::now())
    }

    pub fn enqueue_at(
        &mut self,
        user_id: UserId,
        current_stock: u32,
        isbn: Isbn,
        request_date: DateTime<Utc>,
    ) -> bool {
        if current_stock > 0 {
            tracing::debug!(%isbn, current_stock, "reservation rejected: book in stock");
            return false;
        }
        self.records.push_back(Reservation {
            user_id,
            isbn,
            request_date,
        });
        true
    }

    pub fn dequeue(&mut self) -> Option<Reservation> {
        self.records.pop_front()
    }

    pub fn peek(&self) -> Option<&Reservation> {
        self.records.front()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Number of pending reservations for `isbn`.
    pub fn count_matching(&self, isbn: &str) -> usize {
        self.records.iter().filter(|r| r.isbn == isbn).count()
    }

    /// Reservations from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Reservation> + '_ {
        self.records.iter()
    }
}
