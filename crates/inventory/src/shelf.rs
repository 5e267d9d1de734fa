//! Shelf-selection algorithms.
//!
//! Two deliberately different approaches over a caller-selected shelf:
//! exhaustive enumeration of 4-book combinations above a weight threshold,
//! and a backtracking 0/1 selection maximizing value under a weight budget.

use libris_core::{DomainError, DomainResult, Isbn};
use libris_events::{Event, EventSink};

use crate::book::Book;

/// Weight a 4-book combination must strictly exceed to count as heavy.
pub const HEAVY_SHELF_THRESHOLD: f64 = 8.0;

/// Default weight budget for [`optimal_shelf`].
pub const DEFAULT_WEIGHT_BUDGET: f64 = 8.0;

/// Every combination of exactly four distinct books whose total weight
/// strictly exceeds [`HEAVY_SHELF_THRESHOLD`].
pub fn heavy_shelf_combinations<'a>(books: &[&'a Book]) -> Vec<[&'a Book; 4]> {
    heavy_shelf_combinations_over(books, HEAVY_SHELF_THRESHOLD)
}

/// Brute-force O(n^4) enumeration with strictly increasing indices, so each
/// set appears once and in shelf order. Fewer than four books yields nothing.
pub fn heavy_shelf_combinations_over<'a>(books: &[&'a Book], threshold: f64) -> Vec<[&'a Book; 4]> {
    let n = books.len();
    let mut combos = Vec::new();

    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let combo = [books[i], books[j], books[k], books[l]];
                    let weight: f64 = combo.iter().map(|b| b.weight()).sum();
                    if weight > threshold {
                        combos.push(combo);
                    }
                }
            }
        }
    }

    tracing::debug!(books = n, threshold, found = combos.len(), "heavy shelf enumeration finished");
    combos
}

/// One step of the backtracking exploration.
#[derive(Debug, Clone, PartialEq)]
pub enum ShelfDecision {
    /// The book fits the remaining budget and is tentatively placed.
    Include {
        isbn: Isbn,
        weight: f64,
        value: f64,
        /// Shelf weight before placing this book.
        shelf_weight: f64,
    },
    /// The book is taken back off after exploring the branch that included it.
    Backtrack { isbn: Isbn },
    /// The book would exceed the budget and is not tried.
    Skip {
        isbn: Isbn,
        weight: f64,
        shelf_weight: f64,
    },
}

impl ShelfDecision {
    pub fn isbn(&self) -> &Isbn {
        match self {
            ShelfDecision::Include { isbn, .. }
            | ShelfDecision::Backtrack { isbn }
            | ShelfDecision::Skip { isbn, .. } => isbn,
        }
    }
}

impl Event for ShelfDecision {
    fn event_type(&self) -> &'static str {
        match self {
            ShelfDecision::Include { .. } => "shelf.include",
            ShelfDecision::Backtrack { .. } => "shelf.backtrack",
            ShelfDecision::Skip { .. } => "shelf.skip",
        }
    }
}

/// Best selection found by [`optimal_shelf`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ShelfSelection<'a> {
    pub total_value: f64,
    pub total_weight: f64,
    pub books: Vec<&'a Book>,
}

/// Choose the subset of `books` with the greatest total value whose total
/// weight does not exceed `budget`.
///
/// At each index the "include" branch is explored before "exclude"; a
/// selection replaces the best so far only when its value is strictly
/// greater, so the first-found selection wins ties. Every decision is sent to
/// `trace`. Worst case O(2^n).
pub fn optimal_shelf<'a, S>(books: &[&'a Book], budget: f64, trace: &mut S) -> DomainResult<ShelfSelection<'a>>
where
    S: EventSink<ShelfDecision>,
{
    if !budget.is_finite() || budget < 0.0 {
        return Err(DomainError::invalid_input(format!(
            "weight budget must be a non-negative number, got {budget}"
        )));
    }

    let mut search = Backtracking {
        books,
        budget,
        trace,
        current: Vec::with_capacity(books.len()),
        best: ShelfSelection::default(),
    };
    search.explore(0, 0.0, 0.0);

    tracing::debug!(
        books = books.len(),
        budget,
        best_value = search.best.total_value,
        chosen = search.best.books.len(),
        "backtracking finished"
    );
    Ok(search.best)
}

struct Backtracking<'a, 's, S> {
    books: &'s [&'a Book],
    budget: f64,
    trace: &'s mut S,
    current: Vec<&'a Book>,
    best: ShelfSelection<'a>,
}

impl<'a, S: EventSink<ShelfDecision>> Backtracking<'a, '_, S> {
    fn explore(&mut self, index: usize, weight: f64, value: f64) {
        let Some(&book) = self.books.get(index) else {
            if value > self.best.total_value {
                self.best = ShelfSelection {
                    total_value: value,
                    total_weight: weight,
                    books: self.current.clone(),
                };
            }
            return;
        };

        if weight + book.weight() <= self.budget {
            self.trace.emit(ShelfDecision::Include {
                isbn: book.isbn().clone(),
                weight: book.weight(),
                value: book.value(),
                shelf_weight: weight,
            });
            self.current.push(book);
            self.explore(index + 1, weight + book.weight(), value + book.value());
            self.current.pop();
            self.trace.emit(ShelfDecision::Backtrack {
                isbn: book.isbn().clone(),
            });
        } else {
            self.trace.emit(ShelfDecision::Skip {
                isbn: book.isbn().clone(),
                weight: book.weight(),
                shelf_weight: weight,
            });
        }

        self.explore(index + 1, weight, value);
    }
}
