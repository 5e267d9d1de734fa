//! Ordered collection maintenance (insertion sort by ISBN).
//!
//! The ordered view is never re-sorted wholesale: each new element is
//! appended and shifted left into place, which is O(n) for a sequence that
//! was already sorted.

use crate::book::Book;

/// Anything that carries an ISBN sort key.
pub trait IsbnKeyed {
    fn isbn_key(&self) -> &str;
}

impl IsbnKeyed for Book {
    fn isbn_key(&self) -> &str {
        self.isbn().as_str()
    }
}

impl<T: IsbnKeyed + ?Sized> IsbnKeyed for &T {
    fn isbn_key(&self) -> &str {
        (**self).isbn_key()
    }
}

/// Sort in place, ascending by ISBN, using insertion sort.
///
/// Elements move right only while the key being placed is strictly smaller,
/// so equal keys keep their relative order.
pub fn insertion_sort<T: IsbnKeyed>(items: &mut [T]) {
    for i in 1..items.len() {
        sift_left(items, i);
    }
}

/// Append `item` to an ISBN-sorted vector and restore ascending order.
///
/// Returns the index the item ended up at.
pub fn insert_sorted<T: IsbnKeyed>(items: &mut Vec<T>, item: T) -> usize {
    items.push(item);
    let last = items.len() - 1;
    sift_left(items, last)
}

/// True when every adjacent pair satisfies `a.isbn <= b.isbn`.
pub fn is_sorted_by_isbn<T: IsbnKeyed>(items: &[T]) -> bool {
    items.windows(2).all(|w| w[0].isbn_key() <= w[1].isbn_key())
}

// Shift `items[pos]` left past every strictly greater neighbour.
fn sift_left<T: IsbnKeyed>(items: &mut [T], pos: usize) -> usize {
    let mut j = pos;
    while j > 0 && items[j].isbn_key() < items[j - 1].isbn_key() {
        items.swap(j, j - 1);
        j -= 1;
    }
    j
}
