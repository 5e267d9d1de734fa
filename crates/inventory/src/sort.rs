//! Merge sort for reports.
//!
//! Produces a new sequence; the input is never reordered.

use crate::book::Book;

/// Stable merge sort by an `f64` key, ascending. Ties keep the left element first.
pub fn merge_sort_by_key<T, F>(items: &[T], key: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    merge_sort_inner(items, &key)
}

/// Books ordered by ascending value.
pub fn merge_sort_by_value<'a>(books: &[&'a Book]) -> Vec<&'a Book> {
    merge_sort_by_key(books, |book| book.value())
}

fn merge_sort_inner<T, F>(items: &[T], key: &F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> f64,
{
    if items.len() <= 1 {
        return items.to_vec();
    }

    let (left, right) = items.split_at(items.len() / 2);
    let left = merge_sort_inner(left, key);
    let right = merge_sort_inner(right, key);
    merge(left, right, key)
}

fn merge<T, F>(left: Vec<T>, right: Vec<T>, key: &F) -> Vec<T>
where
    F: Fn(&T) -> f64,
{
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => key(l) <= key(r),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged
}
