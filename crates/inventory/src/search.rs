//! Linear (substring) and binary (exact ISBN) search.

use core::cmp::Ordering;

use crate::book::Book;
use crate::ordering::IsbnKeyed;

/// Book field matched by [`linear_search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    fn of<'a>(self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => book.title(),
            SearchField::Author => book.author(),
        }
    }
}

/// Scan every book and return those whose field contains `query`, ignoring case.
///
/// Results keep scan order. An empty query matches every book.
pub fn linear_search<'a, I>(books: I, query: &str, field: SearchField) -> Vec<&'a Book>
where
    I: IntoIterator<Item = &'a Book>,
{
    let needle = query.to_lowercase();
    books
        .into_iter()
        .filter(|book| field.of(book).to_lowercase().contains(&needle))
        .collect()
}

/// Find the index of `target` in a slice sorted ascending by ISBN.
///
/// The slice must already be sorted; an unsorted slice yields an arbitrary
/// miss rather than an error, and nothing is re-sorted here.
pub fn binary_search<T: IsbnKeyed>(items: &[T], target: &str) -> Option<usize> {
    let mut low = 0usize;
    let mut high = items.len();

    // Half-open range [low, high).
    while low < high {
        let mid = low + (high - low) / 2;
        match items[mid].isbn_key().cmp(target) {
            Ordering::Equal => return Some(mid),
            Ordering::Less => low = mid + 1,
            Ordering::Greater => high = mid,
        }
    }

    None
}
