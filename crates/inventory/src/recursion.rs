//! Two recursion shapes over author-filtered books.
//!
//! [`total_value_by_author`] accumulates through return values, so each
//! element costs a stack frame. [`average_weight_by_author`] threads its
//! running sum and count through parameters with the recursive call in tail
//! position. Rust does not guarantee tail-call elimination, so the second
//! form is not a stack-depth guarantee; both exist to compare the shapes.

use crate::book::Book;

/// Largest input the manager hands to either recursive helper.
///
/// Recursion depth equals input length. Unoptimised builds keep one frame
/// per book for both shapes, so the bound must fit a default 2 MiB thread
/// stack with room to spare.
pub const MAX_RECURSION_INPUT: usize = 1_000;

fn same_author(book: &Book, author: &str) -> bool {
    book.author().to_lowercase() == author.to_lowercase()
}

/// Total value of the books written by `author` (case-insensitive), one call per book.
pub fn total_value_by_author(books: &[&Book], author: &str) -> f64 {
    match books.split_first() {
        None => 0.0,
        Some((head, tail)) => {
            let value = if same_author(head, author) { head.value() } else { 0.0 };
            value + total_value_by_author(tail, author)
        }
    }
}

/// Average weight of the books written by `author` (case-insensitive); `0.0` when none match.
pub fn average_weight_by_author(books: &[&Book], author: &str) -> f64 {
    average_weight_acc(books, author, 0.0, 0)
}

fn average_weight_acc(books: &[&Book], author: &str, sum: f64, count: u32) -> f64 {
    match books.split_first() {
        None if count > 0 => sum / f64::from(count),
        None => 0.0,
        Some((head, tail)) if same_author(head, author) => {
            average_weight_acc(tail, author, sum + head.weight(), count + 1)
        }
        Some((_, tail)) => average_weight_acc(tail, author, sum, count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn book(isbn: &str, author: &str, weight: f64, value: f64) -> Book {
        Book::new(isbn, "t", author, weight, value).unwrap()
    }

    #[test]
    fn totals_only_matching_author_ignoring_case() {
        let books = [
            book("1", "Robert C. Martin", 1.0, 100.0),
            book("2", "Erich Gamma", 2.0, 50.0),
            book("3", "robert c. martin", 3.0, 25.0),
        ];
        let refs: Vec<&Book> = books.iter().collect();
        assert_eq!(total_value_by_author(&refs, "ROBERT C. MARTIN"), 125.0);
        assert_eq!(average_weight_by_author(&refs, "Robert C. Martin"), 2.0);
    }

    #[test]
    fn empty_or_unmatched_input_is_zero() {
        assert_eq!(total_value_by_author(&[], "anyone"), 0.0);
        assert_eq!(average_weight_by_author(&[], "anyone"), 0.0);

        let b = book("1", "Someone", 1.0, 1.0);
        assert_eq!(average_weight_by_author(&[&b], "Nobody"), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: recursive totals and averages agree with iterator-based computation.
        #[test]
        fn recursion_agrees_with_iteration(
            rows in prop::collection::vec((0usize..3, 1u32..100, 0u32..1_000), 0..50)
        ) {
            let authors = ["Ann", "Bob", "Cy"];
            let books: Vec<Book> = rows
                .iter()
                .enumerate()
                .map(|(i, (a, w, v))| book(&i.to_string(), authors[*a], f64::from(*w), f64::from(*v)))
                .collect();
            let refs: Vec<&Book> = books.iter().collect();

            for author in authors {
                let matching: Vec<&&Book> = refs.iter().filter(|b| b.author() == author).collect();
                let total: f64 = matching.iter().map(|b| b.value()).sum();
                prop_assert_eq!(total_value_by_author(&refs, author), total);

                let expected_avg = if matching.is_empty() {
                    0.0
                } else {
                    matching.iter().map(|b| b.weight()).sum::<f64>() / matching.len() as f64
                };
                let avg = average_weight_by_author(&refs, author);
                prop_assert!((avg - expected_avg).abs() < 1e-9);
            }
        }
    }
}
