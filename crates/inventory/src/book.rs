use serde::Serialize;

use libris_core::{DomainError, DomainResult, Entity, Isbn};

/// A book title held by the library, with a mutable stock counter.
///
/// Weight is in kilograms and value in the library's currency unit; neither
/// is interpreted beyond comparison and summation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    isbn: Isbn,
    title: String,
    author: String,
    weight: f64,
    value: f64,
    stock: u32,
}

impl Book {
    /// Create a validated book with a stock of one copy.
    pub fn new(
        isbn: impl AsRef<str>,
        title: impl Into<String>,
        author: impl Into<String>,
        weight: f64,
        value: f64,
    ) -> DomainResult<Self> {
        let isbn = Isbn::new(isbn)?;
        validate_weight(weight)?;
        validate_value(value)?;
        Ok(Self {
            isbn,
            title: title.into(),
            author: author.into(),
            weight,
            value,
            stock: 1,
        })
    }

    pub fn isbn(&self) -> &Isbn {
        &self.isbn
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    pub(crate) fn reset_stock(&mut self) {
        self.stock = 1;
    }

    pub(crate) fn increment_stock(&mut self) {
        self.stock = self.stock.saturating_add(1);
    }

    pub(crate) fn decrement_stock(&mut self) -> DomainResult<()> {
        if self.stock == 0 {
            return Err(DomainError::precondition(format!(
                "book {} is out of stock",
                self.isbn
            )));
        }
        self.stock -= 1;
        Ok(())
    }

    pub(crate) fn apply_update(&mut self, update: BookUpdate) {
        self.title = update.title;
        self.author = update.author;
        self.weight = update.weight;
        self.value = update.value;
    }
}

impl Entity for Book {
    type Id = Isbn;

    fn id(&self) -> &Isbn {
        &self.isbn
    }
}

/// Replacement for the editable fields of a book (ISBN and stock are not editable).
#[derive(Debug, Clone, PartialEq)]
pub struct BookUpdate {
    title: String,
    author: String,
    weight: f64,
    value: f64,
}

impl BookUpdate {
    /// Validate the new field values up front so applying never fails halfway.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        weight: f64,
        value: f64,
    ) -> DomainResult<Self> {
        validate_weight(weight)?;
        validate_value(value)?;
        Ok(Self {
            title: title.into(),
            author: author.into(),
            weight,
            value,
        })
    }
}

fn validate_weight(weight: f64) -> DomainResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DomainError::invalid_input(format!(
            "weight must be a positive number, got {weight}"
        )));
    }
    Ok(())
}

fn validate_value(value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::invalid_input(format!(
            "value must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
