//! Inventory loading from CSV or JSON.
//!
//! Every row becomes a [`Book`] and goes through `InventoryManager::add_book`,
//! so repeated ISBNs add copies instead of failing. Rows are all parsed and
//! validated before the first one is added: a bad row leaves the inventory
//! untouched.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use libris_inventory::{AddOutcome, Book, InventoryManager};

use crate::error::{InfraError, InfraResult};
use crate::fs::read_if_exists;

/// One inventory row as found on disk.
#[derive(Debug, Clone, Deserialize)]
struct BookRow {
    isbn: String,
    title: String,
    author: String,
    #[serde(alias = "weight_kg")]
    weight: f64,
    #[serde(alias = "value_cop")]
    value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Json,
}

impl Format {
    fn of(path: &Path) -> InfraResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Format::Csv),
            Some("json") => Ok(Format::Json),
            _ => Err(InfraError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// What a load did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub path: PathBuf,
    /// Rows read from the file.
    pub rows: usize,
    /// Rows that created a new title.
    pub added: usize,
    /// Rows that added a copy of a known title.
    pub merged: usize,
}

/// Load `path` into `manager`.
///
/// A missing file is logged and treated as an empty inventory.
pub fn load_inventory(manager: &mut InventoryManager, path: &Path) -> InfraResult<LoadSummary> {
    let format = Format::of(path)?;
    let mut summary = LoadSummary {
        path: path.to_path_buf(),
        ..LoadSummary::default()
    };

    let Some(bytes) = read_if_exists(path)? else {
        tracing::warn!(path = %path.display(), "inventory file not found; nothing loaded");
        return Ok(summary);
    };

    let rows = match format {
        Format::Csv => parse_csv(path, &bytes)?,
        Format::Json => serde_json::from_slice::<Vec<BookRow>>(&bytes).map_err(|e| InfraError::json(path, e))?,
    };

    let books = rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            Book::new(row.isbn, row.title, row.author, row.weight, row.value).map_err(|source| {
                InfraError::InvalidRow {
                    path: path.to_path_buf(),
                    row: i + 1,
                    source,
                }
            })
        })
        .collect::<InfraResult<Vec<Book>>>()?;

    for book in books {
        summary.rows += 1;
        match manager.add_book(book) {
            AddOutcome::Added { .. } => summary.added += 1,
            AddOutcome::StockIncremented { .. } => summary.merged += 1,
        }
    }

    tracing::info!(
        path = %path.display(),
        rows = summary.rows,
        added = summary.added,
        merged = summary.merged,
        "inventory loaded"
    );
    Ok(summary)
}

fn parse_csv(path: &Path, bytes: &[u8]) -> InfraResult<Vec<BookRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    reader
        .deserialize::<BookRow>()
        .map(|row| row.map_err(|e| InfraError::csv(path, e)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
isbn,title,author,weight_kg,value_cop
978-0132350884,Clean Code,Robert C. Martin,1.2,150000
978-0201633610,Design Patterns,Erich Gamma,0.8,180000
978-0132350884,Clean Code,Robert C. Martin,1.2,150000
";

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn csv_rows_are_added_and_duplicates_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "books.csv", CSV);
        let mut manager = InventoryManager::new();

        let summary = load_inventory(&mut manager, &path).unwrap();
        assert_eq!((summary.rows, summary.added, summary.merged), (3, 2, 1));
        assert_eq!(manager.len(), 2);
        assert_eq!(manager.stock_of("978-0132350884").unwrap(), 2);
    }

    #[test]
    fn json_rows_accept_short_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "books.JSON",
            r#"[{"isbn":"1","title":"A","author":"X","weight":1.5,"value":10},
               {"isbn":"2","title":"B","author":"Y","weight_kg":2.0,"value_cop":20}]"#,
        );
        let mut manager = InventoryManager::new();
        let summary = load_inventory(&mut manager, &path).unwrap();
        assert_eq!(summary.added, 2);
        assert_eq!(manager.find_book("2").unwrap().value(), 20.0);
    }

    #[test]
    fn missing_file_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let mut manager = InventoryManager::new();
        let summary = load_inventory(&mut manager, &dir.path().join("absent.csv")).unwrap();
        assert_eq!(summary.rows, 0);
        assert!(manager.is_empty());
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let mut manager = InventoryManager::new();
        let err = load_inventory(&mut manager, Path::new("books.xml")).unwrap_err();
        assert!(matches!(err, InfraError::UnsupportedFormat(_)));
    }

    #[test]
    fn non_numeric_weight_rejects_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "books.csv",
            "isbn,title,author,weight,value\n1,A,X,1.0,10\n2,B,Y,heavy,20\n",
        );
        let mut manager = InventoryManager::new();
        let err = load_inventory(&mut manager, &path).unwrap_err();
        assert!(matches!(err, InfraError::Csv { .. }));
        assert!(manager.is_empty());
    }

    #[test]
    fn invalid_values_report_the_row_and_add_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "books.json",
            r#"[{"isbn":"1","title":"A","author":"X","weight":1.0,"value":1},
               {"isbn":"2","title":"B","author":"Y","weight":-3.0,"value":1}]"#,
        );
        let mut manager = InventoryManager::new();
        match load_inventory(&mut manager, &path).unwrap_err() {
            InfraError::InvalidRow { row, .. } => assert_eq!(row, 2),
            other => panic!("expected invalid row, got {other:?}"),
        }
        assert!(manager.is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "books.json", "{ not json");
        let mut manager = InventoryManager::new();
        assert!(matches!(
            load_inventory(&mut manager, &path),
            Err(InfraError::Json { .. })
        ));
    }
}
