//! Value report export.

use std::path::Path;

use libris_inventory::InventoryManager;

use crate::error::{InfraError, InfraResult};
use crate::fs::write_atomic;

pub const REPORT_HEADER: [&str; 5] = ["ISBN", "Title", "Author", "Weight", "Value"];

/// Write the general inventory, merge-sorted by ascending value, as CSV.
///
/// Returns the number of book rows written.
pub fn export_value_report(manager: &InventoryManager, path: &Path) -> InfraResult<usize> {
    let books = manager.value_report();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(REPORT_HEADER).map_err(|e| InfraError::csv(path, e))?;
    for book in &books {
        let weight = book.weight().to_string();
        let value = book.value().to_string();
        writer
            .write_record([book.isbn().as_str(), book.title(), book.author(), weight.as_str(), value.as_str()])
            .map_err(|e| InfraError::csv(path, e))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| InfraError::io(path, std::io::Error::new(e.error().kind(), e.error().to_string())))?;

    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), rows = books.len(), "value report written");
    Ok(books.len())
}
