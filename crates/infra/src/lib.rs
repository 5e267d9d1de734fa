//! Infrastructure layer: configuration, file formats, persistence.
//!
//! Everything that touches the filesystem lives here; the domain crates stay
//! pure. Reads are full reads and writes replace the target atomically, so a
//! failed call leaves both the file and the in-memory state as they were.

pub mod config;
pub mod error;
pub mod fs;
pub mod ledger_store;
pub mod library;
pub mod loader;
pub mod report;

pub use config::LibraryConfig;
pub use error::{InfraError, InfraResult};
pub use ledger_store::{load_ledger, save_ledger};
pub use library::Library;
pub use loader::{LoadSummary, load_inventory};
pub use report::{REPORT_HEADER, export_value_report};
