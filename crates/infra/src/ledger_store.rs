//! Ledger persistence as a JSON array of records.

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{InfraError, InfraResult};
use crate::fs::{read_if_exists, write_atomic};

/// Write a ledger to `path`, replacing any previous content.
pub fn save_ledger<L: Serialize>(ledger: &L, path: &Path) -> InfraResult<()> {
    let bytes = serde_json::to_vec_pretty(ledger).map_err(|e| InfraError::json(path, e))?;
    write_atomic(path, &bytes)?;
    tracing::info!(path = %path.display(), "ledger saved");
    Ok(())
}

/// Read a ledger from `path`; a missing file yields an empty ledger.
pub fn load_ledger<L: DeserializeOwned + Default>(path: &Path) -> InfraResult<L> {
    let Some(bytes) = read_if_exists(path)? else {
        tracing::warn!(path = %path.display(), "ledger file not found; starting empty");
        return Ok(L::default());
    };
    let ledger = serde_json::from_slice(&bytes).map_err(|e| InfraError::json(path, e))?;
    tracing::info!(path = %path.display(), "ledger loaded");
    Ok(ledger)
}
