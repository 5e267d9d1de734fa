//! `Library`: one inventory manager plus the files it is loaded from and saved to.
//!
//! This is the surface a presentation layer talks to. It owns exactly one
//! [`InventoryManager`]; callers borrow it, they never get a second copy.

use std::path::{Path, PathBuf};

use libris_events::TracingSink;
use libris_inventory::{InventoryManager, LoanHistory, ReservationQueue, ShelfDecision, ShelfSelection};

use crate::config::LibraryConfig;
use crate::error::InfraResult;
use crate::ledger_store::{load_ledger, save_ledger};
use crate::loader::{LoadSummary, load_inventory};
use crate::report::export_value_report;

#[derive(Debug)]
pub struct Library {
    config: LibraryConfig,
    manager: InventoryManager,
}

impl Library {
    /// An empty library; nothing is read from disk.
    pub fn new(config: LibraryConfig) -> Self {
        Self {
            config,
            manager: InventoryManager::new(),
        }
    }

    /// Load the configured inventory file and both ledgers.
    ///
    /// Missing files are fine and leave the corresponding part empty.
    pub fn open(config: LibraryConfig) -> InfraResult<Self> {
        let mut library = Self::new(config);
        let inventory_file = library.config.inventory_file.clone();
        library.load_inventory(&inventory_file)?;
        library.reload_ledgers()?;
        Ok(library)
    }

    pub fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub fn manager(&self) -> &InventoryManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut InventoryManager {
        &mut self.manager
    }

    /// Feed another inventory file through the manager (duplicates add copies).
    pub fn load_inventory(&mut self, path: &Path) -> InfraResult<LoadSummary> {
        load_inventory(&mut self.manager, path)
    }

    /// Persist the loan history and the reservation queue.
    pub fn save_ledgers(&self) -> InfraResult<()> {
        save_ledger(self.manager.loan_history(), &self.config.loans_path())?;
        save_ledger(self.manager.reservations(), &self.config.reservations_path())?;
        Ok(())
    }

    /// Replace both in-memory ledgers with the persisted ones.
    ///
    /// Both files are read before either ledger is replaced.
    pub fn reload_ledgers(&mut self) -> InfraResult<()> {
        let history: LoanHistory = load_ledger(&self.config.loans_path())?;
        let reservations: ReservationQueue = load_ledger(&self.config.reservations_path())?;
        self.manager.replace_loan_history(history);
        self.manager.replace_reservations(reservations);
        Ok(())
    }

    /// Write the value report to the configured reports directory.
    pub fn export_value_report(&self) -> InfraResult<PathBuf> {
        let path = self.config.report_path();
        export_value_report(&self.manager, &path)?;
        Ok(path)
    }

    /// Run the backtracking optimizer with the configured budget.
    ///
    /// The decision trace is logged through `tracing` and also returned.
    pub fn optimal_shelf(&self, isbns: &[&str]) -> InfraResult<(ShelfSelection<'_>, Vec<ShelfDecision>)> {
        let mut sink = (Vec::new(), TracingSink::new());
        let selection = self
            .manager
            .optimal_shelf(isbns, self.config.shelf_weight_budget, &mut sink)?;
        Ok((selection, sink.0))
    }
}
