//! Library configuration, read from the environment with file-layout defaults.

use std::path::{Path, PathBuf};

use libris_inventory::DEFAULT_WEIGHT_BUDGET;

pub const ENV_DATA_DIR: &str = "LIBRIS_DATA_DIR";
pub const ENV_REPORTS_DIR: &str = "LIBRIS_REPORTS_DIR";
pub const ENV_INVENTORY_FILE: &str = "LIBRIS_INVENTORY_FILE";
pub const ENV_SHELF_WEIGHT_BUDGET: &str = "LIBRIS_SHELF_WEIGHT_BUDGET";

const LOANS_FILE: &str = "loans.json";
const RESERVATIONS_FILE: &str = "reservations.json";
const REPORT_FILE: &str = "value_report.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryConfig {
    /// Directory holding the inventory file and both ledgers.
    pub data_dir: PathBuf,
    /// Directory receiving generated reports.
    pub reports_dir: PathBuf,
    /// Inventory loaded on open (`.csv` or `.json`).
    pub inventory_file: PathBuf,
    /// Weight budget used by the backtracking shelf optimizer.
    pub shelf_weight_budget: f64,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self::rooted_at(Path::new("data"), Path::new("reports"))
    }
}

impl LibraryConfig {
    /// Default layout below the given directories.
    pub fn rooted_at(data_dir: &Path, reports_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            reports_dir: reports_dir.to_path_buf(),
            inventory_file: data_dir.join("books.csv"),
            shelf_weight_budget: DEFAULT_WEIGHT_BUDGET,
        }
    }

    /// Read `LIBRIS_*` variables from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Missing keys fall back to defaults; a malformed budget is logged and
    /// replaced by the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_dir = lookup(ENV_DATA_DIR).map_or_else(|| PathBuf::from("data"), PathBuf::from);
        let reports_dir = lookup(ENV_REPORTS_DIR).map_or_else(|| PathBuf::from("reports"), PathBuf::from);

        let mut config = Self::rooted_at(&data_dir, &reports_dir);

        if let Some(file) = lookup(ENV_INVENTORY_FILE) {
            config.inventory_file = PathBuf::from(file);
        }

        if let Some(raw) = lookup(ENV_SHELF_WEIGHT_BUDGET) {
            match raw.trim().parse::<f64>() {
                Ok(budget) if budget.is_finite() && budget >= 0.0 => config.shelf_weight_budget = budget,
                _ => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_WEIGHT_BUDGET,
                    "{ENV_SHELF_WEIGHT_BUDGET} is not a non-negative number; using default"
                ),
            }
        }

        config
    }

    pub fn loans_path(&self) -> PathBuf {
        self.data_dir.join(LOANS_FILE)
    }

    pub fn reservations_path(&self) -> PathBuf {
        self.data_dir.join(RESERVATIONS_FILE)
    }

    pub fn report_path(&self) -> PathBuf {
        self.reports_dir.join(REPORT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_file_layout() {
        let config = LibraryConfig::from_lookup(|_| None);
        assert_eq!(config, LibraryConfig::default());
        assert_eq!(config.inventory_file, PathBuf::from("data/books.csv"));
        assert_eq!(config.loans_path(), PathBuf::from("data/loans.json"));
        assert_eq!(config.reservations_path(), PathBuf::from("data/reservations.json"));
        assert_eq!(config.report_path(), PathBuf::from("reports/value_report.csv"));
        assert_eq!(config.shelf_weight_budget, 8.0);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = LibraryConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/srv/library"),
            (ENV_REPORTS_DIR, "/srv/out"),
            (ENV_SHELF_WEIGHT_BUDGET, " 12.5 "),
        ]));
        assert_eq!(config.inventory_file, PathBuf::from("/srv/library/books.csv"));
        assert_eq!(config.report_path(), PathBuf::from("/srv/out/value_report.csv"));
        assert_eq!(config.shelf_weight_budget, 12.5);

        let config = LibraryConfig::from_lookup(lookup_from(&[(ENV_INVENTORY_FILE, "catalog.json")]));
        assert_eq!(config.inventory_file, PathBuf::from("catalog.json"));
    }

    #[test]
    fn malformed_budget_falls_back_to_default() {
        for raw in ["heavy", "-1", "NaN", "inf"] {
            let config = LibraryConfig::from_lookup(lookup_from(&[(ENV_SHELF_WEIGHT_BUDGET, raw)]));
            assert_eq!(config.shelf_weight_budget, DEFAULT_WEIGHT_BUDGET, "{raw}");
        }
    }
}
