//! Configuration loading and representation.

use std::path::PathBuf;

use crate::repository::MalformedPolicy;

pub const DATA_DIR_VAR: &str = "STOREKEEP_DATA_DIR";
pub const PRODUCTS_FILE_VAR: &str = "STOREKEEP_PRODUCTS_FILE";
pub const SALES_FILE_VAR: &str = "STOREKEEP_SALES_FILE";
pub const ON_MALFORMED_VAR: &str = "STOREKEEP_ON_MALFORMED";

/// Where the catalog and ledger live, and how unreadable files are handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub products_file: String,
    pub sales_file: String,
    pub malformed_policy: MalformedPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            products_file: "products.json".to_string(),
            sales_file: "sales.json".to_string(),
            malformed_policy: MalformedPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset or blank keys keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(file) = get(PRODUCTS_FILE_VAR) {
            config.products_file = file;
        }
        if let Some(file) = get(SALES_FILE_VAR) {
            config.sales_file = file;
        }
        if let Some(raw) = get(ON_MALFORMED_VAR) {
            match raw.parse() {
                Ok(policy) => config.malformed_policy = policy,
                Err(e) => tracing::warn!("{ON_MALFORMED_VAR}: {e}; using default"),
            }
        }

        config
    }

    pub fn products_path(&self) -> PathBuf {
        self.data_dir.join(&self.products_file)
    }

    pub fn sales_path(&self) -> PathBuf {
        self.data_dir.join(&self.sales_file)
    }
}
