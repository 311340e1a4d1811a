//! Catalog and ledger services over whole-collection repositories.

pub mod error;
pub mod product_store;
pub mod sales_ledger;

pub use error::{StoreError, StoreResult};
pub use product_store::ProductStore;
pub use sales_ledger::SalesLedger;

use std::sync::Arc;

use storekeep_products::ProductRecord;
use storekeep_sales::Sale;

use crate::config::StoreConfig;
use crate::repository::JsonFileRepository;

/// Product store persisted to a JSON file.
pub type FileProductStore = ProductStore<JsonFileRepository<ProductRecord>>;

/// Sales ledger persisted to JSON files.
pub type FileSalesLedger =
    SalesLedger<JsonFileRepository<ProductRecord>, JsonFileRepository<Sale>>;

/// Wire a file-backed catalog and a ledger that shares it.
pub fn open_file_stores(config: &StoreConfig) -> (Arc<FileProductStore>, FileSalesLedger) {
    let products = Arc::new(ProductStore::new(
        JsonFileRepository::new(config.products_path()).with_policy(config.malformed_policy),
    ));
    let ledger = SalesLedger::new(
        products.clone(),
        JsonFileRepository::new(config.sales_path()).with_policy(config.malformed_policy),
    );
    (products, ledger)
}
