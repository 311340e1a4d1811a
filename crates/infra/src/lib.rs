//! Infrastructure layer: JSON file storage, configuration and the store
//! services built on top of them.

pub mod config;
pub mod repository;
pub mod stores;


pub use config::StoreConfig;
pub use repository::{
    InMemoryRepository, JsonFileRepository, MalformedPolicy, Repository, RepositoryError,
    RepositoryResult,
};
pub use stores::{
    FileProductStore, FileSalesLedger, ProductStore, SalesLedger, StoreError, StoreResult,
    open_file_stores,
};
