//! Whole-collection record storage.
//!
//! Every mutation above this layer is read full collection, edit in memory,
//! write full collection. There is no locking between the read and the write:
//! a single active process per data directory is assumed.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryRepository;
pub use json_file::{JsonFileRepository, MalformedPolicy};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The persisted collection exists but cannot be decoded.
    #[error("malformed store {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("failed to serialize records: {0}")]
    Serialize(String),
}

/// Load/save of a complete named collection of records.
pub trait Repository<T>: Send + Sync {
    /// Full collection; empty when nothing has been stored yet.
    fn load(&self) -> RepositoryResult<Vec<T>>;

    /// Replace the full collection with `records`.
    fn save(&self, records: &[T]) -> RepositoryResult<()>;
}

impl<T, R> Repository<T> for Arc<R>
where
    R: Repository<T> + ?Sized,
{
    fn load(&self) -> RepositoryResult<Vec<T>> {
        (**self).load()
    }

    fn save(&self, records: &[T]) -> RepositoryResult<()> {
        (**self).save(records)
    }
}
