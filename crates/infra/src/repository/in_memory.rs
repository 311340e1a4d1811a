use std::sync::RwLock;

use super::{Repository, RepositoryResult};

/// In-memory collection for tests/dev.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    inner: RwLock<Vec<T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            inner: RwLock::new(records),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Clone + Send + Sync,
{
    fn load(&self) -> RepositoryResult<Vec<T>> {
        match self.inner.read() {
            Ok(records) => Ok(records.clone()),
            Err(poisoned) => Ok(poisoned.into_inner().clone()),
        }
    }

    fn save(&self, records: &[T]) -> RepositoryResult<()> {
        let mut guard = match self.inner.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = records.to_vec();
        Ok(())
    }
}
