use std::fs;
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use super::{Repository, RepositoryError, RepositoryResult};

/// What `load` does when the file exists but cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Surface `RepositoryError::Malformed`; nothing gets overwritten.
    #[default]
    Fail,
    /// Log a warning and behave as if the collection were empty. The next
    /// save replaces whatever was in the file.
    TreatAsEmpty,
}

impl FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fail" => Ok(MalformedPolicy::Fail),
            "empty" => Ok(MalformedPolicy::TreatAsEmpty),
            other => Err(format!("unknown malformed-store policy '{other}' (expected: fail, empty)")),
        }
    }
}

/// JSON array of records in a single file.
///
/// Saves go to a temp file in the target directory which is then renamed over
/// the target, so readers never observe a half-written collection.
#[derive(Debug)]
pub struct JsonFileRepository<T> {
    path: PathBuf,
    policy: MalformedPolicy,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonFileRepository<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: MalformedPolicy::default(),
            _records: PhantomData,
        }
    }

    pub fn with_policy(mut self, policy: MalformedPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> RepositoryError {
        RepositoryError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self) -> RepositoryResult<Vec<T>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "store file missing; starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<T>>(&content) {
            Ok(records) => {
                tracing::debug!(path = %self.path.display(), count = records.len(), "loaded store");
                Ok(records)
            }
            Err(e) => match self.policy {
                MalformedPolicy::Fail => Err(RepositoryError::Malformed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }),
                MalformedPolicy::TreatAsEmpty => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "malformed store treated as empty; existing content will be replaced on next save"
                    );
                    Ok(Vec::new())
                }
            },
        }
    }

    fn save(&self, records: &[T]) -> RepositoryResult<()> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        records
            .serialize(&mut ser)
            .map_err(|e| RepositoryError::Serialize(e.to_string()))?;
        buf.push(b'\n');

        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.io_error(e))?;
        tmp.write_all(&buf).map_err(|e| self.io_error(e))?;
        tmp.as_file().sync_all().map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;

        tracing::debug!(path = %self.path.display(), count = records.len(), "saved store");
        Ok(())
    }
}
