//! JsonFileStore - one pretty-printed JSON file per document.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use super::DocumentStore;
use crate::error::StoreError;
use crate::model::Document;

/// File-backed document store rooted at a data directory.
///
/// A document named `peliculas` lives at `<dir>/peliculas.json` unless
/// [`with_file`](Self::with_file) maps it elsewhere. A missing file is an
/// [`StoreError::Io`]; call [`ensure`](Self::ensure) at startup to seed it.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
    files: HashMap<String, PathBuf>,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            document: dir.display().to_string(),
            source,
        })?;
        Ok(Self {
            dir,
            files: HashMap::new(),
        })
    }

    /// Store document `name` in `file` (relative to the data directory).
    pub fn with_file(mut self, name: &str, file: impl AsRef<Path>) -> Self {
        self.files.insert(name.to_string(), self.dir.join(file));
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing document `name`.
    pub fn path_of(&self, name: &str) -> PathBuf {
        self.files
            .get(name)
            .cloned()
            .unwrap_or_else(|| self.dir.join(format!("{name}.json")))
    }

    /// Seed the document with an empty collection if its file does not exist.
    pub fn ensure<D: Document>(&self) -> Result<(), StoreError> {
        let path = self.path_of(D::NAME);
        if path.exists() {
            return Ok(());
        }
        info!(document = D::NAME, path = %path.display(), "seeding empty document");
        self.save(&D::default())
    }
}

impl DocumentStore for JsonFileStore {
    fn read(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        fs::read(self.path_of(name))
            .map(Some)
            .map_err(|source| StoreError::Io {
                document: name.to_string(),
                source,
            })
    }

    fn write(&self, name: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
        let path = self.path_of(name);
        let io_err = |source: io::Error| StoreError::Io {
            document: name.to_string(),
            source,
        };

        // Write beside the target then rename, so readers never see a torn file.
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        fs::write(&tmp, bytes).map_err(io_err)?;
        if let Err(source) = fs::rename(&tmp, &path) {
            // Best effort: the rename error is the one worth reporting.
            let _ = fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        Ok(())
    }
}
