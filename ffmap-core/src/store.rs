// Load / modify / persist-if-changed access to a single JSON document
//
// No locking and no atomic rename: two runs against the same directory can
// lose each other's updates, and a crash mid-write can truncate the file.

use crate::error::StoreError;
use crate::model::{Graph, NodeDb, NodeList};
use crate::report::{EditLog, StoreKind, StoreOutcome, WriteStatus};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// A JSON document that lives in the map data directory.
///
/// `Default` is the empty document used when the file cannot be read.
pub trait Document: Serialize + DeserializeOwned + Default {
    const KIND: StoreKind;
}

impl Document for NodeDb {
    const KIND: StoreKind = StoreKind::NodeDb;
}

impl Document for NodeList {
    const KIND: StoreKind = StoreKind::NodeList;
}

impl Document for Graph {
    const KIND: StoreKind = StoreKind::Graph;
}

pub struct JsonStore<D> {
    path: PathBuf,
    document: D,
    load_error: Option<StoreError>,
    dirty: bool,
}

impl<D: Document> JsonStore<D> {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (document, load_error) = match read_document(&path) {
            Ok(document) => (document, None),
            Err(err) => {
                warn!(store = %D::KIND, "{}", err);
                (D::default(), Some(err))
            }
        };

        Self {
            path,
            document,
            load_error,
            dirty: false,
        }
    }

    /// Load the store from its well-known file name inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::load(dir.join(D::KIND.file_name()))
    }

    /// Whether the document was read from disk rather than substituted.
    pub fn existed(&self) -> bool {
        self.load_error.is_none()
    }

    pub fn load_error(&self) -> Option<&StoreError> {
        self.load_error.as_ref()
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Mutable access does not mark the store dirty, callers decide.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the document back if it was marked dirty.
    pub fn save(&mut self) -> WriteStatus {
        if !self.dirty {
            debug!(store = %D::KIND, "unchanged, not writing {}", self.path.display());
            return WriteStatus::Skipped;
        }

        match write_document(&self.path, &self.document) {
            Ok(()) => {
                info!(store = %D::KIND, "wrote {}", self.path.display());
                self.dirty = false;
                WriteStatus::Written
            }
            Err(err) => {
                warn!(store = %D::KIND, "{}", err);
                WriteStatus::Failed(err)
            }
        }
    }

    fn into_outcome(self, log: EditLog, write: WriteStatus) -> StoreOutcome {
        StoreOutcome {
            kind: D::KIND,
            path: self.path,
            load_error: self.load_error,
            changes: log.changes,
            missing: log.missing,
            write,
        }
    }
}

/// Load the store in `dir`, run `edit` over its document and persist the
/// result only if the edit reported a change.
pub fn edit_in_dir<D, F>(dir: &Path, edit: F) -> StoreOutcome
where
    D: Document,
    F: FnOnce(&mut D) -> EditLog,
{
    let mut store = JsonStore::<D>::in_dir(dir);
    let log = edit(store.document_mut());
    if log.changed() {
        store.mark_dirty();
    }
    let write = store.save();
    store.into_outcome(log, write)
}

fn read_document<D: DeserializeOwned>(path: &Path) -> Result<D, StoreError> {
    let raw = fs::read(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn write_document<D: Serialize>(path: &Path, document: &D) -> Result<(), StoreError> {
    let raw = serde_json::to_vec(document).map_err(|source| StoreError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, raw).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}
