// Outcome of a maintenance run, per store and per artifact

use crate::error::{ArtifactError, StoreError};
use crate::model::Role;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    NodeDb,
    NodeList,
    Graph,
}

impl StoreKind {
    pub fn file_name(&self) -> &'static str {
        match self {
            StoreKind::NodeDb => "nodes.json",
            StoreKind::NodeList => "nodelist.json",
            StoreKind::Graph => "graph.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKind::NodeDb => "nodedb",
            StoreKind::NodeList => "nodelist",
            StoreKind::Graph => "graph",
        }
    }
}

impl fmt::Display for StoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single mutation applied to a store document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    RoleChanged {
        node_id: String,
        /// `None` when the record had no role before.
        from: Option<String>,
        to: Role,
    },
    LocationCleared {
        node_id: String,
    },
    Removed {
        node_id: String,
    },
    /// A graph vertex went away together with the links touching it.
    GraphNodeRemoved {
        node_id: String,
        index: usize,
        links: Vec<usize>,
    },
}

/// What an editor did to one document, before it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLog {
    pub changes: Vec<Change>,
    /// Requested ids the store does not know about.
    pub missing: Vec<String>,
}

impl EditLog {
    pub fn changed(&self) -> bool {
        !self.changes.is_empty()
    }
}

#[derive(Debug)]
pub enum WriteStatus {
    /// Nothing changed, the file was left alone.
    Skipped,
    Written,
    Failed(StoreError),
}

#[derive(Debug)]
pub struct StoreOutcome {
    pub kind: StoreKind,
    pub path: PathBuf,
    /// Set when the store could not be read and an empty document was used.
    pub load_error: Option<StoreError>,
    pub changes: Vec<Change>,
    pub missing: Vec<String>,
    pub write: WriteStatus,
}

impl StoreOutcome {
    pub fn written(&self) -> bool {
        matches!(self.write, WriteStatus::Written)
    }
}

#[derive(Debug)]
pub struct RrdOutcome {
    pub node_id: String,
    pub path: PathBuf,
    pub present: bool,
    pub removed: bool,
}

#[derive(Debug, Default)]
pub struct ArtifactOutcome {
    pub rrd: Vec<RrdOutcome>,
    pub images_removed: Vec<PathBuf>,
    /// Deletion failures. They are reported but never stop the cleanup.
    pub ignored: Vec<ArtifactError>,
}

impl ArtifactOutcome {
    pub fn no_images_found(&self) -> bool {
        self.images_removed.is_empty()
    }
}

#[derive(Debug)]
pub struct ModifyReport {
    /// Role name that was asked for but is not a known role.
    pub rejected_role: Option<String>,
    pub nodedb: StoreOutcome,
    pub nodelist: StoreOutcome,
}

impl ModifyReport {
    pub fn stores(&self) -> [&StoreOutcome; 2] {
        [&self.nodedb, &self.nodelist]
    }
}

#[derive(Debug)]
pub struct RemoveReport {
    pub nodedb: StoreOutcome,
    pub nodelist: StoreOutcome,
    pub graph: StoreOutcome,
    pub artifacts: ArtifactOutcome,
}

impl RemoveReport {
    pub fn stores(&self) -> [&StoreOutcome; 3] {
        [&self.nodedb, &self.nodelist, &self.graph]
    }
}
