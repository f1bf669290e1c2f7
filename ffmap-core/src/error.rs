use std::path::PathBuf;
use thiserror::Error;

/// Failure to read or write one of the JSON stores.
///
/// These never abort a run: a failed load falls back to the empty document
/// and a failed save leaves the in-memory change unpersisted.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Error reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error writing {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error encoding {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Ignorable failure while deleting node artifacts.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Could not remove {}: {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid image pattern {pattern}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Could not read image directory entry: {0}")]
    Glob(#[from] glob::GlobError),
}

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Config file {} not found", .0.display())]
    NotFound(PathBuf),

    #[error("Config file {} not parsed: {source}", path.display())]
    Unparsable {
        path: PathBuf,
        #[source]
        source: config::ConfigError,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] config::ConfigError),
}

/// Role name outside of [`crate::Role::ALL`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

#[derive(Error, Debug)]
pub enum MaintenanceError {
    #[error("No node id given")]
    NoNodeIds,
}

pub type Result<T> = std::result::Result<T, MaintenanceError>;
