//! Infrastructure error taxonomy for the harness.
//!
//! Classification mismatches are never errors: they are collected into sweep
//! records so one bad file cannot hide the rest. Everything here aborts the
//! enclosing sweep instead.

use crate::corpus::Category;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    /// The category directory under the corpus root does not exist.
    #[error("corpus directory not found: {}", .0.display())]
    CorpusNotFound(PathBuf),

    /// The category directory exists but could not be fully enumerated.
    #[error("corpus walk failed under {}: {source}", .path.display())]
    CorpusWalk {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A filename appears in both exception lists.
    #[error("exception registry lists {0:?} as both skipped-good and skipped-bad")]
    RegistryOverlap(Vec<String>),

    /// The registry names a file the matching corpus does not contain.
    #[error("registry entry {filename:?} not found in the {category} corpus")]
    RegistryEntryMissing { category: Category, filename: String },

    /// The parser or validator failed outside its documented failure channel.
    #[error("parser/validator failure on {}: {source}", .file.display())]
    Collaborator {
        file: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
