//! Exception registry: known gaps between corpus intent and parser state.
//!
//! The corpus says what *should* happen; the registry records where the
//! parser currently disagrees. Keeping the two apart means known gaps are
//! tracked explicitly instead of silently passing or permanently failing.
//! The sets are loaded once at startup and never mutated afterward.

use crate::error::HarnessError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;

/// On-disk registry format.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct RegistryFile {
    /// Good files known to currently fail the parser.
    #[serde(default)]
    skipped_good: Vec<String>,
    /// Bad files known to currently parse cleanly.
    #[serde(default)]
    skipped_bad: Vec<String>,
}

/// Immutable membership sets for the two exception lists.
#[derive(Debug, Clone, Default)]
pub struct ExceptionRegistry {
    skipped_good: BTreeSet<String>,
    skipped_bad: BTreeSet<String>,
}

impl ExceptionRegistry {
    /// Build a registry from explicit sets, rejecting overlapping entries.
    pub fn from_sets<I, J>(skipped_good: I, skipped_bad: J) -> Result<Self, HarnessError>
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        let skipped_good: BTreeSet<String> = skipped_good.into_iter().collect();
        let skipped_bad: BTreeSet<String> = skipped_bad.into_iter().collect();

        let overlap: Vec<String> = skipped_good.intersection(&skipped_bad).cloned().collect();
        if !overlap.is_empty() {
            return Err(HarnessError::RegistryOverlap(overlap));
        }

        Ok(ExceptionRegistry {
            skipped_good,
            skipped_bad,
        })
    }

    /// Load a registry from a JSON file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file: RegistryFile = serde_json::from_str(&content)?;
        let registry = Self::from_sets(file.skipped_good, file.skipped_bad)?;
        Ok(registry)
    }

    pub fn is_skipped_good(&self, filename: &str) -> bool {
        self.skipped_good.contains(filename)
    }

    pub fn is_skipped_bad(&self, filename: &str) -> bool {
        self.skipped_bad.contains(filename)
    }

    /// Skipped-good filenames in sorted order.
    pub fn skipped_good(&self) -> impl Iterator<Item = &str> {
        self.skipped_good.iter().map(String::as_str)
    }

    /// Skipped-bad filenames in sorted order.
    pub fn skipped_bad(&self) -> impl Iterator<Item = &str> {
        self.skipped_bad.iter().map(String::as_str)
    }
}
