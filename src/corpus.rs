//! Corpus discovery: deterministic enumeration of sample files.
//!
//! Listings are sorted by full path so execution order never depends on the
//! filesystem's enumeration order.

use crate::error::HarnessError;
use crate::registry::ExceptionRegistry;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Corpus partition a sample file belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Good,
    Bad,
}

impl Category {
    /// Subdirectory name under the corpus root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Category::Good => "good",
            Category::Bad => "bad",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// One corpus input, identified by filename for registry purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusFile {
    pub category: Category,
    pub path: PathBuf,
    pub filename: String,
}

/// True for files the parser accepts as Ion text input.
pub fn is_ion_text(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "ion")
}

/// List the category's Ion files that are not on the matching exception list.
///
/// The inclusion predicate is pure: extension filter AND NOT registry
/// membership, over path metadata only.
pub fn list_files(
    root: &Path,
    category: Category,
    registry: &ExceptionRegistry,
) -> Result<Vec<CorpusFile>, HarnessError> {
    let files = walk_category(root, category)?;
    let excluded = |filename: &str| match category {
        Category::Good => registry.is_skipped_good(filename),
        Category::Bad => registry.is_skipped_bad(filename),
    };
    Ok(files
        .into_iter()
        .filter(|file| !excluded(&file.filename))
        .collect())
}

/// Resolve registry filenames to corpus files for an inverse sweep.
///
/// Every name must resolve; a leftover entry means the registry references a
/// file the corpus no longer contains, which is a configuration error.
pub fn find_registered<'a, I>(
    root: &Path,
    category: Category,
    filenames: I,
) -> Result<Vec<CorpusFile>, HarnessError>
where
    I: IntoIterator<Item = &'a str>,
{
    let filenames: Vec<&str> = filenames.into_iter().collect();
    if filenames.is_empty() {
        return Ok(Vec::new());
    }

    let available = walk_category(root, category)?;
    let mut resolved = Vec::new();
    for filename in filenames {
        let file = available
            .iter()
            .find(|file| file.filename == filename)
            .cloned()
            .ok_or_else(|| HarnessError::RegistryEntryMissing {
                category,
                filename: filename.to_string(),
            })?;
        resolved.push(file);
    }
    resolved.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(resolved)
}

/// Enumerate all Ion files under the category directory, sorted by path.
fn walk_category(root: &Path, category: Category) -> Result<Vec<CorpusFile>, HarnessError> {
    let dir = root.join(category.dir_name());
    if !dir.is_dir() {
        return Err(HarnessError::CorpusNotFound(dir));
    }

    let mut files = Vec::new();
    collect_files(&dir, category, &mut files)
        .map_err(|source| HarnessError::CorpusWalk { path: dir, source })?;
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

fn collect_files(
    dir: &Path,
    category: Category,
    files: &mut Vec<CorpusFile>,
) -> std::io::Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, category, files)?;
        } else if is_ion_text(&path) {
            let filename = entry.file_name().to_string_lossy().to_string();
            files.push(CorpusFile {
                category,
                path,
                filename,
            });
        }
    }
    Ok(())
}
