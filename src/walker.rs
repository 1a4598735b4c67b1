//! Template tree enumeration.

use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The regular files below a templates root.
///
/// Every call to [`TemplateTree::files`] starts a new traversal, so the
/// sequence can be consumed any number of times.
#[derive(Debug, Clone)]
pub struct TemplateTree {
    root: PathBuf,
}

impl TemplateTree {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily yields every regular file. Symlinks and special files are
    /// skipped; an unreadable directory yields `Error::WalkError`.
    pub fn files(&self) -> impl Iterator<Item = Result<PathBuf>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(entry) => {
                    if !entry.file_type().is_dir() {
                        debug!("Skipping non regular file {}", entry.path().display());
                    }
                    None
                }
                Err(e) => Some(Err(walk_error(&self.root, e))),
            })
    }
}

fn walk_error(root: &Path, source: walkdir::Error) -> Error {
    let path = source.path().unwrap_or(root).display().to_string();
    Error::WalkError { path, source }
}

/// Calls `visit` once per regular file below `root`, stopping at the first error.
pub fn walk<P, F>(root: P, mut visit: F) -> Result<()>
where
    P: Into<PathBuf>,
    F: FnMut(&Path) -> Result<()>,
{
    let tree = TemplateTree::new(root);
    for file in tree.files() {
        visit(&file?)?;
    }
    Ok(())
}
