//! Directory traversal.

use std::{
    io,
    path::{Path, PathBuf},
};

use walkdir::{DirEntry, WalkDir};

/// Yields every file below a root directory, in no particular order.
///
/// An `Err` item aborts whoever is consuming the walk.
pub trait Traversal: Send + Sync {
    /// Walk `root` recursively.
    fn walk<'a>(&'a self, root: &'a Path) -> Box<dyn Iterator<Item = io::Result<PathBuf>> + 'a>;
}

/// Filesystem walker built on `walkdir`.
///
/// Hidden files and directories (names starting with `.`) are skipped.
/// Symlinks are followed.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWalker;

impl Traversal for FsWalker {
    fn walk<'a>(&'a self, root: &'a Path) -> Box<dyn Iterator<Item = io::Result<PathBuf>> + 'a> {
        let entries = WalkDir::new(root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
                Ok(_) => None,
                Err(e) => Some(Err(io::Error::from(e))),
            });

        Box::new(entries)
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}
