//! Last-read page per book.
//!
//! The whole library shares one JSON object, `{ "<book>": <page>, ... }`.
//! Every change rewrites the file through a temp file in the same directory
//! followed by a rename, so a crash mid-write leaves the previous version.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct BookmarkStore {
    path: PathBuf,
    entries: BTreeMap<String, usize>,
}

impl BookmarkStore {
    /// Load bookmarks from `path`. A missing or malformed file yields an empty
    /// store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(data) => match serde_json::from_str::<BTreeMap<String, usize>>(&data) {
                Ok(entries) => {
                    debug!(path = %path.display(), count = entries.len(), "Loaded bookmarks");
                    entries
                }
                Err(err) => {
                    warn!(path = %path.display(), "Malformed bookmark file, starting empty: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                warn!(path = %path.display(), "Failed to read bookmark file: {err}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn get(&self, book: &str) -> Option<usize> {
        self.entries.get(book).copied()
    }

    /// Record `page` for `book` and rewrite the file.
    pub fn set(&mut self, book: &str, page: usize) -> Result<()> {
        if self.entries.get(book) == Some(&page) {
            return Ok(());
        }
        self.entries.insert(book.to_string(), page);
        self.save()
    }

    /// Drop the entry for `book`. Returns whether one existed.
    pub fn remove(&mut self, book: &str) -> Result<bool> {
        if self.entries.remove(book).is_none() {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)
            .with_context(|| format!("Failed to create bookmark dir {}", parent.display()))?;

        let contents =
            serde_json::to_string_pretty(&self.entries).context("Failed to serialize bookmarks")?;
        write_atomic(&parent, &self.path, contents.as_bytes())?;
        debug!(path = %self.path.display(), count = self.entries.len(), "Saved bookmarks");
        Ok(())
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<()> {
    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    temp.write_all(bytes).context("Failed to write bookmark temp file")?;
    temp.flush().context("Failed to flush bookmark temp file")?;
    temp.persist(target)
        .map_err(|err| err.error)
        .with_context(|| format!("Failed to replace {}", target.display()))?;
    Ok(())
}
