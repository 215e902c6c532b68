//! The book library: a flat folder of PDFs plus a folder of thumbnails.

use crate::bookmarks::BookmarkStore;
use crate::cache;
use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One PDF in the library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    /// File name inside the library folder, e.g. `dune.pdf`. Used as the
    /// bookmark key.
    pub id: String,
    /// File stem, shown to the reader.
    pub title: String,
    pub path: PathBuf,
    pub thumbnail: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone)]
pub struct Library {
    books_dir: PathBuf,
    thumbnails_dir: PathBuf,
    cache_dir: PathBuf,
    thumbnail_size: u32,
}

impl Library {
    pub fn new(
        books_dir: impl Into<PathBuf>,
        thumbnails_dir: impl Into<PathBuf>,
        cache_dir: impl Into<PathBuf>,
        thumbnail_size: u32,
    ) -> Self {
        Self {
            books_dir: books_dir.into(),
            thumbnails_dir: thumbnails_dir.into(),
            cache_dir: cache_dir.into(),
            thumbnail_size,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Copy `source` into the library unless a book with the same file name is
    /// already there, then render its thumbnail.
    pub fn add_book(&self, source: &Path) -> Result<AddOutcome> {
        self.add_book_with(source, |pdf, thumb, size| {
            crate::pdf::render_thumbnail(pdf, thumb, size)
        })
    }

    fn add_book_with<F>(&self, source: &Path, make_thumbnail: F) -> Result<AddOutcome>
    where
        F: FnOnce(&Path, &Path, u32) -> Result<()>,
    {
        ensure_dir(&self.books_dir)?;
        let file_name = source
            .file_name()
            .ok_or_else(|| anyhow!("Not a file: {}", source.display()))?;
        let destination = self.books_dir.join(file_name);

        if destination.exists() {
            info!(path = %destination.display(), "Book already in library; not overwriting");
            return Ok(AddOutcome::AlreadyPresent);
        }

        fs::copy(source, &destination).with_context(|| {
            format!(
                "Failed to copy {} into {}",
                source.display(),
                self.books_dir.display()
            )
        })?;
        info!(path = %destination.display(), "Imported book");

        let book = self.book_at(&destination)?;
        ensure_dir(&self.thumbnails_dir)?;
        if let Err(err) = make_thumbnail(&book.path, &book.thumbnail, self.thumbnail_size) {
            warn!(book = %book.id, "Failed to create thumbnail: {err:#}");
        }
        Ok(AddOutcome::Added)
    }

    /// All PDFs in the library, sorted by file name. A missing library folder
    /// is an empty library.
    pub fn list_books(&self) -> Result<Vec<Book>> {
        let entries = match fs::read_dir(&self.books_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to list library {}", self.books_dir.display())
                });
            }
        };

        let mut books = Vec::new();
        for entry in entries {
            let entry = entry.context("Failed to read library entry")?;
            let path = entry.path();
            if path.is_file() && is_pdf(&path) {
                books.push(self.book_at(&path)?);
            }
        }
        books.sort_by(|a, b| a.id.cmp(&b.id));
        debug!(count = books.len(), "Listed library");
        Ok(books)
    }

    pub fn find(&self, id: &str) -> Option<Book> {
        let path = self.books_dir.join(id);
        if path.is_file() {
            self.book_at(&path).ok()
        } else {
            None
        }
    }

    /// Remove a book together with its thumbnail, bookmark and render cache.
    /// Returns `false` when the book is not in the library.
    ///
    /// Once the PDF is gone every dependent entry is still attempted; any
    /// that could not be removed are reported together in the error.
    pub fn delete_book(&self, id: &str, bookmarks: &mut BookmarkStore) -> Result<bool> {
        let Some(book) = self.find(id) else {
            debug!(book = id, "Delete requested for unknown book");
            return Ok(false);
        };

        fs::remove_file(&book.path)
            .with_context(|| format!("Failed to delete {}", book.path.display()))?;

        let mut leftovers = Vec::new();
        if let Err(err) = bookmarks.remove(&book.id) {
            warn!(book = %book.id, "Failed to remove bookmark: {err:#}");
            leftovers.push(format!("bookmark ({err:#})"));
        }
        if book.thumbnail.exists() {
            if let Err(err) = fs::remove_file(&book.thumbnail) {
                warn!(path = %book.thumbnail.display(), "Failed to delete thumbnail: {err}");
                leftovers.push(format!("thumbnail {} ({err})", book.thumbnail.display()));
            }
        }
        cache::purge(&self.cache_dir, &book.path);

        if !leftovers.is_empty() {
            anyhow::bail!(
                "Deleted {} but could not remove its {}",
                book.id,
                leftovers.join(", ")
            );
        }
        info!(book = %book.id, "Deleted book");
        Ok(true)
    }

    /// Thumbnail path if it has been generated.
    pub fn thumbnail_for(&self, book: &Book) -> Option<PathBuf> {
        book.thumbnail.is_file().then(|| book.thumbnail.clone())
    }

    fn book_at(&self, path: &Path) -> Result<Book> {
        let id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow!("Not a file: {}", path.display()))?;
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| id.clone());
        let absolute = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        Ok(Book {
            thumbnail: self.thumbnails_dir.join(format!("{id}.png")),
            id,
            title,
            path: absolute,
        })
    }
}

/// Create `dir` (and parents) if missing. Calling it again is a no-op.
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    debug!(path = %dir.display(), "Created directory");
    Ok(())
}

fn is_pdf(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase()),
        Some(ext) if ext == "pdf"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Fixture {
        _tmp: TempDir,
        root: PathBuf,
        library: Library,
        bookmarks: BookmarkStore,
    }

    fn fixture() -> Fixture {
        let tmp = TempDir::new().expect("temp dir");
        let root = tmp.path().to_path_buf();
        let library = Library::new(
            root.join("books"),
            root.join("thumbnails"),
            root.join(".cache"),
            256,
        );
        let bookmarks = BookmarkStore::load(root.join("bookmarks.json"));
        Fixture {
            _tmp: tmp,
            root,
            library,
            bookmarks,
        }
    }

    fn write_source(root: &Path, name: &str, body: &[u8]) -> PathBuf {
        let dir = root.join("incoming");
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join(name);
        fs::write(&path, body).expect("write source");
        path
    }

    fn fake_thumbnail(_pdf: &Path, thumb: &Path, _size: u32) -> Result<()> {
        fs::write(thumb, b"png")?;
        Ok(())
    }

    #[test]
    fn ensure_dir_is_idempotent() {
        let f = fixture();
        let dir = f.root.join("a").join("b");
        ensure_dir(&dir).expect("first call");
        ensure_dir(&dir).expect("second call");
        assert!(dir.is_dir());
    }

    #[test]
    fn ensure_dir_fails_when_path_is_a_file() {
        let f = fixture();
        let file = f.root.join("occupied");
        fs::write(&file, b"x").expect("write");
        assert!(ensure_dir(&file).is_err());
    }

    #[test]
    fn add_copies_and_creates_thumbnail() {
        let f = fixture();
        let source = write_source(&f.root, "dune.pdf", b"%PDF-1.4 dune");

        let outcome = f
            .library
            .add_book_with(&source, fake_thumbnail)
            .expect("add book");
        assert_eq!(outcome, AddOutcome::Added);

        let books = f.library.list_books().expect("list");
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].id, "dune.pdf");
        assert_eq!(books[0].title, "dune");
        assert!(books[0].thumbnail.ends_with("dune.pdf.png"));
        assert!(f.library.thumbnail_for(&books[0]).is_some());
    }

    #[test]
    fn add_never_overwrites_existing_book() {
        let f = fixture();
        let first = write_source(&f.root, "dune.pdf", b"original");
        f.library
            .add_book_with(&first, fake_thumbnail)
            .expect("first add");

        let other_dir = f.root.join("elsewhere");
        fs::create_dir_all(&other_dir).expect("mkdir");
        let second = other_dir.join("dune.pdf");
        fs::write(&second, b"replacement").expect("write");

        let outcome = f
            .library
            .add_book_with(&second, fake_thumbnail)
            .expect("second add");
        assert_eq!(outcome, AddOutcome::AlreadyPresent);
        let stored = fs::read(f.root.join("books").join("dune.pdf")).expect("read");
        assert_eq!(stored, b"original");
    }

    #[test]
    fn thumbnail_failure_keeps_import() {
        let f = fixture();
        let source = write_source(&f.root, "emma.pdf", b"%PDF");
        let outcome = f
            .library
            .add_book_with(&source, |_, _, _| Err(anyhow!("converter missing")))
            .expect("add succeeds without thumbnail");
        assert_eq!(outcome, AddOutcome::Added);
        let book = f.library.find("emma.pdf").expect("book present");
        assert!(f.library.thumbnail_for(&book).is_none());
    }

    #[test]
    fn list_ignores_non_pdfs_and_missing_folder() {
        let f = fixture();
        assert!(f.library.list_books().expect("empty list").is_empty());

        let books_dir = f.root.join("books");
        fs::create_dir_all(&books_dir).expect("mkdir");
        fs::write(books_dir.join("notes.txt"), b"x").expect("write");
        fs::write(books_dir.join("b.PDF"), b"x").expect("write");
        fs::write(books_dir.join("a.pdf"), b"x").expect("write");

        let ids: Vec<String> = f
            .library
            .list_books()
            .expect("list")
            .into_iter()
            .map(|b| b.id)
            .collect();
        assert_eq!(ids, vec!["a.pdf", "b.PDF"]);
    }

    #[test]
    fn delete_cascades_to_thumbnail_and_bookmark() {
        let mut f = fixture();
        let source = write_source(&f.root, "dune.pdf", b"%PDF");
        f.library
            .add_book_with(&source, fake_thumbnail)
            .expect("add");
        f.bookmarks.set("dune.pdf", 12).expect("bookmark");
        f.bookmarks.set("emma.pdf", 4).expect("bookmark");

        let removed = f
            .library
            .delete_book("dune.pdf", &mut f.bookmarks)
            .expect("delete");
        assert!(removed);
        assert!(!f.root.join("books").join("dune.pdf").exists());
        assert!(!f.root.join("thumbnails").join("dune.pdf.png").exists());
        assert_eq!(f.bookmarks.get("dune.pdf"), None);
        assert_eq!(f.bookmarks.get("emma.pdf"), Some(4));

        let reloaded = BookmarkStore::load(f.root.join("bookmarks.json"));
        assert_eq!(reloaded.get("dune.pdf"), None);
    }

    #[test]
    fn delete_removes_bookmark_even_when_thumbnail_is_stuck() {
        let mut f = fixture();
        let source = write_source(&f.root, "dune.pdf", b"%PDF");
        f.library
            .add_book_with(&source, |_, _, _| Ok(()))
            .expect("add");
        // A directory where the thumbnail file should be cannot be unlinked.
        fs::create_dir_all(f.root.join("thumbnails").join("dune.pdf.png")).expect("mkdir");
        f.bookmarks.set("dune.pdf", 7).expect("bookmark");

        let err = f
            .library
            .delete_book("dune.pdf", &mut f.bookmarks)
            .expect_err("thumbnail removal fails");
        assert!(format!("{err:#}").contains("thumbnail"));
        assert!(!f.root.join("books").join("dune.pdf").exists());
        assert_eq!(f.bookmarks.get("dune.pdf"), None);
        let reloaded = BookmarkStore::load(f.root.join("bookmarks.json"));
        assert_eq!(reloaded.get("dune.pdf"), None);
    }

    #[test]
    fn delete_of_absent_book_is_noop() {
        let mut f = fixture();
        f.bookmarks.set("ghost.pdf", 3).expect("bookmark");
        let removed = f
            .library
            .delete_book("ghost.pdf", &mut f.bookmarks)
            .expect("delete");
        assert!(!removed);
        assert_eq!(f.bookmarks.get("ghost.pdf"), Some(3));
    }
}
