//! Layout of the render cache.
//!
//! Rasterized pages live under `<cache_dir>/<sha256 of the PDF path>/pages/`
//! so two books with the same file name in different folders never collide.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub fn hash_dir(cache_dir: &Path, pdf_path: &Path) -> PathBuf {
    let mut hasher = Sha256::new();
    hasher.update(pdf_path.as_os_str().to_string_lossy().as_bytes());
    let hash = format!("{:x}", hasher.finalize());
    cache_dir.join(hash)
}

pub fn page_image_path(cache_dir: &Path, pdf_path: &Path, page: usize, dpi: u32) -> PathBuf {
    hash_dir(cache_dir, pdf_path)
        .join("pages")
        .join(format!("page-{page}-{dpi}.png"))
}

/// Remove every cached artifact for a book. Errors are logged only.
pub fn purge(cache_dir: &Path, pdf_path: &Path) {
    let dir = hash_dir(cache_dir, pdf_path);
    if !dir.exists() {
        return;
    }
    match fs::remove_dir_all(&dir) {
        Ok(()) => debug!(path = %dir.display(), "Purged render cache"),
        Err(err) => warn!(path = %dir.display(), "Failed to purge render cache: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn page_paths_are_stable_and_distinct() {
        let cache = Path::new(".cache");
        let a = page_image_path(cache, Path::new("books/dune.pdf"), 3, 110);
        let b = page_image_path(cache, Path::new("books/dune.pdf"), 3, 110);
        let c = page_image_path(cache, Path::new("other/dune.pdf"), 3, 110);
        let d = page_image_path(cache, Path::new("books/dune.pdf"), 3, 150);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(a.ends_with("pages/page-3-110.png"));
    }

    #[test]
    fn purge_removes_book_directory() {
        let tmp = TempDir::new().expect("temp dir");
        let pdf = Path::new("books/dune.pdf");
        let page = page_image_path(tmp.path(), pdf, 0, 110);
        fs::create_dir_all(page.parent().expect("parent")).expect("mkdir");
        fs::write(&page, b"png").expect("write");

        purge(tmp.path(), pdf);
        assert!(!hash_dir(tmp.path(), pdf).exists());
    }
}
