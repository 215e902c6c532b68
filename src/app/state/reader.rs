use crate::library::Book;
use crate::mood::MoodProfile;
use std::path::PathBuf;

/// The open book and what is currently shown of it.
pub struct ReaderState {
    pub(in crate::app) book: Book,
    pub(in crate::app) page_count: usize,
    pub(in crate::app) current_page: usize,
    pub(in crate::app) page_image: Option<PathBuf>,
    pub(in crate::app) render_request: u64,
    pub(in crate::app) rendering: bool,
    pub(in crate::app) error: Option<String>,
    pub(in crate::app) profile: Option<MoodProfile>,
}

impl ReaderState {
    pub(in crate::app) fn new(book: Book, page_count: usize, start_page: usize) -> Self {
        let mut reader = Self {
            book,
            page_count,
            current_page: 0,
            page_image: None,
            render_request: 0,
            rendering: false,
            error: None,
            profile: None,
        };
        reader.set_page_clamped(start_page);
        reader
    }

    pub(in crate::app) fn set_page_clamped(&mut self, page: usize) {
        self.current_page = page.min(self.page_count.saturating_sub(1));
    }

    pub(in crate::app) fn has_next(&self) -> bool {
        self.current_page + 1 < self.page_count
    }

    pub(in crate::app) fn has_previous(&self) -> bool {
        self.current_page > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book() -> Book {
        Book {
            id: "dune.pdf".into(),
            title: "dune".into(),
            path: PathBuf::from("books/dune.pdf"),
            thumbnail: PathBuf::from("thumbnails/dune.pdf.png"),
        }
    }

    #[test]
    fn start_page_is_clamped_to_last_page() {
        let reader = ReaderState::new(book(), 10, 42);
        assert_eq!(reader.current_page, 9);
        assert!(!reader.has_next());
        assert!(reader.has_previous());
    }

    #[test]
    fn empty_document_stays_on_first_page() {
        let reader = ReaderState::new(book(), 0, 3);
        assert_eq!(reader.current_page, 0);
        assert!(!reader.has_next());
        assert!(!reader.has_previous());
    }
}
