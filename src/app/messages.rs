use crate::library::Book;
use crate::playback::AudioClip;
use crate::sound::Facets;
use iced::keyboard::{Key, Modifiers};
use std::path::PathBuf;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    AddBookRequested,
    BooksImported(ImportReport),
    OpenBook {
        id: String,
        resume: bool,
    },
    BookOpened {
        book: Book,
        page_count: usize,
        resume: bool,
    },
    BookOpenFailed {
        id: String,
        error: String,
    },
    DeleteBookRequested(String),
    BackToLibrary,
    NextPage,
    PreviousPage,
    PageReady {
        request_id: u64,
        page: usize,
        image: Result<PathBuf, String>,
        text: Option<String>,
    },
    ToggleSound,
    SoundtrackReady {
        request_id: u64,
        facets: Facets,
        mood: Option<AudioClip>,
        environment: Option<AudioClip>,
    },
    WindowResized {
        width: f32,
        height: f32,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
    },
}

/// Outcome of importing a batch of picked files.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if !self.added.is_empty() {
            parts.push(format!("Added {}", self.added.join(", ")));
        }
        if !self.skipped.is_empty() {
            parts.push(format!("Already in library: {}", self.skipped.join(", ")));
        }
        if !self.failed.is_empty() {
            parts.push(format!("Failed: {}", self.failed.join("; ")));
        }
        if parts.is_empty() {
            "Nothing imported".to_string()
        } else {
            parts.join(". ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_each_outcome() {
        let report = ImportReport {
            added: vec!["dune.pdf".into()],
            skipped: vec!["emma.pdf".into()],
            failed: vec!["broken.pdf: copy failed".into()],
        };
        assert_eq!(
            report.summary(),
            "Added dune.pdf. Already in library: emma.pdf. Failed: broken.pdf: copy failed"
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(ImportReport::default().summary(), "Nothing imported");
    }
}
