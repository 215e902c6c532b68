use crate::library::Book;
use crate::mood::MoodProfile;
use crate::playback::{AudioClip, Layer};
use crate::sound::Facets;
use std::path::PathBuf;

mod core;
mod library;
mod navigation;
mod soundtrack;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug)]
pub(super) enum Effect {
    SaveConfig,
    SaveBookmark,
    PickBooks,
    ImportBooks(Vec<PathBuf>),
    ConfirmDelete(Book),
    LoadBook {
        book: Book,
        resume: bool,
    },
    RenderPage {
        request_id: u64,
        page: usize,
    },
    FetchSoundtrack {
        request_id: u64,
        profile: MoodProfile,
        facets: Facets,
    },
    PlayClip {
        layer: Layer,
        clip: AudioClip,
    },
    StopLayer(Layer),
    StopAudio,
}
