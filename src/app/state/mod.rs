mod reader;
mod sound;
mod ui;

use crate::bookmarks::BookmarkStore;
use crate::config::{AppConfig, CONFIG_PATH, save_config};
use crate::library::{Library, ensure_dir};
use iced::Task;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::messages::Message;
use super::update::Effect;

pub(in crate::app) use reader::ReaderState;
pub(in crate::app) use sound::SoundState;
pub(in crate::app) use ui::{Screen, ShelfState};

/// Core application state composed of sub-models.
pub struct App {
    pub(super) config: AppConfig,
    /// Where settings are saved; `None` when the file must not be touched.
    pub(super) config_path: Option<PathBuf>,
    pub(super) library: Library,
    pub(super) bookmarks: BookmarkStore,
    pub(super) screen: Screen,
    pub(super) shelf: ShelfState,
    pub(super) reader: Option<ReaderState>,
    pub(super) sound: SoundState,
    pub(super) next_render_request: u64,
}

impl App {
    pub(super) fn bootstrap(
        config: AppConfig,
        config_writable: bool,
        import: Vec<PathBuf>,
    ) -> (App, Task<Message>) {
        let library = Library::new(
            &config.books_dir,
            &config.thumbnails_dir,
            &config.cache_dir,
            config.thumbnail_size.max(16),
        );
        let bookmarks = BookmarkStore::load(&config.bookmarks_path);

        let mut app = App {
            sound: SoundState::new(&config),
            library,
            bookmarks,
            screen: Screen::Library,
            shelf: ShelfState::new(),
            reader: None,
            next_render_request: 0,
            config,
            config_path: config_writable.then(|| PathBuf::from(CONFIG_PATH)),
        };

        for dir in [&app.config.books_dir, &app.config.thumbnails_dir] {
            if let Err(err) = ensure_dir(Path::new(dir)) {
                warn!("Failed to prepare library folders: {err:#}");
                app.shelf.status = Some(format!("{err:#}"));
            }
        }
        app.refresh_books();
        info!(
            books = app.shelf.books.len(),
            sound = app.config.sound_enabled,
            "Library ready"
        );

        let task = if import.is_empty() {
            Task::none()
        } else {
            app.run_effect(Effect::ImportBooks(import))
        };
        (app, task)
    }

    /// Re-read the library folder into the shelf.
    pub(super) fn refresh_books(&mut self) {
        match self.library.list_books() {
            Ok(books) => self.shelf.books = books,
            Err(err) => {
                warn!("Failed to list library: {err:#}");
                self.shelf.status = Some(format!("Could not read library: {err:#}"));
            }
        }
    }

    pub(super) fn persist_bookmark(&mut self) {
        let Some(reader) = self.reader.as_ref() else {
            return;
        };
        if let Err(err) = self.bookmarks.set(&reader.book.id, reader.current_page) {
            warn!(book = %reader.book.id, "Failed to save bookmark: {err:#}");
        }
    }

    pub(super) fn save_config(&self) {
        let Some(path) = self.config_path.as_deref() else {
            debug!("Config file could not be parsed at startup; not overwriting it");
            return;
        };
        if let Err(err) = save_config(path, &self.config) {
            warn!("Failed to save config: {err:#}");
        }
    }

    pub(super) fn bookmark_for(&self, book_id: &str) -> Option<usize> {
        self.bookmarks.get(book_id)
    }
}

#[cfg(test)]
impl App {
    /// App over a scratch library with sound on. Nothing here opens an audio
    /// device or writes the real config file.
    pub(in crate::app) fn for_tests(root: &Path) -> App {
        let config = AppConfig::default();
        App {
            sound: SoundState::new(&config),
            library: Library::new(
                root.join("books"),
                root.join("thumbnails"),
                root.join(".cache"),
                64,
            ),
            bookmarks: BookmarkStore::load(root.join("bookmarks.json")),
            screen: Screen::Library,
            shelf: ShelfState::new(),
            reader: None,
            next_render_request: 0,
            config,
            config_path: None,
        }
    }

    /// Put a book of `page_count` pages on screen, as if it had just opened.
    pub(in crate::app) fn open_for_tests(&mut self, page_count: usize) {
        let book = crate::library::Book {
            id: "dune.pdf".into(),
            title: "dune".into(),
            path: PathBuf::from("books/dune.pdf"),
            thumbnail: PathBuf::from("thumbnails/dune.pdf.png"),
        };
        self.reader = Some(ReaderState::new(book, page_count, 0));
        self.screen = Screen::Reader;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unparsable_config_is_left_alone() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("config.toml");
        let original = "[library]\nbooks_dir = \"/srv/my-books\"\n[sound\nenabled = true\n";
        fs::write(&path, original).expect("write config");

        let loaded = load_config(&path);
        let mut app = App::for_tests(tmp.path());
        app.config = loaded.config;
        app.config_path = loaded.writable.then(|| path.clone());

        app.config.sound_enabled = !app.config.sound_enabled;
        app.save_config();
        assert_eq!(fs::read_to_string(&path).expect("read config"), original);
    }

    #[test]
    fn valid_config_is_saved() {
        let tmp = TempDir::new().expect("temp dir");
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[library]\nbooks_dir = \"/srv/my-books\"\n").expect("write config");

        let loaded = load_config(&path);
        let mut app = App::for_tests(tmp.path());
        app.config = loaded.config;
        app.config_path = loaded.writable.then(|| path.clone());

        app.config.sound_enabled = false;
        app.save_config();
        let reloaded = load_config(&path).config;
        assert!(!reloaded.sound_enabled);
        assert_eq!(reloaded.books_dir, "/srv/my-books");
    }
}
