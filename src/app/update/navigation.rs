use super::super::state::{App, ReaderState, Screen};
use super::Effect;
use crate::library::Book;
use crate::mood::analyze_page;
use std::path::PathBuf;
use tracing::{debug, info, warn};

impl App {
    pub(super) fn handle_open_book(&mut self, id: String, resume: bool, effects: &mut Vec<Effect>) {
        if self.shelf.opening.is_some() {
            debug!(book = %id, "Ignoring open while another book is loading");
            return;
        }
        match self.library.find(&id) {
            Some(book) => effects.push(Effect::LoadBook { book, resume }),
            None => {
                warn!(book = %id, "Book vanished from the library");
                self.shelf.status = Some(format!("{id} is no longer in the library"));
                self.refresh_books();
            }
        }
    }

    pub(super) fn handle_book_opened(
        &mut self,
        book: Book,
        page_count: usize,
        resume: bool,
        effects: &mut Vec<Effect>,
    ) {
        self.shelf.opening = None;
        if page_count == 0 {
            self.shelf.status = Some(format!("{} has no pages", book.title));
            return;
        }
        let start_page = if resume {
            self.bookmark_for(&book.id).unwrap_or(0)
        } else {
            0
        };
        let reader = ReaderState::new(book, page_count, start_page);
        info!(
            book = %reader.book.id,
            pages = page_count,
            page = reader.current_page + 1,
            "Book opened"
        );
        self.reader = Some(reader);
        self.screen = Screen::Reader;
        self.shelf.status = None;
        self.sound.controller.reset();
        effects.extend(self.show_current_page());
    }

    pub(super) fn handle_book_open_failed(&mut self, id: String, error: String) {
        self.shelf.opening = None;
        warn!(book = %id, "Failed to open book: {error}");
        self.shelf.status = Some(format!("Could not open {id}: {error}"));
    }

    pub(super) fn handle_back_to_library(&mut self, effects: &mut Vec<Effect>) {
        if self.screen != Screen::Reader {
            return;
        }
        effects.push(Effect::SaveBookmark);
        effects.push(Effect::StopAudio);
        self.sound.controller.reset();
        self.screen = Screen::Library;
        self.reader = None;
        self.refresh_books();
    }

    pub(super) fn handle_next_page(&mut self, effects: &mut Vec<Effect>) {
        let Some(reader) = self.reader.as_ref() else {
            return;
        };
        if reader.has_next() {
            let page = reader.current_page + 1;
            effects.extend(self.go_to_page(page));
        }
    }

    pub(super) fn handle_previous_page(&mut self, effects: &mut Vec<Effect>) {
        let Some(reader) = self.reader.as_ref() else {
            return;
        };
        if reader.has_previous() {
            let page = reader.current_page - 1;
            effects.extend(self.go_to_page(page));
        }
    }

    pub(super) fn handle_page_ready(
        &mut self,
        request_id: u64,
        page: usize,
        image: Result<PathBuf, String>,
        text: Option<String>,
        effects: &mut Vec<Effect>,
    ) {
        let Some(reader) = self.reader.as_mut() else {
            return;
        };
        if reader.render_request != request_id {
            debug!(
                request_id,
                current = reader.render_request,
                "Dropping stale page render"
            );
            return;
        }
        reader.rendering = false;
        match image {
            Ok(path) => {
                reader.page_image = Some(path);
                reader.error = None;
            }
            Err(err) => {
                reader.page_image = None;
                reader.error = Some(err);
            }
        }

        let profile = analyze_page(text.as_deref().unwrap_or_default());
        debug!(
            page = page + 1,
            mood = %profile.mood,
            environment = %profile.environment,
            polarity = profile.polarity,
            "Analyzed page"
        );
        reader.profile = Some(profile);
        self.observe_profile(profile, effects);
    }

    fn go_to_page(&mut self, page: usize) -> Vec<Effect> {
        let Some(reader) = self.reader.as_mut() else {
            return Vec::new();
        };
        let before = reader.current_page;
        reader.set_page_clamped(page);
        if reader.current_page == before && reader.page_image.is_some() {
            return Vec::new();
        }
        debug!(from = before + 1, to = reader.current_page + 1, "Page changed");
        self.show_current_page()
    }

    fn show_current_page(&mut self) -> Vec<Effect> {
        self.next_render_request += 1;
        let request_id = self.next_render_request;
        let Some(reader) = self.reader.as_mut() else {
            return Vec::new();
        };
        reader.render_request = request_id;
        reader.rendering = true;
        reader.error = None;
        vec![
            Effect::SaveBookmark,
            Effect::RenderPage {
                request_id,
                page: reader.current_page,
            },
        ]
    }
}
