use super::super::super::messages::Message;
use super::super::super::state::App;
use super::super::Effect;

impl App {
    pub(super) fn reduce(&mut self, message: Message) -> Vec<Effect> {
        let mut effects = Vec::new();

        match message {
            Message::AddBookRequested => self.handle_add_book_requested(&mut effects),
            Message::BooksImported(report) => self.handle_books_imported(report),
            Message::OpenBook { id, resume } => self.handle_open_book(id, resume, &mut effects),
            Message::BookOpened {
                book,
                page_count,
                resume,
            } => self.handle_book_opened(book, page_count, resume, &mut effects),
            Message::BookOpenFailed { id, error } => self.handle_book_open_failed(id, error),
            Message::DeleteBookRequested(id) => self.handle_delete_requested(id, &mut effects),
            Message::BackToLibrary => self.handle_back_to_library(&mut effects),
            Message::NextPage => self.handle_next_page(&mut effects),
            Message::PreviousPage => self.handle_previous_page(&mut effects),
            Message::PageReady {
                request_id,
                page,
                image,
                text,
            } => self.handle_page_ready(request_id, page, image, text, &mut effects),
            Message::ToggleSound => self.handle_toggle_sound(&mut effects),
            Message::SoundtrackReady {
                request_id,
                facets,
                mood,
                environment,
            } => self.handle_soundtrack_ready(request_id, facets, mood, environment, &mut effects),
            Message::WindowResized { width, height } => self.handle_window_resized(width, height),
            Message::KeyPressed { key, modifiers } => {
                if let Some(shortcut) = self.shortcut_message_for_key(key, modifiers) {
                    effects.extend(self.reduce(shortcut));
                }
            }
        }

        effects
    }

    /// Remember the window size. It is written out with the next config save
    /// rather than on every resize event.
    fn handle_window_resized(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.config.window_width = width;
        self.config.window_height = height;
    }
}
