use super::messages::Message;
use super::state::{App, ReaderState, Screen};
use crate::library::Book;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::image::Handle;
use iced::widget::{
    Column, Row, button, column, container, horizontal_space, image, row, scrollable, text,
};
use iced::{ContentFit, Element, Length};

const CARD_WIDTH: f32 = 200.0;
const THUMB_HEIGHT: f32 = 220.0;

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        match (self.screen, self.reader.as_ref()) {
            (Screen::Reader, Some(reader)) => self.reader_view(reader),
            _ => self.library_view(),
        }
    }

    fn library_view(&self) -> Element<'_, Message> {
        let add_button = button("Add Book")
            .on_press_maybe((!self.shelf.importing).then_some(Message::AddBookRequested));
        let toolbar = row![
            text("BookSmart").size(24),
            horizontal_space(),
            text(self.sound_label()),
            button(if self.config.sound_enabled {
                "Sound: On"
            } else {
                "Sound: Off"
            })
            .on_press(Message::ToggleSound),
            add_button,
        ]
        .spacing(12)
        .align_y(Vertical::Center);

        let body: Element<'_, Message> = if self.shelf.books.is_empty() {
            container(text("Your library is empty. Use \"Add Book\" to import PDFs."))
                .center_x(Length::Fill)
                .padding(40)
                .into()
        } else {
            let columns = self.config.library_columns.max(1);
            let mut grid = Column::new().spacing(16);
            for chunk in self.shelf.books.chunks(columns) {
                let cards = chunk.iter().map(|book| self.book_card(book));
                grid = grid.push(Row::with_children(cards).spacing(16));
            }
            scrollable(container(grid).center_x(Length::Fill))
                .height(Length::Fill)
                .into()
        };

        let status = text(self.shelf_status()).size(14);

        column![toolbar, body, status]
            .spacing(12)
            .padding(16)
            .height(Length::Fill)
            .into()
    }

    fn book_card(&self, book: &Book) -> Element<'_, Message> {
        let cover: Element<'_, Message> = match self.library.thumbnail_for(book) {
            Some(path) => image(Handle::from_path(path))
                .width(Length::Fill)
                .height(Length::Fixed(THUMB_HEIGHT))
                .content_fit(ContentFit::Contain)
                .into(),
            None => container(text("No preview"))
                .center_x(Length::Fill)
                .center_y(Length::Fixed(THUMB_HEIGHT))
                .into(),
        };

        let busy = self.shelf.opening.is_some();
        let open = |resume: bool| {
            (!busy).then(|| Message::OpenBook {
                id: book.id.clone(),
                resume,
            })
        };
        let continue_label = match self.bookmark_for(&book.id) {
            Some(page) => format!("Continue (p. {})", page + 1),
            None => "Continue".to_string(),
        };

        let card = column![
            cover,
            text(book.title.clone()).size(16),
            button("Read from beginning")
                .width(Length::Fill)
                .on_press_maybe(open(false)),
            button(text(continue_label))
                .width(Length::Fill)
                .on_press_maybe(open(true)),
            button("Delete")
                .width(Length::Fill)
                .style(button::danger)
                .on_press_maybe((!busy).then(|| Message::DeleteBookRequested(book.id.clone()))),
        ]
        .spacing(6)
        .align_x(Horizontal::Center);

        container(card)
            .width(Length::Fixed(CARD_WIDTH))
            .padding(8)
            .style(container::rounded_box)
            .into()
    }

    fn reader_view<'a>(&'a self, reader: &'a ReaderState) -> Element<'a, Message> {
        let mut page_label = format!(
            "{} · Page {} of {}",
            reader.book.title,
            reader.current_page + 1,
            reader.page_count.max(1)
        );
        if reader.rendering && reader.page_image.is_some() {
            page_label.push_str(" (loading)");
        }
        let mood_label = match reader.profile {
            Some(profile) => format!("Mood: {} · Setting: {}", profile.mood, profile.environment),
            None => "Mood: ...".to_string(),
        };

        let toolbar = row![
            button("Back").on_press(Message::BackToLibrary),
            button("Previous").on_press_maybe(reader.has_previous().then_some(Message::PreviousPage)),
            button("Next").on_press_maybe(reader.has_next().then_some(Message::NextPage)),
            button(if self.config.sound_enabled {
                "Sound: On"
            } else {
                "Sound: Off"
            })
            .on_press(Message::ToggleSound),
            text(page_label),
            horizontal_space(),
            text(mood_label),
            text(self.sound_label()),
        ]
        .spacing(10)
        .align_y(Vertical::Center);

        let page: Element<'_, Message> = match (&reader.page_image, &reader.error) {
            (_, Some(error)) => container(text(format!("Could not render this page: {error}")))
                .center_x(Length::Fill)
                .padding(40)
                .into(),
            (Some(path), None) => scrollable(
                container(
                    image(Handle::from_path(path))
                        .width(Length::Fill)
                        .content_fit(ContentFit::Contain),
                )
                .center_x(Length::Fill),
            )
            .height(Length::Fill)
            .into(),
            (None, None) => container(text("Rendering page..."))
                .center_x(Length::Fill)
                .padding(40)
                .into(),
        };

        column![toolbar, page]
            .spacing(12)
            .padding(16)
            .height(Length::Fill)
            .into()
    }

    fn shelf_status(&self) -> String {
        if let Some(id) = self.shelf.opening.as_ref() {
            return format!("Opening {id}...");
        }
        match self.shelf.status.as_ref() {
            Some(status) => status.clone(),
            None => format!("{} book(s)", self.shelf.books.len()),
        }
    }

    fn sound_label(&self) -> &'static str {
        if !self.config.sound_enabled {
            ""
        } else if self.sound.deck_failed {
            "No audio device"
        } else if self.sound.pending_lookup.is_some() {
            "Finding soundtrack..."
        } else {
            ""
        }
    }
}
