use super::super::messages::ImportReport;
use super::super::state::App;
use super::Effect;
use tracing::{info, warn};

impl App {
    pub(super) fn handle_add_book_requested(&mut self, effects: &mut Vec<Effect>) {
        if self.shelf.importing {
            return;
        }
        effects.push(Effect::PickBooks);
    }

    pub(super) fn handle_books_imported(&mut self, report: ImportReport) {
        self.shelf.importing = false;
        info!(
            added = report.added.len(),
            skipped = report.skipped.len(),
            failed = report.failed.len(),
            "Import finished"
        );
        self.shelf.status = Some(report.summary());
        self.refresh_books();
    }

    pub(super) fn handle_delete_requested(&mut self, id: String, effects: &mut Vec<Effect>) {
        match self.shelf.books.iter().find(|book| book.id == id) {
            Some(book) => effects.push(Effect::ConfirmDelete(book.clone())),
            None => warn!(book = %id, "Delete requested for a book not on the shelf"),
        }
    }
}
