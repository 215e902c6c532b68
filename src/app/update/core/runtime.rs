use super::super::super::messages::{ImportReport, Message};
use super::super::super::state::App;
use super::super::Effect;
use crate::library::AddOutcome;
use crate::playback::{AudioClip, Layer};
use crate::sound::{FreesoundClient, fetch_soundtrack};
use iced::Event;
use iced::Task;
use iced::event;
use iced::futures::channel::oneshot;
use iced::keyboard;
use iced::window;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use tracing::{debug, info, warn};

impl App {
    pub(in crate::app) fn run_effect(&mut self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::SaveConfig => {
                self.save_config();
                Task::none()
            }
            Effect::SaveBookmark => {
                self.persist_bookmark();
                Task::none()
            }
            Effect::PickBooks => {
                let picked = FileDialog::new()
                    .set_title("Add books")
                    .add_filter("PDF", &["pdf", "PDF"])
                    .pick_files();
                match picked {
                    Some(files) if !files.is_empty() => self.run_effect(Effect::ImportBooks(files)),
                    _ => {
                        debug!("Add book dialog dismissed");
                        self.shelf.importing = false;
                        Task::none()
                    }
                }
            }
            Effect::ImportBooks(files) => {
                self.shelf.importing = true;
                self.shelf.status = Some(format!("Importing {} file(s)...", files.len()));
                let library = self.library.clone();
                info!(count = files.len(), "Dispatching import task");
                Task::perform(
                    run_blocking(move || {
                        let mut report = ImportReport::default();
                        for file in files {
                            let name = file
                                .file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| file.display().to_string());
                            match library.add_book(&file) {
                                Ok(AddOutcome::Added) => report.added.push(name),
                                Ok(AddOutcome::AlreadyPresent) => report.skipped.push(name),
                                Err(err) => {
                                    warn!(file = %file.display(), "Import failed: {err:#}");
                                    report.failed.push(format!("{name}: {err:#}"));
                                }
                            }
                        }
                        report
                    }),
                    |report| Message::BooksImported(report.unwrap_or_default()),
                )
            }
            Effect::ConfirmDelete(book) => {
                let answer = MessageDialog::new()
                    .set_level(MessageLevel::Warning)
                    .set_title("Delete book")
                    .set_description(format!(
                        "Delete \"{}\" from the library? Its bookmark is removed too.",
                        book.title
                    ))
                    .set_buttons(MessageButtons::YesNo)
                    .show();
                if !matches!(answer, MessageDialogResult::Yes) {
                    debug!(book = %book.id, "Delete cancelled");
                    return Task::none();
                }
                match self.library.delete_book(&book.id, &mut self.bookmarks) {
                    Ok(true) => self.shelf.status = Some(format!("Deleted {}", book.title)),
                    Ok(false) => {
                        self.shelf.status = Some(format!("{} is no longer in the library", book.title))
                    }
                    Err(err) => {
                        warn!(book = %book.id, "Delete failed: {err:#}");
                        self.shelf.status = Some(format!("Could not delete {}: {err:#}", book.title));
                    }
                }
                self.refresh_books();
                Task::none()
            }
            Effect::LoadBook { book, resume } => {
                self.shelf.opening = Some(book.id.clone());
                info!(book = %book.id, resume, "Opening book");
                Task::perform(
                    run_blocking(move || match crate::pdf::page_count(&book.path) {
                        Ok(page_count) => Message::BookOpened {
                            book,
                            page_count,
                            resume,
                        },
                        Err(err) => Message::BookOpenFailed {
                            id: book.id,
                            error: format!("{err:#}"),
                        },
                    }),
                    |message| {
                        message.unwrap_or_else(|| Message::BookOpenFailed {
                            id: String::new(),
                            error: "Open task ended unexpectedly".to_string(),
                        })
                    },
                )
            }
            Effect::RenderPage { request_id, page } => {
                let Some(reader) = self.reader.as_ref() else {
                    return Task::none();
                };
                let pdf = reader.book.path.clone();
                let cache_dir = self.library.cache_dir().to_path_buf();
                let dpi = self.config.render_dpi.max(36);
                Task::perform(
                    run_blocking(move || {
                        let image = crate::pdf::render_page(&pdf, page, dpi, &cache_dir)
                            .map_err(|err| {
                                warn!(page = page + 1, "Failed to render page: {err:#}");
                                format!("{err:#}")
                            });
                        let text = crate::pdf::page_text(&pdf, page)
                            .map_err(|err| {
                                warn!(page = page + 1, "Failed to extract page text: {err:#}")
                            })
                            .ok();
                        (image, text)
                    }),
                    move |result| {
                        let (image, text) = result.unwrap_or_else(|| {
                            (Err("Render task ended unexpectedly".to_string()), None)
                        });
                        Message::PageReady {
                            request_id,
                            page,
                            image,
                            text,
                        }
                    },
                )
            }
            Effect::FetchSoundtrack {
                request_id,
                profile,
                facets,
            } => {
                let base = self.config.sound_api_base.clone();
                let token = self.config.effective_api_key();
                let timeout = self.config.request_timeout();
                let queries = self.sound.queries.clone();
                info!(
                    request_id,
                    mood = %profile.mood,
                    environment = %profile.environment,
                    mood_facet = facets.mood,
                    environment_facet = facets.environment,
                    "Dispatching soundtrack lookup"
                );
                Task::perform(
                    run_blocking(move || {
                        let client = match FreesoundClient::new(&base, &token, timeout) {
                            Ok(client) => client,
                            Err(err) => {
                                warn!("Sound client unavailable: {err:#}");
                                return (None, None);
                            }
                        };
                        let track = fetch_soundtrack(&client, &profile, &queries, facets);
                        if track.is_empty() {
                            info!(mood = %profile.mood, "No soundtrack found for page");
                        }
                        let download = |url: Option<String>| {
                            let url = url?;
                            match client.download_preview(&url) {
                                Ok(bytes) => Some(AudioClip::new(url, bytes)),
                                Err(err) => {
                                    warn!("Failed to download preview: {err:#}");
                                    None
                                }
                            }
                        };
                        (download(track.mood_url), download(track.environment_url))
                    }),
                    move |result| {
                        let (mood, environment) = result.unwrap_or((None, None));
                        Message::SoundtrackReady {
                            request_id,
                            facets,
                            mood,
                            environment,
                        }
                    },
                )
            }
            Effect::PlayClip { layer, clip } => {
                let volume = match layer {
                    Layer::Mood => self.config.mood_volume,
                    Layer::Environment => self.config.environment_volume,
                };
                if let Some(deck) = self.sound.deck() {
                    if let Err(err) = deck.play(layer, &clip, volume.clamp(0.0, 1.0)) {
                        warn!(?layer, "Failed to start soundtrack: {err:#}");
                    }
                }
                Task::none()
            }
            Effect::StopLayer(layer) => {
                self.sound.stop_layer(layer);
                Task::none()
            }
            Effect::StopAudio => {
                self.sound.stop_all();
                Task::none()
            }
        }
    }
}

/// Run blocking work (PDF rendering, HTTP) on its own thread and await the
/// result from the UI runtime. `None` means the worker panicked.
async fn run_blocking<T, F>(job: F) -> Option<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = oneshot::channel();
    std::thread::spawn(move || {
        let _ = tx.send(job());
    });
    rx.await.ok()
}

pub(super) fn runtime_event_to_message(
    event: Event,
    status: event::Status,
    _window_id: window::Id,
) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }
    match event {
        Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            width: size.width,
            height: size.height,
        }),
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => {
            Some(Message::KeyPressed { key, modifiers })
        }
        _ => None,
    }
}
