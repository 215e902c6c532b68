use crate::config::AppConfig;
use crate::playback::{AudioDeck, Layer, SoundtrackController};
use crate::sound::SoundQueries;
use tracing::warn;

/// Soundtrack model: what should play, and the device it plays on.
pub struct SoundState {
    pub(in crate::app) controller: SoundtrackController,
    pub(in crate::app) queries: SoundQueries,
    pub(in crate::app) deck: Option<AudioDeck>,
    pub(in crate::app) deck_failed: bool,
    /// Latest dispatched lookup that has not come back yet.
    pub(in crate::app) pending_lookup: Option<u64>,
}

impl SoundState {
    pub(in crate::app) fn new(config: &AppConfig) -> Self {
        Self {
            controller: SoundtrackController::new(),
            queries: SoundQueries::new(
                config.mood_query.clone(),
                config.environment_query.clone(),
            ),
            deck: None,
            deck_failed: false,
            pending_lookup: None,
        }
    }

    /// Output device, opened on first use. A device that failed to open is
    /// not retried.
    pub(in crate::app) fn deck(&mut self) -> Option<&mut AudioDeck> {
        if self.deck.is_none() && !self.deck_failed {
            match AudioDeck::open() {
                Ok(deck) => self.deck = Some(deck),
                Err(err) => {
                    warn!("Audio output unavailable, soundtrack disabled: {err:#}");
                    self.deck_failed = true;
                }
            }
        }
        self.deck.as_mut()
    }

    pub(in crate::app) fn stop_layer(&mut self, layer: Layer) {
        if let Some(deck) = self.deck.as_mut() {
            deck.stop(layer);
        }
    }

    pub(in crate::app) fn stop_all(&mut self) {
        if let Some(deck) = self.deck.as_mut() {
            deck.stop_all();
        }
        self.pending_lookup = None;
    }
}
