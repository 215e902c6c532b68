//! Background soundtrack: deciding when to switch tracks and playing them.

use crate::mood::{Environment, Mood, MoodProfile};
use crate::sound::Facets;
use anyhow::{Context, Result, anyhow};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, info};

/// The two independent audio layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Mood,
    Environment,
}

/// What the reader should do after a page was analyzed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub request_id: u64,
    pub switch_mood: bool,
    pub switch_environment: bool,
}

impl Transition {
    pub fn facets(&self) -> Facets {
        Facets {
            mood: self.switch_mood,
            environment: self.switch_environment,
        }
    }

    pub fn is_keep(&self) -> bool {
        !self.switch_mood && !self.switch_environment
    }
}

/// Tracks the mood and environment that are currently scored, and which
/// lookup is the latest for each layer.
#[derive(Debug, Default)]
pub struct SoundtrackController {
    mood: Option<Mood>,
    environment: Option<Environment>,
    next_request: u64,
    mood_request: Option<u64>,
    environment_request: Option<u64>,
}

impl SoundtrackController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare a freshly analyzed page against what is playing. A layer whose
    /// key changed is marked for a switch and gets a new request id; an
    /// unchanged layer keeps playing.
    pub fn observe(&mut self, profile: &MoodProfile) -> Transition {
        let switch_mood = self.mood != Some(profile.mood);
        let switch_environment = self.environment != Some(profile.environment);

        if switch_mood || switch_environment {
            self.next_request += 1;
        }
        if switch_mood {
            debug!(from = ?self.mood, to = %profile.mood, "Mood changed");
            self.mood = Some(profile.mood);
            self.mood_request = Some(self.next_request);
        }
        if switch_environment {
            debug!(from = ?self.environment, to = %profile.environment, "Environment changed");
            self.environment = Some(profile.environment);
            self.environment_request = Some(self.next_request);
        }

        Transition {
            request_id: self.next_request,
            switch_mood,
            switch_environment,
        }
    }

    /// Whether a lookup result for `layer` is still the one wanted.
    pub fn accept(&self, layer: Layer, request_id: u64) -> bool {
        let current = match layer {
            Layer::Mood => self.mood_request,
            Layer::Environment => self.environment_request,
        };
        current == Some(request_id)
    }

    /// Forget what is playing so the next page triggers a fresh lookup.
    /// Results of lookups already in flight are rejected afterwards.
    pub fn reset(&mut self) {
        self.mood = None;
        self.environment = None;
        self.mood_request = None;
        self.environment_request = None;
    }
}

/// Downloaded preview audio, shared cheaply between messages.
#[derive(Clone)]
pub struct AudioClip {
    pub url: String,
    bytes: Arc<[u8]>,
}

impl AudioClip {
    pub fn new(url: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            url: url.into(),
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for AudioClip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioClip")
            .field("url", &self.url)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

/// Output device plus one looping sink per layer.
pub struct AudioDeck {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    mood: Option<Sink>,
    environment: Option<Sink>,
}

impl AudioDeck {
    pub fn open() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        info!("Opened audio output");
        Ok(Self {
            _stream: stream,
            handle,
            mood: None,
            environment: None,
        })
    }

    /// Replace whatever plays on `layer` with `clip`, looped.
    pub fn play(&mut self, layer: Layer, clip: &AudioClip, volume: f32) -> Result<()> {
        if clip.is_empty() {
            return Err(anyhow!("Preview {} is empty", clip.url));
        }
        let source = Decoder::new(Cursor::new(Arc::clone(&clip.bytes)))
            .with_context(|| format!("Decoding preview {}", clip.url))?;
        let sink = Sink::try_new(&self.handle).context("Creating sink")?;
        sink.set_volume(volume);
        sink.append(source.repeat_infinite());
        sink.play();

        self.stop(layer);
        *self.slot(layer) = Some(sink);
        info!(?layer, url = %clip.url, bytes = clip.len(), volume, "Started soundtrack layer");
        Ok(())
    }

    pub fn stop(&mut self, layer: Layer) {
        if let Some(sink) = self.slot(layer).take() {
            sink.stop();
            debug!(?layer, "Stopped soundtrack layer");
        }
    }

    pub fn stop_all(&mut self) {
        self.stop(Layer::Mood);
        self.stop(Layer::Environment);
    }

    fn slot(&mut self, layer: Layer) -> &mut Option<Sink> {
        match layer {
            Layer::Mood => &mut self.mood,
            Layer::Environment => &mut self.environment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(mood: Mood, environment: Environment) -> MoodProfile {
        MoodProfile {
            mood,
            environment,
            polarity: 0.0,
        }
    }

    #[test]
    fn first_page_switches_both_layers() {
        let mut controller = SoundtrackController::new();
        let t = controller.observe(&page(Mood::Calm, Environment::Forest));
        assert!(t.switch_mood);
        assert!(t.switch_environment);
        assert_eq!(
            t.facets(),
            Facets {
                mood: true,
                environment: true,
            }
        );
        assert_eq!(controller.mood, Some(Mood::Calm));
        assert_eq!(controller.environment, Some(Environment::Forest));
    }

    #[test]
    fn same_profile_keeps_playing() {
        let mut controller = SoundtrackController::new();
        let first = controller.observe(&page(Mood::Calm, Environment::Forest));
        let second = controller.observe(&page(Mood::Calm, Environment::Forest));
        assert!(second.is_keep());
        assert_eq!(second.request_id, first.request_id);
        assert!(controller.accept(Layer::Mood, first.request_id));
    }

    #[test]
    fn mood_change_only_switches_mood_layer() {
        let mut controller = SoundtrackController::new();
        let first = controller.observe(&page(Mood::Calm, Environment::Forest));
        let second = controller.observe(&page(Mood::Sad, Environment::Forest));
        assert!(second.switch_mood);
        assert!(!second.switch_environment);
        assert!(second.request_id > first.request_id);
        assert!(!controller.accept(Layer::Mood, first.request_id));
        assert!(controller.accept(Layer::Mood, second.request_id));
        // The environment lookup from the first page is still current.
        assert!(controller.accept(Layer::Environment, first.request_id));
    }

    #[test]
    fn superseded_lookup_is_rejected() {
        let mut controller = SoundtrackController::new();
        let a = controller.observe(&page(Mood::Happy, Environment::Beach));
        let b = controller.observe(&page(Mood::Angry, Environment::Battle));
        assert!(!controller.accept(Layer::Mood, a.request_id));
        assert!(!controller.accept(Layer::Environment, a.request_id));
        assert!(controller.accept(Layer::Mood, b.request_id));
        assert!(controller.accept(Layer::Environment, b.request_id));
    }

    #[test]
    fn reset_forces_new_lookup_and_drops_in_flight() {
        let mut controller = SoundtrackController::new();
        let a = controller.observe(&page(Mood::Calm, Environment::Night));
        controller.reset();
        assert!(!controller.accept(Layer::Mood, a.request_id));
        let b = controller.observe(&page(Mood::Calm, Environment::Night));
        assert!(b.switch_mood && b.switch_environment);
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn clip_debug_hides_bytes() {
        let clip = AudioClip::new("https://cdn/1.mp3", vec![1, 2, 3]);
        let rendered = format!("{clip:?}");
        assert!(rendered.contains("https://cdn/1.mp3"));
        assert!(rendered.contains("bytes: 3"));
        assert_eq!(clip.len(), 3);
    }
}
