//! Sound lookup for the reader: turn a mood profile into preview clip URLs.

pub mod client;
pub mod models;

pub use client::FreesoundClient;

use crate::mood::MoodProfile;
use anyhow::Result;
use tracing::{debug, warn};

const PLACEHOLDER: &str = "{value}";

/// A text-search backend that can resolve a query to a playable preview.
pub trait SoundSearch {
    /// Id of the first hit for `query`, if any.
    fn search_first(&self, query: &str) -> Result<Option<u64>>;
    /// Preview clip URL for a sound id, if the service exposes one.
    fn preview_url(&self, sound_id: u64) -> Result<Option<String>>;
}

/// Query templates for the two facets. `{value}` is replaced with the mood or
/// environment tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoundQueries {
    pub mood: String,
    pub environment: String,
}

impl SoundQueries {
    pub fn new(mood: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            mood: mood.into(),
            environment: environment.into(),
        }
    }

    pub fn mood_query(&self, profile: &MoodProfile) -> String {
        render(&self.mood, profile.mood.as_str())
    }

    pub fn environment_query(&self, profile: &MoodProfile) -> String {
        render(&self.environment, profile.environment.as_str())
    }
}

impl Default for SoundQueries {
    fn default() -> Self {
        Self::new("{value} piano sound", "{value} sound")
    }
}

fn render(template: &str, value: &str) -> String {
    if template.contains(PLACEHOLDER) {
        template.replace(PLACEHOLDER, value)
    } else {
        format!("{value} {template}")
    }
}

/// Whatever subset of the two facets resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Soundtrack {
    pub mood_url: Option<String>,
    pub environment_url: Option<String>,
}

impl Soundtrack {
    pub fn is_empty(&self) -> bool {
        self.mood_url.is_none() && self.environment_url.is_none()
    }
}

/// Search, then resolve the first hit's preview. Failures are logged and
/// collapse to `None`.
pub fn fetch_sound_url<S: SoundSearch + ?Sized>(search: &S, query: &str) -> Option<String> {
    let lookup = || -> Result<Option<String>> {
        let Some(id) = search.search_first(query)? else {
            return Ok(None);
        };
        search.preview_url(id)
    };
    match lookup() {
        Ok(Some(url)) => {
            debug!(query, url = %url, "Resolved preview");
            Some(url)
        }
        Ok(None) => {
            debug!(query, "No preview found");
            None
        }
        Err(err) => {
            warn!(query, "Sound lookup failed: {err:#}");
            None
        }
    }
}

/// Which facets a lookup should resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facets {
    pub mood: bool,
    pub environment: bool,
}

impl Facets {
    pub fn any(self) -> bool {
        self.mood || self.environment
    }
}

/// Look up the requested facets for `profile`. The two lookups run at the
/// same time; each one that fails or finds nothing is left as `None`.
pub fn fetch_soundtrack<S: SoundSearch + Sync + ?Sized>(
    search: &S,
    profile: &MoodProfile,
    queries: &SoundQueries,
    facets: Facets,
) -> Soundtrack {
    let mood_query = queries.mood_query(profile);
    let environment_query = queries.environment_query(profile);

    std::thread::scope(|scope| {
        let environment = facets
            .environment
            .then(|| scope.spawn(|| fetch_sound_url(search, &environment_query)));
        let mood_url = if facets.mood {
            fetch_sound_url(search, &mood_query)
        } else {
            None
        };
        let environment_url = match environment {
            Some(handle) => handle.join().unwrap_or_else(|_| {
                warn!(query = %environment_query, "Environment lookup thread panicked");
                None
            }),
            None => None,
        };
        Soundtrack {
            mood_url,
            environment_url,
        }
    })
}
