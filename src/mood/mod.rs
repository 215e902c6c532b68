//! Page mood analysis.
//!
//! A page's text maps to exactly one mood bucket, derived from its sentiment
//! polarity, and independently to one environment tag from a fixed
//! vocabulary. Both are pure functions of the text.

pub mod environment;
pub mod sentiment;

pub use environment::Environment;

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static RE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\p{L}+(?:'\p{L}+)*").unwrap());

/// Mood buckets, ordered from most positive to most negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Excited,
    Happy,
    Calm,
    Neutral,
    Sad,
    Fearful,
    Angry,
}

impl Mood {
    /// Bucket a polarity score. Boundaries:
    /// `> 0.5` excited, `> 0.2` happy, `(0.1, 0.2]` calm, `[-0.1, 0.1]`
    /// neutral, `[-0.2, -0.1)` sad, `[-0.5, -0.2)` fearful, `< -0.5` angry.
    pub fn from_polarity(polarity: f64) -> Mood {
        if polarity > 0.5 {
            Mood::Excited
        } else if polarity > 0.2 {
            Mood::Happy
        } else if polarity > 0.1 {
            Mood::Calm
        } else if polarity >= -0.1 {
            Mood::Neutral
        } else if polarity >= -0.2 {
            Mood::Sad
        } else if polarity >= -0.5 {
            Mood::Fearful
        } else if polarity < -0.5 {
            Mood::Angry
        } else {
            // NaN
            Mood::Neutral
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Excited => "excited",
            Mood::Happy => "happy",
            Mood::Calm => "calm",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Fearful => "fearful",
            Mood::Angry => "angry",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of analyzing one page.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoodProfile {
    pub mood: Mood,
    pub environment: Environment,
    pub polarity: f64,
}

/// Analyze the text of a page. Blank text is neutral with a general setting.
pub fn analyze_page(text: &str) -> MoodProfile {
    let words = tokenize(text);
    if words.is_empty() {
        return MoodProfile::default();
    }
    let polarity = sentiment::polarity(&words);
    MoodProfile {
        mood: Mood::from_polarity(polarity),
        environment: environment::detect(&words),
        polarity,
    }
}

/// Lowercased, NFC-normalized words. Curly apostrophes are folded to `'` and
/// a possessive `'s` is split off, so "ocean's" yields "ocean".
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text.nfc().collect::<String>().replace('\u{2019}', "'");
    RE_WORD
        .find_iter(&normalized)
        .map(|m| {
            let word = m.as_str().to_lowercase();
            match word.strip_suffix("'s") {
                Some(stem) => stem.to_string(),
                None => word,
            }
        })
        .collect()
}
