//! Fixed-vocabulary setting detection.

use std::collections::HashSet;

/// Setting tag for a page. Vocabulary order decides ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    Rain,
    Forest,
    Beach,
    City,
    Battle,
    Night,
    Morning,
    Desert,
    Mountains,
    Ocean,
    Crowd,
    Fireplace,
    Cafe,
    Snow,
    Garden,
    General,
}

pub const VOCABULARY: [Environment; 15] = [
    Environment::Rain,
    Environment::Forest,
    Environment::Beach,
    Environment::City,
    Environment::Battle,
    Environment::Night,
    Environment::Morning,
    Environment::Desert,
    Environment::Mountains,
    Environment::Ocean,
    Environment::Crowd,
    Environment::Fireplace,
    Environment::Cafe,
    Environment::Snow,
    Environment::Garden,
];

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Rain => "rain",
            Environment::Forest => "forest",
            Environment::Beach => "beach",
            Environment::City => "city",
            Environment::Battle => "battle",
            Environment::Night => "night",
            Environment::Morning => "morning",
            Environment::Desert => "desert",
            Environment::Mountains => "mountains",
            Environment::Ocean => "ocean",
            Environment::Crowd => "crowd",
            Environment::Fireplace => "fireplace",
            Environment::Cafe => "café",
            Environment::Snow => "snow",
            Environment::Garden => "garden",
            Environment::General => "general",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::General
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// First vocabulary term present in `words`, or `General`.
///
/// `words` are expected lowercased; they are singularized here so plural and
/// singular forms of a term both match.
pub fn detect<S: AsRef<str>>(words: &[S]) -> Environment {
    let present: HashSet<String> = words
        .iter()
        .map(|word| singularize(&fold_alias(word.as_ref())))
        .collect();

    VOCABULARY
        .iter()
        .copied()
        .find(|env| present.contains(&singularize(env.as_str())))
        .unwrap_or(Environment::General)
}

fn fold_alias(word: &str) -> String {
    match word {
        "cafe" | "cafes" => word.replacen("cafe", "café", 1),
        _ => word.to_string(),
    }
}

/// Rule-based English singularization, good enough for setting nouns.
pub fn singularize(word: &str) -> String {
    let len = word.chars().count();
    if len <= 3 {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for suffix in ["sses", "ches", "shes", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }
    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }
    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}
