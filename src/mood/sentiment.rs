//! Lexicon-based sentiment polarity.
//!
//! Each word found in the lexicon contributes its polarity. A preceding
//! intensifier scales the contribution and a negation within the two previous
//! tokens flips it at half strength. The page score is the mean contribution,
//! clamped to `[-1.0, 1.0]`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

const NEGATION_FACTOR: f64 = -0.5;
const NEGATION_WINDOW: usize = 2;

static LEXICON: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| LEXICON_ENTRIES.iter().copied().collect());
static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> =
    Lazy::new(|| INTENSIFIER_ENTRIES.iter().copied().collect());

const NEGATIONS: [&str; 14] = [
    "not", "no", "never", "nor", "neither", "without", "hardly", "don't", "didn't", "doesn't",
    "isn't", "wasn't", "can't", "won't",
];

const INTENSIFIER_ENTRIES: [(&str, f64); 12] = [
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.2),
    ("too", 1.2),
    ("extremely", 1.6),
    ("incredibly", 1.5),
    ("truly", 1.3),
    ("utterly", 1.5),
    ("deeply", 1.4),
    ("most", 1.3),
    ("quite", 1.1),
    ("rather", 0.9),
];

const LEXICON_ENTRIES: [(&str, f64); 137] = [
    // positive
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("blissful", 0.8),
    ("bright", 0.7),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("celebrate", 0.6),
    ("cheerful", 0.8),
    ("comfortable", 0.4),
    ("content", 0.25),
    ("cozy", 0.4),
    ("delighted", 0.8),
    ("delightful", 0.9),
    ("eager", 0.25),
    ("ecstatic", 0.9),
    ("elated", 0.8),
    ("enjoy", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("exciting", 0.45),
    ("fantastic", 0.9),
    ("fine", 0.4),
    ("free", 0.4),
    ("friendly", 0.4),
    ("fun", 0.3),
    ("gentle", 0.3),
    ("glad", 0.5),
    ("glorious", 0.8),
    ("good", 0.7),
    ("grateful", 0.5),
    ("great", 0.8),
    ("happy", 0.8),
    ("hope", 0.3),
    ("hopeful", 0.4),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("kind", 0.6),
    ("laugh", 0.3),
    ("laughed", 0.3),
    ("love", 0.5),
    ("lovely", 0.5),
    ("loved", 0.7),
    ("lucky", 0.3),
    ("magnificent", 1.0),
    ("nice", 0.6),
    ("peaceful", 0.25),
    ("perfect", 1.0),
    ("pleasant", 0.7),
    ("pleased", 0.5),
    ("proud", 0.8),
    ("quiet", 0.15),
    ("relaxed", 0.2),
    ("safe", 0.5),
    ("serene", 0.2),
    ("smile", 0.3),
    ("smiled", 0.3),
    ("soft", 0.1),
    ("splendid", 1.0),
    ("still", 0.1),
    ("sweet", 0.35),
    ("thrilled", 0.6),
    ("tranquil", 0.2),
    ("triumph", 0.6),
    ("warm", 0.6),
    ("wonderful", 1.0),
    // negative
    ("afraid", -0.6),
    ("agony", -0.7),
    ("alone", -0.2),
    ("angry", -0.5),
    ("anxious", -0.25),
    ("awful", -1.0),
    ("bad", -0.7),
    ("bitter", -0.35),
    ("bleak", -0.4),
    ("blood", -0.3),
    ("bloody", -0.8),
    ("broken", -0.4),
    ("cold", -0.6),
    ("cruel", -0.8),
    ("cried", -0.3),
    ("cry", -0.3),
    ("dangerous", -0.6),
    ("dark", -0.15),
    ("dead", -0.2),
    ("death", -0.4),
    ("despair", -0.6),
    ("desperate", -0.6),
    ("disgusting", -1.0),
    ("dread", -0.5),
    ("dreadful", -0.8),
    ("empty", -0.1),
    ("enraged", -0.8),
    ("evil", -1.0),
    ("fear", -0.4),
    ("fearful", -0.5),
    ("furious", -0.9),
    ("gloomy", -0.5),
    ("grief", -0.6),
    ("grim", -0.5),
    ("hate", -0.8),
    ("hated", -0.9),
    ("hatred", -0.8),
    ("horrible", -1.0),
    ("horror", -0.6),
    ("hurt", -0.35),
    ("lonely", -0.4),
    ("lost", -0.1),
    ("mad", -0.6),
    ("miserable", -1.0),
    ("nervous", -0.2),
    ("pain", -0.4),
    ("painful", -0.7),
    ("panic", -0.5),
    ("poor", -0.4),
    ("rage", -0.8),
    ("sad", -0.5),
    ("scared", -0.5),
    ("scream", -0.4),
    ("screamed", -0.4),
    ("shadow", -0.1),
    ("sick", -0.7),
    ("sorrow", -0.5),
    ("tears", -0.2),
    ("terrible", -1.0),
    ("terrified", -0.7),
    ("terror", -0.7),
    ("tired", -0.4),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("violent", -0.8),
    ("weak", -0.4),
    ("worried", -0.3),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

/// Polarity of `words` (already lowercased) in `[-1.0, 1.0]`.
pub fn polarity<S: AsRef<str>>(words: &[S]) -> f64 {
    let mut total = 0.0;
    let mut hits = 0usize;

    for (idx, word) in words.iter().enumerate() {
        let Some(&base) = LEXICON.get(word.as_ref()) else {
            continue;
        };

        let mut score = base;
        if idx > 0 {
            if let Some(&factor) = INTENSIFIERS.get(words[idx - 1].as_ref()) {
                score *= factor;
            }
        }
        let window_start = idx.saturating_sub(NEGATION_WINDOW);
        if words[window_start..idx]
            .iter()
            .any(|w| is_negation(w.as_ref()))
        {
            score *= NEGATION_FACTOR;
        }

        total += score.clamp(-1.0, 1.0);
        hits += 1;
    }

    if hits == 0 {
        return 0.0;
    }
    (total / hits as f64).clamp(-1.0, 1.0)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<String> {
        text.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn no_known_words_is_neutral() {
        assert_eq!(polarity(&words("the table stood by the window")), 0.0);
        assert_eq!(polarity::<String>(&[]), 0.0);
    }

    #[test]
    fn averages_hits() {
        let score = polarity(&words("a good day and a bad night"));
        assert!(score.abs() < 1e-9, "good and bad cancel out, got {score}");
    }

    #[test]
    fn intensifier_scales_following_word() {
        let plain = polarity(&words("a happy child"));
        let boosted = polarity(&words("a very happy child"));
        assert!(boosted > plain);
        assert!(boosted <= 1.0);
    }

    #[test]
    fn negation_flips_with_damping() {
        let score = polarity(&words("he was not happy"));
        assert!((score - (-0.4)).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn contraction_negates() {
        let score = polarity(&words("she wasn't afraid"));
        assert!(score > 0.0, "got {score}");
    }

    #[test]
    fn negation_outside_window_is_ignored() {
        let score = polarity(&words("not that it was ever happy"));
        assert!(score > 0.0, "got {score}");
    }

    #[test]
    fn result_stays_in_range() {
        let score = polarity(&words("extremely awesome extremely perfect"));
        assert!(score <= 1.0);
        let score = polarity(&words("extremely awful extremely evil"));
        assert!(score >= -1.0);
    }

    #[test]
    fn lexicon_has_no_duplicate_words() {
        assert_eq!(LEXICON.len(), LEXICON_ENTRIES.len());
    }
}
