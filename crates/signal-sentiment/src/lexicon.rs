//! Polarity lexicon.
//!
//! General-purpose English opinion words plus the market vocabulary that shows
//! up in gold headlines.

use std::collections::{HashMap, HashSet};

const GENERAL_WORDS: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("positive", 0.23),
    ("happy", 0.8),
    ("hopeful", 0.5),
    ("optimistic", 0.5),
    ("confident", 0.5),
    ("favorable", 0.5),
    ("solid", 0.4),
    ("strong", 0.43),
    ("stronger", 0.45),
    ("robust", 0.4),
    ("healthy", 0.5),
    ("safe", 0.5),
    ("stable", 0.3),
    ("new", 0.14),
    ("high", 0.16),
    ("higher", 0.25),
    ("record", 0.3),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("poor", -0.4),
    ("negative", -0.3),
    ("weak", -0.38),
    ("weaker", -0.4),
    ("low", -0.3),
    ("lower", -0.25),
    ("fragile", -0.5),
    ("uncertain", -0.3),
    ("volatile", -0.3),
    ("risky", -0.5),
    ("dangerous", -0.6),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("fearful", -0.6),
    ("worried", -0.5),
    ("sharp", -0.1),
    ("heavy", -0.2),
];

const MARKET_WORDS: &[(&str, f64)] = &[
    ("bullish", 0.8),
    ("rally", 0.6),
    ("rallies", 0.6),
    ("rallied", 0.6),
    ("surge", 0.6),
    ("surges", 0.6),
    ("surged", 0.6),
    ("soar", 0.7),
    ("soars", 0.7),
    ("gain", 0.4),
    ("gains", 0.4),
    ("rise", 0.3),
    ("rises", 0.3),
    ("climb", 0.3),
    ("climbs", 0.3),
    ("rebound", 0.4),
    ("rebounds", 0.4),
    ("recovery", 0.4),
    ("breakout", 0.5),
    ("upbeat", 0.5),
    ("haven", 0.3),
    ("bearish", -0.8),
    ("crash", -0.9),
    ("crashes", -0.9),
    ("plunge", -0.7),
    ("plunges", -0.7),
    ("slump", -0.6),
    ("slumps", -0.6),
    ("tumble", -0.6),
    ("tumbles", -0.6),
    ("drop", -0.4),
    ("drops", -0.4),
    ("fall", -0.3),
    ("falls", -0.3),
    ("decline", -0.4),
    ("declines", -0.4),
    ("loss", -0.4),
    ("losses", -0.4),
    ("selloff", -0.6),
    ("slide", -0.4),
    ("slides", -0.4),
    ("fears", -0.5),
    ("crisis", -0.7),
    ("recession", -0.6),
];

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "neither", "nor", "none", "cannot", "can't", "cant", "don't", "dont",
    "doesn't", "doesnt", "didn't", "didnt", "won't", "wont", "isn't", "isnt", "aren't", "arent",
    "wasn't", "wasnt", "hardly", "barely",
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("sharply", 1.4),
    ("strongly", 1.3),
    ("significantly", 1.3),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("marginally", 0.5),
];

/// Word polarities with negation and intensifier vocabularies.
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
    negations: HashSet<String>,
    intensifiers: HashMap<String, f64>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Lexicon {
    /// Create the built-in lexicon.
    pub fn new() -> Self {
        let words = GENERAL_WORDS
            .iter()
            .chain(MARKET_WORDS)
            .map(|&(w, s)| (w.to_string(), s))
            .collect();
        let negations = NEGATIONS.iter().map(|w| w.to_string()).collect();
        let intensifiers = INTENSIFIERS
            .iter()
            .map(|&(w, m)| (w.to_string(), m))
            .collect();

        Self {
            words,
            negations,
            intensifiers,
        }
    }

    /// Polarity of a lower-case word.
    pub fn polarity(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    /// Check if a lower-case word negates what follows.
    pub fn is_negation(&self, word: &str) -> bool {
        self.negations.contains(word)
    }

    /// Intensity multiplier of a lower-case word.
    pub fn intensifier(&self, word: &str) -> Option<f64> {
        self.intensifiers.get(word).copied()
    }

    /// Add or override a word, clamping its polarity to [-1, 1].
    pub fn insert(&mut self, word: &str, polarity: f64) {
        self.words
            .insert(word.to_lowercase(), polarity.clamp(-1.0, 1.0));
    }

    /// Number of polarity words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
