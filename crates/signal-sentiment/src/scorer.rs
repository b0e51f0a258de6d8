//! Lexicon-based polarity scorer.

use signal_core::traits::PolarityScorer;

use crate::lexicon::Lexicon;

/// Negated words contribute half their polarity with the sign flipped.
const NEGATION_FACTOR: f64 = -0.5;

/// How many tokens back a negation still applies.
const NEGATION_WINDOW: usize = 2;

/// Scores text as the mean polarity of the lexicon words it contains.
///
/// Each hit is scaled by a directly preceding intensifier and flipped by a
/// negation within [`NEGATION_WINDOW`] tokens. Text without hits scores 0.
#[derive(Debug, Clone, Default)]
pub struct LexiconScorer {
    lexicon: Lexicon,
}

impl LexiconScorer {
    /// Create a scorer with the built-in lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer over a custom lexicon.
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn contribution(&self, tokens: &[String], index: usize, polarity: f64) -> f64 {
        let mut score = polarity;

        if let Some(mult) = index
            .checked_sub(1)
            .and_then(|i| self.lexicon.intensifier(&tokens[i]))
        {
            score *= mult;
        }

        let start = index.saturating_sub(NEGATION_WINDOW);
        if tokens[start..index]
            .iter()
            .any(|t| self.lexicon.is_negation(t))
        {
            score *= NEGATION_FACTOR;
        }

        score.clamp(-1.0, 1.0)
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity(&self, text: &str) -> f64 {
        let tokens = tokenize(text);

        let contributions: Vec<f64> = tokens
            .iter()
            .enumerate()
            .filter_map(|(i, token)| {
                self.lexicon
                    .polarity(token)
                    .map(|p| self.contribution(&tokens, i, p))
            })
            .collect();

        if contributions.is_empty() {
            return 0.0;
        }
        let mean = contributions.iter().sum::<f64>() / contributions.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

/// Lower-case words; apostrophes stay inside words so "isn't" survives.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\'').to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
