//! Text polarity scoring.

/// Scores free text on a negative-to-positive scale.
pub trait PolarityScorer: Send + Sync {
    /// Polarity of `text` in [-1, 1]; 0 when nothing is recognized.
    fn polarity(&self, text: &str) -> f64;
}
