//! Discrete signal extraction from channel messages.

use signal_core::types::{ChannelMessage, DiscreteSignal};
use tracing::debug;

/// Token a message must mention to be considered.
pub const DEFAULT_INSTRUMENT: &str = "XAUUSD";

/// Number of leading (most recent) messages scanned.
pub const DEFAULT_MAX_MESSAGES: usize = 10;

/// The message that decided the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelMatch {
    /// Position in the newest-first message list
    pub index: usize,
    pub signal: DiscreteSignal,
}

/// Scans newest-first messages and returns the first classifiable call.
///
/// Messages are checked strictly in order and the scan stops at the first
/// classification; later messages are never consulted.
#[derive(Debug, Clone)]
pub struct ChannelSignalParser {
    instrument: String,
    max_messages: usize,
}

impl Default for ChannelSignalParser {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUMENT, DEFAULT_MAX_MESSAGES)
    }
}

impl ChannelSignalParser {
    /// Create a parser for `instrument`, matched case-insensitively.
    pub fn new(instrument: &str, max_messages: usize) -> Self {
        Self {
            instrument: instrument.to_uppercase(),
            max_messages,
        }
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Signal of the first classifiable message; `Uncertain` when none is.
    pub fn parse(&self, messages: &[ChannelMessage]) -> DiscreteSignal {
        match self.parse_match(messages) {
            Some(m) => m.signal,
            None => {
                debug!(
                    scanned = messages.len().min(self.max_messages),
                    "No classifiable channel message"
                );
                DiscreteSignal::Uncertain
            }
        }
    }

    /// First classifiable message and its signal.
    pub fn parse_match(&self, messages: &[ChannelMessage]) -> Option<ChannelMatch> {
        messages
            .iter()
            .take(self.max_messages)
            .enumerate()
            .find_map(|(index, message)| {
                self.classify(&message.text)
                    .map(|signal| ChannelMatch { index, signal })
            })
    }

    /// Classify one message; `None` means skip it.
    ///
    /// BUY outranks SELL, which outranks WAIT/AVOID.
    pub fn classify(&self, text: &str) -> Option<DiscreteSignal> {
        let text = text.to_uppercase();
        if !text.contains(&self.instrument) {
            return None;
        }

        if text.contains("BUY") {
            Some(DiscreteSignal::Buy)
        } else if text.contains("SELL") {
            Some(DiscreteSignal::Sell)
        } else if text.contains("WAIT") || text.contains("AVOID") {
            Some(DiscreteSignal::Uncertain)
        } else {
            None
        }
    }
}
