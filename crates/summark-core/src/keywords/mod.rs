//! Keyword extraction for word clouds.
//!
//! Text is lowercased and tokenized into words of three or more ASCII
//! letters. Stop words are dropped, the rest are counted, and the most
//! frequent are kept. Each entry gets a display size interpolated linearly
//! between [`KeywordOptions::min_size`] and [`KeywordOptions::max_size`] from
//! its count relative to the batch minimum and maximum. Finally the entries
//! are permuted for display by a [`Shuffle`].

pub mod frequency;
pub mod shuffle;

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::word_lists::STOP_WORDS;

pub use frequency::WordFrequencyTable;
pub use shuffle::{FisherYates, Ranked, Shuffle};

/// Default cap on cloud entries.
pub const DEFAULT_MAX_KEYWORDS: usize = 50;

/// Default size of the least frequent entry.
pub const DEFAULT_MIN_SIZE: f64 = 1.0;

/// Default size of the most frequent entry.
pub const DEFAULT_MAX_SIZE: f64 = 3.0;

/// One word in a keyword cloud.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct KeywordEntry {
    /// The lowercase word.
    pub text: String,
    /// Occurrence count.
    pub value: usize,
    /// Display scale (e.g. a `rem` font size).
    pub size: f64,
}

/// How entries are ordered for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum KeywordOrder {
    /// Random permutation, decoupled from rank.
    #[default]
    Shuffled,
    /// Descending count; ties in first-seen order.
    Ranked,
}

impl KeywordOrder {
    /// Returns the order as its config/CLI name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Shuffled => "shuffled",
            Self::Ranked => "ranked",
        }
    }

    /// The shuffle strategy for this order. `seed` fixes the permutation.
    pub fn shuffler(self, seed: Option<u64>) -> Box<dyn Shuffle> {
        match (self, seed) {
            (Self::Ranked, _) => Box::new(Ranked),
            (Self::Shuffled, Some(seed)) => Box::new(FisherYates::from_seed(seed)),
            (Self::Shuffled, None) => Box::new(FisherYates::thread()),
        }
    }
}

impl std::fmt::Display for KeywordOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to extraction beyond the text itself.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordOptions {
    /// Words never counted. Entries must be lowercase.
    pub stop_words: HashSet<String>,
    /// Maximum number of entries returned.
    pub max_keywords: usize,
    /// Size of the least frequent entry.
    pub min_size: f64,
    /// Size of the most frequent entry.
    pub max_size: f64,
}

impl Default for KeywordOptions {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

impl KeywordOptions {
    /// Add stop words on top of the current set. Words are lowercased.
    #[must_use]
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Set the entry cap.
    #[must_use]
    pub const fn with_max_keywords(mut self, max_keywords: usize) -> Self {
        self.max_keywords = max_keywords;
        self
    }
}

/// Extract a shuffled keyword cloud with default options.
pub fn extract(text: &str) -> Vec<KeywordEntry> {
    extract_with(text, &KeywordOptions::default(), &mut FisherYates::thread())
}

/// Extract a keyword cloud and order it with `shuffle`.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn extract_with(
    text: &str,
    options: &KeywordOptions,
    shuffle: &mut dyn Shuffle,
) -> Vec<KeywordEntry> {
    let mut entries = rank(text, options);
    shuffle.shuffle(&mut entries);
    tracing::debug!(entries = entries.len(), "extracted keywords");
    entries
}

/// Ranked, sized entries before any display shuffle.
pub fn rank(text: &str, options: &KeywordOptions) -> Vec<KeywordEntry> {
    let ranked = WordFrequencyTable::build(text, &options.stop_words).ranked(options.max_keywords);

    let (Some(max_count), Some(min_count)) = (
        ranked.first().map(|(_, count)| *count),
        ranked.last().map(|(_, count)| *count),
    ) else {
        return Vec::new();
    };
    let spread = max_count.saturating_sub(min_count).max(1) as f64;
    let range = options.max_size - options.min_size;

    ranked
        .into_iter()
        .map(|(text, value)| {
            let ratio = (value - min_count) as f64 / spread;
            KeywordEntry {
                text,
                value,
                size: range.mul_add(ratio, options.min_size),
            }
        })
        .collect()
}
