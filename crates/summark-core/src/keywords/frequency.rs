//! Word tokenizing and counting.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Regex for runs of ASCII word characters.
///
/// Boundaries are ASCII-only: any other character ends a run, so `ISO` in
/// `使用ISO標準` is a word and `café` yields `caf`. A run that holds a digit
/// or underscore (`abc1`, `snake_case`) is not a candidate.
static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z0-9_]+").expect("valid regex"));

/// Shortest candidate keyword, in letters.
const MIN_WORD_LEN: usize = 3;

/// Lowercase `text` and return its candidate keywords in order.
///
/// Candidates are whole runs of three or more ASCII letters.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lower)
        .map(|m| m.as_str())
        .filter(|word| word.len() >= MIN_WORD_LEN && word.bytes().all(|b| b.is_ascii_lowercase()))
        .map(str::to_string)
        .collect()
}

/// Occurrence counts for one source text, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordFrequencyTable {
    counts: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl WordFrequencyTable {
    /// Tokenize `text` and count every word not in `stop_words`.
    pub fn build(text: &str, stop_words: &HashSet<String>) -> Self {
        let mut table = Self::default();
        for word in tokenize(text) {
            if !stop_words.contains(&word) {
                table.add(word);
            }
        }
        table
    }

    /// Count one occurrence of `word`.
    pub fn add(&mut self, word: String) {
        if let Some(&slot) = self.index.get(&word) {
            self.counts[slot].1 += 1;
        } else {
            self.index.insert(word.clone(), self.counts.len());
            self.counts.push((word, 1));
        }
    }

    /// Occurrences of `word`, zero if unseen.
    pub fn count(&self, word: &str) -> usize {
        self.index.get(word).map_or(0, |&slot| self.counts[slot].1)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no word was counted.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// The `limit` most frequent words, by descending count.
    ///
    /// Equal counts keep first-seen order.
    pub fn ranked(&self, limit: usize) -> Vec<(String, usize)> {
        let mut ranked = self.counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_stops() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn tokenize_lowercases_and_filters_short_words() {
        assert_eq!(
            tokenize("The Cat, an ox; DOGS!"),
            vec!["the", "cat", "dogs"]
        );
    }

    #[test]
    fn tokenize_skips_digits_and_punctuation() {
        assert!(tokenize("12345 !!! ?? a1b2c3").is_empty());
        assert!(tokenize("abc123").is_empty());
    }

    #[test]
    fn tokenize_splits_on_apostrophes_and_hyphens() {
        assert_eq!(tokenize("don't cost-benefit"), vec!["don", "cost", "benefit"]);
    }

    #[test]
    fn tokenize_breaks_words_at_non_ascii_letters() {
        assert_eq!(tokenize("café latte"), vec!["caf", "latte"]);
        assert_eq!(tokenize("naïve résumé"), vec!["sum"]);
    }

    #[test]
    fn tokenize_finds_acronyms_inside_cjk_text() {
        assert_eq!(
            tokenize("使用ISO標準 的FDA法規 QMS系統"),
            vec!["iso", "fda", "qms"]
        );
    }

    #[test]
    fn tokenize_skips_runs_with_underscores() {
        assert_eq!(tokenize("snake_case value"), vec!["value"]);
    }

    #[test]
    fn build_counts_and_drops_stop_words() {
        let stops: HashSet<String> = ["the".to_string()].into_iter().collect();
        let table = WordFrequencyTable::build("the the the cat cat dog", &stops);
        assert_eq!(table.len(), 2);
        assert_eq!(table.count("cat"), 2);
        assert_eq!(table.count("dog"), 1);
        assert_eq!(table.count("the"), 0);
    }

    #[test]
    fn ranked_ties_keep_first_seen_order() {
        let table = WordFrequencyTable::build("zeta alpha beta alpha zeta gamma", &no_stops());
        assert_eq!(
            table.ranked(10),
            vec![
                ("zeta".to_string(), 2),
                ("alpha".to_string(), 2),
                ("beta".to_string(), 1),
                ("gamma".to_string(), 1),
            ]
        );
    }

    #[test]
    fn ranked_truncates() {
        let table = WordFrequencyTable::build("one two two three three three", &no_stops());
        assert_eq!(table.ranked(1), vec![("three".to_string(), 3)]);
    }

    #[test]
    fn empty_text_is_empty_table() {
        let table = WordFrequencyTable::build("", &no_stops());
        assert!(table.is_empty());
        assert!(table.ranked(50).is_empty());
    }
}
