//! Display-order strategies for a keyword cloud.
//!
//! A cloud is shown in random order, decoupled from rank. The permutation is
//! injected through [`Shuffle`] so ranking and sizing can be checked on their
//! own with [`Ranked`], and a fixed seed gives a reproducible cloud.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use super::KeywordEntry;

/// Reorders ranked keyword entries for display.
pub trait Shuffle {
    /// Permute `entries` in place.
    fn shuffle(&mut self, entries: &mut [KeywordEntry]);
}

/// Keeps rank order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranked;

impl Shuffle for Ranked {
    fn shuffle(&mut self, _entries: &mut [KeywordEntry]) {}
}

/// Uniform Fisher-Yates permutation driven by `R`.
#[derive(Debug, Clone)]
pub struct FisherYates<R> {
    rng: R,
}

impl<R: Rng> FisherYates<R> {
    /// Shuffle with the given generator.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl FisherYates<StdRng> {
    /// Deterministic shuffle: the same seed always yields the same order.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl FisherYates<ThreadRng> {
    /// Shuffle with the thread-local generator.
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> Shuffle for FisherYates<R> {
    fn shuffle(&mut self, entries: &mut [KeywordEntry]) {
        for i in (1..entries.len()).rev() {
            let j = self.rng.gen_range(0..=i);
            entries.swap(i, j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(words: &[&str]) -> Vec<KeywordEntry> {
        words
            .iter()
            .map(|w| KeywordEntry {
                text: (*w).to_string(),
                value: 1,
                size: 1.0,
            })
            .collect()
    }

    fn texts(entries: &[KeywordEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.text.as_str()).collect()
    }

    #[test]
    fn ranked_keeps_order() {
        let mut list = entries(&["a", "b", "c"]);
        Ranked.shuffle(&mut list);
        assert_eq!(texts(&list), vec!["a", "b", "c"]);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let words: Vec<String> = (0..30).map(|i| format!("w{i}")).collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();

        let mut first = entries(&words);
        let mut second = entries(&words);
        FisherYates::from_seed(7).shuffle(&mut first);
        FisherYates::from_seed(7).shuffle(&mut second);
        assert_eq!(first, second);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let words = ["a", "b", "c", "d", "e", "f"];
        let mut list = entries(&words);
        FisherYates::from_seed(42).shuffle(&mut list);
        let mut sorted = texts(&list);
        sorted.sort_unstable();
        assert_eq!(sorted, words);
    }

    #[test]
    fn shuffle_handles_short_inputs() {
        let mut empty: Vec<KeywordEntry> = Vec::new();
        FisherYates::thread().shuffle(&mut empty);
        assert!(empty.is_empty());

        let mut one = entries(&["solo"]);
        FisherYates::thread().shuffle(&mut one);
        assert_eq!(texts(&one), vec!["solo"]);
    }

    #[test]
    fn some_seed_changes_the_order() {
        let words: Vec<String> = (0..20).map(|i| format!("w{i}")).collect();
        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let original = entries(&words);
        let moved = (0..8).any(|seed| {
            let mut list = original.clone();
            FisherYates::from_seed(seed).shuffle(&mut list);
            list != original
        });
        assert!(moved);
    }
}
