use std::collections::HashMap;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::engine::error::{EngineError, Result};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Word {
    pub id: u32,
    pub spelling: String,
    pub paraphrase: String,
    /// Usage frequency in `[0, 1]`.
    pub frequency: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub word_id: u32,
    pub text: String,
    pub translation: String,
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub word: Word,
    pub examples: Vec<Example>,
}

/// Word selection used by [`Corpus::query`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WordFilter {
    All,
    /// Open interval: keeps words with `min < frequency < max`.
    Frequency { min: f64, max: f64 },
}

impl WordFilter {
    pub fn matches(&self, word: &Word) -> bool {
        match *self {
            WordFilter::All => true,
            WordFilter::Frequency { min, max } => word.frequency > min && word.frequency < max,
        }
    }
}

/// Read-only index of words that have at least one example sentence.
#[derive(Clone, Debug)]
pub struct Corpus {
    entries: Vec<Entry>,
    index: HashMap<u32, usize>,
}

impl Corpus {
    /// Join `examples` onto `words` by word id and drop every word left without
    /// an example. Duplicate word ids keep the first occurrence.
    pub fn build(words: Vec<Word>, examples: Vec<Example>) -> Result<Self> {
        let word_count = words.len();
        let mut grouped: HashMap<u32, Vec<Example>> = HashMap::new();
        for example in examples {
            grouped.entry(example.word_id).or_default().push(example);
        }

        let mut entries = Vec::new();
        let mut index = HashMap::new();
        for word in words {
            if word.spelling.trim().is_empty() {
                warn!("dropping word {} with empty spelling", word.id);
                continue;
            }
            if index.contains_key(&word.id) {
                warn!("dropping duplicate word id {} ({})", word.id, word.spelling);
                continue;
            }
            let Some(examples) = grouped.remove(&word.id) else {
                continue;
            };
            index.insert(word.id, entries.len());
            entries.push(Entry { word, examples });
        }

        if entries.is_empty() {
            return Err(EngineError::EmptyCorpus);
        }

        info!(
            "corpus built: {} of {} words have example sentences",
            entries.len(),
            word_count
        );
        Ok(Self { entries, index })
    }

    /// Words passing `filter`. Callers must not rely on the order.
    pub fn query(&self, filter: WordFilter) -> Vec<&Word> {
        self.entries
            .iter()
            .map(|e| &e.word)
            .filter(|w| filter.matches(w))
            .collect()
    }

    pub fn get(&self, word_id: u32) -> Option<&Entry> {
        self.index.get(&word_id).map(|&i| &self.entries[i])
    }

    pub fn examples(&self, word_id: u32) -> &[Example] {
        self.get(word_id).map(|e| e.examples.as_slice()).unwrap_or(&[])
    }

    pub fn word_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.word.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn word(id: u32, spelling: &str, frequency: f64) -> Word {
        Word {
            id,
            spelling: spelling.to_string(),
            paraphrase: format!("meaning of {spelling}"),
            frequency,
        }
    }

    pub(crate) fn example(word_id: u32, text: &str) -> Example {
        Example {
            word_id,
            text: text.to_string(),
            translation: String::new(),
        }
    }

    #[test]
    fn test_words_without_examples_are_dropped() {
        let words = vec![word(1, "apple", 0.9), word(2, "pear", 0.4)];
        let examples = vec![example(1, "I ate an apple today.")];
        let corpus = Corpus::build(words, examples).unwrap();

        assert_eq!(corpus.len(), 1);
        assert!(corpus.get(1).is_some());
        assert!(corpus.get(2).is_none());
        assert!(corpus.examples(2).is_empty());
    }

    #[test]
    fn test_no_examples_at_all_is_empty_corpus() {
        let words = vec![word(1, "apple", 0.9)];
        let examples = vec![example(7, "orphan sentence")];
        let err = Corpus::build(words, examples).unwrap_err();
        assert_eq!(err, EngineError::EmptyCorpus);
    }

    #[test]
    fn test_query_preserves_fields_and_has_examples() {
        let words = vec![
            word(1, "apple", 0.9),
            word(2, "banana", 0.2),
            word(3, "cherry", 0.5),
        ];
        let examples = vec![
            example(1, "an apple"),
            example(2, "a banana"),
            example(2, "two bananas"),
            example(3, "a cherry"),
        ];
        let corpus = Corpus::build(words.clone(), examples).unwrap();

        for w in corpus.query(WordFilter::All) {
            assert!(!corpus.examples(w.id).is_empty());
            let original = words.iter().find(|o| o.id == w.id).unwrap();
            assert_eq!(w, original);
        }
        assert_eq!(corpus.examples(2).len(), 2);
    }

    #[test]
    fn test_frequency_filter_bounds_are_exclusive() {
        let words = vec![
            word(1, "apple", 0.9),
            word(2, "banana", 0.5),
            word(3, "cherry", 0.3),
            word(4, "damson", 0.1),
        ];
        let examples = (1..=4).map(|id| example(id, "text")).collect();
        let corpus = Corpus::build(words, examples).unwrap();

        let easy = corpus.query(WordFilter::Frequency {
            min: 0.5,
            max: f64::INFINITY,
        });
        assert_eq!(easy.iter().map(|w| w.id).collect::<Vec<_>>(), vec![1]);

        let hard = corpus.query(WordFilter::Frequency {
            min: f64::NEG_INFINITY,
            max: 0.3,
        });
        assert_eq!(hard.iter().map(|w| w.id).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn test_duplicate_ids_and_blank_spellings_dropped() {
        let words = vec![word(1, "apple", 0.9), word(1, "apricot", 0.8), word(2, "  ", 0.5)];
        let examples = vec![example(1, "an apple"), example(2, "blank")];
        let corpus = Corpus::build(words, examples).unwrap();

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.get(1).unwrap().word.spelling, "apple");
    }
}
