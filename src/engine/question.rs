use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use rand::Rng;
use rand::seq::SliceRandom;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::engine::corpus::{Corpus, Example, Word, WordFilter};
use crate::engine::distractor::{self, DEFAULT_DISTRACTOR_COUNT};
use crate::engine::error::{EngineError, Result};

pub const BLANK: &str = "_____";
pub const DEFAULT_MAX_ATTEMPTS: usize = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Easy draws frequent words, hard draws rare ones, medium draws everything.
    pub fn filter(self) -> WordFilter {
        match self {
            Difficulty::Easy => WordFilter::Frequency {
                min: 0.5,
                max: f64::INFINITY,
            },
            Difficulty::Medium => WordFilter::All,
            Difficulty::Hard => WordFilter::Frequency {
                min: f64::NEG_INFINITY,
                max: 0.3,
            },
        }
    }

    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}' (easy, medium, hard)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    FillBlank(Difficulty),
    /// Always the whole corpus, difficulty does not apply.
    Challenge,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::FillBlank(_) => "fill-blank",
            Mode::Challenge => "challenge",
        }
    }

    /// Words a question may be asked about.
    pub fn question_pool(self, corpus: &Corpus) -> Vec<&Word> {
        match self {
            Mode::FillBlank(difficulty) => corpus.query(difficulty.filter()),
            Mode::Challenge => corpus.query(WordFilter::All),
        }
    }

    /// Words wrong options are drawn from: the filtered pool in fill-blank
    /// mode, the full corpus in challenge mode.
    pub fn distractor_pool<'a>(self, corpus: &'a Corpus, question_pool: &[&'a Word]) -> Vec<&'a Word> {
        match self {
            Mode::FillBlank(_) => question_pool.to_vec(),
            Mode::Challenge => corpus.query(WordFilter::All),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Question {
    /// Unique per generator; grading consumes it.
    pub id: u64,
    pub word: Word,
    pub example: Example,
    /// Example text with every occurrence of the word blanked out.
    pub display_text: String,
    pub correct_answer: String,
    pub options: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct QuestionGenerator {
    max_attempts: usize,
    next_id: u64,
}

impl QuestionGenerator {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            next_id: 1,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Build a question for `mode` from the corpus.
    pub fn for_mode<R: Rng + ?Sized>(
        &mut self,
        corpus: &Corpus,
        mode: Mode,
        rng: &mut R,
    ) -> Result<Question> {
        let pool = mode.question_pool(corpus);
        let distractor_pool = mode.distractor_pool(corpus, &pool);
        self.next(corpus, &pool, &distractor_pool, rng)
    }

    /// Pick a random word from `pool` and one of its examples that actually
    /// contains it, retrying up to `max_attempts` draws.
    pub fn next<R: Rng + ?Sized>(
        &mut self,
        corpus: &Corpus,
        pool: &[&Word],
        distractor_pool: &[&Word],
        rng: &mut R,
    ) -> Result<Question> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }

        for attempt in 1..=self.max_attempts {
            let Some(&word) = pool.choose(rng) else {
                return Err(EngineError::EmptyPool);
            };
            let Some(example) = corpus.examples(word.id).choose(rng) else {
                continue;
            };
            let Some(display_text) = blank_out(&example.text, &word.spelling) else {
                debug!(
                    "attempt {attempt}: '{}' not found in example \"{}\"",
                    word.spelling, example.text
                );
                continue;
            };

            let distractors =
                distractor::select(word, distractor_pool, DEFAULT_DISTRACTOR_COUNT, rng)?;
            let options = distractor::build_options(&word.spelling, distractors, rng);

            let id = self.next_id;
            self.next_id += 1;
            debug!("question {id}: word {} ({})", word.id, word.spelling);
            return Ok(Question {
                id,
                word: word.clone(),
                example: example.clone(),
                display_text,
                correct_answer: word.spelling.clone(),
                options,
            });
        }

        warn!(
            "gave up after {} attempts to find an example containing the word",
            self.max_attempts
        );
        Err(EngineError::NoMatchingExample {
            attempts: self.max_attempts,
        })
    }
}

impl Default for QuestionGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

fn spelling_pattern(spelling: &str) -> Option<Regex> {
    RegexBuilder::new(&regex::escape(spelling))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Replace every case-insensitive occurrence of `spelling` in `text` with
/// [`BLANK`]. Returns `None` when the spelling does not occur.
///
/// Matching is by substring, so "cat" is also blanked inside "category".
pub fn blank_out(text: &str, spelling: &str) -> Option<String> {
    if spelling.is_empty() {
        return None;
    }
    let pattern = spelling_pattern(spelling)?;
    if !pattern.is_match(text) {
        return None;
    }
    Some(pattern.replace_all(text, BLANK).into_owned())
}
