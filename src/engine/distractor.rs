use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::engine::corpus::Word;
use crate::engine::error::{EngineError, Result};

pub const DEFAULT_DISTRACTOR_COUNT: usize = 3;

/// Draw `count` wrong options from `pool`. Spellings are compared
/// case-insensitively, so neither the correct spelling nor a case variant of
/// an already chosen distractor can be picked.
pub fn select<R: Rng + ?Sized>(
    correct: &Word,
    pool: &[&Word],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    let correct_key = correct.spelling.to_lowercase();

    let candidates: HashSet<String> = pool
        .iter()
        .map(|w| w.spelling.to_lowercase())
        .filter(|s| *s != correct_key)
        .collect();
    if candidates.len() < count {
        return Err(EngineError::InsufficientPool {
            required: count + 1,
            available: candidates.len() + 1,
        });
    }

    let mut seen: HashSet<String> = HashSet::with_capacity(count);
    let mut distractors = Vec::with_capacity(count);
    while distractors.len() < count {
        let Some(candidate) = pool.choose(rng) else {
            return Err(EngineError::EmptyPool);
        };
        let key = candidate.spelling.to_lowercase();
        if key == correct_key || !seen.insert(key) {
            continue;
        }
        distractors.push(candidate.spelling.clone());
    }
    Ok(distractors)
}

/// The correct answer plus its distractors, uniformly permuted.
pub fn build_options<R: Rng + ?Sized>(
    correct: &str,
    distractors: Vec<String>,
    rng: &mut R,
) -> Vec<String> {
    let mut options = Vec::with_capacity(distractors.len() + 1);
    options.push(correct.to_string());
    options.extend(distractors);
    options.shuffle(rng);
    options
}
