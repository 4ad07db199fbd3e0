use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::engine::error::{EngineError, Result};

pub const CORRECT_POINTS: u32 = 10;
pub const INCORRECT_PENALTY: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MasteryState {
    Unmastered,
    Learning,
    Mastered,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Correct,
    Incorrect,
}

impl MasteryState {
    pub const ALL: [MasteryState; 3] = [
        MasteryState::Unmastered,
        MasteryState::Learning,
        MasteryState::Mastered,
    ];

    /// State after grading. Defined for every pair; nothing leads back to
    /// `Unmastered`.
    pub fn after(self, outcome: Outcome) -> Self {
        match (self, outcome) {
            (_, Outcome::Correct) => MasteryState::Mastered,
            (_, Outcome::Incorrect) => MasteryState::Learning,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MasteryState::Unmastered => "Unmastered",
            MasteryState::Learning => "Learning",
            MasteryState::Mastered => "Mastered",
        }
    }

    fn slot(self) -> usize {
        match self {
            MasteryState::Unmastered => 0,
            MasteryState::Learning => 1,
            MasteryState::Mastered => 2,
        }
    }
}

impl Outcome {
    pub fn is_correct(self) -> bool {
        matches!(self, Outcome::Correct)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterySnapshot {
    pub mastered: usize,
    pub learning: usize,
    pub unmastered: usize,
    pub score: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
}

impl MasterySnapshot {
    pub fn total(&self) -> usize {
        self.mastered + self.learning + self.unmastered
    }

    pub fn ratio(&self, state: MasteryState) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match state {
            MasteryState::Unmastered => self.unmastered,
            MasteryState::Learning => self.learning,
            MasteryState::Mastered => self.mastered,
        };
        count as f64 / total as f64
    }
}

/// Compare a submitted answer with the expected spelling, ignoring case and
/// surrounding whitespace.
pub fn answers_match(submitted: &str, correct: &str) -> bool {
    submitted.trim().to_lowercase() == correct.trim().to_lowercase()
}

/// One mastery state per word id plus the running score.
///
/// Grading is not idempotent: every call moves the word and adjusts the score
/// again. Single-answer semantics live in `EngineState::submit`.
#[derive(Clone, Debug, Default)]
pub struct MasteryTracker {
    states: HashMap<u32, MasteryState>,
    counts: [usize; 3],
    score: u32,
    correct_answers: u32,
    incorrect_answers: u32,
}

impl MasteryTracker {
    pub fn new(word_ids: impl IntoIterator<Item = u32>) -> Self {
        let states: HashMap<u32, MasteryState> = word_ids
            .into_iter()
            .map(|id| (id, MasteryState::Unmastered))
            .collect();
        let counts = [states.len(), 0, 0];
        Self {
            states,
            counts,
            ..Self::default()
        }
    }

    pub fn grade(&mut self, word_id: u32, submitted: &str, correct: &str) -> Result<Outcome> {
        let Some(state) = self.states.get_mut(&word_id) else {
            return Err(EngineError::UnknownWord(word_id));
        };

        let outcome = if answers_match(submitted, correct) {
            Outcome::Correct
        } else {
            Outcome::Incorrect
        };

        let before = *state;
        let after = before.after(outcome);
        *state = after;
        self.counts[before.slot()] -= 1;
        self.counts[after.slot()] += 1;

        match outcome {
            Outcome::Correct => {
                self.score = self.score.saturating_add(CORRECT_POINTS);
                self.correct_answers += 1;
            }
            Outcome::Incorrect => {
                self.score = self.score.saturating_sub(INCORRECT_PENALTY);
                self.incorrect_answers += 1;
            }
        }

        debug!("graded word {word_id}: {outcome:?}, {before:?} -> {after:?}, score {}", self.score);
        Ok(outcome)
    }

    pub fn state(&self, word_id: u32) -> Option<MasteryState> {
        self.states.get(&word_id).copied()
    }

    pub fn count(&self, state: MasteryState) -> usize {
        self.counts[state.slot()]
    }

    pub fn words_in(&self, state: MasteryState) -> Vec<u32> {
        let mut ids: Vec<u32> = self
            .states
            .iter()
            .filter(|&(_, s)| *s == state)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Challenge restarts zero the score; mastery states are left alone.
    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn snapshot(&self) -> MasterySnapshot {
        MasterySnapshot {
            mastered: self.count(MasteryState::Mastered),
            learning: self.count(MasteryState::Learning),
            unmastered: self.count(MasteryState::Unmastered),
            score: self.score,
            correct_answers: self.correct_answers,
            incorrect_answers: self.incorrect_answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    fn assert_partition(tracker: &MasteryTracker) {
        let snap = tracker.snapshot();
        assert_eq!(snap.total(), tracker.len());
        for state in MasteryState::ALL {
            assert_eq!(tracker.words_in(state).len(), tracker.count(state));
        }
    }

    #[test]
    fn test_initial_state_all_unmastered() {
        let tracker = MasteryTracker::new(1..=5);
        let snap = tracker.snapshot();
        assert_eq!(snap.unmastered, 5);
        assert_eq!(snap.learning, 0);
        assert_eq!(snap.mastered, 0);
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn test_correct_answer_masters_word() {
        let mut tracker = MasteryTracker::new([5, 6]);
        let outcome = tracker.grade(5, "cat", "cat").unwrap();
        assert_eq!(outcome, Outcome::Correct);
        assert_eq!(tracker.score(), 10);
        assert_eq!(tracker.state(5), Some(MasteryState::Mastered));
        assert_partition(&tracker);
    }

    #[test]
    fn test_comparison_ignores_case_and_whitespace() {
        let mut tracker = MasteryTracker::new([1]);
        assert_eq!(tracker.grade(1, "  Cat ", "cat").unwrap(), Outcome::Correct);
        assert_eq!(tracker.grade(1, "cats", "cat").unwrap(), Outcome::Incorrect);
    }

    #[test]
    fn test_score_floors_at_zero() {
        let mut tracker = MasteryTracker::new([1]);
        tracker.grade(1, "cat", "cat").unwrap();
        for _ in 0..5 {
            tracker.grade(1, "dog", "cat").unwrap();
        }
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.state(1), Some(MasteryState::Learning));
    }

    #[test]
    fn test_incorrect_then_correct_moves_out_of_learning() {
        let mut tracker = MasteryTracker::new([1, 2]);
        tracker.grade(1, "x", "cat").unwrap();
        assert_eq!(tracker.count(MasteryState::Learning), 1);
        tracker.grade(1, "cat", "cat").unwrap();
        assert_eq!(tracker.count(MasteryState::Learning), 0);
        assert_eq!(tracker.count(MasteryState::Mastered), 1);
        assert_partition(&tracker);
    }

    #[test]
    fn test_grading_twice_is_not_idempotent() {
        let mut tracker = MasteryTracker::new([1]);
        tracker.grade(1, "cat", "cat").unwrap();
        tracker.grade(1, "cat", "cat").unwrap();
        assert_eq!(tracker.score(), 20);
        assert_eq!(tracker.snapshot().correct_answers, 2);
        assert_eq!(tracker.count(MasteryState::Mastered), 1);
    }

    #[test]
    fn test_unknown_word() {
        let mut tracker = MasteryTracker::new([1]);
        let err = tracker.grade(99, "cat", "cat").unwrap_err();
        assert_eq!(err, EngineError::UnknownWord(99));
        assert_eq!(tracker.score(), 0);
    }

    #[test]
    fn test_transition_table_is_total() {
        for state in MasteryState::ALL {
            assert_eq!(state.after(Outcome::Correct), MasteryState::Mastered);
            assert_eq!(state.after(Outcome::Incorrect), MasteryState::Learning);
        }
    }

    #[test]
    fn test_random_grading_keeps_partition_and_score_bounds() {
        let mut tracker = MasteryTracker::new(1..=20);
        let mut rng = SmallRng::seed_from_u64(13);
        let mut expected_score: u32 = 0;
        for _ in 0..500 {
            let id = rng.gen_range(1..=20);
            let correct = rng.gen_bool(0.5);
            let submitted = if correct { "word" } else { "other" };
            tracker.grade(id, submitted, "word").unwrap();
            expected_score = if correct {
                expected_score + CORRECT_POINTS
            } else {
                expected_score.saturating_sub(INCORRECT_PENALTY)
            };
            assert_eq!(tracker.score(), expected_score);
            assert_partition(&tracker);
        }
        assert_eq!(tracker.snapshot().total(), 20);
    }

    #[test]
    fn test_reset_score_keeps_states() {
        let mut tracker = MasteryTracker::new([1, 2]);
        tracker.grade(1, "cat", "cat").unwrap();
        tracker.reset_score();
        assert_eq!(tracker.score(), 0);
        assert_eq!(tracker.state(1), Some(MasteryState::Mastered));
    }
}
