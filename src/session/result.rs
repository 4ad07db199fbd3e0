use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::challenge::ChallengeState;
use crate::engine::corpus::{Example, Word};
use crate::engine::mastery::{MasteryState, Outcome};
use crate::engine::question::Difficulty;

/// What the presentation layer gets back after an answer.
#[derive(Clone, Debug, PartialEq)]
pub struct GradeReport {
    pub question_id: u64,
    pub outcome: Outcome,
    pub submitted: String,
    pub correct_answer: String,
    pub word: Word,
    pub example: Example,
    pub mastery: MasteryState,
    /// Actual change applied to the score; a penalty at zero score is 0.
    pub score_delta: i64,
    pub score: u32,
    /// Level state after the answer, challenge mode only.
    pub challenge: Option<ChallengeState>,
    /// Set when this answer finished a fill-blank session.
    pub session: Option<SessionSummary>,
}

impl GradeReport {
    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Running counts for the fill-blank session in progress.
#[derive(Clone, Debug)]
pub struct SessionTally {
    pub started_at: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub score_gained: i64,
}

impl SessionTally {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            started_at: Utc::now(),
            difficulty,
            answered: 0,
            correct: 0,
            incorrect: 0,
            score_gained: 0,
        }
    }

    pub fn record(&mut self, outcome: Outcome, score_delta: i64) {
        self.answered += 1;
        match outcome {
            Outcome::Correct => self.correct += 1,
            Outcome::Incorrect => self.incorrect += 1,
        }
        self.score_gained += score_delta;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub difficulty: Difficulty,
    pub answered: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub accuracy: f64,
    pub score_gained: i64,
}

impl SessionSummary {
    pub fn from_tally(tally: &SessionTally) -> Self {
        let accuracy = if tally.answered > 0 {
            (tally.correct as f64 / tally.answered as f64 * 100.0).clamp(0.0, 100.0)
        } else {
            100.0
        };
        Self {
            started_at: tally.started_at,
            finished_at: Utc::now(),
            difficulty: tally.difficulty,
            answered: tally.answered,
            correct: tally.correct,
            incorrect: tally.incorrect,
            accuracy,
            score_gained: tally.score_gained,
        }
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_outcomes() {
        let mut tally = SessionTally::new(Difficulty::Easy);
        tally.record(Outcome::Correct, 10);
        tally.record(Outcome::Incorrect, -5);
        tally.record(Outcome::Correct, 10);

        let summary = SessionSummary::from_tally(&tally);
        assert_eq!(summary.answered, 3);
        assert_eq!(summary.correct, 2);
        assert_eq!(summary.incorrect, 1);
        assert_eq!(summary.score_gained, 15);
        assert!((summary.accuracy - 66.666).abs() < 0.01);
        assert_eq!(summary.difficulty, Difficulty::Easy);
        assert!(summary.elapsed_secs() >= 0.0);
    }

    #[test]
    fn test_empty_session_accuracy() {
        let summary = SessionSummary::from_tally(&SessionTally::new(Difficulty::Medium));
        assert_eq!(summary.accuracy, 100.0);
    }
}
