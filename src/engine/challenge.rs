use log::info;

use crate::engine::mastery::Outcome;

pub const DEFAULT_MAX_LEVEL: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChallengeState {
    Level(u32),
    Completed,
}

/// Level counter for challenge mode: one level per correct answer, holding at
/// `Completed` once the last level is answered correctly.
#[derive(Clone, Debug)]
pub struct ChallengeController {
    state: ChallengeState,
    max_level: u32,
}

impl ChallengeController {
    pub fn new(max_level: u32) -> Self {
        Self {
            state: ChallengeState::Level(1),
            max_level: max_level.max(1),
        }
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn max_level(&self) -> u32 {
        self.max_level
    }

    /// Current level; a completed challenge reports the last level.
    pub fn level(&self) -> u32 {
        match self.state {
            ChallengeState::Level(n) => n,
            ChallengeState::Completed => self.max_level,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state == ChallengeState::Completed
    }

    pub fn progress(&self) -> f64 {
        self.level() as f64 / self.max_level as f64
    }

    pub fn advance(&mut self, outcome: Outcome) -> ChallengeState {
        self.state = match (self.state, outcome) {
            (ChallengeState::Level(n), Outcome::Correct) if n < self.max_level => {
                ChallengeState::Level(n + 1)
            }
            (ChallengeState::Level(_), Outcome::Correct) => {
                info!("challenge completed at level {}", self.max_level);
                ChallengeState::Completed
            }
            (state, _) => state,
        };
        self.state
    }

    pub fn restart(&mut self) {
        self.state = ChallengeState::Level(1);
    }
}

impl Default for ChallengeController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LEVEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_level_one() {
        let challenge = ChallengeController::default();
        assert_eq!(challenge.state(), ChallengeState::Level(1));
        assert!((challenge.progress() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_nine_correct_reach_max_then_complete() {
        let mut challenge = ChallengeController::new(10);
        for _ in 0..9 {
            challenge.advance(Outcome::Correct);
        }
        assert_eq!(challenge.state(), ChallengeState::Level(10));
        assert_eq!(challenge.advance(Outcome::Correct), ChallengeState::Completed);
        assert_eq!(challenge.level(), 10);
    }

    #[test]
    fn test_incorrect_holds_level() {
        let mut challenge = ChallengeController::new(3);
        challenge.advance(Outcome::Correct);
        assert_eq!(challenge.advance(Outcome::Incorrect), ChallengeState::Level(2));
        challenge.advance(Outcome::Correct);
        assert_eq!(challenge.advance(Outcome::Incorrect), ChallengeState::Level(3));
        assert!(!challenge.is_completed());
    }

    #[test]
    fn test_completed_is_terminal_until_restart() {
        let mut challenge = ChallengeController::new(1);
        challenge.advance(Outcome::Correct);
        assert!(challenge.is_completed());
        challenge.advance(Outcome::Incorrect);
        challenge.advance(Outcome::Correct);
        assert!(challenge.is_completed());

        challenge.restart();
        assert_eq!(challenge.state(), ChallengeState::Level(1));
    }

    #[test]
    fn test_level_is_monotonic() {
        let mut challenge = ChallengeController::new(5);
        let outcomes = [
            Outcome::Incorrect,
            Outcome::Correct,
            Outcome::Incorrect,
            Outcome::Correct,
            Outcome::Correct,
            Outcome::Incorrect,
            Outcome::Correct,
            Outcome::Correct,
        ];
        let mut last = challenge.level();
        for outcome in outcomes {
            let was_max = challenge.state() == ChallengeState::Level(5);
            let state = challenge.advance(outcome);
            assert!(challenge.level() >= last);
            last = challenge.level();
            assert_eq!(
                state == ChallengeState::Completed,
                was_max && outcome == Outcome::Correct
            );
        }
    }

    #[test]
    fn test_zero_max_level_clamped() {
        let challenge = ChallengeController::new(0);
        assert_eq!(challenge.max_level(), 1);
    }
}
