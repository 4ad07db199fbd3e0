use log::{error, info};
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::data::VocabularyData;
use crate::engine::challenge::{ChallengeController, DEFAULT_MAX_LEVEL};
use crate::engine::corpus::{Corpus, Example, Word};
use crate::engine::error::{EngineError, Result};
use crate::engine::mastery::{MasterySnapshot, MasteryTracker};
use crate::engine::question::{DEFAULT_MAX_ATTEMPTS, Difficulty, Mode, Question, QuestionGenerator};
use crate::session::result::{GradeReport, SessionSummary, SessionTally};

#[derive(Clone, Debug)]
pub struct EngineSettings {
    pub max_attempts: usize,
    pub max_level: u32,
    pub questions_per_session: usize,
    pub difficulty: Difficulty,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_level: DEFAULT_MAX_LEVEL,
            questions_per_session: 10,
            difficulty: Difficulty::Medium,
        }
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_attempts: config.max_attempts,
            max_level: config.max_level,
            questions_per_session: config.questions_per_session,
            difficulty: config.difficulty,
        }
    }
}

/// All mutable drill progress, owned by a single controller.
///
/// Every operation runs to completion on the caller's thread. Callers that
/// share an `EngineState` between threads must put it behind a `Mutex` so a
/// grade and its score/mastery update stay atomic.
pub struct EngineState {
    corpus: Option<Corpus>,
    tracker: MasteryTracker,
    generator: QuestionGenerator,
    challenge: ChallengeController,
    mode: Mode,
    difficulty: Difficulty,
    current: Option<Question>,
    tally: SessionTally,
    questions_per_session: usize,
    rng: SmallRng,
}

impl EngineState {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_rng(settings, SmallRng::from_entropy())
    }

    pub fn with_rng(settings: EngineSettings, rng: SmallRng) -> Self {
        Self {
            corpus: None,
            tracker: MasteryTracker::default(),
            generator: QuestionGenerator::new(settings.max_attempts),
            challenge: ChallengeController::new(settings.max_level),
            mode: Mode::FillBlank(settings.difficulty),
            difficulty: settings.difficulty,
            current: None,
            tally: SessionTally::new(settings.difficulty),
            questions_per_session: settings.questions_per_session.max(1),
            rng,
        }
    }

    /// Build the corpus and start every word out as unmastered.
    pub fn load(&mut self, words: Vec<Word>, examples: Vec<Example>) -> Result<()> {
        let corpus = Corpus::build(words, examples)?;
        self.tracker = MasteryTracker::new(corpus.word_ids());
        self.challenge.restart();
        self.current = None;
        self.tally = SessionTally::new(self.difficulty);
        info!("engine ready with {} words", corpus.len());
        self.corpus = Some(corpus);
        Ok(())
    }

    /// Accept the data loader's result. A loader failure is passed through
    /// and the engine stays unusable.
    pub fn load_data(&mut self, data: Result<VocabularyData>) -> Result<()> {
        match data {
            Ok(data) => self.load(data.words, data.examples),
            Err(e) => {
                error!("vocabulary data could not be loaded: {e}");
                Err(e)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.corpus.is_some()
    }

    pub fn corpus(&self) -> Result<&Corpus> {
        self.corpus.as_ref().ok_or(EngineError::CorpusNotReady)
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn current(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    pub fn challenge(&self) -> &ChallengeController {
        &self.challenge
    }

    pub fn tracker(&self) -> &MasteryTracker {
        &self.tracker
    }

    pub fn session(&self) -> &SessionTally {
        &self.tally
    }

    pub fn questions_per_session(&self) -> usize {
        self.questions_per_session
    }

    pub fn snapshot(&self) -> MasterySnapshot {
        self.tracker.snapshot()
    }

    /// Takes effect for the session in progress.
    pub fn set_questions_per_session(&mut self, count: usize) {
        self.questions_per_session = count.max(1);
    }

    /// Replaces the level counter, so a challenge in progress starts over.
    pub fn set_max_level(&mut self, max_level: u32) {
        self.challenge = ChallengeController::new(max_level);
    }

    /// Switch modes and produce the first question. Entering challenge mode
    /// restarts the level counter and zeroes the score.
    pub fn start(&mut self, mode: Mode) -> Result<&Question> {
        self.corpus()?;
        match mode {
            Mode::Challenge => {
                self.challenge.restart();
                self.tracker.reset_score();
            }
            Mode::FillBlank(difficulty) => {
                self.difficulty = difficulty;
                self.tally = SessionTally::new(difficulty);
            }
        }
        info!("starting {} mode", mode.as_str());
        self.mode = mode;
        self.current = None;
        self.next_question()
    }

    /// Change the fill-blank difficulty. In fill-blank mode the current
    /// question is replaced with one drawn from the new pool.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<Option<&Question>> {
        self.difficulty = difficulty;
        if !self.is_ready() {
            return Ok(None);
        }
        match self.mode {
            Mode::FillBlank(_) => {
                self.mode = Mode::FillBlank(difficulty);
                self.tally.difficulty = difficulty;
                self.next_question().map(Some)
            }
            Mode::Challenge => Ok(None),
        }
    }

    /// Replace the current question. Also serves as "continue" after a
    /// wrong answer: the challenge level is unchanged.
    pub fn next_question(&mut self) -> Result<&Question> {
        let corpus = self.corpus.as_ref().ok_or(EngineError::CorpusNotReady)?;
        if self.mode == Mode::Challenge && self.challenge.is_completed() {
            return Err(EngineError::ChallengeComplete);
        }
        self.current = None;
        let question = self.generator.for_mode(corpus, self.mode, &mut self.rng)?;
        Ok(self.current.insert(question))
    }

    /// Grade `answer` against the current question. The question is consumed,
    /// so a repeated submit fails with `NoActiveQuestion` instead of scoring twice.
    pub fn submit(&mut self, answer: &str) -> Result<GradeReport> {
        self.corpus()?;
        let question = self.current.take().ok_or(EngineError::NoActiveQuestion)?;

        let score_before = self.tracker.score();
        let outcome = self
            .tracker
            .grade(question.word.id, answer, &question.correct_answer)?;
        let score = self.tracker.score();
        let score_delta = score as i64 - score_before as i64;
        let mastery = self
            .tracker
            .state(question.word.id)
            .ok_or(EngineError::UnknownWord(question.word.id))?;

        let mut challenge = None;
        let mut session = None;
        match self.mode {
            Mode::Challenge => {
                challenge = Some(self.challenge.advance(outcome));
            }
            Mode::FillBlank(_) => {
                self.tally.record(outcome, score_delta);
                if self.tally.answered >= self.questions_per_session {
                    let summary = SessionSummary::from_tally(&self.tally);
                    info!(
                        "session finished: {}/{} correct",
                        summary.correct, summary.answered
                    );
                    session = Some(summary);
                    self.tally = SessionTally::new(self.difficulty);
                }
            }
        }

        Ok(GradeReport {
            question_id: question.id,
            outcome,
            submitted: answer.to_string(),
            correct_answer: question.correct_answer,
            word: question.word,
            example: question.example,
            mastery,
            score_delta,
            score,
            challenge,
            session,
        })
    }

    /// Back to level 1 with a zero score. Mastery states are untouched.
    pub fn restart_challenge(&mut self) -> Result<&Question> {
        self.corpus()?;
        self.challenge.restart();
        self.tracker.reset_score();
        self.mode = Mode::Challenge;
        self.current = None;
        info!("challenge restarted");
        self.next_question()
    }
}
