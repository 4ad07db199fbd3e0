pub mod challenge;
pub mod corpus;
pub mod distractor;
pub mod error;
pub mod mastery;
pub mod question;

pub use challenge::{ChallengeController, ChallengeState};
pub use corpus::{Corpus, Example, Word, WordFilter};
pub use error::EngineError;
pub use mastery::{MasterySnapshot, MasteryState, MasteryTracker, Outcome};
pub use question::{Difficulty, Mode, Question, QuestionGenerator};
