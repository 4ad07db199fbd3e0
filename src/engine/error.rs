use thiserror::Error;

/// Every failure the drill engine reports. None of these is retried inside the
/// engine; they propagate to whoever drives it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("corpus is empty: no word has an example sentence")]
    EmptyCorpus,

    #[error("word pool is empty")]
    EmptyPool,

    #[error("word pool has {available} distinct spellings, need at least {required}")]
    InsufficientPool { required: usize, available: usize },

    #[error("no example sentence contained the selected word after {attempts} attempts")]
    NoMatchingExample { attempts: usize },

    #[error("corpus has not been loaded yet")]
    CorpusNotReady,

    #[error("vocabulary data unavailable: {0}")]
    DataUnavailable(String),

    #[error("word id {0} is not part of the corpus")]
    UnknownWord(u32),

    #[error("no question is waiting for an answer")]
    NoActiveQuestion,

    #[error("challenge is complete; restart to play again")]
    ChallengeComplete,
}

pub type Result<T> = std::result::Result<T, EngineError>;
