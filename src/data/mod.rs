pub mod fetch;
pub mod loader;
pub mod records;
pub mod simplify;

pub use loader::{DataFiles, DataSource};

use crate::engine::corpus::{Example, Word};

/// Parsed input for `Corpus::build`, handed over only once both files loaded.
#[derive(Clone, Debug, Default)]
pub struct VocabularyData {
    pub words: Vec<Word>,
    pub examples: Vec<Example>,
}
