use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::data::VocabularyData;
use crate::data::fetch::{self, DiskCache};
use crate::data::records::{ExampleRecord, VocabularyRecord};
use crate::engine::error::{EngineError, Result};

const SAMPLE_VOCABULARY: &str = include_str!("../../assets/sample_vocabulary.json");
const SAMPLE_EXAMPLES: &str = include_str!("../../assets/sample_examples.json");

pub const DEFAULT_VOCABULARY_FILE: &str = "tb_vocabulary.json";
pub const DEFAULT_EXAMPLES_FILE: &str = "tb_voc_examples.json";

/// Where the two data files come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataSource {
    Directory(PathBuf),
    Url(String),
    /// The small sample corpus compiled into the binary.
    Bundled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataFiles {
    pub vocabulary: String,
    pub examples: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            vocabulary: DEFAULT_VOCABULARY_FILE.to_string(),
            examples: DEFAULT_EXAMPLES_FILE.to_string(),
        }
    }
}

/// Fetch and parse both files. Any failure is reported as a single
/// `DataUnavailable`; partial data is never returned.
pub fn load(
    source: &DataSource,
    files: &DataFiles,
    id_range: Option<RangeInclusive<u32>>,
) -> Result<VocabularyData> {
    let (vocabulary_json, examples_json) = match source {
        DataSource::Directory(dir) => (
            read_file(&dir.join(&files.vocabulary))?,
            read_file(&dir.join(&files.examples))?,
        ),
        DataSource::Url(base) => {
            let cache = DiskCache::new("downloads");
            let get = |name: &str| {
                fetch::fetch_cached(base, name, cache.as_ref()).map_err(EngineError::DataUnavailable)
            };
            (get(&files.vocabulary)?, get(&files.examples)?)
        }
        DataSource::Bundled => (SAMPLE_VOCABULARY.to_string(), SAMPLE_EXAMPLES.to_string()),
    };

    let (vocabulary, examples) = parse(&vocabulary_json, &examples_json)?;
    info!(
        "loaded {} vocabulary records and {} examples",
        vocabulary.len(),
        examples.len()
    );
    Ok(into_vocabulary(&vocabulary, &examples, id_range))
}

pub fn read_records(dir: &Path, files: &DataFiles) -> Result<(Vec<VocabularyRecord>, Vec<ExampleRecord>)> {
    let vocabulary_json = read_file(&dir.join(&files.vocabulary))?;
    let examples_json = read_file(&dir.join(&files.examples))?;
    parse(&vocabulary_json, &examples_json)
}

pub fn parse(
    vocabulary_json: &str,
    examples_json: &str,
) -> Result<(Vec<VocabularyRecord>, Vec<ExampleRecord>)> {
    let vocabulary: Vec<VocabularyRecord> = serde_json::from_str(vocabulary_json)
        .map_err(|e| EngineError::DataUnavailable(format!("malformed vocabulary data: {e}")))?;
    let examples: Vec<ExampleRecord> = serde_json::from_str(examples_json)
        .map_err(|e| EngineError::DataUnavailable(format!("malformed example data: {e}")))?;
    Ok((vocabulary, examples))
}

/// Convert records to engine types, keeping only words inside `id_range`.
pub fn into_vocabulary(
    vocabulary: &[VocabularyRecord],
    examples: &[ExampleRecord],
    id_range: Option<RangeInclusive<u32>>,
) -> VocabularyData {
    let in_range = |id: u32| id_range.as_ref().is_none_or(|r| r.contains(&id));

    let words: Vec<_> = vocabulary
        .iter()
        .filter(|r| in_range(r.wordid))
        .map(VocabularyRecord::to_word)
        .collect();
    let dropped = vocabulary.len() - words.len();
    if dropped > 0 {
        warn!("{dropped} words fall outside the configured word id range");
    }

    let examples = examples
        .iter()
        .filter(|r| in_range(r.wordid))
        .map(ExampleRecord::to_example)
        .collect();

    VocabularyData { words, examples }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| EngineError::DataUnavailable(format!("{}: {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_sample_loads() {
        let data = load(&DataSource::Bundled, &DataFiles::default(), None).unwrap();
        assert!(data.words.len() > 20);
        assert!(!data.examples.is_empty());
    }

    #[test]
    fn test_missing_directory_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = load(
            &DataSource::Directory(dir.path().join("nope")),
            &DataFiles::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable(msg) if msg.contains("tb_vocabulary.json")));
    }

    #[test]
    fn test_malformed_examples_is_data_unavailable() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(DEFAULT_VOCABULARY_FILE), "[]").unwrap();
        fs::write(dir.path().join(DEFAULT_EXAMPLES_FILE), "{not json").unwrap();
        let err = load(
            &DataSource::Directory(dir.path().to_path_buf()),
            &DataFiles::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable(msg) if msg.contains("example")));
    }

    #[test]
    fn test_id_range_filters_words_and_examples() {
        let data = load(&DataSource::Bundled, &DataFiles::default(), Some(1..=5)).unwrap();
        assert_eq!(data.words.len(), 5);
        assert!(data.examples.iter().all(|e| (1..=5).contains(&e.word_id)));
    }

    #[test]
    fn test_custom_file_names() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("v.json"),
            r#"[{"wordid": 1, "spelling": "apple", "frequency": 0.5}]"#,
        )
        .unwrap();
        fs::write(dir.path().join("e.json"), r#"[{"wordid": 1, "en": "An apple."}]"#).unwrap();
        let files = DataFiles {
            vocabulary: "v.json".into(),
            examples: "e.json".into(),
        };
        let data = load(&DataSource::Directory(dir.path().to_path_buf()), &files, None).unwrap();
        assert_eq!(data.words[0].spelling, "apple");
        assert_eq!(data.examples[0].text, "An apple.");
    }
}
