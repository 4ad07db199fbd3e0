use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::Serialize;

use crate::data::loader::{self, DataFiles};
use crate::data::records::{ExampleRecord, VocabularyRecord};

pub const SIMPLE_VOCABULARY_FILE: &str = "tb_vocabulary_simple.json";
pub const SIMPLE_EXAMPLES_FILE: &str = "tb_voc_examples_simple.json";
pub const DEFAULT_KEEP: usize = 1000;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimplifyReport {
    pub words_in: usize,
    pub examples_in: usize,
    pub words_with_examples: usize,
    pub words_kept: usize,
    pub examples_kept: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrittenFiles {
    pub vocabulary: PathBuf,
    pub vocabulary_bytes: u64,
    pub examples: PathBuf,
    pub examples_bytes: u64,
}

/// Keep the `keep` most frequent words that have examples, plus their examples.
/// Ties keep the input order.
pub fn simplify(
    vocabulary: Vec<VocabularyRecord>,
    examples: Vec<ExampleRecord>,
    keep: usize,
) -> (Vec<VocabularyRecord>, Vec<ExampleRecord>, SimplifyReport) {
    let mut report = SimplifyReport {
        words_in: vocabulary.len(),
        examples_in: examples.len(),
        ..SimplifyReport::default()
    };

    let mut example_counts: HashMap<u32, usize> = HashMap::new();
    for example in &examples {
        *example_counts.entry(example.wordid).or_default() += 1;
    }

    let mut words: Vec<VocabularyRecord> = vocabulary
        .into_iter()
        .filter(|w| example_counts.contains_key(&w.wordid))
        .collect();
    report.words_with_examples = words.len();

    words.sort_by(|a, b| {
        b.frequency_or_zero()
            .partial_cmp(&a.frequency_or_zero())
            .unwrap_or(Ordering::Equal)
    });
    words.truncate(keep);
    report.words_kept = words.len();

    let kept_ids: HashSet<u32> = words.iter().map(|w| w.wordid).collect();
    let examples: Vec<ExampleRecord> = examples
        .into_iter()
        .filter(|e| kept_ids.contains(&e.wordid))
        .collect();
    report.examples_kept = examples.len();

    (words, examples, report)
}

/// Read the data files from `input`, simplify them and write the
/// `*_simple.json` pair into `output`.
pub fn run(
    input: &Path,
    output: &Path,
    files: &DataFiles,
    keep: usize,
) -> Result<(SimplifyReport, WrittenFiles)> {
    let (vocabulary, examples) = loader::read_records(input, files)?;
    info!(
        "simplifying {} words and {} examples from {}",
        vocabulary.len(),
        examples.len(),
        input.display()
    );
    let (vocabulary, examples, report) = simplify(vocabulary, examples, keep);

    fs::create_dir_all(output)
        .with_context(|| format!("creating output directory {}", output.display()))?;
    let vocabulary_path = output.join(SIMPLE_VOCABULARY_FILE);
    let examples_path = output.join(SIMPLE_EXAMPLES_FILE);
    write_json_atomic(&vocabulary_path, &vocabulary)?;
    write_json_atomic(&examples_path, &examples)?;

    let written = WrittenFiles {
        vocabulary_bytes: fs::metadata(&vocabulary_path)?.len(),
        vocabulary: vocabulary_path,
        examples_bytes: fs::metadata(&examples_path)?.len(),
        examples: examples_path,
    };
    Ok((report, written))
}

fn write_json_atomic<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let tmp_path = path.with_extension("json.tmp");

    let json = serde_json::to_vec(data)?;
    let mut file = fs::File::create(&tmp_path)
        .with_context(|| format!("creating {}", tmp_path.display()))?;
    file.write_all(&json)?;
    file.sync_all()?;

    fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;
    use tempfile::TempDir;

    fn vocab(id: u32, spelling: &str, frequency: Option<f64>) -> VocabularyRecord {
        VocabularyRecord {
            wordid: id,
            spelling: spelling.to_string(),
            paraphrase: None,
            frequency,
            extra: Map::new(),
        }
    }

    fn example(id: u32, en: &str) -> ExampleRecord {
        ExampleRecord {
            wordid: id,
            en: en.to_string(),
            cn: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_keeps_most_frequent_words_with_examples() {
        let vocabulary = vec![
            vocab(1, "low", Some(0.1)),
            vocab(2, "high", Some(0.9)),
            vocab(3, "none", None),
            vocab(4, "orphan", Some(1.0)),
            vocab(5, "mid", Some(0.5)),
        ];
        let examples = vec![
            example(1, "low"),
            example(2, "high"),
            example(2, "high again"),
            example(3, "none"),
            example(5, "mid"),
        ];

        let (words, examples, report) = simplify(vocabulary, examples, 2);
        let ids: Vec<u32> = words.iter().map(|w| w.wordid).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(examples.len(), 3);
        assert_eq!(
            report,
            SimplifyReport {
                words_in: 5,
                examples_in: 5,
                words_with_examples: 4,
                words_kept: 2,
                examples_kept: 3,
            }
        );
    }

    #[test]
    fn test_run_writes_both_files() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        fs::write(
            input.path().join("tb_vocabulary.json"),
            r#"[{"wordid": 1, "spelling": "apple", "frequency": 0.9, "phonetic": "x"},
                {"wordid": 2, "spelling": "pear", "frequency": 0.2}]"#,
        )
        .unwrap();
        fs::write(
            input.path().join("tb_voc_examples.json"),
            r#"[{"wordid": 1, "en": "An apple.", "cn": "一个苹果。"}]"#,
        )
        .unwrap();

        let (report, written) =
            run(input.path(), output.path(), &DataFiles::default(), DEFAULT_KEEP).unwrap();
        assert_eq!(report.words_kept, 1);
        assert!(written.vocabulary_bytes > 0);

        let content = fs::read_to_string(&written.vocabulary).unwrap();
        assert!(!content.contains('\n'), "output is compact JSON");
        assert_eq!(written.vocabulary_bytes, content.len() as u64);
        let examples = fs::read_to_string(&written.examples).unwrap();
        assert!(!examples.contains('\n'));
        let records: Vec<VocabularyRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].extra.get("phonetic").unwrap(), "x");

        let leftovers: Vec<_> = fs::read_dir(output.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_run_missing_input_fails() {
        let input = TempDir::new().unwrap();
        let output = TempDir::new().unwrap();
        assert!(run(input.path(), output.path(), &DataFiles::default(), 10).is_err());
    }
}
