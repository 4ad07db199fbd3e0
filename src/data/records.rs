use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::engine::corpus::{Example, Word};

/// One entry of the vocabulary file. Fields the engine does not use are kept
/// in `extra` so rewriting the file does not lose them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyRecord {
    pub wordid: u32,
    pub spelling: String,
    #[serde(default)]
    pub paraphrase: Option<String>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub wordid: u32,
    pub en: String,
    #[serde(default)]
    pub cn: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl VocabularyRecord {
    /// Missing or null frequencies count as 0.
    pub fn frequency_or_zero(&self) -> f64 {
        self.frequency.filter(|f| f.is_finite()).unwrap_or(0.0)
    }

    pub fn to_word(&self) -> Word {
        Word {
            id: self.wordid,
            spelling: self.spelling.trim().to_string(),
            paraphrase: self.paraphrase.clone().unwrap_or_default(),
            frequency: self.frequency_or_zero().clamp(0.0, 1.0),
        }
    }
}

impl ExampleRecord {
    pub fn to_example(&self) -> Example {
        Example {
            word_id: self.wordid,
            text: self.en.clone(),
            translation: self.cn.clone().unwrap_or_default(),
        }
    }
}
