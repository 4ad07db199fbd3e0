use std::fs;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::data::loader::{DEFAULT_EXAMPLES_FILE, DEFAULT_VOCABULARY_FILE};
use crate::data::{DataFiles, DataSource};
use crate::engine::challenge::DEFAULT_MAX_LEVEL;
use crate::engine::question::{DEFAULT_MAX_ATTEMPTS, Difficulty};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_questions_per_session")]
    pub questions_per_session: usize,
    #[serde(default)]
    pub auto_play_audio: bool,
    #[serde(default = "default_min_word_id")]
    pub min_word_id: u32,
    #[serde(default = "default_max_word_id")]
    pub max_word_id: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_max_level")]
    pub max_level: u32,
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_vocabulary_file")]
    pub vocabulary_file: String,
    #[serde(default = "default_examples_file")]
    pub examples_file: String,
    #[serde(default)]
    pub data_url: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_questions_per_session() -> usize {
    10
}
fn default_min_word_id() -> u32 {
    1
}
fn default_max_word_id() -> u32 {
    1000
}
fn default_max_level() -> u32 {
    DEFAULT_MAX_LEVEL
}
fn default_max_attempts() -> usize {
    DEFAULT_MAX_ATTEMPTS
}
fn default_theme() -> String {
    "default".to_string()
}
fn default_data_dir() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordrill")
        .join("data")
        .to_string_lossy()
        .to_string()
}
fn default_vocabulary_file() -> String {
    DEFAULT_VOCABULARY_FILE.to_string()
}
fn default_examples_file() -> String {
    DEFAULT_EXAMPLES_FILE.to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_per_session: default_questions_per_session(),
            auto_play_audio: false,
            min_word_id: default_min_word_id(),
            max_word_id: default_max_word_id(),
            difficulty: Difficulty::default(),
            max_level: default_max_level(),
            max_attempts: default_max_attempts(),
            theme: default_theme(),
            data_dir: default_data_dir(),
            vocabulary_file: default_vocabulary_file(),
            examples_file: default_examples_file(),
            data_url: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordrill")
            .join("config.toml")
    }

    /// Clamp values a hand-edited file may have pushed out of range.
    pub fn validate(&mut self) {
        self.questions_per_session = self.questions_per_session.clamp(1, 100);
        self.max_level = self.max_level.clamp(1, 100);
        self.max_attempts = self.max_attempts.max(1);
        if self.min_word_id > self.max_word_id {
            std::mem::swap(&mut self.min_word_id, &mut self.max_word_id);
        }
    }

    pub fn word_id_range(&self) -> RangeInclusive<u32> {
        self.min_word_id..=self.max_word_id
    }

    pub fn data_files(&self) -> DataFiles {
        DataFiles {
            vocabulary: self.vocabulary_file.clone(),
            examples: self.examples_file.clone(),
        }
    }

    /// A configured URL wins over the local data directory.
    pub fn data_source(&self) -> DataSource {
        match &self.data_url {
            Some(url) if !url.trim().is_empty() => DataSource::Url(url.trim().to_string()),
            _ => DataSource::Directory(PathBuf::from(&self.data_dir)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.questions_per_session, 10);
        assert!(!config.auto_play_audio);
        assert_eq!(config.min_word_id, 1);
        assert_eq!(config.max_word_id, 1000);
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.max_level, 10);
        assert!(config.data_dir.contains("wordrill"));
        assert!(config.data_url.is_none());
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
questions_per_session = 25
difficulty = "hard"
data_url = "https://example.org/data"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.questions_per_session, 25);
        assert_eq!(config.difficulty, Difficulty::Hard);
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(
            config.data_source(),
            DataSource::Url("https://example.org/data".to_string())
        );
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.questions_per_session, deserialized.questions_per_session);
        assert_eq!(config.data_dir, deserialized.data_dir);
        assert_eq!(config.difficulty, deserialized.difficulty);
        assert_eq!(config.examples_file, deserialized.examples_file);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.questions_per_session = 0;
        config.max_level = 500;
        config.max_attempts = 0;
        config.min_word_id = 900;
        config.max_word_id = 100;
        config.validate();

        assert_eq!(config.questions_per_session, 1);
        assert_eq!(config.max_level, 100);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.word_id_range(), 100..=900);
    }

    #[test]
    fn test_blank_url_uses_data_dir() {
        let mut config = Config::default();
        config.data_url = Some("  ".to_string());
        assert!(matches!(config.data_source(), DataSource::Directory(_)));
    }
}
