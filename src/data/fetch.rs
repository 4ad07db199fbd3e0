use std::fs;
use std::path::PathBuf;

use log::{info, warn};

/// Copies of downloaded data files, so a later run works offline.
pub struct DiskCache {
    base_dir: PathBuf,
}

impl DiskCache {
    pub fn new(subdir: &str) -> Option<Self> {
        let base = dirs::data_dir()?.join("wordrill").join(subdir);
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Option<Self> {
        fs::create_dir_all(&base_dir).ok()?;
        Some(Self { base_dir })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.base_dir.join(Self::sanitize_key(key));
        fs::read_to_string(path).ok()
    }

    pub fn put(&self, key: &str, content: &str) -> bool {
        let path = self.base_dir.join(Self::sanitize_key(key));
        fs::write(path, content).is_ok()
    }

    fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

pub fn join_url(base: &str, name: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), name.trim_start_matches('/'))
}

/// Download `name` under `base_url`, falling back to the cached copy when the
/// request fails.
pub fn fetch_cached(base_url: &str, name: &str, cache: Option<&DiskCache>) -> Result<String, String> {
    let url = join_url(base_url, name);
    match fetch_url(&url) {
        Some(body) => {
            info!("downloaded {url} ({} bytes)", body.len());
            if let Some(cache) = cache
                && !cache.put(&url, &body)
            {
                warn!("could not cache {url}");
            }
            Ok(body)
        }
        None => {
            if let Some(body) = cache.and_then(|c| c.get(&url)) {
                warn!("download of {url} failed, using cached copy");
                return Ok(body);
            }
            Err(format!("failed to download {url}"))
        }
    }
}

#[cfg(feature = "network")]
pub fn fetch_url(url: &str) -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?;
    let response = client.get(url).send().ok()?;
    if response.status().is_success() {
        response.text().ok()
    } else {
        warn!("{url} returned {}", response.status());
        None
    }
}

#[cfg(not(feature = "network"))]
pub fn fetch_url(_url: &str) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_join_url_handles_slashes() {
        assert_eq!(
            join_url("https://example.org/data/", "/words.json"),
            "https://example.org/data/words.json"
        );
        assert_eq!(join_url("https://example.org", "a.json"), "https://example.org/a.json");
    }

    #[test]
    fn test_cache_round_trip_with_sanitized_keys() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::with_base_dir(dir.path().to_path_buf()).unwrap();
        assert!(cache.put("https://example.org/a.json", "[1]"));
        assert_eq!(cache.get("https://example.org/a.json").as_deref(), Some("[1]"));
        assert!(dir.path().join("https___example.org_a.json").exists());
    }

    #[test]
    fn test_fetch_falls_back_to_cache() {
        let dir = TempDir::new().unwrap();
        let cache = DiskCache::with_base_dir(dir.path().to_path_buf()).unwrap();
        // Unroutable address: the request fails fast and the cached body is used.
        let base = "http://127.0.0.1:9";
        cache.put(&join_url(base, "w.json"), "[]");
        assert_eq!(fetch_cached(base, "w.json", Some(&cache)).unwrap(), "[]");
        assert!(fetch_cached(base, "missing.json", Some(&cache)).is_err());
    }
}
