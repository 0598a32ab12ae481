//! Client configuration.
//!
//! Read from `config.toml` in the platform config directory
//! (e.g. `~/.config/jobfind/config.toml`). Every key is optional:
//!
//! ```toml
//! api_base_url = "https://jsearch.p.rapidapi.com"
//! api_host = "jsearch.p.rapidapi.com"
//! page_size = 10
//! max_description_length = 200
//! cache_duration_secs = 300
//! request_timeout_secs = 30
//! default_sort = "date-desc"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::SortOrder;
use crate::normalize::MAX_DESCRIPTION_LENGTH;
use crate::pagination::PAGE_SIZE;

const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub api_host: String,
    /// Has-next threshold: a page with fewer results disables "next". Not sent
    /// to the API, which returns at most 10 per page, so larger values are capped.
    pub page_size: usize,
    pub max_description_length: usize,
    /// Accepted for compatibility with older config files. Responses are never cached.
    pub cache_duration_secs: u64,
    /// `None` leaves the HTTP client's own default in place.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    pub default_sort: SortOrder,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "https://jsearch.p.rapidapi.com".to_string(),
            api_host: "jsearch.p.rapidapi.com".to_string(),
            page_size: PAGE_SIZE,
            max_description_length: MAX_DESCRIPTION_LENGTH,
            cache_duration_secs: 5 * 60,
            request_timeout_secs: None,
            default_sort: SortOrder::DateDesc,
        }
    }
}

impl Config {
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "jobfind") {
            proj_dirs.config_dir().join(CONFIG_FILE_NAME)
        } else {
            PathBuf::from(CONFIG_FILE_NAME)
        }
    }

    /// Missing file means defaults; a file that fails to parse is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.page_size == 0 || self.page_size > PAGE_SIZE {
            self.page_size = PAGE_SIZE;
        }
        self
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::JobRecord;
    use crate::render::{view, RenderOptions, View};
    use crate::session::{DisplayState, SearchState};
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.page_size, 10);
        assert_eq!(config.max_description_length, 200);
        assert_eq!(config.api_host, "jsearch.p.rapidapi.com");
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "api_base_url = \"http://localhost:8080\"\nrequest_timeout_secs = 15\ndefault_sort = \"company\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.default_sort, SortOrder::Company);
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = \"ten\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_zero_page_size_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 0").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().page_size, PAGE_SIZE);
    }

    #[test]
    fn test_page_size_capped_at_remote_page() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "page_size = 20").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.page_size, PAGE_SIZE);

        let mut state = SearchState::new(Some("k".to_string()), SortOrder::DateDesc);
        state.results = vec![JobRecord::default(); PAGE_SIZE];
        let View::Results { controls, .. } = view(&state, &DisplayState::Results, RenderOptions::from(&config)) else {
            panic!("expected results view");
        };
        assert!(controls.next_enabled);

        fs::write(&path, "page_size = 5").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().page_size, 5);
    }

    #[test]
    fn test_to_toml_roundtrips_defaults() {
        let text = Config::default().to_toml().unwrap();
        assert!(text.contains("api_host"));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Config::default());
    }
}
