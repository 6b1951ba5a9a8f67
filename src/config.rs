use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::extract::KeywordStrategy;
use crate::lookup::ProjectTaxonomyVersion;
use crate::models::StatsMode;

const APP_DIR: &str = "seed-sql";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the crawl service (`{base}/crawl?url=...`). Pages are
    /// fetched directly when unset.
    pub crawl_api_base: Option<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_crawl_concurrency")]
    pub crawl_concurrency: usize,

    /// Used for `article.project_id` when the draft does not name a project.
    #[serde(default)]
    pub project_github_url: String,

    #[serde(default)]
    pub keyword_strategy: KeywordStrategy,

    #[serde(default)]
    pub project_taxonomy: ProjectTaxonomyVersion,

    #[serde(default)]
    pub article_stats: StatsMode,

    #[serde(default = "default_article_timestamp")]
    pub article_timestamp: NaiveDateTime,

    #[serde(default = "default_project_timestamp")]
    pub project_timestamp: NaiveDateTime,

    /// Keep an empty record for URLs whose crawl failed.
    #[serde(default = "default_fallback_on_failure")]
    pub fallback_on_failure: bool,

    #[serde(default = "default_draft_path")]
    pub draft_path: String,
}

fn sentinel(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 8, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn default_article_timestamp() -> NaiveDateTime {
    sentinel(19)
}

fn default_project_timestamp() -> NaiveDateTime {
    sentinel(20)
}

fn default_request_timeout() -> u64 {
    30
}

fn default_crawl_concurrency() -> usize {
    4
}

fn default_fallback_on_failure() -> bool {
    true
}

fn default_draft_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("draft.toml")
        .to_string_lossy()
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl_api_base: None,
            request_timeout_secs: default_request_timeout(),
            crawl_concurrency: default_crawl_concurrency(),
            project_github_url: String::new(),
            keyword_strategy: KeywordStrategy::default(),
            project_taxonomy: ProjectTaxonomyVersion::default(),
            article_stats: StatsMode::default(),
            article_timestamp: default_article_timestamp(),
            project_timestamp: default_project_timestamp(),
            fallback_on_failure: default_fallback_on_failure(),
            draft_path: default_draft_path(),
        }
    }
}

impl Config {
    /// The file to load: `explicit` when given, else the default location.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        explicit.map(Path::to_path_buf).unwrap_or_else(Self::config_path)
    }

    /// Read `path`, writing the defaults there first if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            config.check()?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn check(&self) -> Result<()> {
        if self.crawl_concurrency == 0 {
            return Err(AppError::Config("crawl_concurrency must be at least 1".to_string()));
        }
        if let Some(base) = &self.crawl_api_base {
            url::Url::parse(base)
                .map_err(|e| AppError::Config(format!("crawl_api_base: {}", e)))?;
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.project_taxonomy, ProjectTaxonomyVersion::V2);
        assert_eq!(config.article_timestamp.to_string(), "2025-08-19 00:00:00");

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
crawl_api_base = "http://localhost:3000/api"
keyword_strategy = "whole_word"
project_taxonomy = "v1"
article_stats = "randomized"
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.crawl_api_base.as_deref(), Some("http://localhost:3000/api"));
        assert_eq!(config.keyword_strategy, KeywordStrategy::WholeWord);
        assert_eq!(config.project_taxonomy, ProjectTaxonomyVersion::V1);
        assert_eq!(config.article_stats, StatsMode::Randomized);
        assert_eq!(config.crawl_concurrency, 4);
        assert!(config.fallback_on_failure);
    }

    #[test]
    fn explicit_path_overrides_default_location() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(Config::resolve_path(Some(&path)), path);
        assert_eq!(Config::resolve_path(None), Config::config_path());
    }

    #[test]
    fn rejects_zero_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "crawl_concurrency = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Config(_))));
    }
}
