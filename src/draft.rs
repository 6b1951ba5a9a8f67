//! The operator's working set of articles, kept as an editable TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::ArticleRecord;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    /// Project every article in the draft belongs to.
    #[serde(default)]
    pub project_github_url: String,

    /// Newest first.
    #[serde(default)]
    pub articles: Vec<ArticleRecord>,
}

impl Draft {
    /// Read a draft; a missing file is an empty draft.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No draft at {:?}, starting empty", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn position(&self, id: u64) -> Option<usize> {
        self.articles.iter().position(|a| a.id == id)
    }
}
