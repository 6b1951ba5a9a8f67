use serde::{Deserialize, Serialize};

/// The single project edited per session, read from a TOML file.
///
/// Multi-valued fields are CSV-encoded the same way as article fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub title: String,
    pub summary: String,
    pub description: String,
    pub tech_stacks: String,
    pub categories: String,
    pub thumbnail_urls: String,
    pub image_urls: String,
    pub github_url: String,
    pub production_url: String,
}

impl ProjectRecord {
    pub fn from_toml(content: &str) -> crate::error::Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
