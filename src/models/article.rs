use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{Duration, NaiveDateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

static LAST_ARTICLE_ID: AtomicU64 = AtomicU64::new(0);

/// Time-based record id, strictly increasing within the process.
pub fn next_article_id() -> u64 {
    let now = Utc::now().timestamp_micros().max(0) as u64;
    let previous = LAST_ARTICLE_ID
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(now.max(last + 1)))
        .unwrap_or(0);
    now.max(previous + 1)
}

fn default_expanded() -> bool {
    true
}

/// An article row being prepared for the `article` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub article_url: String,
    /// CSV of category codes; only the first known one is stored.
    #[serde(default)]
    pub category: String,
    /// CSV of technology names.
    #[serde(default)]
    pub tech_stacks: String,
    #[serde(default)]
    pub content: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    #[serde(default)]
    pub clicks: u32,
    #[serde(default = "default_expanded")]
    pub expanded: bool,
}

impl ArticleRecord {
    /// A blank record for `url`, used when a crawl returned nothing usable.
    pub fn empty(url: &str, stats: RecordStats) -> Self {
        Self {
            id: next_article_id(),
            title: String::new(),
            summary: String::new(),
            article_url: url.to_string(),
            category: String::new(),
            tech_stacks: String::new(),
            content: String::new(),
            created_at: stats.created_at,
            updated_at: stats.updated_at,
            clicks: stats.clicks,
            expanded: true,
        }
    }

    pub fn field(&self, field: ArticleField) -> &str {
        match field {
            ArticleField::Title => &self.title,
            ArticleField::Summary => &self.summary,
            ArticleField::ArticleUrl => &self.article_url,
            ArticleField::Category => &self.category,
            ArticleField::TechStacks => &self.tech_stacks,
            ArticleField::Content => &self.content,
        }
    }

    pub fn set_field(&mut self, field: ArticleField, value: String) {
        let slot = match field {
            ArticleField::Title => &mut self.title,
            ArticleField::Summary => &mut self.summary,
            ArticleField::ArticleUrl => &mut self.article_url,
            ArticleField::Category => &mut self.category,
            ArticleField::TechStacks => &mut self.tech_stacks,
            ArticleField::Content => &mut self.content,
        };
        *slot = value;
    }
}

/// Editable article fields, named the way validation messages report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArticleField {
    Title,
    Summary,
    ArticleUrl,
    Category,
    TechStacks,
    Content,
}

impl ArticleField {
    pub const ALL: [ArticleField; 6] = [
        ArticleField::Title,
        ArticleField::Summary,
        ArticleField::ArticleUrl,
        ArticleField::Category,
        ArticleField::TechStacks,
        ArticleField::Content,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Summary => "summary",
            ArticleField::ArticleUrl => "articleUrl",
            ArticleField::Category => "category",
            ArticleField::TechStacks => "techStacks",
            ArticleField::Content => "content",
        }
    }
}

impl fmt::Display for ArticleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArticleField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(ArticleField::Title),
            "summary" => Ok(ArticleField::Summary),
            "articleUrl" | "article_url" | "url" => Ok(ArticleField::ArticleUrl),
            "category" => Ok(ArticleField::Category),
            "techStacks" | "tech_stacks" => Ok(ArticleField::TechStacks),
            "content" => Ok(ArticleField::Content),
            other => {
                let known: Vec<_> = ArticleField::ALL.iter().map(|f| f.as_str()).collect();
                Err(AppError::UnknownField(format!("{} (expected one of {})", other, known.join(", "))))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsMode {
    /// Sentinel timestamps and zero clicks.
    #[default]
    Fixed,
    /// Random timestamps within the past year and random clicks.
    Randomized,
}

/// Timestamps and click count seeded into a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordStats {
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub clicks: u32,
}

impl RecordStats {
    pub fn fixed(at: NaiveDateTime) -> Self {
        Self {
            created_at: at,
            updated_at: at,
            clicks: 0,
        }
    }

    /// `created_at` within the year before `now`, `updated_at` within the
    /// year after `created_at`, clicks in 1..=999.
    pub fn randomized<R: Rng>(now: NaiveDateTime, rng: &mut R) -> Self {
        let year_ms = Duration::days(365).num_milliseconds();
        let created_at = now - Duration::milliseconds(rng.gen_range(0..=year_ms));
        let updated_at = created_at + Duration::milliseconds(rng.gen_range(0..=year_ms));
        Self {
            created_at,
            updated_at,
            clicks: rng.gen_range(1..=999),
        }
    }
}
