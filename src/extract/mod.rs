//! Turning crawled pages into draft article records.

mod keywords;

pub use keywords::{extract_keywords, KeywordStrategy};

use crate::models::{ArticleRecord, RecordStats};
use crate::services::CrawledPage;
use crate::text::truncate_chars;

/// Longest summary the `article.summary` column accepts.
pub const SUMMARY_MAX_CHARS: usize = 255;

/// Build a new record for `url`, pre-filling tech stacks and category from
/// keywords found in the page title and body.
pub fn new_article_record(
    url: &str,
    page: &CrawledPage,
    stats: RecordStats,
    strategy: KeywordStrategy,
) -> ArticleRecord {
    let keywords = extract_keywords(&page.title, &page.content, strategy);
    tracing::debug!(
        "Extracted from {}: stacks=[{}] categories=[{}]",
        url,
        keywords.tech_stacks,
        keywords.categories
    );

    let mut record = ArticleRecord::empty(url, stats);
    record.title = page.title.clone();
    record.summary = truncate_chars(page.summary.trim(), SUMMARY_MAX_CHARS);
    record.content = page.content.clone();
    record.tech_stacks = keywords.tech_stacks;
    record.category = keywords.categories;
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    #[test]
    fn record_is_prefilled_from_page() {
        let page = CrawledPage {
            title: "Redis 캐시 도입기".to_string(),
            summary: format!("  {}  ", "s".repeat(300)),
            content: "백엔드 팀에서 Spring과 Redis를 사용했습니다.".to_string(),
        };
        let record = new_article_record(
            "https://github.com/acme/app/wiki/Cache",
            &page,
            RecordStats::fixed(NaiveDateTime::default()),
            KeywordStrategy::Tokens,
        );

        assert_eq!(record.article_url, "https://github.com/acme/app/wiki/Cache");
        assert_eq!(record.title, "Redis 캐시 도입기");
        assert_eq!(record.summary.chars().count(), SUMMARY_MAX_CHARS);
        assert!(!record.summary.starts_with(' '));
        assert_eq!(record.tech_stacks, "Spring, Redis");
        assert_eq!(record.category, "be");
        assert_eq!(record.content, page.content);
    }
}
