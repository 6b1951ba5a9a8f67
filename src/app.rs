use chrono::Utc;
use futures::stream::{self, StreamExt};

use crate::config::Config;
use crate::draft::Draft;
use crate::error::{AppError, Result};
use crate::extract::new_article_record;
use crate::models::{ArticleField, ArticleRecord, ProjectRecord, RecordStats, StatsMode};
use crate::services::{Crawl, Crawler};
use crate::sql::{build_article_sql, build_batch_sql, build_project_sql, ArticleSql, ProjectSql};
use crate::validate::{validate_article, validate_project, FieldErrors};

/// Result of crawling a batch of URLs.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CrawlReport {
    /// Ids of new records, in completion order.
    pub added: Vec<u64>,
    /// URLs whose crawl failed, with the error text.
    pub failed: Vec<(String, String)>,
}

pub struct App<C = Crawler> {
    pub draft: Draft,
    config: Config,
    crawler: C,
}

impl App<Crawler> {
    pub fn new(config: &Config, draft: Draft) -> Result<Self> {
        let crawler = Crawler::new(config)?;
        Ok(Self::with_crawler(config, draft, crawler))
    }
}

impl<C: Crawl> App<C> {
    pub fn with_crawler(config: &Config, draft: Draft, crawler: C) -> Self {
        Self {
            draft,
            config: config.clone(),
            crawler,
        }
    }

    /// The draft's project, falling back to the configured one.
    pub fn project_github_url(&self) -> &str {
        if self.draft.project_github_url.is_empty() {
            &self.config.project_github_url
        } else {
            &self.draft.project_github_url
        }
    }

    fn record_stats(&self) -> RecordStats {
        match self.config.article_stats {
            StatsMode::Fixed => RecordStats::fixed(self.config.article_timestamp),
            StatsMode::Randomized => {
                RecordStats::randomized(Utc::now().naive_utc(), &mut rand::thread_rng())
            }
        }
    }

    /// Crawl `url` and build its record. A failed crawl yields an empty
    /// record when `fallback_on_failure` is set.
    async fn record_for(&self, url: &str) -> Result<ArticleRecord> {
        match self.crawler.crawl(url).await {
            Ok(page) => Ok(new_article_record(
                url,
                &page,
                self.record_stats(),
                self.config.keyword_strategy,
            )),
            Err(e) if self.config.fallback_on_failure => {
                tracing::warn!("Crawl failed for {}, adding empty record: {}", url, e);
                Ok(ArticleRecord::empty(url, self.record_stats()))
            }
            Err(e) => Err(e),
        }
    }

    /// Crawl one URL and put the new record at the top of the list.
    pub async fn add_url(&mut self, url: &str) -> Result<u64> {
        let record = self.record_for(url).await?;
        let id = record.id;
        self.draft.articles.insert(0, record);
        Ok(id)
    }

    /// Crawl several URLs concurrently. Each record goes to the top of the
    /// list as its crawl finishes; a failure never stops the others.
    pub async fn add_urls(&mut self, urls: &[String]) -> CrawlReport {
        let limit = self.config.crawl_concurrency.max(1);
        let this = &*self;

        let results: Vec<_> = stream::iter(urls)
            .map(|url| async move { (url, this.record_for(url).await) })
            .buffer_unordered(limit)
            .collect()
            .await;

        let mut report = CrawlReport::default();
        for (url, result) in results {
            match result {
                Ok(record) => {
                    tracing::info!("Added {} as {}", url, record.id);
                    report.added.push(record.id);
                    self.draft.articles.insert(0, record);
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", url, e);
                    report.failed.push((url.clone(), e.to_string()));
                }
            }
        }
        report
    }

    pub fn article(&self, id: u64) -> Result<&ArticleRecord> {
        self.draft
            .articles
            .iter()
            .find(|a| a.id == id)
            .ok_or(AppError::ArticleNotFound(id))
    }

    pub fn update_article(&mut self, id: u64, field: ArticleField, value: String) -> Result<()> {
        let index = self.draft.position(id).ok_or(AppError::ArticleNotFound(id))?;
        self.draft.articles[index].set_field(field, value);
        Ok(())
    }

    pub fn delete_article(&mut self, id: u64) -> Result<ArticleRecord> {
        let index = self.draft.position(id).ok_or(AppError::ArticleNotFound(id))?;
        Ok(self.draft.articles.remove(index))
    }

    pub fn article_sql(&self, id: u64) -> Result<ArticleSql> {
        Ok(build_article_sql(self.article(id)?, self.project_github_url()))
    }

    /// Every article of the draft in one transaction.
    pub fn batch_sql(&self) -> String {
        build_batch_sql(&self.draft.articles, self.project_github_url())
    }

    /// Validation results for articles that have at least one problem.
    pub fn validate_all(&self) -> Vec<(u64, FieldErrors)> {
        self.draft
            .articles
            .iter()
            .map(|a| (a.id, validate_article(a)))
            .filter(|(_, errors)| !errors.is_empty())
            .collect()
    }

    pub fn project_sql(&self, project: &ProjectRecord) -> ProjectSql {
        build_project_sql(project, self.config.project_taxonomy, &self.config.project_timestamp)
    }

    pub fn validate_project(&self, project: &ProjectRecord) -> FieldErrors {
        validate_project(project, self.config.project_taxonomy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CrawledPage;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Serves canned pages; URLs not in the map fail.
    struct FakeCrawler {
        pages: HashMap<String, (u64, CrawledPage)>,
    }

    impl FakeCrawler {
        fn new(entries: &[(&str, u64, &str, &str)]) -> Self {
            let pages = entries
                .iter()
                .map(|(url, delay_ms, title, content)| {
                    let page = CrawledPage {
                        title: title.to_string(),
                        summary: format!("Summary of {title}"),
                        content: content.to_string(),
                    };
                    (url.to_string(), (*delay_ms, page))
                })
                .collect();
            Self { pages }
        }
    }

    impl Crawl for FakeCrawler {
        async fn crawl(&self, url: &str) -> Result<CrawledPage> {
            match self.pages.get(url) {
                Some((delay_ms, page)) => {
                    tokio::time::sleep(Duration::from_millis(*delay_ms)).await;
                    Ok(page.clone())
                }
                None => Err(AppError::CrawlFailed {
                    url: url.to_string(),
                    message: "HTTP 500".to_string(),
                }),
            }
        }
    }

    fn app(crawler: FakeCrawler, config: Config) -> App<FakeCrawler> {
        App::with_crawler(&config, Draft::default(), crawler)
    }

    #[test]
    fn add_url_prefills_record() {
        let crawler = FakeCrawler::new(&[("https://a.example.com", 0, "React hooks", "useEffect in React")]);
        let mut app = app(crawler, Config::default());

        let id = tokio_test::block_on(app.add_url("https://a.example.com")).unwrap();
        let record = app.article(id).unwrap();
        assert_eq!(record.tech_stacks, "React");
        assert_eq!(record.summary, "Summary of React hooks");
        assert_eq!(record.created_at, Config::default().article_timestamp);
        assert_eq!(record.clicks, 0);
    }

    #[tokio::test]
    async fn failed_crawl_falls_back_to_empty_record() {
        let mut app = app(FakeCrawler::new(&[]), Config::default());
        let id = app.add_url("https://down.example.com").await.unwrap();
        let record = app.article(id).unwrap();
        assert_eq!(record.article_url, "https://down.example.com");
        assert!(record.title.is_empty() && record.content.is_empty());
    }

    #[tokio::test]
    async fn failed_crawl_errors_without_fallback() {
        let config = Config {
            fallback_on_failure: false,
            ..Config::default()
        };
        let mut app = app(FakeCrawler::new(&[]), config);
        let err = app.add_url("https://down.example.com").await.unwrap_err();
        assert!(matches!(err, AppError::CrawlFailed { .. }));
        assert!(app.draft.articles.is_empty());
    }

    #[tokio::test]
    async fn batch_crawl_uses_completion_order() {
        let crawler = FakeCrawler::new(&[
            ("https://slow.example.com", 80, "Slow", ""),
            ("https://fast.example.com", 0, "Fast", ""),
        ]);
        let config = Config {
            fallback_on_failure: false,
            ..Config::default()
        };
        let mut app = app(crawler, config);
        let urls = vec![
            "https://slow.example.com".to_string(),
            "https://fast.example.com".to_string(),
            "https://missing.example.com".to_string(),
        ];

        let report = app.add_urls(&urls).await;
        assert_eq!(report.added.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "https://missing.example.com");

        // newest first: the slow page finished last
        let titles: Vec<_> = app.draft.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Slow", "Fast"]);
    }

    #[tokio::test]
    async fn edit_delete_and_render() {
        let crawler = FakeCrawler::new(&[("https://a.example.com", 0, "Post", "Spring tips")]);
        let mut app = app(crawler, Config::default());
        let id = app.add_url("https://a.example.com").await.unwrap();

        app.update_article(id, ArticleField::Category, "be".to_string()).unwrap();
        let sql = app.article_sql(id).unwrap();
        assert!(sql.article_sql.contains("/* project github_url required */"));
        assert!(sql.tech_sql.contains("(LAST_INSERT_ID(), 20)"));

        app.draft.project_github_url = "https://github.com/acme/app".to_string();
        assert!(app.batch_sql().contains("github_url = 'https://github.com/acme/app'"));
        assert_eq!(app.validate_all().len(), 1);

        let removed = app.delete_article(id).unwrap();
        assert_eq!(removed.id, id);
        assert!(matches!(app.delete_article(id), Err(AppError::ArticleNotFound(_))));
        assert!(matches!(
            app.update_article(id, ArticleField::Title, String::new()),
            Err(AppError::ArticleNotFound(_))
        ));
        assert_eq!(app.batch_sql(), "START TRANSACTION;\n\nCOMMIT;");
    }

    #[test]
    fn configured_project_url_is_fallback() {
        let config = Config {
            project_github_url: "https://github.com/acme/default".to_string(),
            ..Config::default()
        };
        let mut app = app(FakeCrawler::new(&[]), config);
        assert_eq!(app.project_github_url(), "https://github.com/acme/default");
        app.draft.project_github_url = "https://github.com/acme/other".to_string();
        assert_eq!(app.project_github_url(), "https://github.com/acme/other");
    }

    #[test]
    fn randomized_stats_mode() {
        let config = Config {
            article_stats: StatsMode::Randomized,
            ..Config::default()
        };
        let app = app(FakeCrawler::new(&[]), config);
        let stats = app.record_stats();
        assert!((1..=999).contains(&stats.clicks));
        assert!(stats.updated_at >= stats.created_at);
    }
}
