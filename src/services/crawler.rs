use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::text::truncate_chars;

const USER_AGENT_STRING: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Limits applied when the page is fetched directly instead of through a
/// crawl service.
const DIRECT_SUMMARY_CHARS: usize = 200;
const DIRECT_CONTENT_CHARS: usize = 2000;

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

/// What a crawl service returns for one page. Extra fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawledPage {
    pub title: String,
    pub summary: String,
    pub content: String,
}

/// Crawl handler responsible for a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlEndpoint {
    Notion,
    GithubWiki,
    Generic,
}

impl CrawlEndpoint {
    pub fn for_url(url: &str) -> Self {
        if url.contains("notion.site") {
            CrawlEndpoint::Notion
        } else if url.contains("github.com") && url.contains("wiki") {
            CrawlEndpoint::GithubWiki
        } else {
            CrawlEndpoint::Generic
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            CrawlEndpoint::Notion => "crawl-notion",
            CrawlEndpoint::GithubWiki => "crawl-github-wiki",
            CrawlEndpoint::Generic => "crawl",
        }
    }
}

/// Anything that can turn a URL into page text.
#[allow(async_fn_in_trait)]
pub trait Crawl {
    async fn crawl(&self, url: &str) -> Result<CrawledPage>;
}

pub struct Crawler {
    client: Client,
    api_base: Option<String>,
}

impl Crawler {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            api_base: config.crawl_api_base.clone(),
        })
    }

    /// `{base}/{endpoint}?url=<encoded>`
    pub fn endpoint_url(base: &str, url: &str) -> String {
        format!(
            "{}/{}?url={}",
            base.trim_end_matches('/'),
            CrawlEndpoint::for_url(url).path(),
            urlencoding::encode(url)
        )
    }

    async fn crawl_via_service(&self, base: &str, url: &str) -> Result<CrawledPage> {
        let endpoint = Self::endpoint_url(base, url);
        tracing::debug!("Crawling {} via {}", url, endpoint);

        let response = self
            .client
            .get(&endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::CrawlFailed {
                url: url.to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        // Services answer with extra fields or an `error` key; keep the body for the log
        let body = response.text().await?;
        let page: CrawledPage = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!("Unexpected crawl response for {}: {}", url, body);
            e
        })?;
        Ok(page)
    }

    /// Fetch the page ourselves and reduce it to text.
    async fn crawl_direct(&self, url: &str) -> Result<CrawledPage> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_STRING));

        let response = self.client.get(url).headers(headers).send().await?;

        if !response.status().is_success() {
            return Err(AppError::CrawlFailed {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let html = response.text().await?;
        page_from_html(&html).ok_or_else(|| AppError::CrawlFailed {
            url: url.to_string(),
            message: "could not convert page to text".to_string(),
        })
    }
}

impl Crawl for Crawler {
    async fn crawl(&self, url: &str) -> Result<CrawledPage> {
        let parsed = Url::parse(url).map_err(|e| AppError::CrawlFailed {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::CrawlFailed {
                url: url.to_string(),
                message: format!("unsupported scheme {}", parsed.scheme()),
            });
        }

        match &self.api_base {
            Some(base) => self.crawl_via_service(base, url).await,
            None => self.crawl_direct(url).await,
        }
    }
}

/// Page title with the GitHub suffixes removed.
fn extract_title(html: &str) -> String {
    let re = TITLE_RE.get_or_init(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid title pattern"));
    re.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| {
            m.as_str()
                .trim()
                .trim_end_matches(" · Wiki · GitHub")
                .trim_end_matches(" · GitHub")
                .to_string()
        })
        .unwrap_or_default()
}

/// Convert raw HTML into a page; `None` when html2text fails.
pub(crate) fn page_from_html(html: &str) -> Option<CrawledPage> {
    let text = match html2text::from_read(html.as_bytes(), 80) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!("Failed to convert HTML to text: {}", e);
            return None;
        }
    };

    // Drop blank lines and edge whitespace
    let cleaned: String = text
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    Some(CrawledPage {
        title: extract_title(html),
        summary: truncate_chars(&cleaned, DIRECT_SUMMARY_CHARS),
        content: truncate_chars(&cleaned, DIRECT_CONTENT_CHARS),
    })
}
