mod crawler;

pub use crawler::{Crawl, CrawledPage, Crawler};
