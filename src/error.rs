use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Crawl failed for {url}: {message}")]
    CrawlFailed { url: String, message: String },

    #[error("No article with id {0}")]
    ArticleNotFound(u64),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
