mod article;
mod project;

pub use article::{ArticleField, ArticleRecord, RecordStats, StatsMode};
pub use project::ProjectRecord;
