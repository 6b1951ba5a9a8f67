use crate::lookup::{tech_stacks, Taxonomy, ETC_CATEGORY};
use crate::models::ArticleRecord;
use crate::text::{escape_sql, parse_csv_lower};

use super::{format_timestamp, join_statements, multi_row_insert, render_sections, COMMIT, START_TRANSACTION};

/// Stands in for `project_id` when no project github URL is known.
pub const MISSING_PROJECT_COMMENT: &str = "/* project github_url required */";
const NO_TECH_STACKS_COMMENT: &str = "-- (no techStacks entered)";
/// Written when no article category resolves.
const EMPTY_CATEGORY_LITERAL: &str = "''";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSql {
    pub article_sql: String,
    /// Empty for `etc` articles, a comment when no stack resolved.
    pub tech_sql: String,
    pub combined_sql: String,
}

impl ArticleSql {
    /// Each statement under its own `-- table` header.
    pub fn sections(&self) -> String {
        render_sections(&[
            ("article", self.article_sql.as_str()),
            ("article_tech_stacks", self.tech_sql.as_str()),
        ])
    }
}

/// Expression for `article.project_id`.
pub fn project_id_expr(project_github_url: &str) -> String {
    if project_github_url.is_empty() {
        MISSING_PROJECT_COMMENT.to_string()
    } else {
        format!(
            "(select id from project where github_url = '{}')",
            escape_sql(project_github_url)
        )
    }
}

/// First category in the CSV that the article taxonomy knows.
fn resolve_category(category: &str) -> Option<(String, u32)> {
    let table = Taxonomy::Article.table();
    parse_csv_lower(category)
        .into_iter()
        .find_map(|name| table.id(&name).map(|id| (name, id)))
}

/// Article insert plus its `article_tech_stacks` rows.
///
/// The tech insert refers to the article through `LAST_INSERT_ID()`, so the
/// two statements must run back to back.
pub fn build_article_sql(article: &ArticleRecord, project_github_url: &str) -> ArticleSql {
    let category = resolve_category(&article.category);
    let category_value = category
        .as_ref()
        .map(|(_, id)| id.to_string())
        .unwrap_or_else(|| EMPTY_CATEGORY_LITERAL.to_string());

    let article_sql = format!(
        "INSERT INTO article (title, summary, project_id, article_url, category_id, created_at, updated_at, clicks, content) VALUES (
  '{title}',
  '{summary}',
  {project_id},
  '{url}',
  {category_value},
  '{created_at}',
  '{updated_at}',
  {clicks},
  '{content}'
);",
        title = escape_sql(&article.title),
        summary = escape_sql(&article.summary),
        project_id = project_id_expr(project_github_url),
        url = escape_sql(&article.article_url),
        created_at = format_timestamp(&article.created_at),
        updated_at = format_timestamp(&article.updated_at),
        clicks = article.clicks,
        content = escape_sql(&article.content),
    );

    let is_etc = matches!(&category, Some((name, _)) if name == ETC_CATEGORY);
    let tech_sql = if is_etc {
        String::new()
    } else {
        let rows: Vec<String> = tech_stacks()
            .resolve_csv(&article.tech_stacks)
            .into_iter()
            .map(|id| format!("(LAST_INSERT_ID(), {id})"))
            .collect();
        multi_row_insert("article_tech_stacks", "article_id, tech_stacks_id", &rows)
            .unwrap_or_else(|| NO_TECH_STACKS_COMMENT.to_string())
    };

    let combined_sql = join_statements(&[article_sql.as_str(), tech_sql.as_str()]);

    ArticleSql {
        article_sql,
        tech_sql,
        combined_sql,
    }
}

/// Every article's script inside one transaction, in list order.
pub fn build_batch_sql(articles: &[ArticleRecord], project_github_url: &str) -> String {
    let mut parts = Vec::with_capacity(articles.len() + 2);
    parts.push(START_TRANSACTION.to_string());
    parts.extend(
        articles
            .iter()
            .map(|article| build_article_sql(article, project_github_url).combined_sql),
    );
    parts.push(COMMIT.to_string());
    join_statements(&parts)
}
