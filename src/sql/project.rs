use chrono::NaiveDateTime;

use crate::lookup::{tech_stacks, ProjectTaxonomyVersion, Taxonomy};
use crate::models::ProjectRecord;
use crate::text::{escape_sql, parse_csv};

use super::{format_timestamp, join_statements, multi_row_insert, render_sections, COMMIT, START_TRANSACTION};

const SET_PROJECT_ID: &str = "SET @pid = LAST_INSERT_ID();";
const AUTHOR_ID: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSql {
    pub project_sql: String,
    pub tech_sql: String,
    pub category_sql: String,
    pub urls_sql: String,
    pub combined_sql: String,
}

impl ProjectSql {
    /// Each statement under its own `-- table` header. The `SET @pid` line
    /// stays with the project insert since every later block needs it.
    pub fn sections(&self) -> String {
        let project = format!("{}\n{SET_PROJECT_ID}", self.project_sql);
        render_sections(&[
            ("project", project.as_str()),
            ("project_tech_stacks", self.tech_sql.as_str()),
            ("project_categories", self.category_sql.as_str()),
            ("project_urls", self.urls_sql.as_str()),
        ])
    }
}

fn pid_rows<T: std::fmt::Display>(values: impl IntoIterator<Item = T>) -> Vec<String> {
    values.into_iter().map(|v| format!("(@pid, {v})")).collect()
}

/// Transactional script for one project and its join rows.
///
/// The new id is captured once into `@pid` so every join insert refers to the
/// project row regardless of what runs in between.
pub fn build_project_sql(
    project: &ProjectRecord,
    taxonomy: ProjectTaxonomyVersion,
    timestamp: &NaiveDateTime,
) -> ProjectSql {
    let timestamp = format_timestamp(timestamp);
    let project_sql = format!(
        "INSERT INTO project (title, summary, github_url, production_url, author_id, created_at, updated_at, views, description) VALUES (
    '{title}',
    '{summary}',
    '{github_url}',
    '{production_url}',
    {AUTHOR_ID},
    '{timestamp}',
    '{timestamp}',
    0,
    '{description}'
  );",
        title = escape_sql(&project.title),
        summary = escape_sql(&project.summary),
        github_url = escape_sql(&project.github_url),
        production_url = escape_sql(&project.production_url),
        description = escape_sql(&project.description),
    );

    let tech_sql = multi_row_insert(
        "project_tech_stacks",
        "project_id, tech_stacks_id",
        &pid_rows(tech_stacks().resolve_csv(&project.tech_stacks)),
    )
    .unwrap_or_else(|| "-- (no techStacks entered)".to_string());

    let category_sql = multi_row_insert(
        "project_categories",
        "project_id, categories_id",
        &pid_rows(Taxonomy::Project(taxonomy).table().resolve_csv(&project.categories)),
    )
    .unwrap_or_else(|| "-- (no categories entered)".to_string());

    let urls: Vec<String> = parse_csv(&project.image_urls)
        .iter()
        .map(|url| format!("'{}'", escape_sql(url)))
        .collect();
    let urls_sql = multi_row_insert("project_urls", "project_id, urls", &pid_rows(urls))
        .unwrap_or_else(|| "-- (no imageUrls entered)".to_string());

    let combined_sql = join_statements(&[
        START_TRANSACTION,
        project_sql.as_str(),
        SET_PROJECT_ID,
        tech_sql.as_str(),
        category_sql.as_str(),
        urls_sql.as_str(),
        COMMIT,
    ]);

    ProjectSql {
        project_sql,
        tech_sql,
        category_sql,
        urls_sql,
        combined_sql,
    }
}
