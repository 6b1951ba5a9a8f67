//! Text builders for the seed `INSERT` scripts.
//!
//! Values are interpolated as SQL literals after quote doubling; nothing here
//! uses bind parameters. Output is meant to be pasted into a MySQL client.

mod article;
mod project;

use chrono::NaiveDateTime;

pub use article::{build_article_sql, build_batch_sql, ArticleSql};
pub use project::{build_project_sql, ProjectSql};

pub const START_TRANSACTION: &str = "START TRANSACTION;";
pub const COMMIT: &str = "COMMIT;";

/// `YYYY-MM-DD HH:MM:SS.000000`, the DATETIME(6) literal the schema expects.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format("%Y-%m-%d %H:%M:%S.000000").to_string()
}

/// One `INSERT` carrying every row, or `None` when there are no rows.
fn multi_row_insert(table: &str, columns: &str, rows: &[String]) -> Option<String> {
    if rows.is_empty() {
        return None;
    }
    Some(format!(
        "INSERT INTO {table} ({columns}) VALUES \n  {};",
        rows.join(",\n  ")
    ))
}

/// `-- name` headed blocks, one per non-empty part, for copying statements
/// one at a time.
fn render_sections(parts: &[(&str, &str)]) -> String {
    let blocks: Vec<String> = parts
        .iter()
        .filter(|(_, sql)| !sql.is_empty())
        .map(|(name, sql)| format!("-- {name}\n{sql}"))
        .collect();
    join_statements(&blocks)
}

/// Join statements with a blank line, skipping empty parts.
fn join_statements<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn timestamp_has_microsecond_suffix() {
        let at = NaiveDate::from_ymd_opt(2025, 8, 19)
            .unwrap()
            .and_hms_milli_opt(7, 5, 3, 250)
            .unwrap();
        assert_eq!(format_timestamp(&at), "2025-08-19 07:05:03.000000");
    }

    #[test]
    fn multi_row_insert_formats_rows() {
        let rows = vec!["(1, 2)".to_string(), "(1, 3)".to_string()];
        assert_eq!(
            multi_row_insert("t", "a, b", &rows).unwrap(),
            "INSERT INTO t (a, b) VALUES \n  (1, 2),\n  (1, 3);"
        );
        assert_eq!(multi_row_insert("t", "a, b", &[]), None);
    }

    #[test]
    fn sections_are_headed_and_skip_empty_parts() {
        assert_eq!(
            render_sections(&[("article", "INSERT a;"), ("article_tech_stacks", ""), ("x", "y;")]),
            "-- article\nINSERT a;\n\n-- x\ny;"
        );
    }

    #[test]
    fn join_statements_skips_empty_parts() {
        assert_eq!(join_statements(&["a;", "", "b;"]), "a;\n\nb;");
    }
}
