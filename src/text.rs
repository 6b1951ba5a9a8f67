//! String helpers shared by the SQL builders, validators and highlighter.

/// Split a free-text field on runs of newlines, commas and semicolons.
///
/// Pieces are trimmed and empty pieces dropped. Order and duplicates are kept.
pub fn parse_csv(text: &str) -> Vec<String> {
    text.split(['\n', ',', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Like [`parse_csv`] but lowercases every token for lookup-table matching.
pub fn parse_csv_lower(text: &str) -> Vec<String> {
    parse_csv(text).into_iter().map(|s| s.to_lowercase()).collect()
}

/// Double every single quote so the value can sit inside a SQL string literal.
///
/// Backslashes, NULs and control characters pass through untouched.
pub fn escape_sql(value: &str) -> String {
    value.replace('\'', "''")
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// First `max` characters of `value`, never splitting a code point.
pub fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}
