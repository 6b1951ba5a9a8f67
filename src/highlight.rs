//! HTML annotation of CSV keyword fields.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::lookup::{tech_stacks, LookupTable, ProjectTaxonomyVersion, Taxonomy};
use crate::text::escape_html;

static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
static EMPTY_TABLE: OnceLock<LookupTable> = OnceLock::new();

fn separator_regex() -> &'static Regex {
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[\s,]+").expect("valid separator pattern"))
}

/// Dictionary with no entries; every token renders as unknown against it.
pub fn empty_dictionary() -> &'static LookupTable {
    EMPTY_TABLE.get_or_init(|| LookupTable::new(&[]))
}

/// Dictionary a form field is checked against. `project` selects the
/// project form, whose category field is `categories`.
pub fn dictionary_for(field: &str, project: Option<ProjectTaxonomyVersion>) -> &'static LookupTable {
    match (field, project) {
        ("techStacks" | "tech_stacks", _) => tech_stacks(),
        ("category", None) => Taxonomy::Article.table(),
        ("categories", Some(version)) => Taxonomy::Project(version).table(),
        _ => empty_dictionary(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    /// Known value appearing once.
    Exact,
    /// Known value repeated within the field.
    Duplicate,
    /// Prefix of some known value.
    Partial,
    Unknown,
}

impl TokenClass {
    pub fn color(self) -> &'static str {
        match self {
            TokenClass::Exact => "green",
            TokenClass::Duplicate => "orange",
            TokenClass::Partial => "deepskyblue",
            TokenClass::Unknown => "red",
        }
    }
}

enum Piece<'a> {
    Separator(&'a str),
    Token(&'a str),
}

/// Split into alternating tokens and separator runs, keeping both.
fn split_keep_separators(value: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for m in separator_regex().find_iter(value) {
        if m.start() > last {
            pieces.push(Piece::Token(&value[last..m.start()]));
        }
        pieces.push(Piece::Separator(m.as_str()));
        last = m.end();
    }
    if last < value.len() {
        pieces.push(Piece::Token(&value[last..]));
    }
    pieces
}

/// Classify every token of `value` against `dictionary`, in order.
pub fn classify_tokens<'a>(value: &'a str, dictionary: &LookupTable) -> Vec<(&'a str, TokenClass)> {
    let pieces = split_keep_separators(value);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for piece in &pieces {
        if let Piece::Token(token) = piece {
            if dictionary.contains(token) {
                *counts.entry(token.to_lowercase()).or_default() += 1;
            }
        }
    }

    pieces
        .into_iter()
        .filter_map(|piece| match piece {
            Piece::Separator(_) => None,
            Piece::Token(token) => {
                let class = match counts.get(&token.to_lowercase()) {
                    Some(&n) if n > 1 => TokenClass::Duplicate,
                    Some(_) => TokenClass::Exact,
                    None if dictionary.has_prefix_match(token) => TokenClass::Partial,
                    None => TokenClass::Unknown,
                };
                Some((token, class))
            }
        })
        .collect()
}

/// Render `value` as HTML with each token wrapped in a coloured span.
///
/// Separators are copied through (entity-escaped), so the markup lines up
/// character for character with the source text.
pub fn highlight_html(value: &str, dictionary: &LookupTable) -> String {
    let mut classes = classify_tokens(value, dictionary).into_iter();
    let mut html = String::with_capacity(value.len() * 2);

    for piece in split_keep_separators(value) {
        match piece {
            Piece::Separator(sep) => html.push_str(&escape_html(sep)),
            Piece::Token(token) => {
                let class = classes.next().map_or(TokenClass::Unknown, |(_, class)| class);
                html.push_str(&format!(
                    r#"<span style="color:{}">{}</span>"#,
                    class.color(),
                    escape_html(token)
                ));
            }
        }
    }

    html
}
