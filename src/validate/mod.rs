//! Advisory field checks.
//!
//! Validation never blocks SQL generation: callers show these messages next
//! to the generated script.

mod article;
mod project;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

pub use article::validate_article;
pub use project::validate_project;

/// Field name → message. A missing key means the field passed.
pub type FieldErrors = BTreeMap<&'static str, String>;

static URL_RE: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_RE.get_or_init(|| {
        Regex::new(r"^(http|https)://[A-Za-z0-9_\-]+(\.[A-Za-z0-9_\-]+)+[/#?]?.*$").expect("valid URL pattern")
    })
}

pub(crate) fn is_url(value: &str) -> bool {
    url_regex().is_match(value)
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn outside(value: &str, min: usize, max: usize) -> bool {
    let len = char_len(value);
    len < min || len > max
}
