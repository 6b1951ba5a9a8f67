//! Keyword detection over crawled text.
//!
//! Word characters are ASCII (`[A-Za-z0-9_]`), so a Korean particle glued to
//! an English term ("React를", "Spring으로") still leaves the term a whole
//! word. Hangul aliases (`백엔드`, `프론트엔드`) must start a Hangul word and
//! may carry a trailing particle ("백엔드를").
//!
//! Two matching strategies exist and they disagree on some inputs:
//!
//! * `Tokens` lowercases the text, splits it on runs of non-word characters
//!   and tests set membership. Keywords containing spaces or punctuation
//!   (`Spring Boot`, `Node.js`, `소프트 스킬`) can never match.
//! * `WholeWord` runs one case-insensitive boundary-anchored search per
//!   keyword, so multi-word phrases match. Keywords are regex-escaped first;
//!   keywords that end in punctuation still miss because the boundary needs a
//!   word character.
//!
//! Title and content are joined with a newline before matching, so the last
//! word of a title never fuses with the first word of the body.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lookup::{tech_stacks, CATEGORY_ALIASES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordStrategy {
    #[default]
    Tokens,
    WholeWord,
}

/// Comma-joined matches, ready to drop into the CSV form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    /// Technology display names, in lookup-table order.
    pub tech_stacks: String,
    /// Canonical article category codes.
    pub categories: String,
}

static NON_WORD_RE: OnceLock<Regex> = OnceLock::new();
static HANGUL_RUN_RE: OnceLock<Regex> = OnceLock::new();
static TECH_PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
static ALIAS_PATTERNS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();

fn is_hangul(c: char) -> bool {
    matches!(c, '가'..='힣')
}

/// Boundary-anchored, case-insensitive pattern for `keyword`.
///
/// ASCII ends use an ASCII word boundary. A Hangul start must follow a
/// non-word character; a Hangul end is left open for particles.
fn keyword_pattern(keyword: &str) -> Regex {
    let starts_ascii = keyword.chars().next().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
    let ends_ascii = keyword.chars().last().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');

    let start = if starts_ascii { r"(?-u:\b)" } else { r"(?:^|\W)" };
    let end = if ends_ascii { r"(?-u:\b)" } else { "" };
    Regex::new(&format!("(?i){start}{}{end}", regex::escape(keyword))).expect("escaped keyword pattern")
}

fn tech_patterns() -> &'static [(&'static str, Regex)] {
    TECH_PATTERNS.get_or_init(|| tech_stacks().names().map(|name| (name, keyword_pattern(name))).collect())
}

/// (category code, alias pattern) pairs.
fn alias_patterns() -> &'static [(&'static str, Regex)] {
    ALIAS_PATTERNS.get_or_init(|| {
        CATEGORY_ALIASES
            .iter()
            .map(|(alias, code)| (*code, keyword_pattern(alias)))
            .collect()
    })
}

/// Lowercased ASCII words plus the Hangul runs of a text.
struct TokenSet {
    words: HashSet<String>,
    hangul_runs: Vec<String>,
}

impl TokenSet {
    fn new(text: &str) -> Self {
        let text = text.to_lowercase();
        let non_word = NON_WORD_RE.get_or_init(|| Regex::new(r"[^a-z0-9_]+").expect("valid split pattern"));
        let hangul = HANGUL_RUN_RE.get_or_init(|| Regex::new(r"[가-힣]+").expect("valid hangul pattern"));

        Self {
            words: non_word
                .split(&text)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect(),
            hangul_runs: hangul.find_iter(&text).map(|m| m.as_str().to_string()).collect(),
        }
    }

    /// Hangul keywords match the start of a Hangul run; everything else
    /// must be one whole word.
    fn contains(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        if !keyword.is_empty() && keyword.chars().all(is_hangul) {
            self.hangul_runs.iter().any(|run| run.starts_with(&keyword))
        } else {
            self.words.contains(&keyword)
        }
    }
}

/// Keep first occurrences, in order.
fn dedup_join<'a>(values: impl IntoIterator<Item = &'a str>) -> String {
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(*v))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Detect known technologies and category words in a page.
pub fn extract_keywords(title: &str, content: &str, strategy: KeywordStrategy) -> Keywords {
    let text = format!("{title}\n{content}");

    match strategy {
        KeywordStrategy::Tokens => {
            let tokens = TokenSet::new(&text);
            Keywords {
                tech_stacks: dedup_join(tech_stacks().names().filter(|name| tokens.contains(name))),
                categories: dedup_join(
                    CATEGORY_ALIASES
                        .iter()
                        .filter(|(alias, _)| tokens.contains(alias))
                        .map(|(_, code)| *code),
                ),
            }
        }
        KeywordStrategy::WholeWord => Keywords {
            tech_stacks: dedup_join(
                tech_patterns()
                    .iter()
                    .filter(|(_, re)| re.is_match(&text))
                    .map(|(name, _)| *name),
            ),
            categories: dedup_join(
                alias_patterns()
                    .iter()
                    .filter(|(_, re)| re.is_match(&text))
                    .map(|(code, _)| *code),
            ),
        },
    }
}
