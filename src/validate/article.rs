use crate::lookup::{tech_stacks, Taxonomy, ETC_CATEGORY};
use crate::models::{ArticleField, ArticleRecord};
use crate::text::parse_csv_lower;

use super::{char_len, outside, FieldErrors};

/// Categories whose articles must name 1 to 3 tech stacks.
const STACK_REQUIRED_CATEGORIES: [&str; 2] = ["trouble", "tech"];

pub fn validate_article(article: &ArticleRecord) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let mut flag = |field: ArticleField, message: &str| {
        errors.insert(field.as_str(), message.to_string());
    };

    let categories = parse_csv_lower(&article.category);
    let category_key = categories.first().map(String::as_str).unwrap_or("");
    let tech_count = tech_stacks().resolve_csv(&article.tech_stacks).len();

    if outside(&article.title, 2, 50) {
        flag(ArticleField::Title, "2-50 characters required");
    }
    if outside(&article.summary, 10, 255) {
        flag(ArticleField::Summary, "10-255 characters required");
    }
    if outside(&article.content, 100, 8000) {
        flag(ArticleField::Content, "100-8000 characters required");
    }
    let url_len = char_len(&article.article_url);
    if url_len < 1 || url_len >= 500 {
        flag(ArticleField::ArticleUrl, "required, under 500 characters");
    }

    if categories.len() != 1 {
        flag(ArticleField::Category, "exactly one category required");
    } else if !Taxonomy::Article.table().contains(category_key) {
        flag(ArticleField::Category, "unknown category");
    }

    if category_key == ETC_CATEGORY && tech_count != 0 {
        flag(ArticleField::TechStacks, "etc articles cannot have techStacks");
    } else if STACK_REQUIRED_CATEGORIES.contains(&category_key) && !(1..=3).contains(&tech_count) {
        flag(ArticleField::TechStacks, "1-3 tech stacks required");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordStats;
    use chrono::NaiveDateTime;
    use rstest::rstest;

    fn valid() -> ArticleRecord {
        let mut record = ArticleRecord::empty(
            "https://github.com/acme/app/wiki/Caching",
            RecordStats::fixed(NaiveDateTime::default()),
        );
        record.title = "Caching with Redis".to_string();
        record.summary = "How we cut latency in half".to_string();
        record.content = "x".repeat(150);
        record.category = "be".to_string();
        record.tech_stacks = "Spring, Redis".to_string();
        record
    }

    #[test]
    fn valid_article_has_no_errors() {
        assert!(validate_article(&valid()).is_empty());
    }

    #[rstest]
    #[case(ArticleField::Title, "a")]
    #[case(ArticleField::Title, &"t".repeat(51))]
    #[case(ArticleField::Summary, "short")]
    #[case(ArticleField::Content, "too short")]
    #[case(ArticleField::Content, &"c".repeat(8001))]
    #[case(ArticleField::ArticleUrl, "")]
    #[case(ArticleField::ArticleUrl, &"u".repeat(500))]
    fn length_rules(#[case] field: ArticleField, #[case] value: &str) {
        let mut record = valid();
        record.set_field(field, value.to_string());
        let errors = validate_article(&record);
        assert!(errors.contains_key(field.as_str()), "{field}: {errors:?}");
        assert_eq!(errors.len(), 1);
    }

    #[rstest]
    #[case("", "exactly one category required")]
    #[case("fe, be", "exactly one category required")]
    #[case("blog", "unknown category")]
    fn category_rules(#[case] category: &str, #[case] message: &str) {
        let mut record = valid();
        record.category = category.to_string();
        assert_eq!(validate_article(&record).get("category").map(String::as_str), Some(message));
    }

    #[test]
    fn etc_forbids_tech_stacks() {
        let mut record = valid();
        record.category = "etc".to_string();
        assert_eq!(
            validate_article(&record).get("techStacks").map(String::as_str),
            Some("etc articles cannot have techStacks")
        );
        record.tech_stacks = "NotATech".to_string();
        assert!(!validate_article(&record).contains_key("techStacks"));
    }

    #[rstest]
    #[case("tech", "", true)]
    #[case("trouble", "React, Vue, Svelte, Angular", true)]
    #[case("tech", "React", false)]
    fn stack_count_for_trouble_and_tech(#[case] category: &str, #[case] stacks: &str, #[case] flagged: bool) {
        let mut record = valid();
        record.category = category.to_string();
        record.tech_stacks = stacks.to_string();
        assert_eq!(validate_article(&record).contains_key("techStacks"), flagged);
    }
}
