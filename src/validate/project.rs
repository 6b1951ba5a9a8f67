use std::sync::OnceLock;

use regex::Regex;

use crate::lookup::{tech_stacks, ProjectTaxonomyVersion, Taxonomy};
use crate::models::ProjectRecord;
use crate::text::parse_csv;

use super::{char_len, is_url, outside, FieldErrors};

const MAX_URLS: usize = 10;

static TITLE_RE: OnceLock<Regex> = OnceLock::new();

fn title_regex() -> &'static Regex {
    TITLE_RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9가-힣 ]{2,30}$").expect("valid title pattern"))
}

/// Checks a CSV list of URLs; `None` when every entry is acceptable.
fn check_url_list(csv: &str) -> Option<&'static str> {
    let urls = parse_csv(csv);
    if urls.len() > MAX_URLS {
        return Some("at most 10 URLs");
    }
    for url in &urls {
        if char_len(url) >= 500 {
            return Some("each URL must be under 500 characters");
        }
        if !is_url(url) {
            return Some("malformed URL in list");
        }
    }
    None
}

pub fn validate_project(project: &ProjectRecord, taxonomy: ProjectTaxonomyVersion) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !title_regex().is_match(&project.title) {
        errors.insert("title", "2-30 Korean/English letters, digits or spaces".to_string());
    }
    if outside(&project.summary, 10, 50) {
        errors.insert("summary", "10-50 characters required".to_string());
    }
    if outside(&project.description, 100, 8000) {
        errors.insert("description", "100-8000 characters required".to_string());
    }

    let github_len = char_len(&project.github_url);
    if github_len < 1 || github_len >= 500 {
        errors.insert("githubUrl", "required, under 500 characters".to_string());
    } else if !is_url(&project.github_url) {
        errors.insert("githubUrl", "not a URL".to_string());
    }

    if !project.production_url.is_empty() {
        if char_len(&project.production_url) >= 500 {
            errors.insert("productionUrl", "under 500 characters".to_string());
        } else if !is_url(&project.production_url) {
            errors.insert("productionUrl", "not a URL".to_string());
        }
    }

    if let Some(message) = check_url_list(&project.image_urls) {
        errors.insert("imageUrls", message.to_string());
    }
    if let Some(message) = check_url_list(&project.thumbnail_urls) {
        errors.insert("thumbnailUrls", message.to_string());
    }

    let tech_count = tech_stacks().resolve_csv(&project.tech_stacks).len();
    if !(1..=20).contains(&tech_count) {
        errors.insert("techStacks", "1-20 known tech stacks required".to_string());
    }

    let category_count = Taxonomy::Project(taxonomy).table().resolve_csv(&project.categories).len();
    if !(1..=5).contains(&category_count) {
        errors.insert("categories", "1-5 known categories required".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid() -> ProjectRecord {
        ProjectRecord {
            title: "모임 플래너 2".to_string(),
            summary: "Plan meetups in one click".to_string(),
            description: "d".repeat(120),
            tech_stacks: "React, Spring".to_string(),
            categories: "social".to_string(),
            thumbnail_urls: "https://img.example.com/thumb.png".to_string(),
            image_urls: "https://img.example.com/1.png\nhttps://img.example.com/2.png".to_string(),
            github_url: "https://github.com/acme/moim".to_string(),
            production_url: String::new(),
        }
    }

    fn errors_for(project: &ProjectRecord) -> FieldErrors {
        validate_project(project, ProjectTaxonomyVersion::V2)
    }

    #[test]
    fn valid_project_has_no_errors() {
        assert!(errors_for(&valid()).is_empty(), "{:?}", errors_for(&valid()));
    }

    #[rstest]
    #[case("A")]
    #[case("Bad-title!")]
    #[case("this title is definitely longer than thirty chars")]
    fn title_charset_and_length(#[case] title: &str) {
        let mut project = valid();
        project.title = title.to_string();
        assert!(errors_for(&project).contains_key("title"));
    }

    #[test]
    fn github_url_rules() {
        let mut project = valid();
        project.github_url = String::new();
        assert_eq!(errors_for(&project)["githubUrl"], "required, under 500 characters");
        project.github_url = "github.com/acme".to_string();
        assert_eq!(errors_for(&project)["githubUrl"], "not a URL");
    }

    #[test]
    fn production_url_is_optional_but_checked() {
        let mut project = valid();
        project.production_url = "not a url".to_string();
        assert_eq!(errors_for(&project)["productionUrl"], "not a URL");
    }

    #[test]
    fn image_url_list_rules() {
        let mut project = valid();
        project.image_urls = (0..11)
            .map(|i| format!("https://img.example.com/{i}.png"))
            .collect::<Vec<_>>()
            .join(",");
        assert_eq!(errors_for(&project)["imageUrls"], "at most 10 URLs");

        project.image_urls = "https://img.example.com/1.png, nope".to_string();
        assert_eq!(errors_for(&project)["imageUrls"], "malformed URL in list");
    }

    #[test]
    fn thumbnail_urls_follow_image_rules() {
        let mut project = valid();
        project.thumbnail_urls = "thumb.png".to_string();
        assert_eq!(errors_for(&project)["thumbnailUrls"], "malformed URL in list");
    }

    #[test]
    fn tech_and_category_counts() {
        let mut project = valid();
        project.tech_stacks = "COBOL".to_string();
        project.categories = "education, it, game, travel, social, life".to_string();
        let errors = errors_for(&project);
        assert!(errors.contains_key("techStacks"));
        assert!(errors.contains_key("categories"));
    }
}
