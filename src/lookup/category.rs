//! Category taxonomies.
//!
//! Articles and projects use separate category tables. The project table
//! shipped in two numberings; `V2` (life = 7) is canonical and `V1`
//! (life = 8) is kept for databases seeded before the renumbering.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::LookupTable;

/// Article category code that forbids tech stacks.
pub const ETC_CATEGORY: &str = "etc";

const ARTICLE_CATEGORY_IDS: &[(&str, u32)] = &[
    ("fe", 1),
    ("be", 2),
    ("android", 3),
    ("ios", 4),
    ("ss", 5),
    ("etc", 6),
];

const PROJECT_CATEGORY_IDS_V1: &[(&str, u32)] = &[
    ("education", 1),
    ("it", 2),
    ("game", 3),
    ("entertainment", 4),
    ("travel", 5),
    ("social", 6),
    ("life", 8),
    ("finance", 9),
    ("sports", 10),
    ("ecommerce", 11),
    ("etc", 12),
    ("web", 13),
    ("app", 14),
];

const PROJECT_CATEGORY_IDS_V2: &[(&str, u32)] = &[
    ("education", 1),
    ("it", 2),
    ("game", 3),
    ("entertainment", 4),
    ("travel", 5),
    ("social", 6),
    ("life", 7),
    ("finance", 8),
    ("sports", 9),
    ("ecommerce", 10),
    ("etc", 11),
    ("web", 12),
    ("app", 13),
];

/// Words found in crawled pages, mapped to article category codes.
pub const CATEGORY_ALIASES: &[(&str, &str)] = &[
    ("프론트엔드", "fe"),
    ("프론트", "fe"),
    ("frontend", "fe"),
    ("fe", "fe"),
    ("백엔드", "be"),
    ("backend", "be"),
    ("be", "be"),
    ("안드로이드", "android"),
    ("안드로이드 앱", "android"),
    ("android", "android"),
    ("ios 앱", "ios"),
    ("ios", "ios"),
    ("소프트스킬", "ss"),
    ("소프트 스킬", "ss"),
    ("soft skill", "ss"),
    ("softskill", "ss"),
];

static ARTICLE: OnceLock<LookupTable> = OnceLock::new();
static PROJECT_V1: OnceLock<LookupTable> = OnceLock::new();
static PROJECT_V2: OnceLock<LookupTable> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectTaxonomyVersion {
    V1,
    #[default]
    V2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Taxonomy {
    Article,
    Project(ProjectTaxonomyVersion),
}

impl Taxonomy {
    pub fn table(self) -> &'static LookupTable {
        match self {
            Taxonomy::Article => ARTICLE.get_or_init(|| LookupTable::new(ARTICLE_CATEGORY_IDS)),
            Taxonomy::Project(ProjectTaxonomyVersion::V1) => {
                PROJECT_V1.get_or_init(|| LookupTable::new(PROJECT_CATEGORY_IDS_V1))
            }
            Taxonomy::Project(ProjectTaxonomyVersion::V2) => {
                PROJECT_V2.get_or_init(|| LookupTable::new(PROJECT_CATEGORY_IDS_V2))
            }
        }
    }
}
