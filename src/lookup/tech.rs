use std::sync::OnceLock;

use super::LookupTable;

static TECH_STACKS: OnceLock<LookupTable> = OnceLock::new();

/// Rows of the `tech_stacks` table, by display name.
const TECH_STACK_IDS: &[(&str, u32)] = &[
    ("JavaScript", 1),
    ("TypeScript", 2),
    ("React", 3),
    ("Next.js", 4),
    ("Vue", 5),
    ("Angular", 6),
    ("Svelte", 7),
    ("HTML", 8),
    ("CSS", 9),
    ("Tailwind", 10),
    ("Redux", 11),
    ("Recoil", 12),
    ("Zustand", 13),
    ("Webpack", 14),
    ("Vite", 15),
    ("Node.js", 16),
    ("Express", 17),
    ("NestJS", 18),
    ("Java", 19),
    ("Spring", 20),
    ("Spring Boot", 21),
    ("JPA", 22),
    ("QueryDSL", 23),
    ("Kotlin", 24),
    ("Python", 25),
    ("Django", 26),
    ("FastAPI", 27),
    ("Go", 28),
    ("Rust", 29),
    ("MySQL", 30),
    ("PostgreSQL", 31),
    ("MongoDB", 32),
    ("Redis", 33),
    ("Docker", 34),
    ("Kubernetes", 35),
    ("AWS", 36),
    ("Nginx", 37),
    ("GitHub Actions", 38),
    ("Jenkins", 39),
    ("Swift", 40),
    ("SwiftUI", 41),
    ("UIKit", 42),
    ("Jetpack Compose", 43),
    ("Flutter", 44),
    ("Dart", 45),
    ("GraphQL", 46),
    ("Kafka", 47),
    ("Elasticsearch", 48),
    ("Firebase", 49),
    ("Jest", 50),
    ("Cypress", 51),
    ("Storybook", 52),
    ("Emotion", 53),
    ("styled-components", 54),
    ("React Query", 55),
    ("Coroutines", 56),
    ("Room", 57),
    ("Retrofit", 58),
    ("Hilt", 59),
    ("Combine", 60),
];

pub fn tech_stacks() -> &'static LookupTable {
    TECH_STACKS.get_or_init(|| LookupTable::new(TECH_STACK_IDS))
}
