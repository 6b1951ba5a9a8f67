//! Read-only name → id tables, built once per process.

mod category;
mod tech;

use std::collections::HashMap;

pub use category::{ProjectTaxonomyVersion, Taxonomy, CATEGORY_ALIASES, ETC_CATEGORY};
pub use tech::tech_stacks;

use crate::text::parse_csv_lower;

/// A case-insensitive mapping from names to positive database ids.
#[derive(Debug)]
pub struct LookupTable {
    /// Display names in declaration order.
    entries: Vec<(&'static str, u32)>,
    by_name: HashMap<String, u32>,
}

impl LookupTable {
    pub fn new(entries: &[(&'static str, u32)]) -> Self {
        let by_name = entries
            .iter()
            .map(|(name, id)| (name.to_lowercase(), *id))
            .collect();
        Self {
            entries: entries.to_vec(),
            by_name,
        }
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.id(name).is_some()
    }

    /// Display names, in the order the table declares them.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    /// True when some key starts with `prefix` (compared lowercase).
    pub fn has_prefix_match(&self, prefix: &str) -> bool {
        let prefix = prefix.to_lowercase();
        self.by_name.keys().any(|key| key.starts_with(&prefix))
    }

    /// Parse a CSV field and keep the ids of the tokens this table knows,
    /// in input order. Unknown tokens are dropped.
    pub fn resolve_csv(&self, csv: &str) -> Vec<u32> {
        parse_csv_lower(csv)
            .iter()
            .filter_map(|name| self.by_name.get(name).copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LookupTable {
        LookupTable::new(&[("React", 1), ("Spring Boot", 2), ("Spring", 3)])
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let table = sample();
        assert_eq!(table.id("react"), Some(1));
        assert_eq!(table.id("SPRING BOOT"), Some(2));
        assert_eq!(table.id("vue"), None);
    }

    #[test]
    fn resolve_csv_drops_unknown_and_keeps_order() {
        let table = sample();
        assert_eq!(table.resolve_csv("spring; vue, React\nreact"), vec![3, 1, 1]);
    }

    #[test]
    fn prefix_match_uses_key_prefixes() {
        let table = sample();
        assert!(table.has_prefix_match("spr"));
        assert!(table.has_prefix_match("Spring B"));
        assert!(!table.has_prefix_match("pring"));
    }

    #[test]
    fn names_keep_declaration_order() {
        let table = sample();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["React", "Spring Boot", "Spring"]);
        assert_eq!(table.len(), 3);
    }
}
