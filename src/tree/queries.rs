//! Aggregate queries over a generated population

use std::collections::BTreeMap;

use ahash::AHashMap;

use crate::core::types::Decade;
use crate::tree::family::FamilyTree;

impl FamilyTree {
    /// Size of the final population
    pub fn total_count(&self) -> usize {
        self.people().len()
    }

    /// People per birth decade, in ascending decade order
    pub fn count_by_decade(&self) -> BTreeMap<Decade, usize> {
        let mut by_decade = BTreeMap::new();
        for person in self.people() {
            *by_decade.entry(person.decade()).or_insert(0) += 1;
        }
        by_decade
    }

    /// Full names carried by two or more people, sorted and deduplicated
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: AHashMap<String, usize> = AHashMap::new();
        for person in self.people() {
            *counts.entry(person.full_name()).or_insert(0) += 1;
        }

        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(name, _)| name)
            .collect();
        duplicates.sort();
        duplicates
    }
}
