//! Serializable view of a generated tree

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::core::error::Result;
use crate::core::types::{Decade, PersonId};
use crate::tree::family::{FamilyTree, GenerationStats};
use crate::tree::person::Person;

/// Complete generation output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreeSnapshot {
    pub seed: Option<u64>,
    pub roots: [PersonId; 2],
    pub total: usize,
    pub by_decade: BTreeMap<Decade, usize>,
    pub duplicate_names: Vec<String>,
    pub statistics: GenerationStats,
    pub people: Vec<PersonRecord>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: PersonId,
    #[serde(flatten)]
    pub person: Person,
}

impl FamilyTree {
    pub fn snapshot(&self, seed: Option<u64>) -> TreeSnapshot {
        TreeSnapshot {
            seed,
            roots: self.roots(),
            total: self.total_count(),
            by_decade: self.count_by_decade(),
            duplicate_names: self.duplicate_names(),
            statistics: *self.stats(),
            people: self
                .iter()
                .map(|(id, person)| PersonRecord { id, person: person.clone() })
                .collect(),
        }
    }
}

impl TreeSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn summary(&self) -> String {
        format!(
            "{} people across {} decades, {} generations, {} duplicate names",
            self.total,
            self.by_decade.len(),
            self.statistics.generations + 1,
            self.duplicate_names.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Gender;

    fn sample_tree() -> FamilyTree {
        let root = |first: &str, last: &str| {
            Person::new(1950, 2020, first.into(), last.into(), Gender::Male, true)
        };
        let mut tree = FamilyTree::with_roots(root("Desmond", "Jones"), root("Molly", "Smith"));
        let [a, b] = tree.roots();
        tree.add_child(a, Some(b), Person::new(1977, 2050, "Ann".into(), "Jones".into(), Gender::Female, true));
        tree
    }

    #[test]
    fn test_snapshot_matches_queries() {
        let tree = sample_tree();
        let snapshot = tree.snapshot(Some(42));
        assert_eq!(snapshot.total, 3);
        assert_eq!(snapshot.people.len(), 3);
        assert_eq!(snapshot.people[2].id, PersonId(2));
        assert_eq!(snapshot.by_decade.get(&Decade(1970)), Some(&1));
        assert!(snapshot.summary().starts_with("3 people across 2 decades"));
    }

    #[test]
    fn test_json_uses_decade_labels() {
        let json = sample_tree().snapshot(Some(42)).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["seed"], 42);
        assert_eq!(value["by_decade"]["1950s"], 2);
        assert_eq!(value["people"][0]["first_name"], "Desmond");
        assert_eq!(value["people"][0]["partner"], 1);
        assert_eq!(value["people"][2]["gender"], "female");
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        sample_tree().snapshot(None).write_json(&path).unwrap();

        let restored: TreeSnapshot = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(restored.total, 3);
        assert_eq!(restored.seed, None);
        assert_eq!(restored.people[0].person.partner, Some(PersonId(1)));
    }
}
