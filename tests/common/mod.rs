//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;

use family_tree::core::config::{DataFiles, GeneratorConfig};
use family_tree::demographics::DemographicData;
use family_tree::tree::{generate, FamilyTree};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The sample data set shipped with the crate
pub fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

pub fn load_data() -> DemographicData {
    DemographicData::load(&data_dir(), &DataFiles::default()).expect("shipped data set loads")
}

pub fn generate_with_seed(data: &DemographicData, config: &GeneratorConfig, seed: u64) -> FamilyTree {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate(data, config, &mut rng).expect("generation succeeds on shipped data")
}

/// Check the structural invariants every generated tree must satisfy
pub fn assert_tree_invariants(tree: &FamilyTree, config: &GeneratorConfig) {
    for (id, person) in tree.iter() {
        assert!(
            person.year_born <= config.max_year,
            "{} born {} past {}",
            id,
            person.year_born,
            config.max_year
        );

        if let Some(partner_id) = person.partner {
            let partner = tree.get(partner_id).expect("partner exists");
            assert_eq!(partner.partner, Some(id), "partner link of {} is not symmetric", id);
            assert_ne!(partner_id, id);
        }

        let elder_year = match tree.partner_of(id) {
            Some(partner) => person.year_born.min(partner.year_born),
            None => person.year_born,
        };
        for child_id in &person.children {
            let child = tree.get(*child_id).expect("child exists");
            let gap = child.year_born - elder_year;
            assert!(
                (config.min_parent_age..=config.max_parent_age).contains(&gap),
                "child {} born {} is {} years after elder parent",
                child_id,
                child.year_born,
                gap
            );
            assert!(child.is_direct_descendant);
        }
    }

    let by_decade = tree.count_by_decade();
    assert_eq!(by_decade.values().sum::<usize>(), tree.total_count());

    let duplicates = tree.duplicate_names();
    assert!(duplicates.windows(2).all(|w| w[0] < w[1]), "duplicates sorted and unique");
    for name in &duplicates {
        let count = tree.people().iter().filter(|p| &p.full_name() == name).count();
        assert!(count >= 2, "{} listed as duplicate but occurs {} time(s)", name, count);
    }
}
