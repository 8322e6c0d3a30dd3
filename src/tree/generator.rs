//! Breadth-first family tree generation
//!
//! Starting from the two roots, every person taken off the queue may gain a
//! partner (one draw against the decade marriage rate) and a set of children
//! whose count comes from the decade birth rate. Children are queued in turn,
//! so the tree grows generation by generation until everyone left is born at
//! or past the boundary year.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use rand::Rng;

use crate::core::config::{GeneratorConfig, RootPerson};
use crate::core::error::{Result, TreeError};
use crate::core::types::PersonId;
use crate::demographics::sampling::{round_to_int, Lineage};
use crate::demographics::DemographicData;
use crate::tree::family::FamilyTree;
use crate::tree::person::Person;

/// Generate a full tree with the given data and rules
pub fn generate<R: Rng + ?Sized>(
    data: &DemographicData,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<FamilyTree> {
    TreeGenerator::new(data, config)?.generate(rng)
}

/// Birth years for `count` children of a pair whose elder was born in `elder_year`.
///
/// A single child gets a uniform year in `[elder + min_age, elder + max_age]`.
/// Several children are spread evenly across that window, rounded and clamped
/// into it, so siblings never share a draw.
pub fn child_birth_years<R: Rng + ?Sized>(
    elder_year: i32,
    count: usize,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Vec<i32> {
    let start_year = elder_year + config.min_parent_age;
    let end_year = elder_year + config.max_parent_age;

    match count {
        0 => Vec::new(),
        1 => vec![rng.gen_range(start_year..=end_year)],
        n => {
            let step = (end_year - start_year) as f64 / (n - 1) as f64;
            (0..n)
                .map(|i| (start_year + round_to_int(i as f64 * step)).clamp(start_year, end_year))
                .collect()
        }
    }
}

enum PartnerOutcome {
    Unmarried,
    Married(PersonId),
    /// Sampled birth year fell past the boundary
    Discarded,
}

pub struct TreeGenerator<'a> {
    data: &'a DemographicData,
    config: &'a GeneratorConfig,
}

impl<'a> TreeGenerator<'a> {
    pub fn new(data: &'a DemographicData, config: &'a GeneratorConfig) -> Result<Self> {
        config.validate().map_err(TreeError::Config)?;
        Ok(Self { data, config })
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FamilyTree> {
        let mut tree = self.seed_roots(rng)?;

        let mut queue: VecDeque<PersonId> = tree.roots().into_iter().collect();
        let mut processed: AHashSet<PersonId> = AHashSet::new();
        let mut generation: AHashMap<PersonId, u32> =
            tree.roots().into_iter().map(|id| (id, 0)).collect();

        while let Some(id) = queue.pop_front() {
            if !processed.insert(id) {
                continue;
            }
            tree.stats.processed += 1;

            let depth = generation.get(&id).copied().unwrap_or(0);
            tree.stats.generations = tree.stats.generations.max(depth);

            let year_born = tree.person(id).year_born;
            tracing::trace!("Processing {} born {}", id, year_born);

            if year_born >= self.config.max_year {
                tree.stats.terminal += 1;
                continue;
            }

            if !tree.person(id).has_partner() && !tree.is_root(id) {
                match self.seek_partner(&mut tree, id, rng)? {
                    PartnerOutcome::Married(partner) => {
                        generation.insert(partner, depth);
                        queue.push_back(partner);
                    }
                    PartnerOutcome::Discarded => continue,
                    PartnerOutcome::Unmarried => {}
                }
            }

            let partner = tree.person(id).partner;
            let mut child_count = self
                .data
                .sample_child_count(year_born, self.config.child_count_noise, rng)?;

            // Only the elder of a pair rolls children for both
            if let Some(partner) = partner {
                if tree.contains(partner) && !is_elder(&tree, id, partner) {
                    child_count = 0;
                }
            }

            if child_count == 0 {
                continue;
            }

            let elder_year = match partner {
                Some(partner) => year_born.min(tree.person(partner).year_born),
                None => year_born,
            };

            for birth_year in child_birth_years(elder_year, child_count, self.config, rng) {
                if birth_year > self.config.max_year {
                    tree.stats.skipped_children += 1;
                    tracing::debug!(
                        "Skipping child of {} born {} past {}",
                        id,
                        birth_year,
                        self.config.max_year
                    );
                    continue;
                }

                let child = self.data.create_person(
                    birth_year,
                    Lineage::Descendant(self.config.descendant_surnames()),
                    self.config.lifespan_noise,
                    rng,
                )?;
                let child_id = tree.add_child(id, partner, child);
                generation.insert(child_id, depth + 1);
                queue.push_back(child_id);
            }
        }

        tracing::info!(
            "Generated family tree: {} people over {} generations ({} partners discarded, {} children past {})",
            tree.people().len(),
            tree.stats.generations + 1,
            tree.stats.discarded_partners,
            tree.stats.skipped_children,
            self.config.max_year,
        );

        Ok(tree)
    }

    /// Build the founding pair from the configured roots
    fn seed_roots<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<FamilyTree> {
        let [first, second] = &self.config.roots;
        let first = self.root_person(first, rng)?;
        let second = self.root_person(second, rng)?;
        Ok(FamilyTree::with_roots(first, second))
    }

    fn root_person<R: Rng + ?Sized>(&self, root: &RootPerson, rng: &mut R) -> Result<Person> {
        let year = self.config.root_birth_year;
        let year_died = self
            .data
            .sample_year_died(year, self.config.lifespan_noise, rng)?;
        Ok(Person::new(
            year,
            year_died,
            root.first_name.clone(),
            root.last_name.clone(),
            root.gender,
            true,
        ))
    }

    /// One draw against the decade marriage rate; on success a married-in
    /// partner is created near the person's birth year and linked both ways.
    fn seek_partner<R: Rng + ?Sized>(
        &self,
        tree: &mut FamilyTree,
        id: PersonId,
        rng: &mut R,
    ) -> Result<PartnerOutcome> {
        let year_born = tree.person(id).year_born;
        let marriage_rate = self.data.marriage_rate(year_born)?;

        if rng.gen::<f64>() >= marriage_rate {
            return Ok(PartnerOutcome::Unmarried);
        }

        let spread = self.config.partner_age_spread;
        let partner_year = year_born + rng.gen_range(-spread..=spread);
        if partner_year > self.config.max_year {
            tree.stats.discarded_partners += 1;
            tracing::debug!(
                "Discarding partner of {} born {} past {}",
                id,
                partner_year,
                self.config.max_year
            );
            return Ok(PartnerOutcome::Discarded);
        }

        let partner = self.data.create_person(
            partner_year,
            Lineage::MarriedIn,
            self.config.lifespan_noise,
            rng,
        )?;
        let partner_id = tree.push(partner);
        tree.link_partners(id, partner_id);

        Ok(PartnerOutcome::Married(partner_id))
    }
}

/// Whether `id` is the elder of the pair; a tie goes to `id`
fn is_elder(tree: &FamilyTree, id: PersonId, partner: PersonId) -> bool {
    tree.person(id).year_born <= tree.person(partner).year_born
}
