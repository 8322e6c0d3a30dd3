//! Random draws against the demographic tables
//!
//! Every draw takes the random source explicitly so a seeded run is fully
//! reproducible.

use rand::distributions::Distribution;
use rand::Rng;

use crate::core::error::LookupError;
use crate::core::types::{Decade, Gender};
use crate::demographics::tables::DemographicData;
use crate::tree::person::Person;

/// First name used when no table exists for a (decade, gender) pair
pub const UNKNOWN_FIRST_NAME: &str = "Unknown";

/// Which surname pool a new person draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lineage<'a> {
    /// Blood descendant of the founders, carrying one of their two surnames
    Descendant([&'a str; 2]),
    /// Married in; surname comes from the birth decade's rank table
    MarriedIn,
}

impl Lineage<'_> {
    pub fn is_direct_descendant(&self) -> bool {
        matches!(self, Lineage::Descendant(_))
    }
}

/// One of the two founding surnames, uniformly
pub fn sample_descendant_last_name<R: Rng + ?Sized>(surnames: [&str; 2], rng: &mut R) -> String {
    surnames[rng.gen_range(0..surnames.len())].to_string()
}

/// Uniform draw from `[-spread, spread]`; no draw is made when the spread is zero
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, spread: f64) -> f64 {
    if spread > 0.0 {
        rng.gen_range(-spread..=spread)
    } else {
        0.0
    }
}

/// Round half-way values to the even neighbour
pub fn round_to_int(value: f64) -> i32 {
    value.round_ties_even() as i32
}

impl DemographicData {
    pub fn sample_gender<R: Rng + ?Sized>(&self, rng: &mut R) -> Gender {
        if rng.gen_bool(0.5) {
            Gender::Male
        } else {
            Gender::Female
        }
    }

    /// Weighted draw from the cumulative table of the birth decade.
    ///
    /// Returns the first name whose running share reaches `r`, the last name
    /// when float error leaves `r` above every entry, and [`UNKNOWN_FIRST_NAME`]
    /// when the table is missing.
    pub fn sample_first_name<R: Rng + ?Sized>(
        &self,
        year_born: i32,
        gender: Gender,
        rng: &mut R,
    ) -> String {
        let Some(names) = self.first_names(Decade::from_year(year_born), gender) else {
            return UNKNOWN_FIRST_NAME.to_string();
        };

        let r: f64 = rng.gen();
        names
            .iter()
            .find(|entry| r <= entry.cumulative)
            .or_else(|| names.last())
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| UNKNOWN_FIRST_NAME.to_string())
    }

    /// Draw a rank from the global distribution, then read that rank's
    /// surname from the birth decade's table.
    pub fn sample_non_descendant_last_name<R: Rng + ?Sized>(
        &self,
        year_born: i32,
        rng: &mut R,
    ) -> Result<String, LookupError> {
        let decade = Decade::from_year(year_born);
        if !self.last_names.contains_key(&decade) {
            return Err(LookupError::LastNames { decade });
        }

        let rank = self.rank_index.sample(rng) + 1;
        self.last_name_for_rank(year_born, rank).map(str::to_string)
    }

    /// `year_born + round(life_expectancy + uniform(-noise, noise))`
    pub fn sample_year_died<R: Rng + ?Sized>(
        &self,
        year_born: i32,
        lifespan_noise: f64,
        rng: &mut R,
    ) -> Result<i32, LookupError> {
        let expectancy = self.life_expectancy(year_born)?;
        let years_lived = expectancy + jitter(rng, lifespan_noise);
        Ok(year_born + round_to_int(years_lived))
    }

    /// `max(0, round(birth_rate + uniform(-noise, noise)))`
    pub fn sample_child_count<R: Rng + ?Sized>(
        &self,
        year_born: i32,
        noise: f64,
        rng: &mut R,
    ) -> Result<usize, LookupError> {
        let birth_rate = self.birth_rate(year_born)?;
        let count = round_to_int(birth_rate + jitter(rng, noise));
        Ok(count.max(0) as usize)
    }

    /// Compose gender, names and death year into a new person
    pub fn create_person<R: Rng + ?Sized>(
        &self,
        year_born: i32,
        lineage: Lineage<'_>,
        lifespan_noise: f64,
        rng: &mut R,
    ) -> Result<Person, LookupError> {
        let gender = self.sample_gender(rng);
        let first_name = self.sample_first_name(year_born, gender, rng);
        let last_name = match lineage {
            Lineage::Descendant(surnames) => sample_descendant_last_name(surnames, rng),
            Lineage::MarriedIn => self.sample_non_descendant_last_name(year_born, rng)?,
        };
        let year_died = self.sample_year_died(year_born, lifespan_noise, rng)?;

        Ok(Person::new(
            year_born,
            year_died,
            first_name,
            last_name,
            gender,
            lineage.is_direct_descendant(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demographics::loader::fixtures::sample_data;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_first_name_falls_back_to_unknown() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(data.sample_first_name(1975, Gender::Male, &mut rng), UNKNOWN_FIRST_NAME);
        assert_eq!(data.sample_first_name(2050, Gender::Female, &mut rng), UNKNOWN_FIRST_NAME);
    }

    #[test]
    fn test_first_name_weights() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let draws = 4000;
        let james = (0..draws)
            .filter(|_| data.sample_first_name(1950, Gender::Male, &mut rng) == "James")
            .count();
        // James carries 3/4 of the 1950s male table
        let share = james as f64 / draws as f64;
        assert!((share - 0.75).abs() < 0.05, "James share was {}", share);
    }

    #[test]
    fn test_single_entry_table_always_picked() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(data.sample_first_name(1972, Gender::Female, &mut rng), "Jennifer");
        }
    }

    #[test]
    fn test_descendant_last_name_from_roots() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let names: Vec<String> = (0..100)
            .map(|_| sample_descendant_last_name(["Jones", "Smith"], &mut rng))
            .collect();
        assert!(names.iter().all(|n| n == "Jones" || n == "Smith"));
        assert!(names.iter().any(|n| n == "Jones"));
        assert!(names.iter().any(|n| n == "Smith"));
    }

    #[test]
    fn test_non_descendant_last_name_by_rank() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let draws: Vec<String> = (0..400)
            .map(|_| data.sample_non_descendant_last_name(1950, &mut rng).unwrap())
            .collect();
        let smiths = draws.iter().filter(|n| *n == "Smith").count();
        assert!(draws.iter().all(|n| n == "Smith" || n == "Johnson"));
        assert!(smiths > 250 && smiths < 350, "rank 1 drawn {} times", smiths);
    }

    #[test]
    fn test_non_descendant_last_name_missing_decade() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(
            data.sample_non_descendant_last_name(1990, &mut rng),
            Err(LookupError::LastNames { decade: Decade(1990) })
        );
    }

    #[test]
    fn test_year_died_tracks_expectancy() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let samples: Vec<i32> = (0..2000)
            .map(|_| data.sample_year_died(1950, 10.0, &mut rng).unwrap() - 1950)
            .collect();
        assert!(samples.iter().all(|&age| (58..=79).contains(&age)));
        let mean = samples.iter().sum::<i32>() as f64 / samples.len() as f64;
        assert!((mean - 68.2).abs() < 1.0, "mean lifespan {}", mean);
    }

    #[test]
    fn test_year_died_without_noise_is_exact() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        // 68.2 rounds to 68
        assert_eq!(data.sample_year_died(1950, 0.0, &mut rng), Ok(2018));
        assert!(data.sample_year_died(1960, 0.0, &mut rng).is_err());
    }

    #[test]
    fn test_child_count_never_negative() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..500 {
            let count = data.sample_child_count(1975, 1.5, &mut rng).unwrap();
            // 1.8 ± 1.5 rounds into 0..=3
            assert!(count <= 3);
        }
        assert_eq!(data.sample_child_count(1950, 0.0, &mut rng), Ok(2));
    }

    #[test]
    fn test_create_person() {
        let data = sample_data();
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let child = data
            .create_person(1975, Lineage::Descendant(["Byron", "King"]), 10.0, &mut rng)
            .unwrap();
        assert!(child.is_direct_descendant);
        assert!(child.last_name == "Byron" || child.last_name == "King");
        assert!(child.partner.is_none() && child.children.is_empty());

        let spouse = data.create_person(1975, Lineage::MarriedIn, 10.0, &mut rng).unwrap();
        assert!(!spouse.is_direct_descendant);
        assert!(spouse.last_name == "Garcia" || spouse.last_name == "Lee");
        assert!(spouse.year_died >= 1975 + 62);
    }

    #[test]
    fn test_round_to_int_ties_to_even() {
        assert_eq!(round_to_int(2.5), 2);
        assert_eq!(round_to_int(3.5), 4);
        assert_eq!(round_to_int(-0.4), 0);
        assert_eq!(round_to_int(1.6), 2);
    }

    #[test]
    fn test_jitter_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let j = jitter(&mut rng, 1.5);
            assert!((-1.5..=1.5).contains(&j));
        }
        assert_eq!(jitter(&mut rng, 0.0), 0.0);
    }
}
