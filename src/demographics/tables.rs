//! Immutable demographic tables and their exact-match lookups

use ahash::AHashMap;
use rand::distributions::WeightedIndex;

use crate::core::error::LookupError;
use crate::core::types::{Decade, Gender};

/// Birth and marriage rate for one decade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecadeRates {
    pub birth_rate: f64,
    pub marriage_rate: f64,
}

/// One entry of a cumulative first-name table
#[derive(Debug, Clone, PartialEq)]
pub struct CumulativeName {
    pub name: String,
    /// Running share of the table up to and including this name, in (0, 1]
    pub cumulative: f64,
}

/// All demographic sources, loaded once per run and read-only afterwards.
///
/// Built by [`DemographicData::load`] or [`DemographicData::from_sources`].
#[derive(Debug, Clone)]
pub struct DemographicData {
    pub(crate) life_expectancy: AHashMap<i32, f64>,
    pub(crate) first_names: AHashMap<(Decade, Gender), Vec<CumulativeName>>,
    pub(crate) last_names: AHashMap<Decade, AHashMap<usize, String>>,
    /// Normalized weights; index `i` is rank `i + 1`
    pub(crate) rank_probabilities: Vec<f64>,
    pub(crate) rank_index: WeightedIndex<f64>,
    pub(crate) rates: AHashMap<Decade, DecadeRates>,
}

impl DemographicData {
    /// Life expectancy at birth for exactly `year_born`
    pub fn life_expectancy(&self, year_born: i32) -> Result<f64, LookupError> {
        self.life_expectancy
            .get(&year_born)
            .copied()
            .ok_or(LookupError::LifeExpectancy { year: year_born })
    }

    pub fn rates(&self, year_born: i32) -> Result<DecadeRates, LookupError> {
        let decade = Decade::from_year(year_born);
        self.rates
            .get(&decade)
            .copied()
            .ok_or(LookupError::Rates { decade })
    }

    pub fn marriage_rate(&self, year_born: i32) -> Result<f64, LookupError> {
        self.rates(year_born).map(|r| r.marriage_rate)
    }

    pub fn birth_rate(&self, year_born: i32) -> Result<f64, LookupError> {
        self.rates(year_born).map(|r| r.birth_rate)
    }

    /// Surname of the given rank in the birth year's decade
    pub fn last_name_for_rank(&self, year_born: i32, rank: usize) -> Result<&str, LookupError> {
        let decade = Decade::from_year(year_born);
        let by_rank = self
            .last_names
            .get(&decade)
            .ok_or(LookupError::LastNames { decade })?;
        by_rank
            .get(&rank)
            .map(String::as_str)
            .ok_or(LookupError::LastNameRank { decade, rank })
    }

    /// Cumulative first-name table for a (decade, gender) pair, if any
    pub fn first_names(&self, decade: Decade, gender: Gender) -> Option<&[CumulativeName]> {
        self.first_names
            .get(&(decade, gender))
            .map(Vec::as_slice)
            .filter(|names| !names.is_empty())
    }

    /// Number of ranks in the global rank distribution
    pub fn rank_count(&self) -> usize {
        self.rank_probabilities.len()
    }

    pub fn rank_probabilities(&self) -> &[f64] {
        &self.rank_probabilities
    }

    /// Row counts per table, for logging
    pub fn summary(&self) -> String {
        format!(
            "{} life expectancy years, {} first-name tables, {} last-name decades, {} ranks, {} rate decades",
            self.life_expectancy.len(),
            self.first_names.len(),
            self.last_names.len(),
            self.rank_probabilities.len(),
            self.rates.len(),
        )
    }
}
