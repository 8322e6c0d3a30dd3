//! Load the demographic CSV sources into [`DemographicData`]

use ahash::AHashMap;
use rand::distributions::WeightedIndex;
use std::fs;
use std::path::Path;

use crate::core::config::DataFiles;
use crate::core::error::{DataLoadError, DataLoadErrorKind};
use crate::core::types::{Decade, Gender};
use crate::demographics::csv::CsvTable;
use crate::demographics::tables::{CumulativeName, DecadeRates, DemographicData};

/// Raw contents of the five sources, keyed by the file name used in errors
#[derive(Debug, Clone, Copy)]
pub struct DemographicSources<'a> {
    pub life_expectancy: (&'a str, &'a str),
    pub first_names: (&'a str, &'a str),
    pub last_names: (&'a str, &'a str),
    pub rank_probabilities: (&'a str, &'a str),
    pub rates: (&'a str, &'a str),
}

impl DemographicData {
    /// Read every source from `dir`; any missing or malformed file aborts the load
    pub fn load(dir: &Path, files: &DataFiles) -> Result<Self, DataLoadError> {
        let read = |name: &str| -> Result<String, DataLoadError> {
            let path = files.resolve(dir, name);
            fs::read_to_string(&path).map_err(|e| {
                DataLoadError::new(path.display().to_string(), DataLoadErrorKind::Missing(e))
            })
        };

        let life = read(&files.life_expectancy)?;
        let first = read(&files.first_names)?;
        let last = read(&files.last_names)?;
        let ranks = read(&files.rank_probabilities)?;
        let rates = read(&files.rates)?;

        let data = Self::from_sources(DemographicSources {
            life_expectancy: (files.life_expectancy.as_str(), life.as_str()),
            first_names: (files.first_names.as_str(), first.as_str()),
            last_names: (files.last_names.as_str(), last.as_str()),
            rank_probabilities: (files.rank_probabilities.as_str(), ranks.as_str()),
            rates: (files.rates.as_str(), rates.as_str()),
        })?;

        tracing::info!("Loaded demographic data from {}: {}", dir.display(), data.summary());
        Ok(data)
    }

    /// Parse already-read source contents
    pub fn from_sources(sources: DemographicSources<'_>) -> Result<Self, DataLoadError> {
        let life_expectancy =
            parse_life_expectancy(sources.life_expectancy.0, sources.life_expectancy.1)?;
        let first_names = parse_first_names(sources.first_names.0, sources.first_names.1)?;
        let last_names = parse_last_names(sources.last_names.0, sources.last_names.1)?;
        let rank_probabilities =
            parse_rank_probabilities(sources.rank_probabilities.0, sources.rank_probabilities.1)?;
        let rates = parse_rates(sources.rates.0, sources.rates.1)?;

        let rank_index = WeightedIndex::new(&rank_probabilities).map_err(|e| {
            DataLoadError::malformed(sources.rank_probabilities.0, 1, e.to_string())
        })?;

        Ok(Self {
            life_expectancy,
            first_names,
            last_names,
            rank_probabilities,
            rank_index,
            rates,
        })
    }
}

fn parse_life_expectancy(file: &str, content: &str) -> Result<AHashMap<i32, f64>, DataLoadError> {
    let table = CsvTable::parse(file, content)?;
    let year_col = table.column("Year")?;
    let value_col = table.column("Period life expectancy at birth")?;

    let mut by_year = AHashMap::with_capacity(table.len());
    for row in table.rows() {
        let year: i32 = row.parse(year_col, "year")?;
        let expectancy: f64 = row.parse(value_col, "life expectancy")?;
        by_year.insert(year, expectancy);
    }
    Ok(by_year)
}

/// Group names per (decade, gender) in file order and turn frequencies into
/// normalized running totals.
fn parse_first_names(
    file: &str,
    content: &str,
) -> Result<AHashMap<(Decade, Gender), Vec<CumulativeName>>, DataLoadError> {
    let table = CsvTable::parse(file, content)?;
    let decade_col = table.column("decade")?;
    let gender_col = table.column("gender")?;
    let name_col = table.column("name")?;
    let freq_col = table.column("frequency")?;

    let mut raw: AHashMap<(Decade, Gender), Vec<(String, f64)>> = AHashMap::new();
    for row in table.rows() {
        let decade: Decade = row.parse(decade_col, "decade")?;
        let gender: Gender = row.parse(gender_col, "gender")?;
        let frequency: f64 = row.parse(freq_col, "frequency")?;
        raw.entry((decade, gender))
            .or_default()
            .push((row.text(name_col).to_string(), frequency));
    }

    let mut cumulative = AHashMap::with_capacity(raw.len());
    for (key, names) in raw {
        let total: f64 = names.iter().map(|(_, f)| f).sum();
        if !(total > 0.0) {
            return Err(DataLoadError::malformed(
                file,
                0,
                format!(
                    "frequencies for {} {} do not sum to a positive value",
                    key.0,
                    key.1.as_str()
                ),
            ));
        }

        let mut running = 0.0;
        let entries = names
            .into_iter()
            .map(|(name, freq)| {
                running += freq / total;
                CumulativeName { name, cumulative: running }
            })
            .collect();
        cumulative.insert(key, entries);
    }
    Ok(cumulative)
}

fn parse_last_names(
    file: &str,
    content: &str,
) -> Result<AHashMap<Decade, AHashMap<usize, String>>, DataLoadError> {
    let table = CsvTable::parse(file, content)?;
    let decade_col = table.column("Decade")?;
    let rank_col = table.column("Rank")?;
    let name_col = table.column("LastName")?;

    let mut by_decade: AHashMap<Decade, AHashMap<usize, String>> = AHashMap::new();
    for row in table.rows() {
        let decade: Decade = row.parse(decade_col, "decade")?;
        let rank: usize = row.parse(rank_col, "rank")?;
        by_decade
            .entry(decade)
            .or_default()
            .insert(rank, row.text(name_col).to_string());
    }
    Ok(by_decade)
}

/// Single row of comma-separated weights, normalized to sum to one
fn parse_rank_probabilities(file: &str, content: &str) -> Result<Vec<f64>, DataLoadError> {
    let line = content
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| DataLoadError::new(file, DataLoadErrorKind::Empty))?;

    let weights = line
        .split(',')
        .map(|field| {
            let field = field.trim();
            field
                .parse::<f64>()
                .ok()
                .filter(|w| w.is_finite() && *w >= 0.0)
                .ok_or_else(|| {
                    DataLoadError::malformed(file, 1, format!("invalid probability '{}'", field))
                })
        })
        .collect::<Result<Vec<f64>, _>>()?;

    let total: f64 = weights.iter().sum();
    if !(total > 0.0) {
        return Err(DataLoadError::malformed(file, 1, "probabilities sum to zero"));
    }
    Ok(weights.into_iter().map(|w| w / total).collect())
}

fn parse_rates(file: &str, content: &str) -> Result<AHashMap<Decade, DecadeRates>, DataLoadError> {
    let table = CsvTable::parse(file, content)?;
    let decade_col = table.column("decade")?;
    let birth_col = table.column("birth_rate")?;
    let marriage_col = table.column("marriage_rate")?;

    let mut by_decade = AHashMap::with_capacity(table.len());
    for row in table.rows() {
        let decade: Decade = row.parse(decade_col, "decade")?;
        let rates = DecadeRates {
            birth_rate: row.parse(birth_col, "birth rate")?,
            marriage_rate: row.parse(marriage_col, "marriage rate")?,
        };
        by_decade.insert(decade, rates);
    }
    Ok(by_decade)
}
