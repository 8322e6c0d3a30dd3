//! Generator configuration with documented constants
//!
//! All the fixed numbers of the generation rules live here so they can be
//! tuned from a TOML file without touching the algorithm.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::error::{Result, TreeError};
use crate::core::types::Gender;

/// One of the two founding individuals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootPerson {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

impl RootPerson {
    pub fn new(first_name: &str, last_name: &str, gender: Gender) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            gender,
        }
    }
}

/// Configuration for tree generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Birth year shared by both roots
    pub root_birth_year: i32,

    /// Boundary year
    ///
    /// Nobody is born after it. People born in or after it are kept but
    /// never expanded (no partner, no children).
    pub max_year: i32,

    /// Youngest age of the elder parent at a child's birth
    pub min_parent_age: i32,

    /// Oldest age of the elder parent at a child's birth
    pub max_parent_age: i32,

    /// Partner birth year is drawn from `year ± partner_age_spread`
    pub partner_age_spread: i32,

    /// Uniform noise added to the decade birth rate before rounding
    pub child_count_noise: f64,

    /// Uniform noise (years) added to life expectancy
    pub lifespan_noise: f64,

    /// The founding pair. Their surnames are also the pool for direct descendants.
    pub roots: [RootPerson; 2],
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            root_birth_year: 1950,
            max_year: 2120,
            min_parent_age: 25,
            max_parent_age: 45,
            partner_age_spread: 10,
            child_count_noise: 1.5,
            lifespan_noise: 10.0,
            roots: [
                RootPerson::new("Desmond", "Jones", Gender::Male),
                RootPerson::new("Molly", "Smith", Gender::Female),
            ],
        }
    }
}

impl GeneratorConfig {
    /// Parse a (possibly partial) TOML document; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GeneratorConfig = toml::from_str(content)?;
        config.validate().map_err(TreeError::Config)?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Surnames handed to direct descendants
    pub fn descendant_surnames(&self) -> [&str; 2] {
        [&self.roots[0].last_name, &self.roots[1].last_name]
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.min_parent_age < 0 {
            return Err(format!("min_parent_age ({}) must not be negative", self.min_parent_age));
        }

        if self.min_parent_age > self.max_parent_age {
            return Err(format!(
                "min_parent_age ({}) should be <= max_parent_age ({})",
                self.min_parent_age, self.max_parent_age
            ));
        }

        if self.root_birth_year >= self.max_year {
            return Err(format!(
                "root_birth_year ({}) should be < max_year ({})",
                self.root_birth_year, self.max_year
            ));
        }

        if self.partner_age_spread < 0 {
            return Err("partner_age_spread must not be negative".into());
        }

        if !(self.child_count_noise >= 0.0 && self.lifespan_noise >= 0.0) {
            return Err("child_count_noise and lifespan_noise must be non-negative".into());
        }

        for root in &self.roots {
            if root.first_name.trim().is_empty() || root.last_name.trim().is_empty() {
                return Err("root names must not be empty".into());
            }
        }

        Ok(())
    }
}

/// File names of the five demographic sources inside the data directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    pub life_expectancy: String,
    pub first_names: String,
    pub last_names: String,
    pub rank_probabilities: String,
    pub rates: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            life_expectancy: "life_expectancy.csv".into(),
            first_names: "first_names.csv".into(),
            last_names: "last_names.csv".into(),
            rank_probabilities: "rank_to_probability.csv".into(),
            rates: "birth_and_marriage_rates.csv".into(),
        }
    }
}

impl DataFiles {
    pub fn resolve(&self, dir: &Path, name: &str) -> PathBuf {
        dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.root_birth_year, 1950);
        assert_eq!(config.max_year, 2120);
        assert_eq!(config.min_parent_age, 25);
        assert_eq!(config.max_parent_age, 45);
        assert_eq!(config.descendant_surnames(), ["Jones", "Smith"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GeneratorConfig::from_toml_str("max_year = 2050\n").unwrap();
        assert_eq!(config.max_year, 2050);
        assert_eq!(config.root_birth_year, 1950);
        assert_eq!(config.roots[1].first_name, "Molly");
    }

    #[test]
    fn test_toml_roots_override() {
        let content = r#"
            [[roots]]
            first_name = "Ada"
            last_name = "Byron"
            gender = "female"

            [[roots]]
            first_name = "William"
            last_name = "King"
            gender = "male"
        "#;
        let config = GeneratorConfig::from_toml_str(content).unwrap();
        assert_eq!(config.descendant_surnames(), ["Byron", "King"]);
        assert_eq!(config.roots[0].gender, Gender::Female);
    }

    #[test]
    fn test_validate_rejects_inverted_ages() {
        let config = GeneratorConfig {
            min_parent_age: 50,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let err = GeneratorConfig::from_toml_str("min_parent_age = 50").unwrap_err();
        assert!(matches!(err, TreeError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_root_past_boundary() {
        let config = GeneratorConfig {
            root_birth_year: 2120,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = GeneratorConfig::from_toml_str("max_year = \"soon\"").unwrap_err();
        assert!(matches!(err, TreeError::ConfigParse(_)));
    }
}
