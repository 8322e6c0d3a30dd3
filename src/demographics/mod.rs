//! Demographic data provider
//!
//! Decade-indexed statistical tables (life expectancy, first and last names,
//! rank weights, birth and marriage rates) loaded once from CSV sources, plus
//! the weighted sampling used to create new people.

pub mod csv;
pub mod loader;
pub mod sampling;
pub mod tables;

pub use loader::DemographicSources;
pub use sampling::{Lineage, UNKNOWN_FIRST_NAME};
pub use tables::{CumulativeName, DecadeRates, DemographicData};
