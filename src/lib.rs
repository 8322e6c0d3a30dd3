//! Family Tree - synthetic multi-generational family tree generator
//!
//! Demographic tables drive a breadth-first expansion from two founding
//! individuals; the finished population answers simple aggregate queries.

pub mod core;
pub mod demographics;
pub mod menu;
pub mod tree;

pub use crate::core::config::{DataFiles, GeneratorConfig};
pub use crate::core::error::{Result, TreeError};
pub use crate::demographics::DemographicData;
pub use crate::tree::{generate, FamilyTree};
