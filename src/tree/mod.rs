//! Family tree generation and queries
//!
//! The tree is an arena of [`Person`] records addressed by [`PersonId`].
//! [`generate`] expands it breadth-first from the two roots; the query
//! methods on [`FamilyTree`] read the finished population.
//!
//! [`PersonId`]: crate::core::types::PersonId

pub mod family;
pub mod generator;
pub mod person;
pub mod queries;
pub mod snapshot;

pub use family::{FamilyTree, GenerationStats};
pub use generator::{child_birth_years, generate, TreeGenerator};
pub use person::Person;
pub use snapshot::{PersonRecord, TreeSnapshot};
