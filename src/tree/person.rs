//! Person - one individual in the generated tree
//!
//! People live in the tree's arena and refer to each other by [`PersonId`],
//! so partner and child links never own each other.

use serde::{Deserialize, Serialize};

use crate::core::types::{Decade, Gender, PersonId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub year_born: i32,
    /// Assigned at creation, never recomputed
    pub year_died: i32,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    /// Descended by blood from the two roots (as opposed to married in)
    pub is_direct_descendant: bool,
    /// Set once, never cleared or reassigned
    pub partner: Option<PersonId>,
    /// Append-only, in discovery order
    pub children: Vec<PersonId>,
}

impl Person {
    pub fn new(
        year_born: i32,
        year_died: i32,
        first_name: String,
        last_name: String,
        gender: Gender,
        is_direct_descendant: bool,
    ) -> Self {
        Self {
            year_born,
            year_died,
            first_name,
            last_name,
            gender,
            is_direct_descendant,
            partner: None,
            children: Vec::new(),
        }
    }

    /// "{first} {last}"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn decade(&self) -> Decade {
        Decade::from_year(self.year_born)
    }

    pub fn has_partner(&self) -> bool {
        self.partner.is_some()
    }

    pub fn add_child(&mut self, child: PersonId) {
        self.children.push(child);
    }

    pub fn lifespan(&self) -> i32 {
        self.year_died - self.year_born
    }
}
