//! FamilyTree - the population arena produced by a generation run

use serde::{Deserialize, Serialize};

use crate::core::types::PersonId;
use crate::tree::person::Person;

/// Counters collected while expanding the tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// People popped from the queue and expanded or checked
    pub processed: u32,
    /// People at or past the boundary year, kept but not expanded
    pub terminal: u32,
    /// Partners whose sampled birth year fell past the boundary
    pub discarded_partners: u32,
    /// Children whose spaced birth year fell past the boundary
    pub skipped_children: u32,
    /// Deepest generation reached (roots are generation 0)
    pub generations: u32,
}

/// The whole population of one run.
///
/// Owns every [`Person`]; [`PersonId`]s index into it and stay valid for the
/// life of the tree. Nobody is ever removed.
#[derive(Debug, Clone)]
pub struct FamilyTree {
    people: Vec<Person>,
    roots: [PersonId; 2],
    pub(crate) stats: GenerationStats,
}

impl FamilyTree {
    /// Start a tree from the founding pair, already partnered to each other
    pub(crate) fn with_roots(first: Person, second: Person) -> Self {
        let mut tree = Self {
            people: Vec::new(),
            roots: [PersonId(0), PersonId(1)],
            stats: GenerationStats::default(),
        };
        let a = tree.push(first);
        let b = tree.push(second);
        tree.roots = [a, b];
        tree.link_partners(a, b);
        tree
    }

    pub(crate) fn push(&mut self, person: Person) -> PersonId {
        let id = PersonId(self.people.len() as u32);
        self.people.push(person);
        id
    }

    /// Link two people as partners in both directions
    pub(crate) fn link_partners(&mut self, a: PersonId, b: PersonId) {
        debug_assert!(a != b, "a person cannot partner themselves");
        debug_assert!(self.people[a.index()].partner.is_none());
        debug_assert!(self.people[b.index()].partner.is_none());
        self.people[a.index()].partner = Some(b);
        self.people[b.index()].partner = Some(a);
    }

    /// Add `child` to the population and to the child lists of its parent(s)
    pub(crate) fn add_child(
        &mut self,
        parent: PersonId,
        partner: Option<PersonId>,
        child: Person,
    ) -> PersonId {
        let id = self.push(child);
        self.people[parent.index()].add_child(id);
        if let Some(partner) = partner {
            self.people[partner.index()].add_child(id);
        }
        id
    }

    pub(crate) fn person(&self, id: PersonId) -> &Person {
        &self.people[id.index()]
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.people.get(id.index())
    }

    pub fn contains(&self, id: PersonId) -> bool {
        id.index() < self.people.len()
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn iter(&self) -> impl Iterator<Item = (PersonId, &Person)> {
        self.people
            .iter()
            .enumerate()
            .map(|(idx, person)| (PersonId(idx as u32), person))
    }

    pub fn roots(&self) -> [PersonId; 2] {
        self.roots
    }

    /// First (0) or second (1) founding person
    pub fn root(&self, index: usize) -> Option<&Person> {
        self.roots.get(index).and_then(|id| self.get(*id))
    }

    pub fn is_root(&self, id: PersonId) -> bool {
        self.roots.contains(&id)
    }

    pub fn partner_of(&self, id: PersonId) -> Option<&Person> {
        self.get(id)?.partner.and_then(|p| self.get(p))
    }

    pub fn children_of(&self, id: PersonId) -> impl Iterator<Item = &Person> {
        self.get(id)
            .map(|p| p.children.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |child| self.get(*child))
    }

    pub fn stats(&self) -> &GenerationStats {
        &self.stats
    }
}
