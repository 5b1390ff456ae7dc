#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Explicitly stored clauses.
//!
//! Only long clauses (four or more literals) live in this form; binary and
//! ternary clauses are encoded inside the watch lists and never materialize
//! a `Clause`. Alongside its literals a stored clause carries the runtime
//! signals the search maintains for it (an activity score and an LBD) and
//! the removal flag the traversal queries for liveness.

use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use core::ops::{Index, IndexMut};
use smallvec::SmallVec;
use std::marker::PhantomData;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clause<L: Literal = PackedLiteral, S: LiteralStorage<L> = SmallVec<[L; 8]>> {
    pub literals: S,
    pub lbd: u32,
    activity: f64,
    removed: bool,
    marker: PhantomData<L>,
}

impl<L: Literal, S: LiteralStorage<L>> Clause<L, S> {
    pub fn new(literals: impl IntoIterator<Item = L>) -> Self {
        Self {
            literals: literals.into_iter().collect(),
            lbd: 0,
            activity: 0.0,
            removed: false,
            marker: PhantomData,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &L> {
        self.literals.iter()
    }

    #[must_use]
    pub const fn activity(&self) -> f64 {
        self.activity
    }

    pub fn bump_activity(&mut self, amount: f64) {
        self.activity += amount;
    }

    pub fn decay_activity(&mut self, factor: f64) {
        self.activity *= factor;
    }

    #[must_use]
    pub const fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn remove(&mut self) {
        self.removed = true;
    }
}

impl<L: Literal, S: LiteralStorage<L>> Index<usize> for Clause<L, S> {
    type Output = L;

    fn index(&self, index: usize) -> &Self::Output {
        &self.literals[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> IndexMut<usize> for Clause<L, S> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.literals[index]
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<Vec<i32>> for Clause<L, S> {
    fn from(literals: Vec<i32>) -> Self {
        Self::new(literals.into_iter().map(L::from_dimacs))
    }
}

impl<L: Literal, S: LiteralStorage<L>> From<&[i32]> for Clause<L, S> {
    fn from(literals: &[i32]) -> Self {
        Self::new(literals.iter().copied().map(L::from_dimacs))
    }
}
