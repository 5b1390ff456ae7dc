use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::ops::{Index, IndexMut};
use std::slice::Iter;

/// Backing container for the literals of a clause.
///
/// Long clauses in the explicit store are generic over this, so callers can
/// trade inline capacity against heap allocation (`SmallVec` vs `Vec`).
pub trait LiteralStorage<L: Literal>:
    Index<usize, Output = L>
    + IndexMut<usize, Output = L>
    + FromIterator<L>
    + From<Vec<L>>
    + Extend<L>
    + AsRef<[L]>
    + Clone
    + Default
    + Debug
{
    fn push(&mut self, literal: L);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn iter(&self) -> Iter<L>;
    fn clear(&mut self);
    fn swap(&mut self, a: usize, b: usize);
}

impl<L: Literal> LiteralStorage<L> for Vec<L> {
    fn push(&mut self, literal: L) {
        self.push(literal);
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn iter(&self) -> Iter<L> {
        self.as_slice().iter()
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}

impl<L: Literal, const N: usize> LiteralStorage<L> for SmallVec<[L; N]> {
    fn push(&mut self, literal: L) {
        self.push(literal);
    }

    fn len(&self) -> usize {
        self.len()
    }

    fn is_empty(&self) -> bool {
        self.is_empty()
    }

    fn iter(&self) -> Iter<L> {
        self.as_slice().iter()
    }

    fn clear(&mut self) {
        self.clear();
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.as_mut_slice().swap(a, b);
    }
}
