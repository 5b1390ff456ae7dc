#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-literal watch lists and the heterogeneous entries stored in them.
//!
//! Short clauses are not stored anywhere else: a binary clause exists only as
//! a `Watched::Binary` entry in each of its two literals' lists, a ternary
//! clause as a `Watched::Ternary` entry in each of its three. Long clauses
//! live in the explicit store and are referenced here by index from two of
//! their literals. A clause is therefore reachable from several lists, and
//! traversal has to deduplicate (see `sat::extract`).

use crate::sat::literal::Literal;
use smallvec::SmallVec;
use std::ops::{Index, IndexMut};

/// One watch-list entry. The anchor literal is implied by which list the
/// entry sits in; the entry stores the rest of the clause, or where to find
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Watched<L: Literal> {
    /// Binary clause `{anchor, other}`.
    Binary { other: L },
    /// Ternary clause `{anchor, b, c}`.
    Ternary { b: L, c: L },
    /// Long clause at `idx` in the explicit store.
    Long { idx: usize },
}

/// Watch lists indexed by literal code, one list per polarity per variable.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WatchLists<L: Literal>(Vec<SmallVec<[Watched<L>; 4]>>);

impl<L: Literal> WatchLists<L> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![SmallVec::new(); num_vars * 2])
    }

    /// Number of watch lists (twice the variable count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Registers a binary clause `{a, b}` in both literals' lists.
    pub fn attach_binary(&mut self, a: L, b: L) {
        debug_assert_ne!(a.variable(), b.variable());
        self[a].push(Watched::Binary { other: b });
        self[b].push(Watched::Binary { other: a });
    }

    /// Registers a ternary clause `{a, b, c}` in all three literals' lists.
    pub fn attach_ternary(&mut self, a: L, b: L, c: L) {
        self[a].push(Watched::Ternary { b, c });
        self[b].push(Watched::Ternary { b: a, c });
        self[c].push(Watched::Ternary { b: a, c: b });
    }

    /// Watches a long clause from its first two literals.
    pub fn attach_long(&mut self, lits: &[L], idx: usize) {
        debug_assert!(lits.len() >= 4);
        self[lits[0]].push(Watched::Long { idx });
        self[lits[1]].push(Watched::Long { idx });
    }

    /// Removes a binary clause `{a, b}` from both lists; the clause ceases
    /// to exist. Returns whether an entry was found.
    pub fn detach_binary(&mut self, a: L, b: L) -> bool {
        let before = self[a].len();
        self[a].retain(|w| !matches!(w, Watched::Binary { other } if *other == b));
        self[b].retain(|w| !matches!(w, Watched::Binary { other } if *other == a));
        before != self[a].len()
    }
}

impl<L: Literal> Index<L> for WatchLists<L> {
    type Output = SmallVec<[Watched<L>; 4]>;

    fn index(&self, lit: L) -> &Self::Output {
        &self.0[lit.code()]
    }
}

impl<L: Literal> IndexMut<L> for WatchLists<L> {
    fn index_mut(&mut self, lit: L) -> &mut Self::Output {
        &mut self.0[lit.code()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    fn lit(v: i32) -> PackedLiteral {
        PackedLiteral::from_dimacs(v)
    }

    #[test]
    fn test_attach_binary_both_sides() {
        let mut wl: WatchLists<PackedLiteral> = WatchLists::new(3);
        wl.attach_binary(lit(1), lit(-2));

        assert_eq!(wl[lit(1)].as_slice(), &[Watched::Binary { other: lit(-2) }]);
        assert_eq!(wl[lit(-2)].as_slice(), &[Watched::Binary { other: lit(1) }]);
        assert!(wl[lit(2)].is_empty());
    }

    #[test]
    fn test_attach_ternary_all_sides() {
        let mut wl: WatchLists<PackedLiteral> = WatchLists::new(3);
        wl.attach_ternary(lit(1), lit(2), lit(3));

        for l in [lit(1), lit(2), lit(3)] {
            assert_eq!(wl[l].len(), 1);
        }
        assert_eq!(
            wl[lit(1)][0],
            Watched::Ternary {
                b: lit(2),
                c: lit(3)
            }
        );
    }

    #[test]
    fn test_attach_long_two_watches() {
        let mut wl: WatchLists<PackedLiteral> = WatchLists::new(4);
        let lits = [lit(1), lit(-2), lit(3), lit(4)];
        wl.attach_long(&lits, 0);

        assert_eq!(wl[lit(1)].as_slice(), &[Watched::Long { idx: 0 }]);
        assert_eq!(wl[lit(-2)].as_slice(), &[Watched::Long { idx: 0 }]);
        assert!(wl[lit(3)].is_empty());
    }

    #[test]
    fn test_detach_binary() {
        let mut wl: WatchLists<PackedLiteral> = WatchLists::new(3);
        wl.attach_binary(lit(1), lit(2));
        wl.attach_binary(lit(1), lit(3));

        assert!(wl.detach_binary(lit(1), lit(2)));
        assert_eq!(wl[lit(1)].as_slice(), &[Watched::Binary { other: lit(3) }]);
        assert!(wl[lit(2)].is_empty());
        assert!(!wl.detach_binary(lit(1), lit(2)));
    }
}
