#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The clause-database owner the extractor reads from.
//!
//! `State` holds the formula the way the search engine keeps it: binary and
//! ternary clauses implicit in the watch lists, long clauses in an indexed
//! store, plus the per-variable runtime signals the search maintains
//! (assignment, activities, saved phases). The search algorithm itself lives
//! outside this crate; everything here is the storage and signal surface the
//! feature extractor consumes.

use crate::sat::activity::Vsids;
use crate::sat::assignment::{Assignment, VecAssignment};
use crate::sat::clause::Clause;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::phase_saving::SavedPhases;
use crate::sat::watch::WatchLists;
use smallvec::SmallVec;

#[derive(Debug, Clone, PartialEq)]
pub struct State<
    L: Literal = PackedLiteral,
    S: LiteralStorage<L> = SmallVec<[L; 8]>,
    A: Assignment = VecAssignment,
> {
    pub num_vars: usize,

    pub watches: WatchLists<L>,

    /// Explicit store for clauses of four or more literals, addressed by
    /// stable index. Removed clauses keep their slot.
    pub long_clauses: Vec<Clause<L, S>>,

    pub assignment: A,

    pub vsids: Vsids,

    pub saved_phases: SavedPhases,

    num_binary: usize,

    num_ternary: usize,
}

impl<L: Literal, S: LiteralStorage<L>, A: Assignment> State<L, S, A> {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self {
            num_vars,
            watches: WatchLists::new(num_vars),
            long_clauses: Vec::new(),
            assignment: A::new(num_vars),
            vsids: Vsids::new(num_vars),
            saved_phases: SavedPhases::new(num_vars),
            num_binary: 0,
            num_ternary: 0,
        }
    }

    /// Builds a state from DIMACS-convention clauses, sized to the largest
    /// variable mentioned.
    #[must_use]
    pub fn from_clauses(num_vars: usize, clauses: &[Vec<i32>]) -> Self {
        let mut state = Self::new(num_vars);
        for clause in clauses {
            let lits: Vec<L> = clause.iter().copied().map(L::from_dimacs).collect();
            state.add_clause(&lits);
        }
        state
    }

    /// Stores a clause in the representation its length dictates.
    ///
    /// Unit clauses are not representable in the clause database; they are
    /// absorbed as an assignment plus saved phase, the way the search trails
    /// them. Empty clauses are ignored.
    ///
    /// The clause must not repeat a variable.
    pub fn add_clause(&mut self, literals: &[L]) {
        match literals {
            [] => {}
            [unit] => self.assign(*unit),
            [a, b] => {
                self.watches.attach_binary(*a, *b);
                self.num_binary += 1;
            }
            [a, b, c] => {
                self.watches.attach_ternary(*a, *b, *c);
                self.num_ternary += 1;
            }
            _ => {
                let idx = self.long_clauses.len();
                self.long_clauses
                    .push(Clause::new(literals.iter().copied()));
                self.watches.attach_long(literals, idx);
            }
        }
    }

    /// Assigns a literal and saves its phase, as the search would.
    pub fn assign(&mut self, lit: L) {
        self.assignment.assign(lit);
        self.saved_phases.save(lit);
    }

    /// Marks a long clause removed; its watch entries stay behind and the
    /// liveness flag excludes it from traversal.
    pub fn remove_long(&mut self, idx: usize) {
        self.long_clauses[idx].remove();
    }

    /// Removes a binary clause entirely. Returns whether it existed.
    pub fn remove_binary(&mut self, a: L, b: L) -> bool {
        let found = self.watches.detach_binary(a, b);
        if found {
            self.num_binary -= 1;
        }
        found
    }

    #[must_use]
    pub const fn num_binary(&self) -> usize {
        self.num_binary
    }

    #[must_use]
    pub const fn num_ternary(&self) -> usize {
        self.num_ternary
    }

    /// Live long clauses.
    #[must_use]
    pub fn num_long(&self) -> usize {
        self.long_clauses.iter().filter(|c| !c.is_removed()).count()
    }

    /// Total active clauses across all three representations.
    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.num_binary + self.num_ternary + self.num_long()
    }
}
