use crate::sat::literal::{Literal, Variable};
use bit_vec::BitVec;

/// Last polarity the search assigned to each variable. Initialized all-true,
/// the phase a fresh search starts from before anything has been saved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedPhases(BitVec);

impl SavedPhases {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(BitVec::from_elem(num_vars, true))
    }

    pub fn save(&mut self, lit: impl Literal) {
        self.0.set(lit.variable() as usize, lit.polarity());
    }

    #[must_use]
    pub fn get(&self, var: Variable) -> bool {
        self.0.get(var as usize).unwrap_or(true)
    }

    /// Number of variables whose saved phase is `true`.
    #[must_use]
    pub fn num_true(&self) -> usize {
        self.0.iter().filter(|b| *b).count()
    }
}
