#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Per-variable VSIDS activity table.
//!
//! The search engine bumps a variable each time it takes part in a conflict
//! and periodically decays the whole table. For this crate the table is a
//! runtime signal: the extractor summarizes it but never changes it.

use crate::sat::literal::Variable;

const DEFAULT_DECAY: f64 = 0.95;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Vsids(Vec<f64>);

impl Vsids {
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![0.0; num_vars])
    }

    pub fn bump(&mut self, var: Variable) {
        self.0[var as usize] += 1.0;
    }

    pub fn bumps<T: IntoIterator<Item = Variable>>(&mut self, vars: T) {
        for var in vars {
            self.bump(var);
        }
    }

    #[must_use]
    pub fn get(&self, var: Variable) -> f64 {
        self.0[var as usize]
    }

    pub fn decay(&mut self, factor: f64) {
        for v in &mut self.0 {
            *v *= factor;
        }
    }

    pub fn decay_default(&mut self) {
        self.decay(DEFAULT_DECAY);
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}
