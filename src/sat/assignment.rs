use crate::sat::literal::{Literal, Variable};
use core::ops::{Index, IndexMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum VarState {
    #[default]
    Unassigned,
    Assigned(bool),
}

impl VarState {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        matches!(self, Self::Assigned(_))
    }

    #[must_use]
    pub const fn is_unassigned(self) -> bool {
        !self.is_assigned()
    }

    #[must_use]
    pub const fn is_true(self) -> bool {
        matches!(self, Self::Assigned(true))
    }

    #[must_use]
    pub const fn is_false(self) -> bool {
        matches!(self, Self::Assigned(false))
    }
}

pub trait Assignment: Clone + std::fmt::Debug + Default {
    fn new(num_vars: usize) -> Self;
    fn assign<L: Literal>(&mut self, lit: L);
    fn var_value(&self, var: Variable) -> Option<bool>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_assigned(&self, var: Variable) -> bool {
        self.var_value(var).is_some()
    }

    fn literal_value<L: Literal>(&self, lit: L) -> Option<bool> {
        self.var_value(lit.variable())
            .map(|b| b == lit.polarity())
    }

    fn num_assigned(&self) -> usize;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VecAssignment(Vec<VarState>);

impl Assignment for VecAssignment {
    fn new(num_vars: usize) -> Self {
        Self(vec![VarState::Unassigned; num_vars])
    }

    fn assign<L: Literal>(&mut self, lit: L) {
        self.0[lit.variable() as usize] = VarState::Assigned(lit.polarity());
    }

    fn var_value(&self, var: Variable) -> Option<bool> {
        match self.0.get(var as usize) {
            Some(VarState::Assigned(b)) => Some(*b),
            _ => None,
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }

    fn num_assigned(&self) -> usize {
        self.0.iter().filter(|s| s.is_assigned()).count()
    }
}

impl Index<Variable> for VecAssignment {
    type Output = VarState;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index as usize]
    }
}

impl IndexMut<Variable> for VecAssignment {
    fn index_mut(&mut self, index: Variable) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}
