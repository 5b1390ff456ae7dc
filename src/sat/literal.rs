#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Literal representations.
//!
//! A literal is a variable paired with a polarity. The feature extractor and
//! the watch lists are generic over the encoding; two packed encodings are
//! provided. Variables are indexed `0..num_vars`. Every literal has a
//! `code`, `2 * var` for the positive literal and `2 * var + 1` for the
//! negative one, used both to index per-literal watch lists and as the
//! total order for anchor selection during clause traversal.

use core::ops::Not;
use std::fmt::Debug;
use std::hash::Hash;

pub type Variable = u32;

pub trait Literal: Copy + Debug + Eq + Hash + Default {
    fn new(var: Variable, polarity: bool) -> Self;
    fn variable(self) -> Variable;
    fn polarity(self) -> bool;

    #[must_use]
    fn negated(self) -> Self;

    fn is_negated(self) -> bool {
        !self.polarity()
    }

    fn is_positive(self) -> bool {
        self.polarity()
    }

    /// Dense index of this literal, variable-major with the positive literal
    /// first. Doubles as the traversal anchor order.
    fn code(self) -> usize {
        (self.variable() as usize) * 2 + usize::from(self.is_negated())
    }

    /// Builds a literal from its dense index.
    #[must_use]
    fn from_code(code: usize) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self::new((code / 2) as Variable, code % 2 == 0)
    }

    /// Converts a DIMACS literal (`±v`, 1-based) to the 0-based encoding.
    ///
    /// # Panics
    ///
    /// If `value` is 0, which terminates a clause in DIMACS and is not a
    /// literal.
    #[must_use]
    fn from_dimacs(value: i32) -> Self {
        assert_ne!(value, 0, "0 is not a DIMACS literal");
        Self::new(value.unsigned_abs() - 1, value.is_positive())
    }

    /// Converts back to the DIMACS convention.
    fn to_dimacs(self) -> i32 {
        let v = i32::try_from(self.variable() + 1).expect("variable out of i32 range");
        if self.polarity() { v } else { -v }
    }
}

/// Literal packed into a `u32` with the polarity in the top bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct PackedLiteral(u32);

impl Literal for PackedLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var & 0x7FFF_FFFF | (u32::from(polarity) << 31))
    }

    fn variable(self) -> Variable {
        self.0 & 0x7FFF_FFFF
    }

    fn polarity(self) -> bool {
        (self.0 >> 31) != 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ (1 << 31))
    }
}

impl Not for PackedLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

/// Literal stored directly as its dense code (`2 * var + sign`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct DoubleLiteral(u32);

impl Literal for DoubleLiteral {
    fn new(var: Variable, polarity: bool) -> Self {
        Self(var * 2 + u32::from(!polarity))
    }

    fn variable(self) -> Variable {
        self.0 / 2
    }

    fn polarity(self) -> bool {
        self.0 % 2 == 0
    }

    fn negated(self) -> Self {
        Self(self.0 ^ 1)
    }

    fn code(self) -> usize {
        self.0 as usize
    }
}

impl Not for DoubleLiteral {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_neg() {
        assert_eq!(
            PackedLiteral::new(1, false).negated(),
            PackedLiteral::new(1, true)
        );
        assert_eq!(
            PackedLiteral::new(1, true).negated(),
            PackedLiteral::new(1, false)
        );
        assert_eq!(!DoubleLiteral::new(4, true), DoubleLiteral::new(4, false));
    }

    #[test]
    fn test_code_order() {
        // variable-major, positive before negative
        let pos0 = DoubleLiteral::new(0, true);
        let neg0 = DoubleLiteral::new(0, false);
        let pos1 = DoubleLiteral::new(1, true);

        assert!(pos0.code() < neg0.code());
        assert!(neg0.code() < pos1.code());
        assert_eq!(PackedLiteral::new(3, false).code(), 7);
        assert_eq!(DoubleLiteral::new(3, false).code(), 7);
    }

    #[test]
    fn test_code_roundtrip() {
        for code in 0..8 {
            assert_eq!(PackedLiteral::from_code(code).code(), code);
            assert_eq!(DoubleLiteral::from_code(code).code(), code);
        }
    }

    #[test]
    fn test_dimacs_roundtrip() {
        let lit = PackedLiteral::from_dimacs(-3);
        assert_eq!(lit.variable(), 2);
        assert!(lit.is_negated());
        assert_eq!(lit.to_dimacs(), -3);
        assert_eq!(PackedLiteral::from_dimacs(1).variable(), 0);
        assert_eq!(DoubleLiteral::from_dimacs(5).to_dimacs(), 5);
    }
}
