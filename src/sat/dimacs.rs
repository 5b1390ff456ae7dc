#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A parser for the DIMACS CNF file format.
//!
//! The parser builds a `State` directly: each clause lands in the storage
//! representation its length dictates, so the resulting clause database looks
//! the way a solver would hold it right after loading. The problem line's
//! declared counts are ignored; the variable count is derived from the
//! largest variable actually mentioned.

use crate::sat::assignment::Assignment;
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::literal::Literal;
use crate::sat::state::State;
use itertools::Itertools;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses DIMACS formatted data from a `BufRead` source into a `State`.
///
/// Comment (`c`) and problem (`p`) lines are skipped, a `%` line ends the
/// input, every other line is a clause of whitespace-separated literals
/// terminated by `0`.
///
/// # Panics
///
/// If reading a line fails or a token other than the terminating `0` does
/// not parse as an `i32`. A malformed file is a fatal input error.
pub fn parse_dimacs<R: BufRead, L: Literal, S: LiteralStorage<L>, A: Assignment>(
    reader: R,
) -> State<L, S, A> {
    let mut lines = reader
        .lines()
        .map(|line| line.unwrap_or_else(|e| panic!("Failed to read line: {e}")));

    let mut clauses: Vec<Vec<i32>> = Vec::new();

    for line in &mut lines {
        let mut parts = line.split_whitespace().peekable();

        match parts.peek() {
            Some(&"%") => break,
            None | Some(&"c" | &"p") => {}
            Some(_) => {
                let clause: Vec<i32> = parts
                    .map(|s| {
                        s.parse::<i32>()
                            .unwrap_or_else(|e| panic!("Failed to parse literal '{s}' as i32: {e}"))
                    })
                    .filter(|&p| p != 0)
                    .collect_vec();

                if !clause.is_empty() {
                    clauses.push(clause);
                }
            }
        }
    }

    let num_vars = clauses
        .iter()
        .flatten()
        .map(|l| l.unsigned_abs() as usize)
        .max()
        .unwrap_or(0);

    State::from_clauses(num_vars, &clauses)
}

/// Parses a DIMACS CNF file specified by its path.
///
/// # Errors
///
/// Returns `io::Result::Err` if the file cannot be opened; panics from
/// `parse_dimacs` on malformed content propagate.
pub fn parse_file<L: Literal, S: LiteralStorage<L>, A: Assignment>(
    file_path: impl AsRef<Path>,
) -> io::Result<State<L, S, A>> {
    let file = std::fs::File::open(file_path)?;
    let reader = io::BufReader::new(file);
    Ok(parse_dimacs(reader))
}
