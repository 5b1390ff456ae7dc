#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Single-pass feature extraction over the heterogeneous clause database.
//!
//! The clause store is split for propagation speed: binary and ternary
//! clauses exist only as watch-list entries, long clauses sit in an indexed
//! arena watched from two of their literals. Every logical clause is
//! therefore reachable from several lists, and the traversal here visits
//! each one exactly once: implicit clauses are processed only from their
//! numerically smallest literal, arena clauses through a visited-index set.
//!
//! One pass drives two callback channels, one per clause and one per
//! literal, so the clause aggregates and the per-variable counters are
//! built together. A second, cheaper pass summarizes the runtime signals
//! the search maintains (activities, assignment polarities, saved phases,
//! clause activity and LBD); those are not derivable from structure.

use crate::sat::assignment::{Assignment, VecAssignment};
use crate::sat::clause_storage::LiteralStorage;
use crate::sat::features::{Features, Summary};
use crate::sat::literal::{Literal, PackedLiteral};
use crate::sat::state::State;
use crate::sat::watch::Watched;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::io::{self, Write};

/// A clause is Horn if it contains at most one positive literal.
#[must_use]
pub fn is_horn<L: Literal>(lits: &[L]) -> bool {
    lits.iter().filter(|l| l.is_positive()).count() <= 1
}

/// `num / den`, defined as 0 when the denominator is 0.
#[must_use]
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 { 0.0 } else { num / den }
}

/// Materializes the clause behind one watch entry and feeds it to the two
/// callbacks, unless the deduplication policy or the liveness flag says the
/// entry is not this clause's canonical occurrence.
///
/// Implicit (binary/ternary) clauses are processed only when `anchor` is the
/// smallest literal of the clause; arena clauses only on the first index
/// encounter, and only while not flagged removed. On a processed clause the
/// next `clause_id` is consumed, `per_lit` runs for every literal, and
/// `per_clause` runs once.
pub fn for_one_clause<L, S, A, F, G>(
    state: &State<L, S, A>,
    watch: Watched<L>,
    anchor: L,
    seen_long: &mut FxHashSet<usize>,
    clause_id: &mut usize,
    per_clause: &mut F,
    per_lit: &mut G,
) where
    L: Literal,
    S: LiteralStorage<L>,
    A: Assignment,
    F: FnMut(&[L]),
    G: FnMut(L, &[L]),
{
    let mut short: SmallVec<[L; 3]> = SmallVec::new();

    let lits: &[L] = match watch {
        Watched::Binary { other } => {
            if anchor.code() > other.code() {
                return;
            }
            short.push(anchor);
            short.push(other);
            &short
        }
        Watched::Ternary { b, c } => {
            if anchor.code() > b.code() || anchor.code() > c.code() {
                return;
            }
            short.push(anchor);
            short.push(b);
            short.push(c);
            &short
        }
        Watched::Long { idx } => {
            let clause = &state.long_clauses[idx];
            if clause.is_removed() || !seen_long.insert(idx) {
                return;
            }
            clause.literals.as_ref()
        }
    };

    *clause_id += 1;

    for &lit in lits {
        per_lit(lit, lits);
    }
    per_clause(lits);
}

/// Drives `for_one_clause` over every watch entry of every literal, both
/// polarities of every variable in order. Each active clause is visited
/// exactly once; the return value is the number of clauses visited (the
/// final `clause_id`). An empty formula yields zero iterations.
pub fn for_all_clauses<L, S, A, F, G>(
    state: &State<L, S, A>,
    mut per_clause: F,
    mut per_lit: G,
) -> usize
where
    L: Literal,
    S: LiteralStorage<L>,
    A: Assignment,
    F: FnMut(&[L]),
    G: FnMut(L, &[L]),
{
    let mut seen_long = FxHashSet::default();
    let mut clause_id = 0;

    for code in 0..state.watches.len() {
        let anchor = L::from_code(code);
        for &watch in &state.watches[anchor] {
            for_one_clause(
                state,
                watch,
                anchor,
                &mut seen_long,
                &mut clause_id,
                &mut per_clause,
                &mut per_lit,
            );
        }
    }

    clause_id
}

/// Per-variable structural counters, zeroed at the start of each pass and
/// only ever incremented during it.
#[derive(Debug, Clone, Copy, Default)]
struct VarCounts {
    /// Positive occurrences across active clauses.
    num_pos: u32,
    /// Active clauses containing the variable, one count per clause.
    degree: u32,
    /// Horn clauses containing the variable.
    horn: u32,
}

/// Running clause-shape aggregates filled by the per-clause channel.
#[derive(Debug, Clone, Default)]
struct ClauseShape {
    count: usize,
    binary: usize,
    ternary: usize,
    long: usize,
    horn: usize,
    size_sum: f64,
    size_sq_sum: f64,
    size_min: f64,
    size_max: f64,
}

impl ClauseShape {
    fn record<L: Literal>(&mut self, lits: &[L]) {
        #[allow(clippy::cast_precision_loss)]
        let len = lits.len() as f64;

        match lits.len() {
            2 => self.binary += 1,
            3 => self.ternary += 1,
            _ => self.long += 1,
        }
        if is_horn(lits) {
            self.horn += 1;
        }

        if self.count == 0 {
            self.size_min = len;
            self.size_max = len;
        } else {
            self.size_min = self.size_min.min(len);
            self.size_max = self.size_max.max(len);
        }
        self.count += 1;
        self.size_sum += len;
        self.size_sq_sum += len * len;
    }
}

/// Computes a `Features` vector from a quiescent `State`.
///
/// All mutable counters live in the extractor and are rebuilt from scratch
/// on every `extract` call, so two calls on an unmutated state return the
/// same vector and the state itself is never touched.
#[derive(Debug)]
pub struct FeatureExtractor<
    'a,
    L: Literal = PackedLiteral,
    S: LiteralStorage<L> = SmallVec<[L; 8]>,
    A: Assignment = VecAssignment,
> {
    state: &'a State<L, S, A>,
    vars: Vec<VarCounts>,
    shape: ClauseShape,
    clause_id: usize,
    feat: Features,
}

impl<'a, L: Literal, S: LiteralStorage<L>, A: Assignment> FeatureExtractor<'a, L, S, A> {
    #[must_use]
    pub fn new(state: &'a State<L, S, A>) -> Self {
        Self {
            state,
            vars: Vec::new(),
            shape: ClauseShape::default(),
            clause_id: 0,
            feat: Features::default(),
        }
    }

    /// Runs the full extraction and returns the assembled vector by value.
    ///
    /// Order is fixed: reset, the structural pass (both callback channels),
    /// clause-shape finalization, variable-degree finalization, then the two
    /// runtime-signal summaries.
    pub fn extract(&mut self) -> Features {
        self.feat = Features::default();
        self.fill_vars_cls();
        self.calculate_clause_stats();
        self.calculate_variable_stats();
        self.calculate_extra_var_stats();
        self.calculate_extra_clause_stats();
        self.feat.clone()
    }

    /// Renders the most recently extracted vector to `sink`; a
    /// zero-initialized vector if `extract` has not run yet.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the sink.
    pub fn print_stats<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        self.feat.write_report(sink)
    }

    /// The single structural pass: allocates and zeroes one counter slot per
    /// variable, resets the clause counter, and drives both accumulator
    /// channels over every active clause.
    fn fill_vars_cls(&mut self) {
        let state = self.state;
        self.vars = vec![VarCounts::default(); state.num_vars];
        self.shape = ClauseShape::default();

        let vars = &mut self.vars;
        let shape = &mut self.shape;

        self.clause_id = for_all_clauses(
            state,
            |lits| shape.record(lits),
            |lit, lits| {
                let entry = &mut vars[lit.variable() as usize];
                if lit.is_positive() {
                    entry.num_pos += 1;
                }
                entry.degree += 1;
                if is_horn(lits) {
                    entry.horn += 1;
                }
            },
        );
    }

    #[allow(clippy::cast_precision_loss)]
    fn calculate_clause_stats(&mut self) {
        let shape = &self.shape;
        let feat = &mut self.feat;
        let n = shape.count as f64;

        feat.num_vars = self.state.num_vars;
        feat.num_clauses = shape.count;
        feat.num_literals = shape.size_sum as usize;
        feat.vars_clauses_ratio = ratio(self.state.num_vars as f64, n);

        feat.binary_clauses = shape.binary;
        feat.ternary_clauses = shape.ternary;
        feat.long_clauses = shape.long;
        feat.horn_clauses = shape.horn;
        feat.binary_fraction = ratio(shape.binary as f64, n);
        feat.ternary_fraction = ratio(shape.ternary as f64, n);
        feat.long_fraction = ratio(shape.long as f64, n);
        feat.horn_fraction = ratio(shape.horn as f64, n);

        let mean = ratio(shape.size_sum, n);
        feat.clause_size_mean = mean;
        feat.clause_size_variance = if shape.count == 0 {
            0.0
        } else {
            shape.size_sq_sum / n - mean * mean
        };
        feat.clause_size_min = shape.size_min;
        feat.clause_size_max = shape.size_max;
    }

    fn calculate_variable_stats(&mut self) {
        let pos: Vec<f64> = self.vars.iter().map(|v| f64::from(v.num_pos)).collect();
        let degree: Vec<f64> = self.vars.iter().map(|v| f64::from(v.degree)).collect();
        let horn: Vec<f64> = self.vars.iter().map(|v| f64::from(v.horn)).collect();
        let pos_ratio: Vec<f64> = self
            .vars
            .iter()
            .map(|v| ratio(f64::from(v.num_pos), f64::from(v.degree)))
            .collect();

        let feat = &mut self.feat;

        let s = Summary::of(&pos);
        feat.var_pos_mean = s.mean;
        feat.var_pos_sd = s.sd();
        feat.var_pos_min = s.min;
        feat.var_pos_max = s.max;

        let s = Summary::of(&degree);
        feat.var_degree_mean = s.mean;
        feat.var_degree_sd = s.sd();
        feat.var_degree_min = s.min;
        feat.var_degree_max = s.max;

        let s = Summary::of(&horn);
        feat.var_horn_mean = s.mean;
        feat.var_horn_sd = s.sd();
        feat.var_horn_min = s.min;
        feat.var_horn_max = s.max;

        let s = Summary::of(&pos_ratio);
        feat.pos_ratio_mean = s.mean;
        feat.pos_ratio_sd = s.sd();
        feat.pos_ratio_min = s.min;
        feat.pos_ratio_max = s.max;
    }

    #[allow(clippy::cast_precision_loss)]
    fn calculate_extra_var_stats(&mut self) {
        let state = self.state;
        let feat = &mut self.feat;

        let activities: Vec<f64> = state.vsids.iter().collect();
        let s = Summary::of(&activities);
        feat.var_activity_mean = s.mean;
        feat.var_activity_variance = s.variance;
        feat.var_activity_min = s.min;
        feat.var_activity_max = s.max;

        let num_vars = state.num_vars as f64;
        let assigned = state.assignment.num_assigned();
        #[allow(clippy::cast_possible_truncation)]
        let assigned_true = (0..state.num_vars)
            .filter(|&v| state.assignment.var_value(v as u32) == Some(true))
            .count();

        feat.assigned_fraction = ratio(assigned as f64, num_vars);
        feat.positive_polarity_fraction = ratio(assigned_true as f64, assigned as f64);
        feat.saved_phase_fraction = ratio(state.saved_phases.num_true() as f64, num_vars);
    }

    /// Runtime signals attached to stored clauses. Implicit binary/ternary
    /// clauses carry no solver-maintained weights, so this family covers the
    /// live arena clauses only.
    fn calculate_extra_clause_stats(&mut self) {
        let live = || {
            self.state
                .long_clauses
                .iter()
                .filter(|c| !c.is_removed())
        };

        let activities: Vec<f64> = live().map(super::clause::Clause::activity).collect();
        let lbds: Vec<f64> = live().map(|c| f64::from(c.lbd)).collect();

        let feat = &mut self.feat;

        let s = Summary::of(&activities);
        feat.clause_activity_mean = s.mean;
        feat.clause_activity_variance = s.variance;
        feat.clause_activity_min = s.min;
        feat.clause_activity_max = s.max;

        let s = Summary::of(&lbds);
        feat.clause_lbd_mean = s.mean;
        feat.clause_lbd_variance = s.variance;
        feat.clause_lbd_min = s.min;
        feat.clause_lbd_max = s.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::literal::PackedLiteral;

    type TestState = State<PackedLiteral>;

    fn lit(v: i32) -> PackedLiteral {
        PackedLiteral::from_dimacs(v)
    }

    fn scenario_state() -> TestState {
        // {(1 v 2), (-1 v 3), (-2 v -3 v 1)}
        State::from_clauses(3, &[vec![1, 2], vec![-1, 3], vec![-2, -3, 1]])
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_is_horn() {
        assert!(is_horn(&[lit(-1), lit(-2)]));
        assert!(is_horn(&[lit(-1), lit(2)]));
        assert!(!is_horn(&[lit(1), lit(2)]));
        assert!(is_horn::<PackedLiteral>(&[]));
    }

    #[test]
    fn test_empty_formula_all_zero() {
        let state = TestState::new(0);
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat, Features::default());
    }

    #[test]
    fn test_vars_without_clauses() {
        let state = TestState::new(4);
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.num_vars, 4);
        assert_eq!(feat.num_clauses, 0);
        assert_eq!(feat.vars_clauses_ratio, 0.0);
        assert_eq!(feat.var_degree_mean, 0.0);
    }

    #[test]
    fn test_binary_clause_counted_once() {
        // reachable from both literals' watch lists
        let state: TestState = State::from_clauses(2, &[vec![1, 2]]);
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.num_clauses, 1);
        assert_eq!(feat.binary_clauses, 1);
        assert_eq!(feat.num_literals, 2);
    }

    #[test]
    fn test_ternary_and_long_counted_once() {
        let state: TestState =
            State::from_clauses(5, &[vec![1, 2, 3], vec![-1, -2, -3, 4, 5]]);
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.num_clauses, 2);
        assert_eq!(feat.ternary_clauses, 1);
        assert_eq!(feat.long_clauses, 1);
        assert_eq!(feat.num_literals, 8);
    }

    #[test]
    fn test_concrete_scenario() {
        let state = scenario_state();
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.num_clauses, 3);
        assert_eq!(feat.binary_clauses, 2);
        assert_eq!(feat.ternary_clauses, 1);
        assert_eq!(feat.long_clauses, 0);
        assert_close(feat.clause_size_mean, 7.0 / 3.0);
        assert_close(feat.horn_fraction, 2.0 / 3.0);
        assert_eq!(feat.clause_size_min, 2.0);
        assert_eq!(feat.clause_size_max, 3.0);
    }

    #[test]
    fn test_scenario_variable_counters() {
        let state = scenario_state();
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        // v1: pos in c1 and c3, in all three clauses, two of them Horn
        // v2: pos in c1, degree 2, one Horn; v3: pos in c2, degree 2, two Horn
        assert_close(feat.var_pos_mean, 4.0 / 3.0);
        assert_eq!(feat.var_pos_min, 1.0);
        assert_eq!(feat.var_pos_max, 2.0);
        assert_close(feat.var_degree_mean, 7.0 / 3.0);
        assert_eq!(feat.var_degree_min, 2.0);
        assert_eq!(feat.var_degree_max, 3.0);
        assert_close(feat.var_horn_mean, 5.0 / 3.0);
        assert_close(feat.pos_ratio_mean, (2.0 / 3.0 + 0.5 + 0.5) / 3.0);
    }

    #[test]
    fn test_degree_sum_matches_literal_count() {
        let state: TestState = State::from_clauses(
            6,
            &[
                vec![1, -2],
                vec![2, 3, -4],
                vec![-1, -3, 5, 6],
                vec![4, 5],
                vec![-5, -6, 1, 2, 3],
            ],
        );
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        // every clause contributes one degree count per contained variable
        #[allow(clippy::cast_precision_loss)]
        let degree_sum = feat.var_degree_mean * feat.num_vars as f64;
        assert_close(degree_sum, feat.num_literals as f64);
        assert_eq!(feat.num_literals, 2 + 3 + 4 + 2 + 5);
    }

    #[test]
    fn test_all_horn_formula() {
        let state: TestState =
            State::from_clauses(3, &[vec![-1, -2], vec![1, -3], vec![-1, -2, -3]]);
        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_close(feat.horn_fraction, 1.0);
        assert_eq!(feat.horn_clauses, 3);
    }

    #[test]
    fn test_determinism() {
        let state = scenario_state();
        let mut extractor = FeatureExtractor::new(&state);

        let first = extractor.extract();
        let second = extractor.extract();
        assert_eq!(first, second);

        let mut other = FeatureExtractor::new(&state);
        assert_eq!(other.extract(), first);
    }

    #[test]
    fn test_removed_long_clause_excluded() {
        let mut state: TestState =
            State::from_clauses(4, &[vec![1, 2, 3, 4], vec![-1, -2]]);
        state.remove_long(0);

        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.num_clauses, 1);
        assert_eq!(feat.long_clauses, 0);
        assert_eq!(feat.binary_clauses, 1);
        assert_eq!(feat.num_literals, 2);
    }

    #[test]
    fn test_detached_binary_excluded() {
        let mut state: TestState = State::from_clauses(3, &[vec![1, 2], vec![2, 3]]);
        state.remove_binary(lit(1), lit(2));

        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.num_clauses, 1);
        assert_eq!(feat.binary_clauses, 1);
    }

    #[test]
    fn test_extract_does_not_mutate_state() {
        let state = scenario_state();
        let snapshot = state.clone();

        let mut extractor = FeatureExtractor::new(&state);
        extractor.extract();

        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_report_before_extract_is_zero() {
        let state = scenario_state();
        let extractor = FeatureExtractor::new(&state);

        let mut out = Vec::new();
        extractor.print_stats(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("num_vars: 0.000000"));
    }

    #[test]
    fn test_runtime_signal_family() {
        let mut state: TestState =
            State::from_clauses(4, &[vec![1, 2, 3, 4], vec![-1, -2]]);
        state.vsids.bumps([0, 0, 1]);
        state.assign(lit(1));
        state.assign(lit(-2));
        state.long_clauses[0].bump_activity(2.0);
        state.long_clauses[0].lbd = 3;

        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_close(feat.var_activity_mean, 3.0 / 4.0);
        assert_eq!(feat.var_activity_max, 2.0);
        assert_close(feat.assigned_fraction, 0.5);
        assert_close(feat.positive_polarity_fraction, 0.5);
        // phases default true, var 2 saved false
        assert_close(feat.saved_phase_fraction, 3.0 / 4.0);
        assert_close(feat.clause_activity_mean, 2.0);
        assert_close(feat.clause_lbd_mean, 3.0);
    }

    #[test]
    fn test_removed_clause_excluded_from_runtime_stats() {
        let mut state: TestState =
            State::from_clauses(4, &[vec![1, 2, 3, 4], vec![-1, -2, -3, -4]]);
        state.long_clauses[0].bump_activity(8.0);
        state.remove_long(0);

        let mut extractor = FeatureExtractor::new(&state);
        let feat = extractor.extract();

        assert_eq!(feat.clause_activity_max, 0.0);
        assert_eq!(feat.long_clauses, 1);
    }

    #[test]
    fn test_traversal_order_independent_of_insertion() {
        let a: TestState = State::from_clauses(3, &[vec![1, 2], vec![-1, 3]]);
        let b: TestState = State::from_clauses(3, &[vec![-1, 3], vec![1, 2]]);

        let fa = FeatureExtractor::new(&a).extract();
        let fb = FeatureExtractor::new(&b).extract();
        assert_eq!(fa, fb);
    }
}
