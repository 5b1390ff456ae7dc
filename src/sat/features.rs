#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The feature vector and its rendering.
//!
//! `Features` is the flat, fixed-field summary one extraction call produces.
//! Field names are stable across calls and versions so two reports can be
//! diffed line by line; `fields` is the single source of truth for both the
//! names and the order.

use itertools::Itertools;
use ordered_float::OrderedFloat;
use std::fmt;
use std::io::{self, Write};

/// Mean/variance/min/max of a sample, all 0 for the empty sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub mean: f64,
    pub variance: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    #[must_use]
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        #[allow(clippy::cast_precision_loss)]
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;

        let (min, max) = values
            .iter()
            .copied()
            .map(OrderedFloat)
            .minmax()
            .into_option()
            .map_or((0.0, 0.0), |(lo, hi)| (lo.0, hi.0));

        Self {
            mean,
            variance,
            min,
            max,
        }
    }

    /// Standard deviation, the square root of the variance.
    #[must_use]
    pub fn sd(self) -> f64 {
        self.variance.sqrt()
    }
}

/// One extraction call's worth of features, grouped into the size,
/// clause-shape, variable-degree, and runtime-signal families.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Features {
    // size
    pub num_vars: usize,
    pub num_clauses: usize,
    pub num_literals: usize,
    pub vars_clauses_ratio: f64,

    // clause shape
    pub binary_clauses: usize,
    pub ternary_clauses: usize,
    pub long_clauses: usize,
    pub horn_clauses: usize,
    pub binary_fraction: f64,
    pub ternary_fraction: f64,
    pub long_fraction: f64,
    pub horn_fraction: f64,
    pub clause_size_mean: f64,
    pub clause_size_variance: f64,
    pub clause_size_min: f64,
    pub clause_size_max: f64,

    // variable degree
    pub var_pos_mean: f64,
    pub var_pos_sd: f64,
    pub var_pos_min: f64,
    pub var_pos_max: f64,
    pub var_degree_mean: f64,
    pub var_degree_sd: f64,
    pub var_degree_min: f64,
    pub var_degree_max: f64,
    pub var_horn_mean: f64,
    pub var_horn_sd: f64,
    pub var_horn_min: f64,
    pub var_horn_max: f64,
    pub pos_ratio_mean: f64,
    pub pos_ratio_sd: f64,
    pub pos_ratio_min: f64,
    pub pos_ratio_max: f64,

    // runtime signals
    pub var_activity_mean: f64,
    pub var_activity_variance: f64,
    pub var_activity_min: f64,
    pub var_activity_max: f64,
    pub assigned_fraction: f64,
    pub positive_polarity_fraction: f64,
    pub saved_phase_fraction: f64,
    pub clause_activity_mean: f64,
    pub clause_activity_variance: f64,
    pub clause_activity_min: f64,
    pub clause_activity_max: f64,
    pub clause_lbd_mean: f64,
    pub clause_lbd_variance: f64,
    pub clause_lbd_min: f64,
    pub clause_lbd_max: f64,
}

/// Number of fields in the vector.
pub const NUM_FEATURES: usize = 47;

impl Features {
    /// Name/value pairs in report order. The order is fixed; appending new
    /// fields at the end of a family is the only supported evolution.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::too_many_lines)]
    pub fn fields(&self) -> [(&'static str, f64); NUM_FEATURES] {
        [
            ("num_vars", self.num_vars as f64),
            ("num_clauses", self.num_clauses as f64),
            ("num_literals", self.num_literals as f64),
            ("vars_clauses_ratio", self.vars_clauses_ratio),
            ("binary_clauses", self.binary_clauses as f64),
            ("ternary_clauses", self.ternary_clauses as f64),
            ("long_clauses", self.long_clauses as f64),
            ("horn_clauses", self.horn_clauses as f64),
            ("binary_fraction", self.binary_fraction),
            ("ternary_fraction", self.ternary_fraction),
            ("long_fraction", self.long_fraction),
            ("horn_fraction", self.horn_fraction),
            ("clause_size_mean", self.clause_size_mean),
            ("clause_size_variance", self.clause_size_variance),
            ("clause_size_min", self.clause_size_min),
            ("clause_size_max", self.clause_size_max),
            ("var_pos_mean", self.var_pos_mean),
            ("var_pos_sd", self.var_pos_sd),
            ("var_pos_min", self.var_pos_min),
            ("var_pos_max", self.var_pos_max),
            ("var_degree_mean", self.var_degree_mean),
            ("var_degree_sd", self.var_degree_sd),
            ("var_degree_min", self.var_degree_min),
            ("var_degree_max", self.var_degree_max),
            ("var_horn_mean", self.var_horn_mean),
            ("var_horn_sd", self.var_horn_sd),
            ("var_horn_min", self.var_horn_min),
            ("var_horn_max", self.var_horn_max),
            ("pos_ratio_mean", self.pos_ratio_mean),
            ("pos_ratio_sd", self.pos_ratio_sd),
            ("pos_ratio_min", self.pos_ratio_min),
            ("pos_ratio_max", self.pos_ratio_max),
            ("var_activity_mean", self.var_activity_mean),
            ("var_activity_variance", self.var_activity_variance),
            ("var_activity_min", self.var_activity_min),
            ("var_activity_max", self.var_activity_max),
            ("assigned_fraction", self.assigned_fraction),
            ("positive_polarity_fraction", self.positive_polarity_fraction),
            ("saved_phase_fraction", self.saved_phase_fraction),
            ("clause_activity_mean", self.clause_activity_mean),
            ("clause_activity_variance", self.clause_activity_variance),
            ("clause_activity_min", self.clause_activity_min),
            ("clause_activity_max", self.clause_activity_max),
            ("clause_lbd_mean", self.clause_lbd_mean),
            ("clause_lbd_variance", self.clause_lbd_variance),
            ("clause_lbd_min", self.clause_lbd_min),
            ("clause_lbd_max", self.clause_lbd_max),
        ]
    }

    /// Writes one `name: value` line per field to `sink`.
    ///
    /// # Errors
    ///
    /// Propagates write failures from the sink.
    pub fn write_report<W: Write>(&self, sink: &mut W) -> io::Result<()> {
        for (name, value) in self.fields() {
            writeln!(sink, "{name}: {value:.6}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Features {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in self.fields() {
            writeln!(f, "{name}: {value:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_empty() {
        assert_eq!(Summary::of(&[]), Summary::default());
    }

    #[test]
    fn test_summary() {
        let s = Summary::of(&[1.0, 2.0, 3.0, 2.0]);
        assert!((s.mean - 2.0).abs() < 1e-12);
        assert!((s.variance - 0.5).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 3.0);
        assert!((s.sd() - 0.5_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_default_is_all_zero() {
        let feat = Features::default();
        assert!(feat.fields().iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn test_report_shape() {
        let mut out = Vec::new();
        Features::default().write_report(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), NUM_FEATURES);
        assert_eq!(lines[0], "num_vars: 0.000000");
        assert!(lines.iter().all(|l| l.contains(": ")));
    }

    #[test]
    fn test_field_names_unique() {
        let feat = Features::default();
        let names: Vec<&str> = feat.fields().iter().map(|(n, _)| *n).collect();
        let unique: std::collections::HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }
}
