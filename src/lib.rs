//! Structural and runtime feature extraction over a CDCL solver's clause
//! database.
//!
//! A conflict-driven solver stores its clauses heterogeneously for speed:
//! binary and ternary clauses are encoded implicitly inside per-literal watch
//! lists while longer clauses live in an explicit indexed store. This crate
//! walks that storage in one pass, visiting every active clause exactly once
//! no matter how many watch lists expose it, and folds the result into a
//! fixed, named feature vector (clause shapes, Horn structure, variable
//! degrees, and the runtime signals the search maintains). The vector feeds
//! portfolio/configuration selection and diagnostic reports.

/// Clause database model, traversal engine, and the feature extractor.
pub mod sat;
