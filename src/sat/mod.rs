#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod activity;
pub mod assignment;
pub mod clause;
pub mod clause_storage;
pub mod dimacs;
pub mod extract;
pub mod features;
pub mod literal;
pub mod phase_saving;
pub mod state;
pub mod watch;
