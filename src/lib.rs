//! A library used to handle weighted and projected CNF formulas.
//!
//! The crate parses the weighted CNF dialects used by model counters
//! (unweighted DIMACS, Cachet, MiniC2D, weighted and weighted-projected CNF)
//! into a uniform [`Cnf`] representation,
//! and computes variable elimination orderings over the formula's Gaifman graph.

mod core;
pub use core::Cnf;
pub use core::Graph;
pub use core::Literal;
pub use core::VarSet;
pub use core::WeightFormat;

mod io;
pub use io::CnfReader;
pub use io::STDIN_PATH;

mod orderings;
pub use orderings::VarOrderingHeuristic;
