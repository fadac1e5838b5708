//! A CDCL SAT solver with symmetry propagation.
//!
//! Beside the usual two-watched-literal CDCL machinery, the solver keeps a
//! set of permutation generators that map the formula to itself and learns
//! symmetric images of reason clauses while it propagates.
/// assignment management: trail, heap, branching, propagation
pub mod assign;
/// clause database: arena, watch lists, reduction, garbage collection
pub mod cdb;
/// solver configuration built from command line options
pub mod config;
/// top-level API: build, search, solve, validate
pub mod solver;
/// statistics and progress report
pub mod state;
/// symmetry subsystem: generators, symmetrical learnt clauses, injection
pub mod symmetry;
/// plumbing layer: literals, flags, common traits
pub mod types;

pub use {
    config::Config,
    solver::{Certificate, SatSolverIF, Solver, SolverResult, ValidateIF},
    types::{Lit, SolverError, VarId},
};
