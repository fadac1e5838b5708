/// Crate 'solver' provides the top-level API as a SAT solver.
/// Solver Builder
mod build;
/// Conflict analysis
mod conflict;
/// Restart scheduling
mod restart;
/// CDCL search engine
mod search;
/// Assignment validation
mod validate;

pub use self::{restart::Restarter, validate::ValidateIF};

use self::{build::SatSolverBuildIF, search::SatSolverSearchIF};

use crate::{
    assign::AssignStack, cdb::ClauseDB, state::State, symmetry::SymmetryDB, types::*,
};

/// API for SAT solver like `build`, `solve` and so on.
pub trait SatSolverIF {
    /// make a solver and load a CNF (and symmetry generators) into it.
    ///
    /// # Errors
    ///
    /// IO error by failing to load a CNF file.
    fn build(config: &Config) -> Result<Solver, SolverError>;
    /// search an assignment.
    ///
    /// # Errors
    ///
    /// if solver becomes inconsistent by an internal error.
    fn solve(&mut self) -> SolverResult;
    /// search an assignment under a set of assumed literals, valid for
    /// this call only. On UNSAT, [`Solver::conflict`] reports an
    /// inconsistent subset of them, negated.
    ///
    /// # Errors
    ///
    /// if solver becomes inconsistent by an internal error.
    fn solve_limited(&mut self, assumptions: &[i32]) -> SolverResult;
}

impl SatSolverIF for Solver {
    fn build(config: &Config) -> Result<Solver, SolverError> {
        <Solver as SatSolverBuildIF>::solver_build(config)
    }
    fn solve(&mut self) -> SolverResult {
        <Solver as SatSolverSearchIF>::solver_solve(self, &[])
    }
    fn solve_limited(&mut self, assumptions: &[i32]) -> SolverResult {
        <Solver as SatSolverSearchIF>::solver_solve(self, assumptions)
    }
}

/// Normal results returned by Solver.
#[derive(Debug, PartialEq)]
pub enum Certificate {
    SAT(Vec<i32>),
    UNSAT,
}

/// The return type of `Solver::solve`.
/// This captures the following three cases:
/// * `Certificate::SAT` -- solved with a satisfiable assignment set,
/// * `Certificate::UNSAT` -- proved that it's an unsatisfiable problem, and
/// * `SolverError::*` -- caused by a bound, an interrupt or a bug
pub type SolverResult = Result<Certificate, SolverError>;

/// The SAT solver object consisting of 5 sub modules.
#[derive(Debug)]
pub struct Solver {
    /// assignment management
    pub asg: AssignStack,
    /// clause container
    pub cdb: ClauseDB,
    /// symmetry generators and symmetrical learnt clauses
    pub sym: SymmetryDB,
    /// restart management
    pub rst: Restarter,
    /// misc data holder
    pub state: State,
}

impl Solver {
    /// stop the search cooperatively at the next conflict boundary.
    pub fn interrupt(&mut self) {
        self.state.asynch_interrupt = true;
    }
    /// set the conflict budget; a negative value lifts the bound.
    pub fn set_conflict_budget(&mut self, x: i64) {
        self.state.conflict_budget = x;
    }
    /// set the propagation budget; a negative value lifts the bound.
    pub fn set_propagation_budget(&mut self, x: i64) {
        self.state.propagation_budget = x;
    }
    /// the inconsistent subset of the last call's assumptions, negated.
    pub fn conflict(&self) -> Vec<i32> {
        self.state
            .conflicts
            .iter()
            .map(i32::from)
            .collect::<Vec<i32>>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sat_and_unsat_vectors() {
        let mut s = Solver::try_from(vec![vec![1]]).expect("build failure");
        assert!(matches!(s.solve(), Ok(Certificate::SAT(_))));
        match Solver::try_from(vec![vec![1], vec![-1]]) {
            Ok(mut s) => assert_eq!(s.solve(), Ok(Certificate::UNSAT)),
            Err(e) => assert_eq!(e, Ok(Certificate::UNSAT)),
        }
    }
}
