//! A model checker over the loaded clause set.
use crate::{
    assign::{PropagateIF, VarManipulateIF},
    solver::Solver,
    types::{Lit, MaybeInconsistent, SolverError},
};

/// API for assignment validation like
/// [`inject_assignment`](`crate::solver::ValidateIF::inject_assignment`)
/// and [`validate`](`crate::solver::ValidateIF::validate`).
pub trait ValidateIF {
    /// load an assignment set into the solver.
    ///
    /// # Errors
    ///
    /// if the assignment is inconsistent with the clauses.
    fn inject_assignment(&mut self, vec: &[i32]) -> MaybeInconsistent;
    /// return `None` if the loaded assignment is a model of the problem;
    /// otherwise some falsified clause, in DIMACS form.
    fn validate(&self) -> Option<Vec<i32>>;
}

impl ValidateIF for Solver {
    fn inject_assignment(&mut self, vec: &[i32]) -> MaybeInconsistent {
        if vec.is_empty() {
            return Err(SolverError::Inconsistent);
        }
        for i in vec {
            self.asg
                .assign_at_root_level(&mut self.sym, Lit::from(*i))?;
        }
        Ok(())
    }
    fn validate(&self) -> Option<Vec<i32>> {
        let model = (0..=self.asg.num_vars)
            .map(|vi| self.asg.assign(vi))
            .collect::<Vec<_>>();
        self.cdb
            .validate(&model, true)
            .map(|cr| self.cdb.ca.lits(cr).iter().map(i32::from).collect())
    }
}
