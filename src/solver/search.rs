//! Conflict-driven clause learning search engine.
use {
    super::{
        conflict::{analyze_final, handle_conflict},
        restart::RestartIF,
        Certificate, Solver, SolverResult,
    },
    crate::{
        assign::{
            AssignIF, AssignStack, Conflict, PropagateIF, VarManipulateIF, VarSelectIF,
        },
        cdb::{ClauseDB, ClauseDBIF},
        state::{Stat, State},
        symmetry::{InjectKind, OrderMode, SymmetryDB, ValueMode},
        types::*,
    },
};

/// API for running the search; the entry points the solver façade calls.
pub trait SatSolverSearchIF {
    /// search an assignment under assumptions; on UNSAT,
    /// `state.conflicts` holds an inconsistent subset of them, negated.
    ///
    /// # Errors
    ///
    /// if solver becomes inconsistent by an internal error.
    fn solver_solve(&mut self, assumptions: &[i32]) -> SolverResult;
}

impl SatSolverSearchIF for Solver {
    fn solver_solve(&mut self, assumptions: &[i32]) -> SolverResult {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut sym,
            ref mut rst,
            ref mut state,
        } = self;
        state.conflicts.clear();
        if !state.ok {
            return Ok(Certificate::UNSAT);
        }
        cdb.check_size()?;
        let assumptions = assumptions
            .iter()
            .map(|i| Lit::from(*i))
            .collect::<Vec<Lit>>();

        if state[Stat::Solve] == 0 {
            //
            //## initial branching heuristic from literal occurrences
            //
            let occs = cdb.occurrence_weights(asg.num_vars);
            asg.initialize_heuristic(&occs);
        }
        state[Stat::Solve] += 1;

        //
        //## symmetry setup
        //
        sym.initiate_gen_watches(asg.num_vars);
        if sym.oracle.is_some() {
            if let Some(oracle) = sym.oracle.as_mut() {
                oracle.enable(OrderMode::Auto, ValueMode::TrueLessFalse);
                if !state.config.quiet_mode {
                    oracle.print_info();
                }
            }
            // the oracle must see the units deduced while loading
            for i in 0..asg.stack_len() {
                let l = asg.stack(i);
                sym.update_notify(l);
            }
            inject_units(asg, sym);
        }

        cdb.max_learnts =
            ((cdb.num_clauses as f64) * cdb.learntsize_factor).max(state.config.min_learnts_lim as f64);
        cdb.learntsize_adjust_confl = 100.0;
        cdb.learntsize_adjust_cnt = 100;

        //
        //## search
        //
        rst.reset();
        let mut status: Option<bool> = None;
        while status.is_none() {
            let budget = rst.next_budget();
            status = search(asg, cdb, sym, state, &assumptions, budget)?;
            if !state.within_budget() {
                break;
            }
        }
        state.flush("");
        state[Stat::RandomDecision] = asg.num_random_decision;
        match status {
            Some(true) => {
                state.model = asg.assign_ref();
                if cdb.validate(&state.model, false).is_some() {
                    return Err(SolverError::SolverBug);
                }
                let vals = (1..=asg.num_vars)
                    .map(|vi| i32::from(Lit::from((vi, state.model[vi] == Some(true)))))
                    .collect::<Vec<i32>>();
                asg.cancel_until(sym, asg.root_level);
                Ok(Certificate::SAT(vals))
            }
            Some(false) => {
                if state.conflicts.is_empty() {
                    state.ok = false;
                }
                asg.cancel_until(sym, asg.root_level);
                Ok(Certificate::UNSAT)
            }
            None => {
                asg.cancel_until(sym, asg.root_level);
                Err(SolverError::OutOfBudget)
            }
        }
    }
}

/// pull unit facts from the symmetry oracle at the start of a solve call.
/// Injected units are tainted as forbidden units.
fn inject_units(asg: &mut AssignStack, sym: &mut SymmetryDB) {
    loop {
        let lits = match sym.oracle.as_mut() {
            Some(o) if o.has_clause_to_inject(InjectKind::Units, None) => {
                o.clause_to_inject(InjectKind::Units, None)
            }
            _ => return,
        };
        debug_assert_eq!(lits.len(), 1);
        let Some(l) = lits.first().copied() else {
            return;
        };
        asg.taint_root_unit(l);
        if asg.assigned(l).is_none() {
            asg.assign_by_implication(l, crate::assign::AssignReason::Decision(0));
        }
    }
}

/// search for a model until the conflict budget runs out.
/// Returns `Ok(Some(true))` on SAT, `Ok(Some(false))` on UNSAT and
/// `Ok(None)` when the budget was exhausted.
fn search(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    sym: &mut SymmetryDB,
    state: &mut State,
    assumptions: &[Lit],
    nof_conflicts: usize,
) -> Result<Option<bool>, SolverError> {
    let mut conflict_c = 0;
    state[Stat::Restart] += 1;
    loop {
        let confl = asg.propagate(cdb, sym, state);
        match confl {
            Some(Conflict::RootLevel) => {
                // a symmetrical unit turned out false at the root
                return Ok(Some(false));
            }
            Some(Conflict::Cref(cc)) => {
                debug_assert!(
                    cdb.ca.lits(cc).iter().all(|l| asg.assigned(*l) == Some(false)),
                    "conflict clause is not falsified"
                );
                state[Stat::Conflict] += 1;
                conflict_c += 1;
                if asg.decision_level() == asg.root_level() {
                    return Ok(Some(false));
                }
                match handle_conflict(asg, cdb, sym, state, cc) {
                    Err(SolverError::RootLevelConflict) => return Ok(Some(false)),
                    Err(e) => return Err(e),
                    Ok(_) => (),
                }
            }
            None => {
                // NO CONFLICT
                if nof_conflicts <= conflict_c || !state.within_budget() {
                    // reached bound on the number of conflicts
                    state.progress_estimate = asg.progress_estimate();
                    asg.cancel_until(sym, asg.root_level);
                    return Ok(None);
                }
                // simplify the set of problem clauses
                if asg.decision_level() == asg.root_level()
                    && !simplify(asg, cdb, sym, state)
                {
                    return Ok(Some(false));
                }
                if state.config.use_reduce()
                    && cdb.max_learnts + asg.stack_len() as f64 <= cdb.learnts.len() as f64
                {
                    cdb.reduce(asg);
                    state[Stat::Reduction] += 1;
                }
                let mut next = None;
                while (asg.decision_level() as usize) < assumptions.len() {
                    // perform a user provided assumption
                    let p = assumptions[asg.decision_level() as usize];
                    match asg.assigned(p) {
                        Some(true) => {
                            // dummy decision level
                            asg.level_up();
                        }
                        Some(false) => {
                            analyze_final(asg, cdb, state, !p);
                            return Ok(Some(false));
                        }
                        None => {
                            next = Some(p);
                            break;
                        }
                    }
                }
                if next.is_none() {
                    // new variable decision
                    state[Stat::Decision] += 1;
                    next = asg.select_decision_literal();
                }
                match next {
                    None => return Ok(Some(true)), // model found
                    Some(l) => asg.assign_by_decision(l),
                }
            }
        }
    }
}

/// simplify the clause database according to the root-level assignment.
fn simplify(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    sym: &mut SymmetryDB,
    state: &mut State,
) -> bool {
    debug_assert_eq!(asg.decision_level(), asg.root_level());
    if !state.ok || asg.propagate(cdb, sym, state).is_some() {
        state.ok = false;
        return false;
    }
    if asg.stack_len() == cdb.simp_db_assigns {
        return true;
    }
    cdb.remove_satisfied(asg, true);
    if cdb.remove_satisfied_clauses {
        cdb.remove_satisfied(asg, false);
    }
    cdb.check_garbage(asg);
    asg.rebuild_order();
    cdb.simp_db_assigns = asg.stack_len();
    state[Stat::Simplification] += 1;
    true
}
