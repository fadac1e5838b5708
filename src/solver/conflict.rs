//! Conflict analysis: first-UIP learning with symmetry tracking.
use {
    crate::{
        assign::{
            AssignIF, AssignReason, AssignStack, PropagateIF, VarManipulateIF, VarSelectIF,
        },
        cdb::{ClauseDB, ClauseDBIF, ClauseRef},
        state::{Seen, Stat, State},
        symmetry::{GeneratorId, SymmetryDB},
        types::*,
    },
    std::collections::HashSet,
};

/// learn a clause from the conflict, backtrack and assert its head.
///
/// # Errors
///
/// emits `SolverError::RootLevelConflict` when the orbit of a learnt unit
/// is already falsified at the root level.
pub fn handle_conflict(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    sym: &mut SymmetryDB,
    state: &mut State,
    cc: ClauseRef,
) -> MaybeInconsistent {
    let Analysis { btlevel, out_sym, comp } = conflict_analyze(asg, cdb, sym, state, cc);
    asg.cancel_until(sym, btlevel);
    let new_learnt = std::mem::take(&mut state.new_learnt);
    debug_assert!(!new_learnt.is_empty());
    if new_learnt.len() == 1 {
        //
        //## a new assertion by unit learnt clause generation
        //
        let l0 = new_learnt[0];
        debug_assert_eq!(asg.decision_level(), asg.root_level());
        debug_assert_eq!(asg.assigned(l0), None);
        asg.assign_by_implication(l0, AssignReason::Decision(0));
        let unit_orbit = |asg: &mut AssignStack, gens: &[GeneratorId]| -> MaybeInconsistent {
            for gi in gens {
                let g = &sym.gens[*gi as usize];
                if g.permutes(l0) {
                    let image = g.image(l0);
                    match asg.assigned(image) {
                        None => asg.assign_by_implication(image, AssignReason::Decision(0)),
                        Some(false) => return Err(SolverError::RootLevelConflict),
                        Some(true) => (),
                    }
                }
            }
            Ok(())
        };
        let orbit_result = if out_sym {
            asg.taint_root_unit(l0);
            unit_orbit(asg, &comp)
        } else {
            let all = (0..sym.gens.len() as GeneratorId).collect::<Vec<_>>();
            unit_orbit(asg, &all)
        };
        state.new_learnt = new_learnt;
        orbit_result?;
    } else {
        let l0 = new_learnt[0];
        debug_assert_eq!(asg.assigned(l0), None);
        let cr = cdb.new_clause(&new_learnt, true, out_sym, out_sym.then_some(&comp[..]));
        cdb.bump_activity(cr);
        asg.assign_by_implication(l0, AssignReason::Implication(cr));
        state.new_learnt = new_learnt;
    }
    asg.decay_var_activity();
    cdb.decay_activity();
    cdb.learntsize_adjust_cnt -= 1;
    if cdb.learntsize_adjust_cnt == 0 {
        cdb.learntsize_adjust_confl *= cdb.learntsize_inc;
        cdb.learntsize_adjust_cnt = cdb.learntsize_adjust_confl as i64;
        cdb.max_learnts *= cdb.learntsize_inc;
    }
    Ok(())
}

struct Analysis {
    btlevel: DecisionLevel,
    out_sym: bool,
    /// generators known to commute with the learnt clause
    comp: Vec<GeneratorId>,
}

/// first-UIP conflict analysis. Produces the learnt clause in
/// `state.new_learnt` with the asserting literal first and a literal of the
/// second-highest level at index 1.
fn conflict_analyze(
    asg: &mut AssignStack,
    cdb: &mut ClauseDB,
    sym: &SymmetryDB,
    state: &mut State,
    confl: ClauseRef,
) -> Analysis {
    let dl = asg.decision_level();
    let mut learnt = std::mem::take(&mut state.new_learnt);
    learnt.clear();
    learnt.push(NULL_LIT); // reserve the slot of the asserting literal
    let mut out_sym = false;
    let mut symmetries: Vec<Vec<GeneratorId>> = Vec::new();
    let mut units: HashSet<Lit> = HashSet::new();
    let mut path_cnt = 0;
    let mut p: Option<Lit> = None;
    let mut cc = confl;
    let mut index = asg.stack_len();
    loop {
        debug_assert!(!cdb.ca.is_dead(cc));
        if cdb.ca.is_learnt(cc) {
            cdb.bump_activity(cc);
        }
        if cdb.ca.is_symmetry(cc) {
            out_sym = true;
            if let Some(compat) = cdb.ca.compat(cc) {
                symmetries.push(compat.to_vec());
            }
        }
        for j in usize::from(p.is_some())..cdb.ca.len(cc) {
            let q = cdb.ca.lit(cc, j);
            let vi = q.vi();
            if asg.level(vi) == 0 && asg.is_forbidden(!q) {
                units.insert(q);
                out_sym = true;
            }
            if state.an_seen[vi] == Seen::No && 0 < asg.level(vi) {
                asg.reward_at_analysis(vi);
                state.an_seen[vi] = Seen::Source;
                if dl <= asg.level(vi) {
                    path_cnt += 1;
                } else {
                    learnt.push(q);
                }
            }
        }
        // select the next clause to look at
        loop {
            index -= 1;
            if state.an_seen[asg.stack(index).vi()] == Seen::Source {
                break;
            }
        }
        let pp = asg.stack(index);
        state.an_seen[pp.vi()] = Seen::No;
        p = Some(pp);
        path_cnt -= 1;
        if path_cnt == 0 {
            break;
        }
        cc = match asg.reason(pp.vi()) {
            AssignReason::Implication(cr) => cr,
            _ => unreachable!("a first-UIP walk ran out of reasons"),
        };
    }
    let p = p.expect("no UIP found");
    learnt[0] = !p;

    //
    //## simplify the conflict clause
    //
    state.to_clear.clear();
    state.to_clear.extend_from_slice(&learnt);
    state[Stat::MaxLiterals] += learnt.len();
    match state.config.ccmin_mode {
        2 => {
            let mut j = 1;
            for i in 1..learnt.len() {
                let l = learnt[i];
                if !matches!(asg.reason(l.vi()), AssignReason::Implication(_))
                    || !lit_redundant(asg, cdb, state, l)
                {
                    learnt[j] = l;
                    j += 1;
                }
            }
            learnt.truncate(j);
        }
        1 => {
            let mut j = 1;
            for i in 1..learnt.len() {
                let l = learnt[i];
                match asg.reason(l.vi()) {
                    AssignReason::Implication(cr) => {
                        let tail_all_seen = cdb.ca.lits(cr).iter().skip(1).all(|q| {
                            state.an_seen[q.vi()] != Seen::No || asg.level(q.vi()) == 0
                        });
                        if !tail_all_seen {
                            learnt[j] = l;
                            j += 1;
                        }
                    }
                    _ => {
                        learnt[j] = l;
                        j += 1;
                    }
                }
            }
            learnt.truncate(j);
        }
        _ => (),
    }
    state[Stat::TotLiterals] += learnt.len();

    //
    //## find the correct backtrack level
    //
    let btlevel = if learnt.len() == 1 {
        0
    } else {
        let mut max_i = 1;
        for i in 2..learnt.len() {
            if asg.level(learnt[max_i].vi()) < asg.level(learnt[i].vi()) {
                max_i = i;
            }
        }
        learnt.swap(1, max_i);
        asg.level(learnt[1].vi())
    };
    for l in state.to_clear.drain(..) {
        state.an_seen[l.vi()] = Seen::No;
    }
    state.new_learnt = learnt;
    if !out_sym {
        return Analysis {
            btlevel,
            out_sym,
            comp: Vec::new(),
        };
    }

    //
    //## compatibility set of the learnt clause
    //
    // start from the intersection of the compat sets of every symmetry
    // clause resolved through; an empty member empties the whole set
    let mut comp: Vec<GeneratorId> = Vec::new();
    for check in &symmetries {
        if check.is_empty() {
            comp.clear();
            break;
        }
        if comp.is_empty() {
            comp = check.clone();
            continue;
        }
        comp.retain(|g| check.contains(g));
        if comp.is_empty() {
            break;
        }
    }
    // generators moving a tainted level-0 literal out of its value break
    // the equivalence
    comp.retain(|gi| {
        units.iter().all(|l| {
            let image = sym.gens[*gi as usize].image(*l);
            debug_assert_eq!(asg.level(l.vi()), 0);
            asg.assigned(image) == asg.assigned(*l) && asg.level(image.vi()) == 0
        })
    });
    // every generator stabilizing the learnt clause commutes with it
    for (gi, g) in sym.gens.iter().enumerate() {
        let gi = gi as GeneratorId;
        if !comp.contains(&gi) && g.stabilize(&state.new_learnt) {
            comp.push(gi);
        }
    }
    Analysis {
        btlevel,
        out_sym,
        comp,
    }
}

/// check whether `p` can be dropped from a conflict clause: every leaf of
/// its implication subgraph must be another marked literal, never a
/// decision. Traversing a symmetry clause or a forbidden unit keeps the
/// literal, preserving the derivation trail of the learnt clause.
fn lit_redundant(asg: &AssignStack, cdb: &ClauseDB, state: &mut State, p: Lit) -> bool {
    debug_assert!(matches!(
        state.an_seen[p.vi()],
        Seen::No | Seen::Source
    ));
    let AssignReason::Implication(mut cr) = asg.reason(p.vi()) else {
        return false;
    };
    let mut is_sym = cdb.ca.is_symmetry(cr);
    let mut p = p;
    let mut i = 1;
    let mut stack: Vec<(usize, Lit)> = Vec::new();
    loop {
        if i < cdb.ca.len(cr) {
            // checking a parent `l` of `p`
            let l = cdb.ca.lit(cr, i);
            i += 1;
            if asg.is_forbidden(!l) {
                is_sym = true;
            }
            let vi = l.vi();
            if asg.level(vi) == 0
                || state.an_seen[vi] == Seen::Source
                || state.an_seen[vi] == Seen::Removable
            {
                continue;
            }
            if !matches!(asg.reason(vi), AssignReason::Implication(_))
                || state.an_seen[vi] == Seen::Failed
            {
                // the subgraph bottoms out in a decision; everything on
                // the stack fails with it
                stack.push((0, p));
                for (_, sl) in stack.iter() {
                    if state.an_seen[sl.vi()] == Seen::No {
                        state.an_seen[sl.vi()] = Seen::Failed;
                        state.to_clear.push(*sl);
                    }
                }
                return false;
            }
            // recursively check `l`
            stack.push((i, p));
            p = l;
            let AssignReason::Implication(rcr) = asg.reason(vi) else {
                unreachable!()
            };
            cr = rcr;
            i = 1;
            if cdb.ca.is_symmetry(cr) {
                is_sym = true;
            }
        } else {
            // finished with the current `p`
            if state.an_seen[p.vi()] == Seen::No {
                state.an_seen[p.vi()] = Seen::Removable;
                state.to_clear.push(p);
            }
            let Some((ni, np)) = stack.pop() else {
                break;
            };
            i = ni;
            p = np;
            let AssignReason::Implication(rcr) = asg.reason(p.vi()) else {
                unreachable!()
            };
            cr = rcr;
            if cdb.ca.is_symmetry(cr) {
                is_sym = true;
            }
        }
    }
    !is_sym
}

/// express the final conflict in terms of assumptions: collect the
/// (negated) assumption subset that led to the falsification of `p`.
pub fn analyze_final(asg: &AssignStack, cdb: &ClauseDB, state: &mut State, p: Lit) {
    state.conflicts.clear();
    state.conflicts.push(p);
    if asg.decision_level() == 0 {
        return;
    }
    state.an_seen[p.vi()] = Seen::Source;
    for i in (asg.len_upto(0)..asg.stack_len()).rev() {
        let l = asg.stack(i);
        let vi = l.vi();
        if state.an_seen[vi] == Seen::Source {
            match asg.reason(vi) {
                AssignReason::Implication(cr) => {
                    for q in cdb.ca.lits(cr).iter().skip(1) {
                        if 0 < asg.level(q.vi()) {
                            state.an_seen[q.vi()] = Seen::Source;
                        }
                    }
                }
                _ => {
                    debug_assert!(0 < asg.level(vi));
                    state.conflicts.push(!l);
                }
            }
            state.an_seen[vi] = Seen::No;
        }
    }
    state.an_seen[p.vi()] = Seen::No;
}
