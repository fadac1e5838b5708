//! Boolean constraint propagation, symmetry propagation and backjump.
use {
    super::{
        heap::VarHeapIF, AssignIF, AssignReason, AssignStack, Conflict, VarManipulateIF,
    },
    crate::{
        cdb::{ClauseDB, ClauseDBIF, ClauseRef, Watcher},
        state::{Stat, State},
        symmetry::{GeneratorId, InjectKind, SymmetryDB},
        types::*,
    },
    std::collections::HashSet,
};

/// API for Boolean constraint propagation like
/// [`propagate`](`crate::assign::PropagateIF::propagate`),
/// [`cancel_until`](`crate::assign::PropagateIF::cancel_until`) and so on.
pub trait PropagateIF {
    /// add an assignment at root level as a precondition.
    ///
    /// # Errors
    ///
    /// emits `SolverError::RootLevelConflict` if the negation already holds.
    fn assign_at_root_level(&mut self, sym: &mut SymmetryDB, l: Lit) -> MaybeInconsistent;
    /// unsafe enqueue (assign by implication); doesn't emit an exception.
    ///
    /// ## Warning
    /// Callers must assure the consistency after this assignment.
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason);
    /// unsafe assume (assign by decision); doesn't emit an exception.
    fn assign_by_decision(&mut self, l: Lit);
    /// execute *backjump*; resets the three propagation heads and shrinks
    /// the symmetrical clause store.
    fn cancel_until(&mut self, sym: &mut SymmetryDB, lvl: DecisionLevel);
    /// execute *boolean constraint propagation* interleaved with symmetry
    /// propagation until a fixpoint or a conflict.
    fn propagate(
        &mut self,
        cdb: &mut ClauseDB,
        sym: &mut SymmetryDB,
        state: &mut State,
    ) -> Option<Conflict>;
}

impl PropagateIF for AssignStack {
    fn assign_at_root_level(&mut self, sym: &mut SymmetryDB, l: Lit) -> MaybeInconsistent {
        self.cancel_until(sym, self.root_level);
        debug_assert!(self.trail_lim.is_empty());
        let vi = l.vi();
        debug_assert!(vi <= self.num_vars);
        match self.var[vi].assign {
            None => {
                self.var[vi].assign = Some(bool::from(l));
                self.var[vi].level = self.root_level;
                self.var[vi].reason = AssignReason::Decision(0);
                debug_assert!(!self.trail.contains(&!l));
                self.trail.push(l);
                Ok(())
            }
            Some(x) if x == bool::from(l) => Ok(()),
            _ => Err(SolverError::RootLevelConflict),
        }
    }
    fn assign_by_implication(&mut self, l: Lit, reason: AssignReason) {
        debug_assert!(usize::from(l) != 0, "null literal is about to be enqueued");
        let vi = l.vi();
        debug_assert!(
            self.var[vi].assign == Some(bool::from(l)) || self.var[vi].assign.is_none()
        );
        self.var[vi].assign = Some(bool::from(l));
        self.var[vi].level = self.decision_level();
        self.var[vi].reason = reason;
        debug_assert!(!self.trail.contains(&l));
        debug_assert!(!self.trail.contains(&!l));
        self.trail.push(l);
    }
    fn assign_by_decision(&mut self, l: Lit) {
        debug_assert!(!self.trail.contains(&l));
        debug_assert!(!self.trail.contains(&!l), "the trail contains a strange literal");
        self.level_up();
        let vi = l.vi();
        self.var[vi].assign = Some(bool::from(l));
        self.var[vi].level = self.decision_level();
        self.var[vi].reason = AssignReason::Decision(self.decision_level());
        self.trail.push(l);
    }
    fn cancel_until(&mut self, sym: &mut SymmetryDB, lvl: DecisionLevel) {
        if self.decision_level() <= lvl {
            return;
        }
        let lim = self.trail_lim[lvl as usize];
        let last_lim = *self.trail_lim.last().expect("no decision level");
        for c in (lim..self.trail.len()).rev() {
            let l = self.trail[c];
            let vi = l.vi();
            debug_assert!(
                self.var[vi].assign.is_some(),
                "cancel_until found unassigned var in trail {vi}",
            );
            sym.update_cancel(l);
            if 1 < self.phase_saving || (self.phase_saving == 1 && last_lim < c) {
                let b = bool::from(l);
                self.var[vi].set(FlagVar::PHASE, b);
            }
            self.var[vi].assign = None;
            self.var[vi].reason = AssignReason::None;
            self.insert_heap(vi);
        }
        self.trail.truncate(lim);
        self.trail_lim.truncate(lvl as usize);
        self.q_head = lim;
        self.q_head_sel = lim;
        self.q_head_gen = lim;
        self.watch_idx = 0;
        if lvl == self.root_level {
            sym.sel.clear();
        } else {
            let var = &self.var;
            sym.sel.truncate_above(lvl, |vi| var[vi].level);
        }
    }
    fn propagate(
        &mut self,
        cdb: &mut ClauseDB,
        sym: &mut SymmetryDB,
        state: &mut State,
    ) -> Option<Conflict> {
        let mut confl: Option<Conflict> = None;
        let mut num_props = 0;
        'restart: loop {
            //
            //## ordinary BCP over the two-watched-literal lists
            //
            while let Some(p) = self.trail.get(self.q_head).copied() {
                self.q_head += 1;
                num_props += 1;
                if sym.oracle.is_some() {
                    sym.update_notify(p);
                    if let Some(cr) = self.learnt_esbp_clause(cdb, sym, state, p) {
                        if state.config.use_stop_prop_on_esbp() {
                            self.q_head = self.trail.len();
                            confl = Some(Conflict::Cref(cr));
                            break 'restart;
                        }
                    }
                }
                let false_lit = !p;
                cdb.clean_watches(p);
                let mut ws = std::mem::take(&mut cdb.watches[usize::from(p)]);
                let mut i = 0;
                let mut j = 0;
                'next_clause: while i < ws.len() {
                    let w = ws[i];
                    // try to avoid inspecting the clause
                    if self.assigned(w.blocker) == Some(true) {
                        ws[j] = w;
                        j += 1;
                        i += 1;
                        continue;
                    }
                    // make sure the false literal is at index 1
                    let cr = w.c;
                    if cdb.ca.lit(cr, 0) == false_lit {
                        cdb.ca.swap_lits(cr, 0, 1);
                    }
                    debug_assert_eq!(cdb.ca.lit(cr, 1), false_lit);
                    i += 1;
                    // if the 0th watch is true, the clause is satisfied
                    let first = cdb.ca.lit(cr, 0);
                    let w2 = Watcher { blocker: first, c: cr };
                    if first != w.blocker && self.assigned(first) == Some(true) {
                        ws[j] = w2;
                        j += 1;
                        continue;
                    }
                    // look for a new watch
                    for k in 2..cdb.ca.len(cr) {
                        let lk = cdb.ca.lit(cr, k);
                        if self.assigned(lk) != Some(false) {
                            cdb.ca.set_lit(cr, 1, lk);
                            cdb.ca.set_lit(cr, k, false_lit);
                            cdb.watches[usize::from(!lk)].push(w2);
                            continue 'next_clause;
                        }
                    }
                    // no new watch; the clause is unit or conflicting
                    ws[j] = w2;
                    j += 1;
                    if self.assigned(first) == Some(false) {
                        confl = Some(Conflict::Cref(cr));
                        self.q_head = self.trail.len();
                        // copy the remaining watches
                        while i < ws.len() {
                            ws[j] = ws[i];
                            j += 1;
                            i += 1;
                        }
                    } else {
                        self.enqueue_implied(cdb, first, cr);
                    }
                }
                ws.truncate(j);
                cdb.watches[usize::from(p)] = ws;
                if confl.is_some() {
                    break 'restart;
                }
            }
            //
            //## re-check the stored symmetrical clauses
            //
            while self.q_head_sel < self.trail.len() {
                let prop = self.trail[self.q_head_sel];
                let mut wi = 0;
                while wi < sym.sel.watch_len(prop) {
                    let k = sym.sel.watch_at(prop, wi);
                    if sym.sel.num_clauses() <= k {
                        // no such clause anymore; drop the stale watch
                        sym.sel.watch_swap_remove(prop, wi);
                        continue;
                    }
                    let c_start = sym.sel.start(k);
                    if self.assigned(sym.sel.lit_at(c_start)) == Some(true)
                        || self.assigned(sym.sel.lit_at(c_start + 1)) == Some(true)
                    {
                        // the clause is satisfied; watches are cleaned lazily,
                        // so a stale entry may point at a true watch by accident
                        wi += 1;
                        continue;
                    }
                    // all remaining cases erase this watch
                    sym.sel.watch_swap_remove(prop, wi);
                    let mut watch = 0;
                    while watch < 2 && sym.sel.lit_at(c_start + watch) != !prop {
                        watch += 1;
                    }
                    if 2 <= watch {
                        // the watched literal became invalid, e.g. the clause
                        // was already materialized
                        continue;
                    }
                    let c_end = sym.sel.end(k);
                    let watch_abs = c_start + watch;
                    debug_assert_eq!(self.assigned(sym.sel.lit_at(watch_abs)), Some(false));
                    for t in c_start + 2..c_end {
                        if self.assigned(sym.sel.lit_at(t)) != Some(false) {
                            sym.sel.swap_lits(t, watch_abs);
                            break;
                        }
                    }
                    if self.assigned(sym.sel.lit_at(watch_abs)) != Some(false) {
                        // found a replacement; move the watch
                        let wl = !sym.sel.lit_at(watch_abs);
                        sym.sel.watch_push(wl, k);
                        continue;
                    }
                    // unit or conflicting: materialize the symmetric image of
                    // the source reason clause
                    let src = sym.sel.prop_of(k);
                    let g = sym.sel.gen_of(k);
                    let AssignReason::Implication(reason_cr) = self.var[src].reason else {
                        continue;
                    };
                    if !cdb.ca.compat_admits(reason_cr, g) {
                        continue;
                    }
                    let mut symmetrical =
                        sym.gens[g as usize].symmetrical_clause(cdb.ca.lits(reason_cr));
                    self.minimize_sel_image(cdb, state, &mut symmetrical);
                    if symmetrical.len() < 2 {
                        self.cancel_until(sym, self.root_level);
                        match self.assigned(symmetrical[0]) {
                            None => {
                                state[Stat::SymSelProp] += 1;
                                self.enqueue_root_image(symmetrical[0]);
                                continue 'restart;
                            }
                            Some(false) => {
                                state[Stat::SymSelConfl] += 1;
                                confl = Some(Conflict::RootLevel);
                                break 'restart;
                            }
                            Some(true) => continue 'restart,
                        }
                    }
                    self.prepare_watch_order(&mut symmetrical);
                    debug_assert_eq!(self.assigned(symmetrical[1]), Some(false));
                    match self.add_clause_from_symmetry(cdb, sym, reason_cr, &symmetrical) {
                        None => {
                            state[Stat::SymSelProp] += 1;
                            continue 'restart;
                        }
                        Some(cr) => {
                            state[Stat::SymSelConfl] += 1;
                            confl = Some(Conflict::Cref(cr));
                            break 'restart;
                        }
                    }
                }
                self.q_head_sel += 1;
            }
            //
            //## generate new symmetrical clauses
            //
            while self.q_head_gen < self.trail.len() {
                let cur = self.trail[self.q_head_gen];
                let vi = cur.vi();
                debug_assert_eq!(self.var[vi].level, self.decision_level());
                // level 0 propagations may lack a reason clause
                let reason_cr = match self.var[vi].reason {
                    AssignReason::Implication(cr) if 0 < self.var[vi].level => Some(cr),
                    _ => None,
                };
                if let Some(reason_cr) = reason_cr {
                    let num_moving = sym.generators_for(vi).len();
                    while self.watch_idx < num_moving {
                        let g = sym.generators_for(vi)[self.watch_idx];
                        debug_assert!(sym.gens[g as usize].permutes(Lit::from((vi, true))));
                        if !cdb.ca.compat_admits(reason_cr, g) {
                            self.watch_idx += 1;
                            continue;
                        }
                        let result = self.add_sel_clause(cdb, sym, g, cur);
                        if result < 2 {
                            // the symmetric image is already unit or conflicting
                            let mut symmetrical =
                                sym.gens[g as usize].symmetrical_clause(cdb.ca.lits(reason_cr));
                            self.minimize_sel_image(cdb, state, &mut symmetrical);
                            if symmetrical.len() < 2 {
                                self.cancel_until(sym, self.root_level);
                                match self.assigned(symmetrical[0]) {
                                    None => {
                                        state[Stat::SymGenProp] += 1;
                                        self.enqueue_root_image(symmetrical[0]);
                                        continue 'restart;
                                    }
                                    Some(false) => {
                                        state[Stat::SymGenConfl] += 1;
                                        confl = Some(Conflict::RootLevel);
                                        break 'restart;
                                    }
                                    Some(true) => continue 'restart,
                                }
                            }
                            self.prepare_watch_order(&mut symmetrical);
                            debug_assert_eq!(self.assigned(symmetrical[1]), Some(false));
                            match self.add_clause_from_symmetry(cdb, sym, reason_cr, &symmetrical)
                            {
                                None => {
                                    // a unit at some level may have turned
                                    // conflicting at a higher one; both restart
                                    state[Stat::SymGenProp] += 1;
                                    continue 'restart;
                                }
                                Some(cr) => {
                                    state[Stat::SymGenConfl] += 1;
                                    confl = Some(Conflict::Cref(cr));
                                    break 'restart;
                                }
                            }
                        }
                        self.watch_idx += 1;
                    }
                }
                self.q_head_gen += 1;
                self.watch_idx = 0;
            }
            debug_assert!(test_sel_clauses(self, cdb, sym));
            break 'restart;
        }
        state[Stat::Propagation] += num_props;
        confl
    }
}

impl AssignStack {
    /// enqueue an implied literal, tainting it when a level-0 derivation
    /// goes through the symmetry subsystem.
    fn enqueue_implied(&mut self, cdb: &ClauseDB, l: Lit, cr: ClauseRef) {
        self.assign_by_implication(l, AssignReason::Implication(cr));
        if self.decision_level() == 0
            && (cdb.ca.is_symmetry(cr)
                || cdb.ca.lits(cr).iter().any(|q| self.is_forbidden(!*q)))
        {
            self.taint_root_unit(l);
        }
    }
    /// enqueue a materialized symmetrical unit at the root level. Having
    /// no reason clause, it stays outside the forbidden-unit set.
    fn enqueue_root_image(&mut self, l: Lit) {
        debug_assert_eq!(self.decision_level(), self.root_level);
        self.assign_by_implication(l, AssignReason::Decision(0));
    }
    /// reorder a symmetric image so that a true literal comes first;
    /// failing that, two unknowns; failing that, one unknown and the
    /// highest false; failing that, the two highest false literals.
    fn prepare_watch_order(&self, c: &mut [Lit]) {
        debug_assert!(!c.is_empty());
        if self.assigned(c[0]) == Some(true) {
            return;
        }
        for i in 1..c.len() {
            match self.assigned(c[i]) {
                Some(true) => return,
                None => {
                    if self.assigned(c[0]).is_none() {
                        c.swap(1, i);
                        return;
                    }
                    c.swap(0, i);
                    c.swap(i, 1);
                }
                Some(false) => {
                    if self.assigned(c[0]) == Some(false)
                        && self.var[c[0].vi()].level < self.var[c[i].vi()].level
                    {
                        c.swap(0, i);
                        c.swap(i, 1);
                    } else if self.var[c[1].vi()].level < self.var[c[i].vi()].level {
                        debug_assert_eq!(self.assigned(c[1]), Some(false));
                        c.swap(1, i);
                    }
                }
            }
        }
    }
    /// install a materialized symmetric image as a learnt clause, backtrack
    /// to its second-highest level and enqueue its head if it is open.
    /// Returns the clause on conflict.
    fn add_clause_from_symmetry(
        &mut self,
        cdb: &mut ClauseDB,
        sym: &mut SymmetryDB,
        source: ClauseRef,
        symmetrical: &[Lit],
    ) -> Option<ClauseRef> {
        debug_assert!(1 < symmetrical.len());
        let compat = cdb.ca.compat(source).map(<[GeneratorId]>::to_vec);
        let cr = cdb.new_clause(symmetrical, true, true, compat.as_deref());
        cdb.bump_activity(cr);
        let btl = self.var[symmetrical[1].vi()].level;
        self.cancel_until(sym, btl);
        debug_assert_eq!(self.assigned(symmetrical[1]), Some(false));
        if self.assigned(symmetrical[0]).is_none() {
            self.enqueue_implied(cdb, symmetrical[0], cr);
            return None;
        }
        debug_assert_eq!(self.assigned(symmetrical[0]), Some(false));
        Some(cr)
    }
    /// record the Undef images of `l`'s reason clause as a watched
    /// symmetrical clause. Returns 2 if the image is satisfied (nothing
    /// stored), 3 if a clause was stored, and the number of open literals
    /// (0 or 1) if the image is already conflicting or unit.
    fn add_sel_clause(
        &mut self,
        cdb: &ClauseDB,
        sym: &mut SymmetryDB,
        g: GeneratorId,
        l: Lit,
    ) -> usize {
        let AssignReason::Implication(reason_cr) = self.var[l.vi()].reason else {
            unreachable!("sel generation on a decision literal");
        };
        let gen = &sym.gens[g as usize];
        let lits = cdb.ca.lits(reason_cr);
        if lits.iter().any(|li| self.assigned(gen.image(*li)) == Some(true)) {
            return 2;
        }
        for li in lits {
            let img = gen.image(*li);
            match self.assigned(img) {
                // false images stay false until backtrack, which drops
                // the whole clause; they can safely be left out
                Some(false) => (),
                _ => sym.sel.push_pending(img),
            }
        }
        let n = sym.sel.pending_len();
        if n < 2 {
            sym.sel.rollback_pending();
            return n;
        }
        debug_assert!(0 < self.decision_level());
        sym.sel.commit_pending(g, l.vi());
        3
    }
    /// minimize a materialized symmetric image through self-subsumption.
    /// A derivation through the symmetry subsystem keeps the clause intact.
    fn minimize_sel_image(&self, cdb: &ClauseDB, state: &State, cl: &mut Vec<Lit>) {
        if !state.config.use_minimize_sel() {
            return;
        }
        let copy = cl.clone();
        let seen = cl.iter().map(|l| l.vi()).collect::<HashSet<VarId>>();
        let mut is_symmetry = false;
        let mut i = 0;
        'scan: while i < cl.len() && 1 < cl.len() {
            let li = cl[i];
            if self.assigned(li) != Some(false) {
                i += 1;
                continue;
            }
            if self.var[li.vi()].level == 0 {
                if self.is_forbidden(!li) {
                    is_symmetry = true;
                    break 'scan;
                }
                cl.swap_remove(i);
                continue;
            }
            if let AssignReason::Implication(cr) = self.var[li.vi()].reason {
                for q in cdb.ca.lits(cr) {
                    if self.is_forbidden(!*q) {
                        is_symmetry = true;
                        break 'scan;
                    }
                    if self.var[q.vi()].level != 0 && !seen.contains(&q.vi()) {
                        i += 1;
                        continue 'scan;
                    }
                }
                if cdb.ca.is_symmetry(cr) {
                    is_symmetry = true;
                    break 'scan;
                }
                cl.swap_remove(i);
                continue;
            }
            i += 1;
        }
        if is_symmetry {
            cl.clear();
            cl.extend_from_slice(&copy);
        }
    }
    /// pull an effective symmetry-breaking predicate keyed on `p` from the
    /// oracle and attach it as a learnt symmetry clause whose compat set is
    /// its stabilizer set.
    fn learnt_esbp_clause(
        &mut self,
        cdb: &mut ClauseDB,
        sym: &mut SymmetryDB,
        state: &mut State,
        p: Lit,
    ) -> Option<ClauseRef> {
        let mut sbp = match sym.oracle.as_mut() {
            Some(o) if o.has_clause_to_inject(InjectKind::Esbp, Some(p)) => {
                o.clause_to_inject(InjectKind::Esbp, Some(p))
            }
            _ => return None,
        };
        debug_assert!(1 < sbp.len(), "the injector must not emit unit predicates");
        if sbp.len() < 2 {
            return None;
        }
        // place the deepest literal in front
        let mut max_i = 0;
        let mut lvl = self.var[sbp[0].vi()].level;
        for (i, l) in sbp.iter().enumerate().skip(2) {
            if lvl < self.var[l.vi()].level {
                max_i = i;
                lvl = self.var[l.vi()].level;
            }
        }
        if max_i != 0 {
            sbp.swap(0, max_i);
        }
        let compat = sym
            .gens
            .iter()
            .enumerate()
            .filter(|(_, g)| g.stabilize(&sbp))
            .map(|(gi, _)| gi as GeneratorId)
            .collect::<Vec<GeneratorId>>();
        let cr = cdb.new_clause(&sbp, true, true, Some(&compat));
        state[Stat::EsbpInjection] += 1;
        Some(cr)
    }
}

/// validate the symmetrical clause store against the current reason
/// clauses: stored literals must be exactly the non-false images.
/// Debug builds assert this at the end of every propagation round.
pub fn test_sel_clauses(asg: &AssignStack, cdb: &ClauseDB, sym: &SymmetryDB) -> bool {
    for k in 0..sym.sel.num_clauses() {
        let src = sym.sel.prop_of(k);
        let AssignReason::Implication(reason_cr) = asg.reason(src) else {
            return false;
        };
        let image =
            sym.gens[sym.sel.gen_of(k) as usize].symmetrical_clause(cdb.ca.lits(reason_cr));
        let image_set = image.iter().copied().collect::<HashSet<Lit>>();
        let stored = sym.sel.span(k);
        let stored_set = stored.iter().copied().collect::<HashSet<Lit>>();
        if stored.iter().any(|l| !image_set.contains(l)) {
            return false;
        }
        if image
            .iter()
            .any(|l| asg.assigned(*l) != Some(false) && !stored_set.contains(l))
        {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CNFDescription, Config};

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }
    #[test]
    fn test_assignment_stack() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 4,
            ..CNFDescription::default()
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let mut sym = SymmetryDB::instantiate(&config, &cnf);
        // [] + 1 => [1]
        assert!(asg.assign_at_root_level(&mut sym, lit(1)).is_ok());
        assert_eq!(asg.trail, vec![lit(1)]);

        // [1] + 1 => [1]
        assert!(asg.assign_at_root_level(&mut sym, lit(1)).is_ok());
        assert_eq!(asg.trail, vec![lit(1)]);

        // [1] + 2 => [1, 2]
        assert!(asg.assign_at_root_level(&mut sym, lit(2)).is_ok());
        assert_eq!(asg.trail, vec![lit(1), lit(2)]);

        // [1, 2] + -1 => ABORT & [1, 2]
        assert!(asg.assign_at_root_level(&mut sym, lit(-1)).is_err());
        assert_eq!(asg.decision_level(), 0);
        assert_eq!(asg.stack_len(), 2);

        // [1, 2] + 3 => [1, 2, 3]
        asg.assign_by_decision(lit(3));
        assert_eq!(asg.trail, vec![lit(1), lit(2), lit(3)]);
        assert_eq!(asg.decision_level(), 1);

        // [1, 2, 3] + 4 => [1, 2, 3, 4]
        asg.assign_by_decision(lit(4));
        assert_eq!(asg.decision_level(), 2);
        assert_eq!(asg.len_upto(1), 3);

        // [1, 2, 3, 4] => [1, 2, 3]
        asg.cancel_until(&mut sym, 1);
        assert_eq!(asg.trail, vec![lit(1), lit(2), lit(3)]);
        assert_eq!(asg.decision_level(), 1);
        assert_eq!(asg.assigned(lit(1)), Some(true));
        assert_eq!(asg.assigned(lit(-1)), Some(false));
        assert_eq!(asg.assigned(lit(4)), None);

        // cancel_until is idempotent
        let q = (asg.q_head, asg.q_head_sel, asg.q_head_gen);
        asg.cancel_until(&mut sym, 1);
        assert_eq!(asg.trail, vec![lit(1), lit(2), lit(3)]);
        assert_eq!(q, (asg.q_head, asg.q_head_sel, asg.q_head_gen));
    }
    #[test]
    fn test_bcp_finds_unit_and_conflict() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 3,
            ..CNFDescription::default()
        };
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let mut sym = SymmetryDB::instantiate(&config, &cnf);
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        let mut state = State::instantiate(&config, &cnf);
        cdb.new_clause(&[lit(-1), lit(2)], false, false, None);
        cdb.new_clause(&[lit(-1), lit(-2), lit(3)], false, false, None);
        asg.assign_by_decision(lit(1));
        assert!(asg.propagate(&mut cdb, &mut sym, &mut state).is_none());
        assert_eq!(asg.assigned(lit(2)), Some(true));
        assert_eq!(asg.assigned(lit(3)), Some(true));

        cdb.new_clause(&[lit(-2), lit(-3)], false, false, None);
        asg.cancel_until(&mut sym, 0);
        asg.assign_by_decision(lit(1));
        assert!(asg.propagate(&mut cdb, &mut sym, &mut state).is_some());
    }
}
