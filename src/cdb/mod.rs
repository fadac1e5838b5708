//! Module `cdb` provides `clause` object and its manager `ClauseDB`
/// storage of clauses
mod arena;
/// methods on watcher lists
mod watch;

pub use self::{
    arena::{ClauseArena, ClauseRef},
    watch::{WatchDBIF, Watcher, WatcherList},
};

use {
    crate::{
        assign::{AssignIF, AssignReason, AssignStack, VarManipulateIF},
        symmetry::GeneratorId,
        types::*,
    },
    std::collections::HashSet,
};

/// API for clause management like [`attach_clause`](`crate::cdb::ClauseDBIF::attach_clause`), [`garbage_collect`](`crate::cdb::ClauseDBIF::garbage_collect`) and so on.
pub trait ClauseDBIF {
    /// allocate a new clause, register it and attach its watches.
    fn new_clause(
        &mut self,
        lits: &[Lit],
        learnt: bool,
        symmetry: bool,
        compat: Option<&[GeneratorId]>,
    ) -> ClauseRef;
    /// detach, mark dead and free a clause.
    fn remove_clause(&mut self, asg: &mut AssignStack, cr: ClauseRef);
    /// return `true` if the clause is the reason of a live assignment.
    fn locked(&self, asg: &AssignStack, cr: ClauseRef) -> bool;
    /// return `true` if some literal of the clause is true.
    fn satisfied(&self, asg: &AssignStack, cr: ClauseRef) -> bool;
    /// bump the clause's activity.
    fn bump_activity(&mut self, cr: ClauseRef);
    /// decay clause activities by scaling up the increment.
    fn decay_activity(&mut self);
    /// drop the lower half of the learnt DB.
    fn reduce(&mut self, asg: &mut AssignStack);
    /// remove satisfied clauses from a registry at the root level.
    fn remove_satisfied(&mut self, asg: &mut AssignStack, learnts: bool);
    /// run a garbage collection if enough of the arena is wasted.
    fn check_garbage(&mut self, asg: &mut AssignStack);
    /// copy live clauses into a fresh arena and rewrite every handle.
    fn garbage_collect(&mut self, asg: &mut AssignStack);
    /// check the arena size against the memory limit.
    fn check_size(&self) -> MaybeInconsistent;
}

/// Clause database.
#[derive(Clone, Debug)]
pub struct ClauseDB {
    /// clause storage
    pub ca: ClauseArena,
    /// watcher lists, indexed by watching literal
    pub watches: Vec<WatcherList>,
    /// literals whose watcher list holds watchers of dead clauses
    dirty: Vec<bool>,
    dirties: Vec<Lit>,
    /// registry of problem clauses
    pub clauses: Vec<ClauseRef>,
    /// registry of learnt clauses
    pub learnts: Vec<ClauseRef>,
    activity_inc: f64,
    activity_decay: f64,
    garbage_frac: f64,
    /// the number of live problem clauses
    pub num_clauses: usize,
    /// the number of live learnt clauses
    pub num_learnts: usize,
    clauses_literals: usize,
    learnts_literals: usize,
    /// remove satisfied problem clauses during simplification
    pub remove_satisfied_clauses: bool,
    /// learnt DB size limit; grows per adjustment epoch
    pub max_learnts: f64,
    pub learntsize_adjust_confl: f64,
    pub learntsize_adjust_cnt: i64,
    pub learntsize_factor: f64,
    pub learntsize_inc: f64,
    /// trail length at the last simplification
    pub simp_db_assigns: usize,
}

impl Default for ClauseDB {
    fn default() -> ClauseDB {
        ClauseDB {
            ca: ClauseArena::default(),
            watches: Vec::new(),
            dirty: Vec::new(),
            dirties: Vec::new(),
            clauses: Vec::new(),
            learnts: Vec::new(),
            activity_inc: 1.0,
            activity_decay: 0.999,
            garbage_frac: 0.20,
            num_clauses: 0,
            num_learnts: 0,
            clauses_literals: 0,
            learnts_literals: 0,
            remove_satisfied_clauses: true,
            max_learnts: 0.0,
            learntsize_adjust_confl: 100.0,
            learntsize_adjust_cnt: 100,
            learntsize_factor: 1.0 / 3.0,
            learntsize_inc: 1.1,
            simp_db_assigns: usize::MAX,
        }
    }
}

impl Instantiate for ClauseDB {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> ClauseDB {
        let nv = cnf.num_of_variables;
        ClauseDB {
            ca: ClauseArena::with_capacity(4 * cnf.num_of_clauses),
            watches: vec![Vec::new(); 2 * (nv + 1)],
            dirty: vec![false; 2 * (nv + 1)],
            activity_decay: config.clause_decay,
            garbage_frac: config.garbage_frac,
            ..ClauseDB::default()
        }
    }
}

impl ClauseDBIF for ClauseDB {
    fn new_clause(
        &mut self,
        lits: &[Lit],
        learnt: bool,
        symmetry: bool,
        compat: Option<&[GeneratorId]>,
    ) -> ClauseRef {
        debug_assert!(1 < lits.len());
        let cr = self.ca.alloc(lits, learnt, symmetry, compat);
        if learnt {
            self.learnts.push(cr);
        } else {
            self.clauses.push(cr);
        }
        self.attach_clause(cr);
        cr
    }
    fn remove_clause(&mut self, asg: &mut AssignStack, cr: ClauseRef) {
        self.detach_clause(cr);
        if self.locked(asg, cr) {
            asg.var_mut(self.ca.lit(cr, 0).vi()).reason = AssignReason::None;
        }
        self.ca.mark_dead(cr);
        self.ca.free(cr);
    }
    fn locked(&self, asg: &AssignStack, cr: ClauseRef) -> bool {
        let l0 = self.ca.lit(cr, 0);
        asg.assigned(l0) == Some(true)
            && asg.reason(l0.vi()) == AssignReason::Implication(cr)
    }
    fn satisfied(&self, asg: &AssignStack, cr: ClauseRef) -> bool {
        self.ca.lits(cr).iter().any(|l| asg.assigned(*l) == Some(true))
    }
    fn bump_activity(&mut self, cr: ClauseRef) {
        let act = self.ca.activity(cr) + self.activity_inc;
        self.ca.set_activity(cr, act);
        if 1e20 < act {
            for i in 0..self.learnts.len() {
                let c = self.learnts[i];
                if !self.ca.is_dead(c) {
                    let a = self.ca.activity(c);
                    self.ca.set_activity(c, a * 1e-20);
                }
            }
            self.activity_inc *= 1e-20;
        }
    }
    fn decay_activity(&mut self) {
        self.activity_inc /= self.activity_decay;
    }
    fn reduce(&mut self, asg: &mut AssignStack) {
        let extra_lim = self.activity_inc / self.learnts.len().max(1) as f64;
        let mut learnts = std::mem::take(&mut self.learnts);
        // binary clauses sort last and are never removed
        learnts.sort_by(|x, y| {
            let (lx, ly) = (self.ca.len(*x), self.ca.len(*y));
            match (lx == 2, ly == 2) {
                (false, true) => std::cmp::Ordering::Less,
                (true, false) => std::cmp::Ordering::Greater,
                (true, true) => std::cmp::Ordering::Equal,
                (false, false) => self
                    .ca
                    .activity(*x)
                    .partial_cmp(&self.ca.activity(*y))
                    .unwrap_or(std::cmp::Ordering::Equal),
            }
        });
        let half = learnts.len() / 2;
        let mut j = 0;
        for i in 0..learnts.len() {
            let c = learnts[i];
            if 2 < self.ca.len(c)
                && !self.locked(asg, c)
                && (i < half || self.ca.activity(c) < extra_lim)
            {
                self.remove_clause(asg, c);
            } else {
                learnts[j] = c;
                j += 1;
            }
        }
        learnts.truncate(j);
        self.learnts = learnts;
        self.check_garbage(asg);
    }
    fn remove_satisfied(&mut self, asg: &mut AssignStack, learnts: bool) {
        let mut regs = if learnts {
            std::mem::take(&mut self.learnts)
        } else {
            std::mem::take(&mut self.clauses)
        };
        let mut j = 0;
        for i in 0..regs.len() {
            let cr = regs[i];
            if self.satisfied(asg, cr) {
                self.remove_clause(asg, cr);
            } else {
                regs[j] = cr;
                j += 1;
            }
        }
        regs.truncate(j);
        if learnts {
            self.learnts = regs;
        } else {
            self.clauses = regs;
        }
    }
    fn check_garbage(&mut self, asg: &mut AssignStack) {
        if self.garbage_frac * self.ca.size() as f64 <= self.ca.wasted() as f64 {
            self.garbage_collect(asg);
        }
    }
    fn garbage_collect(&mut self, asg: &mut AssignStack) {
        let mut to = ClauseArena::with_capacity(self.ca.size() - self.ca.wasted());
        self.clean_all();
        // all watchers
        for ws in self.watches.iter_mut() {
            for w in ws.iter_mut() {
                w.c = self.ca.reloc(w.c, &mut to);
            }
        }
        // all reasons in the trail; unassigned vars hold no clause handle
        for i in 0..asg.stack_len() {
            let vi = asg.stack(i).vi();
            if let AssignReason::Implication(cr) = asg.reason(vi) {
                debug_assert!(!self.ca.is_dead(cr));
                asg.var_mut(vi).reason = AssignReason::Implication(self.ca.reloc(cr, &mut to));
            }
        }
        // registries may still hold removed clauses; compact them here
        let mut learnts = std::mem::take(&mut self.learnts);
        learnts.retain(|cr| !self.ca.is_dead(*cr));
        for cr in learnts.iter_mut() {
            *cr = self.ca.reloc(*cr, &mut to);
        }
        self.learnts = learnts;
        let mut clauses = std::mem::take(&mut self.clauses);
        clauses.retain(|cr| !self.ca.is_dead(*cr));
        for cr in clauses.iter_mut() {
            *cr = self.ca.reloc(*cr, &mut to);
        }
        self.clauses = clauses;
        self.ca = to;
    }
    fn check_size(&self) -> MaybeInconsistent {
        if (u32::MAX >> 1) as usize <= self.ca.size() {
            return Err(SolverError::OutOfMemory);
        }
        Ok(())
    }
}

impl ClauseDB {
    pub fn attach_clause(&mut self, cr: ClauseRef) {
        debug_assert!(1 < self.ca.len(cr));
        let l0 = self.ca.lit(cr, 0);
        let l1 = self.ca.lit(cr, 1);
        self.watches[usize::from(!l0)].register(l1, cr);
        self.watches[usize::from(!l1)].register(l0, cr);
        if self.ca.is_learnt(cr) {
            self.num_learnts += 1;
            self.learnts_literals += self.ca.len(cr);
        } else {
            self.num_clauses += 1;
            self.clauses_literals += self.ca.len(cr);
        }
    }
    /// lazy detach; the watcher lists are compacted by `clean_all`.
    fn detach_clause(&mut self, cr: ClauseRef) {
        debug_assert!(1 < self.ca.len(cr));
        let l0 = self.ca.lit(cr, 0);
        let l1 = self.ca.lit(cr, 1);
        self.smudge(!l0);
        self.smudge(!l1);
        if self.ca.is_learnt(cr) {
            self.num_learnts -= 1;
            self.learnts_literals -= self.ca.len(cr);
        } else {
            self.num_clauses -= 1;
            self.clauses_literals -= self.ca.len(cr);
        }
    }
    fn smudge(&mut self, l: Lit) {
        if !self.dirty[usize::from(l)] {
            self.dirty[usize::from(l)] = true;
            self.dirties.push(l);
        }
    }
    /// make room for the watcher lists of one more var.
    pub fn expand_var(&mut self) {
        self.watches.push(Vec::new());
        self.watches.push(Vec::new());
        self.dirty.push(false);
        self.dirty.push(false);
    }
    /// drop watchers of dead clauses from the list of `l` if it was
    /// smudged; the propagator calls this before scanning a list.
    pub fn clean_watches(&mut self, l: Lit) {
        let il = usize::from(l);
        if self.dirty[il] {
            let ca = &self.ca;
            self.watches[il].retain(|w| !ca.is_dead(w.c));
            self.dirty[il] = false;
        }
    }
    /// drop watchers of dead clauses from every smudged list.
    pub fn clean_all(&mut self) {
        let dirties = std::mem::take(&mut self.dirties);
        for l in dirties {
            let ca = &self.ca;
            self.watches[usize::from(l)].retain(|w| !ca.is_dead(w.c));
            self.dirty[usize::from(l)] = false;
        }
    }
    /// returns None if the model satisfies every clause, otherwise some
    /// falsified clause. Clauses with an unassigned literal count as
    /// falsified in `strict` mode.
    pub fn validate(&self, model: &[Option<bool>], strict: bool) -> Option<ClauseRef> {
        for cr in self.clauses.iter() {
            if self.ca.is_dead(*cr) {
                continue;
            }
            let mut satisfied = false;
            for l in self.ca.lits(*cr) {
                match model[l.vi()] {
                    Some(b) if b == bool::from(*l) => {
                        satisfied = true;
                        break;
                    }
                    None if !strict => {
                        satisfied = true;
                        break;
                    }
                    _ => (),
                }
            }
            if !satisfied {
                return Some(*cr);
            }
        }
        None
    }
    /// count occurrences of each literal, weighted by `1 / |C|²`.
    pub fn occurrence_weights(&self, num_vars: usize) -> Vec<f64> {
        let mut occs = vec![0.0; 2 * (num_vars + 1)];
        for cr in self.clauses.iter() {
            if self.ca.is_dead(*cr) {
                continue;
            }
            let w = 1.0 / (self.ca.len(*cr) * self.ca.len(*cr)) as f64;
            for l in self.ca.lits(*cr) {
                occs[usize::from(*l)] += w;
            }
        }
        occs
    }
    /// assert that every live clause is watched through the negations of
    /// its first two literals; test use only.
    #[cfg(test)]
    fn watch_coherence(&self) -> bool {
        let mut watched: HashSet<(usize, ClauseRef)> = HashSet::new();
        for (il, ws) in self.watches.iter().enumerate() {
            for w in ws.iter() {
                watched.insert((il, w.c));
            }
        }
        for cr in self.clauses.iter().chain(self.learnts.iter()) {
            if self.ca.is_dead(*cr) {
                continue;
            }
            let l0 = usize::from(!self.ca.lit(*cr, 0));
            let l1 = usize::from(!self.ca.lit(*cr, 1));
            if !watched.contains(&(l0, *cr)) || !watched.contains(&(l1, *cr)) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(v: &[i32]) -> Vec<Lit> {
        v.iter().map(|i| Lit::from(*i)).collect::<Vec<_>>()
    }
    #[test]
    fn test_garbage_collection_rewrites_handles() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 6,
            num_of_clauses: 4,
            ..CNFDescription::default()
        };
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let c0 = cdb.new_clause(&lits(&[1, 2, 3]), false, false, None);
        let c1 = cdb.new_clause(&lits(&[-1, 4]), false, false, None);
        let c2 = cdb.new_clause(&lits(&[2, -5, 6]), true, true, Some(&[0]));
        let before = (
            cdb.ca.lits(c0).to_vec(),
            cdb.ca.lits(c2).to_vec(),
            cdb.ca.compat(c2).map(<[GeneratorId]>::to_vec),
        );
        cdb.remove_clause(&mut asg, c1);
        assert!(0 < cdb.ca.wasted());
        cdb.garbage_collect(&mut asg);
        assert_eq!(cdb.ca.wasted(), 0);
        assert!(cdb.watch_coherence());
        assert_eq!(cdb.clauses.len(), 1);
        assert_eq!(cdb.learnts.len(), 1);
        let (c0, c2) = (cdb.clauses[0], cdb.learnts[0]);
        assert_eq!(cdb.ca.lits(c0), &before.0[..]);
        assert_eq!(cdb.ca.lits(c2), &before.1[..]);
        assert_eq!(cdb.ca.compat(c2).map(<[GeneratorId]>::to_vec), before.2);
        assert!(cdb.ca.is_symmetry(c2) && cdb.ca.is_learnt(c2));
    }
    #[test]
    fn test_reduce_keeps_binary_and_active_clauses() {
        let config = Config::default();
        let cnf = CNFDescription {
            num_of_variables: 8,
            ..CNFDescription::default()
        };
        let mut cdb = ClauseDB::instantiate(&config, &cnf);
        let mut asg = AssignStack::instantiate(&config, &cnf);
        let bin = cdb.new_clause(&lits(&[1, 2]), true, false, None);
        for i in 3..=6i32 {
            let cr = cdb.new_clause(&lits(&[i, -(i + 1), i + 2]), true, false, None);
            cdb.ca.set_activity(cr, i as f64);
        }
        cdb.reduce(&mut asg);
        assert!(cdb.learnts.contains(&bin));
        assert!(cdb.learnts.len() < 5);
    }
}
