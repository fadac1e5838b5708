//! main struct AssignStack
use {
    super::{
        heap::{VarHeapIF, VarIdHeap},
        AssignReason, Var, VarManipulateIF,
    },
    crate::types::*,
    std::{collections::HashSet, fmt, ops::Range, slice::Iter},
};

/// API for assignment-stack accessors.
pub trait AssignIF {
    /// return root level.
    fn root_level(&self) -> DecisionLevel;
    /// return a literal in the stack.
    fn stack(&self, i: usize) -> Lit;
    /// return literals in the range of stack.
    fn stack_range(&self, r: Range<usize>) -> &[Lit];
    /// return the number of assignments.
    fn stack_len(&self) -> usize;
    /// return the number of assignments at a given decision level `u`.
    fn len_upto(&self, n: DecisionLevel) -> usize;
    /// return an iterator over the stack.
    fn stack_iter(&self) -> Iter<'_, Lit>;
    /// return the current decision level.
    fn decision_level(&self) -> DecisionLevel;
    /// return `true` if there are unpropagated assignments.
    fn remains(&self) -> bool;
    /// return a snapshot of the current assignment, indexed by `VarId`.
    fn assign_ref(&self) -> Vec<Option<bool>>;
    /// return `true` if the set of literals is satisfiable under the
    /// current assignment.
    fn satisfies(&self, c: &[Lit]) -> bool;
}

/// A record of assignments. It's called 'trail' in Glucose.
#[derive(Clone, Debug)]
pub struct AssignStack {
    /// vars
    pub(super) var: Vec<Var>,
    /// record of assignment
    pub(super) trail: Vec<Lit>,
    pub(super) trail_lim: Vec<usize>,
    /// the-number-of-assigned-and-propagated-vars + 1
    pub(crate) q_head: usize,
    /// propagation head for re-checking stored symmetrical clauses
    pub(crate) q_head_sel: usize,
    /// propagation head for generating new symmetrical clauses
    pub(crate) q_head_gen: usize,
    /// resumption point in the generator list of `trail[q_head_gen]`
    pub(crate) watch_idx: usize,
    pub root_level: DecisionLevel,
    pub(super) var_order: VarIdHeap,
    /// level-0 literals whose derivation involved a symmetry clause
    pub(crate) forbidden_units: HashSet<Lit>,

    //
    //## Statistics
    //
    /// the number of vars.
    pub num_vars: usize,
    /// the number of randomized decisions.
    pub num_random_decision: usize,

    //
    //## Var Rewarding
    //
    /// var activity increment
    pub(super) activity_inc: f64,
    /// var activity decay
    pub(super) activity_decay: f64,
    pub(super) random_var_freq: f64,
    pub(super) rand_seed: f64,
    pub(super) rnd_pol: bool,
    pub(super) phase_saving: i32,
}

impl Default for AssignStack {
    fn default() -> AssignStack {
        AssignStack {
            var: Vec::new(),
            trail: Vec::new(),
            trail_lim: Vec::new(),
            q_head: 0,
            q_head_sel: 0,
            q_head_gen: 0,
            watch_idx: 0,
            root_level: 0,
            var_order: VarIdHeap::default(),
            forbidden_units: HashSet::new(),
            num_vars: 0,
            num_random_decision: 0,
            activity_inc: 1.0,
            activity_decay: 0.95,
            random_var_freq: 0.0,
            rand_seed: 91_648_253.0,
            rnd_pol: false,
            phase_saving: 2,
        }
    }
}

impl Instantiate for AssignStack {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> AssignStack {
        let nv = cnf.num_of_variables;
        AssignStack {
            var: Var::new_vars(nv),
            trail: Vec::with_capacity(nv),
            var_order: VarIdHeap::new(nv),
            num_vars: nv,
            activity_decay: config.var_decay,
            random_var_freq: config.random_var_freq,
            rand_seed: config.random_seed,
            rnd_pol: config.use_rnd_pol(),
            phase_saving: config.phase_saving,
            ..AssignStack::default()
        }
    }
}

impl<'a> IntoIterator for &'a AssignStack {
    type Item = &'a Lit;
    type IntoIter = Iter<'a, Lit>;
    fn into_iter(self) -> Self::IntoIter {
        self.trail.iter()
    }
}

impl From<&AssignStack> for Vec<i32> {
    fn from(asg: &AssignStack) -> Vec<i32> {
        asg.trail.iter().map(|l| i32::from(*l)).collect::<Vec<_>>()
    }
}

impl AssignIF for AssignStack {
    fn root_level(&self) -> DecisionLevel {
        self.root_level
    }
    fn stack(&self, i: usize) -> Lit {
        self.trail[i]
    }
    fn stack_range(&self, r: Range<usize>) -> &[Lit] {
        &self.trail[r]
    }
    fn stack_len(&self) -> usize {
        self.trail.len()
    }
    fn len_upto(&self, n: DecisionLevel) -> usize {
        self.trail_lim.get(n as usize).map_or(self.trail.len(), |n| *n)
    }
    fn stack_iter(&self) -> Iter<'_, Lit> {
        self.trail.iter()
    }
    fn decision_level(&self) -> DecisionLevel {
        self.trail_lim.len() as DecisionLevel
    }
    fn remains(&self) -> bool {
        self.q_head < self.trail.len()
    }
    fn assign_ref(&self) -> Vec<Option<bool>> {
        self.var.iter().map(|v| v.assign).collect::<Vec<_>>()
    }
    fn satisfies(&self, vec: &[Lit]) -> bool {
        for l in vec {
            if self.assigned(*l) == Some(true) {
                return true;
            }
        }
        false
    }
}

impl VarManipulateIF for AssignStack {
    #[inline]
    fn assigned(&self, l: Lit) -> Option<bool> {
        match self.var[l.vi()].assign {
            Some(x) if !bool::from(l) => Some(!x),
            x => x,
        }
    }
    #[inline]
    fn assign(&self, vi: VarId) -> Option<bool> {
        self.var[vi].assign
    }
    #[inline]
    fn level(&self, vi: VarId) -> DecisionLevel {
        self.var[vi].level
    }
    #[inline]
    fn reason(&self, vi: VarId) -> AssignReason {
        self.var[vi].reason
    }
    #[inline]
    fn var(&self, vi: VarId) -> &Var {
        &self.var[vi]
    }
    #[inline]
    fn var_mut(&mut self, vi: VarId) -> &mut Var {
        &mut self.var[vi]
    }
}

impl AssignStack {
    /// record the current trail length as the start of a new decision level.
    pub fn level_up(&mut self) {
        self.trail_lim.push(self.trail.len());
    }
    /// return `true` if `l`'s level-0 derivation involved a symmetry clause.
    #[inline]
    pub fn is_forbidden(&self, l: Lit) -> bool {
        self.forbidden_units.contains(&l)
    }
    pub fn taint_root_unit(&mut self, l: Lit) {
        self.forbidden_units.insert(l);
    }
    /// pin the polarity of a var, overriding phase saving.
    pub fn set_user_polarity(&mut self, vi: VarId, pol: Option<bool>) {
        self.var[vi].user_pol = pol;
    }
    /// make a var (in)eligible for decisions.
    pub fn set_decision_var(&mut self, vi: VarId, b: bool) {
        self.var[vi].set(FlagVar::DECISION, b);
    }
    /// an estimate of the search coverage, weighting assignments by the
    /// depth of the level they were made at.
    pub fn progress_estimate(&self) -> f64 {
        if self.num_vars == 0 {
            return 1.0;
        }
        let f = 1.0 / self.num_vars as f64;
        let mut progress = 0.0;
        for i in 0..=self.decision_level() {
            let beg = if i == 0 {
                0
            } else {
                self.trail_lim[i as usize - 1]
            };
            let end = self.len_upto(i);
            progress += f.powi(i as i32) * (end - beg) as f64;
        }
        progress * f
    }
    /// create one more var and return its id.
    pub fn add_var(&mut self) -> VarId {
        self.var.push(Var::default());
        self.num_vars += 1;
        self.var_order.expand();
        self.insert_heap(self.num_vars);
        self.num_vars
    }
}

impl fmt::Display for AssignStack {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let v = self.trail.iter().map(|l| i32::from(*l)).collect::<Vec<_>>();
        write!(
            f,
            "ASG:: trail({}):{:?}\n      level: {}",
            self.trail.len(),
            &v,
            self.decision_level(),
        )
    }
}
