//! Decision var selection
use {
    super::{heap::VarHeapIF, AssignStack},
    crate::types::*,
};

/// API for var selection, depending on an internal heap.
pub trait VarSelectIF {
    /// select a new decision variable and its phase.
    fn select_decision_literal(&mut self) -> Option<Lit>;
    /// update the internal heap on var order.
    fn update_order(&mut self, v: VarId);
    /// rebuild the internal var_order.
    fn rebuild_order(&mut self);
    /// bump a var's activity at conflict analysis.
    fn reward_at_analysis(&mut self, vi: VarId);
    /// decay var activities by scaling up the increment.
    fn decay_var_activity(&mut self);
    /// seed activities and phases from weighted literal occurrences,
    /// indexed by `usize::from(lit)`.
    fn initialize_heuristic(&mut self, occs: &[f64]);
}

/// The original constant-seeded pseudo random number generator,
/// used only for randomized branching.
pub(crate) fn drand(seed: &mut f64) -> f64 {
    *seed *= 1_389_796.0;
    let q = (*seed / 2_147_483_647.0) as i64;
    *seed -= q as f64 * 2_147_483_647.0;
    *seed / 2_147_483_647.0
}

fn irand(seed: &mut f64, size: usize) -> usize {
    (drand(seed) * size as f64) as usize
}

impl VarSelectIF for AssignStack {
    fn select_decision_literal(&mut self) -> Option<Lit> {
        let mut next: Option<VarId> = None;
        // random decision
        if drand(&mut self.rand_seed) < self.random_var_freq && !self.var_order.is_empty() {
            let n = irand(&mut self.rand_seed, self.var_order.len());
            let vi = self.var_order.peek_at(n);
            if self.var[vi].assign.is_none() && self.var[vi].is(FlagVar::DECISION) {
                next = Some(vi);
                self.num_random_decision += 1;
            }
        }
        // activity based decision
        while next.map_or(true, |vi| {
            self.var[vi].assign.is_some() || !self.var[vi].is(FlagVar::DECISION)
        }) {
            if self.heap_is_empty() {
                return None;
            }
            next = Some(self.get_heap_root());
        }
        let vi = next.expect("no decision candidate");
        let positive = if let Some(b) = self.var[vi].user_pol {
            b
        } else if self.rnd_pol {
            drand(&mut self.rand_seed) < 0.5
        } else {
            self.var[vi].is(FlagVar::PHASE)
        };
        Some(Lit::from((vi, positive)))
    }
    fn update_order(&mut self, v: VarId) {
        self.update_heap(v);
    }
    fn rebuild_order(&mut self) {
        self.clear_heap();
        for vi in 1..=self.num_vars {
            if self.var[vi].assign.is_none() && self.var[vi].is(FlagVar::DECISION) {
                self.insert_heap(vi);
            }
        }
    }
    fn reward_at_analysis(&mut self, vi: VarId) {
        self.var[vi].activity += self.activity_inc;
        if 1e100 < self.var[vi].activity {
            for v in self.var.iter_mut().skip(1) {
                v.activity *= 1e-100;
            }
            self.activity_inc *= 1e-100;
        }
        self.update_heap(vi);
    }
    fn decay_var_activity(&mut self) {
        self.activity_inc /= self.activity_decay;
    }
    fn initialize_heuristic(&mut self, occs: &[f64]) {
        for vi in 1..=self.num_vars {
            let pos = occs[usize::from(Lit::from((vi, true)))];
            let neg = occs[usize::from(Lit::from((vi, false)))];
            self.var[vi].set(FlagVar::PHASE, neg < pos);
            self.var[vi].activity = pos * neg;
        }
        self.rebuild_order();
    }
}

impl AssignStack {
    /// seed a tiny random initial activity for a fresh var.
    pub fn randomize_activity(&mut self, vi: VarId) {
        self.var[vi].activity = drand(&mut self.rand_seed) * 0.000_01;
        self.update_heap(vi);
    }
}
