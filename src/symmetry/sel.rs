//! Storage of symmetrical learnt clauses, watched lazily until they
//! become unit or conflicting.
use {
    super::GeneratorId,
    crate::types::*,
};

/// A flat store of symmetrical learnt clauses. Clause `k` spans
/// `lits[idx[k]..idx[k + 1]]`, was produced by generator `gen[k]` from the
/// reason clause of var `prop[k]`, and is watched through the negations of
/// its first two literals at insertion time.
#[derive(Clone, Debug)]
pub struct SelStore {
    lits: Vec<Lit>,
    /// prefix sums of clause spans; one entry more than clauses
    idx: Vec<usize>,
    gen: Vec<GeneratorId>,
    prop: Vec<VarId>,
    /// watch lists, indexed by the just-assigned literal
    watches: Vec<Vec<usize>>,
}

impl Default for SelStore {
    fn default() -> SelStore {
        SelStore::new(0)
    }
}

impl SelStore {
    pub fn new(num_vars: usize) -> SelStore {
        SelStore {
            lits: Vec::new(),
            idx: vec![0],
            gen: Vec::new(),
            prop: Vec::new(),
            watches: vec![Vec::new(); 2 * (num_vars + 1)],
        }
    }
    pub fn num_clauses(&self) -> usize {
        self.prop.len()
    }
    /// make room for the watch lists of one more var.
    pub fn expand_var(&mut self) {
        self.watches.push(Vec::new());
        self.watches.push(Vec::new());
    }
    #[inline]
    pub fn start(&self, k: usize) -> usize {
        self.idx[k]
    }
    #[inline]
    pub fn end(&self, k: usize) -> usize {
        self.idx[k + 1]
    }
    #[inline]
    pub fn lit_at(&self, abs: usize) -> Lit {
        self.lits[abs]
    }
    pub fn swap_lits(&mut self, i: usize, j: usize) {
        self.lits.swap(i, j);
    }
    #[inline]
    pub fn gen_of(&self, k: usize) -> GeneratorId {
        self.gen[k]
    }
    #[inline]
    pub fn prop_of(&self, k: usize) -> VarId {
        self.prop[k]
    }
    pub fn span(&self, k: usize) -> &[Lit] {
        &self.lits[self.idx[k]..self.idx[k + 1]]
    }

    //
    //## watch lists
    //
    pub fn watch_len(&self, l: Lit) -> usize {
        self.watches[usize::from(l)].len()
    }
    pub fn watch_at(&self, l: Lit, i: usize) -> usize {
        self.watches[usize::from(l)][i]
    }
    pub fn watch_swap_remove(&mut self, l: Lit, i: usize) {
        self.watches[usize::from(l)].swap_remove(i);
    }
    /// watch clause `k` through literal `l`, firing when `l` is assigned.
    pub fn watch_push(&mut self, l: Lit, k: usize) {
        self.watches[usize::from(l)].push(k);
    }

    //
    //## clause construction
    //
    /// the length the pending span would have so far.
    pub fn pending_len(&self) -> usize {
        self.lits.len() - *self.idx.last().expect("no prefix sum")
    }
    pub fn push_pending(&mut self, l: Lit) {
        self.lits.push(l);
    }
    /// drop an uncommitted span.
    pub fn rollback_pending(&mut self) {
        let bottom = *self.idx.last().expect("no prefix sum");
        self.lits.truncate(bottom);
    }
    /// close the pending span as a new watched clause.
    pub fn commit_pending(&mut self, g: GeneratorId, v: VarId) -> usize {
        let k = self.prop.len();
        let bottom = *self.idx.last().expect("no prefix sum");
        debug_assert!(2 <= self.lits.len() - bottom);
        let w0 = !self.lits[bottom];
        let w1 = !self.lits[bottom + 1];
        self.watch_push(w0, k);
        self.watch_push(w1, k);
        self.idx.push(self.lits.len());
        self.gen.push(g);
        self.prop.push(v);
        k
    }

    //
    //## backtracking
    //
    /// wipe everything, watches included; used on backtracks to level 0.
    pub fn clear(&mut self) {
        for w in self.watches.iter_mut() {
            w.clear();
        }
        self.lits.clear();
        self.idx.clear();
        self.idx.push(0);
        self.gen.clear();
        self.prop.clear();
    }
    /// drop the clauses produced for vars above the backtrack level.
    /// `level` reports the assignment level of a var. Stale watch entries
    /// are left behind and reclaimed lazily during propagation.
    pub fn truncate_above<F>(&mut self, lvl: DecisionLevel, level: F)
    where
        F: Fn(VarId) -> DecisionLevel,
    {
        while self.prop.last().map_or(false, |v| lvl < level(*v)) {
            self.prop.pop();
        }
        let n = self.prop.len();
        self.gen.truncate(n);
        self.idx.truncate(n + 1);
        self.lits.truncate(*self.idx.last().expect("no prefix sum"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(i: i32) -> Lit {
        Lit::from(i)
    }
    #[test]
    fn test_commit_and_truncate() {
        let mut sel = SelStore::new(4);
        sel.push_pending(lit(1));
        sel.push_pending(lit(-3));
        sel.push_pending(lit(4));
        assert_eq!(sel.pending_len(), 3);
        let k = sel.commit_pending(0, 2);
        assert_eq!(k, 0);
        assert_eq!(sel.num_clauses(), 1);
        assert_eq!(sel.span(0), &[lit(1), lit(-3), lit(4)][..]);
        assert_eq!(sel.watch_len(lit(-1)), 1);
        assert_eq!(sel.watch_len(lit(3)), 1);

        sel.push_pending(lit(2));
        sel.rollback_pending();
        assert_eq!(sel.pending_len(), 0);

        sel.push_pending(lit(-2));
        sel.push_pending(lit(1));
        sel.commit_pending(1, 4);
        assert_eq!(sel.num_clauses(), 2);

        // var 4 was assigned at level 3, var 2 at level 1
        sel.truncate_above(2, |v| if v == 4 { 3 } else { 1 });
        assert_eq!(sel.num_clauses(), 1);
        assert_eq!(sel.span(0), &[lit(1), lit(-3), lit(4)][..]);

        sel.clear();
        assert_eq!(sel.num_clauses(), 0);
        assert_eq!(sel.watch_len(lit(-1)), 0);
    }
}
