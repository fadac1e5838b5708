//! Module `symmetry` provides the symmetry generators, the store of
//! symmetrical learnt clauses and the clause-injection capability.
/// reader for the BreakID generator format
pub mod breakid;
/// permutations of literals
mod generator;
/// the external clause injector capability
mod injector;
/// symmetrical learnt clause store
mod sel;

pub use self::{
    breakid::load_generators,
    generator::SymGenerator,
    injector::{InjectKind, OrderMode, SymmetryOracle, ValueMode},
    sel::SelStore,
};

use {
    crate::types::*,
    std::fmt,
};

/// Index of a generator in [`SymmetryDB::gens`].
pub type GeneratorId = u32;

/// The solver-side symmetry state: the generators, a per-variable index of
/// the generators moving it, the store of symmetrical learnt clauses and
/// an optional external clause injector.
pub struct SymmetryDB {
    /// the installed generators
    pub gens: Vec<SymGenerator>,
    /// flattened per-var slices of generators moving the var
    gen_watches: Vec<GeneratorId>,
    /// `gen_watches[gen_watch_indices[v]..gen_watch_indices[v + 1]]`
    /// holds the generators moving var `v`
    gen_watch_indices: Vec<usize>,
    /// the symmetrical learnt clause store
    pub sel: SelStore,
    /// the external symmetry-breaking oracle, if any
    pub oracle: Option<Box<dyn SymmetryOracle>>,
}

// `Box<dyn SymmetryOracle>` has no `Debug`; summarize instead.
impl fmt::Debug for SymmetryDB {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "SymmetryDB(gens: {}, sel: {}, oracle: {})",
            self.gens.len(),
            self.sel.num_clauses(),
            self.oracle.is_some(),
        )
    }
}

impl Default for SymmetryDB {
    fn default() -> SymmetryDB {
        SymmetryDB {
            gens: Vec::new(),
            gen_watches: Vec::new(),
            gen_watch_indices: vec![0],
            sel: SelStore::default(),
            oracle: None,
        }
    }
}

impl Instantiate for SymmetryDB {
    fn instantiate(_config: &Config, cnf: &CNFDescription) -> SymmetryDB {
        SymmetryDB {
            sel: SelStore::new(cnf.num_of_variables),
            ..SymmetryDB::default()
        }
    }
}

impl SymmetryDB {
    pub fn add_generator(&mut self, g: SymGenerator) {
        self.gens.push(g);
    }
    pub fn num_generators(&self) -> usize {
        self.gens.len()
    }
    /// rebuild the per-var generator index; must run before searching.
    pub fn initiate_gen_watches(&mut self, num_vars: usize) {
        self.gen_watches.clear();
        self.gen_watch_indices.clear();
        self.gen_watch_indices.push(0);
        for vi in 1..=num_vars {
            let l = Lit::from((vi, true));
            for (gi, g) in self.gens.iter().enumerate() {
                if g.permutes(l) {
                    self.gen_watches.push(gi as GeneratorId);
                }
            }
            self.gen_watch_indices.push(self.gen_watches.len());
        }
    }
    /// the generators moving var `v`; empty before `initiate_gen_watches`.
    pub fn generators_for(&self, vi: VarId) -> &[GeneratorId] {
        if self.gen_watch_indices.len() <= vi {
            return &[];
        }
        &self.gen_watches[self.gen_watch_indices[vi - 1]..self.gen_watch_indices[vi]]
    }
    pub fn update_notify(&mut self, l: Lit) {
        if let Some(oracle) = self.oracle.as_mut() {
            oracle.update_notify(l);
        }
    }
    pub fn update_cancel(&mut self, l: Lit) {
        if let Some(oracle) = self.oracle.as_mut() {
            oracle.update_cancel(l);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_watches() {
        let cnf = CNFDescription {
            num_of_variables: 4,
            ..CNFDescription::default()
        };
        let mut sym = SymmetryDB::instantiate(&Config::default(), &cnf);
        sym.add_generator(SymGenerator::from_cycles(4, &[vec![1, 2]]));
        sym.add_generator(SymGenerator::from_cycles(4, &[vec![2, 3]]));
        sym.initiate_gen_watches(4);
        assert_eq!(sym.generators_for(1), &[0]);
        assert_eq!(sym.generators_for(2), &[0, 1]);
        assert_eq!(sym.generators_for(3), &[1]);
        assert!(sym.generators_for(4).is_empty());
    }
}
