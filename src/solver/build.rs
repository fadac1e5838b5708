/// Solver Builder
use {
    super::{Solver, SolverResult},
    crate::{
        assign::{AssignIF, AssignStack, PropagateIF, VarManipulateIF},
        cdb::{ClauseDB, ClauseDBIF},
        solver::restart::Restarter,
        state::State,
        symmetry::{load_generators, SymGenerator, SymmetryDB, SymmetryOracle},
        types::*,
    },
    std::{
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
};

/// API for loading problems into a solver.
pub trait SatSolverBuildIF {
    /// make a solver and load a CNF (and a symmetry file) into it.
    ///
    /// # Errors
    ///
    /// IO error by failing to load a CNF file.
    fn solver_build(config: &Config) -> Result<Solver, SolverError>;
    /// add a vector of `Lit` as a clause to the solver, simplifying it
    /// against the root-level assignment.
    ///
    /// # Errors
    ///
    /// `SolverError::Inconsistent` if the problem became UNSAT.
    fn solver_add_unchecked_clause(&mut self, v: &mut Vec<Lit>) -> MaybeInconsistent;
}

impl Default for Solver {
    fn default() -> Solver {
        Solver::instantiate(&Config::default(), &CNFDescription::default())
    }
}

impl Instantiate for Solver {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> Solver {
        Solver {
            asg: AssignStack::instantiate(config, cnf),
            cdb: ClauseDB::instantiate(config, cnf),
            sym: SymmetryDB::instantiate(config, cnf),
            rst: Restarter::instantiate(config, cnf),
            state: State::instantiate(config, cnf),
        }
    }
}

impl TryFrom<&str> for Solver {
    type Error = SolverError;
    /// return a new solver built for a CNF file.
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let config = Config::from(s);
        Solver::solver_build(&config)
    }
}

impl TryFrom<Vec<Vec<i32>>> for Solver {
    type Error = SolverResult;
    /// return a new solver for a clause vector; `Err` holds the certificate
    /// when the problem is decided while loading.
    fn try_from(vec: Vec<Vec<i32>>) -> Result<Self, Self::Error> {
        let cnf = CNFDescription::from(&vec[..]);
        Solver::instantiate(&Config::default(), &cnf).inject_from_vec(vec)
    }
}

impl SatSolverBuildIF for Solver {
    fn solver_build(config: &Config) -> Result<Solver, SolverError> {
        let CNFReader { cnf, reader } = CNFReader::try_from(config.cnf_file.as_path())?;
        let mut solver = Solver::instantiate(config, &cnf).inject(reader)?;
        if let Some(path) = config.sym_file.as_ref() {
            if config.use_breakid() {
                for g in load_generators(path, cnf.num_of_variables)? {
                    solver.add_generator(g);
                }
            }
        }
        Ok(solver)
    }
    fn solver_add_unchecked_clause(&mut self, lits: &mut Vec<Lit>) -> MaybeInconsistent {
        let Solver {
            ref mut asg,
            ref mut cdb,
            ref mut sym,
            ref mut state,
            ..
        } = self;
        debug_assert_eq!(asg.decision_level(), asg.root_level());
        if !state.ok {
            return Err(SolverError::Inconsistent);
        }
        // simplify the clause against the root-level assignment and drop
        // duplicate literals
        lits.sort_unstable();
        let mut j = 0;
        let mut l_ = NULL_LIT; // last literal; [x, !x] means tautology
        for i in 0..lits.len() {
            let li = lits[i];
            let sat = asg.assigned(li);
            if sat == Some(true) || !li == l_ {
                return Ok(()); // already satisfied or a tautology
            } else if sat != Some(false) && li != l_ {
                lits[j] = li;
                j += 1;
                l_ = li;
            }
        }
        lits.truncate(j);
        match lits.len() {
            0 => {
                state.ok = false;
                Err(SolverError::EmptyClause)
            }
            1 => {
                if asg.assign_at_root_level(sym, lits[0]).is_err()
                    || asg.propagate(cdb, sym, state).is_some()
                {
                    state.ok = false;
                    return Err(SolverError::Inconsistent);
                }
                Ok(())
            }
            _ => {
                cdb.new_clause(lits, false, false, None);
                Ok(())
            }
        }
    }
}

impl Solver {
    /// add a clause given as a vector of DIMACS-encoded literals.
    ///
    /// # Errors
    ///
    /// `SolverError::Inconsistent` if the problem became UNSAT;
    /// `SolverError::InvalidLiteral` on an out-of-range literal.
    pub fn add_clause(&mut self, clause: Vec<i32>) -> MaybeInconsistent {
        if clause.iter().any(|l| *l == 0 || (self.asg.num_vars as i32) < l.abs()) {
            return Err(SolverError::InvalidLiteral);
        }
        let mut lits = clause.iter().map(|i| Lit::from(*i)).collect::<Vec<Lit>>();
        self.solver_add_unchecked_clause(&mut lits)
    }
    /// create one more var and return its id. The polarity, if given,
    /// overrides phase saving; a non-decision var is never branched on.
    pub fn add_var(&mut self, polarity: Option<bool>, decision: bool) -> VarId {
        let vi = self.asg.add_var();
        self.asg.set_user_polarity(vi, polarity);
        self.asg.set_decision_var(vi, decision);
        if self.state.config.use_rnd_init_act() {
            self.asg.randomize_activity(vi);
        }
        self.cdb.expand_var();
        self.sym.sel.expand_var();
        self.state.model.push(None);
        self.state.an_seen.push(crate::state::Seen::No);
        self.state.target.num_of_variables += 1;
        vi
    }
    /// install a symmetry generator.
    pub fn add_generator(&mut self, g: SymGenerator) {
        self.sym.add_generator(g);
    }
    /// install the external symmetry-breaking oracle.
    pub fn set_oracle(&mut self, oracle: Box<dyn SymmetryOracle>) {
        self.sym.oracle = Some(oracle);
    }
    /// load the clauses of a DIMACS body.
    fn inject(mut self, mut reader: BufReader<File>) -> Result<Solver, SolverError> {
        self.state.flush("loading...");
        let mut buf = String::new();
        loop {
            buf.clear();
            match reader.read_line(&mut buf) {
                Ok(0) => break,
                Ok(_) if buf.starts_with('c') || buf.starts_with('%') => continue,
                Ok(_) => {
                    let mut v: Vec<i32> = Vec::new();
                    let mut terminated = false;
                    for s in buf.split_whitespace() {
                        match s.parse::<i32>() {
                            Ok(0) => {
                                terminated = true;
                                break;
                            }
                            Ok(val) => v.push(val),
                            Err(_) => return Err(SolverError::InvalidLiteral),
                        }
                    }
                    if v.is_empty() {
                        if terminated {
                            // an explicit empty clause
                            self.state.ok = false;
                        }
                    } else {
                        match self.add_clause(v) {
                            Ok(_) | Err(SolverError::Inconsistent | SolverError::EmptyClause) => (),
                            Err(e) => return Err(e),
                        }
                    }
                }
                Err(_) => return Err(SolverError::IOError),
            }
        }
        debug_assert_eq!(self.asg.num_vars, self.state.target.num_of_variables);
        Ok(self)
    }
    fn inject_from_vec(mut self, vec: Vec<Vec<i32>>) -> Result<Solver, SolverResult> {
        for clause in vec {
            if self.add_clause(clause).is_err() {
                return Err(Ok(super::Certificate::UNSAT));
            }
        }
        Ok(self)
    }
    /// load a symmetry file in the BreakID format.
    ///
    /// # Errors
    ///
    /// IO error or a malformed generator line.
    pub fn load_symmetry_file(&mut self, path: &Path) -> MaybeInconsistent {
        for g in load_generators(path, self.asg.num_vars)? {
            self.add_generator(g);
        }
        Ok(())
    }
}
