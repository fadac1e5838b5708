/// Crate `state` is a collection of internal data, used by the whole modules.
use {
    crate::{
        config::Config,
        types::{CNFDescription, Instantiate, Lit},
    },
    std::{
        fmt,
        ops::{Index, IndexMut},
        time::Instant,
    },
};

/// stat index
#[derive(Clone, Copy, Eq, PartialEq)]
pub enum Stat {
    /// the number of calls to solve
    Solve = 0,
    /// the number of backjumps
    Conflict,
    /// the number of decisions
    Decision,
    /// the number of random decisions
    RandomDecision,
    /// the number of restarts
    Restart,
    /// the number of unit propagations
    Propagation,
    /// the number of learnt-DB reductions
    Reduction,
    /// the number of top-level simplifications
    Simplification,
    /// units propagated from freshly generated symmetrical clauses
    SymGenProp,
    /// conflicts raised by freshly generated symmetrical clauses
    SymGenConfl,
    /// units propagated from stored symmetrical clauses
    SymSelProp,
    /// conflicts raised by stored symmetrical clauses
    SymSelConfl,
    /// clauses pulled from the symmetry-breaking injector
    EsbpInjection,
    /// literals in learnt clauses before minimization
    MaxLiterals,
    /// literals in learnt clauses after minimization
    TotLiterals,
    /// don't use this dummy
    EndOfStatIndex,
}

/// Data storage for [`Solver`](`crate::solver::Solver`).
#[derive(Debug)]
pub struct State {
    /// solver still consistent; flips to false on a root-level conflict
    pub ok: bool,
    /// statistics
    pub stats: [usize; Stat::EndOfStatIndex as usize],
    /// the model found by the last search, indexed by `VarId`
    pub model: Vec<Option<bool>>,
    /// inconsistent subset of assumptions, negated
    pub conflicts: Vec<Lit>,
    /// the learnt clause under construction
    pub new_learnt: Vec<Lit>,
    /// scratch marks for conflict analysis and clause minimization
    pub an_seen: Vec<Seen>,
    /// literals whose `an_seen` mark must be wiped after analysis
    pub to_clear: Vec<Lit>,
    /// remaining conflicts before giving up; negative means no limit
    pub conflict_budget: i64,
    /// remaining propagations before giving up; negative means no limit
    pub propagation_budget: i64,
    /// cooperative interruption flag, polled at conflict boundaries
    pub asynch_interrupt: bool,
    /// search coverage estimate recorded when a budget ran out
    pub progress_estimate: f64,
    /// start time
    pub start: Instant,
    /// configuration
    pub config: Config,
    /// the problem
    pub target: CNFDescription,
}

/// Mark states used by conflict analysis and deep clause minimization.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Seen {
    No,
    Source,
    Removable,
    Failed,
}

impl Default for State {
    fn default() -> State {
        State {
            ok: true,
            stats: [0; Stat::EndOfStatIndex as usize],
            model: Vec::new(),
            conflicts: Vec::new(),
            new_learnt: Vec::new(),
            an_seen: Vec::new(),
            to_clear: Vec::new(),
            conflict_budget: -1,
            propagation_budget: -1,
            asynch_interrupt: false,
            progress_estimate: 0.0,
            start: Instant::now(),
            config: Config::default(),
            target: CNFDescription::default(),
        }
    }
}

impl Index<Stat> for State {
    type Output = usize;
    #[inline]
    fn index(&self, i: Stat) -> &usize {
        &self.stats[i as usize]
    }
}

impl IndexMut<Stat> for State {
    #[inline]
    fn index_mut(&mut self, i: Stat) -> &mut usize {
        &mut self.stats[i as usize]
    }
}

impl Instantiate for State {
    fn instantiate(config: &Config, cnf: &CNFDescription) -> State {
        State {
            model: vec![None; cnf.num_of_variables + 1],
            an_seen: vec![Seen::No; cnf.num_of_variables + 1],
            config: config.clone(),
            target: cnf.clone(),
            ..State::default()
        }
    }
}

impl State {
    /// return `false` when a resource budget ran out.
    pub fn within_budget(&self) -> bool {
        !self.asynch_interrupt
            && (self.conflict_budget < 0
                || (self[Stat::Conflict] as i64) < self.conflict_budget)
            && (self.propagation_budget < 0
                || (self[Stat::Propagation] as i64) < self.propagation_budget)
            && self.start.elapsed().as_secs_f64() < self.config.timeout
    }
    pub fn flush<S: AsRef<str>>(&self, mes: S) {
        if !self.config.quiet_mode {
            print!("\x1B[1G\x1B[K{}", mes.as_ref());
        }
    }
    /// print the final statistics block.
    pub fn report_stats(&self) {
        if self.config.quiet_mode {
            return;
        }
        let secs = self.start.elapsed().as_secs_f64();
        let per_sec = |n: usize| n as f64 / secs.max(f64::EPSILON);
        println!("c restarts              : {}", self[Stat::Restart]);
        println!(
            "c conflicts             : {:<12} ({:.0} /sec)",
            self[Stat::Conflict],
            per_sec(self[Stat::Conflict])
        );
        println!("c symgenconfls          : {}", self[Stat::SymGenConfl]);
        println!("c symselconfls          : {}", self[Stat::SymSelConfl]);
        println!(
            "c decisions             : {:<12} ({:4.2} % random) ({:.0} /sec)",
            self[Stat::Decision],
            self[Stat::RandomDecision] as f64 * 100.0 / self[Stat::Decision].max(1) as f64,
            per_sec(self[Stat::Decision])
        );
        println!(
            "c propagations          : {:<12} ({:.0} /sec)",
            self[Stat::Propagation],
            per_sec(self[Stat::Propagation])
        );
        println!("c symgenprops           : {}", self[Stat::SymGenProp]);
        println!("c symselprops           : {}", self[Stat::SymSelProp]);
        println!(
            "c conflict literals     : {:<12} ({:4.2} % deleted)",
            self[Stat::TotLiterals],
            (self[Stat::MaxLiterals] - self[Stat::TotLiterals]) as f64 * 100.0
                / (self[Stat::MaxLiterals].max(1)) as f64
        );
        println!("c CPU time              : {secs:.3} s");
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "State(conflict:{}, decision:{}, propagation:{})",
            self[Stat::Conflict],
            self[Stat::Decision],
            self[Stat::Propagation],
        )
    }
}
