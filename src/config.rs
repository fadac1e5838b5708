/// Crate `config` provides solver's configuration and CLI.
use {std::path::PathBuf, structopt::StructOpt};

/// Configuration built from command line options
#[derive(Clone, Debug, StructOpt)]
#[structopt(name = "symsat", about, author)]
pub struct Config {
    //
    //## I/O configuration
    //
    /// CNF file in DIMACS format
    #[structopt(parse(from_os_str))]
    pub cnf_file: PathBuf,

    /// Symmetry generator file
    #[structopt(long = "sym", short = "s", parse(from_os_str))]
    pub sym_file: Option<PathBuf>,

    /// Parse the symmetry file in BreakID format
    #[structopt(long = "breakid", default_value = "1")]
    pub(crate) breakid: i32,

    /// Disable any progress message
    #[structopt(long = "quiet", short = "q")]
    pub quiet_mode: bool,

    /// CPU time limit in sec.
    #[structopt(long = "timeout", short = "t", default_value = "5000.0")]
    pub timeout: f64,

    //
    //## search
    //
    /// The variable activity decay factor
    #[structopt(long = "var-decay", default_value = "0.95")]
    pub var_decay: f64,

    /// The clause activity decay factor
    #[structopt(long = "cla-decay", default_value = "0.999")]
    pub clause_decay: f64,

    /// The frequency with which the decision heuristic tries to choose a random variable
    #[structopt(long = "rnd-freq", default_value = "0.0")]
    pub random_var_freq: f64,

    /// Seed for the random variable selection
    #[structopt(long = "rnd-seed", default_value = "91648253.0")]
    pub random_seed: f64,

    /// Conflict clause minimization (0=none, 1=basic, 2=deep)
    #[structopt(long = "ccmin-mode", default_value = "2")]
    pub ccmin_mode: i32,

    /// Level of phase saving (0=none, 1=limited, 2=full)
    #[structopt(long = "phase-saving", default_value = "2")]
    pub phase_saving: i32,

    /// Polarity used when there is no saved phase (0=false first, 1=random)
    #[structopt(long = "rnd-pol", default_value = "0")]
    pub(crate) rnd_pol: i32,

    /// Randomize the initial activity
    #[structopt(long = "rnd-init", default_value = "0")]
    pub(crate) rnd_init_act: i32,

    //
    //## restarts
    //
    /// Use the Luby restart sequence
    #[structopt(long = "luby", default_value = "1")]
    pub(crate) luby_restart: i32,

    /// The base restart interval
    #[structopt(long = "rfirst", default_value = "100")]
    pub restart_first: usize,

    /// Restart interval increase factor
    #[structopt(long = "rinc", default_value = "2.0")]
    pub restart_inc: f64,

    //
    //## clause DB
    //
    /// The fraction of wasted memory allowed before a garbage collection is triggered
    #[structopt(long = "gc-frac", default_value = "0.20")]
    pub garbage_frac: f64,

    /// Minimum learnt clause limit
    #[structopt(long = "min-learnts", default_value = "0")]
    pub min_learnts_lim: usize,

    /// Learnt clause reduction switch
    #[structopt(long = "RDC", default_value = "0")]
    pub(crate) reduce: i32,

    //
    //## symmetry
    //
    /// Stop propagation when an ESBP was injected
    #[structopt(long = "stop-prop", default_value = "0")]
    pub(crate) stop_prop_on_esbp: i32,

    /// Minimize materialized symmetrical clauses
    #[structopt(long = "MSC", default_value = "0")]
    pub(crate) minimize_sel: i32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cnf_file: PathBuf::new(),
            sym_file: None,
            breakid: 1,
            quiet_mode: true,
            timeout: 5000.0,
            var_decay: 0.95,
            clause_decay: 0.999,
            random_var_freq: 0.0,
            random_seed: 91_648_253.0,
            ccmin_mode: 2,
            phase_saving: 2,
            rnd_pol: 0,
            rnd_init_act: 0,
            luby_restart: 1,
            restart_first: 100,
            restart_inc: 2.0,
            garbage_frac: 0.20,
            min_learnts_lim: 0,
            reduce: 0,
            stop_prop_on_esbp: 0,
            minimize_sel: 0,
        }
    }
}

impl<T> From<T> for Config
where
    PathBuf: From<T>,
{
    fn from(path: T) -> Config {
        Config {
            cnf_file: PathBuf::from(path),
            ..Config::default()
        }
    }
}

macro_rules! dispatch {
    // from `0` and `1`
    ($field: expr) => {
        0 != $field
    };
}

impl Config {
    pub fn use_reduce(&self) -> bool {
        dispatch!(self.reduce)
    }
    pub fn use_luby(&self) -> bool {
        dispatch!(self.luby_restart)
    }
    pub fn use_rnd_pol(&self) -> bool {
        dispatch!(self.rnd_pol)
    }
    pub fn use_rnd_init_act(&self) -> bool {
        dispatch!(self.rnd_init_act)
    }
    pub fn use_breakid(&self) -> bool {
        dispatch!(self.breakid)
    }
    pub fn use_stop_prop_on_esbp(&self) -> bool {
        dispatch!(self.stop_prop_on_esbp)
    }
    pub fn use_minimize_sel(&self) -> bool {
        dispatch!(self.minimize_sel)
    }
}
