/// Var struct and its manipulation API
use {
    super::AssignReason,
    crate::types::*,
};

/// Object representing a variable.
#[derive(Clone, Debug)]
pub struct Var {
    /// assigned value
    pub(super) assign: Option<bool>,
    /// decision level at assignment
    pub(super) level: DecisionLevel,
    /// reason of assignment
    pub(crate) reason: AssignReason,
    /// the `Flag`s (8 bits)
    pub(super) flags: FlagVar,
    /// a dynamic evaluation criterion like VSIDS
    pub(super) activity: f64,
    /// polarity pinned by the user, overriding the saved phase
    pub(super) user_pol: Option<bool>,
}

impl Default for Var {
    fn default() -> Var {
        Var {
            assign: None,
            level: DecisionLevel::default(),
            reason: AssignReason::None,
            flags: FlagVar::DECISION,
            activity: 0.0,
            user_pol: None,
        }
    }
}

impl Var {
    /// return a new vector of $n$ `Var`s.
    pub fn new_vars(n: usize) -> Vec<Var> {
        vec![Var::default(); n + 1]
    }
    pub fn activity(&self) -> f64 {
        self.activity
    }
}

impl FlagIF for Var {
    type FlagType = FlagVar;
    #[inline]
    fn is(&self, flag: Self::FlagType) -> bool {
        self.flags.contains(flag)
    }
    #[inline]
    fn set(&mut self, f: Self::FlagType, b: bool) {
        self.flags.set(f, b);
    }
    #[inline]
    fn turn_off(&mut self, flag: Self::FlagType) {
        self.flags.remove(flag);
    }
    #[inline]
    fn turn_on(&mut self, flag: Self::FlagType) {
        self.flags.insert(flag);
    }
}

/// Var manipulation
pub trait VarManipulateIF {
    /// return the assignment of var.
    fn assign(&self, vi: VarId) -> Option<bool>;
    /// return *the value* of a literal.
    fn assigned(&self, l: Lit) -> Option<bool>;
    /// return the assign level of var.
    fn level(&self, vi: VarId) -> DecisionLevel;
    /// return the reason of assignment.
    fn reason(&self, vi: VarId) -> AssignReason;
    /// return the var.
    fn var(&self, vi: VarId) -> &Var;
    /// return the var.
    fn var_mut(&mut self, vi: VarId) -> &mut Var;
}
