//! The capability consumed by the core to pull externally discovered
//! symmetry-breaking clauses.
use crate::types::Lit;

/// Kinds of clauses an oracle can inject.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InjectKind {
    /// unit facts holding in every lex-leader model, pulled once at the
    /// start of a solve call
    Units,
    /// effective symmetry-breaking predicates, pulled during propagation
    /// and keyed on the literal just propagated
    Esbp,
}

/// How the oracle orders variables when building lex-leader constraints.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum OrderMode {
    #[default]
    Auto,
    Occurrence,
    Custom,
}

/// Which truth value the oracle considers smaller.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValueMode {
    #[default]
    TrueLessFalse,
    FalseLessTrue,
}

/// External collaborator asserting that the current partial assignment is
/// minimal in its orbit. The core depends only on this capability, never
/// on its implementation.
pub trait SymmetryOracle {
    /// activate the oracle.
    fn enable(&mut self, order: OrderMode, value: ValueMode);
    /// an assignment happened.
    fn update_notify(&mut self, l: Lit);
    /// an assignment was cancelled.
    fn update_cancel(&mut self, l: Lit);
    /// return `true` if a clause of the given kind is available.
    fn has_clause_to_inject(&self, kind: InjectKind, l: Option<Lit>) -> bool;
    /// pull a clause; call only after `has_clause_to_inject` said yes.
    fn clause_to_inject(&mut self, kind: InjectKind, l: Option<Lit>) -> Vec<Lit>;
    fn print_info(&self) {}
    fn print_stats(&self) {}
}
