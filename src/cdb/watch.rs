use {super::ClauseRef, crate::types::*};

/// 'Watch literal' structure
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Watcher {
    /// a cached literal of the clause; if it is true the clause is
    /// satisfied without touching the arena
    pub blocker: Lit,
    /// the watching clause
    pub c: ClauseRef,
}

pub type WatcherList = Vec<Watcher>;

/// API for watcher lists like `register`, `detach_with` and so on.
pub trait WatchDBIF {
    /// make a new watch and add it to this watcher list.
    fn register(&mut self, blocker: Lit, c: ClauseRef);
    /// remove the watch for clause `cr` from the list. *O(n)* operation.
    fn detach_with(&mut self, cr: ClauseRef);
}

impl WatchDBIF for WatcherList {
    fn register(&mut self, blocker: Lit, c: ClauseRef) {
        self.push(Watcher { blocker, c });
    }
    fn detach_with(&mut self, cr: ClauseRef) {
        if let Some(n) = self.iter().position(|w| w.c == cr) {
            self.swap_remove(n);
        }
    }
}
