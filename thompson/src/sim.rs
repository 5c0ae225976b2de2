use crate::{Nfa, StateId, Symbol};
use std::collections::BTreeSet;

impl Nfa {
    /// All states reachable from `states` using only epsilon transitions, including `states`
    /// themselves.
    pub fn epsilon_closure(&self, states: impl IntoIterator<Item = StateId>) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::new();
        let mut work_list = Vec::new();

        for state in states {
            if closure.insert(state) {
                work_list.push(state);
            }
        }

        // star loops make the graph cyclic: only expand states seen for the first time
        while let Some(state) = work_list.pop() {
            for next in self.targets(state, Symbol::Epsilon) {
                if closure.insert(next) {
                    work_list.push(next);
                }
            }
        }

        closure
    }

    /// Consumes `input` from the (closed) set `states`.
    ///
    /// Returns the epsilon closure of every state one `input` transition away, or `None` if no
    /// state in `states` has a transition on `input`.
    pub fn step(&self, states: &BTreeSet<StateId>, input: char) -> Option<BTreeSet<StateId>> {
        let reachable: BTreeSet<_> = states
            .iter()
            .flat_map(|&state| self.targets(state, Symbol::Char(input)))
            .collect();

        if reachable.is_empty() {
            log::trace!("{input:?}: no transition from {} states", states.len());
            return None;
        }

        let closure = self.epsilon_closure(reachable.iter().copied());
        log::trace!(
            "{input:?}: {} states reachable, {} after closure",
            reachable.len(),
            closure.len()
        );
        Some(closure)
    }

    /// Starts a [`Simulation`] of this automaton.
    pub fn simulate(&self) -> Simulation<'_> {
        Simulation::new(self)
    }
}

/// Runs an [`Nfa`] one character at a time by tracking every state it could be in.
///
/// Once a character can not be consumed the simulation is dead: the set of active states is empty
/// and it will never accept again.
#[derive(Debug, Clone)]
pub struct Simulation<'a> {
    nfa: &'a Nfa,
    active: BTreeSet<StateId>,
}

impl<'a> Simulation<'a> {
    /// Starts in the epsilon closure of the start state.
    pub fn new(nfa: &'a Nfa) -> Self {
        Self {
            nfa,
            active: nfa.epsilon_closure([nfa.start()]),
        }
    }

    /// Consumes one character. Returns false if the simulation is dead afterwards.
    ///
    /// Characters outside of the alphabet of the automaton kill the simulation immediately.
    pub fn feed(&mut self, input: char) -> bool {
        if self.is_dead() {
            return false;
        }

        if !self.nfa.alphabet().contains(&input) {
            log::debug!("{input:?} is not in the alphabet, rejecting");
            self.active.clear();
            return false;
        }

        match self.nfa.step(&self.active, input) {
            Some(next) => {
                self.active = next;
                true
            }
            None => {
                log::debug!("{input:?} can not be consumed, rejecting");
                self.active.clear();
                false
            }
        }
    }

    /// Consumes characters until the input runs out or the simulation dies.
    pub fn feed_str(&mut self, input: &str) -> bool {
        input.chars().all(|c| self.feed(c))
    }

    /// Whether the input consumed so far is accepted.
    pub fn is_accepting(&self) -> bool {
        self.active.contains(&self.nfa.accept())
    }

    /// Whether some character could not be consumed.
    pub fn is_dead(&self) -> bool {
        self.active.is_empty()
    }

    /// The states the automaton could currently be in. Always epsilon-closed.
    pub fn active(&self) -> &BTreeSet<StateId> {
        &self.active
    }
}
