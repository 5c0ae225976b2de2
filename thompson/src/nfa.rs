use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Identifies a state. Unique within one automaton, and across all automata that were built from
/// the same [`StateIdSource`](crate::StateIdSource).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(pub usize);

impl Display for StateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// What a transition consumes.
///
/// [`Symbol::Epsilon`] is distinct from every character, so it can never end up in an alphabet.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
    /// Consumes exactly this character.
    Char(char),
    /// Consumes nothing.
    Epsilon,
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Char(c) => write!(f, "{c}"),
            Symbol::Epsilon => write!(f, "ε"),
        }
    }
}

/// A single edge of an [`Nfa`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Transition {
    /// source state
    pub from: StateId,
    /// what is consumed when taking this transition
    pub symbol: Symbol,
    /// destination state
    pub to: StateId,
}

/// Raised when an automaton is assembled from states it does not contain.
///
/// The Thompson construction only refers to states it just allocated, so from
/// [`build`](crate::build) this indicates a bug rather than bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    /// A state was referred to before it was added.
    #[error("state {0} is not part of the automaton")]
    UnknownState(StateId),
    /// A state was added twice.
    #[error("state {0} is already part of the automaton")]
    DuplicateState(StateId),
}

pub(crate) type TransitionTable = BTreeMap<(StateId, Symbol), BTreeSet<StateId>>;

/// A nondeterministic finite automaton with a single start and a single accept state.
///
/// Every transition's endpoints are states of the automaton, and `start` and `accept` are too.
/// Once constructed an `Nfa` is never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nfa {
    states: BTreeSet<StateId>,
    alphabet: BTreeSet<char>,
    start: StateId,
    accept: StateId,
    transitions: TransitionTable,
}

impl Nfa {
    /// Creates an automaton containing only `start` and `accept`, without transitions.
    pub(crate) fn with_endpoints(start: StateId, accept: StateId) -> Self {
        Self {
            states: BTreeSet::from([start, accept]),
            alphabet: BTreeSet::new(),
            start,
            accept,
            transitions: TransitionTable::new(),
        }
    }

    /// Assembles and validates an automaton from its parts.
    ///
    /// The alphabet is derived from the character transitions.
    pub fn from_parts(
        states: impl IntoIterator<Item = StateId>,
        start: StateId,
        accept: StateId,
        transitions: impl IntoIterator<Item = Transition>,
    ) -> Result<Self, StructuralError> {
        let mut nfa = Self {
            states: BTreeSet::new(),
            alphabet: BTreeSet::new(),
            start,
            accept,
            transitions: TransitionTable::new(),
        };
        for state in states {
            nfa.add_state(state)?;
        }

        for endpoint in [start, accept] {
            if !nfa.states.contains(&endpoint) {
                return Err(StructuralError::UnknownState(endpoint));
            }
        }

        for Transition { from, symbol, to } in transitions {
            nfa.add_transition(from, symbol, to)?;
        }

        Ok(nfa)
    }

    pub(crate) fn add_state(&mut self, state: StateId) -> Result<(), StructuralError> {
        if self.states.insert(state) {
            Ok(())
        } else {
            Err(StructuralError::DuplicateState(state))
        }
    }

    /// Adds `to` to the destinations of `(from, symbol)`, keeping any existing destinations.
    pub(crate) fn add_transition(
        &mut self,
        from: StateId,
        symbol: Symbol,
        to: StateId,
    ) -> Result<(), StructuralError> {
        for state in [from, to] {
            if !self.states.contains(&state) {
                return Err(StructuralError::UnknownState(state));
            }
        }

        if let Symbol::Char(c) = symbol {
            self.alphabet.insert(c);
        }
        self.transitions
            .entry((from, symbol))
            .or_default()
            .insert(to);
        Ok(())
    }

    /// Merges the states, alphabet and transitions of `other` into this automaton.
    ///
    /// The state sets must be disjoint. Start and accept state of `self` are kept.
    pub(crate) fn absorb(&mut self, other: Nfa) -> Result<(), StructuralError> {
        if let Some(shared) = self.states.intersection(&other.states).next() {
            return Err(StructuralError::DuplicateState(*shared));
        }

        self.states.extend(other.states);
        self.alphabet.extend(other.alphabet);
        for (key, destinations) in other.transitions {
            self.transitions.entry(key).or_default().extend(destinations);
        }
        Ok(())
    }

    /// Moves the accept state to `accept`, which must already be a state of this automaton.
    pub(crate) fn with_accept(mut self, accept: StateId) -> Result<Self, StructuralError> {
        if !self.states.contains(&accept) {
            return Err(StructuralError::UnknownState(accept));
        }
        self.accept = accept;
        Ok(self)
    }

    /// Moves start and accept state, which must already be states of this automaton.
    pub(crate) fn with_endpoints_moved(
        mut self,
        start: StateId,
        accept: StateId,
    ) -> Result<Self, StructuralError> {
        for state in [start, accept] {
            if !self.states.contains(&state) {
                return Err(StructuralError::UnknownState(state));
            }
        }
        self.start = start;
        self.accept = accept;
        Ok(self)
    }

    /// All states, in ascending order.
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    /// The symbols this automaton has transitions on. Never contains epsilon.
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    /// The state every run starts in.
    pub fn start(&self) -> StateId {
        self.start
    }

    /// The state a run has to end in to accept its input.
    pub fn accept(&self) -> StateId {
        self.accept
    }

    /// All transitions, ordered by source state, then symbol, then destination.
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&(from, symbol), destinations)| {
                destinations
                    .iter()
                    .map(move |&to| Transition { from, symbol, to })
            })
    }

    /// Number of `(from, symbol, to)` triples.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeSet::len).sum()
    }

    /// The states reachable from `from` by one transition on `symbol`.
    pub fn targets(&self, from: StateId, symbol: Symbol) -> impl Iterator<Item = StateId> + '_ {
        self.transitions
            .get(&(from, symbol))
            .into_iter()
            .flatten()
            .copied()
    }
}

impl Display for Nfa {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let states: Vec<_> = self.states.iter().map(ToString::to_string).collect();
        writeln!(f, "states: {{{}}}", states.join(", "))?;
        writeln!(f, "start: {}", self.start)?;
        writeln!(f, "accept: {}", self.accept)?;
        for Transition { from, symbol, to } in self.transitions() {
            writeln!(f, "  {from} --{symbol}--> {to}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(from: usize, symbol: Symbol, to: usize) -> Transition {
        Transition {
            from: StateId(from),
            symbol,
            to: StateId(to),
        }
    }

    #[test]
    fn from_parts_validates() {
        let nfa = Nfa::from_parts(
            [StateId(0), StateId(1)],
            StateId(0),
            StateId(1),
            [t(0, Symbol::Char('x'), 1)],
        )
        .unwrap();
        assert_eq!(nfa.alphabet(), &BTreeSet::from(['x']));
        assert_eq!(nfa.transition_count(), 1);

        assert_eq!(
            Nfa::from_parts([StateId(0)], StateId(0), StateId(1), []),
            Err(StructuralError::UnknownState(StateId(1)))
        );
        assert_eq!(
            Nfa::from_parts(
                [StateId(0), StateId(1)],
                StateId(0),
                StateId(1),
                [t(0, Symbol::Epsilon, 7)]
            ),
            Err(StructuralError::UnknownState(StateId(7)))
        );
        assert_eq!(
            Nfa::from_parts([StateId(0), StateId(0)], StateId(0), StateId(0), []),
            Err(StructuralError::DuplicateState(StateId(0)))
        );
    }

    #[test]
    fn transitions_accumulate_destinations() {
        let mut nfa = Nfa::with_endpoints(StateId(0), StateId(2));
        nfa.add_state(StateId(1)).unwrap();
        nfa.add_transition(StateId(0), Symbol::Epsilon, StateId(1))
            .unwrap();
        nfa.add_transition(StateId(0), Symbol::Epsilon, StateId(2))
            .unwrap();

        assert_eq!(
            nfa.targets(StateId(0), Symbol::Epsilon).collect::<Vec<_>>(),
            vec![StateId(1), StateId(2)]
        );
        assert!(nfa.alphabet().is_empty());
    }

    #[test]
    fn absorb_rejects_overlap() {
        let mut a = Nfa::with_endpoints(StateId(0), StateId(1));
        let b = Nfa::with_endpoints(StateId(1), StateId(2));
        assert_eq!(
            a.absorb(b),
            Err(StructuralError::DuplicateState(StateId(1)))
        );
    }

    #[test]
    fn display_uses_epsilon_sign() {
        let nfa = Nfa::from_parts(
            [StateId(0), StateId(1)],
            StateId(0),
            StateId(1),
            [t(0, Symbol::Epsilon, 1)],
        )
        .unwrap();
        assert_eq!(
            nfa.to_string(),
            "states: {q0, q1}\nstart: q0\naccept: q1\n  q0 --ε--> q1\n"
        );
    }
}
