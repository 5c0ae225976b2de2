use crate::{Nfa, Simulation, StateId};
use std::collections::BTreeSet;
use std::iter::FusedIterator;

/// The states an automaton could be in after consuming `symbol`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// The consumed character, `None` for the initial configuration.
    pub symbol: Option<char>,
    /// Epsilon-closed set of active states, empty once the input was rejected.
    pub active: BTreeSet<StateId>,
}

impl TraceStep {
    /// An empty set of active states marks the point where the input was rejected.
    pub fn is_dead(&self) -> bool {
        self.active.is_empty()
    }
}

/// Iterator over the configurations of an [`Nfa`] while it consumes an input string.
///
/// Created by [`trace`]. Yields the initial configuration, then one step per consumed
/// character. If a character can not be consumed a single dead step (with no active states) is
/// yielded and the trace ends, before the end of the input.
///
/// This holds for characters of the alphabet too: once no state has a transition on the next
/// character, nothing after it can be accepted, so `ab` traced on `abab` stops after four steps
/// instead of running on with empty sets. The final step therefore always decides acceptance the
/// same way [`matches`](crate::matches) does.
#[derive(Debug, Clone)]
pub struct Trace<'a, 'i> {
    simulation: Simulation<'a>,
    input: std::str::Chars<'i>,
    started: bool,
    finished: bool,
}

impl Trace<'_, '_> {
    /// Whether the automaton accepts in its current configuration.
    pub fn is_accepting(&self) -> bool {
        self.simulation.is_accepting()
    }
}

impl Iterator for Trace<'_, '_> {
    type Item = TraceStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if !self.started {
            self.started = true;
            return Some(TraceStep {
                symbol: None,
                active: self.simulation.active().clone(),
            });
        }

        let symbol = self.input.next();
        let Some(c) = symbol else {
            self.finished = true;
            return None;
        };

        if !self.simulation.feed(c) {
            self.finished = true;
        }

        Some(TraceStep {
            symbol,
            active: self.simulation.active().clone(),
        })
    }
}

impl FusedIterator for Trace<'_, '_> {}

/// Traces the simulation of `nfa` on `input`, one step per character.
///
/// Acceptance can be read from the final step: `input` is accepted exactly if its active states
/// contain the accept state of `nfa`.
pub fn trace<'a, 'i>(nfa: &'a Nfa, input: &'i str) -> Trace<'a, 'i> {
    Trace {
        simulation: nfa.simulate(),
        input: input.chars(),
        started: false,
        finished: false,
    }
}

impl Nfa {
    /// See [`trace`].
    pub fn trace<'a, 'i>(&'a self, input: &'i str) -> Trace<'a, 'i> {
        trace(self, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build, parse_regex};
    use pretty_assertions::assert_eq;

    fn ids(ids: &[usize]) -> BTreeSet<StateId> {
        ids.iter().copied().map(StateId).collect()
    }

    #[test]
    fn one_step_per_character() {
        // a: 0 -> 1, b: 2 -> 3
        let nfa = build(&parse_regex("ab").unwrap());
        let steps: Vec<_> = nfa.trace("ab").collect();
        assert_eq!(
            steps,
            vec![
                TraceStep {
                    symbol: None,
                    active: ids(&[0])
                },
                TraceStep {
                    symbol: Some('a'),
                    active: ids(&[1, 2])
                },
                TraceStep {
                    symbol: Some('b'),
                    active: ids(&[3])
                },
            ]
        );
    }

    #[test]
    fn empty_input_yields_initial_configuration() {
        let nfa = build(&parse_regex("a*").unwrap());
        let steps: Vec<_> = nfa.trace("").collect();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].active, nfa.epsilon_closure([nfa.start()]));
    }

    #[test]
    fn stops_after_unknown_symbol() {
        let nfa = build(&parse_regex("a*").unwrap());
        let steps: Vec<_> = nfa.trace("aaxaa").collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[3].symbol, Some('x'));
        assert!(steps[3].is_dead());
        assert!(steps[..3].iter().all(|s| !s.is_dead()));
    }

    #[test]
    fn stops_after_dead_configuration() {
        let nfa = build(&parse_regex("ab").unwrap());
        let mut trace = nfa.trace("bab");
        assert!(!trace.next().unwrap().is_dead());
        let dead = trace.next().unwrap();
        assert_eq!(dead.symbol, Some('b'));
        assert!(dead.is_dead());
        assert_eq!(trace.next(), None);
        assert_eq!(trace.next(), None);
    }

    #[test]
    fn stops_on_known_symbol_without_transition() {
        let nfa = build(&parse_regex("ab").unwrap());
        let steps: Vec<_> = nfa.trace("abab").collect();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[2].active, ids(&[3]));
        assert_eq!(
            steps[3],
            TraceStep {
                symbol: Some('a'),
                active: ids(&[])
            }
        );
        assert!(!nfa.matches("abab"));
    }

    #[test]
    fn reports_acceptance_while_tracing() {
        let nfa = build(&parse_regex("a|bc").unwrap());
        let mut trace = nfa.trace("bc");
        trace.next();
        assert!(!trace.is_accepting());
        trace.next();
        assert!(!trace.is_accepting());
        trace.next();
        assert!(trace.is_accepting());
    }
}
