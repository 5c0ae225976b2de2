use crate::nfa::StructuralError;
use crate::{Nfa, Regex, StateIdSource, Symbol};

/// Compiles [`Regex`] trees to [`Nfa`]s using Thompson's construction.
///
/// The builder owns the [`StateIdSource`] all states are allocated from, so every automaton it
/// returns has states disjoint from those of every other automaton it returned.
#[derive(Debug, Default)]
pub struct ThompsonBuilder {
    ids: StateIdSource,
}

impl ThompsonBuilder {
    /// A builder with a fresh [`StateIdSource`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue allocating from an existing source.
    pub fn with_source(ids: StateIdSource) -> Self {
        Self { ids }
    }

    /// Gives back the source, e.g. to continue allocating elsewhere.
    pub fn into_source(self) -> StateIdSource {
        self.ids
    }

    /// Builds the automaton of `regex`.
    ///
    /// # Panics
    ///
    /// Only if the construction itself is broken: every state the construction refers to was
    /// allocated moments before, so a [`StructuralError`] can not be caused by the input.
    pub fn build(&mut self, regex: &Regex) -> Nfa {
        let nfa = self
            .compile(regex)
            .unwrap_or_else(|e| panic!("thompson construction produced a malformed automaton: {e}"));

        log::debug!(
            "built automaton for {} nodes with {} states and {} transitions over {:?}",
            regex.size(),
            nfa.states().len(),
            nfa.transition_count(),
            nfa.alphabet(),
        );

        nfa
    }

    // Chains of concatenations and unions are compiled in loops. Only groups (stars and unions
    // nested on the right) recurse, and the parser bounds their depth.
    fn compile(&mut self, regex: &Regex) -> Result<Nfa, StructuralError> {
        match regex {
            Regex::Literal(c) => self.compile_symbol(Symbol::Char(*c)),
            Regex::Epsilon => self.compile_symbol(Symbol::Epsilon),
            Regex::Concat(l, r) => self.compile_concat(l, r),
            Regex::Union(l, r) => self.compile_union(l, r),
            // a** accepts what a* accepts, so don't add another layer
            Regex::Star(inner) => match inner.as_ref() {
                Regex::Star(_) => self.compile(inner),
                _ => self.compile_star(inner),
            },
        }
    }

    // start --symbol--> accept
    fn compile_symbol(&mut self, symbol: Symbol) -> Result<Nfa, StructuralError> {
        let start = self.ids.next();
        let accept = self.ids.next();
        let mut nfa = Nfa::with_endpoints(start, accept);
        nfa.add_transition(start, symbol, accept)?;
        Ok(nfa)
    }

    // l.start ... l.accept --ε--> r.start ... r.accept
    //
    // Concatenation is associative, so nested concatenations on either side are flattened into
    // one left-to-right sequence of operands.
    fn compile_concat(&mut self, l: &Regex, r: &Regex) -> Result<Nfa, StructuralError> {
        let mut first = l;
        let mut pending = vec![r];
        while let Regex::Concat(l, r) = first {
            pending.push(r.as_ref());
            first = l.as_ref();
        }

        let mut nfa = self.compile(first)?;
        while let Some(next) = pending.pop() {
            if let Regex::Concat(l, r) = next {
                pending.push(r.as_ref());
                pending.push(l.as_ref());
                continue;
            }

            let next = self.compile(next)?;
            let (accept, next_start, next_accept) = (nfa.accept(), next.start(), next.accept());
            nfa.absorb(next)?;
            nfa.add_transition(accept, Symbol::Epsilon, next_start)?;
            nfa = nfa.with_accept(next_accept)?;
        }
        Ok(nfa)
    }

    // `a|b|c` nests to the left: fold the branches innermost first, each step adding
    // a fresh start and accept state around everything so far and the next branch.
    fn compile_union(&mut self, l: &Regex, r: &Regex) -> Result<Nfa, StructuralError> {
        let mut first = l;
        let mut branches = vec![r];
        while let Regex::Union(l, r) = first {
            branches.push(r.as_ref());
            first = l.as_ref();
        }

        let mut nfa = self.compile(first)?;
        while let Some(branch) = branches.pop() {
            let branch = self.compile(branch)?;
            nfa = self.join(nfa, branch)?;
        }
        Ok(nfa)
    }

    //        ε--> l --ε
    // start <           > accept
    //        ε--> r --ε
    fn join(&mut self, l: Nfa, r: Nfa) -> Result<Nfa, StructuralError> {
        let (l_start, l_accept, r_start, r_accept) = (l.start(), l.accept(), r.start(), r.accept());
        let start = self.ids.next();
        let accept = self.ids.next();

        // absorb the smaller automaton into the larger one, so long chains stay linear
        let (mut nfa, other) = if l.states().len() >= r.states().len() {
            (l, r)
        } else {
            (r, l)
        };
        nfa.absorb(other)?;
        nfa.add_state(start)?;
        nfa.add_state(accept)?;

        nfa.add_transition(start, Symbol::Epsilon, l_start)?;
        nfa.add_transition(start, Symbol::Epsilon, r_start)?;
        nfa.add_transition(l_accept, Symbol::Epsilon, accept)?;
        nfa.add_transition(r_accept, Symbol::Epsilon, accept)?;
        nfa.with_endpoints_moved(start, accept)
    }

    // start --ε--> accept, start --ε--> inner, inner.accept --ε--> {accept, inner.start}
    fn compile_star(&mut self, inner: &Regex) -> Result<Nfa, StructuralError> {
        let mut nfa = self.compile(inner)?;
        let (inner_start, inner_accept) = (nfa.start(), nfa.accept());
        let start = self.ids.next();
        let accept = self.ids.next();
        nfa.add_state(start)?;
        nfa.add_state(accept)?;

        nfa.add_transition(start, Symbol::Epsilon, accept)?;
        nfa.add_transition(start, Symbol::Epsilon, inner_start)?;
        nfa.add_transition(inner_accept, Symbol::Epsilon, accept)?;
        nfa.add_transition(inner_accept, Symbol::Epsilon, inner_start)?;
        nfa.with_endpoints_moved(start, accept)
    }
}

/// Builds the automaton of `regex`, with state identifiers starting at zero.
pub fn build(regex: &Regex) -> Nfa {
    ThompsonBuilder::new().build(regex)
}

/// Builds the automaton of `regex`, allocating state identifiers from `ids`.
///
/// Automata built from the same source can be merged safely.
pub fn build_with(regex: &Regex, ids: &mut StateIdSource) -> Nfa {
    let mut builder = ThompsonBuilder::with_source(std::mem::take(ids));
    let nfa = builder.build(regex);
    *ids = builder.into_source();
    nfa
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_regex, StateId, Transition};
    use pretty_assertions::assert_eq;

    fn eps(from: usize, to: usize) -> Transition {
        Transition {
            from: StateId(from),
            symbol: Symbol::Epsilon,
            to: StateId(to),
        }
    }

    fn chr(from: usize, c: char, to: usize) -> Transition {
        Transition {
            from: StateId(from),
            symbol: Symbol::Char(c),
            to: StateId(to),
        }
    }

    #[test]
    fn literal() {
        let nfa = build(&Regex::Literal('a'));
        assert_eq!(nfa.start(), StateId(0));
        assert_eq!(nfa.accept(), StateId(1));
        assert_eq!(nfa.transitions().collect::<Vec<_>>(), vec![chr(0, 'a', 1)]);
    }

    #[test]
    fn epsilon_has_explicit_transition() {
        let nfa = build(&Regex::Epsilon);
        assert_eq!(nfa.transitions().collect::<Vec<_>>(), vec![eps(0, 1)]);
        assert!(nfa.alphabet().is_empty());
    }

    #[test]
    fn concat() {
        let nfa = build(&parse_regex("ab").unwrap());
        assert_eq!(nfa.start(), StateId(0));
        assert_eq!(nfa.accept(), StateId(3));
        assert_eq!(
            nfa.transitions().collect::<Vec<_>>(),
            vec![chr(0, 'a', 1), eps(1, 2), chr(2, 'b', 3)]
        );
    }

    #[test]
    fn union() {
        let nfa = build(&parse_regex("a|b").unwrap());
        assert_eq!(nfa.start(), StateId(4));
        assert_eq!(nfa.accept(), StateId(5));
        assert_eq!(
            nfa.transitions().collect::<Vec<_>>(),
            vec![
                chr(0, 'a', 1),
                eps(1, 5),
                chr(2, 'b', 3),
                eps(3, 5),
                eps(4, 0),
                eps(4, 2),
            ]
        );
    }

    #[test]
    fn star() {
        let nfa = build(&parse_regex("a*").unwrap());
        assert_eq!(nfa.start(), StateId(2));
        assert_eq!(nfa.accept(), StateId(3));
        assert_eq!(
            nfa.transitions().collect::<Vec<_>>(),
            vec![
                chr(0, 'a', 1),
                eps(1, 0),
                eps(1, 3),
                eps(2, 0),
                eps(2, 3),
            ]
        );
    }

    #[test]
    fn nested_stars_build_once() {
        let a = Regex::Literal('a');
        let once = build(&Regex::Star(Box::new(a.clone())));
        let twice = build(&Regex::Star(Box::new(Regex::Star(Box::new(a)))));
        assert_eq!(once, twice);
    }

    #[test]
    fn two_states_per_node_except_concat() {
        for (pattern, states) in [("a", 2), ("(a|bc)*", 10), ("a*b*", 8), ("((a|b)*c|@)d", 16)] {
            let nfa = build(&parse_regex(pattern).unwrap());
            assert_eq!(nfa.states().len(), states, "{pattern}");
        }
    }

    #[test]
    fn shared_source_keeps_automata_disjoint() {
        let regex = parse_regex("(a|bc)*").unwrap();
        let mut ids = StateIdSource::new();
        let first = build_with(&regex, &mut ids);
        let second = build_with(&regex, &mut ids);

        assert!(first.states().is_disjoint(second.states()));
        assert_eq!(ids.allocated(), first.states().len() + second.states().len());
    }

    #[test]
    fn chains_are_numbered_like_nested_builds() {
        // a: 0 -> 1, b: 2 -> 3, union: 4 -> 5, c: 6 -> 7, union: 8 -> 9
        let nfa = build(&parse_regex("a|b|c").unwrap());
        assert_eq!(nfa.start(), StateId(8));
        assert_eq!(nfa.accept(), StateId(9));
        assert_eq!(
            nfa.targets(StateId(8), Symbol::Epsilon).collect::<Vec<_>>(),
            vec![StateId(4), StateId(6)]
        );

        // grouping does not change the automaton of a concatenation
        let left = build(&parse_regex("(ab)c").unwrap());
        let right = build(&parse_regex("a(bc)").unwrap());
        assert_eq!(left, right);
        assert_eq!(
            left.transitions().collect::<Vec<_>>(),
            vec![
                chr(0, 'a', 1),
                eps(1, 2),
                chr(2, 'b', 3),
                eps(3, 4),
                chr(4, 'c', 5),
            ]
        );
    }

    #[test]
    fn builder_continues_from_source() {
        let mut ids = StateIdSource::new();
        ids.next();
        let mut builder = ThompsonBuilder::with_source(ids);
        let nfa = builder.build(&Regex::Literal('x'));
        assert_eq!(nfa.start(), StateId(1));
        assert_eq!(builder.into_source().allocated(), 3);
    }
}
