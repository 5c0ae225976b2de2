use crate::Nfa;

/// Returns true if `nfa` accepts all of `input`.
///
/// Characters outside of the alphabet of `nfa`, or that can not be consumed in the current
/// configuration, reject the input immediately. Rejection is not an error.
pub fn matches(nfa: &Nfa, input: &str) -> bool {
    let mut simulation = nfa.simulate();
    simulation.feed_str(input) && simulation.is_accepting()
}

impl Nfa {
    /// See [`matches`].
    pub fn matches(&self, input: &str) -> bool {
        matches(self, input)
    }
}
