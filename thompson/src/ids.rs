use crate::StateId;

/// Hands out fresh [`StateId`]s.
///
/// Automata built from the same source have pairwise disjoint states. Nothing is shared between
/// separate sources: every [`build`](crate::build) call creates its own, and concurrent builds
/// must each own one.
#[derive(Debug, Default, Clone)]
pub struct StateIdSource {
    next: usize,
}

impl StateIdSource {
    /// A source starting at identifier 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an identifier this source has not returned before (since the last [`reset`](Self::reset)).
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> StateId {
        let id = StateId(self.next);
        self.next += 1;
        id
    }

    /// Rewinds to the initial identifier.
    ///
    /// Identifiers handed out before the reset will be handed out again, so automata built
    /// before and after a reset must not be merged.
    pub fn reset(&mut self) {
        self.next = 0;
    }

    /// How many identifiers have been handed out since the last reset.
    pub fn allocated(&self) -> usize {
        self.next
    }
}
