#![warn(missing_docs)]
//! Compile regular expressions to nondeterministic finite automata with Thompson's construction,
//! and simulate them.
//!
//! ```rust
//! use thompson::{build, parse_regex};
//!
//! let nfa = build(&parse_regex("(a|bc)*").unwrap());
//! assert!(nfa.matches("abcaa"));
//! assert!(!nfa.matches("aba"));
//!
//! // one set of active states per consumed character
//! let steps: Vec<_> = nfa.trace("bc").collect();
//! assert_eq!(steps.len(), 3);
//! assert!(steps[2].active.contains(&nfa.accept()));
//! ```
//!
//! The pipeline is: pattern text, [`parse_regex`], [`Regex`], [`build`], [`Nfa`], then
//! [`matches`] or [`trace`]. Every [`build`] allocates state identifiers from its own
//! [`StateIdSource`]; use [`build_with`] to share one source between automata.
#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

pub use thompson_regular_expressions::*;

mod compile;
pub use compile::{build, build_with, ThompsonBuilder};

mod ids;
pub use ids::StateIdSource;

mod nfa;
pub use nfa::{Nfa, StateId, StructuralError, Symbol, Transition};

mod sim;
pub use sim::Simulation;

mod matcher;
pub use matcher::matches;

mod trace;
pub use trace::{trace, Trace, TraceStep};

#[cfg(feature = "dot")]
mod render;
#[cfg(feature = "dot")]
pub use render::RenderSettings;

/// Parse a pattern at compile time.
///
/// Expands to an expression of type [`Regex`]. A malformed pattern is a compile error that points
/// at the literal.
///
/// ```rust
/// use thompson::{build, pattern, Regex};
///
/// let regex: Regex = pattern!("a*b");
/// assert!(build(&regex).matches("aab"));
/// ```
///
/// ```compile_fail
/// let regex = thompson::pattern!("(a|b");
/// ```
pub use thompson_macros::pattern;
