//! # ldlfa
//!
//! `ldlfa` translates LDLf (Linear Dynamic Logic over finite traces) formulas
//! into deterministic finite automata over finite traces.
//!
//! ## Usage
//!
//! ```rust
//! use ldlfa::formula::Formula;
//! use ldlfa::regex::Regex;
//! use ldlfa::propositional::PropFormula;
//! use ldlfa::explore::to_dfa;
//!
//! // <Test(a)>True: accepts every trace whose first symbol contains `a`.
//! let phi = Formula::diamond(
//!     Regex::test(PropFormula::atom("a".into())),
//!     Formula::true_(),
//! );
//! let dfa = to_dfa(&phi).unwrap();
//! assert!(dfa.num_states() >= 2);
//! ```
//!
//! ## Model
//!
//! A formula is rewritten to negation normal form ([`formula::Formula::nnf`]), then
//! symbolically unfolded one trace position at a time by [`delta::delta`]. Each
//! application of delta produces a propositional formula over the real alphabet and
//! "quoted" LDLf subformulas (`⟦ψ⟧`); [`minimal_models::minimal_models`] enumerates
//! its set-minimal satisfying assignments, each of which becomes one successor NFA
//! state ([`nfa_state::NfaState`]). [`explore::to_dfa`] then runs the classic
//! subset construction over these NFA states, producing a [`dfa::Dfa`] whose states
//! are canonical sets of NFA states ([`dfa_state::DfaState`]).
//!
//! ## Operations
//!
//! This crate currently supports:
//!
//! * Building LDLf [formulas](formula::Formula) and [regular expressions](regex::Regex)
//! * [Negation normal form](formula::Formula::nnf)
//! * The symbolic [delta unfolding](delta::delta) of a formula under a letter or `ε`
//! * [Minimal-model enumeration](minimal_models::minimal_models) over quoted atoms
//! * [Translating a formula into a DFA](explore::to_dfa)
//! * [Step-by-step evaluation](dfa::DfaEvaluator) of a trace against a DFA

pub mod delta;
pub mod dfa;
pub mod dfa_state;
pub mod error;
pub mod explore;
pub mod formula;
pub mod minimal_models;
pub mod nfa_state;
pub mod propositional;
pub mod regex;

pub use dfa::Dfa;
pub use error::TranslationError;
pub use explore::to_dfa;
pub use formula::Formula;
pub use regex::Regex;

#[cfg(test)]
mod tests;
