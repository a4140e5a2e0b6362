//! The NFA-state canonical representation: a set of LDLf formulas, interpreted
//! conjunctively.

use std::collections::BTreeSet;

use crate::delta::delta;
use crate::error::TranslationError;
use crate::formula::Formula;
use crate::minimal_models::minimal_models;
use crate::propositional::{Interpretation, Letter, PropFormula};

/// An immutable set of LDLf formulas. The empty set represents `⊤`.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NfaState {
    formulas: BTreeSet<Formula>,
}

impl NfaState {
    pub fn new(formulas: BTreeSet<Formula>) -> Self {
        NfaState { formulas }
    }

    pub fn singleton(phi: Formula) -> Self {
        let mut formulas = BTreeSet::new();
        formulas.insert(phi);
        NfaState { formulas }
    }

    pub fn formulas(&self) -> &BTreeSet<Formula> {
        &self.formulas
    }

    /// `is_final(s)`: true iff `⋀_{φ ∈ s} δ(φ, ε)` evaluates to `True`.
    pub fn is_final(&self) -> Result<bool, TranslationError> {
        let parts: Result<Vec<_>, _> = self
            .formulas
            .iter()
            .map(|f| delta(f, Letter::EndOfTrace))
            .collect();
        let conjunction = PropFormula::and(parts?);
        Ok(conjunction.eval(&Interpretation::empty(), &Default::default()))
    }

    /// `next_states(s, i)`: one successor NFA state per minimal model of
    /// `⋀_{φ ∈ s} δ(φ, i)`, with quoted atoms unquoted back into formulas.
    pub fn next_states(&self, letter: &Interpretation) -> Result<Vec<NfaState>, TranslationError> {
        let parts: Result<Vec<_>, _> = self
            .formulas
            .iter()
            .map(|f| delta(f, Letter::Interpretation(letter)))
            .collect();
        let conjunction = PropFormula::and(parts?);
        Ok(minimal_models(&conjunction)
            .into_iter()
            .map(NfaState::new)
            .collect())
    }

    /// `next_transitions(s)`: debug/inspection only, not used by `to_dfa` itself
    /// (which iterates interpretations explicitly).
    pub fn next_transitions(
        &self,
        alphabet: &[std::rc::Rc<str>],
    ) -> Result<Vec<(Interpretation, Vec<NfaState>)>, TranslationError> {
        use itertools::Itertools;
        alphabet
            .iter()
            .cloned()
            .powerset()
            .map(|subset| {
                let letter = Interpretation::from_atoms(subset);
                let successors = self.next_states(&letter)?;
                Ok((letter, successors))
            })
            .collect()
    }
}
