//! The DFA-state canonical representation: a set of NFA states, interpreted
//! disjunctively.

use std::collections::BTreeSet;

use crate::error::TranslationError;
use crate::nfa_state::NfaState;
use crate::propositional::Interpretation;

/// An immutable set of NFA states (a subset-construction state). The empty
/// set is distinguished: absorbing and non-final.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DfaState {
    nfa_states: BTreeSet<NfaState>,
}

impl DfaState {
    pub fn new(nfa_states: BTreeSet<NfaState>) -> Self {
        DfaState { nfa_states }
    }

    pub fn singleton(s: NfaState) -> Self {
        let mut nfa_states = BTreeSet::new();
        nfa_states.insert(s);
        DfaState { nfa_states }
    }

    pub fn nfa_states(&self) -> &BTreeSet<NfaState> {
        &self.nfa_states
    }

    /// `is_final(S)`: true iff any contained NFA state is final.
    pub fn is_final(&self) -> Result<bool, TranslationError> {
        for s in &self.nfa_states {
            if s.is_final()? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// `next_state(S, i)`: the union of every contained NFA state's successors,
    /// folded into one deterministic DFA state.
    pub fn next_state(&self, letter: &Interpretation) -> Result<DfaState, TranslationError> {
        let mut out = BTreeSet::new();
        for s in &self.nfa_states {
            out.extend(s.next_states(letter)?);
        }
        Ok(DfaState::new(out))
    }
}
