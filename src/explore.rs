//! The subset-construction explorer: `to_dfa`.

use std::collections::{BTreeSet, HashMap, VecDeque};

use itertools::Itertools;
use log::{debug, trace};

use crate::dfa::Dfa;
use crate::dfa_state::DfaState;
use crate::error::TranslationError;
use crate::formula::{find_atoms, Formula};
use crate::nfa_state::NfaState;
use crate::propositional::Interpretation;

/// Translates an LDLf formula into a DFA recognizing exactly the finite traces
/// that satisfy it.
///
/// Algorithm:
///   1. Normalize to NNF and seed the initial DFA state.
///   2. Extract Σ and fix an index for each atom.
///   3. BFS over DFA states, computing each successor via delta + minimal-model
///      enumeration for every one of the `2^|Σ|` interpretations.
///
/// Termination is guaranteed because the set of reachable canonical DFA states
/// is bounded by the subformula closure of the (NNF of the) input.
pub fn to_dfa(formula: &Formula) -> Result<Dfa, TranslationError> {
    let phi0 = formula.nnf();

    let mut atom_set = BTreeSet::new();
    find_atoms(&phi0, &mut atom_set);
    let atoms: Vec<_> = atom_set.into_iter().collect();
    let n = atoms.len();
    debug!("to_dfa: |Σ| = {n}");

    let s0 = DfaState::singleton(NfaState::singleton(phi0));

    let mut dfa = Dfa::new(atoms.clone());
    let mut discovered: HashMap<DfaState, usize> = HashMap::new();

    let idx0 = dfa.push_state(s0.is_final()?);
    discovered.insert(s0.clone(), idx0);
    dfa.set_initial_state(idx0);

    let mut queue: VecDeque<(DfaState, usize)> = VecDeque::new();
    queue.push_back((s0, idx0));

    // Enumerate every subset of atom indices once; reuse it for every state's
    // interpretations rather than rebuilding the powerset per state.
    let masks: Vec<(usize, BTreeSet<usize>)> = (0..n)
        .powerset()
        .map(|subset| {
            let cube: BTreeSet<usize> = subset.into_iter().collect();
            let mask = cube.iter().fold(0usize, |acc, &i| acc | (1 << i));
            (mask, cube)
        })
        .sorted_by_key(|(mask, _)| *mask)
        .collect();

    while let Some((state, idx)) = queue.pop_front() {
        trace!("to_dfa: exploring state {idx}");
        for (mask, cube) in &masks {
            let letter = Interpretation::from_atoms(cube.iter().map(|&i| atoms[i].clone()));
            let successor = state.next_state(&letter)?;
            let dst = match discovered.get(&successor) {
                Some(&existing) => existing,
                None => {
                    let new_idx = dfa.push_state(successor.is_final()?);
                    discovered.insert(successor.clone(), new_idx);
                    queue.push_back((successor, new_idx));
                    trace!("to_dfa: discovered state {new_idx}");
                    new_idx
                }
            };
            dfa.set_transition(idx, *mask, dst);
        }
    }

    debug!("to_dfa: {} reachable states", dfa.num_states());
    Ok(dfa)
}
