//! Minimal-model enumeration over the quoted atoms of a propositional formula.
//!
//! A minimal model is a set-minimal assignment to the quoted atoms (real atoms
//! are assumed already decided by the caller, since `delta` only ever hands
//! this module a formula whose real atoms have already been reduced to
//! constants).

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::formula::Formula;
use crate::propositional::{Interpretation, PropFormula};

/// Returns the set-minimal satisfying assignments to `prop`'s quoted atoms.
///
/// Implemented as brute-force enumeration over the powerset of the quoted-atom
/// universe (via `itertools::Itertools::powerset`); the quoted-atom universe
/// per call is bounded by the subformula closure and is small in practice.
pub fn minimal_models(prop: &PropFormula) -> Vec<BTreeSet<Formula>> {
    let mut universe = BTreeSet::new();
    prop.quoted_atoms(&mut universe);
    let universe: Vec<Formula> = universe.into_iter().collect();

    let empty_interp = Interpretation::empty();
    let satisfying: Vec<BTreeSet<Formula>> = universe
        .iter()
        .cloned()
        .powerset()
        .filter_map(|subset| {
            let assignment: BTreeSet<Formula> = subset.into_iter().collect();
            if prop.eval(&empty_interp, &assignment) {
                Some(assignment)
            } else {
                None
            }
        })
        .collect();

    satisfying
        .iter()
        .filter(|candidate| {
            !satisfying
                .iter()
                .any(|other| other != *candidate && other.is_subset(candidate))
        })
        .cloned()
        .collect()
}
