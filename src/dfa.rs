//! The DFA record produced by `to_dfa`: states, transitions, and read-only
//! accessors.

use std::collections::BTreeSet;
use std::rc::Rc;

/// One transition `(src, cube, dst)`. `cube` is the *full* positive-encoded
/// assignment (the set of true variable indices) — partial cubes are a
/// compression optimization left to consumers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub src: usize,
    pub cube: BTreeSet<usize>,
    pub dst: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DfaStateRecord {
    is_final: bool,
    /// Indexed by interpretation bitmask (bit `i` set ⇔ `atoms[i]` true); value
    /// is the 1-based destination state index.
    by_mask: Vec<usize>,
}

/// A deterministic finite automaton over Σ, as produced by [`crate::to_dfa`].
///
/// State indices are positive integers assigned in BFS discovery order; index 1
/// is always the initial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    atoms: Vec<Rc<str>>,
    states: Vec<DfaStateRecord>,
    initial_state: usize,
}

impl Dfa {
    pub(crate) fn new(atoms: Vec<Rc<str>>) -> Self {
        Dfa {
            atoms,
            states: Vec::new(),
            initial_state: 1,
        }
    }

    pub(crate) fn push_state(&mut self, is_final: bool) -> usize {
        self.states.push(DfaStateRecord {
            is_final,
            by_mask: vec![0; 1usize << self.atoms.len()],
        });
        self.states.len()
    }

    pub(crate) fn set_transition(&mut self, src: usize, mask: usize, dst: usize) {
        self.states[src - 1].by_mask[mask] = dst;
    }

    pub(crate) fn set_initial_state(&mut self, idx: usize) {
        self.initial_state = idx;
    }

    pub fn num_variables(&self) -> usize {
        self.atoms.len()
    }

    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    pub fn atoms(&self) -> &[Rc<str>] {
        &self.atoms
    }

    pub fn initial_state_index(&self) -> usize {
        self.initial_state
    }

    pub fn is_final(&self, index: usize) -> bool {
        self.states[index - 1].is_final
    }

    /// Deterministic transition from `src` on the interpretation whose true atoms
    /// (by index into [`Dfa::atoms`]) are `cube`.
    pub fn step(&self, src: usize, cube: &BTreeSet<usize>) -> usize {
        self.states[src - 1].by_mask[cube_to_mask(cube)]
    }

    /// All transitions, grouped by `src` in index order and, within a `src`, in
    /// the deterministic order of the interpretation enumeration (mask order).
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        let n = self.atoms.len();
        self.states.iter().enumerate().flat_map(move |(i, state)| {
            let src = i + 1;
            state
                .by_mask
                .iter()
                .enumerate()
                .map(move |(mask, &dst)| Transition {
                    src,
                    cube: mask_to_cube(mask, n),
                    dst,
                })
        })
    }
}

pub(crate) fn mask_to_cube(mask: usize, n: usize) -> BTreeSet<usize> {
    (0..n).filter(|i| mask & (1 << i) != 0).collect()
}

fn cube_to_mask(cube: &BTreeSet<usize>) -> usize {
    cube.iter().fold(0usize, |acc, &i| acc | (1 << i))
}

/// Incremental stepper over a [`Dfa`], one interpretation at a time.
///
/// Unlike [`Dfa::step`], which is stateless and total, an evaluator tracks a
/// current state across a sequence of interpretations so callers can feed a
/// trace symbol by symbol and ask `is_accepting` at any prefix.
#[derive(Debug, Clone)]
pub struct DfaEvaluator<'a> {
    dfa: &'a Dfa,
    current_state: usize,
}

impl<'a> DfaEvaluator<'a> {
    pub fn new(dfa: &'a Dfa) -> Self {
        DfaEvaluator {
            dfa,
            current_state: dfa.initial_state,
        }
    }

    pub fn current_state_idx(&self) -> usize {
        self.current_state
    }

    pub fn is_accepting(&self) -> bool {
        self.dfa.is_final(self.current_state)
    }

    /// Advances by one interpretation, given as the set of true atom indices.
    pub fn step(&mut self, cube: &BTreeSet<usize>) -> usize {
        self.current_state = self.dfa.step(self.current_state, cube);
        self.current_state
    }

    pub fn step_multiple<'c>(&mut self, cubes: impl IntoIterator<Item = &'c BTreeSet<usize>>) -> usize {
        for cube in cubes {
            self.step(cube);
        }
        self.current_state
    }
}

impl<'a> From<&'a Dfa> for DfaEvaluator<'a> {
    fn from(value: &'a Dfa) -> Self {
        DfaEvaluator::new(value)
    }
}
