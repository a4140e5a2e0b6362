//! The propositional layer: formulas over real atoms (elements of Σ) and quoted
//! LDLf subformulas `⟦ψ⟧`, plus evaluation under a concrete interpretation.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::formula::Formula;

/// A concrete letter: the subset of Σ that is true.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interpretation(BTreeSet<Rc<str>>);

impl Interpretation {
    pub fn empty() -> Self {
        Interpretation(BTreeSet::new())
    }

    pub fn from_atoms(atoms: impl IntoIterator<Item = Rc<str>>) -> Self {
        Interpretation(atoms.into_iter().collect())
    }

    pub fn contains(&self, atom: &str) -> bool {
        self.0.contains(atom)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<str>> {
        self.0.iter()
    }
}

/// `δ(φ, i)` vs `δ(φ, ε)`: a letter, or the end-of-trace marker.
#[derive(Clone, Copy, Debug)]
pub enum Letter<'a> {
    Interpretation(&'a Interpretation),
    EndOfTrace,
}

impl<'a> Letter<'a> {
    /// Whether `atom` holds under this letter — the single place the base delta
    /// equations for atomic propositions (and their negations) are implemented.
    pub fn atom_holds(&self, atom: &str) -> bool {
        match self {
            Letter::Interpretation(i) => i.contains(atom),
            Letter::EndOfTrace => false,
        }
    }
}

#[derive(Debug)]
struct PropData {
    kind: PropKind,
    hash: u64,
}

/// A propositional formula over real atoms and quoted LDLf subformulas.
///
/// Cheap to clone (an `Rc` handle); equality and ordering are structural, with a
/// cached hash computed once at construction so repeated set/map membership checks
/// don't re-walk the tree.
#[derive(Clone)]
pub struct PropFormula(Rc<PropData>);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum PropKind {
    True,
    False,
    Atom(Rc<str>),
    Quoted(Formula),
    Not(PropFormula),
    And(Vec<PropFormula>),
    Or(Vec<PropFormula>),
}

fn combine_hash(tag: u8, children: impl IntoIterator<Item = u64>) -> u64 {
    let mut h: u64 = 0xcbf29ce484222325 ^ (tag as u64);
    for c in children {
        h ^= c;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

impl PropFormula {
    fn new(kind: PropKind) -> Self {
        let hash = match &kind {
            PropKind::True => combine_hash(0, []),
            PropKind::False => combine_hash(1, []),
            PropKind::Atom(a) => {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                a.hash(&mut hasher);
                combine_hash(2, [hasher.finish()])
            }
            PropKind::Quoted(f) => combine_hash(3, [f.content_hash()]),
            PropKind::Not(p) => combine_hash(4, [p.content_hash()]),
            PropKind::And(ps) => combine_hash(5, ps.iter().map(|p| p.content_hash())),
            PropKind::Or(ps) => combine_hash(6, ps.iter().map(|p| p.content_hash())),
        };
        PropFormula(Rc::new(PropData { kind, hash }))
    }

    pub fn kind(&self) -> &PropKind {
        &self.0.kind
    }

    pub fn content_hash(&self) -> u64 {
        self.0.hash
    }

    pub fn true_() -> Self {
        Self::new(PropKind::True)
    }

    pub fn false_() -> Self {
        Self::new(PropKind::False)
    }

    pub fn atom(name: Rc<str>) -> Self {
        Self::new(PropKind::Atom(name))
    }

    pub fn quoted(f: Formula) -> Self {
        Self::new(PropKind::Quoted(f))
    }

    pub fn not(p: PropFormula) -> Self {
        match p.kind() {
            PropKind::True => Self::false_(),
            PropKind::False => Self::true_(),
            PropKind::Not(inner) => inner.clone(),
            _ => Self::new(PropKind::Not(p)),
        }
    }

    /// `And` with identity-absorption (`And ∅ = True`), short-circuiting on
    /// `False`, flattening nested `And`s, and collapsing zero/one-element
    /// results.
    pub fn and(ps: impl IntoIterator<Item = PropFormula>) -> Self {
        let mut flat: Vec<PropFormula> = Vec::new();
        for p in ps {
            match p.kind() {
                PropKind::False => return Self::false_(),
                PropKind::True => {}
                PropKind::And(children) => flat.extend(children.iter().cloned()),
                _ => flat.push(p),
            }
        }
        flat.sort();
        flat.dedup();
        match flat.len() {
            0 => Self::true_(),
            1 => flat.into_iter().next().unwrap(),
            _ => Self::new(PropKind::And(flat)),
        }
    }

    /// Dual of [`PropFormula::and`]: `Or ∅ = False`.
    pub fn or(ps: impl IntoIterator<Item = PropFormula>) -> Self {
        let mut flat: Vec<PropFormula> = Vec::new();
        for p in ps {
            match p.kind() {
                PropKind::True => return Self::true_(),
                PropKind::False => {}
                PropKind::Or(children) => flat.extend(children.iter().cloned()),
                _ => flat.push(p),
            }
        }
        flat.sort();
        flat.dedup();
        match flat.len() {
            0 => Self::false_(),
            1 => flat.into_iter().next().unwrap(),
            _ => Self::new(PropKind::Or(flat)),
        }
    }

    /// Collects every quoted LDLf subformula appearing anywhere in this formula.
    pub fn quoted_atoms(&self, out: &mut BTreeSet<Formula>) {
        match self.kind() {
            PropKind::True | PropKind::False | PropKind::Atom(_) => {}
            PropKind::Quoted(f) => {
                out.insert(f.clone());
            }
            PropKind::Not(p) => p.quoted_atoms(out),
            PropKind::And(ps) | PropKind::Or(ps) => {
                for p in ps {
                    p.quoted_atoms(out);
                }
            }
        }
    }

    /// Evaluates this formula given a letter (for real atoms) and an assignment
    /// to quoted atoms (for the quoted layer). An explicit quoted-atom
    /// assignment lets the same function serve both `is_final` (quoted
    /// assignment always empty) and `minimal_models`'s internal satisfiability
    /// checks.
    pub fn eval(&self, letter: &Interpretation, quoted_true: &BTreeSet<Formula>) -> bool {
        match self.kind() {
            PropKind::True => true,
            PropKind::False => false,
            PropKind::Atom(a) => letter.contains(a),
            PropKind::Quoted(f) => quoted_true.contains(f),
            PropKind::Not(p) => !p.eval(letter, quoted_true),
            PropKind::And(ps) => ps.iter().all(|p| p.eval(letter, quoted_true)),
            PropKind::Or(ps) => ps.iter().any(|p| p.eval(letter, quoted_true)),
        }
    }
}

impl PartialEq for PropFormula {
    fn eq(&self, other: &Self) -> bool {
        self.0.hash == other.0.hash && self.0.kind == other.0.kind
    }
}

impl Eq for PropFormula {}

impl PartialOrd for PropFormula {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PropFormula {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.kind.cmp(&other.0.kind)
    }
}

impl Hash for PropFormula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash.hash(state);
    }
}

impl fmt::Debug for PropFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0.kind, f)
    }
}
