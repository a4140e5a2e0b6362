//! The LDLf formula AST and its negation normal form (NNF) rewriter.

use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use crate::regex::Regex;

#[derive(Debug)]
struct FormulaData {
    kind: FormulaKind,
    hash: u64,
}

/// An LDLf formula: `True`/`False`, an atomic proposition, boolean connectives, or
/// a dynamic-logic modality over a [`Regex`].
///
/// Cheap to clone (an `Rc` handle). Equality, ordering and hashing are all
/// structural and derived from a hash cached at construction time, so repeated
/// set and map membership checks during exploration don't re-walk the tree.
#[derive(Clone)]
pub struct Formula(Rc<FormulaData>);

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormulaKind {
    True,
    False,
    Atom(Rc<str>),
    Not(Formula),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    Diamond(Regex, Formula),
    BoxModal(Regex, Formula),
}

fn combine_hash(tag: u8, children: impl IntoIterator<Item = u64>) -> u64 {
    let mut h: u64 = 0x9e3779b97f4a7c15 ^ (tag as u64);
    for c in children {
        h ^= c;
        h = h.wrapping_mul(0x100000001b3);
    }
    h
}

impl Formula {
    fn new(kind: FormulaKind) -> Self {
        let hash = match &kind {
            FormulaKind::True => combine_hash(0, []),
            FormulaKind::False => combine_hash(1, []),
            FormulaKind::Atom(a) => {
                let mut hasher = std::collections::hash_map::DefaultHasher::new();
                a.hash(&mut hasher);
                combine_hash(2, [hasher.finish()])
            }
            FormulaKind::Not(f) => combine_hash(3, [f.content_hash()]),
            FormulaKind::And(fs) => combine_hash(4, fs.iter().map(|f| f.content_hash())),
            FormulaKind::Or(fs) => combine_hash(5, fs.iter().map(|f| f.content_hash())),
            FormulaKind::Diamond(rho, phi) => {
                combine_hash(6, [regex_hash(rho), phi.content_hash()])
            }
            FormulaKind::BoxModal(rho, phi) => {
                combine_hash(7, [regex_hash(rho), phi.content_hash()])
            }
        };
        Formula(Rc::new(FormulaData { kind, hash }))
    }

    pub fn kind(&self) -> &FormulaKind {
        &self.0.kind
    }

    pub fn content_hash(&self) -> u64 {
        self.0.hash
    }

    pub fn true_() -> Self {
        Self::new(FormulaKind::True)
    }

    pub fn false_() -> Self {
        Self::new(FormulaKind::False)
    }

    pub fn atom(name: impl Into<Rc<str>>) -> Self {
        Self::new(FormulaKind::Atom(name.into()))
    }

    pub fn not(f: Formula) -> Self {
        match f.kind() {
            FormulaKind::True => Self::false_(),
            FormulaKind::False => Self::true_(),
            FormulaKind::Not(inner) => inner.clone(),
            _ => Self::new(FormulaKind::Not(f)),
        }
    }

    /// Canonical conjunction: identity-absorbing, flattening, set-minimal.
    pub fn and(fs: impl IntoIterator<Item = Formula>) -> Self {
        let mut flat: Vec<Formula> = Vec::new();
        for f in fs {
            match f.kind() {
                FormulaKind::False => return Self::false_(),
                FormulaKind::True => {}
                FormulaKind::And(children) => flat.extend(children.iter().cloned()),
                _ => flat.push(f),
            }
        }
        flat.sort();
        flat.dedup();
        match flat.len() {
            0 => Self::true_(),
            1 => flat.into_iter().next().unwrap(),
            _ => Self::new(FormulaKind::And(flat)),
        }
    }

    /// Canonical disjunction, dual of [`Formula::and`].
    pub fn or(fs: impl IntoIterator<Item = Formula>) -> Self {
        let mut flat: Vec<Formula> = Vec::new();
        for f in fs {
            match f.kind() {
                FormulaKind::True => return Self::true_(),
                FormulaKind::False => {}
                FormulaKind::Or(children) => flat.extend(children.iter().cloned()),
                _ => flat.push(f),
            }
        }
        flat.sort();
        flat.dedup();
        match flat.len() {
            0 => Self::false_(),
            1 => flat.into_iter().next().unwrap(),
            _ => Self::new(FormulaKind::Or(flat)),
        }
    }

    pub fn diamond(rho: Regex, phi: Formula) -> Self {
        Self::new(FormulaKind::Diamond(rho, phi))
    }

    pub fn box_(rho: Regex, phi: Formula) -> Self {
        Self::new(FormulaKind::BoxModal(rho, phi))
    }

    pub fn is_atomic(&self) -> bool {
        matches!(self.kind(), FormulaKind::Atom(_))
    }

    /// Negation normal form: pushes `Not` down to atoms via De Morgan and the
    /// diamond/box duality (`<ρ>φ ↔ ¬[ρ]¬φ`, `[ρ]φ ↔ ¬<ρ>¬φ`). Total: negation
    /// is never introduced on regular expressions, only on LDLf subformulas.
    pub fn nnf(&self) -> Formula {
        match self.kind() {
            FormulaKind::True | FormulaKind::False | FormulaKind::Atom(_) => self.clone(),
            FormulaKind::Not(inner) => nnf_not(inner),
            FormulaKind::And(fs) => Formula::and(fs.iter().map(Formula::nnf)),
            FormulaKind::Or(fs) => Formula::or(fs.iter().map(Formula::nnf)),
            FormulaKind::Diamond(rho, phi) => Formula::diamond(rho.clone(), phi.nnf()),
            FormulaKind::BoxModal(rho, phi) => Formula::box_(rho.clone(), phi.nnf()),
        }
    }
}

/// `nnf(Not(inner))`, dispatching by `inner`'s top connective.
fn nnf_not(inner: &Formula) -> Formula {
    match inner.kind() {
        FormulaKind::True => Formula::false_(),
        FormulaKind::False => Formula::true_(),
        FormulaKind::Atom(_) => Formula::not(inner.clone()),
        FormulaKind::Not(grandchild) => grandchild.nnf(),
        FormulaKind::And(fs) => Formula::or(fs.iter().map(|f| nnf_not(f))),
        FormulaKind::Or(fs) => Formula::and(fs.iter().map(|f| nnf_not(f))),
        FormulaKind::Diamond(rho, phi) => Formula::box_(rho.clone(), nnf_not(phi)),
        FormulaKind::BoxModal(rho, phi) => Formula::diamond(rho.clone(), nnf_not(phi)),
    }
}

fn regex_hash(rho: &Regex) -> u64 {
    match rho {
        Regex::Test(psi) => combine_hash(0, [psi.content_hash()]),
        Regex::Union(rhos) => combine_hash(1, rhos.iter().map(regex_hash)),
        Regex::Seq(rhos) => combine_hash(2, rhos.iter().map(regex_hash)),
        Regex::Star(inner) => combine_hash(3, [regex_hash(inner)]),
    }
}

/// Collects every real atom referenced anywhere in `phi`, including inside
/// `Test` regex leaves. Used to fix Σ (and an index per atom) before
/// exploration starts.
pub fn find_atoms(phi: &Formula, out: &mut BTreeSet<Rc<str>>) {
    match phi.kind() {
        FormulaKind::True | FormulaKind::False => {}
        FormulaKind::Atom(a) => {
            out.insert(a.clone());
        }
        FormulaKind::Not(f) => find_atoms(f, out),
        FormulaKind::And(fs) | FormulaKind::Or(fs) => {
            for f in fs {
                find_atoms(f, out);
            }
        }
        FormulaKind::Diamond(rho, f) | FormulaKind::BoxModal(rho, f) => {
            find_atoms_regex(rho, out);
            find_atoms(f, out);
        }
    }
}

fn find_atoms_regex(rho: &Regex, out: &mut BTreeSet<Rc<str>>) {
    match rho {
        Regex::Test(psi) => find_atoms_prop(psi, out),
        Regex::Union(rhos) | Regex::Seq(rhos) => {
            for r in rhos {
                find_atoms_regex(r, out);
            }
        }
        Regex::Star(inner) => find_atoms_regex(inner, out),
    }
}

fn find_atoms_prop(psi: &crate::propositional::PropFormula, out: &mut BTreeSet<Rc<str>>) {
    use crate::propositional::PropKind;
    match psi.kind() {
        PropKind::True | PropKind::False => {}
        PropKind::Atom(a) => {
            out.insert(a.clone());
        }
        PropKind::Quoted(f) => find_atoms(f, out),
        PropKind::Not(p) => find_atoms_prop(p, out),
        PropKind::And(ps) | PropKind::Or(ps) => {
            for p in ps {
                find_atoms_prop(p, out);
            }
        }
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.0.hash == other.0.hash && self.0.kind == other.0.kind
    }
}

impl Eq for Formula {}

impl PartialOrd for Formula {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Formula {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.kind.cmp(&other.0.kind)
    }
}

impl Hash for Formula {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash.hash(state);
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0.kind, f)
    }
}
