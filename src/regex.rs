//! Regular expressions `ρ` over propositional tests, used inside `<ρ>φ` and `[ρ]φ`.

use crate::propositional::PropFormula;

/// A regular expression over propositional tests: `Test ψ`, `Union`, `Seq`, `Star`.
///
/// `Test ψ` is a zero-width assertion: it constrains the current letter without
/// advancing position. `Star` is the only constructor whose modalities can
/// advance across more than one letter, by repeating its body.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Regex {
    Test(PropFormula),
    Union(Vec<Regex>),
    Seq(Vec<Regex>),
    Star(Box<Regex>),
}

impl Regex {
    pub fn test(psi: PropFormula) -> Regex {
        Regex::Test(psi)
    }

    pub fn union(mut rhos: Vec<Regex>) -> Regex {
        if rhos.len() == 1 {
            return rhos.pop().unwrap();
        }
        Regex::Union(rhos)
    }

    pub fn seq(mut rhos: Vec<Regex>) -> Regex {
        if rhos.len() == 1 {
            return rhos.pop().unwrap();
        }
        Regex::Seq(rhos)
    }

    pub fn star(rho: Regex) -> Regex {
        Regex::Star(Box::new(rho))
    }
}
