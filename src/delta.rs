//! The delta (`δ`) function: symbolic one-step unfolding of an LDLf formula,
//! under either a concrete letter or the end-of-trace marker `ε`.
//!
//! `δ(φ, i)` rewrites φ into a propositional formula describing what the rest
//! of the trace (everything after `i`) must satisfy for `i · rest` to satisfy
//! φ. `Test` regexes are zero-width: they constrain the current letter without
//! advancing position. `Star` is the only construct that can defer real
//! progress, via a quoted continuation resolved on the next letter.

use crate::error::TranslationError;
use crate::formula::{Formula, FormulaKind};
use crate::propositional::{Letter, PropFormula};
use crate::regex::Regex;

type Result<T> = std::result::Result<T, TranslationError>;

/// Evaluates a `Test` slot's propositional formula under a letter. At end-of-trace
/// this evaluates against the empty interpretation — the same "no atom can hold"
/// convention as the base equations `δ(p, ε) = False` / `δ(¬p, ε) = True`.
fn eval_prop_at_letter(psi: &PropFormula, letter: Letter) -> bool {
    match letter {
        Letter::Interpretation(i) => psi.eval(i, &Default::default()),
        Letter::EndOfTrace => psi.eval(&crate::propositional::Interpretation::empty(), &Default::default()),
    }
}

/// `δ(φ, letter)` — φ must already be in NNF (callers go through [`crate::formula::Formula::nnf`]
/// before ever reaching `to_dfa`'s exploration loop).
pub fn delta(phi: &Formula, letter: Letter) -> Result<PropFormula> {
    match phi.kind() {
        FormulaKind::True => Ok(PropFormula::true_()),
        FormulaKind::False => Ok(PropFormula::false_()),
        FormulaKind::Atom(a) => Ok(if letter.atom_holds(a) {
            PropFormula::true_()
        } else {
            PropFormula::false_()
        }),
        FormulaKind::Not(inner) => {
            if !inner.is_atomic() {
                return Err(TranslationError::MalformedFormula(format!(
                    "negation applied to non-atomic formula {inner:?}; input was not in NNF"
                )));
            }
            let FormulaKind::Atom(a) = inner.kind() else {
                unreachable!()
            };
            Ok(if letter.atom_holds(a) {
                PropFormula::false_()
            } else {
                PropFormula::true_()
            })
        }
        FormulaKind::And(fs) => {
            let parts: Result<Vec<_>> = fs.iter().map(|f| delta(f, letter)).collect();
            Ok(PropFormula::and(parts?))
        }
        FormulaKind::Or(fs) => {
            let parts: Result<Vec<_>> = fs.iter().map(|f| delta(f, letter)).collect();
            Ok(PropFormula::or(parts?))
        }
        FormulaKind::Diamond(rho, phi) => delta_diamond(rho, phi, letter),
        FormulaKind::BoxModal(rho, phi) => delta_box(rho, phi, letter),
    }
}

/// `δ(<ρ>φ, letter)`.
fn delta_diamond(rho: &Regex, phi: &Formula, letter: Letter) -> Result<PropFormula> {
    match rho {
        Regex::Test(psi) => {
            if eval_prop_at_letter(psi, letter) {
                delta(phi, letter)
            } else {
                Ok(PropFormula::false_())
            }
        }
        Regex::Seq(rhos) => delta(&unfold_seq_diamond(rhos, phi), letter),
        Regex::Union(rhos) => {
            let parts: Result<Vec<_>> = rhos.iter().map(|r| delta_diamond(r, phi, letter)).collect();
            Ok(PropFormula::or(parts?))
        }
        Regex::Star(inner) => match letter {
            Letter::EndOfTrace => delta(phi, letter),
            Letter::Interpretation(_) => {
                let continuation = star_diamond_continuation(inner, phi);
                let here = delta(phi, letter)?;
                Ok(PropFormula::or([here, PropFormula::quoted(continuation)]))
            }
        },
    }
}

/// `δ([ρ]φ, letter)`.
fn delta_box(rho: &Regex, phi: &Formula, letter: Letter) -> Result<PropFormula> {
    match rho {
        Regex::Test(psi) => {
            if !eval_prop_at_letter(psi, letter) {
                Ok(PropFormula::true_())
            } else {
                delta(phi, letter)
            }
        }
        Regex::Seq(rhos) => delta(&unfold_seq_box(rhos, phi), letter),
        Regex::Union(rhos) => {
            let parts: Result<Vec<_>> = rhos.iter().map(|r| delta_box(r, phi, letter)).collect();
            Ok(PropFormula::and(parts?))
        }
        Regex::Star(inner) => match letter {
            Letter::EndOfTrace => delta(phi, letter),
            Letter::Interpretation(_) => {
                let continuation = star_box_continuation(inner, phi);
                let here = delta(phi, letter)?;
                Ok(PropFormula::and([here, PropFormula::quoted(continuation)]))
            }
        },
    }
}

/// Rewrites `<Seq[ρ1,ρ2,…]>φ` as the nested `<ρ1><ρ2>…φ`.
fn unfold_seq_diamond(rhos: &[Regex], phi: &Formula) -> Formula {
    rhos.iter()
        .rev()
        .fold(phi.clone(), |acc, rho| Formula::diamond(rho.clone(), acc))
}

fn unfold_seq_box(rhos: &[Regex], phi: &Formula) -> Formula {
    rhos.iter()
        .rev()
        .fold(phi.clone(), |acc, rho| Formula::box_(rho.clone(), acc))
}

/// Builds the quoted continuation `<ρ><Star ρ>φ` for the diamond loop-guard.
///
/// This is constructed fresh and handed to [`PropFormula::quoted`] directly — it
/// is never itself passed back through [`delta`] — which is what makes every
/// `Star` unfolding terminate in exactly one step rather than recursing forever.
fn star_diamond_continuation(rho: &Regex, phi: &Formula) -> Formula {
    let star_then_phi = Formula::diamond(Regex::star(rho.clone()), phi.clone());
    Formula::diamond(rho.clone(), star_then_phi).nnf()
}

fn star_box_continuation(rho: &Regex, phi: &Formula) -> Formula {
    let star_then_phi = Formula::box_(Regex::star(rho.clone()), phi.clone());
    Formula::box_(rho.clone(), star_then_phi).nnf()
}
