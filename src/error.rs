use thiserror::Error;

/// Errors raised while normalizing, delta-expanding, or translating an LDLf formula.
///
/// The core is total over well-formed inputs: these variants only fire when an AST
/// violates a precondition (`MalformedFormula`) or when an internal invariant the
/// core relies on for correctness does not hold (`InternalInvariant`, which indicates
/// a bug rather than a bad input). Neither is recoverable; a caller that hits either
/// should treat the whole translation call as failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    #[error("formula is not negation-normalizable: {0}")]
    MalformedFormula(String),

    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}
