//! Module: predicate
//! Responsibility: `=`/`!=` comparisons between literals and grouping-variable
//! attribute references, their lexical classification and row evaluation.
//! Does not own: splitting specification lines into clauses.
//! Boundary: built once by the query parser, evaluated per row per grouping
//! variable during a scan.

mod ast;
mod classify;
mod eval;
mod parse;
mod resolved;

#[cfg(test)]
mod tests;

pub use ast::{AttributeRef, CompareOp, Operand, Predicate};
pub use eval::Row;
pub use resolved::{ResolvedOperand, ResolvedPredicate};

use thiserror::Error as ThisError;

///
/// PredicateError
///
/// Failure while turning one clause into a `Predicate`.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PredicateError {
    #[error("expected 3 tokens, found {tokens}")]
    MalformedPredicate { tokens: usize },

    #[error("unknown operator '{op}'")]
    UnknownOperator { op: String },

    #[error("unparseable date '{operand}'")]
    UnparseableDate { operand: String },
}
