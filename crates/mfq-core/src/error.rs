use crate::predicate::PredicateError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// CompileError
///
/// Structured failure surfaced by specification parsing, schema typing and
/// update-rule generation. Every error is detected eagerly; no partial
/// specification is ever returned alongside one.
///

#[remain::sorted]
#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    #[error("bad predicate '{clause}': {source}")]
    BadPredicate {
        clause: String,
        #[source]
        source: PredicateError,
    },

    #[error("duplicate attribute '{attribute}' in schema")]
    DuplicateAttribute { attribute: String },

    #[error("duplicate aggregate output name '{name}'")]
    DuplicateOutputName { name: String },

    #[error("invalid projected value '{token}'")]
    InvalidProjection { token: String },

    #[error("invalid specification length: expected 5 or 6 lines, found {lines}")]
    InvalidSpecificationLength { lines: usize },

    #[error("unknown aggregate function '{name}'")]
    UnknownAggregateFunction { name: String },

    #[error("unknown attribute '{attribute}'")]
    UnknownAttribute { attribute: String },

    #[error("unparseable date '{operand}'")]
    UnparseableDate { operand: String },
}

impl CompileError {
    pub(crate) fn unknown_attribute(attribute: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            attribute: attribute.into(),
        }
    }

    /// Map a predicate-level failure onto the compile taxonomy.
    ///
    /// Date failures keep their own class; everything else is reported
    /// against the offending clause.
    pub(crate) fn from_predicate(clause: &str, err: PredicateError) -> Self {
        match err {
            PredicateError::UnparseableDate { operand } => Self::UnparseableDate { operand },
            source => Self::BadPredicate {
                clause: clause.to_string(),
                source,
            },
        }
    }

    /// Stage that rejected the input.
    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        match self {
            Self::DuplicateAttribute { .. } | Self::UnknownAttribute { .. } => {
                ErrorOrigin::Schema
            }
            Self::BadPredicate { .. } | Self::UnparseableDate { .. } => ErrorOrigin::Predicate,
            Self::DuplicateOutputName { .. }
            | Self::InvalidProjection { .. }
            | Self::UnknownAggregateFunction { .. } => ErrorOrigin::Projection,
            Self::InvalidSpecificationLength { .. } => ErrorOrigin::Specification,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorOrigin {
    Predicate,
    Projection,
    Schema,
    Specification,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Predicate => "predicate",
            Self::Projection => "projection",
            Self::Schema => "schema",
            Self::Specification => "specification",
        };
        write!(f, "{label}")
    }
}
