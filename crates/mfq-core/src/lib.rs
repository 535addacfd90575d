//! Core compiler for multi-feature aggregation queries: schema registry,
//! predicates, aggregate specifications, the query specification parser and
//! the update-rule generator.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod aggregate;
pub mod error;
pub mod identity;
pub mod obs;
pub mod predicate;
pub mod query;
pub mod rule;
pub mod schema;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// CONSTANTS
///

/// Minimum number of lines in a query specification.
pub const MIN_SPEC_LINES: usize = 5;

/// Maximum number of lines in a query specification (having line included).
pub const MAX_SPEC_LINES: usize = 6;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        aggregate::{AggregateFunction, AggregateSpec},
        identity::GroupingVariableId,
        predicate::{CompareOp, Predicate},
        query::{ProjectedValue, QuerySpec},
        rule::UpdateRule,
        schema::{AttributeType, OutputType, RowSlot, SchemaRegistry},
        value::Value,
    };
}
