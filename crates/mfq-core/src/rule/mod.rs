//! Module: rule
//! Responsibility: per-row update rules for aggregate specifications.
//! Does not own: rendering rules into a target language or finalizing
//! averages (the consumer divides the running sum by the running count).
//! Boundary: pure translation from `AggregateSpec` + schema to `UpdateRule`.

mod generate;


pub use generate::{AggregateRule, AverageRules, RuleGenerator};

use crate::schema::{OutputType, RowSlot};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RowCast
///
/// Read the value at `slot` from the current row, coerced to `domain`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RowCast {
    pub slot: RowSlot,
    pub domain: OutputType,
}

///
/// FoldOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FoldOp {
    Max,
    Min,
}

impl fmt::Display for FoldOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Max => "max",
            Self::Min => "min",
        })
    }
}

///
/// UpdateRule
///
/// How one row folds into the running output state of one aggregate.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// Set the slot to a constant (`count` contributes 1 per row).
    SetConstant(i64),

    /// Take the row's value (`sum`, `avg`).
    CastFromRow(RowCast),

    /// Combine the previously accumulated output with the row's value.
    Fold {
        previous_output: String,
        op: FoldOp,
        source: RowCast,
    },
}

impl UpdateRule {
    /// Source slot read from the row, if any.
    #[must_use]
    pub const fn source_slot(&self) -> Option<RowSlot> {
        match self {
            Self::SetConstant(_) => None,
            Self::CastFromRow(cast) | Self::Fold { source: cast, .. } => Some(cast.slot),
        }
    }
}

impl fmt::Display for UpdateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetConstant(value) => write!(f, "set_constant({value})"),
            Self::CastFromRow(cast) => write!(f, "cast_from_row({}: {})", cast.slot, cast.domain),
            Self::Fold {
                previous_output,
                op,
                source,
            } => write!(
                f,
                "fold({previous_output}, {op}, cast_from_row({}: {}))",
                source.slot, source.domain
            ),
        }
    }
}
