use crate::{
    error::CompileError,
    schema::{AttributeType, OutputType},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// AggregateFunction
///
/// Closed set of fold functions. Parsed once from the lowercase name and
/// matched exhaustively everywhere after.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Max,
    Min,
}

impl AggregateFunction {
    pub const ALL: [Self; 5] = [Self::Count, Self::Sum, Self::Avg, Self::Max, Self::Min];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::Avg => "avg",
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    /// Output type of this function over an attribute of type `source`.
    #[must_use]
    pub fn output_type(self, source: AttributeType) -> OutputType {
        match self {
            Self::Count => OutputType::Count,
            Self::Avg => OutputType::Ratio,
            Self::Sum | Self::Max | Self::Min => source.into(),
        }
    }

    /// Return whether this function belongs to the extrema family.
    #[must_use]
    pub const fn is_extrema(self) -> bool {
        matches!(self, Self::Max | Self::Min)
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AggregateFunction {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|function| function.name() == s)
            .ok_or_else(|| CompileError::UnknownAggregateFunction {
                name: s.to_string(),
            })
    }
}
