mod compare;
mod date;

#[cfg(test)]
mod tests;

use crate::schema::AttributeType;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::{ValueFamily, exact_eq};
pub use date::Date;

///
/// Value
///
/// Runtime scalar carried by input rows and predicate literals.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int(i64),
    Real(f64),
    Text(String),
    Date(Date),
}

impl Value {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Semantic attribute type this value inhabits.
    #[must_use]
    pub const fn attribute_type(&self) -> AttributeType {
        match self {
            Self::Int(_) => AttributeType::Integer,
            Self::Real(_) => AttributeType::Real,
            Self::Text(_) => AttributeType::Text,
            Self::Date(_) => AttributeType::Date,
        }
    }

    #[must_use]
    pub const fn family(&self) -> ValueFamily {
        match self {
            Self::Int(_) | Self::Real(_) => ValueFamily::Numeric,
            Self::Text(_) => ValueFamily::Text,
            Self::Date(_) => ValueFamily::Date,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::Date(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<Date> for Value {
    fn from(v: Date) -> Self {
        Self::Date(v)
    }
}
