use crate::{identity::GroupingVariableId, predicate::PredicateError, value::Value};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareOp {
    Eq,
    Ne,
}

impl CompareOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
        }
    }
}

impl FromStr for CompareOp {
    type Err = PredicateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Self::Eq),
            "!=" => Ok(Self::Ne),
            other => Err(PredicateError::UnknownOperator {
                op: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// AttributeRef
///
/// `<groupingVarId>.<attribute>` reference into the current row.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AttributeRef {
    pub grouping_var: GroupingVariableId,
    pub attribute: String,
}

impl AttributeRef {
    #[must_use]
    pub fn new(grouping_var: impl Into<GroupingVariableId>, attribute: impl Into<String>) -> Self {
        Self {
            grouping_var: grouping_var.into(),
            attribute: attribute.into(),
        }
    }
}

impl fmt::Display for AttributeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.grouping_var, self.attribute)
    }
}

///
/// Operand
///
/// One side of a comparison, as classified from its source token.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Literal(Value),
    Attribute(AttributeRef),
}

impl Operand {
    #[must_use]
    pub const fn as_attribute(&self) -> Option<&AttributeRef> {
        match self {
            Self::Attribute(attr) => Some(attr),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{value}"),
            Self::Attribute(attr) => write!(f, "{attr}"),
        }
    }
}

///
/// Predicate
///
/// Binary comparison `left op right`. Immutable once parsed.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Predicate {
    pub left: Operand,
    pub op: CompareOp,
    pub right: Operand,
}

impl Predicate {
    #[must_use]
    pub const fn new(left: Operand, op: CompareOp, right: Operand) -> Self {
        Self { left, op, right }
    }

    /// Attribute references on either side, left first.
    pub fn attribute_refs(&self) -> impl Iterator<Item = &AttributeRef> {
        [&self.left, &self.right]
            .into_iter()
            .filter_map(Operand::as_attribute)
    }

    /// Distinct grouping variables referenced, sorted.
    #[must_use]
    pub fn grouping_variables(&self) -> Vec<&GroupingVariableId> {
        let mut ids = self
            .attribute_refs()
            .map(|attr| &attr.grouping_var)
            .collect::<Vec<_>>();
        ids.sort();
        ids.dedup();

        ids
    }

    /// Whether this predicate constrains membership of `grouping_var`.
    #[must_use]
    pub fn applies_to(&self, grouping_var: &str) -> bool {
        self.attribute_refs()
            .any(|attr| attr.grouping_var == *grouping_var)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}
