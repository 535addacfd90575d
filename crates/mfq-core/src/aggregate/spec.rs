use crate::{
    aggregate::AggregateFunction,
    error::CompileError,
    identity::GroupingVariableId,
    schema::{OutputType, SchemaRegistry},
};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// AttributeAggregate
///
/// Aggregate over a plain attribute, not owned by any grouping variable.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct AttributeAggregate {
    pub function: AggregateFunction,
    pub attribute: String,
}

impl AttributeAggregate {
    #[must_use]
    pub fn new(function: AggregateFunction, attribute: impl Into<String>) -> Self {
        Self {
            function,
            attribute: attribute.into(),
        }
    }
}

///
/// GroupingVariableAggregate
///
/// Aggregate owned by one grouping variable.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct GroupingVariableAggregate {
    pub function: AggregateFunction,
    pub grouping_var: GroupingVariableId,
    pub attribute: String,
}

impl GroupingVariableAggregate {
    #[must_use]
    pub fn new(
        function: AggregateFunction,
        grouping_var: impl Into<GroupingVariableId>,
        attribute: impl Into<String>,
    ) -> Self {
        Self {
            function,
            grouping_var: grouping_var.into(),
            attribute: attribute.into(),
        }
    }

    #[must_use]
    pub fn output_name(&self) -> String {
        format!("{}_{}_{}", self.function, self.grouping_var, self.attribute)
    }
}

///
/// AggregateSpec
///
/// One aggregate computation. The two shapes share a capability surface
/// (`function`, `attribute`, `output_name`, `output_type`); only the grouped
/// shape carries a grouping variable.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateSpec {
    Attribute(AttributeAggregate),
    GroupingVariable(GroupingVariableAggregate),
}

impl AggregateSpec {
    #[must_use]
    pub fn attribute_scoped(function: AggregateFunction, attribute: impl Into<String>) -> Self {
        Self::Attribute(AttributeAggregate::new(function, attribute))
    }

    #[must_use]
    pub fn grouped(
        function: AggregateFunction,
        grouping_var: impl Into<GroupingVariableId>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::GroupingVariable(GroupingVariableAggregate::new(
            function,
            grouping_var,
            attribute,
        ))
    }

    #[must_use]
    pub const fn function(&self) -> AggregateFunction {
        match self {
            Self::Attribute(agg) => agg.function,
            Self::GroupingVariable(agg) => agg.function,
        }
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        match self {
            Self::Attribute(agg) => &agg.attribute,
            Self::GroupingVariable(agg) => &agg.attribute,
        }
    }

    #[must_use]
    pub const fn grouping_variable(&self) -> Option<&GroupingVariableId> {
        match self {
            Self::Attribute(_) => None,
            Self::GroupingVariable(agg) => Some(&agg.grouping_var),
        }
    }

    /// Deterministic output field name.
    #[must_use]
    pub fn output_name(&self) -> String {
        match self {
            Self::Attribute(agg) => format!("{}_{}", agg.function, agg.attribute),
            Self::GroupingVariable(agg) => agg.output_name(),
        }
    }

    /// Output type, derived from the function and the attribute's schema type.
    ///
    /// `count` and `avg` have fixed output types and never consult the schema.
    pub fn output_type(&self, schema: &SchemaRegistry) -> Result<OutputType, CompileError> {
        match self.function() {
            AggregateFunction::Count => Ok(OutputType::Count),
            AggregateFunction::Avg => Ok(OutputType::Ratio),
            function @ (AggregateFunction::Sum | AggregateFunction::Max | AggregateFunction::Min) => {
                let source = schema.attribute_type(self.attribute())?;
                Ok(function.output_type(source))
            }
        }
    }

    /// Copy of this spec under another function, same scope and attribute.
    #[must_use]
    pub fn with_function(&self, function: AggregateFunction) -> Self {
        match self {
            Self::Attribute(agg) => Self::attribute_scoped(function, agg.attribute.clone()),
            Self::GroupingVariable(agg) => Self::grouped(
                function,
                agg.grouping_var.clone(),
                agg.attribute.clone(),
            ),
        }
    }

    /// For `avg`, the running `sum` and `count` whose ratio realizes it.
    #[must_use]
    pub fn average_components(&self) -> Option<(Self, Self)> {
        (self.function() == AggregateFunction::Avg).then(|| {
            (
                self.with_function(AggregateFunction::Sum),
                self.with_function(AggregateFunction::Count),
            )
        })
    }
}

impl From<GroupingVariableAggregate> for AggregateSpec {
    fn from(agg: GroupingVariableAggregate) -> Self {
        Self::GroupingVariable(agg)
    }
}

impl From<AttributeAggregate> for AggregateSpec {
    fn from(agg: AttributeAggregate) -> Self {
        Self::Attribute(agg)
    }
}

impl fmt::Display for AggregateSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output_name())
    }
}
