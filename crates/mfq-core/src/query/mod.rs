//! Module: query
//! Responsibility: the query specification ("phi") and its text parser.
//! Does not own: reading specification text from storage or rendering.
//! Boundary: the only entry point that turns raw specification text into
//! typed aggregates and predicates.

mod parse;


use crate::{
    aggregate::{AggregateSpec, GroupingVariableAggregate, GroupingVariableId},
    error::CompileError,
    predicate::{Predicate, Row},
    schema::SchemaRegistry,
};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use std::collections::BTreeSet;

///
/// ProjectedValue
///
/// One output column: a group-by attribute or an aggregate.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectedValue {
    Attribute(String),
    Aggregate(AggregateSpec),
}

impl ProjectedValue {
    #[must_use]
    pub const fn as_aggregate(&self) -> Option<&AggregateSpec> {
        match self {
            Self::Aggregate(spec) => Some(spec),
            Self::Attribute(_) => None,
        }
    }

    /// Output column name.
    #[must_use]
    pub fn output_name(&self) -> String {
        match self {
            Self::Attribute(name) => name.clone(),
            Self::Aggregate(spec) => spec.output_name(),
        }
    }
}

///
/// QuerySpec
///
/// Parsed multi-feature query ("phi"). Immutable once built; owned by the
/// stage that renders or evaluates it.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuerySpec {
    projected: Vec<ProjectedValue>,
    grouping_variable_count: usize,
    group_by: Vec<String>,
    aggregates: Vec<AggregateSpec>,
    predicates: Vec<Predicate>,
    having: Vec<Predicate>,
}

impl QuerySpec {
    // Derived fields are always rebuilt from `projected`, never taken as given.
    fn from_parts(
        projected: Vec<ProjectedValue>,
        predicates: Vec<Predicate>,
        having: Vec<Predicate>,
    ) -> Result<Self, CompileError> {
        let mut group_by = Vec::new();
        let mut aggregates = Vec::new();
        for value in &projected {
            match value {
                ProjectedValue::Attribute(name) => group_by.push(name.clone()),
                ProjectedValue::Aggregate(spec) => aggregates.push(spec.clone()),
            }
        }
        ensure_unique_output_names(&aggregates)?;

        Ok(Self {
            grouping_variable_count: aggregates.len(),
            projected,
            group_by,
            aggregates,
            predicates,
            having,
        })
    }

    /// Projected values in output column order.
    #[must_use]
    pub fn projected(&self) -> &[ProjectedValue] {
        &self.projected
    }

    ///
    /// Number of grouping variables as recorded by the parser.
    ///
    /// This is the raw count of aggregate projections, so it overstates the
    /// number of grouping variables whenever one variable owns several
    /// aggregates. Use `grouping_variables` for the distinct ids.
    ///
    #[must_use]
    pub const fn grouping_variable_count(&self) -> usize {
        self.grouping_variable_count
    }

    /// Distinct grouping-variable ids owning an aggregate, sorted.
    #[must_use]
    pub fn grouping_variables(&self) -> Vec<&GroupingVariableId> {
        self.aggregates
            .iter()
            .filter_map(AggregateSpec::grouping_variable)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[must_use]
    pub fn group_by(&self) -> &[String] {
        &self.group_by
    }

    #[must_use]
    pub fn aggregates(&self) -> &[AggregateSpec] {
        &self.aggregates
    }

    /// Grouping-variable-scoped aggregates, in projection order.
    #[must_use]
    pub fn grouped_aggregates(&self) -> Vec<GroupingVariableAggregate> {
        self.aggregates
            .iter()
            .filter_map(|spec| match spec {
                AggregateSpec::GroupingVariable(agg) => Some(agg.clone()),
                AggregateSpec::Attribute(_) => None,
            })
            .collect()
    }

    /// Grouping-variable membership predicates.
    #[must_use]
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    #[must_use]
    pub fn having(&self) -> &[Predicate] {
        &self.having
    }

    /// Membership predicates that constrain `grouping_var`.
    pub fn predicates_for<'a>(
        &'a self,
        grouping_var: &'a str,
    ) -> impl Iterator<Item = &'a Predicate> + 'a {
        self.predicates
            .iter()
            .filter(move |predicate| predicate.applies_to(grouping_var))
    }

    /// Whether `row` contributes to `grouping_var`: every predicate that
    /// constrains it must hold.
    pub fn row_matches<R: Row + ?Sized>(
        &self,
        row: &R,
        schema: &SchemaRegistry,
        grouping_var: &str,
    ) -> Result<bool, CompileError> {
        for predicate in self.predicates_for(grouping_var) {
            if !predicate.evaluate(row, schema, grouping_var)? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    ///
    /// Check every attribute the query touches against `schema`.
    ///
    /// Covers group-by attributes, aggregate attributes and attribute
    /// references in membership predicates. Having predicates address
    /// aggregate outputs and are not checked here.
    ///
    pub fn validate(&self, schema: &SchemaRegistry) -> Result<(), CompileError> {
        for attribute in &self.group_by {
            schema.lookup(attribute)?;
        }

        for spec in &self.aggregates {
            schema.lookup(spec.attribute())?;
        }

        for attr in self.predicates.iter().flat_map(Predicate::attribute_refs) {
            schema.lookup(&attr.attribute)?;
        }

        Ok(())
    }
}

fn ensure_unique_output_names(aggregates: &[AggregateSpec]) -> Result<(), CompileError> {
    let mut seen = BTreeSet::new();
    for spec in aggregates {
        let name = spec.output_name();
        if !seen.insert(name.clone()) {
            return Err(CompileError::DuplicateOutputName { name });
        }
    }

    Ok(())
}

///
/// QuerySpecRepr
///
/// Wire form accepted on deserialize. Derived fields in the input are
/// ignored and recomputed.
///

#[derive(Deserialize)]
struct QuerySpecRepr {
    projected: Vec<ProjectedValue>,
    #[serde(default)]
    predicates: Vec<Predicate>,
    #[serde(default)]
    having: Vec<Predicate>,
}

impl<'de> Deserialize<'de> for QuerySpec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = QuerySpecRepr::deserialize(deserializer)?;

        Self::from_parts(repr.projected, repr.predicates, repr.having).map_err(D::Error::custom)
    }
}
