//! Module: aggregate
//! Responsibility: aggregate specifications, output naming/typing and
//! grouping-variable partitioning.
//! Does not own: per-row update rules (see `rule`).
//! Boundary: shared vocabulary between the query parser and the generator.

mod function;
mod spec;


pub use crate::identity::GroupingVariableId;
pub use function::AggregateFunction;
pub use spec::{AggregateSpec, AttributeAggregate, GroupingVariableAggregate};

use std::collections::BTreeMap;

/// Whether any spec is an average, which needs a ratio finalization pass.
#[must_use]
pub fn contains_average(specs: &[AggregateSpec]) -> bool {
    specs
        .iter()
        .any(|spec| spec.function() == AggregateFunction::Avg)
}

///
/// Group aggregates by owning grouping variable.
///
/// Groups are ordered by ascending lexicographic id, never first-seen order,
/// so output-field layout is reproducible across runs. Within a group the
/// input order is kept.
///
#[must_use]
pub fn partition_by_grouping_variable(
    specs: &[GroupingVariableAggregate],
) -> Vec<Vec<GroupingVariableAggregate>> {
    let mut groups = BTreeMap::<&GroupingVariableId, Vec<GroupingVariableAggregate>>::new();
    for spec in specs {
        groups
            .entry(&spec.grouping_var)
            .or_default()
            .push(spec.clone());
    }

    groups.into_values().collect()
}
