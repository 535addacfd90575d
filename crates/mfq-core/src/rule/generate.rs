use crate::{
    aggregate::{AggregateFunction, AggregateSpec},
    error::CompileError,
    obs::sink::{self, CompileEvent},
    query::QuerySpec,
    rule::{FoldOp, RowCast, UpdateRule},
    schema::{OutputType, SchemaRegistry},
};
use serde::{Deserialize, Serialize};

///
/// AggregateRule
///
/// Update rule bound to the output field it maintains.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AggregateRule {
    pub output_name: String,
    pub output_type: OutputType,
    pub rule: UpdateRule,
}

///
/// AverageRules
///
/// Running bookkeeping behind one `avg`: the ratio is `sum / count`,
/// computed once at finalization by the consumer.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AverageRules {
    pub sum: UpdateRule,
    pub count: UpdateRule,
}

///
/// RuleGenerator
///
/// Translates aggregate specifications into update rules against one schema.
/// Generation is pure: the function override never touches the spec.
///

#[derive(Clone, Copy, Debug)]
pub struct RuleGenerator<'a> {
    schema: &'a SchemaRegistry,
}

impl<'a> RuleGenerator<'a> {
    #[must_use]
    pub const fn new(schema: &'a SchemaRegistry) -> Self {
        Self { schema }
    }

    ///
    /// Produce the update rule for `spec`.
    ///
    /// `function_override` selects another function's branch (e.g. `sum` for
    /// an `avg`) while leaving the spec's function, output name and output
    /// type untouched. A `count` spec always yields `set_constant(1)`.
    ///
    pub fn generate(
        &self,
        spec: &AggregateSpec,
        function_override: Option<AggregateFunction>,
    ) -> Result<UpdateRule, CompileError> {
        let effective = match spec.function() {
            AggregateFunction::Count => AggregateFunction::Count,
            own => function_override.unwrap_or(own),
        };

        let rule = self.rule_for(spec, effective).inspect_err(|err| {
            sink::record(CompileEvent::Rejected {
                origin: err.origin(),
            });
        })?;

        tracing::debug!(
            output = %spec,
            function = %effective,
            rule = %rule,
            "update rule generated"
        );
        sink::record(CompileEvent::RuleGenerated {
            function: effective,
            overridden: effective != spec.function(),
        });

        Ok(rule)
    }

    /// One rule per aggregate of `phi`, in projection order.
    pub fn generate_all(&self, phi: &QuerySpec) -> Result<Vec<AggregateRule>, CompileError> {
        phi.aggregates()
            .iter()
            .map(|spec| {
                Ok(AggregateRule {
                    output_name: spec.output_name(),
                    output_type: spec.output_type(self.schema)?,
                    rule: self.generate(spec, None)?,
                })
            })
            .collect()
    }

    /// Sum and count rules backing an `avg`; `None` for other functions.
    pub fn generate_average(
        &self,
        spec: &AggregateSpec,
    ) -> Result<Option<AverageRules>, CompileError> {
        if spec.function() != AggregateFunction::Avg {
            return Ok(None);
        }

        Ok(Some(AverageRules {
            sum: self.generate(spec, Some(AggregateFunction::Sum))?,
            count: self.generate(spec, Some(AggregateFunction::Count))?,
        }))
    }

    fn rule_for(
        &self,
        spec: &AggregateSpec,
        function: AggregateFunction,
    ) -> Result<UpdateRule, CompileError> {
        let fold = |op| -> Result<UpdateRule, CompileError> {
            Ok(UpdateRule::Fold {
                previous_output: spec.output_name(),
                op,
                source: self.row_cast(spec, function)?,
            })
        };

        match function {
            AggregateFunction::Count => Ok(UpdateRule::SetConstant(1)),
            AggregateFunction::Sum | AggregateFunction::Avg => {
                Ok(UpdateRule::CastFromRow(self.row_cast(spec, function)?))
            }
            AggregateFunction::Max => fold(FoldOp::Max),
            AggregateFunction::Min => fold(FoldOp::Min),
        }
    }

    // Domain is the effective function's output type over the source
    // attribute, so an overridden `avg` casts exactly like a native `sum`.
    fn row_cast(
        &self,
        spec: &AggregateSpec,
        function: AggregateFunction,
    ) -> Result<RowCast, CompileError> {
        let entry = self.schema.lookup(spec.attribute())?;

        Ok(RowCast {
            slot: entry.slot,
            domain: function.output_type(entry.ty),
        })
    }
}
