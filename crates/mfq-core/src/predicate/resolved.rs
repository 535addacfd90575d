use crate::{
    error::CompileError,
    identity::GroupingVariableId,
    predicate::{CompareOp, Operand, Predicate},
    schema::{RowSlot, SchemaRegistry},
    value::Value,
};

///
/// ResolvedOperand
///
/// Operand with attribute references bound to a row slot.
///

#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedOperand {
    Literal(Value),
    Slot {
        grouping_var: GroupingVariableId,
        slot: RowSlot,
    },
}

///
/// ResolvedPredicate
///
/// Predicate compiled to row slots for the per-row hot path.
///

#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedPredicate {
    pub left: ResolvedOperand,
    pub op: CompareOp,
    pub right: ResolvedOperand,
}

impl Predicate {
    /// Bind every attribute reference to its schema slot.
    pub fn resolve(&self, schema: &SchemaRegistry) -> Result<ResolvedPredicate, CompileError> {
        Ok(ResolvedPredicate {
            left: resolve_operand(&self.left, schema)?,
            op: self.op,
            right: resolve_operand(&self.right, schema)?,
        })
    }
}

fn resolve_operand(
    operand: &Operand,
    schema: &SchemaRegistry,
) -> Result<ResolvedOperand, CompileError> {
    match operand {
        Operand::Literal(value) => Ok(ResolvedOperand::Literal(value.clone())),
        Operand::Attribute(attr) => Ok(ResolvedOperand::Slot {
            grouping_var: attr.grouping_var.clone(),
            slot: schema.slot(&attr.attribute)?,
        }),
    }
}
