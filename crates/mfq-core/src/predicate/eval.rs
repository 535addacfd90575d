use crate::{
    error::CompileError,
    predicate::{CompareOp, Predicate, ResolvedOperand, ResolvedPredicate},
    schema::{RowSlot, SchemaRegistry},
    value::{Value, exact_eq},
};

///
/// Row
///
/// Abstraction over a positional input row.
/// This decouples predicate evaluation from concrete row storage.
///

pub trait Row {
    fn value(&self, slot: RowSlot) -> Option<&Value>;
}

impl Row for [Value] {
    fn value(&self, slot: RowSlot) -> Option<&Value> {
        self.get(slot.index())
    }
}

impl Row for Vec<Value> {
    fn value(&self, slot: RowSlot) -> Option<&Value> {
        self.as_slice().value(slot)
    }
}

impl ResolvedPredicate {
    ///
    /// Evaluate against one row in the context of `grouping_var`.
    ///
    /// Returns `false` if:
    /// - an attribute reference belongs to another grouping variable
    /// - the row has no value at a referenced slot
    /// - the operands are incomparable (different value families)
    ///
    #[must_use]
    pub fn evaluate<R: Row + ?Sized>(&self, row: &R, grouping_var: &str) -> bool {
        let (Some(left), Some(right)) = (
            resolve(&self.left, row, grouping_var),
            resolve(&self.right, row, grouping_var),
        ) else {
            return false;
        };

        // NOTE: Undefined comparisons return None; both operators treat that as false.
        match self.op {
            CompareOp::Eq => exact_eq(left, right).unwrap_or(false),
            CompareOp::Ne => exact_eq(left, right).is_some_and(|eq| !eq),
        }
    }
}

impl Predicate {
    /// Resolve against `schema`, then evaluate.
    pub fn evaluate<R: Row + ?Sized>(
        &self,
        row: &R,
        schema: &SchemaRegistry,
        grouping_var: &str,
    ) -> Result<bool, CompileError> {
        Ok(self.resolve(schema)?.evaluate(row, grouping_var))
    }
}

fn resolve<'a, R: Row + ?Sized>(
    operand: &'a ResolvedOperand,
    row: &'a R,
    grouping_var: &str,
) -> Option<&'a Value> {
    match operand {
        ResolvedOperand::Literal(value) => Some(value),
        ResolvedOperand::Slot {
            grouping_var: owner,
            slot,
        } => (*owner == *grouping_var)
            .then(|| row.value(*slot))
            .flatten(),
    }
}
