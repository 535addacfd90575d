mod eval;
mod property;

use crate::predicate::{AttributeRef, Operand};
use crate::value::Value;

// ---- helpers -----------------------------------------------------------

fn attr(grouping_var: &str, attribute: &str) -> Operand {
    Operand::Attribute(AttributeRef::new(grouping_var, attribute))
}

fn int(v: i64) -> Operand {
    Operand::Literal(Value::Int(v))
}

fn text(v: &str) -> Operand {
    Operand::Literal(Value::text(v))
}
