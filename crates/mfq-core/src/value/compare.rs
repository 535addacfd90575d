use crate::value::Value;

///
/// ValueFamily
///
/// Comparison family. Values are only comparable within one family.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueFamily {
    Numeric,
    Text,
    Date,
}

///
/// Exact, type-appropriate equality.
///
/// Returns `None` when the two values belong to different families and the
/// comparison is undefined. Numeric values compare without tolerance and
/// without rounding: an integer equals a real only when the real is a whole
/// number in `i64` range with the same value.
///
#[must_use]
#[expect(clippy::float_cmp)]
pub fn exact_eq(left: &Value, right: &Value) -> Option<bool> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a == b),
        (Value::Real(a), Value::Real(b)) => Some(a == b),
        (Value::Int(a), Value::Real(b)) | (Value::Real(b), Value::Int(a)) => {
            Some(int_eq_real(*a, *b))
        }
        (Value::Text(a), Value::Text(b)) => Some(a == b),
        (Value::Date(a), Value::Date(b)) => Some(a == b),
        _ => None,
    }
}

// -2^63 and 2^63; both are exact in f64.
const I64_LOWER: f64 = -9_223_372_036_854_775_808.0;
const I64_UPPER: f64 = 9_223_372_036_854_775_808.0;

// Casting the integer to f64 would round above 2^53, so the real is
// narrowed instead, and only when that is lossless.
#[expect(clippy::cast_possible_truncation)]
fn int_eq_real(int: i64, real: f64) -> bool {
    if !real.is_finite() || real.fract() != 0.0 {
        return false;
    }

    (I64_LOWER..I64_UPPER).contains(&real) && real as i64 == int
}
