use crate::{
    predicate::{AttributeRef, Operand, PredicateError},
    value::{Date, Value},
};

const QUOTE: char = '\'';

impl Operand {
    ///
    /// Classify a raw operand token.
    ///
    /// Rules apply in a fixed order and the first match wins:
    /// 1. plain decimal number (integer when it fits `i64`, else real)
    /// 2. dotted identifier `<groupingVarId>.<attribute>`
    /// 3. quoted text, delimiters stripped
    /// 4. `yyyy-MM-dd` date
    ///
    /// Date parsing is the fallback, so a numeric token is never a date.
    ///
    pub fn classify(token: &str) -> Result<Self, PredicateError> {
        if let Some(value) = parse_number(token) {
            return Ok(Self::Literal(value));
        }

        if let Some((grouping_var, attribute)) = token.split_once('.')
            && !grouping_var.is_empty()
            && !attribute.is_empty()
        {
            return Ok(Self::Attribute(AttributeRef::new(grouping_var, attribute)));
        }

        if token.contains(QUOTE) {
            return Ok(Self::Literal(Value::text(token.trim_matches(QUOTE))));
        }

        Date::parse(token)
            .map(|date| Self::Literal(Value::Date(date)))
            .ok_or_else(|| PredicateError::UnparseableDate {
                operand: token.to_string(),
            })
    }
}

// Accepts `[+-]digits[.digits]` only; `inf`, `NaN` and exponents are not
// plain decimals even though `f64::from_str` takes them.
fn parse_number(token: &str) -> Option<Value> {
    let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let digit_count = whole.len() + fraction.map_or(0, str::len);
    if digit_count == 0 || !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return None;
    }

    if fraction.is_none()
        && let Ok(int) = token.parse::<i64>()
    {
        return Some(Value::Int(int));
    }

    token.parse::<f64>().ok().map(Value::Real)
}
