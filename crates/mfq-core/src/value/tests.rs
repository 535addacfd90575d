use crate::value::{Date, Value, ValueFamily, exact_eq};

// ---- helpers -----------------------------------------------------------

fn v_date(s: &str) -> Value {
    Value::Date(Date::parse(s).expect("valid test date"))
}

#[test]
fn exact_eq_integers_and_reals_compare_numerically() {
    assert_eq!(exact_eq(&Value::Int(100), &Value::Int(100)), Some(true));
    assert_eq!(exact_eq(&Value::Int(100), &Value::Real(100.0)), Some(true));
    assert_eq!(exact_eq(&Value::Real(100.5), &Value::Int(100)), Some(false));
}

#[test]
fn exact_eq_applies_no_numeric_tolerance() {
    assert_eq!(
        exact_eq(&Value::Real(0.1 + 0.2), &Value::Real(0.3)),
        Some(false)
    );
}

#[test]
fn exact_eq_integer_real_does_not_round_large_integers() {
    // 2^53 + 1 has no exact f64; the nearest real is 2^53.
    let above = Value::Int(9_007_199_254_740_993);
    let real = Value::Real(9_007_199_254_740_992.0);

    assert_eq!(exact_eq(&above, &real), Some(false));
    assert_eq!(exact_eq(&real, &above), Some(false));
    assert_eq!(
        exact_eq(&Value::Int(9_007_199_254_740_992), &real),
        Some(true)
    );
}

#[test]
fn exact_eq_integer_real_rejects_out_of_range_and_non_finite() {
    assert_eq!(
        exact_eq(&Value::Int(i64::MAX), &Value::Real(9_223_372_036_854_775_808.0)),
        Some(false)
    );
    assert_eq!(
        exact_eq(&Value::Int(i64::MIN), &Value::Real(-9_223_372_036_854_775_808.0)),
        Some(true)
    );
    assert_eq!(exact_eq(&Value::Int(0), &Value::Real(f64::NAN)), Some(false));
    assert_eq!(exact_eq(&Value::Int(1), &Value::Real(f64::INFINITY)), Some(false));
    assert_eq!(exact_eq(&Value::Int(-3), &Value::Real(-3.0)), Some(true));
}

#[test]
fn exact_eq_across_families_is_undefined() {
    assert_eq!(exact_eq(&Value::Int(100), &Value::text("100")), None);
    assert_eq!(exact_eq(&v_date("2024-01-02"), &Value::text("2024-01-02")), None);
}

#[test]
fn exact_eq_dates_and_text() {
    assert_eq!(
        exact_eq(&v_date("2024-01-02"), &v_date("2024-01-02")),
        Some(true)
    );
    assert_eq!(exact_eq(&Value::text("NY"), &Value::text("NJ")), Some(false));
}

#[test]
fn date_parse_uses_fixed_pattern() {
    let date = Date::parse("2019-07-04").expect("date should parse");

    assert_eq!((date.year(), date.month(), date.day()), (2019, 7, 4));
    assert_eq!(date.to_string(), "2019-07-04");
    assert!(Date::parse("07/04/2019").is_none());
    assert!(Date::parse("2019-02-30").is_none());
    assert!(Date::parse("100").is_none());
}

#[test]
fn value_family_groups_numeric_variants() {
    assert_eq!(Value::Int(1).family(), ValueFamily::Numeric);
    assert_eq!(Value::Real(1.0).family(), ValueFamily::Numeric);
    assert_eq!(Value::text("a").family(), ValueFamily::Text);
}
