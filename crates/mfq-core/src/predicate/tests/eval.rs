use super::*;
use crate::{
    error::CompileError,
    predicate::{CompareOp, Predicate, ResolvedOperand},
    schema::RowSlot,
    test_fixtures::{sales_row, sales_schema},
};

fn clause(text: &str) -> Predicate {
    Predicate::parse_clause(text).expect("test clause should parse")
}

#[test]
fn ne_numeric_literal_against_row() {
    let schema = sales_schema();
    let predicate = clause("g1.quant != 100");

    let hundred = sales_row("Sam", "Apple", "NY", 100, "2019-01-05");
    let five = sales_row("Sam", "Apple", "NY", 5, "2019-01-05");

    assert_eq!(predicate.evaluate(&hundred, &schema, "g1"), Ok(false));
    assert_eq!(predicate.evaluate(&five, &schema, "g1"), Ok(true));
}

#[test]
fn eq_text_and_date_literals() {
    let schema = sales_schema();
    let row = sales_row("Sam", "Apple", "NJ", 5, "2019-01-05");

    assert_eq!(clause("g1.state = 'NJ'").evaluate(&row, &schema, "g1"), Ok(true));
    assert_eq!(clause("g1.state = 'NY'").evaluate(&row, &schema, "g1"), Ok(false));
    assert_eq!(clause("g1.date = 2019-01-05").evaluate(&row, &schema, "g1"), Ok(true));
}

#[test]
fn large_integer_attributes_compare_exactly_against_real_literals() {
    let schema = sales_schema();
    let row = sales_row("Sam", "Apple", "NY", 9_007_199_254_740_993, "2019-01-05");

    assert_eq!(
        clause("g1.quant = 9007199254740992.0").evaluate(&row, &schema, "g1"),
        Ok(false)
    );
    assert_eq!(
        clause("g1.quant != 9007199254740992.0").evaluate(&row, &schema, "g1"),
        Ok(true)
    );
    // Overflows i64, classifies as a real, and never equals any integer.
    assert_eq!(
        clause("g1.quant = 99999999999999999999").evaluate(&row, &schema, "g1"),
        Ok(false)
    );
}

#[test]
fn references_to_other_grouping_variables_evaluate_false() {
    let schema = sales_schema();
    let row = sales_row("Sam", "Apple", "NY", 5, "2019-01-05");
    let predicate = clause("g1.quant != 100");

    assert_eq!(predicate.evaluate(&row, &schema, "g2"), Ok(false));
}

#[test]
fn incomparable_families_evaluate_false_for_both_operators() {
    let schema = sales_schema();
    let row = sales_row("Sam", "Apple", "NY", 5, "2019-01-05");

    assert_eq!(clause("g1.state = 5").evaluate(&row, &schema, "g1"), Ok(false));
    assert_eq!(clause("g1.state != 5").evaluate(&row, &schema, "g1"), Ok(false));
}

#[test]
fn literal_only_predicates_ignore_the_row() {
    let schema = sales_schema();
    let row = sales_row("Sam", "Apple", "NY", 5, "2019-01-05");

    assert_eq!(clause("1 = 1").evaluate(&row, &schema, "g1"), Ok(true));
    assert_eq!(clause("'a' != 'a'").evaluate(&row, &schema, "g1"), Ok(false));
}

#[test]
fn resolve_binds_attribute_slots() {
    let schema = sales_schema();
    let resolved = clause("g1.quant = 100")
        .resolve(&schema)
        .expect("quant resolves");

    assert_eq!(
        resolved.left,
        ResolvedOperand::Slot {
            grouping_var: "g1".into(),
            slot: RowSlot::new(6),
        }
    );
    assert_eq!(resolved.op, CompareOp::Eq);
    assert_eq!(resolved.right, ResolvedOperand::Literal(Value::Int(100)));
}

#[test]
fn resolve_unknown_attribute_fails() {
    let schema = sales_schema();

    assert_eq!(
        clause("g1.price = 1").resolve(&schema),
        Err(CompileError::UnknownAttribute {
            attribute: "price".to_string()
        })
    );
}

#[test]
fn short_rows_evaluate_false() {
    let schema = sales_schema();
    let resolved = Predicate::new(attr("g1", "quant"), CompareOp::Eq, int(1))
        .resolve(&schema)
        .expect("quant resolves");

    let short = vec![Value::text("Sam")];
    assert!(!resolved.evaluate(&short, "g1"));
    assert!(!resolved.evaluate(short.as_slice(), "g1"));
}
