use super::*;
use crate::{
    predicate::{CompareOp, Predicate},
    test_fixtures::sales_schema,
    value::{Date, exact_eq},
};
use proptest::prelude::*;

fn arb_date() -> impl Strategy<Value = Date> {
    (1000i32..=9999, 1u8..=12, 1u8..=28)
        .prop_map(|(y, m, d)| Date::new_checked(y, m, d).expect("day 1..=28 is always valid"))
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        (-1_000i64..1_000).prop_map(Value::Int),
        (-4_000i32..4_000).prop_map(|n| Value::Real(f64::from(n) / 4.0)),
        "[A-Z]{0,3}".prop_map(Value::Text),
        arb_date().prop_map(Value::Date),
    ]
}

fn arb_compare_op() -> impl Strategy<Value = CompareOp> {
    prop_oneof![Just(CompareOp::Eq), Just(CompareOp::Ne)]
}

fn eval_literals(left: &Value, op: CompareOp, right: &Value) -> bool {
    let predicate = Predicate::new(
        Operand::Literal(left.clone()),
        op,
        Operand::Literal(right.clone()),
    );
    let empty: Vec<Value> = Vec::new();

    predicate
        .evaluate(&empty, &sales_schema(), "g1")
        .expect("literal predicates always resolve")
}

proptest! {
    #[test]
    fn integer_tokens_classify_as_integers(n in any::<i64>()) {
        prop_assert_eq!(Operand::classify(&n.to_string()), Ok(int(n)));
    }

    #[test]
    fn numeric_tokens_never_classify_as_dates(
        whole in "[0-9]{1,8}",
        fraction in proptest::option::of("[0-9]{1,4}"),
    ) {
        let token = match fraction {
            Some(fraction) => format!("{whole}.{fraction}"),
            None => whole,
        };
        let operand = Operand::classify(&token);

        prop_assert!(
            matches!(operand, Ok(Operand::Literal(Value::Int(_) | Value::Real(_)))),
            "{token} classified as {operand:?}"
        );
    }

    #[test]
    fn dotted_tokens_classify_as_attribute_refs(
        grouping_var in "[a-z][a-z0-9]{0,4}",
        attribute in "[a-z]{1,8}",
    ) {
        let token = format!("{grouping_var}.{attribute}");

        prop_assert_eq!(Operand::classify(&token), Ok(attr(&grouping_var, &attribute)));
    }

    #[test]
    fn formatted_dates_classify_as_dates(date in arb_date()) {
        prop_assert_eq!(
            Operand::classify(&date.to_string()),
            Ok(Operand::Literal(Value::Date(date)))
        );
    }
}

proptest! {
    #[test]
    fn eq_and_ne_partition_comparable_values(left in arb_value(), right in arb_value()) {
        let eq = eval_literals(&left, CompareOp::Eq, &right);
        let ne = eval_literals(&left, CompareOp::Ne, &right);

        if left.family() == right.family() {
            prop_assert_ne!(eq, ne);
        } else {
            prop_assert!(!eq && !ne);
        }
    }

    #[test]
    fn comparison_is_symmetric(left in arb_value(), right in arb_value(), op in arb_compare_op()) {
        prop_assert_eq!(exact_eq(&left, &right), exact_eq(&right, &left));
        prop_assert_eq!(
            eval_literals(&left, op, &right),
            eval_literals(&right, op, &left)
        );
    }
}
