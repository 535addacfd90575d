use crate::{
    schema::SchemaRegistry,
    value::{Date, Value},
};

/// The built-in `sales` schema used by most tests.
pub(crate) fn sales_schema() -> SchemaRegistry {
    SchemaRegistry::sales()
}

/// One `sales` row in slot order.
pub(crate) fn sales_row(cust: &str, prod: &str, state: &str, quant: i64, date: &str) -> Vec<Value> {
    let date = Date::parse(date).expect("fixture date should parse");

    vec![
        Value::text(cust),
        Value::text(prod),
        Value::Int(i64::from(date.day())),
        Value::Int(i64::from(date.month())),
        Value::Int(i64::from(date.year())),
        Value::text(state),
        Value::Int(quant),
        Value::Date(date),
    ]
}

/// Canonical single-predicate specification over `g1`.
pub(crate) const AVG_SPEC: &str = "quant,avg_g1_quant\n\n\n\ng1.quant != 100";

/// Two grouping variables with a having line.
pub(crate) const NY_NJ_SPEC: &str = "cust,count_g1_quant,sum_g2_quant,max_g1_quant\n\
reserved\n\
\n\
\n\
g1.state = 'NY'; g2.state = 'NJ'\n\
g2.state != 'CT'";
